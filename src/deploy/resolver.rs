//! Resource type resolution
//!
//! Maps a manifest's `kind` to the API collection it is created in. The
//! mapping is the static `RESOURCE_TYPES` table; to support a new kind, add an
//! entry there.

use std::fmt;

use super::manifest::Resource;

/// Group, version and plural name addressing an API collection
///
/// The default value (all fields empty) stands for "no known collection".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceTypeDescriptor {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl ResourceTypeDescriptor {
    pub fn new(group: &str, version: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }

    /// True for the zero-value descriptor returned for unknown kinds
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty() && self.resource.is_empty()
    }

    /// `group/version`, or just `version` for the core group
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for ResourceTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.resource)
    }
}

/// Table entry mapping a kind to its API collection
pub struct ResourceTypeEntry {
    pub kind: &'static str,
    pub group: &'static str,
    pub version: &'static str,
    pub resource: &'static str,
}

impl ResourceTypeEntry {
    pub fn descriptor(&self) -> ResourceTypeDescriptor {
        ResourceTypeDescriptor::new(self.group, self.version, self.resource)
    }
}

/// Kinds that can be deployed
pub const RESOURCE_TYPES: &[ResourceTypeEntry] = &[
    ResourceTypeEntry {
        kind: "Deployment",
        group: "apps",
        version: "v1",
        resource: "deployments",
    },
    ResourceTypeEntry {
        kind: "Service",
        group: "",
        version: "v1",
        resource: "services",
    },
];

/// Look up the collection for a kind, returning the empty descriptor when the
/// kind is not in the table
pub fn resolve_kind(kind: &str) -> ResourceTypeDescriptor {
    RESOURCE_TYPES
        .iter()
        .find(|entry| entry.kind == kind)
        .map(ResourceTypeEntry::descriptor)
        .unwrap_or_default()
}

/// Resolve the collection a resource belongs to
pub fn resolve_type(resource: &Resource) -> ResourceTypeDescriptor {
    resource.kind().map(resolve_kind).unwrap_or_default()
}

/// All kinds present in the table
pub fn supported_kinds() -> Vec<&'static str> {
    RESOURCE_TYPES.iter().map(|entry| entry.kind).collect()
}
