//! Manifest parsing
//!
//! Manifests are decoded into a schema-less `Resource`. Only `kind` and the
//! `metadata` fields the engine needs are ever inspected; everything else is
//! passed through to the cluster untouched.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ManifestError;

/// A generic Kubernetes object decoded from a manifest document
///
/// The wrapped value is always a mapping at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    object: Value,
}

impl Resource {
    /// Wrap a decoded document, rejecting anything that is not a mapping
    pub fn from_value(object: Value) -> Result<Self, ManifestError> {
        match object {
            Value::Object(_) => Ok(Self { object }),
            Value::Null => Err(ManifestError::EmptyDocument),
            _ => Err(ManifestError::NotAMapping),
        }
    }

    /// Decode the first YAML document in `content`
    ///
    /// Further documents are ignored; use `read_manifest` to get a warning
    /// when that happens.
    pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
        decode_first_document(content).map(|(resource, _)| resource)
    }

    pub fn kind(&self) -> Option<&str> {
        self.object.get("kind").and_then(Value::as_str)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.object.get("apiVersion").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.object.pointer("/metadata/name").and_then(Value::as_str)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.object
            .pointer("/metadata/namespace")
            .and_then(Value::as_str)
    }

    /// Force `metadata.namespace`, creating `metadata` if it is missing
    pub fn set_namespace(&mut self, namespace: &str) {
        let Value::Object(object) = &mut self.object else {
            return;
        };
        let metadata = object
            .entry("metadata")
            .or_insert_with(|| Value::Object(Map::new()));
        if !metadata.is_object() {
            *metadata = Value::Object(Map::new());
        }
        if let Value::Object(metadata) = metadata {
            metadata.insert(
                "namespace".to_string(),
                Value::String(namespace.to_string()),
            );
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.object
    }

    pub fn into_value(self) -> Value {
        self.object
    }
}

/// Read and decode a single manifest file
pub fn read_manifest(path: &Path) -> Result<Resource, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(ManifestError::Io)?;

    let (resource, ignored) = decode_first_document(&content)?;
    if ignored > 0 {
        tracing::warn!(
            path = %path.display(),
            ignored,
            "manifest contains multiple documents, only the first is deployed"
        );
    }

    tracing::trace!(
        path = %path.display(),
        kind = resource.kind().unwrap_or_default(),
        name = resource.name().unwrap_or_default(),
        "read manifest"
    );
    Ok(resource)
}

/// Decode the first document and count how many follow it
fn decode_first_document(content: &str) -> Result<(Resource, usize), ManifestError> {
    let mut documents = serde_yaml::Deserializer::from_str(content);
    let first = documents.next().ok_or(ManifestError::EmptyDocument)?;
    let value = Value::deserialize(first).map_err(ManifestError::Decode)?;
    let resource = Resource::from_value(value)?;
    Ok((resource, documents.count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: ignored
spec:
  replicas: 2
"#;

    #[test]
    fn test_decode_fields() {
        let resource = Resource::from_yaml(DEPLOYMENT).unwrap();
        assert_eq!(resource.kind(), Some("Deployment"));
        assert_eq!(resource.api_version(), Some("apps/v1"));
        assert_eq!(resource.name(), Some("web"));
        assert_eq!(resource.namespace(), Some("ignored"));
        assert_eq!(resource.as_value()["spec"]["replicas"], json!(2));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let resource = Resource::from_yaml("spec: {}\n").unwrap();
        assert_eq!(resource.kind(), None);
        assert_eq!(resource.name(), None);
        assert_eq!(resource.namespace(), None);
    }

    #[test]
    fn test_set_namespace_overrides_document() {
        let mut resource = Resource::from_yaml(DEPLOYMENT).unwrap();
        resource.set_namespace("bench");
        assert_eq!(resource.namespace(), Some("bench"));
        assert_eq!(resource.name(), Some("web"));
    }

    #[test]
    fn test_set_namespace_creates_metadata() {
        let mut resource = Resource::from_value(json!({"kind": "Service"})).unwrap();
        resource.set_namespace("default");
        assert_eq!(
            resource.into_value(),
            json!({"kind": "Service", "metadata": {"namespace": "default"}})
        );
    }

    #[test]
    fn test_only_first_document_is_honoured() {
        let content = "kind: Deployment\nmetadata:\n  name: first\n---\nkind: Service\nmetadata:\n  name: second\n";
        let (resource, ignored) = decode_first_document(content).unwrap();
        assert_eq!(resource.name(), Some("first"));
        assert_eq!(ignored, 1);
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let err = Resource::from_yaml("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ManifestError::NotAMapping));

        let err = Resource::from_yaml("just a string\n").unwrap_err();
        assert!(matches!(err, ManifestError::NotAMapping));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let err = Resource::from_yaml("").unwrap_err();
        assert!(matches!(err, ManifestError::EmptyDocument));

        let err = Resource::from_yaml("~\n").unwrap_err();
        assert!(matches!(err, ManifestError::EmptyDocument));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Resource::from_yaml("kind: [Deployment\n").unwrap_err();
        assert!(matches!(err, ManifestError::Decode(_)));
    }

    #[test]
    fn test_read_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployment.yaml");
        std::fs::write(&path, DEPLOYMENT).unwrap();

        let resource = read_manifest(&path).unwrap();
        assert_eq!(resource.kind(), Some("Deployment"));
    }

    #[test]
    fn test_read_manifest_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_manifest(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }

    #[test]
    fn test_read_manifest_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.yaml");
        std::fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();

        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }
}
