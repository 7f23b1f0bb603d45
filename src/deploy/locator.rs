//! Manifest discovery
//!
//! Resolves a file or directory path into the flat list of manifest files to
//! deploy. Directories are walked depth-first in directory-listing order, so
//! the on-disk order decides the deployment order.

use std::path::{Path, PathBuf};

use super::error::DiscoveryError;

/// Find every manifest file under `path`
///
/// A regular file yields itself. A directory yields all of its file
/// descendants, with each child's results concatenated in listing order.
/// Symlinks are followed; a directory that links back into one of its own
/// ancestors is reported as a cycle.
pub fn find_manifests(path: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut manifests = Vec::new();
    let mut ancestors = Vec::new();
    walk(path, &mut ancestors, &mut manifests)?;
    tracing::trace!(path = %path.display(), count = manifests.len(), "discovered manifests");
    Ok(manifests)
}

fn walk(
    path: &Path,
    ancestors: &mut Vec<PathBuf>,
    manifests: &mut Vec<PathBuf>,
) -> Result<(), DiscoveryError> {
    let metadata = std::fs::metadata(path).map_err(|source| DiscoveryError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        manifests.push(path.to_path_buf());
        return Ok(());
    }

    let canonical = std::fs::canonicalize(path).map_err(|source| DiscoveryError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    if ancestors.contains(&canonical) {
        return Err(DiscoveryError::Cycle {
            path: path.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(path).map_err(|source| DiscoveryError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;

    ancestors.push(canonical);
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;
        walk(&entry.path(), ancestors, manifests)?;
    }
    ancestors.pop();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deployment.yaml");
        fs::write(&file, "kind: Deployment\n").unwrap();

        let manifests = find_manifests(&file).unwrap();
        assert_eq!(manifests, vec![file]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_manifests(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_nested_directories_return_every_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("apps/web")).unwrap();
        fs::create_dir_all(root.join("apps/empty")).unwrap();
        fs::create_dir_all(root.join("net")).unwrap();

        let expected: HashSet<PathBuf> = [
            root.join("top.yaml"),
            root.join("apps/web/deployment.yaml"),
            root.join("apps/web/service.yaml"),
            root.join("net/service.yaml"),
        ]
        .into_iter()
        .collect();
        for file in &expected {
            fs::write(file, "kind: Service\n").unwrap();
        }

        let manifests = find_manifests(root).unwrap();
        assert_eq!(manifests.len(), expected.len());
        let found: HashSet<PathBuf> = manifests.into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_children_stay_grouped_under_their_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/one.yaml"), "").unwrap();
        fs::write(root.join("a/two.yaml"), "").unwrap();
        fs::write(root.join("b.yaml"), "").unwrap();

        let manifests = find_manifests(root).unwrap();
        let positions: Vec<usize> = manifests
            .iter()
            .enumerate()
            .filter(|(_, path)| path.starts_with(root.join("a")))
            .map(|(index, _)| index)
            .collect();

        // Depth-first: the two files under a/ are adjacent
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1], positions[0] + 1);
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = find_manifests(&missing).unwrap_err();
        assert!(matches!(err, DiscoveryError::Stat { ref path, .. } if *path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_followed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.yaml");
        fs::write(&target, "kind: Service\n").unwrap();
        let manifests_dir = dir.path().join("manifests");
        fs::create_dir(&manifests_dir).unwrap();
        let link = manifests_dir.join("linked.yaml");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(find_manifests(&manifests_dir).unwrap(), vec![link]);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_cycle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("child")).unwrap();
        std::os::unix::fs::symlink(&root, root.join("child/loop")).unwrap();

        let err = find_manifests(&root).unwrap_err();
        assert!(matches!(err, DiscoveryError::Cycle { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_fails_discovery() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken.yaml"))
            .unwrap();

        let err = find_manifests(dir.path()).unwrap_err();
        assert!(matches!(err, DiscoveryError::Stat { .. }));
    }
}
