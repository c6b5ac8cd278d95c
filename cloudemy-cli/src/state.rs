//! Saved-version persistence
//!
//! The version store is kept as a JSON file next to the session file, so
//! saved attempts survive between invocations. The grading service stays the
//! authority; this file only records what was observed locally.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cloudemy_poller::VersionStore;

fn versions_path(state_dir: &Path) -> PathBuf {
    state_dir.join("versions.json")
}

/// Load the version store, starting empty when none exists yet.
pub fn load_versions(state_dir: &Path) -> Result<VersionStore> {
    let path = versions_path(state_dir);
    if !path.exists() {
        return Ok(VersionStore::new());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read versions file {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Corrupt versions file {:?}", path))
}

pub fn store_versions(state_dir: &Path, versions: &VersionStore) -> Result<()> {
    fs::create_dir_all(state_dir)
        .with_context(|| format!("Failed to create state directory {:?}", state_dir))?;
    let json = serde_json::to_string_pretty(versions)?;
    fs::write(versions_path(state_dir), json)
        .with_context(|| format!("Failed to write versions file in {:?}", state_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudemy_core::domain::submission::RemoteStatus;

    #[test]
    fn test_missing_file_loads_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_versions(dir.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_versions_survive_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = load_versions(dir.path()).unwrap();
        store.record("sub-1", RemoteStatus::Pending, 1, "print(1)");
        store.record("sub-2", RemoteStatus::Running, 2, "print(2)");
        store_versions(dir.path(), &store).unwrap();

        let reloaded = load_versions(dir.path()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.latest().unwrap().label, "v2");
        assert_eq!(reloaded.latest().unwrap().submission_id, "sub-2");
    }
}
