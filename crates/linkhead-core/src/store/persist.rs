//! Persist the rule snapshot to disk (JSON under the XDG data dir).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::snapshot::RuleSnapshot;

impl RuleSnapshot {
    /// Default path for the rule file: `~/.local/share/linkhead/rules.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("linkhead")?;
        Ok(xdg_dirs.place_data_file("rules.json")?)
    }

    /// Save the snapshot to the given path (creates parent dir if needed).
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize rule snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("write rule snapshot: {}", path.display()))?;
        Ok(())
    }

    /// Load the snapshot from the given path. A missing file yields `None`;
    /// unreadable or unparseable files are errors (so writers never clobber them).
    pub fn load_from_path(path: &Path) -> Result<Option<RuleSnapshot>> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read rule snapshot: {}", path.display()))
            }
        };
        let snapshot: RuleSnapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse rule snapshot: {}", path.display()))?;
        Ok(Some(snapshot))
    }

    /// Read-path loading: any failure degrades to an empty snapshot so page
    /// rendering continues with the host's own tags.
    pub fn load_or_empty(path: &Path) -> RuleSnapshot {
        match Self::load_from_path(path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => RuleSnapshot::new(),
            Err(e) => {
                tracing::warn!("ignoring rule snapshot: {:#}", e);
                RuleSnapshot::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StoredCanonicalRule;
    use crate::store::RuleStore;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_from_path() {
        let mut snapshot = RuleSnapshot::new();
        snapshot
            .set_global_canonical(Some(&StoredCanonicalRule {
                base_url: "example.com".to_string(),
                preserve_default_path: true,
            }))
            .unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("rules.json");
        snapshot.save_to_path(&path).unwrap();

        let loaded = RuleSnapshot::load_from_path(&path).unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(loaded.global_canonical_rule().is_some());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(RuleSnapshot::load_from_path(&path).unwrap().is_none());
        assert_eq!(RuleSnapshot::load_or_empty(&path), RuleSnapshot::new());
    }

    #[test]
    fn corrupt_file_errors_strictly_but_reads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(RuleSnapshot::load_from_path(&path).is_err());
        assert_eq!(RuleSnapshot::load_or_empty(&path), RuleSnapshot::new());
    }
}
