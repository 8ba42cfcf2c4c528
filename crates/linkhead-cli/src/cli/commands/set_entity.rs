//! `linkhead set-entity <id>` – register an entity and update its overrides.

use anyhow::{Context, Result};
use linkhead_core::rules::{EntityId, StoredCanonicalRule};
use std::path::{Path, PathBuf};

use super::{load_for_update, read_alternates_file};

/// Requested changes for one entity. `None` fields are left as stored.
#[derive(Debug, Clone)]
pub struct EntityUpdate {
    pub post_type: String,
    pub publicly_queryable: bool,
    /// `Some("")` clears the canonical override.
    pub canonical: Option<String>,
    pub preserve_default_path: bool,
    pub alternates: Option<PathBuf>,
    pub remove: bool,
}

pub fn run_set_entity(rules_path: &Path, id: EntityId, update: &EntityUpdate) -> Result<()> {
    let mut snapshot = load_for_update(rules_path)?;

    if update.remove {
        if snapshot.remove_entity(id) {
            snapshot.save_to_path(rules_path)?;
            println!("Removed entity {id}");
        } else {
            println!("Entity {id} has no stored rules");
        }
        return Ok(());
    }

    snapshot.register_entity(id, update.post_type.clone(), update.publicly_queryable);

    if let Some(url) = &update.canonical {
        let stored = StoredCanonicalRule {
            base_url: url.clone(),
            preserve_default_path: update.preserve_default_path,
        };
        snapshot
            .set_entity_canonical(id, Some(&stored))
            .with_context(|| format!("invalid canonical for entity {id}"))?;
    }

    if let Some(file) = &update.alternates {
        let items = read_alternates_file(file)?;
        snapshot
            .set_entity_alternates(id, &items)
            .with_context(|| format!("invalid alternate links for entity {id}"))?;
    }

    snapshot.save_to_path(rules_path)?;
    println!("Updated entity {id}");
    Ok(())
}
