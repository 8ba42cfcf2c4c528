//! CLI command handlers, one per file.

mod normalize;
mod og_locale;
mod resolve;
mod rewrite;
mod set_alternates;
mod set_dynamic;
mod set_entity;
mod set_origin;
mod show;

pub use normalize::run_normalize;
pub use og_locale::run_og_locale;
pub use resolve::run_resolve;
pub use rewrite::run_rewrite;
pub use set_alternates::run_set_alternates;
pub use set_dynamic::run_set_dynamic;
pub use set_entity::{run_set_entity, EntityUpdate};
pub use set_origin::run_set_origin;
pub use show::run_show;

use anyhow::{Context, Result};
use linkhead_core::rules::StoredAlternateLink;
use linkhead_core::RuleSnapshot;
use std::path::Path;

/// Snapshot to modify: an unreadable file is an error rather than an empty
/// start, so a write never clobbers rules it could not parse.
fn load_for_update(rules_path: &Path) -> Result<RuleSnapshot> {
    Ok(RuleSnapshot::load_from_path(rules_path)?.unwrap_or_default())
}

fn read_alternates_file(path: &Path) -> Result<Vec<StoredAlternateLink>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read alternates: {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parse alternates: {}", path.display()))
}
