//! `linkhead set-origin <url>` – set or clear the global canonical rule.

use anyhow::{Context, Result};
use linkhead_core::rules::StoredCanonicalRule;
use std::path::Path;

use super::load_for_update;

pub fn run_set_origin(rules_path: &Path, url: &str) -> Result<()> {
    let mut snapshot = load_for_update(rules_path)?;
    let stored = StoredCanonicalRule {
        base_url: url.to_string(),
        preserve_default_path: true,
    };
    let rule = snapshot
        .set_global_canonical(Some(&stored))
        .context("invalid canonical origin")?;
    snapshot.save_to_path(rules_path)?;

    match rule {
        Some(rule) => println!("Global canonical set to {}", rule.base_url),
        None => println!("Global canonical cleared"),
    }
    Ok(())
}
