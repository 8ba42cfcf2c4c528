//! `linkhead set-dynamic <kind> [url]` – canonical override for search,
//! author, date or 404 pages.

use anyhow::{Context, Result};
use linkhead_core::rules::{DynamicContextKind, StoredCanonicalRule};
use std::path::Path;

use super::load_for_update;

pub fn run_set_dynamic(
    rules_path: &Path,
    kind: DynamicContextKind,
    url: Option<&str>,
    preserve_default_path: bool,
) -> Result<()> {
    let mut snapshot = load_for_update(rules_path)?;
    let stored = url.map(|url| StoredCanonicalRule {
        base_url: url.to_string(),
        preserve_default_path,
    });
    let rule = snapshot
        .set_dynamic_canonical(kind, stored.as_ref())
        .with_context(|| format!("invalid canonical for {} context", kind.as_key()))?;
    snapshot.save_to_path(rules_path)?;

    match rule {
        Some(rule) => println!("{} canonical set to {}", kind.as_key(), rule.base_url),
        None => println!("{} canonical cleared", kind.as_key()),
    }
    Ok(())
}
