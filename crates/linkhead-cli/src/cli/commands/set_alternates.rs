//! `linkhead set-alternates <file>` – replace the global alternate links.

use anyhow::{Context, Result};
use std::path::Path;

use super::{load_for_update, read_alternates_file};

pub fn run_set_alternates(rules_path: &Path, file: &Path) -> Result<()> {
    let items = read_alternates_file(file)?;
    let mut snapshot = load_for_update(rules_path)?;
    let entries = snapshot
        .set_global_alternates(&items)
        .context("invalid alternate links")?;
    snapshot.save_to_path(rules_path)?;
    println!("Stored {} global alternate link(s)", entries.len());
    Ok(())
}
