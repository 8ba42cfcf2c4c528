//! `linkhead show` – print the stored rule snapshot.

use anyhow::Result;
use linkhead_core::RuleSnapshot;
use std::path::Path;

pub fn run_show(rules_path: &Path) -> Result<()> {
    match RuleSnapshot::load_from_path(rules_path)? {
        Some(snapshot) => {
            println!("# {}", rules_path.display());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        None => println!("No rules stored at {}", rules_path.display()),
    }
    Ok(())
}
