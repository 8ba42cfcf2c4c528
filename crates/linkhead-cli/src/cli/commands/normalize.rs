//! `linkhead normalize <url>` – print the normalized form of a base URL.

use anyhow::Result;
use linkhead_core::url_model;

pub fn run_normalize(raw: &str) -> Result<()> {
    match url_model::normalize(raw)? {
        Some(url) => println!("{url}"),
        None => println!("(empty: no rule)"),
    }
    Ok(())
}
