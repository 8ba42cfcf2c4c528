//! JSON wire shapes of stored rules.

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical rule as persisted: `{ "baseUrl": "...", "preserveDefaultPath": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCanonicalRule {
    pub base_url: String,
    #[serde(default = "default_preserve", deserialize_with = "deserialize_flag")]
    pub preserve_default_path: bool,
}

/// Alternate link as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAlternateLink {
    pub hreflang: String,
    pub href_base_url: String,
    #[serde(default = "default_preserve", deserialize_with = "deserialize_flag")]
    pub preserve_default_path: bool,
    #[serde(default)]
    pub path_prefix: String,
}

/// Missing preserve flag means "keep the page path".
fn default_preserve() -> bool {
    true
}

/// Accepts `true`/`false`, numbers and the usual string spellings of booleans,
/// as written by form-based settings screens.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
        Flag::Text(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
    })
}
