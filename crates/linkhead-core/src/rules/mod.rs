//! Rule data model: canonical overrides, alternate (hreflang) links and the
//! dynamic request contexts that may carry their own canonical override.
//!
//! Rules are stored in their wire shape (`Stored*`) and turned into the
//! validated types below either strictly (write boundary, see [`validate`])
//! or leniently (read path, invalid entries skipped).

mod validate;
mod wire;

pub use validate::{
    decode_canonical_rule, sanitize_alternate_links, validate_alternate_link,
    validate_alternate_links, validate_canonical_rule, validate_hreflang,
};
pub use wire::{StoredAlternateLink, StoredCanonicalRule};

use serde::{Deserialize, Serialize};

use crate::url_model::NormalizedUrl;

/// Identifier of a content entity (post, page, term) in the host.
pub type EntityId = u64;

/// Hreflang value that marks the fallback alternate.
pub const X_DEFAULT: &str = "x-default";

/// Canonical override: where the canonical URL of a page should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRule {
    pub base_url: NormalizedUrl,
    /// Append the current page path under `base_url` instead of using it verbatim.
    pub preserve_default_path: bool,
}

/// One `<link rel="alternate" hreflang="…">` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLinkEntry {
    /// Lowercased language tag or `x-default`.
    pub hreflang: String,
    pub href_base_url: NormalizedUrl,
    pub preserve_default_path: bool,
    /// `""` or `/segment/…/`; only ever non-empty when `href_base_url` has a root path.
    pub path_prefix: String,
}

/// Request contexts that are not tied to an entity but may carry their own
/// canonical override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DynamicContextKind {
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "author")]
    Author,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "404")]
    NotFound,
}

impl DynamicContextKind {
    pub const ALL: [DynamicContextKind; 4] = [
        DynamicContextKind::Search,
        DynamicContextKind::Author,
        DynamicContextKind::Date,
        DynamicContextKind::NotFound,
    ];

    /// Key used in the stored rule snapshot.
    pub fn as_key(self) -> &'static str {
        match self {
            DynamicContextKind::Search => "search",
            DynamicContextKind::Author => "author",
            DynamicContextKind::Date => "date",
            DynamicContextKind::NotFound => "404",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_key() == key)
    }
}

impl From<&CanonicalRule> for StoredCanonicalRule {
    fn from(rule: &CanonicalRule) -> Self {
        Self {
            base_url: rule.base_url.to_string(),
            preserve_default_path: rule.preserve_default_path,
        }
    }
}

impl From<&AlternateLinkEntry> for StoredAlternateLink {
    fn from(entry: &AlternateLinkEntry) -> Self {
        Self {
            hreflang: entry.hreflang.clone(),
            href_base_url: entry.href_base_url.to_string(),
            preserve_default_path: entry.preserve_default_path,
            path_prefix: entry.path_prefix.clone(),
        }
    }
}
