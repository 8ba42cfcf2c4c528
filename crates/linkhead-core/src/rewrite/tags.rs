//! Tag patterns and builders for `<link>` surgery on captured head markup.
//!
//! Patterns target single-line `<link …>` tags as emitted by the host. Each
//! removal also eats the whitespace that followed the tag, so no blank lines
//! are left behind.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use super::escape::{escape_attr, unescape_attr};

const CANONICAL_TAG_PATTERN: &str = r#"(?i)<link\b[^>]*\brel=(?:"canonical"|'canonical')[^>]*>\s*"#;
const HREF_ATTR_PATTERN: &str = r#"(?i)\bhref=(?:"([^"]+)"|'([^']+)')"#;
const LINK_TAG_PATTERN: &str = r#"(?i)<link\b[^>]*>\s*"#;
const REL_ALTERNATE_PATTERN: &str = r#"(?i)\brel=(?:"alternate"|'alternate')"#;
const HREFLANG_ATTR_PATTERN: &str = r#"(?i)\bhreflang=(?:"([^"]*)"|'([^']*)')"#;

static CANONICAL_TAG: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(CANONICAL_TAG_PATTERN));
static HREF_ATTR: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(HREF_ATTR_PATTERN));
static LINK_TAG: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(LINK_TAG_PATTERN));
static REL_ALTERNATE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(REL_ALTERNATE_PATTERN));
static HREFLANG_ATTR: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(HREFLANG_ATTR_PATTERN));

/// A tag pattern could not be used; callers keep the markup they had.
#[derive(Debug, Error)]
#[error("tag pattern {name} unavailable: {reason}")]
pub struct PatternError {
    name: &'static str,
    reason: String,
}

impl PatternError {
    pub(crate) fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

fn pattern(
    name: &'static str,
    cell: &'static LazyLock<Result<Regex, regex::Error>>,
) -> Result<&'static Regex, PatternError> {
    LazyLock::force(cell)
        .as_ref()
        .map_err(|e| PatternError::new(name, e.to_string()))
}

/// Canonical tags found in captured markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalScan {
    pub count: usize,
    /// Href of the first canonical tag that carries one, entity-decoded.
    pub first_href: Option<String>,
}

pub fn scan_canonical_tags(html: &str) -> Result<CanonicalScan, PatternError> {
    let canonical = pattern("canonical", &CANONICAL_TAG)?;
    let href = pattern("href", &HREF_ATTR)?;

    let mut scan = CanonicalScan::default();
    for tag in canonical.find_iter(html) {
        scan.count += 1;
        if scan.first_href.is_none() {
            scan.first_href = href
                .captures(tag.as_str())
                .and_then(|caps| first_group(&caps))
                .map(unescape_attr);
        }
    }
    Ok(scan)
}

/// Removes every canonical tag.
pub fn strip_canonical_tags(html: &str) -> Result<String, PatternError> {
    let canonical = pattern("canonical", &CANONICAL_TAG)?;
    Ok(canonical.replace_all(html, "").into_owned())
}

/// Removes `rel="alternate"` tags whose hreflang (case-insensitive) is in
/// `hreflangs` (expected lowercased). Other link tags are kept verbatim.
pub fn strip_alternate_tags(html: &str, hreflangs: &HashSet<String>) -> Result<String, PatternError> {
    if hreflangs.is_empty() {
        return Ok(html.to_string());
    }
    let link = pattern("link", &LINK_TAG)?;
    let rel_alternate = pattern("rel-alternate", &REL_ALTERNATE)?;
    let hreflang_attr = pattern("hreflang", &HREFLANG_ATTR)?;

    let stripped = link.replace_all(html, |caps: &Captures<'_>| {
        let tag = &caps[0];
        let managed = rel_alternate.is_match(tag)
            && hreflang_attr
                .captures(tag)
                .and_then(|c| first_group(&c))
                .map_or(false, |lang| hreflangs.contains(&lang.to_ascii_lowercase()));
        if managed {
            String::new()
        } else {
            tag.to_string()
        }
    });
    Ok(stripped.into_owned())
}

pub fn canonical_tag(href: &str) -> String {
    format!("<link rel=\"canonical\" href=\"{}\" />\n", escape_attr(href))
}

pub fn alternate_tag(hreflang: &str, href: &str) -> String {
    format!(
        "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n",
        escape_attr(hreflang),
        escape_attr(href)
    )
}

/// Value of whichever quote-style group matched.
fn first_group<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}
