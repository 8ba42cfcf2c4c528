//! Strict validation (write boundary) and lenient decoding (read path).

use std::collections::HashSet;

use serde_json::Value;

use crate::error::RuleError;
use crate::url_model::{self, NormalizedUrl};

use super::wire::{StoredAlternateLink, StoredCanonicalRule};
use super::{AlternateLinkEntry, CanonicalRule, X_DEFAULT};

/// Lowercases and checks an hreflang value: `x-default` or `ll[-subtag…]`
/// where the language is 2-3 letters and each subtag 2-8 alphanumerics.
pub fn validate_hreflang(input: &str) -> Result<String, RuleError> {
    let hreflang = input.trim().to_ascii_lowercase();
    let invalid = || RuleError::InvalidHreflang {
        hreflang: input.trim().to_string(),
    };

    if hreflang.is_empty() {
        return Err(invalid());
    }
    if hreflang == X_DEFAULT {
        return Ok(hreflang);
    }

    let mut parts = hreflang.split('-');
    let language_ok = parts
        .next()
        .map_or(false, |lang| (2..=3).contains(&lang.len()) && lang.bytes().all(|b| b.is_ascii_lowercase()));
    let subtags_ok =
        parts.all(|tag| (2..=8).contains(&tag.len()) && tag.bytes().all(|b| b.is_ascii_alphanumeric()));

    if language_ok && subtags_ok {
        Ok(hreflang)
    } else {
        Err(invalid())
    }
}

/// Validates a stored canonical rule. An empty base URL means "no rule".
pub fn validate_canonical_rule(
    stored: &StoredCanonicalRule,
) -> Result<Option<CanonicalRule>, RuleError> {
    Ok(url_model::normalize(&stored.base_url)?.map(|base_url| CanonicalRule {
        base_url,
        preserve_default_path: stored.preserve_default_path,
    }))
}

/// Validates one alternate link. The base URL is required.
pub fn validate_alternate_link(stored: &StoredAlternateLink) -> Result<AlternateLinkEntry, RuleError> {
    let hreflang = validate_hreflang(&stored.hreflang)?;
    let href_base_url =
        url_model::normalize(&stored.href_base_url)?.ok_or_else(|| RuleError::InvalidUrl {
            input: stored.href_base_url.clone(),
        })?;
    let path_prefix = normalize_path_prefix(
        &stored.path_prefix,
        stored.preserve_default_path,
        &href_base_url,
    )?;

    Ok(AlternateLinkEntry {
        hreflang,
        href_base_url,
        preserve_default_path: stored.preserve_default_path,
        path_prefix,
    })
}

/// Validates a whole alternate-link list; hreflang values must be unique.
pub fn validate_alternate_links(
    items: &[StoredAlternateLink],
) -> Result<Vec<AlternateLinkEntry>, RuleError> {
    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(items.len());
    for item in items {
        let entry = validate_alternate_link(item)?;
        if !seen.insert(entry.hreflang.clone()) {
            return Err(RuleError::DuplicateHreflang {
                hreflang: entry.hreflang,
            });
        }
        validated.push(entry);
    }
    Ok(validated)
}

/// Read-path variant of [`validate_alternate_links`]: items of the wrong
/// shape, invalid items and later duplicates are skipped.
pub fn sanitize_alternate_links(items: &[Value]) -> Vec<AlternateLinkEntry> {
    let mut seen = HashSet::new();
    let mut sanitized = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let stored = match serde_json::from_value::<StoredAlternateLink>(item.clone()) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::debug!(index, "skipping malformed alternate link: {}", e);
                continue;
            }
        };
        let entry = match validate_alternate_link(&stored) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(index, "skipping invalid alternate link: {}", e);
                continue;
            }
        };
        if seen.insert(entry.hreflang.clone()) {
            sanitized.push(entry);
        }
    }
    sanitized
}

/// Read-path decoding of a stored canonical rule.
///
/// Accepts the object form, an object encoded as a JSON string, or a bare
/// base URL string. Null, empty strings and anything invalid decode to `None`.
pub fn decode_canonical_rule(value: &Value) -> Option<CanonicalRule> {
    let stored = match value {
        Value::Null => return None,
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => match serde_json::from_str::<StoredCanonicalRule>(s) {
            Ok(stored) => stored,
            Err(_) => StoredCanonicalRule {
                base_url: s.clone(),
                preserve_default_path: true,
            },
        },
        other => match serde_json::from_value::<StoredCanonicalRule>(other.clone()) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::debug!("skipping malformed canonical rule: {}", e);
                return None;
            }
        },
    };

    match validate_canonical_rule(&stored) {
        Ok(rule) => rule,
        Err(e) => {
            tracing::debug!("skipping invalid canonical rule: {}", e);
            None
        }
    }
}

/// A prefix only applies when the page path is preserved under a root base
/// URL; otherwise it is dropped. Kept prefixes are normalized to `/seg/`.
fn normalize_path_prefix(
    prefix: &str,
    preserve_default_path: bool,
    base: &NormalizedUrl,
) -> Result<String, RuleError> {
    let prefix = prefix.trim();
    if !preserve_default_path || !base.is_root_path() || prefix.is_empty() {
        return Ok(String::new());
    }

    let invalid = |reason| RuleError::InvalidPathPrefix {
        prefix: prefix.to_string(),
        reason,
    };

    if url_model::has_scheme_prefix(prefix) {
        return Err(invalid("must not include a scheme or host"));
    }
    let prefix = prefix.replace('\\', "/");
    if !prefix.starts_with('/') || prefix.contains('?') || prefix.contains('#') {
        return Err(invalid("must start with \"/\" and contain no query or fragment"));
    }

    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("/{trimmed}/"))
    }
}
