//! Path joining and href composition for canonical and alternate links.

use crate::rules::{AlternateLinkEntry, CanonicalRule};

/// Joins two absolute paths with exactly one `/` between them.
///
/// - `join_paths("/", "/x/")` → `/x/`
/// - `join_paths("/en/", "/post/")` → `/en/post/`
pub fn join_paths(base_path: &str, append_path: &str) -> String {
    let base = base_path.trim_matches('/');
    let append = format!("/{}", append_path.trim_start_matches('/'));
    if base.is_empty() {
        append
    } else {
        format!("/{base}{append}")
    }
}

/// Canonical href for the page at `current_path` under `rule`.
///
/// Without `preserve_default_path` the rule's base URL is used verbatim.
pub fn compose_canonical_href(current_path: &str, rule: &CanonicalRule) -> String {
    let base = &rule.base_url;
    if !rule.preserve_default_path {
        return base.to_string();
    }
    format!("{}{}", base.origin(), join_paths(base.path(), current_path))
}

/// Alternate href for the page at `current_path` under `entry`.
///
/// With `preserve_default_path`, the page path goes under the entry's base
/// path, through `path_prefix` when the base path is the root.
pub fn compose_alternate_href(current_path: &str, entry: &AlternateLinkEntry) -> String {
    let base = &entry.href_base_url;
    if !entry.preserve_default_path {
        return base.to_string();
    }

    let prefix = if base.is_root_path() && !entry.path_prefix.is_empty() {
        entry.path_prefix.as_str()
    } else {
        "/"
    };
    let path = join_paths(prefix, current_path);
    format!("{}{}", base.origin(), join_paths(base.path(), &path))
}
