//! URL path helpers.

use url::Url;

/// Base used to resolve relative hrefs found in host markup.
const RELATIVE_BASE: &str = "http://localhost/";

/// Normalizes a URL path to start with `/` and, unless it is the root, end with `/`.
///
/// Backslashes are treated as path separators.
pub fn normalize_url_path(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let mut out = format!("/{}", replaced.trim_start_matches('/'));
    if out != "/" && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Extracts the path of an absolute or root-relative URL.
///
/// Query and fragment are dropped. Returns `/` when the href has no path or
/// cannot be parsed at all.
pub fn path_from_url(href: &str) -> String {
    let parsed = Url::parse(href).or_else(|_| Url::parse(RELATIVE_BASE)?.join(href));
    let path = match parsed {
        Ok(url) => url.path().to_string(),
        Err(_) => return "/".to_string(),
    };
    if path.is_empty() {
        "/".to_string()
    } else if !path.starts_with('/') {
        format!("/{}", path.trim_start_matches('/'))
    } else {
        path
    }
}
