//! URL modeling and normalization.
//!
//! Turns operator-supplied base URLs and domains into a validated
//! `scheme://host[:port]/path/` form that rule composition can rely on.

mod host;
mod path;

pub use host::validate_host;
pub use path::{normalize_url_path, path_from_url};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RuleError;

/// Scheme assumed when the input has none (`example.com` → `https://example.com/`).
const DEFAULT_SCHEME: &str = "https";

/// Absolute http(s) URL with a validated host and a normalized path.
///
/// The path always starts with `/` and ends with `/` unless it is exactly `/`.
/// Query and fragment are never kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NormalizedUrl {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
}

impl NormalizedUrl {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root_path(&self) -> bool {
        self.path == "/"
    }

    /// `scheme://host[:port]` without a trailing slash.
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.path)
    }
}

impl FromStr for NormalizedUrl {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)?.ok_or_else(|| RuleError::InvalidUrl {
            input: s.to_string(),
        })
    }
}

impl TryFrom<String> for NormalizedUrl {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NormalizedUrl> for String {
    fn from(value: NormalizedUrl) -> Self {
        value.to_string()
    }
}

/// Validates and normalizes a base URL or bare domain.
///
/// Empty (or whitespace-only) input is not an error: it means "nothing
/// configured" and yields `Ok(None)`.
///
/// # Examples
///
/// - `normalize("Example.COM/blog")` → `https://example.com/blog/`
/// - `normalize("http://localhost:8080")` → `http://localhost:8080/`
/// - `normalize("ftp://example.com")` → `Err(InvalidScheme)`
pub fn normalize(raw: &str) -> Result<Option<NormalizedUrl>, RuleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || RuleError::InvalidUrl {
        input: trimmed.to_string(),
    };

    let candidate = if has_scheme_prefix(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}://{trimmed}")
    };

    let (scheme, rest) = candidate.split_once("://").ok_or_else(invalid)?;
    let (raw_host, port_text) = split_authority(rest);
    if raw_host.is_empty() {
        return Err(invalid());
    }

    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(RuleError::InvalidScheme { scheme });
    }

    let host = raw_host.to_ascii_lowercase();
    validate_host(&host)?;

    // Host shape is settled; the url crate handles port bounds and path encoding.
    let parsed = Url::parse(&candidate).map_err(|_| invalid())?;
    // `Url::port` hides a scheme's default port; an explicit one is kept.
    let port = port_text
        .filter(|text| !text.is_empty())
        .and_then(|_| parsed.port_or_known_default())
        .filter(|p| *p != 0);
    let path = normalize_url_path(parsed.path());

    Ok(Some(NormalizedUrl {
        scheme,
        host,
        port,
        path,
    }))
}

/// True when `input` starts with `scheme://` (RFC 3986 scheme charset).
pub(crate) fn has_scheme_prefix(input: &str) -> bool {
    let Some(idx) = input.find("://") else {
        return false;
    };
    let scheme = &input[..idx];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Host and port text of `user:pass@host:port/...`, as written.
fn split_authority(rest: &str) -> (&str, Option<&str>) {
    let end = rest
        .find(|c| matches!(c, '/' | '?' | '#' | '\\'))
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host_port.starts_with('[') {
        return match host_port.find(']') {
            Some(close) => (
                &host_port[..=close],
                host_port[close + 1..].strip_prefix(':'),
            ),
            None => (host_port, None),
        };
    }
    match host_port.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    }
}
