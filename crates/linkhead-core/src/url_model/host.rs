//! Domain-shape validation for rule hosts.

use crate::error::RuleError;

/// Checks that `host` (already lowercased) looks like a deployable domain.
///
/// - Only `[a-z0-9.-]`, no `..`, no leading or trailing dot
/// - Either `localhost`, a `.loc` development domain, or a last label of at
///   least two characters
pub fn validate_host(host: &str) -> Result<(), RuleError> {
    let charset_ok = !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-');
    if !charset_ok || host.contains("..") || host.starts_with('.') || host.ends_with('.') {
        return Err(RuleError::InvalidHost {
            host: host.to_string(),
        });
    }

    if host == "localhost" || host.ends_with(".loc") {
        return Ok(());
    }

    let has_tld = host.contains('.')
        && host
            .rsplit('.')
            .next()
            .map_or(false, |tld| tld.len() >= 2);
    if !has_tld {
        return Err(RuleError::MissingTld {
            host: host.to_string(),
        });
    }

    Ok(())
}
