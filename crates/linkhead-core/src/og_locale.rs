//! Open Graph locale (`og:locale`) normalization for the current language.

use crate::context::{should_intercept, RequestContext};

/// Normalizes a locale to Open Graph form: `en-us` → `en_US`, `ru` → `ru`.
/// Segments past the region are dropped. Empty input yields `None`.
pub fn normalize_og_locale(locale: &str) -> Option<String> {
    let normalized = locale.replace('-', "_");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    let mut segments = normalized.split('_');
    let language = segments.next()?.to_lowercase();
    if language.is_empty() {
        return None;
    }

    match segments.next().map(str::to_uppercase) {
        Some(region) if !region.is_empty() => Some(format!("{language}_{region}")),
        _ => Some(language),
    }
}

/// Locale to publish for this request, if any. Excluded requests (admin,
/// feeds, REST, ...) keep whatever the host would emit.
pub fn og_locale_for_request(ctx: &RequestContext, locale: Option<&str>) -> Option<String> {
    if !should_intercept(ctx) {
        return None;
    }
    normalize_og_locale(locale?)
}
