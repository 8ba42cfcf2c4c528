//! Validation errors raised when rules are written.
//!
//! The read path never surfaces these: a stored rule that fails validation is
//! treated as absent by the resolver.

use thiserror::Error;

/// Reason a canonical rule or alternate link was rejected at write time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Input could not be parsed into scheme + host.
    #[error("invalid URL {input:?}: must be an absolute URL (scheme + host)")]
    InvalidUrl { input: String },

    /// Scheme is neither http nor https.
    #[error("invalid scheme {scheme:?}: URL must use http or https")]
    InvalidScheme { scheme: String },

    /// Host contains forbidden characters or malformed dots.
    #[error("invalid host {host:?}")]
    InvalidHost { host: String },

    /// Host is not localhost, not `.loc`, and has no usable top-level label.
    #[error("host {host:?} must include a valid domain, .loc, or localhost")]
    MissingTld { host: String },

    #[error("invalid hreflang {hreflang:?}")]
    InvalidHreflang { hreflang: String },

    #[error("hreflang {hreflang:?} appears more than once")]
    DuplicateHreflang { hreflang: String },

    #[error("invalid path prefix {prefix:?}: {reason}")]
    InvalidPathPrefix { prefix: String, reason: &'static str },
}
