//! Canonical and hreflang alternate link management for server-rendered
//! pages: rule storage, per-request resolution and `<head>` rewriting.

pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod og_locale;
pub mod resolver;
pub mod rewrite;
pub mod rules;
pub mod store;
pub mod url_model;

pub use context::{should_intercept, RequestContext, RequestFlags};
pub use error::RuleError;
pub use resolver::{ResolvedRules, Resolver};
pub use rewrite::{rewrite_head, HeadRewriter};
pub use store::{RuleSnapshot, RuleStore};
