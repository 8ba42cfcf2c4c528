//! Per-request context handed over by the host rendering pipeline.

use crate::rules::{DynamicContextKind, EntityId};

/// Kinds of requests that must render untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFlags {
    pub admin: bool,
    pub feed: bool,
    pub embed: bool,
    pub ajax: bool,
    pub cron: bool,
    pub rest: bool,
    /// Client accepts or sends JSON.
    pub json: bool,
}

impl RequestFlags {
    /// True when none of the excluded request kinds apply.
    pub fn is_frontend_page(&self) -> bool {
        !(self.admin
            || self.feed
            || self.embed
            || self.ajax
            || self.cron
            || self.rest
            || self.json)
    }
}

/// What the engine knows about the request being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    home_url: String,
    routed_path: Option<String>,
    request_uri: Option<String>,
    entity: Option<EntityId>,
    dynamic: Option<DynamicContextKind>,
    flags: RequestFlags,
}

impl RequestContext {
    /// `home_url` is the site's public home (e.g. `https://old.test` or
    /// `https://old.test/blog`); fallback canonicals are built under it.
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            home_url: home_url.into(),
            routed_path: None,
            request_uri: None,
            entity: None,
            dynamic: None,
            flags: RequestFlags::default(),
        }
    }

    /// Path resolved by the host router, without query (e.g. `blog/post-1`).
    pub fn with_routed_path(mut self, path: impl Into<String>) -> Self {
        self.routed_path = Some(path.into());
        self
    }

    /// Raw request URI, possibly with query and fragment.
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    pub fn with_entity(mut self, id: EntityId) -> Self {
        self.entity = Some(id);
        self
    }

    pub fn with_dynamic(mut self, kind: DynamicContextKind) -> Self {
        self.dynamic = Some(kind);
        self
    }

    pub fn with_flags(mut self, flags: RequestFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub fn dynamic(&self) -> Option<DynamicContextKind> {
        self.dynamic
    }

    pub fn flags(&self) -> RequestFlags {
        self.flags
    }

    /// Current request path, `/`-rooted, without query or fragment.
    ///
    /// Prefers the routed path; falls back to the raw request URI, then `/`.
    pub fn current_path(&self) -> String {
        if let Some(routed) = &self.routed_path {
            return format!("/{}", sanitize_path(routed).trim_start_matches('/'));
        }

        let uri = self.request_uri.as_deref().unwrap_or("/");
        let without_query = uri.split(['?', '#']).next().unwrap_or_default();
        let path = sanitize_path(without_query);
        if path.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", path.trim_start_matches('/'))
        }
    }

    /// Href used as the path source when the host emitted no canonical tag.
    pub fn fallback_canonical_href(&self) -> String {
        format!("{}{}", self.home_url.trim_end_matches('/'), self.current_path())
    }
}

/// Gate for head interception: admin screens, feeds, embeds, AJAX, cron,
/// REST and JSON requests render untouched.
pub fn should_intercept(ctx: &RequestContext) -> bool {
    ctx.flags.is_frontend_page()
}

/// Drops whitespace and control characters a path must never carry.
fn sanitize_path(path: &str) -> String {
    path.trim()
        .chars()
        .filter(|c| !c.is_control() && !c.is_whitespace() && !matches!(c, '<' | '>' | '"'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routed_path_wins() {
        let ctx = RequestContext::new("https://old.test")
            .with_routed_path("blog/post-1")
            .with_request_uri("/ignored/?x=1");
        assert_eq!(ctx.current_path(), "/blog/post-1");
        assert_eq!(ctx.fallback_canonical_href(), "https://old.test/blog/post-1");
    }

    #[test]
    fn request_uri_loses_query_and_fragment() {
        let ctx = RequestContext::new("https://old.test/")
            .with_request_uri("/blog/post-1/?utm=x#top");
        assert_eq!(ctx.current_path(), "/blog/post-1/");
        assert_eq!(
            ctx.fallback_canonical_href(),
            "https://old.test/blog/post-1/"
        );
    }

    #[test]
    fn missing_path_is_root() {
        let ctx = RequestContext::new("https://old.test");
        assert_eq!(ctx.current_path(), "/");
        let ctx = ctx.with_request_uri("?s=term");
        assert_eq!(ctx.current_path(), "/");
        let ctx = RequestContext::new("https://old.test").with_routed_path("");
        assert_eq!(ctx.current_path(), "/");
    }

    #[test]
    fn unsafe_characters_are_stripped() {
        let ctx = RequestContext::new("https://old.test")
            .with_request_uri("/a b/<script>\n");
        assert_eq!(ctx.current_path(), "/ab/script");
    }

    #[test]
    fn home_with_subdirectory() {
        let ctx = RequestContext::new("https://old.test/site")
            .with_request_uri("/about/");
        assert_eq!(ctx.fallback_canonical_href(), "https://old.test/site/about/");
    }

    #[test]
    fn intercept_gate() {
        let ctx = RequestContext::new("https://old.test");
        assert!(should_intercept(&ctx));

        let excluded = [
            RequestFlags { admin: true, ..Default::default() },
            RequestFlags { feed: true, ..Default::default() },
            RequestFlags { embed: true, ..Default::default() },
            RequestFlags { ajax: true, ..Default::default() },
            RequestFlags { cron: true, ..Default::default() },
            RequestFlags { rest: true, ..Default::default() },
            RequestFlags { json: true, ..Default::default() },
        ];
        for flags in excluded {
            let ctx = RequestContext::new("https://old.test").with_flags(flags);
            assert!(!should_intercept(&ctx), "{flags:?}");
        }
    }
}
