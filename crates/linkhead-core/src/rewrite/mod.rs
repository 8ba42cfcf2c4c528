//! Head rewriter: captures the markup the host emits inside `<head>`, then
//! replaces canonical and alternate link tags according to the resolved rules.
//!
//! One rewriter per request. The host drives it:
//!
//! 1. `on_head_render_start` when head rendering begins (Idle → Capturing)
//! 2. `capture` for every chunk of head output
//! 3. `on_head_render_end` when head rendering finishes; the returned markup
//!    is what goes to the response (Capturing → Idle)
//!
//! Pattern failures never leak half-edited markup: the step that failed is
//! skipped and the markup from before that step is used.

mod escape;
mod tags;

pub use escape::{escape_attr, unescape_attr};
pub use tags::{
    alternate_tag, canonical_tag, scan_canonical_tags, strip_alternate_tags,
    strip_canonical_tags, CanonicalScan, PatternError,
};

use std::collections::HashSet;

use crate::compose::{compose_alternate_href, compose_canonical_href};
use crate::context::{should_intercept, RequestContext};
use crate::resolver::{ResolvedRules, Resolver};
use crate::store::RuleStore;
use crate::url_model::path_from_url;

/// Capture state of a rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriterState {
    Idle,
    Capturing,
}

/// Head output buffered between start and end of a capture. Dropping it
/// while it still holds markup discards that markup and logs a warning.
#[derive(Debug, Default)]
struct CaptureBuffer(Option<String>);

impl CaptureBuffer {
    fn is_active(&self) -> bool {
        self.0.is_some()
    }

    fn begin(&mut self) {
        self.0 = Some(String::new());
    }

    fn push(&mut self, chunk: &str) -> bool {
        match self.0.as_mut() {
            Some(buffer) => {
                buffer.push_str(chunk);
                true
            }
            None => false,
        }
    }

    fn take(&mut self) -> Option<String> {
        self.0.take()
    }
}

impl Drop for CaptureBuffer {
    fn drop(&mut self) {
        if let Some(buffer) = self.0.take() {
            tracing::warn!(bytes = buffer.len(), "head capture dropped before end; output discarded");
        }
    }
}

/// Per-request head rewriter over a rule store.
pub struct HeadRewriter<'a, S: RuleStore + ?Sized> {
    resolver: Resolver<'a, S>,
    buffer: CaptureBuffer,
}

impl<'a, S: RuleStore + ?Sized> HeadRewriter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            resolver: Resolver::new(store),
            buffer: CaptureBuffer::default(),
        }
    }

    pub fn with_dynamic_overrides(mut self, enabled: bool) -> Self {
        self.resolver.set_dynamic_overrides(enabled);
        self
    }

    pub fn state(&self) -> RewriterState {
        if self.buffer.is_active() {
            RewriterState::Capturing
        } else {
            RewriterState::Idle
        }
    }

    /// Starts capturing if the request qualifies and no capture is running.
    /// Returns whether the rewriter is now capturing because of this call.
    pub fn on_head_render_start(&mut self, ctx: &RequestContext) -> bool {
        if self.buffer.is_active() {
            tracing::debug!("head capture already running; ignoring nested start");
            return false;
        }
        if !should_intercept(ctx) {
            return false;
        }
        self.buffer.begin();
        true
    }

    /// Buffers a chunk of head output. Returns `false` when not capturing,
    /// in which case the caller writes the chunk straight to the response.
    pub fn capture(&mut self, chunk: &str) -> bool {
        self.buffer.push(chunk)
    }

    /// Ends the capture and returns the markup to emit, or `None` if nothing
    /// was captured. The rewriter is Idle afterwards.
    pub fn on_head_render_end(&mut self, ctx: &RequestContext) -> Option<String> {
        let head_html = self.buffer.take()?;
        Some(self.rewrite(&head_html, ctx))
    }

    /// Ends the capture without rewriting; returns the buffered markup as-is.
    pub fn abort(&mut self) -> Option<String> {
        self.buffer.take()
    }

    /// Resolves rules for `ctx` and rewrites `head_html` with them.
    pub fn rewrite(&self, head_html: &str, ctx: &RequestContext) -> String {
        let rules = self.resolver.resolve(ctx);
        rewrite_head(head_html, ctx, &rules)
    }
}

/// Markup edits a rewrite is built from.
trait TagEditor {
    fn scan_canonical(&self, html: &str) -> Result<CanonicalScan, PatternError>;
    fn strip_canonical(&self, html: &str) -> Result<String, PatternError>;
    fn strip_alternates(&self, html: &str, hreflangs: &HashSet<String>) -> Result<String, PatternError>;
}

/// Edits backed by the static tag patterns.
struct PatternTags;

impl TagEditor for PatternTags {
    fn scan_canonical(&self, html: &str) -> Result<CanonicalScan, PatternError> {
        scan_canonical_tags(html)
    }

    fn strip_canonical(&self, html: &str) -> Result<String, PatternError> {
        strip_canonical_tags(html)
    }

    fn strip_alternates(&self, html: &str, hreflangs: &HashSet<String>) -> Result<String, PatternError> {
        strip_alternate_tags(html, hreflangs)
    }
}

/// Applies resolved rules to captured head markup.
///
/// With no canonical override and no alternates the markup is returned
/// byte-identical. Output order: new canonical tag, new alternate tags, then
/// the remaining captured markup.
pub fn rewrite_head(head_html: &str, ctx: &RequestContext, rules: &ResolvedRules) -> String {
    rewrite_head_with(&PatternTags, head_html, ctx, rules)
}

fn rewrite_head_with(
    editor: &impl TagEditor,
    head_html: &str,
    ctx: &RequestContext,
    rules: &ResolvedRules,
) -> String {
    if rules.is_empty() {
        return head_html.to_string();
    }

    let scan = match editor.scan_canonical(head_html) {
        Ok(scan) => scan,
        Err(e) => {
            tracing::warn!("leaving head untouched: {}", e);
            return head_html.to_string();
        }
    };

    let mut html = head_html.to_string();
    if rules.canonical.is_some() && scan.count > 0 {
        match editor.strip_canonical(&html) {
            Ok(stripped) => html = stripped,
            Err(e) => {
                tracing::warn!("leaving head untouched: {}", e);
                return head_html.to_string();
            }
        }
    }

    let source_href = scan
        .first_href
        .unwrap_or_else(|| ctx.fallback_canonical_href());
    let current_path = path_from_url(&source_href);

    let canonical = rules
        .canonical
        .as_ref()
        .map(|resolved| canonical_tag(&compose_canonical_href(&current_path, &resolved.rule)))
        .unwrap_or_default();

    let mut alternates = String::new();
    for entry in &rules.alternates {
        if entry.hreflang.is_empty() {
            continue;
        }
        let href = compose_alternate_href(&current_path, entry);
        if href.is_empty() {
            continue;
        }
        alternates.push_str(&alternate_tag(&entry.hreflang, &href));
    }

    if !alternates.is_empty() {
        let managed: HashSet<String> = rules
            .alternates
            .iter()
            .map(|entry| entry.hreflang.to_ascii_lowercase())
            .filter(|hreflang| !hreflang.is_empty())
            .collect();
        match editor.strip_alternates(&html, &managed) {
            Ok(stripped) => html = stripped,
            Err(e) => tracing::warn!("keeping existing alternate tags: {}", e),
        }
    }

    tracing::debug!(
        canonical_found = scan.count,
        path = %current_path,
        "rewrote head link tags"
    );

    format!("{canonical}{alternates}{html}")
}
