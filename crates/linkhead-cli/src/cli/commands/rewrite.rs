//! `linkhead rewrite <file>` – run captured head markup through the rewriter.

use anyhow::{Context, Result};
use linkhead_core::config::LinkheadConfig;
use linkhead_core::{HeadRewriter, RequestContext, RuleSnapshot};
use std::io::Read;
use std::path::Path;

pub fn run_rewrite(
    cfg: &LinkheadConfig,
    rules_path: &Path,
    input: &Path,
    ctx: &RequestContext,
) -> Result<()> {
    let head_html = read_input(input)?;
    let snapshot = RuleSnapshot::load_or_empty(rules_path);
    print!("{}", rewrite_head_html(cfg, &snapshot, &head_html, ctx));
    Ok(())
}

/// Drives the rewriter the way a host would: start, capture per line, end.
fn rewrite_head_html(
    cfg: &LinkheadConfig,
    snapshot: &RuleSnapshot,
    head_html: &str,
    ctx: &RequestContext,
) -> String {
    let mut rewriter = HeadRewriter::new(snapshot).with_dynamic_overrides(cfg.dynamic_overrides);
    if !rewriter.on_head_render_start(ctx) {
        return head_html.to_string();
    }
    for chunk in head_html.split_inclusive('\n') {
        rewriter.capture(chunk);
    }
    rewriter.on_head_render_end(ctx).unwrap_or_default()
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read head markup from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("read head markup: {}", input.display()))
}
