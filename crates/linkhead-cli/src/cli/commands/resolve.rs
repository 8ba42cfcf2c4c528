//! `linkhead resolve` – show the effective rules for a simulated request.

use anyhow::Result;
use linkhead_core::compose::{compose_alternate_href, compose_canonical_href};
use linkhead_core::config::LinkheadConfig;
use linkhead_core::resolver::{ResolvedRules, RuleSource};
use linkhead_core::{RequestContext, Resolver, RuleSnapshot};
use std::path::Path;

pub fn run_resolve(cfg: &LinkheadConfig, rules_path: &Path, ctx: &RequestContext) -> Result<()> {
    let snapshot = RuleSnapshot::load_or_empty(rules_path);
    let rules = Resolver::new(&snapshot)
        .with_dynamic_overrides(cfg.dynamic_overrides)
        .resolve(ctx);
    for line in describe(&rules, &ctx.current_path()) {
        println!("{line}");
    }
    Ok(())
}

fn describe(rules: &ResolvedRules, current_path: &str) -> Vec<String> {
    if rules.is_empty() {
        return vec!["No rules apply; head markup is left as rendered.".to_string()];
    }

    let mut lines = Vec::new();
    match &rules.canonical {
        Some(resolved) => {
            let source = match resolved.source {
                RuleSource::Entity(id) => format!("entity {id}"),
                RuleSource::Dynamic(kind) => format!("{} context", kind.as_key()),
                RuleSource::Global => "global".to_string(),
            };
            lines.push(format!(
                "{:<10} {:<12} {}",
                "canonical",
                source,
                compose_canonical_href(current_path, &resolved.rule)
            ));
        }
        None => lines.push(format!("{:<10} {:<12} -", "canonical", "host")),
    }
    for entry in &rules.alternates {
        lines.push(format!(
            "{:<10} {:<12} {}",
            "alternate",
            entry.hreflang,
            compose_alternate_href(current_path, entry)
        ));
    }
    lines
}
