//! Rule resolution: which canonical override and which alternate links apply
//! to the current request.
//!
//! Priority for the canonical: entity override, then dynamic-context
//! override, then the global rule. Alternates are the global list with
//! per-entity entries replacing same-hreflang entries.

use crate::context::RequestContext;
use crate::rules::{AlternateLinkEntry, CanonicalRule, DynamicContextKind, EntityId};
use crate::store::RuleStore;

/// Where the winning canonical rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    Entity(EntityId),
    Dynamic(DynamicContextKind),
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCanonical {
    pub source: RuleSource,
    pub rule: CanonicalRule,
}

/// Effective rule set for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRules {
    pub canonical: Option<ResolvedCanonical>,
    pub alternates: Vec<AlternateLinkEntry>,
}

impl ResolvedRules {
    /// Nothing to rewrite: host markup passes through untouched.
    pub fn is_empty(&self) -> bool {
        self.canonical.is_none() && self.alternates.is_empty()
    }
}

/// Resolves rules from a store snapshot. Holds no state between requests.
pub struct Resolver<'a, S: RuleStore + ?Sized> {
    store: &'a S,
    dynamic_overrides: bool,
}

impl<'a, S: RuleStore + ?Sized> Resolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            dynamic_overrides: true,
        }
    }

    /// Enables or disables per-dynamic-context canonical overrides.
    pub fn with_dynamic_overrides(mut self, enabled: bool) -> Self {
        self.set_dynamic_overrides(enabled);
        self
    }

    pub fn set_dynamic_overrides(&mut self, enabled: bool) {
        self.dynamic_overrides = enabled;
    }

    pub fn resolve(&self, ctx: &RequestContext) -> ResolvedRules {
        let entity = ctx
            .entity()
            .filter(|id| self.store.is_eligible_entity(*id));

        let canonical = self.resolve_canonical(ctx, entity);
        let entity_links = entity
            .map(|id| self.store.entity_alternate_links(id))
            .unwrap_or_default();
        let alternates = merge_alternate_links(self.store.global_alternate_links(), entity_links);

        tracing::debug!(
            source = ?canonical.as_ref().map(|c| c.source),
            alternates = alternates.len(),
            "resolved link rules"
        );

        ResolvedRules {
            canonical,
            alternates,
        }
    }

    fn resolve_canonical(
        &self,
        ctx: &RequestContext,
        entity: Option<EntityId>,
    ) -> Option<ResolvedCanonical> {
        if let Some(id) = entity {
            if let Some(rule) = self.store.entity_canonical_rule(id) {
                return Some(ResolvedCanonical {
                    source: RuleSource::Entity(id),
                    rule,
                });
            }
        }

        if self.dynamic_overrides {
            if let Some(kind) = ctx.dynamic() {
                if let Some(rule) = self.store.dynamic_canonical_rule(kind) {
                    return Some(ResolvedCanonical {
                        source: RuleSource::Dynamic(kind),
                        rule,
                    });
                }
            }
        }

        // The global rule only swaps scheme and host; the page path is always kept.
        self.store
            .global_canonical_rule()
            .map(|rule| ResolvedCanonical {
                source: RuleSource::Global,
                rule: CanonicalRule {
                    preserve_default_path: true,
                    ..rule
                },
            })
    }
}

/// Union by hreflang (case-insensitive). Entity entries replace global ones
/// in place; new hreflangs are appended in entity order.
pub fn merge_alternate_links(
    global: Vec<AlternateLinkEntry>,
    entity: Vec<AlternateLinkEntry>,
) -> Vec<AlternateLinkEntry> {
    let mut merged: Vec<AlternateLinkEntry> = Vec::with_capacity(global.len() + entity.len());
    for item in global.into_iter().chain(entity) {
        let hreflang = item.hreflang.to_ascii_lowercase();
        if hreflang.is_empty() {
            continue;
        }
        let item = AlternateLinkEntry { hreflang, ..item };
        match merged.iter_mut().find(|m| m.hreflang == item.hreflang) {
            Some(existing) => *existing = item,
            None => merged.push(item),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{StoredAlternateLink, StoredCanonicalRule};
    use crate::store::RuleSnapshot;

    fn canonical(base: &str, preserve: bool) -> StoredCanonicalRule {
        StoredCanonicalRule {
            base_url: base.to_string(),
            preserve_default_path: preserve,
        }
    }

    fn link(hreflang: &str, base: &str) -> StoredAlternateLink {
        StoredAlternateLink {
            hreflang: hreflang.to_string(),
            href_base_url: base.to_string(),
            preserve_default_path: true,
            path_prefix: String::new(),
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new("https://old.test").with_request_uri("/post/")
    }

    #[test]
    fn nothing_configured_resolves_empty() {
        let snapshot = RuleSnapshot::new();
        let rules = Resolver::new(&snapshot).resolve(&ctx().with_entity(1));
        assert!(rules.is_empty());
    }

    #[test]
    fn entity_override_beats_global() {
        let mut snapshot = RuleSnapshot::new();
        snapshot
            .set_global_canonical(Some(&canonical("example.com", true)))
            .unwrap();
        snapshot.register_entity(9, "post", true);
        snapshot
            .set_entity_canonical(9, Some(&canonical("es.example.com/noticias", false)))
            .unwrap();

        let rules = Resolver::new(&snapshot).resolve(&ctx().with_entity(9));
        let resolved = rules.canonical.unwrap();
        assert_eq!(resolved.source, RuleSource::Entity(9));
        assert_eq!(resolved.rule.base_url.host(), "es.example.com");

        let rules = Resolver::new(&snapshot).resolve(&ctx().with_entity(10));
        assert_eq!(rules.canonical.unwrap().source, RuleSource::Global);
    }

    #[test]
    fn ineligible_entity_falls_back_to_global() {
        let mut snapshot = RuleSnapshot::new();
        snapshot
            .set_global_canonical(Some(&canonical("example.com", true)))
            .unwrap();
        snapshot.register_entity(3, "attachment", true);
        snapshot
            .set_entity_canonical(3, Some(&canonical("media.example.com", false)))
            .unwrap();
        snapshot
            .set_entity_alternates(3, &[link("de", "example.de")])
            .unwrap();

        let rules = Resolver::new(&snapshot).resolve(&ctx().with_entity(3));
        assert_eq!(rules.canonical.unwrap().source, RuleSource::Global);
        assert!(rules.alternates.is_empty());
    }

    #[test]
    fn dynamic_override_between_entity_and_global() {
        let mut snapshot = RuleSnapshot::new();
        snapshot
            .set_global_canonical(Some(&canonical("example.com", true)))
            .unwrap();
        snapshot
            .set_dynamic_canonical(DynamicContextKind::Search, Some(&canonical("example.com/search", false)))
            .unwrap();

        let search = ctx().with_dynamic(DynamicContextKind::Search);
        let rules = Resolver::new(&snapshot).resolve(&search);
        assert_eq!(
            rules.canonical.unwrap().source,
            RuleSource::Dynamic(DynamicContextKind::Search)
        );

        let rules = Resolver::new(&snapshot)
            .with_dynamic_overrides(false)
            .resolve(&search);
        assert_eq!(rules.canonical.unwrap().source, RuleSource::Global);

        let author = ctx().with_dynamic(DynamicContextKind::Author);
        let rules = Resolver::new(&snapshot).resolve(&author);
        assert_eq!(rules.canonical.unwrap().source, RuleSource::Global);
    }

    #[test]
    fn entity_alternates_override_global_by_hreflang() {
        let mut snapshot = RuleSnapshot::new();
        snapshot
            .set_global_alternates(&[link("en", "example.com"), link("fr", "example.fr")])
            .unwrap();
        snapshot.register_entity(4, "page", true);
        snapshot
            .set_entity_alternates(4, &[link("fr", "fr.example.org"), link("de", "example.de")])
            .unwrap();

        let rules = Resolver::new(&snapshot).resolve(&ctx().with_entity(4));
        let tags: Vec<(&str, &str)> = rules
            .alternates
            .iter()
            .map(|a| (a.hreflang.as_str(), a.href_base_url.host()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("en", "example.com"),
                ("fr", "fr.example.org"),
                ("de", "example.de"),
            ]
        );
        assert!(rules.canonical.is_none());
    }

    #[test]
    fn global_rule_keeps_page_path_even_if_stored_otherwise() {
        let snapshot: RuleSnapshot = serde_json::from_value(serde_json::json!({
            "canonical": { "baseUrl": "https://example.com/", "preserveDefaultPath": false }
        }))
        .unwrap();
        let resolved = Resolver::new(&snapshot).resolve(&ctx()).canonical.unwrap();
        assert_eq!(resolved.source, RuleSource::Global);
        assert!(resolved.rule.preserve_default_path);
    }

    #[test]
    fn merge_is_case_insensitive() {
        let global = vec![AlternateLinkEntry {
            hreflang: "EN-gb".to_string(),
            href_base_url: "example.co.uk".parse().unwrap(),
            preserve_default_path: true,
            path_prefix: String::new(),
        }];
        let entity = vec![AlternateLinkEntry {
            hreflang: "en-GB".to_string(),
            href_base_url: "uk.example.com".parse().unwrap(),
            preserve_default_path: false,
            path_prefix: String::new(),
        }];
        let merged = merge_alternate_links(global, entity);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].hreflang, "en-gb");
        assert_eq!(merged[0].href_base_url.host(), "uk.example.com");
    }
}
