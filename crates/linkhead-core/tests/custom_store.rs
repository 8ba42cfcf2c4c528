//! Integration test: hosts can back the resolver with their own storage by
//! implementing `RuleStore` directly.

use std::collections::HashMap;

use linkhead_core::resolver::RuleSource;
use linkhead_core::rules::{AlternateLinkEntry, CanonicalRule, DynamicContextKind, EntityId};
use linkhead_core::{HeadRewriter, RequestContext, Resolver, RuleStore};

#[derive(Default)]
struct MemoryStore {
    global: Option<CanonicalRule>,
    entities: HashMap<EntityId, CanonicalRule>,
}

impl RuleStore for MemoryStore {
    fn global_canonical_rule(&self) -> Option<CanonicalRule> {
        self.global.clone()
    }

    fn global_alternate_links(&self) -> Vec<AlternateLinkEntry> {
        Vec::new()
    }

    fn entity_canonical_rule(&self, id: EntityId) -> Option<CanonicalRule> {
        self.entities.get(&id).cloned()
    }

    fn entity_alternate_links(&self, _id: EntityId) -> Vec<AlternateLinkEntry> {
        Vec::new()
    }

    fn is_eligible_entity(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }
}

fn rule(base: &str, preserve: bool) -> CanonicalRule {
    CanonicalRule {
        base_url: base.parse().unwrap(),
        preserve_default_path: preserve,
    }
}

#[test]
fn trait_object_store_drives_rewriter() {
    let mut store = MemoryStore {
        global: Some(rule("example.com", true)),
        ..Default::default()
    };
    store.entities.insert(5, rule("landing.example.com/offer", false));
    let store: &dyn RuleStore = &store;

    let ctx = RequestContext::new("https://old.test")
        .with_request_uri("/offer/")
        .with_entity(5);
    let out = HeadRewriter::new(store).rewrite("<title>Offer</title>\n", &ctx);
    assert_eq!(
        out,
        "<link rel=\"canonical\" href=\"https://landing.example.com/offer/\" />\n<title>Offer</title>\n"
    );
}

#[test]
fn dynamic_overrides_default_to_absent() {
    let store = MemoryStore {
        global: Some(rule("example.com", true)),
        ..Default::default()
    };
    let ctx = RequestContext::new("https://old.test")
        .with_request_uri("/author/jo/")
        .with_dynamic(DynamicContextKind::Author);
    let rules = Resolver::new(&store).resolve(&ctx);
    assert_eq!(rules.canonical.unwrap().source, RuleSource::Global);
}
