//! Rule store: the read interface the resolver consumes, and a JSON snapshot
//! implementation that backs it on disk.
//!
//! The resolver only depends on [`RuleStore`]; hosts with their own settings
//! storage implement the trait directly.

mod persist;
mod snapshot;

pub use snapshot::{EntityRecord, RuleSnapshot, ATTACHMENT_POST_TYPE};

use crate::rules::{AlternateLinkEntry, CanonicalRule, DynamicContextKind, EntityId};

/// Read-only access to configured rules.
///
/// Implementations must not fail: stored data that cannot be decoded is
/// reported as absent.
pub trait RuleStore {
    fn global_canonical_rule(&self) -> Option<CanonicalRule>;

    fn global_alternate_links(&self) -> Vec<AlternateLinkEntry>;

    fn entity_canonical_rule(&self, id: EntityId) -> Option<CanonicalRule>;

    fn entity_alternate_links(&self, id: EntityId) -> Vec<AlternateLinkEntry>;

    /// True for publicly queryable, non-attachment content.
    fn is_eligible_entity(&self, id: EntityId) -> bool;

    fn dynamic_canonical_rule(&self, _kind: DynamicContextKind) -> Option<CanonicalRule> {
        None
    }
}
