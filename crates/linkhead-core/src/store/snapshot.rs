//! JSON rule snapshot: raw stored values plus validated setters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RuleError;
use crate::rules::{
    self, AlternateLinkEntry, CanonicalRule, DynamicContextKind, EntityId, StoredAlternateLink,
    StoredCanonicalRule,
};

use super::RuleStore;

/// Post type that never gets per-entity rules.
pub const ATTACHMENT_POST_TYPE: &str = "attachment";

/// Per-entity metadata and overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default = "default_true")]
    pub publicly_queryable: bool,
    #[serde(default)]
    pub canonical: Value,
    #[serde(default)]
    pub alternates: Value,
}

impl EntityRecord {
    pub fn new(post_type: impl Into<String>, publicly_queryable: bool) -> Self {
        Self {
            post_type: post_type.into(),
            publicly_queryable,
            canonical: Value::Null,
            alternates: Value::Array(Vec::new()),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.publicly_queryable && self.post_type != ATTACHMENT_POST_TYPE
    }
}

impl Default for EntityRecord {
    fn default() -> Self {
        Self::new(default_post_type(), true)
    }
}

fn default_post_type() -> String {
    "post".to_string()
}

fn default_true() -> bool {
    true
}

/// Every configured rule, as persisted in `rules.json`.
///
/// Values are kept raw so one malformed entry only hides itself: reads decode
/// per entry and skip what does not validate. Setters validate strictly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    #[serde(default)]
    canonical: Value,
    #[serde(default)]
    alternates: Value,
    #[serde(default)]
    entities: BTreeMap<String, Value>,
    #[serde(default)]
    dynamic: BTreeMap<String, Value>,
}

impl RuleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded entity record, or `None` if missing or malformed.
    pub fn entity(&self, id: EntityId) -> Option<EntityRecord> {
        let raw = self.entities.get(&id.to_string())?;
        match serde_json::from_value::<EntityRecord>(raw.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(entity = id, "skipping malformed entity record: {}", e);
                None
            }
        }
    }

    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities
            .keys()
            .filter_map(|key| key.parse().ok())
            .collect()
    }

    /// Sets the global canonical rule; `None` or an empty base URL clears it.
    /// The global rule always keeps the page path, whatever `stored` says.
    pub fn set_global_canonical(
        &mut self,
        stored: Option<&StoredCanonicalRule>,
    ) -> Result<Option<CanonicalRule>, RuleError> {
        let rule = validate_optional(stored)?.map(|rule| CanonicalRule {
            preserve_default_path: true,
            ..rule
        });
        self.canonical = canonical_value(rule.as_ref());
        Ok(rule)
    }

    pub fn set_global_alternates(
        &mut self,
        items: &[StoredAlternateLink],
    ) -> Result<Vec<AlternateLinkEntry>, RuleError> {
        let entries = rules::validate_alternate_links(items)?;
        self.alternates = alternates_value(&entries);
        Ok(entries)
    }

    /// Registers (or updates the type of) an entity, keeping its overrides.
    pub fn register_entity(
        &mut self,
        id: EntityId,
        post_type: impl Into<String>,
        publicly_queryable: bool,
    ) {
        let mut record = self.entity(id).unwrap_or_default();
        record.post_type = post_type.into();
        record.publicly_queryable = publicly_queryable;
        self.put_entity(id, &record);
    }

    pub fn set_entity_canonical(
        &mut self,
        id: EntityId,
        stored: Option<&StoredCanonicalRule>,
    ) -> Result<Option<CanonicalRule>, RuleError> {
        let rule = validate_optional(stored)?;
        let mut record = self.entity(id).unwrap_or_default();
        record.canonical = canonical_value(rule.as_ref());
        self.put_entity(id, &record);
        Ok(rule)
    }

    pub fn set_entity_alternates(
        &mut self,
        id: EntityId,
        items: &[StoredAlternateLink],
    ) -> Result<Vec<AlternateLinkEntry>, RuleError> {
        let entries = rules::validate_alternate_links(items)?;
        let mut record = self.entity(id).unwrap_or_default();
        record.alternates = alternates_value(&entries);
        self.put_entity(id, &record);
        Ok(entries)
    }

    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id.to_string()).is_some()
    }

    pub fn set_dynamic_canonical(
        &mut self,
        kind: DynamicContextKind,
        stored: Option<&StoredCanonicalRule>,
    ) -> Result<Option<CanonicalRule>, RuleError> {
        let rule = validate_optional(stored)?;
        match rule.as_ref() {
            Some(rule) => {
                self.dynamic
                    .insert(kind.as_key().to_string(), canonical_value(Some(rule)));
            }
            None => {
                self.dynamic.remove(kind.as_key());
            }
        }
        Ok(rule)
    }

    fn put_entity(&mut self, id: EntityId, record: &EntityRecord) {
        let value = serde_json::to_value(record).unwrap_or(Value::Null);
        self.entities.insert(id.to_string(), value);
    }
}

impl RuleStore for RuleSnapshot {
    fn global_canonical_rule(&self) -> Option<CanonicalRule> {
        rules::decode_canonical_rule(&self.canonical)
    }

    fn global_alternate_links(&self) -> Vec<AlternateLinkEntry> {
        decode_alternates(&self.alternates)
    }

    fn entity_canonical_rule(&self, id: EntityId) -> Option<CanonicalRule> {
        self.entity(id)
            .and_then(|record| rules::decode_canonical_rule(&record.canonical))
    }

    fn entity_alternate_links(&self, id: EntityId) -> Vec<AlternateLinkEntry> {
        self.entity(id)
            .map(|record| decode_alternates(&record.alternates))
            .unwrap_or_default()
    }

    fn is_eligible_entity(&self, id: EntityId) -> bool {
        self.entity(id).map_or(false, |record| record.is_eligible())
    }

    fn dynamic_canonical_rule(&self, kind: DynamicContextKind) -> Option<CanonicalRule> {
        self.dynamic
            .get(kind.as_key())
            .and_then(rules::decode_canonical_rule)
    }
}

fn validate_optional(
    stored: Option<&StoredCanonicalRule>,
) -> Result<Option<CanonicalRule>, RuleError> {
    match stored {
        Some(stored) => rules::validate_canonical_rule(stored),
        None => Ok(None),
    }
}

fn canonical_value(rule: Option<&CanonicalRule>) -> Value {
    rule.map(StoredCanonicalRule::from)
        .and_then(|stored| serde_json::to_value(stored).ok())
        .unwrap_or(Value::Null)
}

fn alternates_value(entries: &[AlternateLinkEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(StoredAlternateLink::from)
            .filter_map(|stored| serde_json::to_value(stored).ok())
            .collect(),
    )
}

fn decode_alternates(value: &Value) -> Vec<AlternateLinkEntry> {
    match value {
        Value::Array(items) => rules::sanitize_alternate_links(items),
        Value::Null => Vec::new(),
        _ => {
            tracing::debug!("alternate links are not a list; ignoring");
            Vec::new()
        }
    }
}
