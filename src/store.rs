//! Deduplicating store of users and tweets
//!
//! Records are keyed by their archive identifier. The first occurrence of an
//! identifier is stored whole; later occurrences leave the stored record
//! untouched and only add their attribute names to the schema registry.

use crate::error::{GraphmlError, Result};
use crate::models::{Record, ID_FIELD, LABEL_FIELD, NUMERIC_ID_FIELD};
use crate::schema::AttributeSchema;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::trace;

/// Users and tweets collected from the archive
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    users: BTreeMap<String, Record>,
    tweets: BTreeMap<String, Record>,
    schema: AttributeSchema,
}

impl EntityStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user unless its `id_str` is already known
    ///
    /// `nice_label` is taken from `screen_name`.
    pub fn upsert_user(&mut self, user: Record) -> Result<()> {
        upsert(&mut self.users, &mut self.schema, user, "user", "screen_name")
    }

    /// Insert a tweet unless its `id_str` is already known
    ///
    /// `nice_label` is taken from `text`.
    pub fn upsert_tweet(&mut self, tweet: Record) -> Result<()> {
        upsert(&mut self.tweets, &mut self.schema, tweet, "tweet", "text")
    }

    /// Stored users keyed by identifier
    #[must_use]
    pub const fn users(&self) -> &BTreeMap<String, Record> {
        &self.users
    }

    /// Stored tweets keyed by identifier
    #[must_use]
    pub const fn tweets(&self) -> &BTreeMap<String, Record> {
        &self.tweets
    }

    /// Attribute registry accumulated by upserts
    #[must_use]
    pub const fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Mutable access for attributes added during assembly
    pub fn schema_mut(&mut self) -> &mut AttributeSchema {
        &mut self.schema
    }

    /// Whether a user identifier is stored
    #[must_use]
    pub fn contains_user(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    /// Number of distinct users
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of distinct tweets
    #[must_use]
    pub fn tweet_count(&self) -> usize {
        self.tweets.len()
    }
}

fn upsert(
    entries: &mut BTreeMap<String, Record>,
    schema: &mut AttributeSchema,
    mut record: Record,
    entity: &'static str,
    label_source: &str,
) -> Result<()> {
    let id = record
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(GraphmlError::MissingField {
            entity,
            field: ID_FIELD,
        })?;

    // numeric ids lose precision in most graph tools; id_str is the identity
    record.remove(NUMERIC_ID_FIELD);

    let label = record.get(label_source).cloned().unwrap_or(Value::Null);
    record.insert(LABEL_FIELD.to_string(), label);

    for (key, value) in &record {
        schema.register_node(key, value);
    }

    if entries.contains_key(&id) {
        trace!(entity, id = %id, "Keeping first-seen record");
        return Ok(());
    }

    entries.insert(id, record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_upsert_user_sets_label_and_drops_numeric_id() {
        let mut store = EntityStore::new();
        store
            .upsert_user(record(json!({"id_str": "u1", "id": 1, "screen_name": "alice"})))
            .unwrap();

        let user = &store.users()["u1"];
        assert_eq!(user["nice_label"], json!("alice"));
        assert!(!user.contains_key("id"));
        assert!(store.schema().has_node_key("screen_name"));
        assert!(!store.schema().has_node_key("id"));
    }

    #[test]
    fn test_first_seen_wins() {
        let mut store = EntityStore::new();
        store
            .upsert_user(record(json!({"id_str": "u1", "screen_name": "alice"})))
            .unwrap();
        let repeat = record(json!({"id_str": "u1", "screen_name": "alice2", "location": "Oslo"}));
        store.upsert_user(repeat).unwrap();

        assert_eq!(store.user_count(), 1);
        let user = &store.users()["u1"];
        assert_eq!(user["screen_name"], json!("alice"));
        assert!(!user.contains_key("location"));
        // the later record's attribute names still reach the schema
        assert!(store.schema().has_node_key("location"));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let mut store = EntityStore::new();
        let err = store.upsert_tweet(record(json!({"text": "hi"}))).unwrap_err();
        assert!(matches!(
            err,
            GraphmlError::MissingField {
                entity: "tweet",
                field: "id_str"
            }
        ));
        assert_eq!(store.tweet_count(), 0);
    }

    #[test]
    fn test_numeric_id_str_is_malformed() {
        let mut store = EntityStore::new();
        assert!(store.upsert_user(record(json!({"id_str": 5}))).is_err());
    }

    #[test]
    fn test_tweet_label_from_text() {
        let mut store = EntityStore::new();
        store
            .upsert_tweet(record(json!({"id_str": "9", "text": "hello"})))
            .unwrap();
        assert_eq!(store.tweets()["9"]["nice_label"], json!("hello"));
    }

    #[test]
    fn test_missing_label_source_is_null() {
        let mut store = EntityStore::new();
        store.upsert_user(record(json!({"id_str": "u2"}))).unwrap();
        assert_eq!(store.users()["u2"]["nice_label"], Value::Null);
    }
}
