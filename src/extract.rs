//! Entity extraction from archive records
//!
//! Splits one raw tweet record into the users and tweets it contains (the
//! author, and for retweets the original tweet and its author) and upserts
//! them into an [`EntityStore`].

use crate::error::{GraphmlError, Result};
use crate::models::{
    Record, ID_FIELD, LIMIT_FIELD, RETWEETED_STATUS_FIELD, RETWEETED_TWEET_ID_FIELD,
    RETWEETED_USER_ID_FIELD, USER_ID_FIELD,
};
use crate::store::EntityStore;
use serde_json::Value;
use tracing::debug;

/// What happened to one input record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A plain tweet was ingested
    Tweet,
    /// A retweet and its original were ingested
    Retweet,
    /// A rate-limit notice was ignored
    RateLimitNotice,
}

/// Ingest one archive record into the store
///
/// The record is checked before anything is stored, so a malformed record
/// leaves the store untouched.
pub fn add_record(store: &mut EntityStore, mut record: Record) -> Result<RecordOutcome> {
    if is_rate_limit_notice(&record) {
        debug!(notice = ?record.get(LIMIT_FIELD), "Skipping rate-limit notice");
        return Ok(RecordOutcome::RateLimitNotice);
    }

    let original = match record.remove(RETWEETED_STATUS_FIELD) {
        Some(Value::Object(original)) => Some(original),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(GraphmlError::MissingField {
                entity: "tweet",
                field: RETWEETED_STATUS_FIELD,
            })
        },
    };

    let (author, author_id) = split_author(&mut record)?;
    tweet_id(&record)?;

    let original = match original {
        Some(mut original) => {
            let (original_author, original_author_id) = split_author(&mut original)?;
            let original_id = tweet_id(&original)?;
            Some((original, original_id, original_author, original_author_id))
        },
        None => None,
    };

    let outcome = if let Some((mut original, original_id, original_author, original_author_id)) =
        original
    {
        original.insert(USER_ID_FIELD.to_string(), Value::String(original_author_id.clone()));
        record.insert(RETWEETED_TWEET_ID_FIELD.to_string(), Value::String(original_id));
        record.insert(RETWEETED_USER_ID_FIELD.to_string(), Value::String(original_author_id));

        store.upsert_user(original_author)?;
        store.upsert_tweet(original)?;
        RecordOutcome::Retweet
    } else {
        RecordOutcome::Tweet
    };

    record.insert(USER_ID_FIELD.to_string(), Value::String(author_id));
    store.upsert_user(author)?;
    store.upsert_tweet(record)?;

    Ok(outcome)
}

/// Whether a record is a streaming rate-limit notice rather than a tweet
#[must_use]
pub fn is_rate_limit_notice(record: &Record) -> bool {
    record.contains_key(LIMIT_FIELD)
}

/// Detach the `user` object of a tweet, returning it with its identifier
fn split_author(tweet: &mut Record) -> Result<(Record, String)> {
    let Some(Value::Object(user)) = tweet.remove("user") else {
        return Err(GraphmlError::MissingField {
            entity: "tweet",
            field: "user",
        });
    };
    let id = user
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(GraphmlError::MissingField {
            entity: "user",
            field: ID_FIELD,
        })?;
    Ok((user, id))
}

fn tweet_id(tweet: &Record) -> Result<String> {
    tweet
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(GraphmlError::MissingField {
            entity: "tweet",
            field: ID_FIELD,
        })
}
