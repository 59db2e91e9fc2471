//! Data models for archive records and graph elements
//!
//! This module contains the record representation used during ingestion,
//! the entity payloads read from a tweet's `entities` object, and the
//! node/edge vocabulary written to GraphML.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One archive record (tweet or user) as a string-keyed JSON object
pub type Record = Map<String, Value>;

/// Field holding the archive-native identifier of users and tweets
pub const ID_FIELD: &str = "id_str";
/// Numeric identifier dropped before storage
pub const NUMERIC_ID_FIELD: &str = "id";
/// Derived display label on users and tweets
pub const LABEL_FIELD: &str = "nice_label";
/// Author reference set on tweets
pub const USER_ID_FIELD: &str = "user_id";
/// Original tweet reference set on retweets
pub const RETWEETED_TWEET_ID_FIELD: &str = "retweeted_tweet_id";
/// Original author reference set on retweets
pub const RETWEETED_USER_ID_FIELD: &str = "retweeted_user_id";
/// Nested original tweet on a retweet
pub const RETWEETED_STATUS_FIELD: &str = "retweeted_status";
/// Marker of a rate-limit notice
pub const LIMIT_FIELD: &str = "limit";

/// Node categories, written as the `entity_type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Twitter account
    User,
    /// Tweet or retweeted original
    Tweet,
    /// `#hashtag`
    Hashtag,
    /// `$cashtag`
    Symbol,
    /// Expanded link target
    Url,
    /// Host of a displayed link
    Tld,
}

impl NodeKind {
    /// Value of the `entity_type` attribute
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Tweet => "tweet",
            Self::Hashtag => "hashtag",
            Self::Symbol => "symbol",
            Self::Url => "url",
            Self::Tld => "tld",
        }
    }

    /// Prefix used to build node identifiers
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::User => "user_id",
            Self::Tweet => "tweet_id",
            Self::Hashtag => "hashtag",
            Self::Symbol => "symbol",
            Self::Url => "url",
            Self::Tld => "tld",
        }
    }

    /// Graph node identifier for an entity key, e.g. `user_id:12`
    #[must_use]
    pub fn node_id(self, key: &str) -> String {
        format!("{}:{key}", self.id_prefix())
    }
}

/// Edge categories, written as `entity_type` and `interaction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// User authored tweet
    Tweeted,
    /// Tweet retweets an original
    Retweet,
    /// Tweet uses a hashtag
    UsedHashtag,
    /// Tweet uses a symbol
    UsedSymbol,
    /// Tweet mentions a user
    UserMention,
    /// Tweet links a URL
    LinkedUrl,
    /// Tweet links a host
    LinkedTld,
}

impl EdgeKind {
    /// Value of the `entity_type` attribute
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tweeted => "tweeted",
            Self::Retweet => "retweet",
            Self::UsedHashtag => "used_hashtag",
            Self::UsedSymbol => "used_symbol",
            Self::UserMention => "user_mention",
            Self::LinkedUrl => "linked_url",
            Self::LinkedTld => "linked_tld",
        }
    }

    /// Value of the Cytoscape `interaction` attribute
    #[must_use]
    pub const fn interaction(self) -> &'static str {
        match self {
            Self::Tweeted => "tweet",
            other => other.as_str(),
        }
    }
}

/// Hashtag or symbol entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntity {
    /// Literal text without the leading `#` or `$`
    pub text: String,
}

/// Link entity
///
/// Older archives carry `null` for any of the three forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntity {
    /// Shortened t.co URL
    #[serde(default)]
    pub url: Option<String>,
    /// Full link target, preferred as the URL node key
    #[serde(default)]
    pub expanded_url: Option<String>,
    /// Link as shown in the tweet text; its first segment is the host
    #[serde(default)]
    pub display_url: Option<String>,
}

impl UrlEntity {
    /// Key of the URL node: the expanded URL, else the shortened one
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.expanded_url.as_deref().or(self.url.as_deref())
    }

    /// Host portion of the displayed URL
    ///
    /// Falls back to the link key with its scheme removed when the archive
    /// did not record a display form.
    #[must_use]
    pub fn tld(&self) -> Option<String> {
        let shown = match self.display_url.as_deref() {
            Some(display) => display,
            None => {
                let link = self.key()?;
                link.split_once("://").map_or(link, |(_, rest)| rest)
            },
        };
        shown
            .split('/')
            .next()
            .filter(|host| !host.is_empty())
            .map(str::to_string)
    }
}

/// Structured entities of one tweet, read best-effort
///
/// Missing lists and entries that do not match the expected shape are
/// treated as absent.
#[derive(Debug, Clone, Default)]
pub struct TweetEntities {
    /// Hashtags used
    pub hashtags: Vec<TextEntity>,
    /// Symbols used
    pub symbols: Vec<TextEntity>,
    /// Mention payloads kept whole, they become partial users
    pub user_mentions: Vec<Record>,
    /// Linked URLs
    pub urls: Vec<UrlEntity>,
}

impl TweetEntities {
    /// Read the `entities` object of a stored tweet
    #[must_use]
    pub fn from_tweet(tweet: &Record) -> Self {
        let Some(entities) = tweet.get("entities").and_then(Value::as_object) else {
            return Self::default();
        };

        Self {
            hashtags: parse_list(entities, "hashtags"),
            symbols: parse_list(entities, "symbols"),
            user_mentions: entities
                .get("user_mentions")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(Value::as_object).cloned().collect())
                .unwrap_or_default(),
            urls: parse_list(entities, "urls"),
        }
    }
}

fn parse_list<T: for<'de> Deserialize<'de>>(entities: &Record, key: &str) -> Vec<T> {
    entities
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match serde_json::from_value(item.clone()) {
                    Ok(entity) => Some(entity),
                    Err(e) => {
                        tracing::debug!(list = key, error = %e, "Ignoring unreadable entity");
                        None
                    },
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Render a JSON value as a GraphML attribute string
///
/// Strings are written verbatim; every other value uses its compact JSON form.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
