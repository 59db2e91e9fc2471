//! Graph assembly
//!
//! Turns the deduplicated users and tweets into an ordered list of GraphML
//! nodes and edges. Cytoscape only links edges to nodes it has already read,
//! so every node is emitted before the first edge.

use crate::metrics;
use crate::models::{
    stringify, EdgeKind, NodeKind, Record, TweetEntities, UrlEntity, ID_FIELD, LABEL_FIELD,
    RETWEETED_TWEET_ID_FIELD, USER_ID_FIELD,
};
use crate::schema::AttributeSchema;
use crate::store::EntityStore;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Host excluded from TLD nodes by default; nearly every tweet links it
pub const TWITTER_HOST: &str = "twitter.com";

/// Optional parts of the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Add mentioned users and `user_mention` edges
    pub mentions: bool,
    /// Add URL nodes and `linked_url` edges
    pub urls: bool,
    /// Add host nodes and `linked_tld` edges
    pub tlds: bool,
    /// Hosts never turned into TLD nodes
    pub excluded_tlds: BTreeSet<String>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            mentions: false,
            urls: false,
            tlds: false,
            excluded_tlds: BTreeSet::from([TWITTER_HOST.to_string()]),
        }
    }
}

impl GraphOptions {
    /// Every optional part enabled
    #[must_use]
    pub fn all() -> Self {
        Self {
            mentions: true,
            urls: true,
            tlds: true,
            ..Self::default()
        }
    }

    fn keeps_tld(&self, tld: &str) -> bool {
        !self.excluded_tlds.contains(tld)
    }
}

/// A GraphML node with its `<data>` entries in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node identifier, e.g. `user_id:12`
    pub id: String,
    /// Attribute name and stringified value pairs
    pub data: Vec<(String, String)>,
}

/// A directed GraphML edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source node identifier
    pub source: String,
    /// Target node identifier
    pub target: String,
    /// Edge category
    pub kind: EdgeKind,
    /// Attribute name and value pairs
    pub data: Vec<(String, String)>,
}

/// Entity counts reported after a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    /// Distinct tweets, including retweeted originals
    pub tweets: usize,
    /// Distinct users, including mention-only users
    pub users: usize,
    /// Distinct hashtags
    pub hashtags: usize,
    /// Distinct symbols
    pub symbols: usize,
    /// Distinct URLs (zero unless URLs are enabled)
    pub urls: usize,
    /// Distinct hosts emitted as nodes (zero unless TLDs are enabled)
    pub tlds: usize,
}

/// An assembled graph ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Graph identifier written on `<graph id=...>`
    pub name: String,
    /// Declared node and edge attributes
    pub schema: AttributeSchema,
    /// Nodes in emission order
    pub nodes: Vec<Node>,
    /// Edges in emission order
    pub edges: Vec<Edge>,
    /// Summary counts
    pub counts: GraphCounts,
}

/// Entities gathered from all stored tweets before any node is emitted
#[derive(Debug, Clone, Default)]
pub struct AssemblyContext {
    /// Hashtag texts
    pub hashtags: BTreeSet<String>,
    /// Symbol texts
    pub symbols: BTreeSet<String>,
    /// URL objects keyed by [`UrlEntity::key`]
    pub urls: BTreeMap<String, UrlEntity>,
    /// Hosts of displayed URLs, exclusions included
    pub tlds: BTreeSet<String>,
}

impl AssemblyContext {
    /// Walk every stored tweet, collecting entities
    ///
    /// With mentions enabled, users known only from a mention are added to
    /// the store as partial records.
    pub fn collect(store: &mut EntityStore, options: &GraphOptions) -> Self {
        let mut context = Self::default();
        let mut mentioned = Vec::new();

        for tweet in store.tweets().values() {
            let entities = TweetEntities::from_tweet(tweet);
            context.hashtags.extend(entities.hashtags.into_iter().map(|e| e.text));
            context.symbols.extend(entities.symbols.into_iter().map(|e| e.text));

            if options.mentions {
                mentioned.extend(entities.user_mentions);
            }

            for url in entities.urls {
                if options.tlds {
                    context.tlds.extend(url.tld());
                }
                if options.urls {
                    if let Some(key) = url.key().map(str::to_string) {
                        context.urls.insert(key, url);
                    }
                }
            }
        }

        for mention in mentioned {
            let known = mention
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .is_some_and(|id| store.contains_user(id));
            if known {
                continue;
            }
            if let Err(e) = store.upsert_user(mention) {
                warn!(error = %e, "Ignoring mention without a user id");
            }
        }

        debug!(
            hashtags = context.hashtags.len(),
            symbols = context.symbols.len(),
            urls = context.urls.len(),
            tlds = context.tlds.len(),
            "Collected tweet entities"
        );
        context
    }
}

/// Builds [`Graph`]s from an [`EntityStore`]
#[derive(Debug, Clone, Default)]
pub struct GraphAssembler {
    options: GraphOptions,
}

impl GraphAssembler {
    /// Create an assembler with the given options
    #[must_use]
    pub const fn new(options: GraphOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Assemble the graph: nodes first, then per-tweet edges
    pub fn assemble(&self, store: &mut EntityStore, name: &str) -> Graph {
        let context = AssemblyContext::collect(store, &self.options);
        let nodes = self.nodes(store, &context);
        let edges = self.edges(store);

        for edge in &edges {
            for (key, value) in &edge.data {
                store.schema_mut().register_edge(key, &Value::String(value.clone()));
            }
        }

        let counts = GraphCounts {
            tweets: store.tweet_count(),
            users: store.user_count(),
            hashtags: context.hashtags.len(),
            symbols: context.symbols.len(),
            urls: if self.options.urls { context.urls.len() } else { 0 },
            tlds: if self.options.tlds {
                context.tlds.iter().filter(|t| self.options.keeps_tld(t)).count()
            } else {
                0
            },
        };

        info!(nodes = nodes.len(), edges = edges.len(), graph = name, "Assembled graph");
        metrics::record_graph(nodes.len(), edges.len());

        Graph {
            name: name.to_string(),
            schema: store.schema().clone(),
            nodes,
            edges,
            counts,
        }
    }

    fn nodes(&self, store: &EntityStore, context: &AssemblyContext) -> Vec<Node> {
        let mut nodes = Vec::new();

        for (id, user) in store.users() {
            nodes.push(record_node(NodeKind::User, id, user, false));
        }
        for (id, tweet) in store.tweets() {
            nodes.push(record_node(NodeKind::Tweet, id, tweet, true));
        }
        nodes.extend(context.hashtags.iter().map(|h| entity_node(NodeKind::Hashtag, h)));
        nodes.extend(context.symbols.iter().map(|s| entity_node(NodeKind::Symbol, s)));

        if self.options.urls {
            nodes.extend(context.urls.keys().map(|u| entity_node(NodeKind::Url, u)));
        }
        if self.options.tlds {
            nodes.extend(
                context
                    .tlds
                    .iter()
                    .filter(|t| self.options.keeps_tld(t))
                    .map(|t| entity_node(NodeKind::Tld, t)),
            );
        }

        nodes
    }

    fn edges(&self, store: &EntityStore) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (id, tweet) in store.tweets() {
            self.tweet_edges(id, tweet, &mut edges);
        }
        edges
    }

    fn tweet_edges(&self, id: &str, tweet: &Record, edges: &mut Vec<Edge>) {
        let tweet_node = NodeKind::Tweet.node_id(id);

        if let Some(author) = tweet.get(USER_ID_FIELD).and_then(Value::as_str) {
            edges.push(edge(NodeKind::User.node_id(author), tweet_node.clone(), EdgeKind::Tweeted));
        }

        let mut link = |target: String, kind: EdgeKind| {
            edges.push(edge(tweet_node.clone(), target, kind));
        };

        if let Some(original) = tweet.get(RETWEETED_TWEET_ID_FIELD).and_then(Value::as_str) {
            link(NodeKind::Tweet.node_id(original), EdgeKind::Retweet);
        }

        let entities = TweetEntities::from_tweet(tweet);

        for hashtag in &entities.hashtags {
            link(NodeKind::Hashtag.node_id(&hashtag.text), EdgeKind::UsedHashtag);
        }
        for symbol in &entities.symbols {
            link(NodeKind::Symbol.node_id(&symbol.text), EdgeKind::UsedSymbol);
        }

        if self.options.mentions {
            let mentioned = entities
                .user_mentions
                .iter()
                .filter_map(|m| m.get(ID_FIELD).and_then(Value::as_str));
            for user in mentioned {
                link(NodeKind::User.node_id(user), EdgeKind::UserMention);
            }
        }

        if self.options.urls {
            for key in entities.urls.iter().filter_map(UrlEntity::key) {
                link(NodeKind::Url.node_id(key), EdgeKind::LinkedUrl);
            }
        }

        if self.options.tlds {
            // one edge per host even when a tweet links it several times
            let hosts: BTreeSet<String> = entities.urls.iter().filter_map(UrlEntity::tld).collect();
            for host in hosts.iter().filter(|h| self.options.keeps_tld(h)) {
                link(NodeKind::Tld.node_id(host), EdgeKind::LinkedTld);
            }
        }
    }
}

fn record_node(kind: NodeKind, id: &str, record: &Record, with_name: bool) -> Node {
    let mut data = vec![("entity_type".to_string(), kind.as_str().to_string())];
    if with_name {
        let label = record.get(LABEL_FIELD).map(stringify).unwrap_or_default();
        data.push(("name".to_string(), label));
    }

    for (key, value) in record {
        if data.iter().any(|(existing, _)| existing == key) {
            continue;
        }
        data.push((key.clone(), stringify(value)));
    }

    Node {
        id: kind.node_id(id),
        data,
    }
}

fn entity_node(kind: NodeKind, key: &str) -> Node {
    Node {
        id: kind.node_id(key),
        data: vec![("entity_type".to_string(), kind.as_str().to_string())],
    }
}

fn edge(source: String, target: String, kind: EdgeKind) -> Edge {
    Edge {
        source,
        target,
        kind,
        data: vec![
            ("entity_type".to_string(), kind.as_str().to_string()),
            ("interaction".to_string(), kind.interaction().to_string()),
        ],
    }
}
