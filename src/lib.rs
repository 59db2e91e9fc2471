//! Tweet Archive GraphML - Network export for tweet archives
//!
//! A Rust library for turning newline-delimited tweet archive records into
//! GraphML networks that Cytoscape and Gephi can open.
//!
//! # Features
//!
//! - Users, tweets, retweets, hashtags and symbols as typed nodes and edges
//! - Optional mention, URL and link-host (TLD) layers
//! - First-seen-wins deduplication of users and tweets
//! - Strict or keep-going handling of malformed records

/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Entity extraction from archive records
pub mod extract;
/// GraphML output files
pub mod file_writer;
/// Graph assembly
pub mod graph;
/// GraphML rendering
pub mod graphml;
/// Reading archive files
pub mod ingest;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Attribute schema registry
pub mod schema;
/// End-to-end conversion
pub mod service;
/// Deduplicating entity store
pub mod store;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use error::{GraphmlError, Result};
pub use graph::{Graph, GraphAssembler, GraphOptions};
pub use graphml::to_graphml_string;
pub use service::{Conversion, ConversionService};
pub use store::EntityStore;
