use crate::error::{GraphmlError, Result};
use crate::graph::{GraphOptions, TWITTER_HOST};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub graph: GraphConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub default_name: String,
    pub include_mentions: bool,
    pub include_urls: bool,
    pub include_tlds: bool,
    pub excluded_tlds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub keep_going: bool,
}

/// Prefix of environment overrides, e.g. `TWEET_GRAPHML__GRAPH__INCLUDE_URLS=true`
pub const ENV_PREFIX: &str = "TWEET_GRAPHML";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            graph: GraphConfig {
                default_name: "Default Graph Name".to_string(),
                include_mentions: false,
                include_urls: false,
                include_tlds: false,
                excluded_tlds: vec![TWITTER_HOST.to_string()],
            },
            input: InputConfig { keep_going: false },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    ///
    /// Defaults, then `config/default`, `config/local`, a
    /// `tweet-archive-graphml` file in the working directory, the optional
    /// `extra` file, and finally the environment.
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("tweet-archive-graphml").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("graph.excluded_tlds"),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(GraphmlError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(GraphmlError::InvalidConfig(format!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format, valid_formats
            )));
        }

        if self.graph.default_name.trim().is_empty() {
            return Err(GraphmlError::InvalidConfig("default_name cannot be empty".to_string()));
        }

        if self.graph.excluded_tlds.iter().any(|t| t.trim().is_empty()) {
            return Err(GraphmlError::InvalidConfig(
                "excluded_tlds cannot contain empty hosts".to_string(),
            ));
        }

        Ok(())
    }

    /// Graph options described by the `graph` section
    #[must_use]
    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            mentions: self.graph.include_mentions,
            urls: self.graph.include_urls,
            tlds: self.graph.include_tlds,
            excluded_tlds: self.graph.excluded_tlds.iter().cloned().collect(),
        }
    }

    /// Whether log lines should be JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.graph.default_name, "Default Graph Name");
        assert_eq!(config.graph.excluded_tlds, vec!["twitter.com".to_string()]);
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_graph_options_match_simple_graph() {
        assert_eq!(AppConfig::default().graph_options(), GraphOptions::default());
    }
}
