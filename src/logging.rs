use crate::error::{GraphmlError, Result};
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Initialize structured logging
///
/// Console output goes to stderr so the conversion summary on stdout stays
/// clean. When `log_file` is set, a daily-rolling file layer is added; its
/// guard must be held until the program exits.
pub fn init_logging(
    log_level: Option<&str>,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = log_level.unwrap_or("info");
            EnvFilter::try_new(level)
        })
        .map_err(|e| GraphmlError::InvalidConfig(format!("Failed to create log filter: {e}")))?;

    let console_layer = if json {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .boxed()
    };

    let registry = Registry::default().with(env_filter).with(console_layer);

    let guard = if let Some(log_path) = log_file {
        let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = log_path
            .file_name()
            .map_or_else(
                || "tweet-archive-graphml.log".into(),
                |n| n.to_string_lossy().into_owned(),
            );
        let file_appender = rolling::daily(directory, file_name);
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(true)
            .json();

        registry
            .with(file_layer)
            .try_init()
            .map_err(|e| GraphmlError::InvalidConfig(format!("Failed to install logger: {e}")))?;
        Some(guard)
    } else {
        registry
            .try_init()
            .map_err(|e| GraphmlError::InvalidConfig(format!("Failed to install logger: {e}")))?;
        None
    };

    info!("Logging system initialized");
    Ok(guard)
}

/// Times one conversion phase, logging and recording its duration
pub struct OperationTimer {
    operation: &'static str,
    start: std::time::Instant,
}

impl OperationTimer {
    /// Start timing `operation`
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: std::time::Instant::now(),
        }
    }

    /// Stop the timer, returning elapsed milliseconds
    pub fn finish(self) -> u128 {
        let elapsed = self.start.elapsed();
        tracing::info!(
            operation = self.operation,
            duration_ms = elapsed.as_millis(),
            "Operation completed"
        );
        crate::metrics::record_phase(self.operation, elapsed);
        elapsed.as_millis()
    }
}
