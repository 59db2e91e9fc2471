use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use tweet_archive_graphml::config::AppConfig;
use tweet_archive_graphml::file_writer::default_output_path;
use tweet_archive_graphml::logging::init_logging;
use tweet_archive_graphml::service::{Conversion, ConversionService};
use tweet_archive_graphml::validation::InputValidator;

/// Convert tweet archive JSON records into a GraphML network
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output GraphML filename (default: first input + .graphml)
    #[arg(short, long = "output", value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// GraphML network name
    #[arg(short, long)]
    graph_name: Option<String>,

    /// Add nodes and edges for mentions
    #[arg(short, long)]
    mentions: bool,

    /// Add nodes and edges for full urls
    #[arg(short, long)]
    urls: bool,

    /// Add nodes and edges for TLDs
    #[arg(short, long)]
    tlds: bool,

    /// Nodes and edges for everything. WARNING! This creates very large graph files
    #[arg(short, long)]
    all: bool,

    /// Skip malformed lines and records instead of stopping
    #[arg(short, long)]
    keep_going: bool,

    /// Additional configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Newline-delimited tweet archive files
    #[arg(value_name = "INFILE", required = true, num_args = 1..)]
    infile_paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging
    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_file = config.logging.file_path.as_deref().map(std::path::Path::new);
    let _guard = init_logging(Some(level), log_file, config.json_logs())?;

    debug!("Args: {:?}", cli);
    info!("Starting tweet-archive-graphml");

    let mut options = config.graph_options();
    options.mentions |= cli.mentions || cli.all;
    options.urls |= cli.urls || cli.all;
    options.tlds |= cli.tlds || cli.all;
    let keep_going = cli.keep_going || config.input.keep_going;

    let graph_name = cli.graph_name.clone().unwrap_or_else(|| config.graph.default_name.clone());
    InputValidator::validate_graph_name(&graph_name)?;
    for input in &cli.infile_paths {
        InputValidator::validate_input_path(input)?;
    }

    let output = cli
        .outfile
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.infile_paths[0]));
    InputValidator::validate_output_path(&output)?;

    let service = ConversionService::new(options, keep_going);
    let conversion = service
        .convert_to_file(&cli.infile_paths, &graph_name, &output)
        .with_context(|| format!("Failed to convert archive to {}", output.display()))?;

    print_summary(&conversion);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary(conversion: &Conversion) {
    let counts = conversion.graph.counts;
    println!("Tweets Processed: {}", counts.tweets);
    println!("Users extracted: {}", counts.users);
    println!("Hashtags extracted: {}", counts.hashtags);
    println!("TLDs extracted: {}", counts.tlds);
    println!("Urls extracted: {}", counts.urls);

    let skipped = conversion.report.rate_limit_notices + conversion.report.malformed;
    if skipped > 0 {
        println!("Records skipped: {skipped}");
    }
}
