//! Writing GraphML output files.
//!
//! The document is rendered in memory and written in one go; a failed write
//! never leaves a partially rendered graph behind in the renderer.

use crate::error::Result;
use crate::graph::Graph;
use crate::graphml::write_graphml;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix appended to the first input path when no output path is given
pub const DEFAULT_SUFFIX: &str = ".graphml";

/// Output path derived from an input path: `tweets.json` becomes `tweets.json.graphml`
#[must_use]
pub fn default_output_path(first_input: &Path) -> PathBuf {
    let mut name = OsString::from(first_input.as_os_str());
    name.push(DEFAULT_SUFFIX);
    PathBuf::from(name)
}

/// Write a graph to a GraphML file, replacing any existing file
///
/// # Arguments
///
/// * `graph` - Assembled graph
/// * `file_path` - Destination path
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn write_graph_file(graph: &Graph, file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    write_graphml(graph, BufWriter::new(file))?;
    info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Wrote GraphML to {}",
        file_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_appends_suffix() {
        assert_eq!(
            default_output_path(Path::new("data/tweets.json")),
            PathBuf::from("data/tweets.json.graphml")
        );
    }
}
