use crate::error::Result;
use crate::file_writer::write_graph_file;
use crate::graph::{Graph, GraphAssembler, GraphOptions};
use crate::ingest::{IngestReport, Ingestor};
use crate::logging::OperationTimer;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of one conversion run
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Assembled graph
    pub graph: Graph,
    /// What the input contained
    pub report: IngestReport,
}

/// Drives archive files through ingestion, assembly and output
pub struct ConversionService {
    assembler: GraphAssembler,
    keep_going: bool,
}

impl ConversionService {
    /// Create a service
    #[must_use]
    pub const fn new(options: GraphOptions, keep_going: bool) -> Self {
        Self {
            assembler: GraphAssembler::new(options),
            keep_going,
        }
    }

    /// Read every input and assemble the graph
    pub fn convert(&self, inputs: &[PathBuf], graph_name: &str) -> Result<Conversion> {
        let timer = OperationTimer::new("ingest");
        let mut ingestor = Ingestor::new(self.keep_going);
        for input in inputs {
            ingestor.ingest_file(input)?;
        }
        let (mut store, report) = ingestor.finish();
        timer.finish();

        info!(
            tweets = store.tweet_count(),
            users = store.user_count(),
            skipped = report.malformed + report.rate_limit_notices,
            "Ingested archive"
        );

        let timer = OperationTimer::new("assemble");
        let graph = self.assembler.assemble(&mut store, graph_name);
        timer.finish();

        Ok(Conversion { graph, report })
    }

    /// Convert the inputs and write the GraphML file
    pub fn convert_to_file(
        &self,
        inputs: &[PathBuf],
        graph_name: &str,
        output: &Path,
    ) -> Result<Conversion> {
        let conversion = self.convert(inputs, graph_name)?;

        let timer = OperationTimer::new("write");
        write_graph_file(&conversion.graph, output)?;
        timer.finish();

        Ok(conversion)
    }
}
