//! Reading newline-delimited archive files into an [`EntityStore`].

use crate::error::{GraphmlError, Result};
use crate::extract::{add_record, RecordOutcome};
use crate::metrics;
use crate::models::Record;
use crate::store::EntityStore;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-run tallies of what the input contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Non-blank lines read
    pub lines: usize,
    /// Plain tweets ingested
    pub tweets: usize,
    /// Retweets ingested
    pub retweets: usize,
    /// Rate-limit notices ignored
    pub rate_limit_notices: usize,
    /// Lines or records skipped as malformed (keep-going mode only)
    pub malformed: usize,
}

/// Feeds archive records into a store
#[derive(Debug, Default)]
pub struct Ingestor {
    store: EntityStore,
    keep_going: bool,
    report: IngestReport,
}

impl Ingestor {
    /// Create an ingestor
    ///
    /// With `keep_going`, malformed lines and records are logged and skipped
    /// instead of aborting the run.
    #[must_use]
    pub fn new(keep_going: bool) -> Self {
        Self {
            keep_going,
            ..Self::default()
        }
    }

    /// Read every line of an archive file
    pub fn ingest_file(&mut self, path: &Path) -> Result<()> {
        info!("Reading archive file: {}", path.display());
        let file = File::open(path)?;
        self.ingest_reader(BufReader::new(file), path)
    }

    /// Read newline-delimited records from any buffered reader
    ///
    /// `source` only labels error messages. Lines are decoded one at a time
    /// so that a line which is not UTF-8 is reported like any other
    /// malformed line.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R, source: &Path) -> Result<()> {
        let before = self.report;
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;

            let result = match decode_line(&buf, source, line_number) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    self.report.lines += 1;
                    parse_line(line, source, line_number)
                        .and_then(|record| self.ingest_record(record))
                },
                Err(e) => {
                    self.report.lines += 1;
                    Err(e)
                },
            };

            if let Err(e) = result {
                if self.keep_going && e.is_malformed_input() {
                    warn!(error = %e, "Skipping malformed input");
                    self.report.malformed += 1;
                    metrics::record_malformed();
                } else {
                    return Err(e);
                }
            }
        }

        debug!(
            source = %source.display(),
            lines = self.report.lines - before.lines,
            malformed = self.report.malformed - before.malformed,
            "Finished archive file"
        );
        Ok(())
    }

    /// Ingest one already-parsed record
    pub fn ingest_record(&mut self, record: Record) -> Result<RecordOutcome> {
        let outcome = add_record(&mut self.store, record)?;
        match outcome {
            RecordOutcome::Tweet => self.report.tweets += 1,
            RecordOutcome::Retweet => self.report.retweets += 1,
            RecordOutcome::RateLimitNotice => self.report.rate_limit_notices += 1,
        }
        metrics::record_outcome(outcome);
        Ok(outcome)
    }

    /// Tallies so far
    #[must_use]
    pub const fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Store built so far
    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Finish ingestion, handing over the store
    #[must_use]
    pub fn finish(self) -> (EntityStore, IngestReport) {
        (self.store, self.report)
    }
}

fn decode_line<'a>(bytes: &'a [u8], source: &Path, line_number: usize) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| GraphmlError::InvalidUtf8 {
        path: PathBuf::from(source),
        line: line_number,
        source: e,
    })
}

fn parse_line(line: &str, source: &Path, line_number: usize) -> Result<Record> {
    let value: Value = serde_json::from_str(line).map_err(|e| GraphmlError::InvalidJson {
        path: PathBuf::from(source),
        line: line_number,
        source: e,
    })?;

    match value {
        Value::Object(record) => Ok(record),
        _ => Err(GraphmlError::NotAnObject {
            path: PathBuf::from(source),
            line: line_number,
        }),
    }
}
