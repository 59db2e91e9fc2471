//! Conversion metrics
//!
//! Counters and histograms are reported through the `metrics` facade. Nothing
//! is recorded unless the embedding application installs a recorder.

use crate::extract::RecordOutcome;
use metrics::{counter, histogram};
use std::time::Duration;

/// Records ingested, labelled by outcome
pub const RECORDS_TOTAL: &str = "tweet_graphml_records_total";
/// Lines or records skipped as malformed
pub const MALFORMED_TOTAL: &str = "tweet_graphml_malformed_total";
/// Nodes emitted into the graph
pub const NODES_TOTAL: &str = "tweet_graphml_nodes_total";
/// Edges emitted into the graph
pub const EDGES_TOTAL: &str = "tweet_graphml_edges_total";
/// Duration of each conversion phase
pub const PHASE_DURATION: &str = "tweet_graphml_phase_duration_seconds";

/// Count one ingested record
pub fn record_outcome(outcome: RecordOutcome) {
    let label = match outcome {
        RecordOutcome::Tweet => "tweet",
        RecordOutcome::Retweet => "retweet",
        RecordOutcome::RateLimitNotice => "rate_limit",
    };
    counter!(RECORDS_TOTAL, "outcome" => label).increment(1);
}

/// Count one skipped malformed line or record
pub fn record_malformed() {
    counter!(MALFORMED_TOTAL).increment(1);
}

/// Record the size of an assembled graph
pub fn record_graph(nodes: usize, edges: usize) {
    counter!(NODES_TOTAL).increment(nodes as u64);
    counter!(EDGES_TOTAL).increment(edges as u64);
}

/// Record how long a phase took
pub fn record_phase(phase: &'static str, duration: Duration) {
    histogram!(PHASE_DURATION, "phase" => phase).record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_outcome(RecordOutcome::Tweet);
        record_malformed();
        record_graph(3, 2);
        record_phase("assemble", Duration::from_millis(5));
    }
}
