//! Span constructors shared by the poll loop and the evaluator, so traces
//! carry the same names and fields everywhere.

use tracing::{info_span, Span};

/// One full poll-and-evaluate cycle.
pub fn poll_cycle_span(cycle: u64) -> Span {
    info_span!("poll_cycle", cycle = cycle)
}

/// Fetching the validator list from one node endpoint.
pub fn fetch_span(endpoint: &str, role: &'static str) -> Span {
    info_span!("fetch_validators", endpoint = %endpoint, role = role)
}

/// Evaluating alert conditions against one snapshot generation.
pub fn evaluation_span(generation: u64) -> Span {
    info_span!("evaluate", generation = generation)
}
