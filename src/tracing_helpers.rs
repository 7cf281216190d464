//! `tracing` spans for statements issued by this crate.

use tracing::Span;

/// Span around one join-row statement (`insert` or `delete`)
pub(crate) fn intersection_span(table: &str, op: &'static str) -> Span {
    tracing::debug_span!("typequery.intersection", table = %table, op = op)
}
