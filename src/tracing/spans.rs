//! Span creation helpers for balancegraph operations.
//!
//! Telemetry is kept out of the business logic: each instrumented operation
//! has a span constructor here. Every operation awaits RPC calls, so spans
//! are attached with `Instrument` rather than held as guards.
//!
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use tracing::Span;

use crate::types::blocks::{BlockRange, Step};

/// Create span for sampling balances over a block range.
///
/// Parent: graph_balance or zoom span
/// Children: fetch_block_hashes, fetch_block_states spans
#[inline]
pub(crate) fn sample_range(source: &'static str, account: &str, range: BlockRange, step: Step) -> Span {
    tracing::info_span!(
        "balancegraph.sample_range",
        source = source,
        account = account,
        start_block = range.start(),
        end_block = range.end(),
        step = step.as_u64(),
    )
}

/// Create span for the hash lookup wave.
///
/// Parent: sample_range span
#[inline]
pub(crate) fn fetch_block_hashes(requested: usize) -> Span {
    tracing::debug_span!("balancegraph.fetch_block_hashes", requested = requested)
}

/// Create span for the account state and timestamp wave.
///
/// Parent: sample_range span
#[inline]
pub(crate) fn fetch_block_states(requested: usize) -> Span {
    tracing::debug_span!("balancegraph.fetch_block_states", requested = requested)
}

/// Create span for connecting to an endpoint.
///
/// Parent: graph_balance span, or None when connecting on page load
#[inline]
pub(crate) fn connect(endpoint: &str) -> Span {
    tracing::info_span!("balancegraph.connect", endpoint = endpoint)
}

/// Create span for a full graph_balance action.
///
/// This is the main entry point of a session.
///
/// Parent: None (root span for this operation)
/// Children: connect, sample_range spans
#[inline]
pub(crate) fn graph_balance(address: &str) -> Span {
    tracing::info_span!("balancegraph.graph_balance", address = address)
}

/// Create span for extending the chart to a zoomed range.
///
/// Parent: None (root span for this operation)
/// Children: sample_range span
#[inline]
pub(crate) fn zoom(start_block: u64, end_block: u64) -> Span {
    tracing::info_span!(
        "balancegraph.zoom",
        start_block = start_block,
        end_block = end_block,
    )
}
