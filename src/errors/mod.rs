// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the balancegraph library.
//!
//! Each module has its own error type so callers can match on the failure
//! they care about:
//!
//! - [`RpcError`] - shared failures when talking to a node
//! - [`AddressError`] - an address string that cannot be parsed for the chain
//! - [`UnitError`] - a balance that cannot be converted to display units
//! - [`SamplerError`] - failures while sampling a block range
//! - [`QueryError`] - malformed shareable query strings
//!
//! [`BalanceGraphError`] unifies them for the session layer, where every
//! failure ends up as plain text in the status line anyway.
//!
//! # Examples
//!
//! ```rust,ignore
//! use balancegraph::{BalanceGraphError, SamplerError};
//!
//! match session.zoom(1_000, 2_000).await {
//!     Ok(added) => println!("{added} new points"),
//!     Err(BalanceGraphError::Sampler(SamplerError::InvalidRange { start, end })) => {
//!         eprintln!("empty range {start}..{end}");
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod address;
mod query;
mod rpc;
mod sampler;
mod units;

pub use address::AddressError;
pub use query::QueryError;
pub use rpc::RpcError;
pub use sampler::SamplerError;
pub use units::UnitError;

/// Unified error type for all balancegraph operations.
///
/// All module-specific error types convert into it via `From`, so `?`
/// propagates naturally out of session actions.
#[derive(Debug, thiserror::Error)]
pub enum BalanceGraphError {
    /// Error talking to the node.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The address could not be parsed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Error while sampling a block range.
    #[error(transparent)]
    Sampler(#[from] SamplerError),

    /// Malformed shareable query string.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// An action required an address but none was set.
    #[error("No address given")]
    MissingAddress,

    /// An action required an endpoint but none was set.
    #[error("No endpoint given")]
    MissingEndpoint,

    /// The action did not finish within the configured RPC timeout.
    #[error("Timed out after {seconds}s")]
    Timeout {
        /// Configured timeout in whole seconds
        seconds: u64,
    },

    /// The chart could not be serialized.
    #[error("Failed to render chart")]
    Render(#[source] serde_json::Error),
}
