// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balance history sampling and charting for Substrate and EVM accounts.
//!
//! A [`Session`] connects to a node, samples an account's free and reserved
//! balance at evenly spaced blocks of a range, and renders the result as a
//! Plotly [`Figure`]. Zooming into part of the chart samples that part more
//! densely and merges the new points into the existing ones.
//!
//! # Modules
//!
//! - [`source`] - chain backends behind the [`source::BalanceSource`] trait
//! - [`sampler`] - the two-wave range sampler
//! - [`session`] - connection, cache and chart state across user actions
//! - [`provider`] / [`transport`] - RPC client construction and middleware
//!
//! # Example
//!
//! ```
//! use balancegraph::{BlockRange, PointCount};
//!
//! let range = BlockRange::new(1_000, 1_150).unwrap();
//! assert_eq!(range.step(PointCount::DEFAULT).as_u64(), 1);
//! assert_eq!(range.sampled_blocks(range.step(PointCount::new(3))).count(), 3);
//! ```

pub mod blocks;
pub mod chart;
pub mod config;
pub mod errors;
pub mod provider;
pub mod query;
pub mod sampler;
pub mod session;
pub mod source;
mod tracing;
pub mod transport;
pub mod types;
pub mod units;

pub use blocks::{BlockHashCache, CacheStats};
pub use chart::Figure;
pub use config::{BalanceGraphConfig, BalanceGraphConfigBuilder, DEFAULT_RPC_TIMEOUT};
pub use errors::{
    AddressError, BalanceGraphError, QueryError, RpcError, SamplerError, UnitError,
};
pub use query::QueryParams;
pub use sampler::RangeSampler;
pub use session::{GraphOutcome, Session, Status};
pub use types::blocks::{BlockRange, PointCount, Step};
pub use types::decimals::TokenDecimals;
pub use types::observation::{Observation, ObservationSet};
pub use units::to_display_units;
