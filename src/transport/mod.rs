// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower middleware for the alloy RPC transport.
//!
//! Both layers wrap the raw HTTP or WebSocket transport underneath the
//! [`alloy_rpc_client::RpcClient`] that every balance source talks through,
//! so they apply equally to Substrate and EVM endpoints.
//!
//! ```rust,ignore
//! use alloy_rpc_client::ClientBuilder;
//! use balancegraph::transport::{LoggingLayer, RateLimitLayer};
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .layer(RateLimitLayer::per_second(10))
//!     .http(url);
//! ```

mod logging;
mod rate_limit;

pub use logging::{LoggingLayer, LoggingService};
pub use rate_limit::{RateLimitLayer, RateLimitService};
