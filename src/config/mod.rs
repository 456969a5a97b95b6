// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for balancegraph sessions
//!
//! Controls how densely ranges are sampled, how long a session action may
//! wait on the node, and the transport settings every connection starts
//! from.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use balancegraph::BalanceGraphConfig;
//!
//! // 200 points per range, 30 second timeout, decimals read from the chain
//! let config = BalanceGraphConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use balancegraph::{BalanceGraphConfigBuilder, TokenDecimals};
//! use std::time::Duration;
//!
//! let config = BalanceGraphConfigBuilder::with_defaults()
//!     .point_count(500)
//!     .rpc_timeout(Duration::from_secs(90))
//!     .decimals(TokenDecimals::POLKADOT)
//!     .rate_limit(10)
//!     .build();
//! ```

use std::time::Duration;

use crate::provider::ProviderConfig;
use crate::types::blocks::PointCount;
use crate::types::decimals::TokenDecimals;

/// Default time a session action may spend waiting on the node
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a balance graph session
///
/// Use [`BalanceGraphConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceGraphConfig {
    /// Target number of samples per fetched range
    /// Default: 200
    pub point_count: PointCount,

    /// Upper bound on each session action, connecting and both request waves included
    /// Default: 30 seconds
    pub rpc_timeout: Duration,

    /// Chain decimals; `None` asks the chain (Substrate) or assumes 18 (EVM)
    pub decimals: Option<TokenDecimals>,

    /// Transport template; its URL is replaced by the session's endpoint
    pub provider: ProviderConfig,
}

impl Default for BalanceGraphConfig {
    fn default() -> Self {
        Self::with_common_defaults()
    }
}

impl BalanceGraphConfig {
    /// Create config suited to public RPC endpoints
    ///
    /// # Example
    ///
    /// ```rust
    /// use balancegraph::{BalanceGraphConfig, PointCount};
    ///
    /// let config = BalanceGraphConfig::with_common_defaults();
    /// assert_eq!(config.point_count, PointCount::DEFAULT);
    /// assert!(config.provider.has_rate_limiting());
    /// ```
    pub fn with_common_defaults() -> Self {
        Self {
            point_count: PointCount::DEFAULT,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            decimals: None,
            provider: ProviderConfig::public_endpoint(""),
        }
    }

    /// Create minimal config with no rate limiting
    ///
    /// Suitable for testing or a local node.
    pub fn minimal() -> Self {
        Self {
            point_count: PointCount::DEFAULT,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            decimals: None,
            provider: ProviderConfig::new(""),
        }
    }

    /// Timeout in whole seconds, for error messages
    pub fn rpc_timeout_secs(&self) -> u64 {
        self.rpc_timeout.as_secs()
    }
}

/// Builder for [`BalanceGraphConfig`]
///
/// # Example
///
/// ```rust
/// use balancegraph::BalanceGraphConfigBuilder;
///
/// let config = BalanceGraphConfigBuilder::new()
///     .point_count(50)
///     .log_rpc_calls(true)
///     .build();
/// assert_eq!(config.point_count.as_u64(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct BalanceGraphConfigBuilder {
    config: BalanceGraphConfig,
}

impl Default for BalanceGraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceGraphConfigBuilder {
    /// Start from [`BalanceGraphConfig::minimal`]
    pub fn new() -> Self {
        Self {
            config: BalanceGraphConfig::minimal(),
        }
    }

    /// Start from [`BalanceGraphConfig::with_common_defaults`]
    pub fn with_defaults() -> Self {
        Self {
            config: BalanceGraphConfig::with_common_defaults(),
        }
    }

    /// Set the target number of samples per range (zero is treated as one)
    pub fn point_count(mut self, points: u64) -> Self {
        self.config.point_count = PointCount::new(points);
        self
    }

    /// Set the timeout for each session action
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc_timeout = timeout;
        self
    }

    /// Use these decimals instead of asking the chain
    pub fn decimals(mut self, decimals: TokenDecimals) -> Self {
        self.config.decimals = Some(decimals);
        self
    }

    /// Limit requests per second on every connection
    pub fn rate_limit(mut self, requests_per_second: u32) -> Self {
        self.config.provider = self.config.provider.with_rate_limit(requests_per_second);
        self
    }

    /// Remove any request rate limit
    pub fn no_rate_limit(mut self) -> Self {
        self.config.provider = self.config.provider.with_rate_limit_opt(None);
        self
    }

    /// Space requests at least `delay` apart on every connection
    pub fn min_delay(mut self, delay: Duration) -> Self {
        self.config.provider = self.config.provider.with_min_delay(delay);
        self
    }

    /// Log every RPC call at debug level
    pub fn log_rpc_calls(mut self, enabled: bool) -> Self {
        self.config.provider = self.config.provider.with_logging(enabled);
        self
    }

    /// Also log request and response bodies at TRACE level
    pub fn log_rpc_payloads(mut self, enabled: bool) -> Self {
        self.config.provider = self.config.provider.with_payload_logging(enabled);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> BalanceGraphConfig {
        self.config
    }
}
