// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! RPC connection configuration

use std::time::Duration;

use crate::transport::{LoggingLayer, RateLimitLayer};

/// Configuration for connecting to a node
///
/// The session keeps one as a template and fills in `url` from the endpoint
/// the user typed, see [`ProviderConfig::for_endpoint`].
///
/// # Example
///
/// ```rust
/// use balancegraph::provider::ProviderConfig;
///
/// let config = ProviderConfig::new("wss://rpc.polkadot.io")
///     .with_rate_limit(10)
///     .with_logging(true);
/// assert!(config.has_rate_limiting());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL (`http(s)://` or `ws(s)://`)
    pub url: String,
    /// Rate limit in requests per second (None for unlimited)
    pub rate_limit_per_second: Option<u32>,
    /// Minimum delay between requests (alternative to rate limiting)
    pub min_delay: Option<Duration>,
    /// Log every RPC call through the `tracing` logging layer
    pub logging_enabled: bool,
    /// Also log request and response bodies at TRACE; implies logging
    pub log_payloads: bool,
}

impl ProviderConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rate_limit_per_second: None,
            min_delay: None,
            logging_enabled: false,
            log_payloads: false,
        }
    }

    /// Set rate limiting (requests per second)
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Set rate limiting from an optional value
    #[must_use]
    pub fn with_rate_limit_opt(mut self, requests_per_second: Option<u32>) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    /// Set minimum delay between requests
    #[must_use]
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    /// Same settings, different endpoint
    #[must_use]
    pub fn for_endpoint(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn has_rate_limiting(&self) -> bool {
        self.rate_limit_per_second.is_some() || self.min_delay.is_some()
    }

    /// The logging layer these settings ask for, if any
    pub(crate) fn logging_layer(&self) -> Option<LoggingLayer> {
        match (self.logging_enabled, self.log_payloads) {
            (_, true) => Some(LoggingLayer::new().verbose()),
            (true, false) => Some(LoggingLayer::new()),
            (false, false) => None,
        }
    }

    /// The rate limiter these settings ask for; requests per second wins
    /// over a minimum delay when both are set
    pub(crate) fn rate_limit_layer(&self) -> Option<RateLimitLayer> {
        match (self.rate_limit_per_second, self.min_delay) {
            (Some(rps), _) => Some(RateLimitLayer::per_second(rps)),
            (None, Some(delay)) => Some(RateLimitLayer::with_min_delay(delay)),
            (None, None) => None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::local_substrate_node()
    }
}

/// Presets
impl ProviderConfig {
    /// Public endpoints throttle aggressively; stay well under their limits
    #[must_use]
    pub fn public_endpoint(url: impl Into<String>) -> Self {
        Self::new(url).with_rate_limit(5)
    }

    /// A Substrate node on its default RPC port
    #[must_use]
    pub fn local_substrate_node() -> Self {
        Self::new("ws://127.0.0.1:9944")
    }

    /// An Ethereum node on its default RPC port
    #[must_use]
    pub fn local_evm_node() -> Self {
        Self::new("http://127.0.0.1:8545")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new("https://rpc.example.org");
        assert_eq!(config.url, "https://rpc.example.org");
        assert!(!config.has_rate_limiting());
        assert!(config.rate_limit_layer().is_none());
    }

    #[test]
    fn test_for_endpoint_keeps_settings() {
        let template = ProviderConfig::public_endpoint("http://a").with_logging(true);
        let config = template.for_endpoint("http://b");
        assert_eq!(config.url, "http://b");
        assert_eq!(config.rate_limit_per_second, Some(5));
        assert!(config.logging_enabled);
    }

    #[test]
    fn test_min_delay_counts_as_rate_limiting() {
        let config = ProviderConfig::local_evm_node().with_min_delay(Duration::from_millis(50));
        assert!(config.has_rate_limiting());
        assert!(config.rate_limit_layer().is_some());
    }

    #[test]
    fn test_payload_logging_implies_logging() {
        let quiet = ProviderConfig::local_substrate_node();
        assert_eq!(quiet.logging_layer(), None);
        assert_eq!(
            quiet.clone().with_logging(true).logging_layer(),
            Some(LoggingLayer::new())
        );
        assert_eq!(
            quiet.with_payload_logging(true).logging_layer(),
            Some(LoggingLayer::new().verbose())
        );
    }

    #[test]
    fn test_default_is_local_substrate() {
        assert_eq!(ProviderConfig::default().url, "ws://127.0.0.1:9944");
    }
}
