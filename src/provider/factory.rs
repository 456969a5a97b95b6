// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Factory functions for RPC clients and providers

use alloy_network::Ethereum;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::{ClientBuilder, RpcClient};
use tracing::debug;
use url::Url;

use crate::errors::RpcError;
use super::config::ProviderConfig;
use super::EvmProvider;

/// Create a JSON-RPC client for the configured endpoint
///
/// `http(s)` endpoints are always available; `ws(s)` endpoints need the `ws`
/// feature. Logging and rate limiting are layered into the transport as
/// configured.
///
/// # Errors
///
/// Returns an error if the URL is malformed, uses an unsupported scheme, or
/// (for WebSocket endpoints) the handshake fails.
pub async fn create_rpc_client(config: &ProviderConfig) -> Result<RpcClient, RpcError> {
    let url: Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    debug!(url = %url, logging = config.logging_enabled, payloads = config.log_payloads, rate_limited = config.has_rate_limiting(), "Creating RPC client");

    match url.scheme() {
        "http" | "https" => Ok(create_http_client(config, url)),
        "ws" | "wss" => create_ws_client(config, url).await,
        other => Err(RpcError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

fn create_http_client(config: &ProviderConfig, url: Url) -> RpcClient {
    match (config.rate_limit_layer(), config.logging_layer()) {
        (Some(limit), Some(logging)) => ClientBuilder::default()
            .layer(logging)
            .layer(limit)
            .http(url),
        (Some(limit), None) => ClientBuilder::default().layer(limit).http(url),
        (None, Some(logging)) => ClientBuilder::default().layer(logging).http(url),
        (None, None) => ClientBuilder::default().http(url),
    }
}

#[cfg(feature = "ws")]
async fn create_ws_client(config: &ProviderConfig, url: Url) -> Result<RpcClient, RpcError> {
    use alloy_provider::WsConnect;

    let ws = WsConnect::new(url.as_str());
    let client = match (config.rate_limit_layer(), config.logging_layer()) {
        (Some(limit), Some(logging)) => {
            ClientBuilder::default()
                .layer(logging)
                .layer(limit)
                .ws(ws)
                .await
        }
        (Some(limit), None) => ClientBuilder::default().layer(limit).ws(ws).await,
        (None, Some(logging)) => ClientBuilder::default().layer(logging).ws(ws).await,
        (None, None) => ClientBuilder::default().ws(ws).await,
    };
    client.map_err(|e| RpcError::ProviderConnectionFailed(e.to_string()))
}

#[cfg(not(feature = "ws"))]
async fn create_ws_client(_config: &ProviderConfig, url: Url) -> Result<RpcClient, RpcError> {
    Err(RpcError::UnsupportedScheme {
        scheme: format!("{} (rebuild with the `ws` feature)", url.scheme()),
    })
}

/// Wrap an RPC client in an Ethereum provider without fillers
pub fn create_evm_provider(client: RpcClient) -> EvmProvider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<Ethereum>()
        .connect_client(client)
}
