// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chart an account's balance history from a Substrate or EVM node.
//!
//! ```text
//! balance-graph --endpoint wss://rpc.polkadot.io \
//!     --address 15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5 \
//!     --start 20000000 --end 21000000 --zoom 20400000..20500000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use balancegraph::source::{Connector, EvmConnector, SubstrateConnector};
use balancegraph::{
    BalanceGraphConfig, BalanceGraphConfigBuilder, GraphOutcome, QueryParams, Session,
    TokenDecimals,
};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Chain {
    Substrate,
    Evm,
}

#[derive(Parser, Debug)]
#[command(name = "balance-graph", version, about)]
struct Args {
    /// Node RPC endpoint (http, https, ws or wss)
    #[arg(long, env = "BALANCE_GRAPH_ENDPOINT")]
    endpoint: Option<String>,
    /// Account to chart: SS58 or 0x hex
    #[arg(long, env = "BALANCE_GRAPH_ADDRESS")]
    address: Option<String>,
    /// First block; defaults to genesis
    #[arg(long)]
    start: Option<u64>,
    /// End block (exclusive); defaults to the best block
    #[arg(long)]
    end: Option<u64>,
    #[arg(long, value_enum, default_value_t = Chain::Substrate, env = "BALANCE_GRAPH_CHAIN")]
    chain: Chain,
    /// Samples per fetched range
    #[arg(long, default_value_t = 200)]
    points: u64,
    /// Extra range to sample more densely, as START..END; repeatable
    #[arg(long, value_name = "START..END", value_parser = parse_zoom)]
    zoom: Vec<(u64, u64)>,
    /// Shared link to restore; explicit flags override its parameters
    #[arg(long = "from-url", value_name = "URL")]
    from_url: Option<String>,
    #[arg(long, default_value = "balance.html")]
    output: PathBuf,
    /// Also write the observations as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
    /// Base of the printed share link
    #[arg(long = "share-base", default_value = "http://localhost/balance-graph")]
    share_base: Url,
    /// Override the chain's token decimals
    #[arg(long)]
    decimals: Option<u8>,
    /// Requests per second; 0 disables the limit
    #[arg(long = "rate-limit", default_value_t = 5, env = "BALANCE_GRAPH_RATE_LIMIT")]
    rate_limit: u32,
    #[arg(long = "timeout-secs", default_value_t = 30)]
    timeout_secs: u64,
    /// Log every RPC call at debug level
    #[arg(long = "log-rpc")]
    log_rpc: bool,
    /// Also log RPC request and response bodies at trace level
    #[arg(long = "log-rpc-payloads")]
    log_rpc_payloads: bool,
}

fn parse_zoom(raw: &str) -> Result<(u64, u64), String> {
    let (start, end) = raw
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{raw}'"))?;
    let start = start.trim().parse().map_err(|e| format!("start: {e}"))?;
    let end = end.trim().parse().map_err(|e| format!("end: {e}"))?;
    Ok((start, end))
}

impl Args {
    fn config(&self) -> BalanceGraphConfig {
        let mut builder = BalanceGraphConfigBuilder::new()
            .point_count(self.points)
            .rpc_timeout(Duration::from_secs(self.timeout_secs))
            .log_rpc_calls(self.log_rpc)
            .log_rpc_payloads(self.log_rpc_payloads);
        if self.rate_limit > 0 {
            builder = builder.rate_limit(self.rate_limit);
        }
        if let Some(decimals) = self.decimals {
            builder = builder.decimals(TokenDecimals::new(decimals));
        }
        builder.build()
    }

    fn params(&self) -> Result<QueryParams> {
        let from_link = match &self.from_url {
            Some(link) => QueryParams::parse_link(link).context("reading --from-url")?,
            None => QueryParams::new(),
        };
        Ok(from_link.merge(QueryParams {
            endpoint: self.endpoint.clone(),
            address: self.address.clone(),
            start: self.start,
            end: self.end,
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.config();
    match args.chain {
        Chain::Substrate => run(SubstrateConnector::from_config(&config), config, &args).await,
        Chain::Evm => run(EvmConnector::from_config(&config), config, &args).await,
    }
}

async fn run<C: Connector>(connector: C, config: BalanceGraphConfig, args: &Args) -> Result<()> {
    let params = args.params()?;
    if params.endpoint.is_none() {
        bail!("no endpoint: pass --endpoint, set BALANCE_GRAPH_ENDPOINT, or use --from-url");
    }

    let mut session = Session::new(connector, config);
    let restored = session.restore(&params).await;
    let outcome = session.report(restored).flatten();
    println!("{}", session.status());

    match outcome {
        Some(GraphOutcome::Charted(points)) => info!(points, "Charted"),
        Some(GraphOutcome::NoTransactions) | None => {
            if session.status().is_error() {
                bail!("{}", session.status());
            }
            return Ok(());
        }
    }

    for &(start, end) in &args.zoom {
        let zoomed = session.zoom(start, end).await;
        if let Some(added) = session.report(zoomed) {
            info!(start, end, added, "Zoomed");
        } else {
            println!("{}", session.status());
        }
    }

    let html = session.render_html()?;
    tokio::fs::write(&args.output, html)
        .await
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Chart written to {}", args.output.display());

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(session.observations())?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Observations written to {}", path.display());
    }

    info!(cache = %session.cache_stats(), "Block hash cache");
    println!("Share: {}", session.share_url(&args.share_base));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("100..250"), Ok((100, 250)));
        assert!(parse_zoom("100-250").is_err());
        assert!(parse_zoom("a..2").is_err());
    }

    #[test]
    fn test_flags_override_link() {
        let args = Args::parse_from([
            "balance-graph",
            "--from-url",
            "https://example.org/?endpoint=ws%3A%2F%2Fnode%3A9944&address=abc&start=5&end=50",
            "--end",
            "80",
        ]);
        let params = args.params().unwrap();
        assert_eq!(params.endpoint.as_deref(), Some("ws://node:9944"));
        assert_eq!(params.start, Some(5));
        assert_eq!(params.end, Some(80));
    }

    #[test]
    fn test_config_from_flags() {
        let args = Args::parse_from(["balance-graph", "--points", "50", "--rate-limit", "0", "--decimals", "10"]);
        let config = args.config();
        assert_eq!(config.point_count.as_u64(), 50);
        assert!(!config.provider.has_rate_limiting());
        assert_eq!(config.decimals, Some(TokenDecimals::POLKADOT));
        assert!(!config.provider.log_payloads);
    }

    #[test]
    fn test_log_rpc_payloads_flag() {
        let args = Args::parse_from(["balance-graph", "--log-rpc-payloads"]);
        let provider = args.config().provider;
        assert!(provider.log_payloads);
        assert!(!provider.logging_enabled);
    }
}
