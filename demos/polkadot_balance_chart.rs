// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Example charting a Polkadot account's balance over a block range
///
/// This example shows how to:
/// 1. Build a session against a public Polkadot endpoint
/// 2. Graph an account over a block range
/// 3. Zoom into a narrower range, reusing the cached block hashes
/// 4. Write the chart as HTML and print a link that reopens it
///
/// Run with:
/// ```bash
/// RPC_URL=wss://rpc.polkadot.io \
/// ADDRESS=15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5 \
/// START=20000000 \
/// END=20100000 \
/// OUTPUT=polkadot_balance.html \
/// cargo run --example polkadot_balance_chart
/// ```
use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use balancegraph::source::SubstrateConnector;
use balancegraph::{BalanceGraphConfigBuilder, GraphOutcome, QueryParams, Session, TokenDecimals};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    dotenvy::dotenv().ok();

    let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| "wss://rpc.polkadot.io".to_string());
    let address = env::var("ADDRESS").context("ADDRESS environment variable not set")?;
    let start: u64 = env::var("START")
        .unwrap_or_else(|_| "20000000".to_string())
        .parse()
        .context("Failed to parse START")?;
    let end: u64 = env::var("END")
        .unwrap_or_else(|_| "20100000".to_string())
        .parse()
        .context("Failed to parse END")?;
    if end <= start {
        bail!("END ({end}) must be above START ({start})");
    }
    let output = env::var("OUTPUT").unwrap_or_else(|_| "polkadot_balance.html".to_string());

    // Polkadot advertises 10 decimals; skip the system_properties call
    let config = BalanceGraphConfigBuilder::with_defaults()
        .point_count(100)
        .rpc_timeout(Duration::from_secs(60))
        .decimals(TokenDecimals::POLKADOT)
        .build();
    let mut session = Session::new(SubstrateConnector::from_config(&config), config);

    let params = QueryParams::new()
        .with_endpoint(rpc_url)
        .with_address(address)
        .with_start(start)
        .with_end(end);

    info!(start, end, "Graphing balance");
    let graphed = session.graph_balance(&params).await;
    match session.report(graphed) {
        Some(GraphOutcome::Charted(points)) => info!(points, "Charted"),
        Some(GraphOutcome::NoTransactions) => {
            println!("{}", session.status());
            return Ok(());
        }
        None => bail!("{}", session.status()),
    }

    // Sample the middle tenth of the range more densely
    let span = (end - start) / 10;
    let zoom_start = start + 4 * span;
    let zoomed = session.zoom(zoom_start, zoom_start + span).await;
    if let Some(added) = session.report(zoomed) {
        info!(added, cache = %session.cache_stats(), "Zoomed");
    }

    tokio::fs::write(&output, session.render_html()?)
        .await
        .with_context(|| format!("Failed to write {output}"))?;

    let base = Url::parse("http://localhost/balance-graph")?;
    println!("\n=== Balance Chart ===");
    println!("Points: {}", session.observations().len());
    if let (Some(first), Some(last)) = (session.observations().first(), session.observations().last()) {
        println!("Free at block {}: {}", first.block, first.free);
        println!("Free at block {}: {}", last.block, last.free);
    }
    println!("Chart: {output}");
    println!("Share: {}", session.share_url(&base));

    Ok(())
}
