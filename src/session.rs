// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Interactive graphing session
//!
//! A [`Session`] holds everything that survives between user actions: the
//! connection, the block-hash cache, the charted observations, the account
//! being graphed and the status line. Each action takes `&mut self`, so
//! actions never overlap.
//!
//! # Example
//!
//! ```rust,ignore
//! use balancegraph::{BalanceGraphConfig, QueryParams, Session};
//! use balancegraph::source::SubstrateConnector;
//!
//! let config = BalanceGraphConfig::default();
//! let mut session = Session::new(SubstrateConnector::from_config(&config), config);
//!
//! let params = QueryParams::new()
//!     .with_endpoint("wss://rpc.polkadot.io")
//!     .with_address("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5");
//! let outcome = session.graph_balance(&params).await;
//! if session.report(outcome).is_some() {
//!     let html = session.figure().render_html()?;
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn, Instrument};
use url::Url;

use crate::blocks::{BlockHashCache, CacheStats};
use crate::chart::Figure;
use crate::config::BalanceGraphConfig;
use crate::errors::BalanceGraphError;
use crate::query::QueryParams;
use crate::sampler::RangeSampler;
use crate::source::{BalanceSource, Connector};
use crate::tracing::spans;
use crate::types::blocks::BlockRange;
use crate::types::observation::{Observation, ObservationSet};

type AccountOf<C> = <<C as Connector>::Source as BalanceSource>::Account;

/// Text of the status line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Connecting,
    Connected,
    Loading,
    NoTransactions,
    /// A failed action, as plain text
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Connecting => f.write_str("Connecting to Endpoint..."),
            Status::Connected => f.write_str("Connected"),
            Status::Loading => f.write_str("Loading"),
            Status::NoTransactions => f.write_str("No transactions found for that address."),
            Status::Error(message) => f.write_str(message),
        }
    }
}

/// What a graph action produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOutcome {
    /// The chart holds this many observations
    Charted(usize),
    /// The resolved range was empty
    NoTransactions,
}

struct Connection<S> {
    endpoint: String,
    source: S,
}

/// State shared by the actions of one user
pub struct Session<C: Connector> {
    connector: C,
    config: BalanceGraphConfig,
    connection: Option<Connection<C::Source>>,
    endpoint: Option<String>,
    address: Option<String>,
    account: Option<AccountOf<C>>,
    range: Option<BlockRange>,
    hashes: BlockHashCache,
    observations: ObservationSet,
    status: Status,
}

impl<C: Connector> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("connected", &self.connected_endpoint())
            .field("address", &self.address)
            .field("range", &self.range)
            .field("observations", &self.observations.len())
            .field("status", &self.status)
            .finish()
    }
}

impl<C: Connector> Session<C> {
    pub fn new(connector: C, config: BalanceGraphConfig) -> Self {
        Self {
            connector,
            config,
            connection: None,
            endpoint: None,
            address: None,
            account: None,
            range: None,
            hashes: BlockHashCache::new(),
            observations: ObservationSet::new(),
            status: Status::Idle,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Charted observations in block order
    pub fn observations(&self) -> &[Observation] {
        self.observations.as_slice()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Range of the last fetch, as shown in the start/end inputs
    pub fn range(&self) -> Option<BlockRange> {
        self.range
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.hashes.stats()
    }

    /// Endpoint of the live connection, if any
    pub fn connected_endpoint(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.endpoint.as_str())
    }

    /// Sets the endpoint used when an action does not name one
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = Some(endpoint.into());
    }

    pub fn figure(&self) -> Figure {
        Figure::from_observations(self.observations.as_slice())
    }

    /// The current chart as a standalone HTML page
    pub fn render_html(&self) -> Result<String, BalanceGraphError> {
        self.figure().render_html().map_err(BalanceGraphError::Render)
    }

    /// Connects unless already connected to `endpoint`
    pub async fn connect(&mut self, endpoint: &str) -> Result<(), BalanceGraphError> {
        let limit = self.config.rpc_timeout;
        within(limit, self.open(endpoint)).await
    }

    /// Clears everything but the connection
    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.observations.clear();
        self.address = None;
        self.account = None;
        self.range = None;
        self.hashes.clear();
    }

    /// Graphs an account from scratch
    ///
    /// Missing `start` is the account's first block and missing `end` the
    /// chain's best block. Fields absent from `params` fall back to the
    /// session's endpoint.
    pub async fn graph_balance(
        &mut self,
        params: &QueryParams,
    ) -> Result<GraphOutcome, BalanceGraphError> {
        let limit = self.config.rpc_timeout;
        let span = spans::graph_balance(params.address.as_deref().unwrap_or_default());
        within(limit, self.graph(params)).instrument(span).await
    }

    /// Adds samples over `start..end` to the current chart
    ///
    /// Blocks already charted are not fetched again. Returns the number of
    /// new observations.
    pub async fn zoom(&mut self, start: u64, end: u64) -> Result<usize, BalanceGraphError> {
        let limit = self.config.rpc_timeout;
        let zooming = async move {
            let account = self
                .account
                .clone()
                .ok_or(BalanceGraphError::MissingAddress)?;
            let range = BlockRange::new(start, end)?;

            let sampled = self.fetch(&account, range).await?;
            let added = sampled.len();
            self.observations.extend(sampled);
            self.observations.sort();
            Ok::<_, BalanceGraphError>(added)
        };
        within(limit, zooming).instrument(spans::zoom(start, end)).await
    }

    /// Link reproducing the current graph
    pub fn share_url(&self, base: &Url) -> Url {
        self.query_params().to_url(base)
    }

    /// Endpoint, address and the last fetched range
    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            endpoint: self.endpoint.clone(),
            address: self.address.clone(),
            start: self.range.map(|r| r.start()),
            end: self.range.map(|r| r.end()),
        }
    }

    /// Opens a shared link: connects, then graphs if it names an address
    ///
    /// Returns `None` when there was nothing to graph.
    pub async fn restore(
        &mut self,
        params: &QueryParams,
    ) -> Result<Option<GraphOutcome>, BalanceGraphError> {
        let limit = self.config.rpc_timeout;
        let restoring = async move {
            let endpoint = params.endpoint.clone().or_else(|| self.endpoint.clone());
            if let Some(endpoint) = endpoint {
                self.open(&endpoint).await?;
            }
            if params.address.is_none() {
                return Ok(None);
            }
            self.graph(params).await.map(Some)
        };
        within(limit, restoring).await
    }

    /// Moves a failed action's error into the status line
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let result = session.zoom(1_000, 2_000).await;
    /// if let Some(added) = session.report(result) {
    ///     println!("{added} new points");
    /// }
    /// ```
    pub fn report<T>(&mut self, result: Result<T, BalanceGraphError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Action failed");
                self.set_status(Status::Error(e.to_string()));
                None
            }
        }
    }

    fn source(&self) -> Result<&C::Source, BalanceGraphError> {
        self.connection
            .as_ref()
            .map(|c| &c.source)
            .ok_or(BalanceGraphError::MissingEndpoint)
    }

    fn set_status(&mut self, status: Status) {
        if !matches!(status, Status::Idle) {
            info!(status = %status, "Status");
        }
        self.status = status;
    }

    async fn open(&mut self, endpoint: &str) -> Result<(), BalanceGraphError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(BalanceGraphError::MissingEndpoint);
        }
        self.endpoint = Some(endpoint.to_string());
        if self.connected_endpoint() == Some(endpoint) {
            return Ok(());
        }

        self.set_status(Status::Connecting);
        let source = self
            .connector
            .connect(endpoint)
            .instrument(spans::connect(endpoint))
            .await?;
        self.connection = Some(Connection {
            endpoint: endpoint.to_string(),
            source,
        });
        self.set_status(Status::Connected);
        Ok(())
    }

    async fn graph(&mut self, params: &QueryParams) -> Result<GraphOutcome, BalanceGraphError> {
        self.reset();

        let endpoint = params
            .endpoint
            .clone()
            .or_else(|| self.endpoint.clone())
            .ok_or(BalanceGraphError::MissingEndpoint)?;
        self.open(&endpoint).await?;

        let raw = params
            .address
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(BalanceGraphError::MissingAddress)?;
        let source = self.source()?;
        let account = source.parse_account(raw)?;

        let start = match params.start {
            Some(start) => start,
            None => source.first_block(&account).await?,
        };
        let end = match params.end {
            Some(end) => end,
            None => source.best_block_number().await?,
        };

        self.address = Some(raw.to_string());
        self.account = Some(account.clone());

        if start >= end {
            info!(start, end, "Empty range");
            self.set_status(Status::NoTransactions);
            return Ok(GraphOutcome::NoTransactions);
        }

        let range = BlockRange::new(start, end)?;
        let sampled = self.fetch(&account, range).await?;
        if sampled.is_empty() {
            self.set_status(Status::NoTransactions);
            return Ok(GraphOutcome::NoTransactions);
        }

        self.observations.extend(sampled);
        self.observations.sort();
        Ok(GraphOutcome::Charted(self.observations.len()))
    }

    /// Samples `range`; nothing is charted here
    async fn fetch(
        &mut self,
        account: &AccountOf<C>,
        range: BlockRange,
    ) -> Result<Vec<Observation>, BalanceGraphError> {
        self.range = Some(range);
        self.set_status(Status::Loading);

        let Self {
            connection,
            hashes,
            observations,
            config,
            ..
        } = &mut *self;
        let source = &connection
            .as_ref()
            .ok_or(BalanceGraphError::MissingEndpoint)?
            .source;
        let sampled = RangeSampler::new(source, config.point_count)
            .sample(account, range, hashes, observations)
            .await?;

        self.set_status(Status::Idle);
        Ok(sampled)
    }
}

/// Runs one session action, failing with `Timeout` once `limit` has passed
async fn within<T>(
    limit: Duration,
    action: impl Future<Output = Result<T, BalanceGraphError>>,
) -> Result<T, BalanceGraphError> {
    tokio::time::timeout(limit, action)
        .await
        .map_err(|_| BalanceGraphError::Timeout {
            seconds: limit.as_secs(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Idle.to_string(), "");
        assert_eq!(Status::Connecting.to_string(), "Connecting to Endpoint...");
        assert_eq!(Status::Connected.to_string(), "Connected");
        assert_eq!(Status::Loading.to_string(), "Loading");
        assert_eq!(
            Status::NoTransactions.to_string(),
            "No transactions found for that address."
        );
        assert_eq!(Status::Error("boom".into()).to_string(), "boom");
        assert!(Status::Error(String::new()).is_error());
    }
}
