// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shareable links
//!
//! The inputs of a graph (endpoint, address, start and end block) travel in
//! a URL query string so a chart can be shared and reopened:
//!
//! ```text
//! https://example.org/graph?endpoint=wss%3A%2F%2Frpc.polkadot.io&address=15oF4uVJ...&start=100&end=2000
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::QueryError;

const ENDPOINT_KEY: &str = "endpoint";
const ADDRESS_KEY: &str = "address";
const START_KEY: &str = "start";
const END_KEY: &str = "end";

/// Inputs of one graph; every field is optional
///
/// # Examples
///
/// ```
/// use balancegraph::QueryParams;
/// use url::Url;
///
/// let params = QueryParams::new()
///     .with_address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY")
///     .with_start(100)
///     .with_end(2_000);
///
/// let base = Url::parse("https://example.org/graph").unwrap();
/// let link = params.to_url(&base);
/// assert_eq!(QueryParams::from_url(&link).unwrap(), params);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub endpoint: Option<String>,
    pub address: Option<String>,
    pub start: Option<u64>,
    pub end: Option<u64>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    /// Reads the parameters from a URL's query string
    ///
    /// Unknown keys and empty values are ignored; for repeated keys the last
    /// one wins.
    pub fn from_url(url: &Url) -> Result<Self, QueryError> {
        let mut params = Self::new();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ENDPOINT_KEY => params.endpoint = Some(value.to_string()),
                ADDRESS_KEY => params.address = Some(value.to_string()),
                START_KEY => params.start = Some(parse_block(START_KEY, value)?),
                END_KEY => params.end = Some(parse_block(END_KEY, value)?),
                _ => {}
            }
        }
        Ok(params)
    }

    /// Parses a whole link, then reads its query string
    pub fn parse_link(link: &str) -> Result<Self, QueryError> {
        let url = Url::parse(link.trim()).map_err(|e| QueryError::InvalidUrl {
            url: link.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(&url)
    }

    /// `base` with its query string replaced by these parameters
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        let pairs: Vec<(&str, String)> = [
            (ENDPOINT_KEY, self.endpoint.clone()),
            (ADDRESS_KEY, self.address.clone()),
            (START_KEY, self.start.map(|b| b.to_string())),
            (END_KEY, self.end.map(|b| b.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect();

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    /// Fields set in `overrides` replace the ones here
    pub fn merge(self, overrides: QueryParams) -> Self {
        Self {
            endpoint: overrides.endpoint.or(self.endpoint),
            address: overrides.address.or(self.address),
            start: overrides.start.or(self.start),
            end: overrides.end.or(self.end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn parse_block(key: &'static str, value: &str) -> Result<u64, QueryError> {
    value.parse().map_err(|_| QueryError::InvalidBlockNumber {
        key,
        value: value.to_string(),
    })
}
