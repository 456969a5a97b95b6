// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Evenly spaced balance sampling over a block range
//!
//! A range is sampled every `step` blocks, where `step` spreads the
//! configured point count over the range. Sampling runs in two request
//! waves:
//!
//! 1. Hash wave: every sampled block without a cached hash is resolved
//!    concurrently, each hash entering the [`BlockHashCache`] as soon as
//!    its lookup completes.
//! 2. State wave: every sampled block not already charted has its account
//!    balances and timestamp read concurrently at the cached hash.
//!
//! Either wave fails as a whole on the first failing request. Returned
//! observations are in ascending block order.

use std::collections::HashSet;

use alloy_primitives::B256;
use futures::future::try_join_all;
use futures::stream::{FuturesUnordered, TryStreamExt};
use tracing::{debug, info, Instrument};

use crate::blocks::BlockHashCache;
use crate::errors::{RpcError, SamplerError};
use crate::source::{AccountBalance, BalanceSource};
use crate::tracing::spans;
use crate::types::blocks::{BlockRange, PointCount, Step};
use crate::types::observation::{Observation, ObservationSet};
use crate::units::to_display_units;

/// Samples one account's balances from a [`BalanceSource`]
///
/// # Examples
///
/// ```rust,ignore
/// use balancegraph::{BlockHashCache, BlockRange, ObservationSet, PointCount, RangeSampler};
///
/// let sampler = RangeSampler::new(&source, PointCount::DEFAULT);
/// let mut hashes = BlockHashCache::new();
/// let range = BlockRange::new(1_000_000, 1_100_000)?;
/// let observations = sampler
///     .sample(&account, range, &mut hashes, &ObservationSet::new())
///     .await?;
/// assert_eq!(observations.len(), 200);
/// ```
#[derive(Debug)]
pub struct RangeSampler<'a, S> {
    source: &'a S,
    points: PointCount,
}

impl<'a, S: BalanceSource> RangeSampler<'a, S> {
    pub fn new(source: &'a S, points: PointCount) -> Self {
        Self { source, points }
    }

    /// Step this sampler uses for `range`
    pub fn step(&self, range: BlockRange) -> Step {
        range.step(self.points)
    }

    /// Samples `range`, skipping blocks already present in `charted`
    ///
    /// Resolved hashes are added to `hashes` even if the rest of the call
    /// fails or is cancelled.
    pub async fn sample(
        &self,
        account: &S::Account,
        range: BlockRange,
        hashes: &mut BlockHashCache,
        charted: &ObservationSet,
    ) -> Result<Vec<Observation>, SamplerError> {
        let step = self.step(range);
        let label = account.to_string();

        async move {
            let blocks: Vec<u64> = range.sampled_blocks(step).collect();
            self.resolve_hashes(&blocks, hashes).await?;

            let charted_blocks: HashSet<u64> = charted.iter().map(|o| o.block).collect();
            let pending = blocks
                .into_iter()
                .filter(|block| !charted_blocks.contains(block))
                .map(|block| {
                    hashes
                        .get(block)
                        .map(|hash| (block, hash))
                        .ok_or(SamplerError::MissingBlockHash {
                            block_number: block,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let observations = self.read_states(account, pending).await?;
            info!(
                sampled = observations.len(),
                cache = %hashes.stats(),
                "Sampled block range"
            );
            Ok(observations)
        }
        .instrument(spans::sample_range(self.source.name(), &label, range, step))
        .await
    }

    async fn resolve_hashes(
        &self,
        blocks: &[u64],
        hashes: &mut BlockHashCache,
    ) -> Result<(), SamplerError> {
        let missing = hashes.missing(blocks.iter().copied());
        if missing.is_empty() {
            debug!(sampled = blocks.len(), "All block hashes cached");
            return Ok(());
        }

        let span = spans::fetch_block_hashes(missing.len());
        let mut lookups: FuturesUnordered<_> = missing
            .into_iter()
            .map(|block| async move {
                self.source
                    .block_hash(block)
                    .await
                    .map(|hash| (block, hash))
            })
            .collect();

        async {
            while let Some((block, hash)) = lookups.try_next().await? {
                hashes.insert(block, hash);
            }
            Ok::<_, RpcError>(())
        }
        .instrument(span)
        .await?;
        Ok(())
    }

    async fn read_states(
        &self,
        account: &S::Account,
        pending: Vec<(u64, B256)>,
    ) -> Result<Vec<Observation>, SamplerError> {
        if pending.is_empty() {
            debug!("Every sampled block is already charted");
            return Ok(Vec::new());
        }

        let span = spans::fetch_block_states(pending.len());
        let reads = pending.into_iter().map(|(block, hash)| async move {
            let (balance, time) = futures::try_join!(
                self.source.account_at(hash, account),
                self.source.timestamp_at(hash)
            )?;
            Ok::<_, RpcError>((block, balance, time))
        });
        let states = try_join_all(reads).instrument(span).await?;

        let decimals = self.source.decimals();
        states
            .into_iter()
            .map(|(block, AccountBalance { free, reserved }, time)| {
                let convert = |value| {
                    to_display_units(value, decimals).map_err(|source| SamplerError::Units {
                        block_number: block,
                        source,
                    })
                };
                Ok(Observation::new(block, convert(free)?, convert(reserved)?, time))
            })
            .collect()
    }
}
