// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the range sampler
//!
//! These tests drive `RangeSampler` against the in-memory chain and check
//! which requests it issues.

mod helpers;

use balancegraph::{
    BlockHashCache, BlockRange, ObservationSet, PointCount, RangeSampler, RpcError, SamplerError,
};
use helpers::{MockBalanceSource, BLOCK_TIME_SECS};

fn alice() -> String {
    "alice".to_string()
}

/// A range shorter than the point count samples every block
#[tokio::test]
async fn test_short_range_samples_every_block() {
    let source = MockBalanceSource::new(10_000);
    let log = source.log();
    let sampler = RangeSampler::new(&source, PointCount::DEFAULT);
    let range = BlockRange::new(1_000, 1_150).unwrap();

    assert_eq!(sampler.step(range).as_u64(), 1);

    let observations = sampler
        .sample(&alice(), range, &mut BlockHashCache::new(), &ObservationSet::new())
        .await
        .unwrap();

    assert_eq!(observations.len(), 150);
    assert_eq!(observations.first().unwrap().block, 1_000);
    assert_eq!(observations.last().unwrap().block, 1_149);
    assert_eq!(log.hashes().len(), 150);
}

/// Observations carry converted balances and block times
#[tokio::test]
async fn test_observation_values() {
    let source = MockBalanceSource::new(10_000);
    let sampler = RangeSampler::new(&source, PointCount::new(4));
    let range = BlockRange::new(100, 140).unwrap();

    let observations = sampler
        .sample(&alice(), range, &mut BlockHashCache::new(), &ObservationSet::new())
        .await
        .unwrap();

    let blocks: Vec<u64> = observations.iter().map(|o| o.block).collect();
    assert_eq!(blocks, vec![100, 110, 120, 130]);

    let third = &observations[2];
    assert_eq!(third.free, 120.0);
    assert_eq!(third.reserved, 2.0);
    assert_eq!(third.total, 122.0);
    assert_eq!(third.time.timestamp(), 120 * BLOCK_TIME_SECS);
}

/// Cached hashes and charted blocks are never requested again
#[tokio::test]
async fn test_no_duplicate_requests() {
    let source = MockBalanceSource::new(10_000);
    let log = source.log();
    let sampler = RangeSampler::new(&source, PointCount::new(10));
    let mut hashes = BlockHashCache::new();
    let mut charted = ObservationSet::new();

    let first = sampler
        .sample(&alice(), BlockRange::new(0, 100).unwrap(), &mut hashes, &charted)
        .await
        .unwrap();
    charted.extend(first);

    // step 5 over 50..100 revisits 50, 60, 70, 80, 90
    let second = sampler
        .sample(&alice(), BlockRange::new(50, 100).unwrap(), &mut hashes, &charted)
        .await
        .unwrap();

    assert_eq!(second.len(), 5);
    assert!(second.iter().all(|o| o.block % 10 == 5));

    let mut hash_requests = log.hashes();
    let total = hash_requests.len();
    hash_requests.sort_unstable();
    hash_requests.dedup();
    assert_eq!(hash_requests.len(), total, "a block hash was requested twice");

    let mut account_requests = log.accounts();
    let total = account_requests.len();
    account_requests.sort_unstable();
    account_requests.dedup();
    assert_eq!(account_requests.len(), total, "a block state was requested twice");
    assert_eq!(log.timestamps().len(), total);

    assert_eq!(hashes.stats().hits, 5);
}

/// One failing state read fails the whole sample
#[tokio::test]
async fn test_first_error_wins() {
    let source = MockBalanceSource::new(10_000).failing_at(30);
    let sampler = RangeSampler::new(&source, PointCount::new(10));
    let mut hashes = BlockHashCache::new();

    let err = sampler
        .sample(&alice(), BlockRange::new(0, 100).unwrap(), &mut hashes, &ObservationSet::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SamplerError::Rpc(RpcError::GetAccountFailed { .. })
    ));
    // the hash wave completed before the failure
    assert_eq!(hashes.len(), 10);
}

/// Blocks past the chain tip have no hash
#[tokio::test]
async fn test_range_past_tip() {
    let source = MockBalanceSource::new(50);
    let sampler = RangeSampler::new(&source, PointCount::new(10));

    let err = sampler
        .sample(
            &alice(),
            BlockRange::new(0, 100).unwrap(),
            &mut BlockHashCache::new(),
            &ObservationSet::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SamplerError::Rpc(RpcError::BlockNotFound { block_number }) if block_number > 50
    ));
}

#[test]
fn test_empty_range_is_rejected() {
    assert!(matches!(
        BlockRange::new(10, 10),
        Err(SamplerError::InvalidRange { start: 10, end: 10 })
    ));
    assert!(BlockRange::new(10, 3).is_err());
}
