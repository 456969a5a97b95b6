// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for sampling and ordering
//!
//! These tests use proptest to validate invariants about sampled blocks,
//! unit conversion and the charted observation list across arbitrary
//! ranges and zoom sequences.

mod helpers;

use alloy_primitives::U256;
use balancegraph::{
    to_display_units, BalanceGraphConfigBuilder, BlockRange, PointCount, Session, TokenDecimals,
};
use helpers::{MockBalanceSource, MockConnector};
use proptest::prelude::*;

// Helper to generate a non-empty block range
fn arb_range() -> impl Strategy<Value = BlockRange> {
    (0u64..1_000_000, 1u64..100_000)
        .prop_map(|(start, len)| BlockRange::new(start, start + len).unwrap())
}

// Helper to generate zoom windows inside 0..10_000
fn arb_zooms() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec(
        (0u64..9_999, 1u64..2_000).prop_map(|(start, len)| (start, (start + len).min(10_000))),
        1..6,
    )
}

proptest! {
    /// Property: the step is at least one and never exceeds the range
    #[test]
    fn prop_step_bounds(range in arb_range(), points in 0u64..1_000) {
        let step = range.step(PointCount::new(points)).as_u64();
        prop_assert!(step >= 1);
        prop_assert!(step <= range.len());
    }

    /// Property: sampled blocks start at the range start, increase by the
    /// step and stay below the end
    #[test]
    fn prop_sampled_blocks_are_monotonic(range in arb_range(), points in 1u64..500) {
        let step = range.step(PointCount::new(points));
        let blocks: Vec<u64> = range.sampled_blocks(step).collect();

        prop_assert_eq!(blocks[0], range.start());
        prop_assert!(blocks.windows(2).all(|w| w[1] - w[0] == step.as_u64()));
        prop_assert!(blocks.iter().all(|&b| b < range.end()));
        prop_assert_eq!(blocks.len() as u64, range.len().div_ceil(step.as_u64()));
    }

    /// Property: a range shorter than the point count is sampled densely
    #[test]
    fn prop_short_range_has_unit_step(start in 0u64..1_000_000, len in 1u64..200) {
        let range = BlockRange::new(start, start + len).unwrap();
        prop_assert_eq!(range.step(PointCount::DEFAULT).as_u64(), 1);
    }

    /// Property: conversion agrees with float division to within rounding
    #[test]
    fn prop_display_units_match_division(balance in any::<u64>(), decimals in 0u8..=18) {
        let value = to_display_units(U256::from(balance), TokenDecimals::new(decimals)).unwrap();
        let expected = balance as f64 / 10f64.powi(i32::from(decimals));
        let tolerance = expected.abs() * 1e-12 + f64::MIN_POSITIVE;
        prop_assert!((value - expected).abs() <= tolerance, "{} vs {}", value, expected);
    }

    /// Property: after any zoom sequence the chart is sorted by block and no
    /// block state was fetched twice
    #[test]
    fn prop_zooms_keep_chart_sorted(zooms in arb_zooms(), points in 1u64..50) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        runtime.block_on(async {
            let source = MockBalanceSource::new(10_000);
            let log = source.log();
            let config = BalanceGraphConfigBuilder::new().point_count(points).build();
            let mut session = Session::new(MockConnector::new(source), config);

            let params = balancegraph::QueryParams::new()
                .with_endpoint("ws://node:9944")
                .with_address("alice")
                .with_start(0)
                .with_end(10_000);
            session.graph_balance(&params).await.unwrap();

            for (start, end) in zooms {
                session.zoom(start, end).await.unwrap();
            }

            let blocks: Vec<u64> = session.observations().iter().map(|o| o.block).collect();
            assert!(blocks.windows(2).all(|w| w[0] < w[1]), "chart not strictly sorted");

            let mut states = log.accounts();
            let fetched = states.len();
            states.sort_unstable();
            states.dedup();
            assert_eq!(states.len(), fetched, "a block state was fetched twice");
            assert_eq!(fetched, blocks.len());

            let mut hashes = log.hashes();
            let requested = hashes.len();
            hashes.sort_unstable();
            hashes.dedup();
            assert_eq!(hashes.len(), requested, "a block hash was requested twice");
        });
    }
}
