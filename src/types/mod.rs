// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across balancegraph.
//!
//! This module provides newtype wrappers for various domain concepts:
//! - Block ranges, sampling steps and point counts
//! - Chain token decimals
//! - Balance observations and the charted list

pub mod blocks;
pub mod decimals;
pub mod observation;

// Note: Public types are re-exported from lib.rs, not here
