// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block bookkeeping shared across range fetches.

pub mod hash_cache;

// Re-export public API
pub use hash_cache::{BlockHashCache, CacheStats};
