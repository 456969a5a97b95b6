// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Append-only cache of block number to block hash
//!
//! Hash lookups are the first request wave of every range fetch. Zooming
//! back and forth over the same chart hits the same sampled blocks again,
//! so resolved hashes are kept for the lifetime of the session.

use std::collections::HashMap;
use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Statistics about cache performance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that needed a request
    pub misses: u64,
    /// Current number of cached hashes
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Block number to hash mapping that never overwrites an entry
///
/// # Examples
///
/// ```
/// use alloy_primitives::B256;
/// use balancegraph::BlockHashCache;
///
/// let mut cache = BlockHashCache::new();
/// assert!(cache.insert(7, B256::repeat_byte(1)));
/// assert!(!cache.insert(7, B256::repeat_byte(2)));
/// assert_eq!(cache.get(7), Some(B256::repeat_byte(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockHashCache {
    hashes: HashMap<u64, B256>,
    stats: CacheStats,
}

impl BlockHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached hash for `block`
    pub fn get(&self, block: u64) -> Option<B256> {
        self.hashes.get(&block).copied()
    }

    /// Splits `blocks` into those still needing a hash lookup, recording
    /// one hit or miss per block
    pub fn missing(&mut self, blocks: impl IntoIterator<Item = u64>) -> Vec<u64> {
        let mut missing = Vec::new();
        for block in blocks {
            if self.hashes.contains_key(&block) {
                self.stats.hits += 1;
            } else {
                self.stats.misses += 1;
                missing.push(block);
            }
        }
        missing
    }

    /// Stores a hash; returns `false` and keeps the old value if `block` is
    /// already cached
    pub fn insert(&mut self, block: u64, hash: B256) -> bool {
        if self.hashes.contains_key(&block) {
            debug!(block, "Block hash already cached, keeping first value");
            return false;
        }
        self.hashes.insert(block, hash);
        self.stats.entries = self.hashes.len();
        true
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every entry and resets the statistics
    pub fn clear(&mut self) {
        self.hashes.clear();
        self.stats = CacheStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counts_hits_and_misses() {
        let mut cache = BlockHashCache::new();
        cache.insert(1, B256::repeat_byte(1));
        cache.insert(3, B256::repeat_byte(3));

        let missing = cache.missing([1, 2, 3, 4]);
        assert_eq!(missing, vec![2, 4]);

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_insert_is_append_only() {
        let mut cache = BlockHashCache::new();
        assert!(cache.insert(9, B256::repeat_byte(0xaa)));
        assert!(!cache.insert(9, B256::ZERO));
        assert_eq!(cache.get(9), Some(B256::repeat_byte(0xaa)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_resets_stats() {
        let mut cache = BlockHashCache::new();
        cache.insert(1, B256::ZERO);
        cache.missing([1, 2]);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            entries: 4,
        };
        assert_eq!(stats.to_string(), "hits=3, misses=1, entries=4, hit_rate=75.0%");
    }
}
