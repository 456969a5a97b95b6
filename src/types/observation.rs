// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balance observations and the ordered list the chart is drawn from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sampled point: an account's balance at a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Block the balance was read at
    pub block: u64,
    /// Free balance in display units
    pub free: f64,
    /// Reserved balance in display units
    pub reserved: f64,
    /// `free + reserved`
    pub total: f64,
    /// Chain timestamp of the block
    pub time: DateTime<Utc>,
}

impl Observation {
    /// Creates an observation; `total` is derived
    pub fn new(block: u64, free: f64, reserved: f64, time: DateTime<Utc>) -> Self {
        Self {
            block,
            free,
            reserved,
            total: free + reserved,
            time,
        }
    }
}

/// Observations accumulated across range fetches
///
/// Fetches append in completion order, so the list is only guaranteed to be
/// sorted by block after [`ObservationSet::sort`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without sorting
    pub fn extend(&mut self, observations: impl IntoIterator<Item = Observation>) {
        self.observations.extend(observations);
    }

    /// Sorts ascending by block number
    pub fn sort(&mut self) {
        self.observations.sort_by_key(|o| o.block);
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn clear(&mut self) {
        self.observations.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }
}

impl From<Vec<Observation>> for ObservationSet {
    fn from(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(block: u64) -> Observation {
        Observation::new(block, 1.5, 0.5, DateTime::<Utc>::UNIX_EPOCH)
    }

    #[test]
    fn test_total_is_free_plus_reserved() {
        assert_eq!(at(1).total, 2.0);
    }

    #[test]
    fn test_out_of_order_extend_then_sort() {
        let mut set = ObservationSet::from(vec![at(10), at(20)]);
        set.extend(vec![at(15), at(5)]);

        set.sort();
        let blocks: Vec<u64> = set.iter().map(|o| o.block).collect();
        assert_eq!(blocks, vec![5, 10, 15, 20]);
    }
}
