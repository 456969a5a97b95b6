// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block range and sampling step types

use serde::{Deserialize, Serialize};

use crate::errors::SamplerError;

/// Target number of points to sample across a block range
///
/// The sampler divides the range by this count to get its step; the real
/// number of points can be lower when the range is short and is never zero.
///
/// # Examples
///
/// ```
/// use balancegraph::PointCount;
///
/// assert_eq!(PointCount::DEFAULT.as_u64(), 200);
/// assert_eq!(PointCount::new(0).as_u64(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointCount(u64);

impl PointCount {
    /// Points per chart when nothing else is configured
    pub const DEFAULT: Self = Self(200);

    /// Create a point count, clamping zero to one
    pub const fn new(points: u64) -> Self {
        if points == 0 {
            Self(1)
        } else {
            Self(points)
        }
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for PointCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for PointCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} points", self.0)
    }
}

/// Distance in blocks between two consecutive samples, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Step(u64);

impl Step {
    /// Sample every block
    pub const ONE: Self = Self(1);

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open block range `[start, end)` with `end > start`
///
/// # Examples
///
/// ```
/// use balancegraph::{BlockRange, PointCount};
///
/// let range = BlockRange::new(1_000, 1_150).unwrap();
/// assert_eq!(range.step(PointCount::DEFAULT).as_u64(), 1);
/// assert!(BlockRange::new(5, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    start: u64,
    end: u64,
}

impl BlockRange {
    /// Creates a range, rejecting `end <= start`
    pub fn new(start: u64, end: u64) -> Result<Self, SamplerError> {
        if end <= start {
            return Err(SamplerError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// First block of the range
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive end of the range
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Number of blocks in the range
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Always false; kept alongside `len` for clippy
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// `max(1, floor(len / points))`
    pub fn step(&self, points: PointCount) -> Step {
        Step((self.len() / points.as_u64()).max(1))
    }

    /// Blocks sampled at `step`: `start, start + step, ...` strictly below `end`
    pub fn sampled_blocks(&self, step: Step) -> impl Iterator<Item = u64> {
        (self.start..self.end).step_by(usize::try_from(step.as_u64()).unwrap_or(usize::MAX))
    }
}

impl std::fmt::Display for BlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_short_range_is_one() {
        let range = BlockRange::new(0, 150).unwrap();
        assert_eq!(range.step(PointCount::new(200)), Step::ONE);
        assert_eq!(range.sampled_blocks(Step::ONE).count(), 150);
    }

    #[test]
    fn test_step_floors() {
        let range = BlockRange::new(100, 1_099).unwrap();
        assert_eq!(range.step(PointCount::new(200)).as_u64(), 4);
    }

    #[test]
    fn test_sampled_blocks_exclude_end() {
        let range = BlockRange::new(10, 20).unwrap();
        let step = range.step(PointCount::new(2));
        assert_eq!(step.as_u64(), 5);
        assert_eq!(range.sampled_blocks(step).collect::<Vec<_>>(), vec![10, 15]);
    }

    #[test]
    fn test_single_point_over_whole_chain() {
        let range = BlockRange::new(0, u64::MAX).unwrap();
        let step = range.step(PointCount::new(1));
        assert_eq!(step.as_u64(), u64::MAX);
        assert_eq!(range.sampled_blocks(step).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(matches!(
            BlockRange::new(10, 9),
            Err(SamplerError::InvalidRange { start: 10, end: 9 })
        ));
        assert!(BlockRange::new(0, 0).is_err());
    }

    #[test]
    fn test_point_count_zero_clamped() {
        assert_eq!(PointCount::new(0).as_u64(), 1);
        assert_eq!(PointCount::default(), PointCount::DEFAULT);
    }
}
