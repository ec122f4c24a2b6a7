//! Time between consecutive rolls.
//!
//! Inputs are expected in chronological order. Out-of-order timestamps are
//! not corrected; they show up as negative gaps.

use dicetally_core::RollRecord;
use serde::Serialize;

use crate::descriptive::DescriptiveStats;

/// Mean time between consecutive rolls, in milliseconds.
///
/// Returns `None` when fewer than two rolls are given.
///
/// # Examples
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::timing::mean_inter_roll_time;
///
/// let rolls = [1_000, 3_000, 6_000].map(|t| RollRecord::new(1, 1, None, t).unwrap());
/// assert_eq!(mean_inter_roll_time(&rolls), Some(2_500.0));
/// assert_eq!(mean_inter_roll_time(&rolls[..1]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_inter_roll_time(rolls: &[RollRecord]) -> Option<f64> {
    if rolls.len() < 2 {
        return None;
    }
    // The gaps telescope to last - first.
    let total = span(rolls.first()?, rolls.last()?);
    Some(total as f64 / (rolls.len() - 1) as f64)
}

/// Widened so that any pair of `i64` timestamps has a representable gap.
fn span(first: &RollRecord, last: &RollRecord) -> i128 {
    i128::from(last.timestamp()) - i128::from(first.timestamp())
}

#[expect(clippy::cast_precision_loss)]
fn intervals(rolls: &[RollRecord]) -> impl Iterator<Item = f64> + '_ {
    rolls
        .windows(2)
        .map(|pair| span(&pair[0], &pair[1]) as f64)
}

/// Summary of the gaps between consecutive rolls.
///
/// # Example
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::timing::TimingStats;
///
/// let rolls = [0, 10_000, 40_000, 50_000].map(|t| RollRecord::new(2, 3, None, t).unwrap());
/// let timing = TimingStats::from_rolls(&rolls).unwrap();
///
/// assert_eq!(timing.interval_count, 3);
/// assert_eq!(timing.span_ms, 50_000);
/// assert_eq!(timing.intervals.min, 10_000.0);
/// assert_eq!(timing.intervals.max, 30_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingStats {
    /// Number of gaps (rolls minus one).
    pub interval_count: usize,
    /// Time from the first to the last roll, in milliseconds.
    pub span_ms: i128,
    /// Statistics over the gaps, in milliseconds.
    pub intervals: DescriptiveStats,
}

impl TimingStats {
    /// Returns `None` when fewer than two rolls are given.
    #[must_use]
    pub fn from_rolls(rolls: &[RollRecord]) -> Option<Self> {
        let (first, last) = (rolls.first()?, rolls.last()?);
        let intervals = DescriptiveStats::new(intervals(rolls))?;
        Some(Self {
            interval_count: rolls.len() - 1,
            span_ms: span(first, last),
            intervals,
        })
    }

    /// Mean gap in milliseconds; equal to [`mean_inter_roll_time`].
    #[must_use]
    pub const fn mean_ms(&self) -> f64 {
        self.intervals.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls_at(timestamps: &[i64]) -> Vec<RollRecord> {
        timestamps
            .iter()
            .map(|&t| RollRecord::new(3, 3, None, t).unwrap())
            .collect()
    }

    #[test]
    fn test_mean_of_deltas() {
        let rolls = rolls_at(&[1_000, 3_000, 6_000]);
        assert_eq!(mean_inter_roll_time(&rolls), Some(2_500.0));
    }

    #[test]
    fn test_insufficient_rolls() {
        assert_eq!(mean_inter_roll_time(&[]), None);
        assert_eq!(mean_inter_roll_time(&rolls_at(&[5])), None);
        assert_eq!(TimingStats::from_rolls(&[]), None);
        assert_eq!(TimingStats::from_rolls(&rolls_at(&[5])), None);
    }

    #[test]
    fn test_equal_timestamps_give_zero() {
        let rolls = rolls_at(&[7, 7, 7]);
        assert_eq!(mean_inter_roll_time(&rolls), Some(0.0));
    }

    #[test]
    fn test_timing_stats_agree_with_mean() {
        let rolls = rolls_at(&[0, 1_500, 2_000, 9_000, 9_100]);
        let timing = TimingStats::from_rolls(&rolls).unwrap();
        let mean = mean_inter_roll_time(&rolls).unwrap();
        assert!((timing.mean_ms() - mean).abs() < 1e-9);
        assert_eq!(timing.interval_count, 4);
        assert_eq!(timing.span_ms, 9_100);
        // gaps: 1500, 500, 7000, 100
        assert!((timing.intervals.median - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_order_input_is_not_corrected() {
        let rolls = rolls_at(&[5_000, 1_000]);
        assert_eq!(mean_inter_roll_time(&rolls), Some(-4_000.0));
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_extreme_timestamps_do_not_overflow() {
        let rolls = rolls_at(&[-1_000, i64::MAX]);
        let expected = i64::MAX as f64 + 1_000.0;

        let mean = mean_inter_roll_time(&rolls).unwrap();
        assert!((mean - expected).abs() / expected < 1e-12);

        let timing = TimingStats::from_rolls(&rolls).unwrap();
        assert_eq!(timing.span_ms, i128::from(i64::MAX) + 1_000);
        assert!((timing.intervals.max - expected).abs() / expected < 1e-12);

        let rolls = rolls_at(&[i64::MIN, 0, i64::MAX]);
        let timing = TimingStats::from_rolls(&rolls).unwrap();
        assert_eq!(timing.span_ms, i128::from(i64::MAX) - i128::from(i64::MIN));
        assert!(timing.mean_ms() > 0.0);
    }
}
