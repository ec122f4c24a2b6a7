use dicetally_core::{DiceSum, RollRecord};
use serde::Serialize;

/// The longest run of consecutive rolls with the same sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub sum: DiceSum,
    /// Number of rolls in the run (at least 1).
    pub length: usize,
    /// Position of the run's first roll in the input sequence.
    pub start_index: usize,
}

/// Finds the longest run of immediately consecutive rolls sharing a sum.
///
/// `rolls` must be in chronological order; adjacency is by position, not by
/// time proximity. When several runs share the maximum length, the earliest
/// one wins.
///
/// # Returns
///
/// * `Some(StreakResult)` - for non-empty input
/// * `None` - if `rolls` is empty
///
/// # Examples
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::streak::longest_streak;
///
/// let rolls = [(2, 2), (1, 3), (3, 1), (3, 3), (2, 2)]
///     .map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
/// let streak = longest_streak(&rolls).unwrap();
///
/// assert_eq!(streak.sum.value(), 4);
/// assert_eq!(streak.length, 3);
/// assert_eq!(streak.start_index, 0);
/// ```
#[must_use]
pub fn longest_streak(rolls: &[RollRecord]) -> Option<StreakResult> {
    let mut best: Option<StreakResult> = None;
    let mut start_index = 0;
    for run in rolls.chunk_by(|a, b| a.sum() == b.sum()) {
        if best.is_none_or(|b| run.len() > b.length) {
            best = Some(StreakResult {
                sum: run[0].sum(),
                length: run.len(),
                start_index,
            });
        }
        start_index += run.len();
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls_from_sums(sums: &[u8]) -> Vec<RollRecord> {
        sums.iter()
            .enumerate()
            .map(|(i, &sum)| {
                let red = if sum > 7 { 6 } else { 1 };
                RollRecord::new(red, sum - red, None, i64::try_from(i).unwrap() * 1_000).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(longest_streak(&[]), None);
    }

    #[test]
    fn test_single_roll() {
        let streak = longest_streak(&rolls_from_sums(&[9])).unwrap();
        assert_eq!(streak.sum.value(), 9);
        assert_eq!(streak.length, 1);
        assert_eq!(streak.start_index, 0);
    }

    #[test]
    fn test_run_of_fours() {
        let streak = longest_streak(&rolls_from_sums(&[4, 4, 4, 6, 4])).unwrap();
        assert_eq!(streak.sum.value(), 4);
        assert_eq!(streak.length, 3);
    }

    #[test]
    fn test_tie_prefers_earliest_run() {
        let streak = longest_streak(&rolls_from_sums(&[3, 8, 8, 5, 11, 11, 8, 8])).unwrap();
        assert_eq!(streak.sum.value(), 8);
        assert_eq!(streak.length, 2);
        assert_eq!(streak.start_index, 1);
    }

    #[test]
    fn test_late_longer_run_wins() {
        let streak = longest_streak(&rolls_from_sums(&[6, 6, 2, 12, 12, 12])).unwrap();
        assert_eq!(streak.sum.value(), 12);
        assert_eq!(streak.length, 3);
        assert_eq!(streak.start_index, 3);
    }

    #[test]
    fn test_same_sum_different_dice_is_one_run() {
        let rolls = [(1, 6), (2, 5), (3, 4), (6, 1)]
            .map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
        assert_eq!(longest_streak(&rolls).unwrap().length, 4);
    }
}
