use dicetally_core::{DiceSum, GameLog, RollRecord};
use serde::Serialize;

use crate::{
    distribution::{DistributionMode, SumDistribution},
    expected,
    fairness::FairnessReport,
    outliers::Outliers,
    streak::{self, StreakResult},
    timing::{self, TimingStats},
};

/// Every statistic derived from one roll snapshot.
///
/// All parts are computed from the same slice, so they are always mutually
/// consistent. Parts that need more data than available are `None`.
///
/// # Examples
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::{distribution::DistributionMode, summary::RollStatistics};
///
/// let rolls = [(1, 1, 0), (3, 4, 2_000), (4, 3, 5_000)]
///     .map(|(r, y, t)| RollRecord::new(r, y, None, t).unwrap());
/// let stats = RollStatistics::compute(&rolls, DistributionMode::Simple);
///
/// assert_eq!(stats.total_rolls, 3);
/// assert_eq!(stats.outliers.unwrap().hot_number.sum.value(), 7);
/// assert_eq!(stats.longest_streak.unwrap().length, 2);
/// assert_eq!(stats.mean_inter_roll_ms, Some(2_500.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollStatistics {
    pub total_rolls: usize,
    /// Sum of every roll's dice sum.
    pub total_pip_sum: u64,
    pub distribution: SumDistribution,
    /// Expected count per sum for `total_rolls` fair rolls.
    pub expected_weights: [f64; DiceSum::COUNT],
    pub fairness: Option<FairnessReport>,
    pub outliers: Option<Outliers>,
    pub longest_streak: Option<StreakResult>,
    pub mean_inter_roll_ms: Option<f64>,
    pub timing: Option<TimingStats>,
}

impl RollStatistics {
    /// Computes all statistics over `rolls`, which must be in chronological order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute(rolls: &[RollRecord], mode: DistributionMode) -> Self {
        let distribution = SumDistribution::build(rolls, mode);
        let stats = Self {
            total_rolls: rolls.len(),
            total_pip_sum: rolls.iter().map(|r| u64::from(r.sum().value())).sum(),
            expected_weights: expected::expected_weights(rolls.len() as f64),
            fairness: FairnessReport::from_distribution(&distribution),
            outliers: Outliers::from_distribution(&distribution),
            longest_streak: streak::longest_streak(rolls),
            mean_inter_roll_ms: timing::mean_inter_roll_time(rolls),
            timing: TimingStats::from_rolls(rolls),
            distribution,
        };
        tracing::debug!(
            rolls = stats.total_rolls,
            buckets = stats.distribution.entries().len(),
            "computed roll statistics"
        );
        stats
    }

    /// Computes statistics for a game, grouping by event die when the game uses one.
    #[must_use]
    pub fn for_game(log: &GameLog) -> Self {
        let mode = DistributionMode::for_event_die(log.game().event_die_enabled());
        Self::compute(log.rolls(), mode)
    }
}

#[cfg(test)]
mod tests {
    use dicetally_core::{EventDie, Game};

    use super::*;

    fn rolls_from_sums(sums: &[u8]) -> Vec<RollRecord> {
        sums.iter()
            .zip(0..)
            .map(|(&sum, i)| {
                let red = if sum > 7 { 6 } else { 1 };
                RollRecord::new(red, sum - red, None, i * 1_000).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let rolls = rolls_from_sums(&[2, 7, 7, 7, 7, 7, 7, 7, 7, 7, 12]);
        let stats = RollStatistics::compute(&rolls, DistributionMode::Simple);

        let counts = stats
            .distribution
            .entries()
            .iter()
            .map(|e| (e.sum.value(), e.count))
            .collect::<Vec<_>>();
        assert_eq!(counts, [(2, 1), (7, 9), (12, 1)]);

        let outliers = stats.outliers.as_ref().unwrap();
        assert_eq!(outliers.hot_number.sum.value(), 7);
        assert_eq!(outliers.hot_number.count, 9);
        assert!((outliers.hot_number.percentage - 81.818_181_818).abs() < 1e-6);
        assert_eq!(outliers.cold_number.sum.value(), 2);

        let streak = stats.longest_streak.unwrap();
        assert_eq!(streak.sum.value(), 7);
        assert_eq!(streak.length, 8);

        assert_eq!(stats.total_pip_sum, 2 + 7 * 9 + 12);
        assert_eq!(stats.mean_inter_roll_ms, Some(1_000.0));
    }

    #[test]
    fn test_empty_snapshot() {
        let stats = RollStatistics::compute(&[], DistributionMode::ByCategory);
        assert_eq!(stats.total_rolls, 0);
        assert!(stats.distribution.is_empty());
        assert_eq!(stats.expected_weights, [0.0; DiceSum::COUNT]);
        assert_eq!(stats.fairness, None);
        assert_eq!(stats.outliers, None);
        assert_eq!(stats.longest_streak, None);
        assert_eq!(stats.mean_inter_roll_ms, None);
        assert_eq!(stats.timing, None);
    }

    #[test]
    fn test_for_game_picks_mode() {
        let game = Game::new("g", "n", ["a", "b"], true, 0).unwrap();
        let rolls = [
            RollRecord::new(2, 2, Some(EventDie::Science), 10).unwrap(),
            RollRecord::new(2, 2, None, 20).unwrap(),
        ];
        let log = GameLog::from_parts(game, rolls).unwrap();
        let stats = RollStatistics::for_game(&log);
        assert!(stats.distribution.mode().is_by_category());
        assert_eq!(stats.distribution.entries().len(), 2);
    }

    #[test]
    fn test_for_game_with_extreme_timestamps() {
        let game = Game::new("g", "n", ["a", "b"], false, i64::MIN).unwrap();
        let rolls = [
            RollRecord::new(3, 4, None, i64::MAX).unwrap(),
            RollRecord::new(1, 1, None, -1_000).unwrap(),
        ];
        let log = GameLog::from_parts(game, rolls).unwrap();
        let stats = RollStatistics::for_game(&log);
        assert!(stats.mean_inter_roll_ms.unwrap() > 0.0);
        assert_eq!(
            stats.timing.unwrap().span_ms,
            i128::from(i64::MAX) + 1_000
        );
    }

    #[test]
    fn test_idempotent() {
        let rolls = rolls_from_sums(&[5, 9, 9, 3, 11, 5]);
        assert_eq!(
            RollStatistics::compute(&rolls, DistributionMode::Simple),
            RollStatistics::compute(&rolls, DistributionMode::Simple)
        );
    }

    #[test]
    fn test_serializes_to_json() {
        let rolls = rolls_from_sums(&[6, 8]);
        let stats = RollStatistics::compute(&rolls, DistributionMode::Simple);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_rolls"], 2);
        assert_eq!(json["distribution"]["mode"], "simple");
        assert_eq!(json["distribution"]["entries"][0]["sum"], 6);
        assert_eq!(json["longest_streak"]["length"], 1);
    }
}
