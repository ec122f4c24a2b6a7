use dicetally_core::DiceSum;
use serde::Serialize;

use crate::{
    distribution::{DistributionMode, SumDistribution},
    expected,
};

/// Degrees of freedom of the goodness-of-fit test over 11 sums.
pub const DEGREES_OF_FREEDOM: usize = DiceSum::COUNT - 1;

/// Observed versus expected count for one sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairnessBucket {
    pub sum: DiceSum,
    pub observed: usize,
    pub expected: f64,
    /// `observed - expected`.
    pub deviation: f64,
}

/// Comparison of observed sums against two fair dice.
///
/// A simple distribution is compared as a whole. A by-category distribution
/// is compared over its categorized rolls only, leaving out rolls stored
/// without an event die. The chi-square
/// statistic is informational; nothing in the engine treats it as a pass or
/// fail signal.
///
/// # Example
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::{
///     distribution::{DistributionMode, SumDistribution},
///     fairness::FairnessReport,
/// };
///
/// let rolls = [(1, 6), (6, 6)].map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
/// let dist = SumDistribution::build(&rolls, DistributionMode::Simple);
/// let report = FairnessReport::from_distribution(&dist).unwrap();
///
/// assert_eq!(report.total, 2);
/// assert_eq!(report.buckets[5].observed, 1); // sum 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FairnessReport {
    pub total: usize,
    /// One bucket per sum, index `i` is sum `i + 2`.
    pub buckets: [FairnessBucket; DiceSum::COUNT],
    /// Pearson's chi-square statistic, `sum((observed - expected)^2 / expected)`.
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
}

impl FairnessReport {
    /// Returns `None` when there are no rolls to compare.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_distribution(distribution: &SumDistribution) -> Option<Self> {
        let (total, observed) = compared_counts(distribution);
        if total == 0 {
            return None;
        }
        let expected = expected::expected_weights(total as f64);

        let buckets: [FairnessBucket; DiceSum::COUNT] = std::array::from_fn(|i| {
            let observed = observed[i];
            FairnessBucket {
                sum: DiceSum::ALL[i],
                observed,
                expected: expected[i],
                deviation: observed as f64 - expected[i],
            }
        });
        let chi_square = buckets
            .iter()
            .map(|b| b.deviation.powi(2) / b.expected)
            .sum::<f64>();

        Some(Self {
            total,
            buckets,
            chi_square,
            degrees_of_freedom: DEGREES_OF_FREEDOM,
        })
    }

    /// The bucket whose observed count strays furthest from expectation.
    ///
    /// Ties go to the lower sum.
    #[must_use]
    pub fn largest_deviation(&self) -> &FairnessBucket {
        self.buckets
            .iter()
            .reduce(|best, b| {
                if b.deviation.abs() > best.deviation.abs() {
                    b
                } else {
                    best
                }
            })
            .unwrap_or(&self.buckets[0])
    }
}

fn compared_counts(distribution: &SumDistribution) -> (usize, [usize; DiceSum::COUNT]) {
    match distribution.mode() {
        DistributionMode::Simple => (distribution.total(), distribution.dense_counts()),
        DistributionMode::ByCategory => {
            let uncategorized = distribution.dense_counts_for(None);
            let mut counts = distribution.dense_counts();
            for (count, skipped) in counts.iter_mut().zip(uncategorized) {
                *count -= skipped;
            }
            (counts.iter().sum(), counts)
        }
    }
}
