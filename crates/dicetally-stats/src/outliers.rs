use arrayvec::ArrayVec;
use dicetally_core::DiceSum;
use serde::Serialize;

use crate::distribution::SumDistribution;

/// Number of entries in the hot and cold rankings.
pub const RANKING_LEN: usize = 3;

/// How often one sum was rolled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberFrequency {
    pub sum: DiceSum,
    pub count: usize,
    /// Share of all rolls, in percent.
    pub percentage: f64,
}

/// Most and least frequently rolled sums.
///
/// Only sums that were rolled at least once take part. Ties are always
/// resolved in favor of the lower sum, for the single picks as well as
/// within the rankings.
///
/// # Example
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::{
///     distribution::{DistributionMode, SumDistribution},
///     outliers::Outliers,
/// };
///
/// let rolls = [(3, 4), (4, 3), (2, 4), (1, 1)]
///     .map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
/// let dist = SumDistribution::build(&rolls, DistributionMode::Simple);
/// let outliers = Outliers::from_distribution(&dist).unwrap();
///
/// assert_eq!(outliers.hot_number.sum.value(), 7);
/// assert_eq!(outliers.cold_number.sum.value(), 2); // 2 and 6 tie, lower wins
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outliers {
    /// The most frequent sum.
    pub hot_number: NumberFrequency,
    /// The least frequent sum.
    pub cold_number: NumberFrequency,
    /// Up to three most frequent sums, by descending count.
    pub hot_numbers: ArrayVec<NumberFrequency, RANKING_LEN>,
    /// Up to three least frequent sums, by ascending count.
    pub cold_numbers: ArrayVec<NumberFrequency, RANKING_LEN>,
}

impl Outliers {
    /// Ranks the sums of a distribution.
    ///
    /// By-category distributions are collapsed to one bucket per sum first.
    ///
    /// # Returns
    ///
    /// * `Some(Outliers)` - if at least one roll was counted
    /// * `None` - if the distribution is empty
    #[must_use]
    pub fn from_distribution(distribution: &SumDistribution) -> Option<Self> {
        let simple = distribution.to_simple();
        // Entries come in ascending sum order; the stable sorts below keep
        // that order among equal counts.
        let frequencies = simple
            .entries()
            .iter()
            .map(|e| NumberFrequency {
                sum: e.sum,
                count: e.count,
                percentage: e.percentage,
            })
            .collect::<Vec<_>>();

        let mut by_count_desc = frequencies.clone();
        by_count_desc.sort_by(|a, b| b.count.cmp(&a.count));
        let mut by_count_asc = frequencies;
        by_count_asc.sort_by_key(|f| f.count);

        let hot_number = *by_count_desc.first()?;
        let cold_number = *by_count_asc.first()?;
        Some(Self {
            hot_number,
            cold_number,
            hot_numbers: by_count_desc.into_iter().take(RANKING_LEN).collect(),
            cold_numbers: by_count_asc.into_iter().take(RANKING_LEN).collect(),
        })
    }
}
