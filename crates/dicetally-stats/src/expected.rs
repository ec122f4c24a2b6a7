//! Theoretical sum distribution of two fair six-sided dice.

use dicetally_core::DiceSum;

/// Number of die combinations producing each sum, indexed by [`DiceSum::index`].
pub const SUM_COMBINATIONS: [u32; DiceSum::COUNT] = [1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];

/// Total number of combinations of two six-sided dice.
pub const TOTAL_COMBINATIONS: u32 = 36;

/// Probability of rolling `sum` with two fair dice.
///
/// # Examples
///
/// ```
/// use dicetally_core::DiceSum;
/// use dicetally_stats::expected::probability;
///
/// let seven = DiceSum::new(7).unwrap();
/// assert_eq!(probability(seven), 6.0 / 36.0);
/// ```
#[must_use]
pub fn probability(sum: DiceSum) -> f64 {
    f64::from(SUM_COMBINATIONS[sum.index()]) / f64::from(TOTAL_COMBINATIONS)
}

/// Expected count of each sum after `total` fair rolls.
///
/// Index `i` holds the weight of sum `i + 2`. The weights sum to `total`.
///
/// # Examples
///
/// ```
/// use dicetally_stats::expected::expected_weights;
///
/// let weights = expected_weights(36.0);
/// assert_eq!(weights[5], 6.0); // sum 7
/// assert_eq!(expected_weights(0.0), [0.0; 11]);
/// ```
#[must_use]
pub fn expected_weights(total: f64) -> [f64; DiceSum::COUNT] {
    SUM_COMBINATIONS.map(|ways| total * f64::from(ways) / f64::from(TOTAL_COMBINATIONS))
}
