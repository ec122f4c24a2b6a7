/// Descriptive statistics summarizing a dataset.
///
/// Holds the usual measures of central tendency and spread for a dataset of
/// `f64` values, such as the gaps between consecutive rolls.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median; the mean of the two middle values for even-sized datasets.
    pub median: f64,
    /// The population variance.
    pub variance: f64,
    /// The population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use dicetally_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 4.0);
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 2.5);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let mid = sorted_values.len() / 2;
        let median = if sorted_values.len() % 2 == 0 {
            f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
        } else {
            sorted_values[mid]
        };
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}
