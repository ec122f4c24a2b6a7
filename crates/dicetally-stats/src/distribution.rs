use dicetally_core::{DiceSum, EventDie, RollRecord};
use serde::{Deserialize, Serialize};

/// Number of count partitions: the uncategorized partition plus one per event die outcome.
const PARTITIONS: usize = EventDie::LEN + 1;

/// How rolls are grouped into buckets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    /// One bucket per sum, ignoring the event die.
    #[default]
    Simple,
    /// One bucket per (sum, event die) pair. Rolls without an event die form
    /// their own partition.
    ByCategory,
}

impl DistributionMode {
    /// Picks the mode matching a game's event die setting.
    #[must_use]
    pub const fn for_event_die(event_die_enabled: bool) -> Self {
        if event_die_enabled {
            Self::ByCategory
        } else {
            Self::Simple
        }
    }
}

/// One bucket of a [`SumDistribution`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SumDistributionEntry {
    /// The dice sum of this bucket.
    pub sum: DiceSum,
    /// Event die partition; always `None` in [`DistributionMode::Simple`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventDie>,
    /// Number of rolls in the bucket (never zero).
    pub count: usize,
    /// `100 * count / total`, where `total` is the size of the entry's partition.
    pub percentage: f64,
}

/// Frequency distribution of roll sums.
///
/// Entries are ordered by ascending sum. In [`DistributionMode::ByCategory`],
/// entries sharing a sum are ordered uncategorized first, then by
/// [`EventDie`] declaration order. Sums that never occurred are omitted; the
/// dense accessors report them as zero.
///
/// # Example
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::distribution::{DistributionMode, SumDistribution};
///
/// let rolls = [(3, 4), (1, 6), (6, 6)]
///     .map(|(r, y)| RollRecord::new(r, y, None, 0).unwrap());
/// let dist = SumDistribution::build(&rolls, DistributionMode::Simple);
///
/// assert_eq!(dist.entries().len(), 2);
/// assert_eq!(dist.entries()[0].sum.value(), 7);
/// assert_eq!(dist.entries()[0].count, 2);
/// assert_eq!(dist.dense_counts()[10], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SumDistribution {
    mode: DistributionMode,
    entries: Vec<SumDistributionEntry>,
}

impl SumDistribution {
    /// Builds a distribution over a snapshot of rolls.
    #[must_use]
    pub fn build(rolls: &[RollRecord], mode: DistributionMode) -> Self {
        DistributionCounter::from_rolls(rolls).to_distribution(mode)
    }

    #[must_use]
    pub const fn mode(&self) -> DistributionMode {
        self.mode
    }

    #[must_use]
    pub fn entries(&self) -> &[SumDistributionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rolls across all partitions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Number of rolls in one partition.
    ///
    /// In simple mode every entry belongs to the `None` partition.
    #[must_use]
    pub fn partition_total(&self, category: Option<EventDie>) -> usize {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.count)
            .sum()
    }

    /// Counts per sum over all partitions; index `i` is sum `i + 2`.
    #[must_use]
    pub fn dense_counts(&self) -> [usize; DiceSum::COUNT] {
        let mut counts = [0; DiceSum::COUNT];
        for entry in &self.entries {
            counts[entry.sum.index()] += entry.count;
        }
        counts
    }

    /// Counts per sum for one partition; index `i` is sum `i + 2`.
    #[must_use]
    pub fn dense_counts_for(&self, category: Option<EventDie>) -> [usize; DiceSum::COUNT] {
        let mut counts = [0; DiceSum::COUNT];
        for entry in self.entries.iter().filter(|e| e.category == category) {
            counts[entry.sum.index()] += entry.count;
        }
        counts
    }

    /// Collapses a by-category distribution into one bucket per sum.
    ///
    /// Simple distributions are returned unchanged.
    #[must_use]
    pub fn to_simple(&self) -> Self {
        match self.mode {
            DistributionMode::Simple => self.clone(),
            DistributionMode::ByCategory => {
                let mut counter = DistributionCounter::new();
                for entry in &self.entries {
                    counter.counts[0][entry.sum.index()] += entry.count;
                }
                counter.to_distribution(DistributionMode::Simple)
            }
        }
    }
}

/// Running roll counters that can be updated as the log changes.
///
/// Appending with [`DistributionCounter::push`] or undoing with
/// [`DistributionCounter::remove`] keeps the counters equal to a fresh count
/// over the current roll sequence, so [`DistributionCounter::to_distribution`]
/// always matches [`SumDistribution::build`].
///
/// # Example
///
/// ```
/// use dicetally_core::RollRecord;
/// use dicetally_stats::distribution::{DistributionCounter, DistributionMode, SumDistribution};
///
/// let mut rolls = vec![RollRecord::new(1, 2, None, 0).unwrap()];
/// let mut counter = DistributionCounter::from_rolls(&rolls);
///
/// let next = RollRecord::new(4, 4, None, 10).unwrap();
/// rolls.push(next);
/// counter.push(&next);
///
/// assert_eq!(
///     counter.to_distribution(DistributionMode::Simple),
///     SumDistribution::build(&rolls, DistributionMode::Simple),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionCounter {
    counts: [[usize; DiceSum::COUNT]; PARTITIONS],
}

fn partition_index(category: Option<EventDie>) -> usize {
    category.map_or(0, |die| die.as_usize() + 1)
}

fn partition_category(index: usize) -> Option<EventDie> {
    index.checked_sub(1).map(|i| EventDie::ALL[i])
}

#[expect(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    debug_assert!(total > 0, "percentage of an empty partition");
    100.0 * count as f64 / total as f64
}

impl DistributionCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rolls(rolls: &[RollRecord]) -> Self {
        let mut counter = Self::new();
        counter.extend(rolls);
        counter
    }

    /// Counts one more roll.
    pub fn push(&mut self, roll: &RollRecord) {
        let sum = roll.sum();
        debug_assert!(DiceSum::new(sum.value()).is_some(), "sum out of range");
        self.counts[partition_index(roll.event_die())][sum.index()] += 1;
    }

    /// Uncounts a roll that was deleted or is about to be corrected.
    ///
    /// Returns `false` and leaves the counters unchanged if no such roll was counted.
    pub fn remove(&mut self, roll: &RollRecord) -> bool {
        let slot = &mut self.counts[partition_index(roll.event_die())][roll.sum().index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Number of counted rolls.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    #[must_use]
    pub fn to_distribution(&self, mode: DistributionMode) -> SumDistribution {
        let mut entries = Vec::new();
        match mode {
            DistributionMode::Simple => {
                let total = self.total();
                for sum in DiceSum::all() {
                    let count = self.counts.iter().map(|p| p[sum.index()]).sum::<usize>();
                    if count > 0 {
                        entries.push(SumDistributionEntry {
                            sum,
                            category: None,
                            count,
                            percentage: percentage(count, total),
                        });
                    }
                }
            }
            DistributionMode::ByCategory => {
                let totals = self.counts.map(|p| p.iter().sum::<usize>());
                for sum in DiceSum::all() {
                    for (partition, counts) in self.counts.iter().enumerate() {
                        let count = counts[sum.index()];
                        if count > 0 {
                            entries.push(SumDistributionEntry {
                                sum,
                                category: partition_category(partition),
                                count,
                                percentage: percentage(count, totals[partition]),
                            });
                        }
                    }
                }
            }
        }
        SumDistribution { mode, entries }
    }
}

impl<'a> Extend<&'a RollRecord> for DistributionCounter {
    fn extend<T: IntoIterator<Item = &'a RollRecord>>(&mut self, iter: T) {
        for roll in iter {
            self.push(roll);
        }
    }
}
