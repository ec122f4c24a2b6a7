use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{InvalidRollError, InvalidSumError, ParseEventDieError};

/// Number of faces on each of the two numeric dice.
pub const DIE_FACES: u8 = 6;

/// Sum of the red and yellow dice, always in `2..=12`.
///
/// The sum doubles as a bucket key: [`DiceSum::index`] maps `2..=12` onto the
/// dense range `0..=10` used by every per-sum array in the workspace.
///
/// # Example
///
/// ```
/// use dicetally_core::DiceSum;
///
/// let seven = DiceSum::new(7).unwrap();
/// assert_eq!(seven.index(), 5);
/// assert_eq!(DiceSum::from_index(5), Some(seven));
/// assert_eq!(DiceSum::new(13), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceSum(u8);

impl DiceSum {
    /// Smallest possible sum (snake eyes).
    pub const MIN: Self = Self(2);
    /// Largest possible sum.
    pub const MAX: Self = Self(12);
    /// Number of distinct sums (11).
    pub const COUNT: usize = 11;
    /// Every sum in ascending order.
    pub const ALL: [Self; Self::COUNT] = [
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
        Self(10),
        Self(11),
        Self(12),
    ];

    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the dense bucket index (`0` for sum 2, `10` for sum 12).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - Self::MIN.0) as usize
    }

    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8 + Self::MIN.0))
        } else {
            None
        }
    }

    /// Iterates over every sum in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<u8> for DiceSum {
    type Error = InvalidSumError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidSumError { value })
    }
}

impl From<DiceSum> for u8 {
    fn from(sum: DiceSum) -> Self {
        sum.0
    }
}

/// Outcome of the categorical event die.
///
/// The physical die has six faces: three pirate ships and one face each for
/// politics, science and trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum EventDie {
    Politics = 0,
    Science = 1,
    Trade = 2,
    Pirates = 3,
}

impl EventDie {
    /// Number of event die outcomes (4).
    pub const LEN: usize = 4;

    /// All outcomes in declaration order, which is also their sort order.
    pub const ALL: [Self; Self::LEN] = [Self::Politics, Self::Science, Self::Trade, Self::Pirates];

    /// Returns the canonical upper-case name (`"POLITICS"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Politics => "POLITICS",
            Self::Science => "SCIENCE",
            Self::Trade => "TRADE",
            Self::Pirates => "PIRATES",
        }
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the canonical names, ignoring ASCII case.
///
/// Legacy aliases are not accepted here; they belong to whoever reads old
/// stored data.
impl FromStr for EventDie {
    type Err = ParseEventDieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|die| die.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEventDieError {
                input: s.to_owned(),
            })
    }
}

/// A single observed roll.
///
/// Holds the two numeric dice, the optional event die and the time the roll
/// was confirmed (milliseconds since the Unix epoch). Records are immutable;
/// corrections produce a new record.
///
/// # Example
///
/// ```
/// use dicetally_core::{EventDie, RollRecord};
///
/// let roll = RollRecord::new(3, 4, Some(EventDie::Trade), 1_000).unwrap();
/// assert_eq!(roll.sum().value(), 7);
/// assert!(RollRecord::new(0, 4, None, 1_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRollRecord")]
pub struct RollRecord {
    red_die: u8,
    yellow_die: u8,
    event_die: Option<EventDie>,
    timestamp: i64,
}

#[derive(Deserialize)]
struct RawRollRecord {
    red_die: u8,
    yellow_die: u8,
    #[serde(default)]
    event_die: Option<EventDie>,
    timestamp: i64,
}

impl TryFrom<RawRollRecord> for RollRecord {
    type Error = InvalidRollError;

    fn try_from(raw: RawRollRecord) -> Result<Self, Self::Error> {
        Self::new(raw.red_die, raw.yellow_die, raw.event_die, raw.timestamp)
    }
}

impl RollRecord {
    pub fn new(
        red_die: u8,
        yellow_die: u8,
        event_die: Option<EventDie>,
        timestamp: i64,
    ) -> Result<Self, InvalidRollError> {
        if !(1..=DIE_FACES).contains(&red_die) {
            return Err(InvalidRollError::RedDieOutOfRange { value: red_die });
        }
        if !(1..=DIE_FACES).contains(&yellow_die) {
            return Err(InvalidRollError::YellowDieOutOfRange { value: yellow_die });
        }
        Ok(Self {
            red_die,
            yellow_die,
            event_die,
            timestamp,
        })
    }

    /// Builds a record from values already known to be in range.
    pub(crate) const fn from_valid(
        red_die: u8,
        yellow_die: u8,
        event_die: Option<EventDie>,
        timestamp: i64,
    ) -> Self {
        debug_assert!(red_die >= 1 && red_die <= DIE_FACES);
        debug_assert!(yellow_die >= 1 && yellow_die <= DIE_FACES);
        Self {
            red_die,
            yellow_die,
            event_die,
            timestamp,
        }
    }

    #[must_use]
    pub const fn red_die(&self) -> u8 {
        self.red_die
    }

    #[must_use]
    pub const fn yellow_die(&self) -> u8 {
        self.yellow_die
    }

    #[must_use]
    pub const fn event_die(&self) -> Option<EventDie> {
        self.event_die
    }

    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub const fn sum(&self) -> DiceSum {
        DiceSum(self.red_die + self.yellow_die)
    }

    /// Returns a copy with corrected die values, keeping the timestamp.
    pub fn corrected(
        &self,
        red_die: u8,
        yellow_die: u8,
        event_die: Option<EventDie>,
    ) -> Result<Self, InvalidRollError> {
        Self::new(red_die, yellow_die, event_die, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_bounds() {
        assert_eq!(RollRecord::new(1, 1, None, 0).unwrap().sum(), DiceSum::MIN);
        assert_eq!(RollRecord::new(6, 6, None, 0).unwrap().sum(), DiceSum::MAX);
    }

    #[test]
    fn test_rejects_out_of_range_dice() {
        assert_eq!(
            RollRecord::new(7, 1, None, 0),
            Err(InvalidRollError::RedDieOutOfRange { value: 7 })
        );
        assert_eq!(
            RollRecord::new(1, 0, None, 0),
            Err(InvalidRollError::YellowDieOutOfRange { value: 0 })
        );
    }

    #[test]
    fn test_dice_sum_index_mapping() {
        let sums = DiceSum::all().collect::<Vec<_>>();
        assert_eq!(sums.len(), DiceSum::COUNT);
        for (i, sum) in sums.iter().enumerate() {
            assert_eq!(sum.index(), i);
            assert_eq!(DiceSum::from_index(i), Some(*sum));
        }
        assert_eq!(DiceSum::from_index(DiceSum::COUNT), None);
        assert_eq!(DiceSum::new(1), None);
    }

    #[test]
    fn test_event_die_from_str_ignores_case() {
        assert_eq!("pirates".parse::<EventDie>(), Ok(EventDie::Pirates));
        assert_eq!("Science".parse::<EventDie>(), Ok(EventDie::Science));
        assert!("BLUE".parse::<EventDie>().is_err());
    }

    #[test]
    fn test_correction_keeps_timestamp() {
        let roll = RollRecord::new(2, 3, None, 42).unwrap();
        let fixed = roll.corrected(6, 6, Some(EventDie::Trade)).unwrap();
        assert_eq!(fixed.timestamp(), 42);
        assert_eq!(fixed.sum().value(), 12);
        assert!(roll.corrected(9, 1, None).is_err());
    }

    #[test]
    fn test_json_field_names() {
        let roll = RollRecord::new(5, 2, Some(EventDie::Politics), 1_700).unwrap();
        let json = serde_json::to_string(&roll).unwrap();
        assert_eq!(
            json,
            r#"{"red_die":5,"yellow_die":2,"event_die":"POLITICS","timestamp":1700}"#
        );
    }

    #[test]
    fn test_deserialize_validates_dice() {
        let missing_event =
            serde_json::from_str::<RollRecord>(r#"{"red_die":1,"yellow_die":2,"timestamp":5}"#)
                .unwrap();
        assert_eq!(missing_event.event_die(), None);

        let bad = serde_json::from_str::<RollRecord>(
            r#"{"red_die":8,"yellow_die":2,"event_die":null,"timestamp":5}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_dice_sum_serializes_as_number() {
        let sum = DiceSum::new(9).unwrap();
        assert_eq!(serde_json::to_string(&sum).unwrap(), "9");
        assert!(serde_json::from_str::<DiceSum>("13").is_err());
    }
}
