use std::{fmt, str::FromStr, time::Duration};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_distr::Exp;
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{DIE_FACES, EventDie, GeneratorError, ParseRollSeedError, RollRecord};

/// Generates fair synthetic rolls with realistic spacing.
///
/// Both numeric dice are uniform over `1..=6`. When the event die is enabled
/// it follows the physical die, whose six faces are three pirate ships plus
/// one face each for politics, science and trade. The gap between two rolls
/// is drawn from an exponential distribution with the configured mean.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use dicetally_core::{RollGenerator, RollSeed};
///
/// let seed: RollSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = RollGenerator::with_seed(seed, false, 0, Duration::from_secs(30)).unwrap();
/// let mut b = RollGenerator::with_seed(seed, false, 0, Duration::from_secs(30)).unwrap();
///
/// // Same seed, same rolls
/// assert_eq!(a.next_roll(), b.next_roll());
/// ```
#[derive(Debug, Clone)]
pub struct RollGenerator {
    rng: Pcg32,
    event_die: bool,
    delay: Exp<f64>,
    clock: i64,
}

/// Seed for deterministic roll generation.
///
/// A 128-bit value serialized as a 32-character hex string, so a generated
/// roll log can name the seed that reproduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSeed([u8; 16]);

impl fmt::Display for RollSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for RollSeed {
    type Err = ParseRollSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseRollSeedError::Length { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseRollSeedError::NotHex {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for RollSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RollSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<RollSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RollSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RollSeed(seed)
    }
}

impl RollGenerator {
    /// Creates a generator with a random seed.
    ///
    /// `start_time` is the clock (milliseconds since epoch) before the first
    /// roll.
    pub fn new(
        event_die: bool,
        start_time: i64,
        mean_delay: Duration,
    ) -> Result<Self, GeneratorError> {
        Self::with_seed(rand::rng().random(), event_die, start_time, mean_delay)
    }

    /// Like [`Self::new`], but with a specific seed for reproducible output.
    pub fn with_seed(
        seed: RollSeed,
        event_die: bool,
        start_time: i64,
        mean_delay: Duration,
    ) -> Result<Self, GeneratorError> {
        let mean_ms = mean_delay.as_secs_f64() * 1000.0;
        if mean_ms <= 0.0 {
            return Err(GeneratorError::ZeroMeanDelay);
        }
        let delay = Exp::new(1.0 / mean_ms).map_err(|_| GeneratorError::ZeroMeanDelay)?;
        Ok(Self {
            rng: Pcg32::from_seed(seed.0),
            event_die,
            delay,
            clock: start_time,
        })
    }

    /// Advances the clock and rolls the dice.
    #[expect(clippy::cast_possible_truncation)]
    pub fn next_roll(&mut self) -> RollRecord {
        let gap = self.delay.sample(&mut self.rng).round() as i64;
        self.clock = self.clock.saturating_add(gap);

        let red = self.rng.random_range(1..=DIE_FACES);
        let yellow = self.rng.random_range(1..=DIE_FACES);
        let event_die = self.event_die.then(|| match self.rng.random_range(0..6) {
            0 => EventDie::Politics,
            1 => EventDie::Science,
            2 => EventDie::Trade,
            _ => EventDie::Pirates,
        });
        RollRecord::from_valid(red, yellow, event_die, self.clock)
    }
}

impl Iterator for RollGenerator {
    type Item = RollRecord;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_roll())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(event_die: bool) -> RollGenerator {
        let seed = RollSeed([7; 16]);
        RollGenerator::with_seed(seed, event_die, 1_000, Duration::from_secs(20)).unwrap()
    }

    #[test]
    fn test_rolls_are_valid_and_ordered() {
        let rolls = generator(false).take(500).collect::<Vec<_>>();
        assert!(rolls.is_sorted_by_key(RollRecord::timestamp));
        assert!(rolls.iter().all(|r| r.event_die().is_none()));
        assert!(rolls.iter().all(|r| r.timestamp() >= 1_000));
        for r in &rolls {
            assert!((1..=6).contains(&r.red_die()));
            assert!((1..=6).contains(&r.yellow_die()));
        }
    }

    #[test]
    fn test_event_die_favors_pirates() {
        let rolls = generator(true).take(6_000).collect::<Vec<_>>();
        let pirates = rolls
            .iter()
            .filter(|r| r.event_die() == Some(EventDie::Pirates))
            .count();
        assert!(rolls.iter().all(|r| r.event_die().is_some()));
        // Expected 3000 of 6000.
        assert!((2_600..3_400).contains(&pirates), "pirates = {pirates}");
    }

    #[test]
    fn test_zero_mean_delay_is_rejected() {
        let result = RollGenerator::with_seed(RollSeed([0; 16]), false, 0, Duration::ZERO);
        assert!(matches!(result, Err(GeneratorError::ZeroMeanDelay)));
    }

    #[test]
    fn test_seed_hex_format() {
        let seed = RollSeed([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        assert_eq!(serde_json::from_str::<RollSeed>(&serialized).unwrap(), seed);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert_eq!(
            "abc".parse::<RollSeed>(),
            Err(ParseRollSeedError::Length { len: 3 })
        );
        assert!(matches!(
            "zz23456789abcdeffedcba9876543210".parse::<RollSeed>(),
            Err(ParseRollSeedError::NotHex { .. })
        ));
        assert!("0123456789ABCDEFFEDCBA9876543210".parse::<RollSeed>().is_ok());
    }
}
