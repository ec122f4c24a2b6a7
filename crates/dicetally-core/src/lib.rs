//! Roll records and game bookkeeping for dice statistics.
//!
//! This crate holds the data that the statistics engine consumes:
//!
//! - [`RollRecord`] - One confirmed roll (red die, yellow die, optional event die, timestamp)
//! - [`DiceSum`] - The red + yellow sum, used as the bucket key everywhere
//! - [`EventDie`] - The four-way categorical event die
//! - [`Game`] - Session metadata (players, event die variant, start/end time)
//! - [`GameLog`] - The ordered roll history of one game
//! - [`RollGenerator`] - Deterministic fair rolls for demos and tests
//!
//! # Example
//!
//! ```
//! use dicetally_core::{EventDie, Game, GameLog, RollRecord};
//!
//! let game = Game::new("g1", "Expansion night", ["Ana", "Bo"], true, 0).unwrap();
//! let mut log = GameLog::new(game);
//! log.push_roll(RollRecord::new(2, 5, Some(EventDie::Pirates), 30_000).unwrap())
//!     .unwrap();
//!
//! assert_eq!(log.roll_count(), 1);
//! ```

pub use self::{game::*, roll::*, roll_generator::*};

mod game;
mod roll;
mod roll_generator;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidRollError {
    #[display("red die must be 1-6, got {value}")]
    RedDieOutOfRange { value: u8 },
    #[display("yellow die must be 1-6, got {value}")]
    YellowDieOutOfRange { value: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("dice sum must be 2-12, got {value}")]
pub struct InvalidSumError {
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown event die outcome: {input}")]
pub struct ParseEventDieError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseRollSeedError {
    #[display("invalid seed: expected 32 hex characters, got {len}")]
    Length { len: usize },
    #[display("invalid seed: {input} is not hex")]
    NotHex { input: String },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("game name must not be blank")]
    BlankName,
    #[display("player names must not be blank")]
    BlankPlayerName,
    #[display("a game needs 2-6 players, got {count}")]
    PlayerCount { count: usize },
    #[display("duplicate player: {name}")]
    DuplicatePlayer { name: String },
    #[display("player name {name:?} is longer than 25 characters")]
    PlayerNameTooLong { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameLogError {
    #[display("roll at {timestamp} precedes the last roll at {last}")]
    OutOfOrder { timestamp: i64, last: i64 },
    #[display("roll index {index} out of range for {len} rolls")]
    IndexOutOfRange { index: usize, len: usize },
    #[display("roll {index} has an event die but the game does not use one")]
    UnexpectedEventDie { index: usize },
    #[display("roll {index} has no event die but the game uses one")]
    MissingEventDie { index: usize },
    #[display("invalid roll: {_0}")]
    InvalidRoll(InvalidRollError),
}

impl From<InvalidRollError> for GameLogError {
    fn from(err: InvalidRollError) -> Self {
        Self::InvalidRoll(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeneratorError {
    #[display("mean delay between rolls must be positive")]
    ZeroMeanDelay,
}
