use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{EventDie, GameError, GameLogError, RollRecord};

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;
/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 6;
/// Longest accepted player name, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 25;

/// Metadata of one board-game session.
///
/// `event_die_enabled` selects the expansion variant in which every roll may
/// also carry an [`EventDie`] outcome.
///
/// # Example
///
/// ```
/// use dicetally_core::Game;
///
/// let mut game = Game::new("g1", "Friday night", ["Ana", "Bo", "Cy"], true, 0).unwrap();
/// assert!(!game.is_ended());
///
/// game.end(60_000);
/// assert_eq!(game.duration(60_000).as_secs(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGame")]
pub struct Game {
    id: String,
    name: String,
    players: Vec<String>,
    event_die_enabled: bool,
    start_time: i64,
    end_time: Option<i64>,
}

#[derive(Deserialize)]
struct RawGame {
    id: String,
    name: String,
    players: Vec<String>,
    #[serde(default)]
    event_die_enabled: bool,
    start_time: i64,
    #[serde(default)]
    end_time: Option<i64>,
}

impl TryFrom<RawGame> for Game {
    type Error = GameError;

    fn try_from(raw: RawGame) -> Result<Self, Self::Error> {
        let mut game = Self::new(
            raw.id,
            raw.name,
            raw.players,
            raw.event_die_enabled,
            raw.start_time,
        )?;
        game.end_time = raw.end_time;
        Ok(game)
    }
}

impl Game {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        players: I,
        event_die_enabled: bool,
        start_time: i64,
    ) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::BlankName);
        }

        let players = players.into_iter().map(Into::into).collect::<Vec<String>>();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::PlayerCount {
                count: players.len(),
            });
        }
        for (i, player) in players.iter().enumerate() {
            if player.trim().is_empty() {
                return Err(GameError::BlankPlayerName);
            }
            if player.chars().count() > MAX_PLAYER_NAME_LEN {
                return Err(GameError::PlayerNameTooLong {
                    name: player.clone(),
                });
            }
            // Player names are compared case-insensitively.
            let lowered = player.to_lowercase();
            if players[..i].iter().any(|p| p.to_lowercase() == lowered) {
                return Err(GameError::DuplicatePlayer {
                    name: player.clone(),
                });
            }
        }

        Ok(Self {
            id: id.into(),
            name,
            players,
            event_die_enabled,
            start_time,
            end_time: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    #[must_use]
    pub const fn event_die_enabled(&self) -> bool {
        self.event_die_enabled
    }

    #[must_use]
    pub const fn start_time(&self) -> i64 {
        self.start_time
    }

    #[must_use]
    pub const fn end_time(&self) -> Option<i64> {
        self.end_time
    }

    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    /// Marks the game as ended at `at` (milliseconds since epoch).
    pub const fn end(&mut self, at: i64) {
        self.end_time = Some(at);
    }

    /// Reopens an ended game.
    pub const fn resume(&mut self) {
        self.end_time = None;
    }

    /// Returns the elapsed play time.
    ///
    /// Ended games measure up to their end time; running games up to `now`.
    /// A clock earlier than the start yields zero.
    #[must_use]
    pub fn duration(&self, now: i64) -> Duration {
        let end = self.end_time.unwrap_or(now);
        let millis = end.saturating_sub(self.start_time).max(0);
        Duration::from_millis(millis.unsigned_abs())
    }
}

/// The ordered roll history of one game.
///
/// `GameLog` is the in-memory holder of the sequence that the statistics
/// functions consume. Rolls are kept in ascending timestamp order; every
/// mutation preserves that order, so [`GameLog::rolls`] is always a valid
/// snapshot.
///
/// # Example
///
/// ```
/// use dicetally_core::{Game, GameLog, RollRecord};
///
/// let game = Game::new("g1", "Test", ["Ana", "Bo"], false, 0).unwrap();
/// let mut log = GameLog::new(game);
///
/// log.push_roll(RollRecord::new(3, 4, None, 1_000).unwrap()).unwrap();
/// log.push_roll(RollRecord::new(6, 6, None, 2_000).unwrap()).unwrap();
///
/// // Rolls must not go back in time.
/// assert!(log.push_roll(RollRecord::new(1, 1, None, 500).unwrap()).is_err());
///
/// log.correct_roll(1, 5, 6, None).unwrap();
/// assert_eq!(log.last_roll().unwrap().sum().value(), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLog {
    game: Game,
    rolls: Vec<RollRecord>,
}

impl GameLog {
    #[must_use]
    pub const fn new(game: Game) -> Self {
        Self {
            game,
            rolls: Vec::new(),
        }
    }

    /// Builds a log from rolls in arbitrary order.
    ///
    /// Rolls are sorted by timestamp; rolls sharing a timestamp keep their
    /// relative order. Stored rolls of an event die game may lack the event
    /// die; they are counted as uncategorized.
    pub fn from_parts<I>(game: Game, rolls: I) -> Result<Self, GameLogError>
    where
        I: IntoIterator<Item = RollRecord>,
    {
        let mut rolls = rolls.into_iter().collect::<Vec<_>>();
        for (index, roll) in rolls.iter().enumerate() {
            check_event_die(&game, roll.event_die(), index)?;
        }
        if !rolls.is_sorted_by_key(RollRecord::timestamp) {
            tracing::debug!(game = game.id(), "reordering rolls by timestamp");
            rolls.sort_by_key(RollRecord::timestamp);
        }
        Ok(Self { game, rolls })
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    pub const fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Returns the rolls in ascending timestamp order.
    #[must_use]
    pub fn rolls(&self) -> &[RollRecord] {
        &self.rolls
    }

    #[must_use]
    pub fn roll_count(&self) -> usize {
        self.rolls.len()
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<&RollRecord> {
        self.rolls.last()
    }

    /// Appends a roll.
    ///
    /// The roll's timestamp must not precede the last recorded roll.
    pub fn push_roll(&mut self, roll: RollRecord) -> Result<(), GameLogError> {
        require_event_die(&self.game, roll.event_die(), self.rolls.len())?;
        if let Some(last) = self.rolls.last().map(RollRecord::timestamp) {
            if roll.timestamp() < last {
                return Err(GameLogError::OutOfOrder {
                    timestamp: roll.timestamp(),
                    last,
                });
            }
        }
        tracing::debug!(
            game = self.game.id(),
            sum = %roll.sum(),
            timestamp = roll.timestamp(),
            "roll recorded"
        );
        self.rolls.push(roll);
        Ok(())
    }

    /// Replaces the die values of the roll at `index`, keeping its timestamp.
    ///
    /// Returns the previous record.
    pub fn correct_roll(
        &mut self,
        index: usize,
        red_die: u8,
        yellow_die: u8,
        event_die: Option<EventDie>,
    ) -> Result<RollRecord, GameLogError> {
        require_event_die(&self.game, event_die, index)?;
        let len = self.rolls.len();
        let slot = self
            .rolls
            .get_mut(index)
            .ok_or(GameLogError::IndexOutOfRange { index, len })?;
        let corrected = slot.corrected(red_die, yellow_die, event_die)?;
        let previous = std::mem::replace(slot, corrected);
        tracing::debug!(
            game = self.game.id(),
            index,
            from = %previous.sum(),
            to = %corrected.sum(),
            "roll corrected"
        );
        Ok(previous)
    }

    /// Removes and returns the roll at `index`.
    pub fn remove_roll(&mut self, index: usize) -> Result<RollRecord, GameLogError> {
        if index >= self.rolls.len() {
            return Err(GameLogError::IndexOutOfRange {
                index,
                len: self.rolls.len(),
            });
        }
        let removed = self.rolls.remove(index);
        tracing::debug!(game = self.game.id(), index, "roll removed");
        Ok(removed)
    }
}

fn check_event_die(
    game: &Game,
    event_die: Option<EventDie>,
    index: usize,
) -> Result<(), GameLogError> {
    if event_die.is_some() && !game.event_die_enabled() {
        return Err(GameLogError::UnexpectedEventDie { index });
    }
    Ok(())
}

/// Like [`check_event_die`], but also requires a value when the game uses the
/// event die.
fn require_event_die(
    game: &Game,
    event_die: Option<EventDie>,
    index: usize,
) -> Result<(), GameLogError> {
    check_event_die(game, event_die, index)?;
    if event_die.is_none() && game.event_die_enabled() {
        return Err(GameLogError::MissingEventDie { index });
    }
    Ok(())
}
