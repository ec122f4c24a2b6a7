use anyhow::Context;
use dicetally_core::{EventDie, Game, GameLog, ParseEventDieError, RollRecord, RollSeed};
use serde::{Deserialize, Deserializer, Serialize};

/// On-disk roll log: one game and its rolls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollLogFile {
    /// Seed that reproduces the rolls, present for generated logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<RollSeed>,
    pub game: Game,
    pub rolls: Vec<RollEntry>,
}

/// A roll as stored in a log file
///
/// Die values are validated when the log is turned into a [`GameLog`], so a
/// bad entry can be reported with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollEntry {
    pub red_die: u8,
    pub yellow_die: u8,
    #[serde(
        default,
        deserialize_with = "deserialize_event_die",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_die: Option<EventDie>,
    pub timestamp: i64,
}

/// Parses an event die name, accepting the legacy color names.
///
/// Older logs named the faces after their colors: blue (politics), green
/// (science), yellow (trade) and black (pirates).
pub fn parse_event_die(name: &str) -> Result<EventDie, ParseEventDieError> {
    match name.to_ascii_uppercase().as_str() {
        "BLUE" => Ok(EventDie::Politics),
        "GREEN" => Ok(EventDie::Science),
        "YELLOW" => Ok(EventDie::Trade),
        "BLACK" => Ok(EventDie::Pirates),
        _ => name.parse(),
    }
}

fn deserialize_event_die<'de, D>(deserializer: D) -> Result<Option<EventDie>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    name.map(|name| parse_event_die(&name).map_err(serde::de::Error::custom))
        .transpose()
}

impl RollLogFile {
    pub fn from_game_log(log: &GameLog, seed: Option<RollSeed>) -> Self {
        let rolls = log
            .rolls()
            .iter()
            .map(|roll| RollEntry {
                red_die: roll.red_die(),
                yellow_die: roll.yellow_die(),
                event_die: roll.event_die(),
                timestamp: roll.timestamp(),
            })
            .collect();
        Self {
            seed,
            game: log.game().clone(),
            rolls,
        }
    }

    pub fn into_game_log(self) -> anyhow::Result<GameLog> {
        let rolls = self
            .rolls
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                RollRecord::new(
                    entry.red_die,
                    entry.yellow_die,
                    entry.event_die,
                    entry.timestamp,
                )
                .with_context(|| format!("invalid roll #{i} at {}", entry.timestamp))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let log = GameLog::from_parts(self.game, rolls)?;
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG_JSON: &str = r#"{
        "game": {
            "id": "g1",
            "name": "Saturday",
            "players": ["Ana", "Bo", "Cy"],
            "event_die_enabled": true,
            "start_time": 0
        },
        "rolls": [
            { "red_die": 3, "yellow_die": 4, "event_die": "BLUE", "timestamp": 3000 },
            { "red_die": 1, "yellow_die": 1, "event_die": "pirates", "timestamp": 1000 },
            { "red_die": 6, "yellow_die": 2, "event_die": null, "timestamp": 2000 },
            { "red_die": 5, "yellow_die": 5, "timestamp": 4000 }
        ]
    }"#;

    #[test]
    fn test_legacy_names() {
        assert_eq!(parse_event_die("blue"), Ok(EventDie::Politics));
        assert_eq!(parse_event_die("GREEN"), Ok(EventDie::Science));
        assert_eq!(parse_event_die("Yellow"), Ok(EventDie::Trade));
        assert_eq!(parse_event_die("black"), Ok(EventDie::Pirates));
        assert_eq!(parse_event_die("TRADE"), Ok(EventDie::Trade));
        assert!(parse_event_die("purple").is_err());
    }

    #[test]
    fn test_load_normalizes_and_sorts() {
        let file = serde_json::from_str::<RollLogFile>(LOG_JSON).unwrap();
        let log = file.into_game_log().unwrap();
        let dice = log
            .rolls()
            .iter()
            .map(|r| (r.timestamp(), r.event_die()))
            .collect::<Vec<_>>();
        assert_eq!(
            dice,
            [
                (1000, Some(EventDie::Pirates)),
                (2000, None),
                (3000, Some(EventDie::Politics)),
                (4000, None),
            ]
        );
    }

    #[test]
    fn test_invalid_roll_names_position() {
        let json = r#"{
            "game": { "id": "g", "name": "n", "players": ["a", "b"], "start_time": 0 },
            "rolls": [
                { "red_die": 3, "yellow_die": 4, "timestamp": 1 },
                { "red_die": 9, "yellow_die": 4, "timestamp": 2 }
            ]
        }"#;
        let file = serde_json::from_str::<RollLogFile>(json).unwrap();
        let err = file.into_game_log().unwrap_err();
        assert!(err.to_string().contains("invalid roll #1"), "{err}");
    }

    #[test]
    fn test_round_trip_writes_canonical_names() {
        let file = serde_json::from_str::<RollLogFile>(LOG_JSON).unwrap();
        let log = file.into_game_log().unwrap();
        let written = serde_json::to_string(&RollLogFile::from_game_log(&log, None)).unwrap();
        assert!(written.contains("\"POLITICS\""));
        assert!(!written.contains("BLUE"));
        assert!(!written.contains("seed"));
    }
}
