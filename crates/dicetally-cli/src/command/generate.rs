use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use dicetally_core::{Game, GameLog, RollGenerator, RollSeed};
use rand::Rng as _;

use crate::{schema::roll_log::RollLogFile, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of rolls to generate
    #[arg(long, default_value_t = 60)]
    rolls: usize,
    /// Seed as 32 hex digits (default: random)
    #[arg(long)]
    seed: Option<RollSeed>,
    /// Roll the event die too
    #[arg(long)]
    event_die: bool,
    /// Mean time between rolls in seconds
    #[arg(long, default_value_t = 30.0)]
    mean_delay_secs: f64,
    /// Game start in milliseconds since the Unix epoch (default: now)
    #[arg(long)]
    start_time: Option<i64>,
    /// Game name
    #[arg(long, default_value = "Generated game")]
    name: String,
    /// Player name, repeat for each player
    #[arg(long = "player", default_values_t = ["Player 1".to_owned(), "Player 2".to_owned()])]
    players: Vec<String>,
    /// Leave the game open instead of ending it at the last roll
    #[arg(long)]
    in_progress: bool,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let start_time = arg
        .start_time
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    let log = generate_log(arg, seed, start_time)?;
    tracing::info!(
        %seed,
        rolls = log.roll_count(),
        game = log.game().id(),
        "generated roll log"
    );

    Output::save_json(&RollLogFile::from_game_log(&log, Some(seed)), arg.output.clone())
}

fn generate_log(arg: &GenerateArg, seed: RollSeed, start_time: i64) -> anyhow::Result<GameLog> {
    let mean_delay = Duration::try_from_secs_f64(arg.mean_delay_secs)
        .with_context(|| format!("Invalid mean delay: {}", arg.mean_delay_secs))?;
    let generator = RollGenerator::with_seed(seed, arg.event_die, start_time, mean_delay)?;

    let game = Game::new(
        format!("generated-{seed}"),
        arg.name.as_str(),
        arg.players.iter().map(String::as_str),
        arg.event_die,
        start_time,
    )?;
    let mut log = GameLog::new(game);
    for roll in generator.take(arg.rolls) {
        log.push_roll(roll)?;
    }

    if !arg.in_progress {
        let end = log.last_roll().map_or(start_time, |roll| roll.timestamp());
        log.game_mut().end(end);
    }
    Ok(log)
}
