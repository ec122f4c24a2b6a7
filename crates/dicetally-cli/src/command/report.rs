use std::path::PathBuf;

use anyhow::Context;
use dicetally_core::Game;
use dicetally_stats::summary::RollStatistics;
use serde::Serialize;

use super::table;
use crate::util::{self, Output, OutputFormat};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Roll log JSON file
    log: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    game: &'a Game,
    statistics: &'a RollStatistics,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        log,
        format,
        output,
    } = arg;

    let log = util::read_roll_log(log)?;
    let statistics = RollStatistics::for_game(&log);
    let game = log.game();

    match format {
        OutputFormat::Json => Output::save_json(
            &Report {
                game,
                statistics: &statistics,
            },
            output.clone(),
        )?,
        OutputFormat::Text => {
            let mut out = Output::from_output_path(output.clone())?;
            let now = chrono::Utc::now().timestamp_millis();
            write_text(&mut out, game, &statistics, now)
                .with_context(|| format!("Failed to write report to {}", out.display_path()))?;
            out.finish()?;
        }
    }
    Ok(())
}

fn write_text<W>(
    w: &mut W,
    game: &Game,
    statistics: &RollStatistics,
    now: i64,
) -> std::io::Result<()>
where
    W: std::io::Write,
{
    table::write_game_header(w, game, now)?;
    writeln!(w)?;
    table::write_distribution(w, &statistics.distribution)?;
    if let Some(fairness) = &statistics.fairness {
        writeln!(w)?;
        table::write_fairness(w, fairness)?;
    }
    if let Some(outliers) = &statistics.outliers {
        writeln!(w)?;
        table::write_outliers(w, outliers)?;
    }
    writeln!(w)?;
    table::write_streak(w, statistics.longest_streak.as_ref())?;
    table::write_timing(w, statistics.timing.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use dicetally_core::{GameLog, RollRecord};

    use super::*;

    #[test]
    fn test_text_report() {
        let game = Game::new("g1", "Friday", ["Ana", "Bo"], false, 0).unwrap();
        let rolls = [(3, 4, 2_000), (4, 3, 4_000), (6, 6, 10_000)]
            .map(|(r, y, t)| RollRecord::new(r, y, None, t).unwrap());
        let log = GameLog::from_parts(game, rolls).unwrap();
        let stats = RollStatistics::for_game(&log);

        let mut buf = Vec::new();
        write_text(&mut buf, log.game(), &stats, 65_000).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Game: Friday (g1)\n"), "{text}");
        assert!(text.contains("Duration:  1m 05s (in progress)"), "{text}");
        assert!(text.contains("Hot number:  7: 2x (66.7%)"), "{text}");
        assert!(text.contains("Sum 7 - 2 consecutive rolls"), "{text}");
        assert!(text.contains("Average time between rolls: 4.0 seconds"), "{text}");
        assert!(text.contains("Chi-square:"), "{text}");
    }

    #[test]
    fn test_empty_game_report() {
        let game = Game::new("g1", "Friday", ["Ana", "Bo"], true, 0).unwrap();
        let log = GameLog::new(game);
        let stats = RollStatistics::for_game(&log);

        let mut buf = Vec::new();
        write_text(&mut buf, log.game(), &stats, 0).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("No rolls yet"), "{text}");
        assert!(!text.contains("Hot number"), "{text}");
        assert!(text.contains("Longest streak: -"), "{text}");
    }

    #[test]
    fn test_json_report_shape() {
        let game = Game::new("g1", "Friday", ["Ana", "Bo"], false, 0).unwrap();
        let stats = RollStatistics::compute(&[], Default::default());
        let json = serde_json::to_value(Report {
            game: &game,
            statistics: &stats,
        })
        .unwrap();
        assert_eq!(json["game"]["id"], "g1");
        assert_eq!(json["statistics"]["total_rolls"], 0);
    }
}
