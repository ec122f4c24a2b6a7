//! Plain-text rendering of roll statistics
//!
//! Each function writes one section of the `report` output. Sections are
//! separated by a blank line written by the caller.

use std::{io, time::Duration};

use chrono::DateTime;
use dicetally_core::Game;
use dicetally_stats::{
    distribution::SumDistribution,
    fairness::FairnessReport,
    outliers::{NumberFrequency, Outliers},
    streak::StreakResult,
    timing::TimingStats,
};

/// Format a millisecond timestamp as UTC wall-clock time
pub(super) fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || format!("{millis} ms"),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

/// Format a duration as `1h 02m 03s`, dropping leading zero units
pub(super) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// `7: 9x (81.8%)`
fn format_frequency(freq: &NumberFrequency) -> String {
    format!(
        "{}: {}x ({:.1}%)",
        freq.sum.value(),
        freq.count,
        freq.percentage
    )
}

pub(super) fn write_game_header<W>(w: &mut W, game: &Game, now: i64) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w, "Game: {} ({})", game.name(), game.id())?;
    writeln!(w, "  Players:   {}", game.players().join(", "))?;
    writeln!(
        w,
        "  Event die: {}",
        if game.event_die_enabled() { "on" } else { "off" }
    )?;
    writeln!(w, "  Started:   {}", format_timestamp(game.start_time()))?;
    let state = if game.is_ended() { "" } else { " (in progress)" };
    writeln!(
        w,
        "  Duration:  {}{state}",
        format_duration(game.duration(now))
    )?;
    Ok(())
}

/// Print the per-sum table
///
/// In by-category mode every (sum, event die) pair gets a row and the
/// percentage is relative to that event die's rolls.
pub(super) fn write_distribution<W>(w: &mut W, distribution: &SumDistribution) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w, "Distribution ({} rolls)", distribution.total())?;
    if distribution.is_empty() {
        writeln!(w, "  No rolls yet")?;
        return Ok(());
    }

    let by_category = distribution.mode().is_by_category();
    if by_category {
        writeln!(w, "  {:>4} {:<10} {:>6} {:>8}", "Sum", "Event", "Count", "Percent")?;
        writeln!(w, "  {}", "-".repeat(31))?;
    } else {
        writeln!(w, "  {:>4} {:>6} {:>8}", "Sum", "Count", "Percent")?;
        writeln!(w, "  {}", "-".repeat(20))?;
    }
    for entry in distribution.entries() {
        if by_category {
            let event = entry.category.map_or("-", |die| die.as_str());
            writeln!(
                w,
                "  {:>4} {:<10} {:>6} {:>7.1}%",
                entry.sum.value(),
                event,
                entry.count,
                entry.percentage
            )?;
        } else {
            writeln!(
                w,
                "  {:>4} {:>6} {:>7.1}%",
                entry.sum.value(),
                entry.count,
                entry.percentage
            )?;
        }
    }
    Ok(())
}

pub(super) fn write_fairness<W>(w: &mut W, report: &FairnessReport) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w, "Observed vs expected")?;
    writeln!(
        w,
        "  {:>4} {:>8} {:>9} {:>10}",
        "Sum", "Observed", "Expected", "Deviation"
    )?;
    writeln!(w, "  {}", "-".repeat(34))?;
    for bucket in &report.buckets {
        writeln!(
            w,
            "  {:>4} {:>8} {:>9.2} {:>+10.2}",
            bucket.sum.value(),
            bucket.observed,
            bucket.expected,
            bucket.deviation
        )?;
    }
    writeln!(
        w,
        "  Chi-square: {:.3} ({} degrees of freedom)",
        report.chi_square, report.degrees_of_freedom
    )?;
    Ok(())
}

pub(super) fn write_outliers<W>(w: &mut W, outliers: &Outliers) -> io::Result<()>
where
    W: io::Write,
{
    let join = |numbers: &[NumberFrequency]| {
        numbers
            .iter()
            .map(format_frequency)
            .collect::<Vec<_>>()
            .join(", ")
    };
    writeln!(w, "Hot number:  {}", format_frequency(&outliers.hot_number))?;
    writeln!(w, "Cold number: {}", format_frequency(&outliers.cold_number))?;
    writeln!(w, "  Hottest: {}", join(&outliers.hot_numbers))?;
    writeln!(w, "  Coldest: {}", join(&outliers.cold_numbers))?;
    Ok(())
}

pub(super) fn write_streak<W>(w: &mut W, streak: Option<&StreakResult>) -> io::Result<()>
where
    W: io::Write,
{
    match streak {
        Some(streak) => writeln!(
            w,
            "Longest streak: Sum {} - {} consecutive rolls",
            streak.sum.value(),
            streak.length
        ),
        None => writeln!(w, "Longest streak: -"),
    }
}

pub(super) fn write_timing<W>(w: &mut W, timing: Option<&TimingStats>) -> io::Result<()>
where
    W: io::Write,
{
    let Some(timing) = timing else {
        return writeln!(w, "Average time between rolls: -");
    };
    writeln!(
        w,
        "Average time between rolls: {:.1} seconds",
        timing.mean_ms() / 1000.0
    )?;
    let intervals = &timing.intervals;
    writeln!(
        w,
        "  min {:.1}s, median {:.1}s, max {:.1}s, std dev {:.1}s",
        intervals.min / 1000.0,
        intervals.median / 1000.0,
        intervals.max / 1000.0,
        intervals.std_dev / 1000.0
    )?;
    Ok(())
}
