use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use dicetally_stats::distribution::{DistributionMode, SumDistribution};

use super::table;
use crate::util::{self, Output, OutputFormat};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DistributionArg {
    /// Roll log JSON file
    log: PathBuf,
    /// Split counts by event die even if the game does not use it
    #[arg(long)]
    by_category: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn select_mode(by_category: bool, event_die_enabled: bool) -> DistributionMode {
    if by_category {
        DistributionMode::ByCategory
    } else {
        DistributionMode::for_event_die(event_die_enabled)
    }
}

pub(crate) fn run(arg: &DistributionArg) -> anyhow::Result<()> {
    let DistributionArg {
        log,
        by_category,
        format,
        output,
    } = arg;

    let log = util::read_roll_log(log)?;
    let mode = select_mode(*by_category, log.game().event_die_enabled());
    let distribution = SumDistribution::build(log.rolls(), mode);
    tracing::debug!(?mode, entries = distribution.entries().len(), "built distribution");

    match format {
        OutputFormat::Json => Output::save_json(&distribution, output.clone())?,
        OutputFormat::Text => {
            let mut out = Output::from_output_path(output.clone())?;
            table::write_distribution(&mut out, &distribution)
                .and_then(|()| out.flush())
                .with_context(|| {
                    format!("Failed to write distribution to {}", out.display_path())
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_mode() {
        assert_eq!(select_mode(false, false), DistributionMode::Simple);
        assert_eq!(select_mode(false, true), DistributionMode::ByCategory);
        assert_eq!(select_mode(true, false), DistributionMode::ByCategory);
    }
}
