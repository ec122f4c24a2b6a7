use clap::{ArgAction, Parser, Subcommand};

use self::{distribution::DistributionArg, generate::GenerateArg, report::ReportArg};

mod distribution;
mod generate;
mod report;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// What to do
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Show every statistic for a roll log
    Report(#[clap(flatten)] ReportArg),
    /// Show the sum distribution of a roll log
    Distribution(#[clap(flatten)] DistributionArg),
    /// Generate a roll log of simulated fair rolls
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    crate::logging::init(args.verbose);
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Distribution(arg) => distribution::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}
