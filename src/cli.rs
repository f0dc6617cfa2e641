use crate::mass::MassValue;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "grossmass",
    version,
    about = "Adjust GrossMassKg values so they sum to a target total"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "GROSSMASS_CONFIG",
        help = "Config file (default: ~/.config/grossmass/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redistribute the values so they sum to the target total.
    Adjust {
        #[command(flatten)]
        series: SeriesArgs,
        #[arg(long, value_enum, help = "What to do if the final sum misses the target")]
        on_mismatch: Option<MismatchPolicy>,
        #[arg(
            long,
            short,
            value_name = "PATH",
            num_args = 0..=1,
            requires = "input",
            help = "Write the adjusted values back into a copy of the input (default: Adjusted_<input name>)"
        )]
        output: Option<Option<PathBuf>>,
    },
    /// Report whether the target total is reachable, without adjusting.
    Check {
        #[command(flatten)]
        series: SeriesArgs,
    },
}

#[derive(Args, Debug)]
pub struct SeriesArgs {
    #[arg(long, help = "Target total gross mass in kg")]
    pub total: MassValue,
    #[arg(
        long,
        short,
        conflicts_with = "values",
        help = "File with one value per line, a JSON array, or a CSV with a GrossMassKg column; '-' reads stdin"
    )]
    pub input: Option<PathBuf>,
    #[arg(
        required_unless_present = "input",
        help = "Row values in order (used when --input is not given)"
    )]
    pub values: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Log a warning and keep the adjusted values.
    #[default]
    Warn,
    /// Fail the command.
    Reject,
}
