use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "price_estimator_cli",
    version,
    about = "Workshop machine price estimator (terminal)"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// UI language: auto, en-us, ko-kr
    #[arg(short = 'L', long, global = true)]
    pub lang: Option<String>,

    /// Without a subcommand the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate a price without prompting
    Estimate(EstimateArgs),

    /// Print the input ranges of one or all machine types
    Ranges {
        /// Machine type, e.g. "Lathe Machine" or lathe
        #[arg(short, long)]
        machine: Option<String>,
    },

    /// Print the coefficients of one or all scenarios
    Coefficients {
        /// Scenario, e.g. "Excluding Operators" or excluding-operators
        #[arg(short, long)]
        scenario: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    /// Scenario (defaults to the configured one)
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Machine type (defaults to the configured one)
    #[arg(short, long)]
    pub machine: Option<String>,

    /// Attribute value as NAME=NUMBER, repeatable ("Initial Cost=2000000")
    #[arg(short = 'v', long = "value", value_name = "NAME=NUMBER")]
    pub values: Vec<String>,

    /// TOML file with attribute names as keys
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Reject missing or out-of-range values instead of using range minimums
    #[arg(long)]
    pub strict: bool,

    /// Write a TOML report of the estimate
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_estimate_flags() {
        let cli = Cli::try_parse_from([
            "price_estimator_cli",
            "--lang",
            "ko",
            "estimate",
            "-s",
            "excluding-operators",
            "-m",
            "lathe",
            "-v",
            "Initial Cost=2000000",
            "--value",
            "Time Spent=300",
            "--strict",
        ])
        .unwrap();
        assert_eq!(cli.lang.as_deref(), Some("ko"));
        match cli.command {
            Some(Commands::Estimate(args)) => {
                assert_eq!(args.scenario.as_deref(), Some("excluding-operators"));
                assert_eq!(args.values.len(), 2);
                assert!(args.strict);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["price_estimator_cli"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }
}
