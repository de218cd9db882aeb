//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Patnet - harvest the co-applicant collaboration graph of patent filings.
#[derive(Debug, Parser)]
#[command(name = "patnet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PATNET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Harvest a date range into the collaboration graph
    Harvest(HarvestArgs),

    /// Summarize a saved graph
    Stats(StatsArgs),

    /// Strip rendering artifacts from a raw graph file
    Clean(CleanArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the harvest command.
#[derive(Debug, Parser)]
pub struct HarvestArgs {
    /// First application date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// First excluded date (YYYY-MM-DD); defaults to the day after --from
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Filing authority code
    #[arg(short, long, default_value = "EP")]
    pub authority: String,

    /// Window length in days (overrides the configuration)
    #[arg(long)]
    pub stride: Option<u32>,

    /// Start from --from even if a checkpoint of the same run exists
    #[arg(long)]
    pub no_resume: bool,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Graph file (defaults to the cleaned graph of the configuration)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Number of best-connected companies to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,
}

/// Arguments for the clean command.
#[derive(Debug, Parser)]
pub struct CleanArgs {
    /// Raw graph file (defaults to the configured raw path)
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Output file (defaults to the configured cleaned path)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harvest_args() {
        let cli = Cli::parse_from(["patnet", "harvest", "--from", "2023-01-01", "--to", "2023-02-01"]);
        match cli.command {
            Command::Harvest(args) => {
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
                assert_eq!(args.to, NaiveDate::from_ymd_opt(2023, 2, 1));
                assert_eq!(args.authority, "EP");
                assert!(args.stride.is_none());
                assert!(!args.no_resume);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_harvest_requires_from() {
        assert!(Cli::try_parse_from(["patnet", "harvest"]).is_err());
        assert!(Cli::try_parse_from(["patnet", "harvest", "--from", "01/01/2023"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["patnet", "stats", "--format", "json", "--no-color", "-vv", "--top", "3"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Stats(args) => {
                assert_eq!(args.top, 3);
                assert!(args.path.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["patnet", "--config", "/tmp/patnet.toml", "config", "init", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/patnet.toml")));
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(OutputFormat::from(CliFormat::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(CliFormat::Table), OutputFormat::Table);
    }
}
