//! Harvest command implementation.

use crate::cli::HarvestArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::progress::ConsoleProgress;
use chrono::NaiveDate;
use patnet_domain::{Authority, RunConfig};
use patnet_harvester::{HarvestConfig, Harvester};
use patnet_sparql::LinkedDataClient;
use patnet_store::GraphStore;
use std::io::{self, IsTerminal, Write};

/// Execute the harvest command.
pub async fn execute_harvest(args: HarvestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let run = run_config(&args)?;
    let harvest_config = harvest_config(&args, &config.harvest);

    let client = LinkedDataClient::new(config.linked_data.clone())?;
    let store = GraphStore::validated(config.store.clone())?;
    let mut harvester = Harvester::new(client.clone(), client, store, harvest_config);

    // JSON output keeps stdout for the final document
    let (writer, interactive): (Box<dyn Write>, bool) = match formatter.format() {
        OutputFormat::Json => (Box::new(io::stderr()), io::stderr().is_terminal()),
        OutputFormat::Table => (Box::new(io::stdout()), io::stdout().is_terminal()),
    };
    let mut progress = ConsoleProgress::new(*formatter, writer, interactive);

    let report = harvester.run(&run, &mut progress).await?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Build the run from the arguments; `--to` defaults to the day after `--from`.
pub fn run_config(args: &HarvestArgs) -> Result<RunConfig> {
    let authority = Authority::new(&args.authority).map_err(CliError::InvalidInput)?;
    let end = match args.to {
        Some(end) => end,
        None => next_day(args.from)?,
    };
    RunConfig::new(args.from, end, authority).map_err(CliError::InvalidInput)
}

/// Apply command-line overrides to the configured harvest settings.
pub fn harvest_config(args: &HarvestArgs, configured: &HarvestConfig) -> HarvestConfig {
    let mut config = configured.clone();
    if let Some(stride) = args.stride {
        config.stride_days = stride;
    }
    if args.no_resume {
        config.resume = false;
    }
    config
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| CliError::InvalidInput(format!("No date follows {}", date)))
}
