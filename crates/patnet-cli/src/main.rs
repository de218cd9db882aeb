//! Patnet CLI - harvest the co-applicant collaboration graph of patent filings.

use clap::Parser;
use patnet_cli::cli::{ConfigAction, ConfigArgs};
use patnet_cli::commands;
use patnet_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr, stdout carries progress and results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> patnet_cli::Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;

    // `config init` must work even when the existing file is broken
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::load_from(&config_path).unwrap_or_default(),
        _ => Config::load_from(&config_path)?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Harvest(args) => commands::execute_harvest(args, &config, &formatter).await?,
        Command::Stats(args) => commands::execute_stats(args, &config, &formatter)?,
        Command::Clean(args) => commands::execute_clean(args, &config, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter)?,
    }

    Ok(())
}
