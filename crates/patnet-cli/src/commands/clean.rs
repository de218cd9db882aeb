//! Clean command implementation.

use crate::cli::CleanArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use patnet_store::clean::clean_file;
use std::path::PathBuf;

/// Resolve the input and output files of a cleaning pass.
pub fn clean_paths(args: CleanArgs, config: &Config) -> Result<(PathBuf, PathBuf)> {
    let raw = args.raw.unwrap_or_else(|| config.store.raw_path.clone());
    let out = args.out.unwrap_or_else(|| config.store.cleaned_path.clone());

    if raw == out {
        return Err(CliError::InvalidInput(format!(
            "Input and output are the same file: {}",
            raw.display()
        )));
    }
    if !raw.exists() {
        return Err(CliError::InvalidInput(format!("No raw graph file at {}", raw.display())));
    }
    Ok((raw, out))
}

/// Execute the clean command.
pub fn execute_clean(args: CleanArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (raw, out) = clean_paths(args, config)?;
    let lines = clean_file(&raw, &out)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote {} line(s) from {} to {}", lines, raw.display(), out.display()))
    );
    Ok(())
}
