//! Patnet CLI library.
//!
//! Command-line front end of the collaboration graph harvester: argument
//! parsing, configuration, command execution, console progress and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use progress::ConsoleProgress;
