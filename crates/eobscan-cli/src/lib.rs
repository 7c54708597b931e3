//! Eobscan CLI library.
//!
//! Argument parsing, configuration loading, the extract command and output
//! formatting for the `eobscan` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, ModeArg};
pub use commands::{execute_extract, exit_code_for};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
