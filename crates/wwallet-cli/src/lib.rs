//! Warranty Wallet CLI library.
//!
//! Command definitions, configuration, output formatting and the command
//! implementations behind the `wwallet` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command, Grounding};
pub use config::{Config, OutputFormat, Settings};
pub use error::{CliError, Result};
pub use output::Formatter;
