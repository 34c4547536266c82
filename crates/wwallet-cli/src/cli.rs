//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Warranty Wallet - track warranties and return windows from photographed
/// receipts.
#[derive(Debug, Parser)]
#[command(name = "wwallet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Record database path (defaults to ~/.wwallet/records.db)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// Grounding source for policy lookups.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Grounding {
    /// The completion provider's built-in web-search tool
    Llm,
    /// An external web-search API
    Search,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract purchase data from a receipt image
    Extract(ExtractArgs),

    /// Look up warranty and return-policy terms online
    Lookup(LookupArgs),

    /// Add a record from confirmed values
    Add(AddArgs),

    /// Edit a record; end dates are recomputed
    Update(UpdateArgs),

    /// List all records with their statuses
    List,

    /// Show one record as a warranty card
    Show(ShowArgs),

    /// Delete a record
    Remove(RemoveArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Receipt image path
    pub image: PathBuf,

    /// Also look up warranty and return-policy terms for the extracted item
    #[arg(long)]
    pub lookup: bool,

    /// Save a record built from the extracted values
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Item name (may be empty when --store is given)
    pub item: String,

    /// Store name
    #[arg(short, long)]
    pub store: Option<String>,

    /// Grounding source for phase 1
    #[arg(short, long, value_enum, default_value = "llm")]
    pub grounding: Grounding,
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Item name
    #[arg(long)]
    pub item: String,

    /// Store name
    #[arg(long)]
    pub store: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: f64,

    /// Purchase date (DD-MM-YYYY)
    #[arg(long)]
    pub date: String,

    /// Warranty length in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Return window in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Receipt image to attach
    #[arg(long)]
    pub receipt: Option<PathBuf>,
}

/// Arguments for the update command.
#[derive(Debug, Parser)]
pub struct UpdateArgs {
    /// Record id
    pub id: String,

    /// New item name
    #[arg(long)]
    pub item: Option<String>,

    /// New store name
    #[arg(long)]
    pub store: Option<String>,

    /// New purchase price
    #[arg(long)]
    pub price: Option<f64>,

    /// New purchase date (DD-MM-YYYY)
    #[arg(long)]
    pub date: Option<String>,

    /// New warranty length in months
    #[arg(long)]
    pub months: Option<u32>,

    /// New return window in days
    #[arg(long)]
    pub days: Option<u32>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Record id
    pub id: String,
}

/// Arguments for the remove command.
#[derive(Debug, Parser)]
pub struct RemoveArgs {
    /// Record id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
