//! Warranty Wallet CLI - track warranties and return windows from
//! photographed receipts.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wwallet_cli::{commands, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> wwallet_cli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config; seed a default file on first run. A malformed file is an
    // error, not an excuse to overwrite it.
    let had_config_file = Config::path().map(|p| p.exists()).unwrap_or(false);
    let config = Config::load()?;
    if !had_config_file {
        config.save().ok();
    }

    // Determine output format and color setting
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let database = cli.database.as_deref();

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, database, &formatter).await
        }
        Command::Lookup(args) => commands::execute_lookup(args, &config, &formatter).await,
        Command::Add(args) => commands::execute_add(args, &config, database, &formatter).await,
        Command::Update(args) => {
            commands::execute_update(args, &config, database, &formatter).await
        }
        Command::List => commands::execute_list(&config, database, &formatter).await,
        Command::Show(args) => commands::execute_show(args, &config, database, &formatter).await,
        Command::Remove(args) => {
            commands::execute_remove(args, &config, database, &formatter).await
        }
    }
}
