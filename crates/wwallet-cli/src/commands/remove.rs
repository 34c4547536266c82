//! Delete a record.

use super::{open_vault, parse_record_id};
use crate::cli::RemoveArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub async fn execute_remove(
    args: RemoveArgs,
    config: &Config,
    database: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let mut vault = open_vault(config, database)?;

    let record = vault
        .get_record(id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    if !args.yes {
        print!("Delete record for '{}' ({})? [y/N] ", record.item_name, id);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    vault.delete_record(id)?;
    formatter.success(&format!("Removed record {}", id));
    Ok(())
}
