//! Show one record as a warranty card.

use super::{open_vault, parse_record_id};
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::Utc;
use std::path::Path;
use wwallet_store::warranty_card;

pub async fn execute_show(
    args: ShowArgs,
    config: &Config,
    database: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let vault = open_vault(config, database)?;

    let record = vault
        .get_record(id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    let today = Utc::now().date_naive();
    let warranty_threshold = config.extraction.warranty_expiring_soon_days;
    let return_threshold = config.extraction.return_expiring_soon_days;

    let card = warranty_card(&record, today, warranty_threshold, return_threshold);
    formatter.record_detail(&record, &card, today, warranty_threshold, return_threshold);
    Ok(())
}
