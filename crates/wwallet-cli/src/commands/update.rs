//! Edit a record; end dates are recomputed.

use super::{open_vault, parse_purchase_date, parse_record_id};
use crate::cli::UpdateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

pub async fn execute_update(
    args: UpdateArgs,
    config: &Config,
    database: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let mut vault = open_vault(config, database)?;

    let record = vault
        .get_record(id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    let mut draft = record.to_draft();
    if let Some(item) = args.item {
        draft.item_name = item;
    }
    if let Some(store) = args.store {
        draft.store_name = Some(store);
    }
    if let Some(price) = args.price {
        draft.price = price;
    }
    if let Some(date) = args.date {
        draft.purchase_date = parse_purchase_date(&date)?;
    }
    if let Some(months) = args.months {
        draft.warranty_length_months = months;
    }
    if let Some(days) = args.days {
        draft.return_window_days = days;
    }

    let updated = vault
        .update_record(id, draft)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    formatter.success(&format!(
        "Updated record {} (warranty until {}, returns until {})",
        updated.id, updated.warranty_end_date, updated.return_end_date
    ));
    Ok(())
}
