//! Add a record from confirmed values.

use super::{open_vault, parse_purchase_date};
use crate::cli::AddArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use wwallet_domain::RecordDraft;

pub async fn execute_add(
    args: AddArgs,
    config: &Config,
    database: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let purchase_date = parse_purchase_date(&args.date)?;
    let receipt_image = match &args.receipt {
        Some(path) => Some(fs::read(path)?),
        None => None,
    };

    let defaults = config.extraction.policy_defaults();
    let draft = RecordDraft {
        item_name: args.item,
        store_name: args.store,
        price: args.price,
        purchase_date,
        warranty_length_months: args.months.unwrap_or(defaults.warranty_months),
        return_window_days: args.days.unwrap_or(defaults.return_days),
        warranty_conditions: None,
        warranty_evidence_url: None,
        return_conditions: None,
        return_evidence_url: None,
        receipt_image,
        extracted_text: None,
    };

    let mut vault = open_vault(config, database)?;
    let record = vault.create_record(draft)?;

    formatter.success(&format!(
        "Created record {} (warranty until {}, returns until {})",
        record.id, record.warranty_end_date, record.return_end_date
    ));
    Ok(())
}
