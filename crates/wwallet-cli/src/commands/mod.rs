//! Command implementations.

mod add;
mod extract;
mod list;
mod lookup;
mod remove;
mod show;
mod update;

pub use add::execute_add;
pub use extract::execute_extract;
pub use list::execute_list;
pub use lookup::execute_lookup;
pub use remove::execute_remove;
pub use show::execute_show;
pub use update::execute_update;

use crate::config::Config;
use crate::error::{CliError, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use wwallet_domain::RecordId;
use wwallet_extractor::ReceiptPipeline;
use wwallet_llm::ResponsesClient;
use wwallet_ocr::TesseractRecognizer;
use wwallet_store::{SqliteStore, Vault};

/// Open the record vault, honoring a `--database` override.
pub(crate) fn open_vault(config: &Config, database: Option<&Path>) -> Result<Vault<SqliteStore>> {
    let path = match database {
        Some(path) => path.to_path_buf(),
        None => config.database_path()?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    Ok(Vault::new(SqliteStore::new(path)?))
}

/// Build the extraction pipeline from configuration.
pub(crate) fn build_pipeline(
    config: &Config,
) -> Result<ReceiptPipeline<ResponsesClient, TesseractRecognizer>> {
    config.extraction.validate().map_err(CliError::Config)?;

    let client = ResponsesClient::new(config.openai_api_key()?, config.model.clone());
    Ok(ReceiptPipeline::new(
        client,
        TesseractRecognizer::new(),
        config.extraction.clone(),
    ))
}

pub(crate) fn parse_record_id(raw: &str) -> Result<RecordId> {
    RecordId::from_string(raw).map_err(CliError::InvalidInput)
}

pub(crate) fn parse_purchase_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d-%m-%Y").map_err(|_| {
        CliError::InvalidInput(format!("invalid date '{}', expected DD-MM-YYYY", raw))
    })
}
