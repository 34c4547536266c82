//! List all records with their statuses.

use super::open_vault;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use chrono::Utc;
use std::path::Path;

pub async fn execute_list(
    config: &Config,
    database: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let vault = open_vault(config, database)?;
    let records = vault.list_records()?;

    formatter.records(
        &records,
        Utc::now().date_naive(),
        config.extraction.warranty_expiring_soon_days,
        config.extraction.return_expiring_soon_days,
    );
    Ok(())
}
