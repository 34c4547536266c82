//! Extract purchase data from a receipt image.

use super::{build_pipeline, open_vault};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::Utc;
use std::fs;
use std::path::Path;
use wwallet_domain::RecordDraft;

pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    database: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let image = fs::read(&args.image)?;
    let pipeline = build_pipeline(config)?;

    let receipt = pipeline.extract_receipt(&image).await?;
    formatter.receipt(&receipt);

    let mut warranty = None;
    let mut return_policy = None;

    if args.lookup {
        let item = receipt.item_name.clone().unwrap_or_default();
        let store = receipt.store_name.clone().unwrap_or_default();

        let (warranty_result, return_result) = pipeline.lookup_policies(&item, &store).await;

        match warranty_result {
            Ok(info) => {
                formatter.warranty(&info);
                warranty = Some(info);
            }
            Err(e) => formatter.warning(&format!("warranty lookup failed: {}", e)),
        }
        match return_result {
            Ok(info) => {
                formatter.return_policy(&info);
                return_policy = Some(info);
            }
            Err(e) => formatter.warning(&format!("return-policy lookup failed: {}", e)),
        }
    }

    if args.save {
        let mut draft = RecordDraft::from_extraction(
            &receipt,
            warranty.as_ref(),
            return_policy.as_ref(),
            config.extraction.policy_defaults(),
            Utc::now().date_naive(),
        );

        if draft.item_name.is_empty() {
            return Err(CliError::InvalidInput(
                "extraction produced no item name; add the record manually with `wwallet add`"
                    .to_string(),
            ));
        }

        draft.receipt_image = Some(image);

        let mut vault = open_vault(config, database)?;
        let record = vault.create_record(draft)?;
        formatter.success(&format!("Created record {}", record.id));
    }

    Ok(())
}
