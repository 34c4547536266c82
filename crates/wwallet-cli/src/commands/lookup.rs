//! Look up warranty and return-policy terms online.

use super::build_pipeline;
use crate::cli::{Grounding, LookupArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use wwallet_search::BraveSearchClient;

pub async fn execute_lookup(
    args: LookupArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline = build_pipeline(config)?;

    match args.grounding {
        Grounding::Llm => match &args.store {
            Some(store) => {
                // Independent sub-flows: one failing leaves the other's
                // result on screen.
                let (warranty, return_policy) =
                    pipeline.lookup_policies(&args.item, store).await;

                match warranty {
                    Ok(info) => formatter.warranty(&info),
                    Err(e) => formatter.warning(&format!("warranty lookup failed: {}", e)),
                }
                match return_policy {
                    Ok(info) => formatter.return_policy(&info),
                    Err(e) => formatter.warning(&format!("return-policy lookup failed: {}", e)),
                }
            }
            None => {
                let info = pipeline.lookup_warranty(&args.item, None).await?;
                formatter.warranty(&info);
            }
        },
        Grounding::Search => {
            let search = BraveSearchClient::new(config.brave_search_api_key()?);

            let info = pipeline
                .lookup_warranty_with(&search, &args.item, args.store.as_deref())
                .await?;
            formatter.warranty(&info);

            if let Some(store) = &args.store {
                let return_policy = pipeline.lookup_return_policy_with(&search, store).await?;
                formatter.return_policy(&return_policy);
            }
        }
    }

    Ok(())
}
