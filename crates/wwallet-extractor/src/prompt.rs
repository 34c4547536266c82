//! LLM prompt templates for receipt extraction and policy lookups
//!
//! Every builder is a pure function of its inputs: no I/O, no clock, no
//! randomness. The wording of each template is part of the wire contract
//! with the model — in particular the strict-JSON field lists and the rule
//! that unknown fields are `null` rather than a placeholder word.

use wwallet_domain::traits::SearchHit;

/// Search hits folded into a structuring summary.
const SEARCH_SUMMARY_LIMIT: usize = 5;

const RECEIPT_EXTRACTION_INSTRUCTIONS: &str = r#"Given the following OCR-extracted text from a receipt, extract and output a JSON object with the following fields:
{
    "itemName": "<name of the purchased item>",
    "storeName": "<store name, not link>",
    "storeUrl": "<link to the store>",
    "price": <price as a decimal>,
    "purchaseDate": "<date in DD-MM-YYYY format>"
}
If you cannot detect any of the fields, make your best guess based on the text. Return only the JSON object and nothing else. If there are multiple products, return the details of the product that appears first.
Fix small mistakes like spelling and OCR parsing errors, however, still be aware of model numbers and names."#;

const TEXT_CLEANUP_INSTRUCTIONS: &str = r#"Given the following OCR-extracted text from a receipt, correct small spelling and OCR parsing errors while preserving model numbers, quantities and prices exactly as printed. Keep the original line structure. Output a JSON object with the following fields:
{
    "text": "<the cleaned receipt text>"
}
Respond ONLY with a valid JSON object (no markdown or explanation)."#;

const WARRANTY_EXTRACTION_INSTRUCTIONS: &str = r#"Given the following summary of a warranty, extract warranty information and output a JSON object with the following fields:
{
    "warrantyMonths": <integer or null>, // warranty period in months, use null if unknown
    "conditions": "<key warranty conditions and exclusions>",
    "evidenceUrl": "<the URL to the link for this information>"
}

IMPORTANT:
- If a field cannot be determined, use null (not "Unknown").
- Respond ONLY with a valid JSON object (no markdown or explanation)."#;

const RETURN_POLICY_EXTRACTION_INSTRUCTIONS: &str = r#"Given the following summary of a store's return policy, extract return policy information and output a JSON object with the following fields:
{
    "returnDays": <integer or null>, // return period in days, use null if unknown
    "conditions": "<key return conditions and requirements>",
    "evidenceUrl": "<the URL to the link for this information>"
}

IMPORTANT:
- If a field cannot be determined, use null (not "Unknown").
- Do not mention warranty information; strictly give return policy details and days.
- Respond ONLY with a valid JSON object (no markdown)."#;

/// Prompt asking the model to structure OCR text into the receipt JSON
/// shape.
pub fn receipt_extraction_prompt(ocr_text: &str) -> String {
    format!("{RECEIPT_EXTRACTION_INSTRUCTIONS}\n\nOCR Text:\n{ocr_text}")
}

/// Prompt asking the model to clean up raw OCR text.
pub fn text_cleanup_prompt(ocr_text: &str) -> String {
    format!("{TEXT_CLEANUP_INSTRUCTIONS}\n\nOCR Text:\n{ocr_text}")
}

/// Phase-1 prompt: find warranty terms via the web-search tool.
///
/// When `item_name` is empty the query is keyed on the store name alone.
pub fn warranty_search_prompt(
    item_name: &str,
    store_name: Option<&str>,
    jurisdiction: &str,
) -> String {
    let subject = match store_name {
        Some(store) if item_name.is_empty() => format!("products sold by {store}"),
        Some(store) => format!("{item_name} from {store}"),
        None => item_name.to_string(),
    };

    format!(
        "Find the warranty policy of {subject}. Only provide results applicable to {jurisdiction}. \
         Provide the warranty period in months, a summary of the conditions, and the URL of the source."
    )
}

/// Phase-2 prompt: convert a warranty summary into the strict JSON shape.
pub fn warranty_extraction_prompt(summary: &str) -> String {
    format!("{WARRANTY_EXTRACTION_INSTRUCTIONS}\n\nSummary:\n{summary}")
}

/// Phase-1 prompt: find return-policy terms via the web-search tool.
pub fn return_policy_search_prompt(
    store_name: &str,
    item_name: Option<&str>,
    jurisdiction: &str,
) -> String {
    let subject = match item_name {
        Some(item) if !item.is_empty() => format!("{store_name} for the {item}"),
        _ => store_name.to_string(),
    };

    format!(
        "Find the return policy of {subject}. Prefer the policy regarding change of mind returns in {jurisdiction}. \
         Provide the return window in days, a summary of the conditions, and the URL of the source."
    )
}

/// Phase-2 prompt: convert a return-policy summary into the strict JSON
/// shape.
pub fn return_policy_extraction_prompt(summary: &str) -> String {
    format!("{RETURN_POLICY_EXTRACTION_INSTRUCTIONS}\n\nSummary:\n{summary}")
}

/// Query string for an external warranty search.
pub fn warranty_search_query(
    item_name: &str,
    store_name: Option<&str>,
    jurisdiction: &str,
) -> String {
    if item_name.is_empty() {
        if let Some(store) = store_name {
            return format!("\"{store}\" warranty policy {jurisdiction}");
        }
    }
    format!("{item_name} warranty period {jurisdiction}")
}

/// Query string for an external return-policy search.
pub fn return_policy_search_query(store_name: &str, jurisdiction: &str) -> String {
    format!("\"{store_name}\" return policy {jurisdiction}")
}

/// Combine the top search hits into a prose block for the structuring
/// prompt.
pub fn search_summary(hits: &[SearchHit]) -> String {
    hits.iter()
        .take(SEARCH_SUMMARY_LIMIT)
        .map(|hit| {
            format!(
                "Title: {}\nDescription: {}\nURL: {}",
                hit.title, hit.snippet, hit.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_prompt_includes_text_and_fields() {
        let prompt = receipt_extraction_prompt("ACME HARDWARE\nCordless Drill");

        assert!(prompt.contains("ACME HARDWARE\nCordless Drill"));
        assert!(prompt.contains("\"itemName\""));
        assert!(prompt.contains("\"purchaseDate\""));
        assert!(prompt.contains("DD-MM-YYYY"));
        assert!(prompt.contains("product that appears first"));
    }

    #[test]
    fn test_cleanup_prompt_requests_text_field() {
        let prompt = text_cleanup_prompt("receipt text");
        assert!(prompt.contains("\"text\""));
        assert!(prompt.contains("receipt text"));
    }

    #[test]
    fn test_warranty_search_prompt_with_item_and_store() {
        let prompt = warranty_search_prompt("Cordless Drill", Some("ACME Hardware"), "Australia");

        assert!(prompt.contains("Cordless Drill from ACME Hardware"));
        assert!(prompt.contains("applicable to Australia"));
        assert!(prompt.contains("warranty period in months"));
    }

    #[test]
    fn test_warranty_search_prompt_without_store() {
        let prompt = warranty_search_prompt("Cordless Drill", None, "Australia");
        assert!(prompt.contains("warranty policy of Cordless Drill."));
    }

    #[test]
    fn test_warranty_search_prompt_empty_item_uses_store() {
        let prompt = warranty_search_prompt("", Some("ACME Hardware"), "Australia");

        assert!(prompt.contains("products sold by ACME Hardware"));
        assert!(!prompt.contains("policy of ."));
    }

    #[test]
    fn test_warranty_extraction_prompt_null_rule() {
        let prompt = warranty_extraction_prompt("Twelve months coverage.");

        assert!(prompt.contains("\"warrantyMonths\""));
        assert!(prompt.contains("use null (not \"Unknown\")"));
        assert!(prompt.ends_with("Summary:\nTwelve months coverage."));
    }

    #[test]
    fn test_return_policy_search_prompt_variants() {
        let with_item = return_policy_search_prompt("ACME Hardware", Some("Cordless Drill"), "Australia");
        assert!(with_item.contains("ACME Hardware for the Cordless Drill"));

        let store_only = return_policy_search_prompt("ACME Hardware", None, "Australia");
        assert!(store_only.contains("return policy of ACME Hardware."));

        let empty_item = return_policy_search_prompt("ACME Hardware", Some(""), "Australia");
        assert!(empty_item.contains("return policy of ACME Hardware."));
    }

    #[test]
    fn test_return_policy_extraction_prompt_excludes_warranty() {
        let prompt = return_policy_extraction_prompt("30 day change of mind.");
        assert!(prompt.contains("\"returnDays\""));
        assert!(prompt.contains("Do not mention warranty information"));
    }

    #[test]
    fn test_search_queries() {
        assert_eq!(
            warranty_search_query("Cordless Drill", Some("ACME"), "australia"),
            "Cordless Drill warranty period australia"
        );
        assert_eq!(
            warranty_search_query("", Some("ACME"), "australia"),
            "\"ACME\" warranty policy australia"
        );
        assert_eq!(
            return_policy_search_query("ACME", "australia"),
            "\"ACME\" return policy australia"
        );
    }

    #[test]
    fn test_builders_are_deterministic() {
        let a = warranty_search_prompt("Drill", Some("ACME"), "Australia");
        let b = warranty_search_prompt("Drill", Some("ACME"), "Australia");
        assert_eq!(a, b);
    }

    #[test]
    fn test_search_summary_limits_hits() {
        let hits: Vec<_> = (0..8)
            .map(|i| SearchHit {
                title: format!("title-{i}"),
                url: format!("https://example.com/{i}"),
                snippet: format!("snippet-{i}"),
            })
            .collect();

        let summary = search_summary(&hits);
        assert!(summary.contains("title-0"));
        assert!(summary.contains("title-4"));
        assert!(!summary.contains("title-5"));
        assert!(summary.contains("Description: snippet-2"));
    }
}
