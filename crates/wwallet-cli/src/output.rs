//! Output formatting for CLI results.

use crate::config::OutputFormat;
use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use wwallet_domain::{PolicyStatus, ReceiptData, ReturnPolicyInfo, WarrantyInfo, WarrantyRecord};

/// Formats command results for the terminal.
pub struct Formatter {
    format: OutputFormat,
    color: bool,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Purchased")]
    purchased: String,
    #[tabled(rename = "Warranty")]
    warranty: String,
    #[tabled(rename = "Return")]
    return_window: String,
}

impl Formatter {
    /// Create a formatter.
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Print extracted receipt data.
    pub fn receipt(&self, receipt: &ReceiptData) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(receipt).unwrap_or_default());
            }
            OutputFormat::Quiet => {
                println!("{}", receipt.item_name.as_deref().unwrap_or(""));
            }
            OutputFormat::Table => {
                println!("Item:      {}", field(receipt.item_name.as_deref()));
                println!("Store:     {}", field(receipt.store_name.as_deref()));
                println!("Store URL: {}", field(receipt.store_url.as_deref()));
                println!("Price:     ${}", receipt.formatted_price());
                println!(
                    "Purchased: {}",
                    receipt
                        .parsed_date()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| field(receipt.purchase_date.as_deref())),
                );
            }
        }
    }

    /// Print warranty-lookup results.
    pub fn warranty(&self, info: &WarrantyInfo) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(info).unwrap_or_default());
            }
            OutputFormat::Quiet => {
                println!(
                    "{}",
                    info.warranty_months
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "null".to_string())
                );
            }
            OutputFormat::Table => {
                println!("Warranty");
                println!(
                    "  Period:     {}",
                    info.warranty_months
                        .map(|m| format!("{} months", m))
                        .unwrap_or_else(|| "unknown".to_string())
                );
                println!("  Conditions: {}", info.conditions);
                println!("  Source:     {}", field(info.evidence_url.as_deref()));
            }
        }
    }

    /// Print return-policy-lookup results.
    pub fn return_policy(&self, info: &ReturnPolicyInfo) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(info).unwrap_or_default());
            }
            OutputFormat::Quiet => {
                println!(
                    "{}",
                    info.return_days
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "null".to_string())
                );
            }
            OutputFormat::Table => {
                println!("Return policy");
                println!(
                    "  Window:     {}",
                    info.return_days
                        .map(|d| format!("{} days", d))
                        .unwrap_or_else(|| "unknown".to_string())
                );
                println!("  Conditions: {}", info.conditions);
                println!("  Source:     {}", field(info.evidence_url.as_deref()));
            }
        }
    }

    /// Print the record listing with status columns.
    pub fn records(
        &self,
        records: &[WarrantyRecord],
        today: NaiveDate,
        warranty_threshold_days: i64,
        return_threshold_days: i64,
    ) {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<_> = records
                    .iter()
                    .map(|r| record_json(r, today, warranty_threshold_days, return_threshold_days))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&values).unwrap_or_default()
                );
            }
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
            OutputFormat::Table => {
                if records.is_empty() {
                    println!("No records.");
                    return;
                }

                let rows: Vec<RecordRow> = records
                    .iter()
                    .map(|r| RecordRow {
                        id: r.id.to_string(),
                        item: r.item_name.clone(),
                        store: r.store_name.clone().unwrap_or_else(|| "-".to_string()),
                        price: format!("${:.2}", r.price),
                        purchased: r.purchase_date.to_string(),
                        warranty: self
                            .status_cell(r.warranty_status(today, warranty_threshold_days)),
                        return_window: self
                            .status_cell(r.return_status(today, return_threshold_days)),
                    })
                    .collect();

                let mut table = Table::new(rows);
                table.with(Style::sharp());
                println!("{}", table);
            }
        }
    }

    /// Print one record: a warranty card in table mode, structured JSON
    /// otherwise.
    pub fn record_detail(
        &self,
        record: &WarrantyRecord,
        card: &str,
        today: NaiveDate,
        warranty_threshold_days: i64,
        return_threshold_days: i64,
    ) {
        match self.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&record_json(
                        record,
                        today,
                        warranty_threshold_days,
                        return_threshold_days
                    ))
                    .unwrap_or_default()
                );
            }
            OutputFormat::Quiet => println!("{}", record.id),
            OutputFormat::Table => println!("{}", card),
        }
    }

    /// Print a success line (record created, updated, removed).
    pub fn success(&self, message: &str) {
        if self.color {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
    }

    /// Print a warning line without failing the command.
    pub fn warning(&self, message: &str) {
        if self.color {
            eprintln!("{}", format!("Warning: {}", message).yellow());
        } else {
            eprintln!("Warning: {}", message);
        }
    }

    fn status_cell(&self, status: PolicyStatus) -> String {
        let name = status.display_name();
        if !self.color {
            return name.to_string();
        }
        match status.color() {
            "green" => name.green().to_string(),
            "orange" => name.yellow().to_string(),
            "red" => name.red().to_string(),
            _ => name.dimmed().to_string(),
        }
    }
}

fn field(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn record_json(
    record: &WarrantyRecord,
    today: NaiveDate,
    warranty_threshold_days: i64,
    return_threshold_days: i64,
) -> serde_json::Value {
    json!({
        "id": record.id.to_string(),
        "itemName": record.item_name,
        "storeName": record.store_name,
        "price": record.price,
        "purchaseDate": record.purchase_date.to_string(),
        "warrantyLengthMonths": record.warranty_length_months,
        "returnWindowDays": record.return_window_days,
        "warrantyEndDate": record.warranty_end_date.to_string(),
        "returnEndDate": record.return_end_date.to_string(),
        "warrantyStatus": record.warranty_status(today, warranty_threshold_days),
        "returnStatus": record.return_status(today, return_threshold_days),
        "warrantyConditions": record.warranty_conditions,
        "warrantyEvidenceUrl": record.warranty_evidence_url,
        "returnConditions": record.return_conditions,
        "returnEvidenceUrl": record.return_evidence_url,
        "createdAt": record.created_at.to_rfc3339(),
        "updatedAt": record.updated_at.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cell_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.status_cell(PolicyStatus::Active), "Active");
        assert_eq!(
            formatter.status_cell(PolicyStatus::ExpiringSoon),
            "Expiring Soon"
        );
    }

    #[test]
    fn test_record_json_shape() {
        let draft = wwallet_domain::RecordDraft {
            item_name: "Kettle".to_string(),
            store_name: None,
            price: 49.95,
            purchase_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            warranty_length_months: 24,
            return_window_days: 30,
            warranty_conditions: None,
            warranty_evidence_url: None,
            return_conditions: None,
            return_evidence_url: None,
            receipt_image: None,
            extracted_text: None,
        };
        let record = WarrantyRecord::assemble(draft, chrono::Utc::now());

        let value = record_json(
            &record,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            30,
            7,
        );
        assert_eq!(value["itemName"], "Kettle");
        assert_eq!(value["warrantyEndDate"], "2026-02-01");
        assert_eq!(value["warrantyStatus"], "active");
        // Return window ends 2024-03-02: one day left on 2024-03-01
        assert_eq!(value["returnStatus"], "expiringSoon");
    }
}
