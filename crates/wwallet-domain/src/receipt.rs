//! Receipt extraction result

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transient result of one receipt extraction pass.
///
/// Every field is optional: the model is instructed to guess missing values,
/// but a guess can still come back `null`. A value is constructed once per
/// extraction call, is immutable, and is consumed immediately to pre-fill a
/// draft or a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptData {
    /// Name of the purchased item (the first product when several appear).
    pub item_name: Option<String>,

    /// Store name, not a link.
    pub store_name: Option<String>,

    /// Link to the store, when one is printed on the receipt.
    pub store_url: Option<String>,

    /// Price as a decimal.
    pub price: Option<f64>,

    /// Purchase date as printed, `DD-MM-YYYY`.
    pub purchase_date: Option<String>,
}

impl ReceiptData {
    /// Price formatted to exactly two decimals, `"0.00"` when absent.
    pub fn formatted_price(&self) -> String {
        match self.price {
            Some(price) => format!("{:.2}", price),
            None => "0.00".to_string(),
        }
    }

    /// Strict `DD-MM-YYYY` parse of the raw purchase date.
    ///
    /// Returns `None` when the field is absent or unparsable; never falls
    /// back to the current date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.purchase_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%d-%m-%Y").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn receipt(price: Option<f64>, purchase_date: Option<&str>) -> ReceiptData {
        ReceiptData {
            item_name: Some("Test Item".to_string()),
            store_name: Some("Test Store".to_string()),
            store_url: None,
            price,
            purchase_date: purchase_date.map(String::from),
        }
    }

    #[test]
    fn test_formatted_price() {
        assert_eq!(receipt(Some(29.99), None).formatted_price(), "29.99");
        assert_eq!(receipt(Some(123.456), None).formatted_price(), "123.46");
        assert_eq!(receipt(Some(5.0), None).formatted_price(), "5.00");
    }

    #[test]
    fn test_formatted_price_absent() {
        assert_eq!(receipt(None, None).formatted_price(), "0.00");
    }

    #[test]
    fn test_parsed_date() {
        let parsed = receipt(None, Some("15-03-2024")).parsed_date().unwrap();
        assert_eq!(parsed.day(), 15);
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.year(), 2024);
    }

    #[test]
    fn test_parsed_date_absent() {
        assert_eq!(receipt(None, None).parsed_date(), None);
    }

    #[test]
    fn test_parsed_date_malformed() {
        // ISO ordering, nonsense days and free text all come back as None
        assert_eq!(receipt(None, Some("2024-03-15")).parsed_date(), None);
        assert_eq!(receipt(None, Some("32-01-2024")).parsed_date(), None);
        assert_eq!(receipt(None, Some("last tuesday")).parsed_date(), None);
        assert_eq!(receipt(None, Some("")).parsed_date(), None);
    }

    #[test]
    fn test_decodes_camel_case_payload() {
        let json = r#"{
            "itemName": "Cordless Drill",
            "storeName": "ACME Hardware",
            "storeUrl": null,
            "price": 89.99,
            "purchaseDate": "03-07-2024"
        }"#;

        let data: ReceiptData = serde_json::from_str(json).unwrap();
        assert_eq!(data.item_name.as_deref(), Some("Cordless Drill"));
        assert_eq!(data.store_name.as_deref(), Some("ACME Hardware"));
        assert_eq!(data.store_url, None);
        assert_eq!(data.price, Some(89.99));

        let date = data.parsed_date().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 7, 3));
    }
}
