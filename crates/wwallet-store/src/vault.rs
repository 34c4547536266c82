//! Record assembly over a `RecordStore`
//!
//! The vault is the only writer: it assembles confirmed drafts into
//! records (computing both end dates and audit stamps) and hands them to
//! the store. Nothing is persisted until a caller presents a fully
//! confirmed draft, so an abandoned extraction leaves the store untouched.

use chrono::{NaiveDate, Utc};
use wwallet_domain::traits::RecordStore;
use wwallet_domain::{RecordDraft, RecordId, WarrantyRecord};

/// Record-assembly service over a [`RecordStore`].
pub struct Vault<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Vault<S> {
    /// Wrap a record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Assemble a confirmed draft into a record and persist it.
    pub fn create_record(&mut self, draft: RecordDraft) -> Result<WarrantyRecord, S::Error> {
        let record = WarrantyRecord::assemble(draft, Utc::now());
        self.store.create_record(record.clone())?;
        Ok(record)
    }

    /// Apply an edited draft to an existing record.
    ///
    /// End dates are recomputed from the draft's purchase date and lengths.
    /// Returns `None` when no record carries the id.
    pub fn update_record(
        &mut self,
        id: RecordId,
        draft: RecordDraft,
    ) -> Result<Option<WarrantyRecord>, S::Error> {
        let Some(mut record) = self.store.get_record(id)? else {
            return Ok(None);
        };

        record.apply(draft, Utc::now());
        self.store.update_record(&record)?;
        Ok(Some(record))
    }

    /// Fetch a record by id.
    pub fn get_record(&self, id: RecordId) -> Result<Option<WarrantyRecord>, S::Error> {
        self.store.get_record(id)
    }

    /// All records, in insertion order.
    pub fn list_records(&self) -> Result<Vec<WarrantyRecord>, S::Error> {
        self.store.list_records()
    }

    /// Delete a record by id.
    pub fn delete_record(&mut self, id: RecordId) -> Result<(), S::Error> {
        self.store.delete_record(id)
    }
}

/// Render a plain-text warranty card for a record.
///
/// `warranty_threshold_days` and `return_threshold_days` are the
/// expiring-soon thresholds used for the status lines.
pub fn warranty_card(
    record: &WarrantyRecord,
    today: NaiveDate,
    warranty_threshold_days: i64,
    return_threshold_days: i64,
) -> String {
    let warranty_status = record.warranty_status(today, warranty_threshold_days);
    let return_status = record.return_status(today, return_threshold_days);

    format!(
        "WARRANTY CARD\n\
         \n\
         Item: {}\n\
         Store: {}\n\
         Price: ${:.2}\n\
         Purchase Date: {}\n\
         \n\
         Warranty Information:\n\
         - Warranty Period: {} months\n\
         - Warranty End Date: {}\n\
         - Warranty Status: {}\n\
         \n\
         Return Information:\n\
         - Return Window: {} days\n\
         - Return End Date: {}\n\
         - Return Status: {}\n\
         \n\
         Generated on: {}",
        record.item_name,
        record.store_name.as_deref().unwrap_or("N/A"),
        record.price,
        record.purchase_date,
        record.warranty_length_months,
        record.warranty_end_date,
        warranty_status.display_name(),
        record.return_window_days,
        record.return_end_date,
        return_status.display_name(),
        today,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteStore;
    use wwallet_domain::{RETURN_EXPIRING_SOON_DAYS, WARRANTY_EXPIRING_SOON_DAYS};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> RecordDraft {
        RecordDraft {
            item_name: "Cordless Drill".to_string(),
            store_name: Some("ACME Hardware".to_string()),
            price: 89.99,
            purchase_date: date(2024, 1, 15),
            warranty_length_months: 12,
            return_window_days: 30,
            warranty_conditions: None,
            warranty_evidence_url: None,
            return_conditions: None,
            return_evidence_url: None,
            receipt_image: None,
            extracted_text: None,
        }
    }

    fn vault() -> Vault<SqliteStore> {
        Vault::new(SqliteStore::new(":memory:").unwrap())
    }

    #[test]
    fn test_create_computes_end_dates_and_persists() {
        let mut vault = vault();

        let record = vault.create_record(draft()).unwrap();
        assert_eq!(record.warranty_end_date, date(2025, 1, 15));
        assert_eq!(record.return_end_date, date(2024, 2, 14));

        let stored = vault.get_record(record.id).unwrap().unwrap();
        assert_eq!(stored.warranty_end_date, record.warranty_end_date);
    }

    #[test]
    fn test_update_recomputes_end_dates() {
        let mut vault = vault();
        let record = vault.create_record(draft()).unwrap();

        let mut edited = record.to_draft();
        edited.purchase_date = date(2024, 6, 1);
        edited.warranty_length_months = 24;

        let updated = vault.update_record(record.id, edited).unwrap().unwrap();
        assert_eq!(updated.warranty_end_date, date(2026, 6, 1));
        assert_eq!(updated.return_end_date, date(2024, 7, 1));
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at >= record.updated_at);

        let stored = vault.get_record(record.id).unwrap().unwrap();
        assert_eq!(stored.warranty_end_date, date(2026, 6, 1));
    }

    #[test]
    fn test_update_missing_record_returns_none() {
        let mut vault = vault();
        let result = vault.update_record(RecordId::new(), draft()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_removes_record() {
        let mut vault = vault();
        let record = vault.create_record(draft()).unwrap();

        vault.delete_record(record.id).unwrap();
        assert!(vault.get_record(record.id).unwrap().is_none());
    }

    #[test]
    fn test_warranty_card_contents() {
        let record = WarrantyRecord::assemble(draft(), Utc::now());

        let card = warranty_card(
            &record,
            date(2024, 12, 20),
            WARRANTY_EXPIRING_SOON_DAYS,
            RETURN_EXPIRING_SOON_DAYS,
        );

        assert!(card.contains("WARRANTY CARD"));
        assert!(card.contains("Item: Cordless Drill"));
        assert!(card.contains("Store: ACME Hardware"));
        assert!(card.contains("Price: $89.99"));
        assert!(card.contains("Warranty End Date: 2025-01-15"));
        assert!(card.contains("Warranty Status: Expiring Soon"));
        assert!(card.contains("Return Status: Expired"));
    }
}
