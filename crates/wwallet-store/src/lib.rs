//! Warranty Wallet Storage Layer
//!
//! Implements the `RecordStore` trait using SQLite.
//!
//! # Architecture
//!
//! - SQLite for the structured record data, schema in `schema.sql`
//! - Record ids stored as 16-byte big-endian blobs of the UUIDv7 value
//! - Dates stored as ISO-8601 text (`YYYY-MM-DD` / RFC 3339)
//!
//! # Examples
//!
//! ```no_run
//! use wwallet_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

pub mod vault;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use wwallet_domain::traits::RecordStore;
use wwallet_domain::{RecordId, WarrantyRecord};

pub use vault::{warranty_card, Vault};

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with this id already exists
    #[error("Duplicate record id")]
    Duplicate,
}

/// SQLite-based implementation of `RecordStore`.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// `SqliteStore` instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert a RecordId to bytes for storage.
    fn record_id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes back to a RecordId.
    fn bytes_to_record_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for RecordId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn parse_date(s: &str) -> Result<NaiveDate, StoreError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| StoreError::InvalidData(format!("Bad date '{}': {}", s, e)))
    }

    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::InvalidData(format!("Bad timestamp '{}': {}", s, e)))
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<WarrantyRecord> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_record_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let purchase_date: String = row.get(4)?;
        let warranty_end_date: String = row.get(7)?;
        let return_end_date: String = row.get(8)?;
        let created_at: String = row.get(15)?;
        let updated_at: String = row.get(16)?;

        let text_date = |idx: usize, s: &str| {
            Self::parse_date(s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        };
        let text_datetime = |idx: usize, s: &str| {
            Self::parse_datetime(s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        };

        Ok(WarrantyRecord {
            id,
            item_name: row.get(1)?,
            store_name: row.get(2)?,
            price: row.get(3)?,
            purchase_date: text_date(4, &purchase_date)?,
            warranty_length_months: row.get::<_, i64>(5)? as u32,
            return_window_days: row.get::<_, i64>(6)? as u32,
            warranty_end_date: text_date(7, &warranty_end_date)?,
            return_end_date: text_date(8, &return_end_date)?,
            warranty_conditions: row.get(9)?,
            warranty_evidence_url: row.get(10)?,
            return_conditions: row.get(11)?,
            return_evidence_url: row.get(12)?,
            receipt_image: row.get(13)?,
            extracted_text: row.get(14)?,
            created_at: text_datetime(15, &created_at)?,
            updated_at: text_datetime(16, &updated_at)?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, item_name, store_name, price, purchase_date, \
     warranty_length_months, return_window_days, warranty_end_date, return_end_date, \
     warranty_conditions, warranty_evidence_url, return_conditions, return_evidence_url, \
     receipt_image, extracted_text, created_at, updated_at";

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn create_record(&mut self, record: WarrantyRecord) -> Result<RecordId, Self::Error> {
        let id_bytes = Self::record_id_to_bytes(record.id);

        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM records WHERE id = ?1",
                params![&id_bytes],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate);
        }

        self.conn.execute(
            "INSERT INTO records (id, item_name, store_name, price, purchase_date, \
             warranty_length_months, return_window_days, warranty_end_date, return_end_date, \
             warranty_conditions, warranty_evidence_url, return_conditions, return_evidence_url, \
             receipt_image, extracted_text, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                &id_bytes,
                &record.item_name,
                &record.store_name,
                record.price,
                record.purchase_date.to_string(),
                record.warranty_length_months as i64,
                record.return_window_days as i64,
                record.warranty_end_date.to_string(),
                record.return_end_date.to_string(),
                &record.warranty_conditions,
                &record.warranty_evidence_url,
                &record.return_conditions,
                &record.return_evidence_url,
                &record.receipt_image,
                &record.extracted_text,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(record.id)
    }

    fn update_record(&mut self, record: &WarrantyRecord) -> Result<(), Self::Error> {
        let id_bytes = Self::record_id_to_bytes(record.id);

        let affected = self.conn.execute(
            "UPDATE records SET item_name = ?2, store_name = ?3, price = ?4, \
             purchase_date = ?5, warranty_length_months = ?6, return_window_days = ?7, \
             warranty_end_date = ?8, return_end_date = ?9, warranty_conditions = ?10, \
             warranty_evidence_url = ?11, return_conditions = ?12, return_evidence_url = ?13, \
             receipt_image = ?14, extracted_text = ?15, created_at = ?16, updated_at = ?17 \
             WHERE id = ?1",
            params![
                &id_bytes,
                &record.item_name,
                &record.store_name,
                record.price,
                record.purchase_date.to_string(),
                record.warranty_length_months as i64,
                record.return_window_days as i64,
                record.warranty_end_date.to_string(),
                record.return_end_date.to_string(),
                &record.warranty_conditions,
                &record.warranty_evidence_url,
                &record.return_conditions,
                &record.return_evidence_url,
                &record.receipt_image,
                &record.extracted_text,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        if affected == 0 {
            return Err(StoreError::NotFound(record.id.to_string()));
        }
        Ok(())
    }

    fn get_record(&self, id: RecordId) -> Result<Option<WarrantyRecord>, Self::Error> {
        let id_bytes = Self::record_id_to_bytes(id);

        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM records WHERE id = ?1", SELECT_COLUMNS),
                params![&id_bytes],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn list_records(&self) -> Result<Vec<WarrantyRecord>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM records ORDER BY id", SELECT_COLUMNS))?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn delete_record(&mut self, id: RecordId) -> Result<(), Self::Error> {
        let id_bytes = Self::record_id_to_bytes(id);

        let affected = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![&id_bytes])?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
