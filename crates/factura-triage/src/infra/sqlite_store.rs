//! SQLite-backed record store
//!
//! Durable storage for vendor memory and processed-invoice records in a
//! single database file. The schema is created on open if absent. A
//! `parking_lot::Mutex` guards the connection; every operation completes
//! its database work synchronously, so no lock is ever held across an
//! await point.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use factura_common::{ProcessedInvoiceRecord, StoreError, VendorMemoryEntry};

use crate::infra::record_store::RecordStore;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS vendor_memory (
    id TEXT PRIMARY KEY,
    vendor TEXT NOT NULL,
    field TEXT NOT NULL,
    reason TEXT NOT NULL,
    confidence REAL NOT NULL,
    learnedAt TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS processed_invoices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vendor TEXT NOT NULL,
    invoiceNumber TEXT,
    invoiceDate TEXT
);

CREATE INDEX IF NOT EXISTS idx_vendor_memory_vendor
    ON vendor_memory(vendor);
CREATE INDEX IF NOT EXISTS idx_processed_invoices_lookup
    ON processed_invoices(vendor, invoiceNumber);
";

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// SQLite storage implementation
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;
        debug!(path = %path.display(), "Opened triage database");
        Self::initialize(conn)
    }

    /// Open a private in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL).map_err(backend)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn find_processed_invoice(
        &self,
        vendor: &str,
        invoice_number: &str,
    ) -> Result<Option<ProcessedInvoiceRecord>, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT vendor, invoiceNumber, invoiceDate FROM processed_invoices
             WHERE vendor = ?1 AND invoiceNumber = ?2",
            params![vendor, invoice_number],
            |row| {
                Ok(ProcessedInvoiceRecord {
                    vendor: row.get(0)?,
                    invoice_number: row.get(1)?,
                    invoice_date: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(backend)
    }

    async fn insert_processed_invoice(
        &self,
        record: ProcessedInvoiceRecord,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO processed_invoices (vendor, invoiceNumber, invoiceDate)
             VALUES (?1, ?2, ?3)",
            params![record.vendor, record.invoice_number, record.invoice_date],
        )
        .map_err(backend)?;
        Ok(())
    }

    async fn find_vendor_memory(&self, vendor: &str) -> Result<Vec<VendorMemoryEntry>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, vendor, field, reason, confidence, learnedAt FROM vendor_memory
                 WHERE vendor = ?1 ORDER BY rowid",
            )
            .map_err(backend)?;

        let rows = stmt
            .query_map(params![vendor], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })
            .map_err(backend)?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, vendor, field, reason, confidence, learned_at) = row.map_err(backend)?;
            let id = Uuid::parse_str(&id)
                .map_err(|e| StoreError::Serialization(format!("bad memory id {id}: {e}")))?;
            let learned_at = DateTime::parse_from_rfc3339(&learned_at)
                .map_err(|e| {
                    StoreError::Serialization(format!("bad learnedAt {learned_at}: {e}"))
                })?
                .with_timezone(&Utc);

            entries.push(VendorMemoryEntry {
                id,
                vendor,
                field,
                reason,
                confidence,
                learned_at,
            });
        }
        Ok(entries)
    }

    async fn insert_vendor_memory(&self, entry: VendorMemoryEntry) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO vendor_memory (id, vendor, field, reason, confidence, learnedAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id.to_string(),
                entry.vendor,
                entry.field,
                entry.reason,
                entry.confidence,
                entry.learned_at.to_rfc3339(),
            ],
        )
        .map_err(backend)?;
        Ok(())
    }
}
