//! Record Storage Implementations
//!
//! Storage backends for processed-invoice records and vendor memory.

use async_trait::async_trait;
use dashmap::DashMap;

use factura_common::{ProcessedInvoiceRecord, StoreError, VendorMemoryEntry};

/// Trait for triage storage backends
///
/// Both lookups are keyed by vendor; callers never scan across vendors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find a previously processed invoice by vendor and invoice number
    async fn find_processed_invoice(
        &self,
        vendor: &str,
        invoice_number: &str,
    ) -> Result<Option<ProcessedInvoiceRecord>, StoreError>;

    /// Record an invoice as processed
    async fn insert_processed_invoice(
        &self,
        record: ProcessedInvoiceRecord,
    ) -> Result<(), StoreError>;

    /// Get all memory entries for a vendor
    async fn find_vendor_memory(&self, vendor: &str) -> Result<Vec<VendorMemoryEntry>, StoreError>;

    /// Store a learned memory entry
    async fn insert_vendor_memory(&self, entry: VendorMemoryEntry) -> Result<(), StoreError>;
}

/// In-memory storage implementation
///
/// Uses DashMap keyed by vendor for concurrent access. Suited to tests and
/// short-lived runs; nothing survives the process.
#[derive(Default)]
pub struct InMemoryRecordStore {
    /// Processed invoices by vendor
    processed: DashMap<String, Vec<ProcessedInvoiceRecord>>,

    /// Memory entries by vendor
    memory: DashMap<String, Vec<VendorMemoryEntry>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total memory entries across all vendors
    pub fn memory_count(&self) -> usize {
        self.memory.iter().map(|e| e.len()).sum()
    }

    /// Total processed-invoice records across all vendors
    pub fn processed_count(&self) -> usize {
        self.processed.iter().map(|e| e.len()).sum()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_processed_invoice(
        &self,
        vendor: &str,
        invoice_number: &str,
    ) -> Result<Option<ProcessedInvoiceRecord>, StoreError> {
        let found = self.processed.get(vendor).and_then(|records| {
            records
                .iter()
                .find(|r| r.invoice_number.as_deref() == Some(invoice_number))
                .cloned()
        });
        Ok(found)
    }

    async fn insert_processed_invoice(
        &self,
        record: ProcessedInvoiceRecord,
    ) -> Result<(), StoreError> {
        self.processed
            .entry(record.vendor.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn find_vendor_memory(&self, vendor: &str) -> Result<Vec<VendorMemoryEntry>, StoreError> {
        Ok(self
            .memory
            .get(vendor)
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }

    async fn insert_vendor_memory(&self, entry: VendorMemoryEntry) -> Result<(), StoreError> {
        self.memory
            .entry(entry.vendor.clone())
            .or_default()
            .push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use factura_common::Invoice;

    fn test_invoice(vendor: &str, number: Option<&str>) -> Invoice {
        let number_json = match number {
            Some(n) => format!(r#""{n}""#),
            None => "null".to_string(),
        };
        serde_json::from_str(&format!(
            r#"{{"vendor": "{vendor}", "invoiceId": "INV-S-001",
                "fields": {{"invoiceNumber": {number_json}}}}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_processed() {
        let store = InMemoryRecordStore::new();
        let record = ProcessedInvoiceRecord::from_invoice(&test_invoice("Supplier GmbH", Some("2024-001")));

        store.insert_processed_invoice(record).await.unwrap();

        let found = store
            .find_processed_invoice("Supplier GmbH", "2024-001")
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().invoice_number.as_deref(), Some("2024-001"));
    }

    #[tokio::test]
    async fn test_find_is_scoped_to_vendor() {
        let store = InMemoryRecordStore::new();
        let record = ProcessedInvoiceRecord::from_invoice(&test_invoice("Supplier GmbH", Some("2024-001")));
        store.insert_processed_invoice(record).await.unwrap();

        let other = store
            .find_processed_invoice("Parts AG", "2024-001")
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_numberless_records_never_match() {
        let store = InMemoryRecordStore::new();
        let record = ProcessedInvoiceRecord::from_invoice(&test_invoice("Supplier GmbH", None));
        store.insert_processed_invoice(record).await.unwrap();

        // The record exists but cannot be found by any number
        assert_eq!(store.processed_count(), 1);
        let found = store
            .find_processed_invoice("Supplier GmbH", "2024-001")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_vendor_memory_round_trip() {
        let store = InMemoryRecordStore::new();
        let entry = VendorMemoryEntry::new(
            "Supplier GmbH",
            "serviceDate",
            "usually one week before invoice date",
            0.7,
            Utc::now(),
        );
        let id = entry.id;

        store.insert_vendor_memory(entry).await.unwrap();

        let entries = store.find_vendor_memory("Supplier GmbH").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].field, "serviceDate");

        let none = store.find_vendor_memory("Parts AG").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_memory_preserves_insertion_order() {
        let store = InMemoryRecordStore::new();
        for field in ["serviceDate", "currency", "serviceDate"] {
            store
                .insert_vendor_memory(VendorMemoryEntry::new(
                    "Supplier GmbH",
                    field,
                    "reviewer confirmed",
                    0.7,
                    Utc::now(),
                ))
                .await
                .unwrap();
        }

        let entries = store.find_vendor_memory("Supplier GmbH").await.unwrap();
        let fields: Vec<&str> = entries.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["serviceDate", "currency", "serviceDate"]);
        assert_eq!(store.memory_count(), 3);
    }
}
