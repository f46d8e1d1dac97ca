//! Vendor memory and processed-invoice records
//!
//! Both are append-only facts: memory entries are written by the learning
//! path and only ever read afterwards (decay is computed at read time, never
//! persisted), and processed-invoice records exist purely for duplicate
//! detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::invoice::Invoice;

const MS_PER_DAY: f64 = 86_400_000.0;

/// One learned correction for a vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMemoryEntry {
    /// Unique entry ID
    pub id: Uuid,

    /// Vendor identity key
    pub vendor: String,

    /// Invoice field this entry informs (e.g. "serviceDate")
    pub field: String,

    /// Justification carried verbatim from the approved correction
    pub reason: String,

    /// Confidence at learning time (0.0-1.0)
    pub confidence: f64,

    /// When the entry was learned
    pub learned_at: DateTime<Utc>,
}

impl VendorMemoryEntry {
    /// Create an entry learned at `learned_at`
    pub fn new(
        vendor: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
        confidence: f64,
        learned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vendor: vendor.into(),
            field: field.into(),
            reason: reason.into(),
            confidence,
            learned_at,
        }
    }

    /// Fractional age of this entry in days, relative to `now`
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        (now - self.learned_at).num_milliseconds() as f64 / MS_PER_DAY
    }
}

/// Fact that an invoice was processed, kept for duplicate detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedInvoiceRecord {
    /// Vendor identity key
    pub vendor: String,

    /// Vendor-assigned number; a record without one never matches a lookup
    pub invoice_number: Option<String>,

    /// Invoice date as extracted
    pub invoice_date: Option<String>,
}

impl ProcessedInvoiceRecord {
    /// Build the record to persist once an invoice finishes processing
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            vendor: invoice.vendor.clone(),
            invoice_number: invoice.fields.invoice_number.clone(),
            invoice_date: invoice.fields.invoice_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_age_days_fractional() {
        let now = Utc::now();
        let entry = VendorMemoryEntry::new(
            "Supplier GmbH",
            "serviceDate",
            "usually 5 days before invoice date",
            0.7,
            now - Duration::hours(36),
        );

        assert!((entry.age_days(now) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let now = Utc::now();
        let a = VendorMemoryEntry::new("V", "serviceDate", "r", 0.7, now);
        let b = VendorMemoryEntry::new("V", "serviceDate", "r", 0.7, now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_from_invoice_copies_duplicate_key() {
        let json = r#"{
            "vendor": "Parts AG",
            "invoiceId": "INV-B-001",
            "fields": {"invoiceNumber": "P-77", "invoiceDate": "2024-02-01"}
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();

        let record = ProcessedInvoiceRecord::from_invoice(&invoice);
        assert_eq!(record.vendor, "Parts AG");
        assert_eq!(record.invoice_number.as_deref(), Some("P-77"));
        assert_eq!(record.invoice_date.as_deref(), Some("2024-02-01"));
    }
}
