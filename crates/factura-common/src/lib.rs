//! # Factura Common
//!
//! Shared types and errors for the Factura invoice triage system.
//!
//! ## Core Types
//!
//! - [`Invoice`]: extracted invoice record entering triage
//! - [`VendorMemoryEntry`]: one learned correction for a vendor
//! - [`ProcessedInvoiceRecord`]: duplicate-detection fact
//! - [`HumanCorrectionBatch`]: reviewer feedback consumed by learning
//! - [`FacturaError`]/[`StoreError`]: unified error surface

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{FacturaError, Result, StoreError};
pub use types::{
    correction::{CorrectionItem, HumanCorrectionBatch, ReviewDecision},
    invoice::{Invoice, InvoiceFields, LineItem},
    memory::{ProcessedInvoiceRecord, VendorMemoryEntry},
};

/// Factura version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prior confidence assumed when extraction supplied none
pub const DEFAULT_PRIOR_CONFIDENCE: f64 = 0.5;
