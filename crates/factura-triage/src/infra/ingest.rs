//! JSON file ingest
//!
//! Loaders for the two input files the demo runner consumes: extracted
//! invoices and human correction batches. Both files hold a single JSON
//! array.

use std::fs;
use std::path::Path;

use tracing::info;

use factura_common::{FacturaError, HumanCorrectionBatch, Invoice, Result};

/// Load extracted invoices from a JSON array file
pub fn load_invoices(path: &Path) -> Result<Vec<Invoice>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        FacturaError::Config(format!("Failed to read invoices file {}: {}", path.display(), e))
    })?;
    let invoices: Vec<Invoice> = serde_json::from_str(&raw)?;
    info!(count = invoices.len(), path = %path.display(), "Loaded invoices");
    Ok(invoices)
}

/// Load human correction batches from a JSON array file
pub fn load_corrections(path: &Path) -> Result<Vec<HumanCorrectionBatch>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        FacturaError::Config(format!(
            "Failed to read corrections file {}: {}",
            path.display(),
            e
        ))
    })?;
    let batches: Vec<HumanCorrectionBatch> = serde_json::from_str(&raw)?;
    info!(count = batches.len(), path = %path.display(), "Loaded correction batches");
    Ok(batches)
}
