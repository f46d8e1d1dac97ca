//! Factura Triage Binary
//!
//! Runs every extracted invoice through the triage pipeline, printing each
//! result, and feeds escalated invoices back through their reviewed
//! correction batches so later invoices benefit from the learned memory.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use factura_triage::{
    load_corrections, load_invoices, SqliteRecordStore, TriageConfig, TriageEngine, TRIAGE_VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Factura triage v{}", TRIAGE_VERSION);

    // Load configuration
    let config = TriageConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    // Open the database, creating its directory if needed
    let db_path = Path::new(&config.db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = Arc::new(SqliteRecordStore::open(db_path)?);
    let engine = TriageEngine::with_config(store, &config);

    let invoices = load_invoices(&config.invoices_path())?;
    let corrections = load_corrections(&config.corrections_path())?;

    for invoice in invoices {
        let invoice_id = invoice.invoice_id.clone();
        let result = engine.process_invoice(invoice).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);

        // Escalated invoices with a matching review batch teach the engine
        if result.requires_human_review {
            if let Some(batch) = corrections.iter().find(|c| c.invoice_id == invoice_id) {
                info!(invoice_id = %invoice_id, "Applying reviewed corrections");
                engine.learn_from_human(batch).await?;
            }
        }
    }

    info!("Triage run complete");
    Ok(())
}
