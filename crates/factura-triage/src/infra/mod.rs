//! Storage and ingest infrastructure
//!
//! Everything that touches disk or process memory: the record store trait
//! with its backends, and the JSON file loaders the demo binary uses.

pub mod ingest;
pub mod record_store;
pub mod sqlite_store;
