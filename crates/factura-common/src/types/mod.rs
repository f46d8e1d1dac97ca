//! Core data types for Factura

pub mod correction;
pub mod invoice;
pub mod memory;
