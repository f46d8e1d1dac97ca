//! Triage domain logic
//!
//! Pure, synchronous pieces of the pipeline. Storage I/O stays in
//! [`crate::infra`]; the engine wires both together.

pub mod audit;
pub mod decision;
pub mod outcome;
pub mod recall;
pub mod rules;
