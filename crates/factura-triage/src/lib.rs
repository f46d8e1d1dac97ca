//! # Factura Triage
//!
//! Decision engine for incoming invoice records: duplicate detection,
//! vendor-memory recall with confidence decay, heuristic rule evaluation,
//! an accept/escalate policy, and learning from human-approved corrections.
//!
//! ## Key Concepts
//!
//! - **Vendor memory**: append-only record of past human-approved
//!   corrections, recalled per vendor on every run
//! - **Confidence decay**: a one-time flat penalty on memory entries older
//!   than a threshold age, applied at read time
//! - **Proposal**: a suggested correction; never applied to the invoice
//! - **Escalation**: routing an invoice to human review
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      TriageEngine                        │
//! │  ┌───────────┐  ┌───────────┐  ┌────────┐  ┌─────────┐   │
//! │  │ Duplicate │→ │  Vendor   │→ │ Rules  │→ │ Decide  │   │
//! │  │   check   │  │  recall   │  │        │  │         │   │
//! │  └─────┬─────┘  └─────┬─────┘  └────────┘  └────┬────┘   │
//! │        │              │                         │        │
//! │  ┌─────┴──────────────┴─────────────────────────┴────┐   │
//! │  │                   RecordStore                     │   │
//! │  │      (in-memory for tests, SQLite for runs)       │   │
//! │  └───────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Learning runs separately: an approved human correction batch becomes new
//! vendor-memory entries, consumed by the next recall for that vendor.

pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;

// Re-export core types
pub use config::TriageConfig;
pub use domain::audit::{AuditStage, AuditStep, AuditTrail};
pub use domain::decision::{Decision, DecisionPolicy};
pub use domain::outcome::{ProcessResult, ReasoningTrace};
pub use domain::recall::{RecallConfig, RecallReport};
pub use domain::rules::{HeuristicRule, RuleReport, RULE_SET};
pub use engine::TriageEngine;

// Re-export infrastructure
pub use infra::ingest::{load_corrections, load_invoices};
pub use infra::record_store::{InMemoryRecordStore, RecordStore};
pub use infra::sqlite_store::SqliteRecordStore;

/// Triage engine version
pub const TRIAGE_VERSION: &str = "0.1.0";

/// Memory age beyond which the decay penalty applies, in days
pub const DECAY_AGE_DAYS: f64 = 30.0;

/// Flat confidence penalty applied once past the decay age
pub const DECAY_PENALTY: f64 = 0.05;

/// Effective confidence below which a memory entry is ignored for a run
pub const MIN_EFFECTIVE_CONFIDENCE: f64 = 0.4;

/// Weight of an applied memory entry's effective confidence in the score
pub const MEMORY_CONFIDENCE_WEIGHT: f64 = 0.1;

/// Confidence added by each matched heuristic rule
pub const RULE_CONFIDENCE_STEP: f64 = 0.05;

/// Score needed (with vendor memory present) to auto-apply corrections
pub const AUTO_APPLY_THRESHOLD: f64 = 0.8;

/// Upper bound on the reported confidence score
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Confidence assigned to newly learned memory entries (0.6 base + 0.1 approval bonus)
pub const LEARNED_CONFIDENCE: f64 = 0.7;

/// The one invoice field vendor memory can fill today
pub const SERVICE_DATE_FIELD: &str = "serviceDate";
