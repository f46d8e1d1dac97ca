//! Audit trail for one processing run
//!
//! Every run appends timestamped steps describing what the engine did.
//! The trail is part of the result and serializes as a plain array, so
//! downstream review tooling can replay a decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline stage an audit step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStage {
    /// Duplicate check and vendor-memory recall
    Recall,
    /// Heuristic rule evaluation and proposal assembly
    Apply,
    /// Final accept/escalate decision
    Decide,
    /// Learning outcome for this run
    Learn,
}

impl std::fmt::Display for AuditStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditStage::Recall => write!(f, "recall"),
            AuditStage::Apply => write!(f, "apply"),
            AuditStage::Decide => write!(f, "decide"),
            AuditStage::Learn => write!(f, "learn"),
        }
    }
}

/// One timestamped audit entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// Stage that produced this step
    pub step: AuditStage,

    /// When the step was recorded
    pub timestamp: DateTime<Utc>,

    /// What happened, in free text
    pub details: String,
}

/// Append-only sequence of audit steps for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditTrail {
    steps: Vec<AuditStep>,
}

impl AuditTrail {
    /// Start an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, timestamped now
    pub fn record(&mut self, step: AuditStage, details: impl Into<String>) {
        self.steps.push(AuditStep {
            step,
            timestamp: Utc::now(),
            details: details.into(),
        });
    }

    /// Steps in the order they were recorded
    pub fn steps(&self) -> &[AuditStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
