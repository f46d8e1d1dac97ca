//! Human review feedback consumed by the learning path

use serde::{Deserialize, Serialize};

/// Reviewer verdict on an escalated invoice
///
/// Verdict strings this build does not recognize deserialize to
/// [`ReviewDecision::Unspecified`], which is never learned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewDecision {
    Approved,
    Rejected,
    Unspecified,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "approved",
            ReviewDecision::Rejected => "rejected",
            ReviewDecision::Unspecified => "unspecified",
        }
    }

    /// Only approved batches feed learning
    pub fn is_approved(&self) -> bool {
        matches!(self, ReviewDecision::Approved)
    }
}

impl From<String> for ReviewDecision {
    fn from(s: String) -> Self {
        match s.as_str() {
            "approved" => ReviewDecision::Approved,
            "rejected" => ReviewDecision::Rejected,
            _ => ReviewDecision::Unspecified,
        }
    }
}

impl From<ReviewDecision> for String {
    fn from(decision: ReviewDecision) -> Self {
        decision.as_str().to_string()
    }
}

impl std::fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One corrected field from the reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionItem {
    /// Invoice field the reviewer corrected
    pub field: String,

    /// Reviewer's justification, stored verbatim into vendor memory
    pub reason: String,
}

/// Reviewed correction batch for one escalated invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanCorrectionBatch {
    /// Vendor identity key
    pub vendor: String,

    /// Invoice the review applied to
    pub invoice_id: String,

    /// Reviewer verdict; only `approved` batches are learned from
    pub final_decision: ReviewDecision,

    /// Corrected fields in review order
    pub corrections: Vec<CorrectionItem>,
}
