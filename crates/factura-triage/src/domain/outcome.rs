//! Triage outcome types
//!
//! [`ReasoningTrace`] collects explanation fragments in pipeline order and
//! joins them into one string only when the result is assembled, so tests
//! and callers can work with individual fragments instead of substring
//! matching.

use serde::{Deserialize, Serialize};

use factura_common::Invoice;

use super::audit::AuditTrail;

/// Ordered explanation fragments for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReasoningTrace {
    fragments: Vec<String>,
}

impl ReasoningTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Fragments in pipeline order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Join fragments into the single explanation string
    pub fn render(&self) -> String {
        self.fragments.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl std::fmt::Display for ReasoningTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Outcome of processing one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    /// The input invoice, passed through unchanged
    pub normalized_invoice: Invoice,

    /// Suggested corrections in pipeline order (memory first, then rules)
    pub proposed_corrections: Vec<String>,

    /// Whether a human must review before acceptance
    pub requires_human_review: bool,

    /// Joined explanation of every step taken
    pub reasoning: String,

    /// Final confidence score, capped at the configured maximum
    pub confidence_score: f64,

    /// Reserved for same-run learning; always empty today
    pub memory_updates: Vec<String>,

    /// Timestamped record of what the run did
    pub audit_trail: AuditTrail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_fragments_with_spaces() {
        let mut trace = ReasoningTrace::new();
        trace.push("No memory found for vendor Parts AG.");
        trace.push("Detected VAT-inclusive pricing for Parts AG.");

        assert_eq!(
            trace.render(),
            "No memory found for vendor Parts AG. Detected VAT-inclusive pricing for Parts AG."
        );
        assert_eq!(trace.fragments().len(), 2);
    }

    #[test]
    fn test_empty_trace_renders_empty() {
        let trace = ReasoningTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.render(), "");
    }

    #[test]
    fn test_result_serializes_with_camel_case_keys() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"vendor": "Parts AG", "invoiceId": "INV-B-001"}"#,
        )
        .unwrap();

        let result = ProcessResult {
            normalized_invoice: invoice,
            proposed_corrections: vec!["Fix currency".to_string()],
            requires_human_review: true,
            reasoning: "Escalating for human review.".to_string(),
            confidence_score: 0.55,
            memory_updates: Vec::new(),
            audit_trail: AuditTrail::new(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("requiresHumanReview").is_some());
        assert!(value.get("proposedCorrections").is_some());
        assert!(value.get("confidenceScore").is_some());
        assert!(value.get("memoryUpdates").is_some());
        assert_eq!(value["normalizedInvoice"]["invoiceId"], "INV-B-001");
    }
}
