//! Vendor heuristic rules
//!
//! A small fixed rule set encoding review-team knowledge about specific
//! vendors. Each rule is gated on an exact vendor name and a predicate over
//! the invoice's fields, raw text, or line items; a match contributes one
//! proposal, one reasoning fragment, and a flat confidence bump.

use factura_common::Invoice;

/// One vendor-specific heuristic
pub struct HeuristicRule {
    /// Exact vendor name this rule applies to
    pub vendor: &'static str,
    /// Correction proposal emitted on match
    pub proposal: &'static str,
    /// Reasoning fragment emitted on match
    pub fragment: &'static str,
    /// Predicate over the invoice contents
    pub condition: fn(&Invoice) -> bool,
}

/// The built-in rule set, evaluated in order
pub const RULE_SET: [HeuristicRule; 5] = [
    // Supplier GmbH invoices often carry the service date only in the
    // free-text footer, flagged by the German term "Leistungsdatum"
    HeuristicRule {
        vendor: "Supplier GmbH",
        proposal: "Service date missing. Raw text contains 'Leistungsdatum'. Suggest extracting serviceDate.",
        fragment: "Detected 'Leistungsdatum' in raw text for Supplier GmbH.",
        condition: |invoice| {
            invoice.fields.service_date.is_none() && invoice.raw_text_contains("Leistungsdatum")
        },
    },
    HeuristicRule {
        vendor: "Parts AG",
        proposal: "Raw text indicates prices include VAT. Recalculate tax and gross totals.",
        fragment: "Detected VAT-inclusive pricing for Parts AG.",
        condition: |invoice| {
            invoice.raw_text_contains("MwSt. inkl") || invoice.raw_text_contains_ci("vat")
        },
    },
    HeuristicRule {
        vendor: "Parts AG",
        proposal: "Currency missing but found in raw text. Suggest setting currency to EUR.",
        fragment: "Recovered missing currency from raw text.",
        condition: |invoice| {
            invoice.fields.currency.is_none() && invoice.raw_text_contains("Currency")
        },
    },
    HeuristicRule {
        vendor: "Freight & Co",
        proposal: "Skonto / discount terms detected in raw text.",
        fragment: "Detected Skonto terms for Freight & Co.",
        condition: |invoice| invoice.raw_text_contains_ci("skonto"),
    },
    HeuristicRule {
        vendor: "Freight & Co",
        proposal: "Line item description maps to FREIGHT SKU.",
        fragment: "Mapped shipping description to FREIGHT SKU.",
        condition: |invoice| match invoice.first_line_item() {
            Some(item) => {
                item.sku.is_none()
                    && (item.description_contains_ci("shipping")
                        || item.description_contains_ci("seefracht"))
            }
            None => false,
        },
    },
];

/// Outcome of running the rule set against one invoice
#[derive(Debug, Clone, Default)]
pub struct RuleReport {
    /// Proposals from matched rules, in rule order
    pub proposals: Vec<String>,
    /// Reasoning fragments from matched rules, in rule order
    pub fragments: Vec<String>,
    /// Number of rules that matched
    pub matched: usize,
    /// Total confidence contribution from matched rules
    pub confidence_delta: f64,
}

impl RuleReport {
    /// Run every rule whose vendor matches the invoice
    pub fn evaluate(invoice: &Invoice) -> Self {
        let mut report = Self::default();

        for rule in &RULE_SET {
            if invoice.vendor == rule.vendor && (rule.condition)(invoice) {
                report.proposals.push(rule.proposal.to_string());
                report.fragments.push(rule.fragment.to_string());
                report.matched += 1;
            }
        }

        report.confidence_delta = report.matched as f64 * crate::RULE_CONFIDENCE_STEP;
        report
    }
}
