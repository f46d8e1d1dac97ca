//! Invoice - extracted invoice record entering triage
//!
//! Produced by an upstream extraction step and treated as read-only by the
//! engine: corrections are proposed, never applied in place. Field names
//! serialize in camelCase so extraction output parses unchanged.

use serde::{Deserialize, Serialize};

/// Extracted invoice as delivered by upstream extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Vendor identity key (exact match for memory recall and duplicate checks)
    pub vendor: String,

    /// Pipeline-assigned invoice identifier (e.g. "INV-A-001")
    pub invoice_id: String,

    /// Structured fields; extraction may have missed any of them
    #[serde(default)]
    pub fields: InvoiceFields,

    /// Raw document text, when extraction retained it
    #[serde(default)]
    pub raw_text: Option<String>,

    /// Prior extraction confidence (0.0-1.0); absent means 0.5
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Structured invoice fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFields {
    /// Vendor-assigned invoice number; one half of the duplicate key
    #[serde(default)]
    pub invoice_number: Option<String>,

    /// Invoice date as extracted (kept verbatim, format varies by vendor)
    #[serde(default)]
    pub invoice_date: Option<String>,

    /// Service/delivery date; the one field vendor memory can fill today
    #[serde(default)]
    pub service_date: Option<String>,

    /// ISO currency code, when extracted
    #[serde(default)]
    pub currency: Option<String>,

    /// Line items in document order
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// One extracted line item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog SKU, when extraction matched one
    #[serde(default)]
    pub sku: Option<String>,

    /// Free-text item description
    #[serde(default)]
    pub description: Option<String>,
}

impl Invoice {
    /// Prior confidence with the default applied for absent values
    pub fn prior_confidence(&self) -> f64 {
        self.confidence.unwrap_or(crate::DEFAULT_PRIOR_CONFIDENCE)
    }

    /// Whether the raw text contains `needle` (case-sensitive)
    pub fn raw_text_contains(&self, needle: &str) -> bool {
        self.raw_text
            .as_deref()
            .is_some_and(|text| text.contains(needle))
    }

    /// Whether the raw text contains `needle`, ignoring ASCII case
    pub fn raw_text_contains_ci(&self, needle: &str) -> bool {
        self.raw_text
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
    }

    /// First line item, when any were extracted
    pub fn first_line_item(&self) -> Option<&LineItem> {
        self.fields.line_items.first()
    }
}

impl LineItem {
    /// Whether the description contains `needle`, ignoring ASCII case
    pub fn description_contains_ci(&self, needle: &str) -> bool {
        self.description
            .as_deref()
            .is_some_and(|desc| desc.to_lowercase().contains(&needle.to_lowercase()))
    }
}

impl std::fmt::Display for Invoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invoice({}, vendor={})", self.invoice_id, self.vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_extraction_output_shape() {
        let json = r#"{
            "vendor": "Supplier GmbH",
            "invoiceId": "INV-A-001",
            "fields": {
                "invoiceNumber": "RG-1001",
                "invoiceDate": "2024-01-15",
                "serviceDate": null,
                "currency": "EUR",
                "lineItems": [{"sku": "SKU-1", "description": "Widget"}]
            },
            "rawText": "Rechnung RG-1001 Leistungsdatum: 2024-01-10",
            "confidence": 0.6
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.vendor, "Supplier GmbH");
        assert_eq!(invoice.fields.invoice_number.as_deref(), Some("RG-1001"));
        assert!(invoice.fields.service_date.is_none());
        assert_eq!(invoice.fields.line_items.len(), 1);
        assert!((invoice.prior_confidence() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_missing_optionals_default() {
        let json = r#"{"vendor": "Parts AG", "invoiceId": "INV-B-001"}"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();

        assert!(invoice.fields.invoice_number.is_none());
        assert!(invoice.fields.line_items.is_empty());
        assert!(invoice.raw_text.is_none());
        assert!((invoice.prior_confidence() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_raw_text_matching() {
        let invoice = Invoice {
            vendor: "Parts AG".to_string(),
            invoice_id: "INV-B-002".to_string(),
            fields: InvoiceFields::default(),
            raw_text: Some("Alle Preise MwSt. inkl".to_string()),
            confidence: None,
        };

        assert!(invoice.raw_text_contains("MwSt. inkl"));
        assert!(!invoice.raw_text_contains("mwst. inkl"));
        assert!(invoice.raw_text_contains_ci("MWST. INKL"));
        assert!(!invoice.raw_text_contains("Skonto"));
    }

    #[test]
    fn test_line_item_description_matching() {
        let item = LineItem {
            sku: None,
            description: Some("Seefracht Hamburg-Rotterdam".to_string()),
        };
        assert!(item.description_contains_ci("seefracht"));
        assert!(!item.description_contains_ci("luftfracht"));

        let empty = LineItem::default();
        assert!(!empty.description_contains_ci("seefracht"));
    }
}
