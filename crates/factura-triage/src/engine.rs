//! Triage Engine
//!
//! Drives the full pipeline for one invoice: duplicate check, vendor memory
//! recall, heuristic rules, decision, audit trail. Also hosts the learning
//! ingester that turns approved human corrections into vendor memory.
//!
//! Storage failures from the record store propagate unmodified; the engine
//! never retries or downgrades them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use factura_common::{
    HumanCorrectionBatch, Invoice, ProcessedInvoiceRecord, Result, StoreError, VendorMemoryEntry,
};

use crate::config::TriageConfig;
use crate::domain::audit::{AuditStage, AuditTrail};
use crate::domain::decision::DecisionPolicy;
use crate::domain::outcome::{ProcessResult, ReasoningTrace};
use crate::domain::recall::{RecallConfig, RecallReport};
use crate::domain::rules::RuleReport;
use crate::infra::record_store::RecordStore;

/// The invoice triage engine
pub struct TriageEngine {
    store: Arc<dyn RecordStore>,
    recall: RecallConfig,
    policy: DecisionPolicy,
}

impl TriageEngine {
    /// Create an engine with default tuning
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            recall: RecallConfig::default(),
            policy: DecisionPolicy::default(),
        }
    }

    /// Create an engine tuned from configuration
    pub fn with_config(store: Arc<dyn RecordStore>, config: &TriageConfig) -> Self {
        Self {
            store,
            recall: config.recall.clone(),
            policy: DecisionPolicy {
                auto_apply_threshold: config.auto_apply_threshold,
            },
        }
    }

    /// Run the triage pipeline for one invoice
    ///
    /// Every run, including auto-accepted ones, records the invoice as
    /// processed so later submissions of the same vendor and invoice number
    /// are caught as duplicates. Duplicate runs short-circuit before recall
    /// and skip the processed-invoice write.
    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.invoice_id, vendor = %invoice.vendor))]
    pub async fn process_invoice(&self, invoice: Invoice) -> Result<ProcessResult> {
        let mut audit = AuditTrail::new();
        audit.record(
            AuditStage::Recall,
            format!("Started processing invoice {}", invoice.invoice_id),
        );

        if self.is_duplicate(&invoice).await? {
            warn!("Duplicate invoice, escalating without learning");
            audit.record(AuditStage::Decide, "Duplicate invoice detected");

            // The prior confidence passes through as-is here, above the
            // usual cap if the extractor reported it that way
            let confidence_score = invoice.prior_confidence();
            return Ok(ProcessResult {
                normalized_invoice: invoice,
                proposed_corrections: Vec::new(),
                requires_human_review: true,
                reasoning: "Duplicate invoice detected. Escalating and skipping learning."
                    .to_string(),
                confidence_score,
                memory_updates: Vec::new(),
                audit_trail: audit,
            });
        }

        let mut reasoning = ReasoningTrace::new();
        let mut confidence_score = invoice.prior_confidence();

        // Recall vendor memory
        let entries = self.store.find_vendor_memory(&invoice.vendor).await?;
        let recall = RecallReport::from_entries(&entries, &invoice, Utc::now(), &self.recall);
        audit.record(
            AuditStage::Recall,
            format!("Vendor memory count: {}", recall.entries_found),
        );

        let memory_present = recall.memory_present();
        let mut proposed_corrections = recall.proposals;
        confidence_score += recall.confidence_delta;
        reasoning.push(recall.fragment);

        // Apply vendor heuristics
        let rules = RuleReport::evaluate(&invoice);
        debug!(matched = rules.matched, "Evaluated vendor rules");
        proposed_corrections.extend(rules.proposals);
        for fragment in rules.fragments {
            reasoning.push(fragment);
        }
        confidence_score += rules.confidence_delta;

        audit.record(
            AuditStage::Apply,
            format!("Proposed corrections count: {}", proposed_corrections.len()),
        );

        // Decide
        let decision =
            self.policy
                .decide(proposed_corrections.len(), memory_present, confidence_score);
        reasoning.push(decision.fragment());
        audit.record(
            AuditStage::Decide,
            format!("requiresHumanReview = {}", decision.requires_human_review()),
        );

        // Learning only happens later, from reviewed corrections
        audit.record(AuditStage::Learn, "No learning applied in this run");

        self.store
            .insert_processed_invoice(ProcessedInvoiceRecord::from_invoice(&invoice))
            .await?;

        info!(
            decision = %decision,
            confidence = confidence_score,
            proposals = proposed_corrections.len(),
            "Invoice triaged"
        );

        Ok(ProcessResult {
            normalized_invoice: invoice,
            proposed_corrections,
            requires_human_review: decision.requires_human_review(),
            reasoning: reasoning.render(),
            confidence_score: confidence_score.min(crate::CONFIDENCE_CAP),
            memory_updates: Vec::new(),
            audit_trail: audit,
        })
    }

    /// Ingest one reviewed correction batch into vendor memory
    ///
    /// Only approved batches teach anything; every correction in an approved
    /// batch becomes its own memory entry at the fixed learned confidence.
    #[instrument(skip(self, batch), fields(invoice_id = %batch.invoice_id, vendor = %batch.vendor))]
    pub async fn learn_from_human(&self, batch: &HumanCorrectionBatch) -> Result<()> {
        if !batch.final_decision.is_approved() {
            debug!(decision = %batch.final_decision, "Skipping non-approved correction batch");
            return Ok(());
        }

        for correction in &batch.corrections {
            let entry = VendorMemoryEntry::new(
                batch.vendor.clone(),
                correction.field.clone(),
                correction.reason.clone(),
                crate::LEARNED_CONFIDENCE,
                Utc::now(),
            );
            self.store.insert_vendor_memory(entry).await?;

            info!(
                vendor = %batch.vendor,
                field = %correction.field,
                "Learned correction into vendor memory"
            );
        }
        Ok(())
    }

    /// An invoice without a number can never match a stored record, so the
    /// lookup is skipped entirely
    async fn is_duplicate(&self, invoice: &Invoice) -> std::result::Result<bool, StoreError> {
        let Some(number) = invoice.fields.invoice_number.as_deref() else {
            return Ok(false);
        };
        let existing = self
            .store
            .find_processed_invoice(&invoice.vendor, number)
            .await?;
        Ok(existing.is_some())
    }
}
