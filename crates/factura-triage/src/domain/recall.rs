//! Vendor memory recall
//!
//! Recall fetches every memory entry for the invoice's vendor and turns the
//! usable ones into correction proposals:
//!
//! 1. Compute each entry's age; entries past the decay age lose a one-time
//!    flat penalty (decay is a read-time adjustment, never persisted)
//! 2. Drop entries whose effective confidence falls below the floor
//! 3. Surviving entries for a field the invoice is missing become proposals
//!    and add `effective confidence x weight` to the running score
//!
//! Only the service-date field is wired to an action today; entries for
//! other fields are counted but produce no proposal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use factura_common::{Invoice, VendorMemoryEntry};

/// Tuning for the recall step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallConfig {
    /// Age in days past which the decay penalty applies
    pub decay_age_days: f64,
    /// Flat penalty subtracted once past the decay age
    pub decay_penalty: f64,
    /// Effective confidence below which an entry is ignored
    pub min_effective_confidence: f64,
    /// Weight of an applied entry's effective confidence in the score
    pub memory_weight: f64,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            decay_age_days: crate::DECAY_AGE_DAYS,
            decay_penalty: crate::DECAY_PENALTY,
            min_effective_confidence: crate::MIN_EFFECTIVE_CONFIDENCE,
            memory_weight: crate::MEMORY_CONFIDENCE_WEIGHT,
        }
    }
}

impl RecallConfig {
    /// Stored confidence adjusted for age, before the floor filter
    pub fn effective_confidence(&self, entry: &VendorMemoryEntry, now: DateTime<Utc>) -> f64 {
        let mut effective = entry.confidence;
        if entry.age_days(now) > self.decay_age_days {
            effective -= self.decay_penalty;
        }
        effective
    }
}

/// Outcome of recalling one vendor's memory against one invoice
#[derive(Debug, Clone)]
pub struct RecallReport {
    /// Entries fetched for the vendor, before decay filtering
    pub entries_found: usize,
    /// Proposals derived from usable entries, in entry order
    pub proposals: Vec<String>,
    /// Total confidence contribution from applied entries
    pub confidence_delta: f64,
    /// Explanation fragment for the reasoning trace
    pub fragment: String,
}

impl RecallReport {
    /// Evaluate recall for `invoice` against the vendor's `entries`
    pub fn from_entries(
        entries: &[VendorMemoryEntry],
        invoice: &Invoice,
        now: DateTime<Utc>,
        config: &RecallConfig,
    ) -> Self {
        let mut proposals = Vec::new();
        let mut confidence_delta = 0.0;

        for entry in entries {
            let effective = config.effective_confidence(entry, now);

            // Ignore weak memory for this run; the entry itself is untouched
            if effective < config.min_effective_confidence {
                debug!(
                    entry_id = %entry.id,
                    effective,
                    "Skipping weak memory entry"
                );
                continue;
            }

            if entry.field == crate::SERVICE_DATE_FIELD && invoice.fields.service_date.is_none() {
                proposals.push(format!(
                    "Memory suggests filling {} because: {}",
                    entry.field, entry.reason
                ));
                confidence_delta += effective * config.memory_weight;
            }
        }

        let fragment = if entries.is_empty() {
            format!("No memory found for vendor {}.", invoice.vendor)
        } else {
            format!(
                "Found {} memory entries for vendor {}.",
                entries.len(),
                invoice.vendor
            )
        };

        Self {
            entries_found: entries.len(),
            proposals,
            confidence_delta,
            fragment,
        }
    }

    /// Whether any memory existed for the vendor, decayed or not
    ///
    /// The auto-apply branch checks this pre-filter count on purpose: stale
    /// memory still proves the vendor has review history.
    pub fn memory_present(&self) -> bool {
        self.entries_found > 0
    }
}
