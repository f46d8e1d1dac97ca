//! Review decision policy
//!
//! Maps the pipeline's accumulated evidence to one of three outcomes. The
//! ladder is strict: a clean invoice is accepted outright, corrections
//! auto-apply only when the vendor has memory and the score clears the
//! threshold, and everything else goes to a human.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal outcome for one invoice run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    /// No proposals at all; the invoice passes untouched
    AutoAccept,
    /// Proposals exist, vendor memory exists, and confidence is high
    AutoApply,
    /// Anything else; a human reviews the proposals
    Escalate,
}

impl Decision {
    /// Whether this outcome routes the invoice to a human
    pub fn requires_human_review(&self) -> bool {
        matches!(self, Decision::Escalate)
    }

    /// Reasoning fragment announcing the decision
    pub fn fragment(&self) -> &'static str {
        match self {
            Decision::AutoAccept => "No issues detected. Auto-accepting invoice.",
            Decision::AutoApply => {
                "High confidence based on learned memory. Auto-applying corrections."
            }
            Decision::Escalate => {
                "No prior memory or confidence not high enough. Escalating for human review."
            }
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::AutoAccept => "auto-accept",
            Decision::AutoApply => "auto-apply",
            Decision::Escalate => "escalate",
        };
        write!(f, "{}", s)
    }
}

/// Tuning for the decision step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPolicy {
    /// Minimum confidence for auto-applying corrections
    pub auto_apply_threshold: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            auto_apply_threshold: crate::AUTO_APPLY_THRESHOLD,
        }
    }
}

impl DecisionPolicy {
    /// Pick the outcome for one invoice run
    ///
    /// `memory_present` is the pre-filter vendor memory check: decayed
    /// entries still count as review history here.
    pub fn decide(&self, proposal_count: usize, memory_present: bool, confidence: f64) -> Decision {
        if proposal_count == 0 {
            Decision::AutoAccept
        } else if memory_present && confidence >= self.auto_apply_threshold {
            Decision::AutoApply
        } else {
            Decision::Escalate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_proposals_auto_accepts() {
        let policy = DecisionPolicy::default();
        // Memory and confidence are irrelevant without proposals
        assert_eq!(policy.decide(0, true, 0.99), Decision::AutoAccept);
        assert_eq!(policy.decide(0, false, 0.1), Decision::AutoAccept);
        assert!(!Decision::AutoAccept.requires_human_review());
    }

    #[test]
    fn test_auto_apply_needs_memory_and_confidence() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.decide(2, true, 0.85), Decision::AutoApply);
        // High confidence without memory still escalates
        assert_eq!(policy.decide(2, false, 0.85), Decision::Escalate);
        // Memory without confidence still escalates
        assert_eq!(policy.decide(2, true, 0.79), Decision::Escalate);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.decide(1, true, 0.8), Decision::AutoApply);
    }

    #[test]
    fn test_only_escalate_requires_review() {
        assert!(Decision::Escalate.requires_human_review());
        assert!(!Decision::AutoApply.requires_human_review());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Decision::AutoAccept.to_string(), "auto-accept");
        assert_eq!(Decision::AutoApply.to_string(), "auto-apply");
        assert_eq!(Decision::Escalate.to_string(), "escalate");
    }

    proptest! {
        #[test]
        fn property_zero_proposals_always_accept(
            memory in any::<bool>(),
            confidence in 0.0f64..2.0,
        ) {
            let policy = DecisionPolicy::default();
            prop_assert_eq!(policy.decide(0, memory, confidence), Decision::AutoAccept);
        }

        #[test]
        fn property_no_memory_never_auto_applies(
            proposals in 1usize..10,
            confidence in 0.0f64..2.0,
        ) {
            let policy = DecisionPolicy::default();
            prop_assert_eq!(policy.decide(proposals, false, confidence), Decision::Escalate);
        }
    }
}
