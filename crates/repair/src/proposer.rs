//! The external repair-proposer boundary.
//!
//! Items the deterministic normalizer cannot fix may be escalated to an
//! external content proposer. That collaborator is untrusted: every
//! candidate it returns goes back through the full audit engine, and the
//! call itself is timeout-bound so a hung proposer cannot stall a batch.

use async_trait::async_trait;
use qbank_core::{ItemReport, Verdict};
use qbank_quality::AuditEngine;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Why a proposal could not be obtained.
#[derive(Debug, Error)]
pub enum ProposeError {
    /// The proposer cannot be reached
    #[error("proposer unavailable: {0}")]
    Unavailable(String),

    /// The proposer looked at the item and declined
    #[error("proposer declined: {0}")]
    Declined(String),

    /// The proposal did not arrive in time
    #[error("proposal timed out after {0:?}")]
    TimedOut(Duration),

    /// Anything else from the collaborator
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An external collaborator that proposes a replacement for a failing
/// item. Implementations live outside this crate; tests use in-process
/// stubs.
#[async_trait]
pub trait RepairProposer: Send + Sync {
    /// Propose a candidate replacement for `item`, given its audit report.
    async fn propose(&self, item: &Value, report: &ItemReport) -> Result<Value, ProposeError>;
}

/// The outcome of one escalation.
#[derive(Debug)]
pub enum EscalationResult {
    /// The item did not fail its audit; no proposer call was made
    NotNeeded {
        /// The item's audit report
        report: ItemReport,
    },

    /// The proposer's candidate re-audited clean enough to accept
    Replaced {
        /// The accepted candidate
        item: Value,
        /// Audit of the original item
        before: ItemReport,
        /// Audit of the candidate
        after: ItemReport,
    },

    /// The candidate still failed its re-audit and was rejected
    Rejected {
        /// Audit of the original item
        before: ItemReport,
        /// Audit of the candidate
        after: ItemReport,
    },

    /// No candidate was obtained
    Failed {
        /// Audit of the original item
        before: ItemReport,
        /// What went wrong
        error: ProposeError,
    },
}

/// Escalates failing items to a proposer and re-validates the result.
pub struct Escalator<P> {
    engine: AuditEngine,
    proposer: P,
    timeout: Duration,
}

impl<P: RepairProposer> Escalator<P> {
    /// An escalator with a 30-second proposal timeout.
    pub fn new(engine: AuditEngine, proposer: P) -> Self {
        Self {
            engine,
            proposer,
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the proposal timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Audit `item` and, only if it fails, ask the proposer for a
    /// replacement. A candidate is accepted iff its own fresh audit does
    /// not fail.
    pub async fn escalate(&self, item: &Value) -> EscalationResult {
        let before = self.engine.audit_item(item);
        if before.verdict != Verdict::Fail {
            return EscalationResult::NotNeeded { report: before };
        }

        tracing::debug!(
            item = before.item_id.as_deref().unwrap_or("<no id>"),
            "escalating failed item to proposer"
        );

        let proposal = tokio::time::timeout(self.timeout, self.proposer.propose(item, &before));
        let candidate = match proposal.await {
            Err(_) => {
                return EscalationResult::Failed {
                    before,
                    error: ProposeError::TimedOut(self.timeout),
                }
            }
            Ok(Err(error)) => return EscalationResult::Failed { before, error },
            Ok(Ok(candidate)) => candidate,
        };

        let after = self.engine.audit_item(&candidate);
        if after.verdict == Verdict::Fail {
            tracing::warn!(
                item = before.item_id.as_deref().unwrap_or("<no id>"),
                "proposed candidate still fails; rejecting"
            );
            EscalationResult::Rejected { before, after }
        } else {
            EscalationResult::Replaced {
                item: candidate,
                before,
                after,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedProposer {
        candidate: Value,
    }

    #[async_trait]
    impl RepairProposer for FixedProposer {
        async fn propose(&self, _item: &Value, _report: &ItemReport) -> Result<Value, ProposeError> {
            Ok(self.candidate.clone())
        }
    }

    struct SlowProposer;

    #[async_trait]
    impl RepairProposer for SlowProposer {
        async fn propose(&self, _item: &Value, _report: &ItemReport) -> Result<Value, ProposeError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("the escalator times out first")
        }
    }

    fn valid_item(id: &str) -> Value {
        json!({
            "id": id,
            "type": "multipleChoice",
            "stem": "Which assessment finding requires immediate follow-up?",
            "options": [
                {"id": "a", "text": "Heart rate 88"},
                {"id": "b", "text": "Oxygen saturation 84%"},
            ],
            "correctOptionId": "b",
            "scoring": {"method": "dichotomous", "maxPoints": 1},
            "rationale": {
                "whyCorrect": "Saturation of 84% indicates hypoxemia and is the priority.",
                "whyIncorrect": "The remaining values are within expected limits here.",
                "reviewUnits": ["oxygenation"],
            },
            "pedagogy": {
                "cognitiveLevel": "analyze",
                "judgmentStep": "recognizeCues",
                "contentCategory": "physiologicalAdaptation",
                "difficulty": 3,
                "tags": ["respiratory"],
            },
        })
    }

    fn failing_item(id: &str) -> Value {
        let mut item = valid_item(id);
        item["correctOptionId"] = json!("z");
        item
    }

    #[tokio::test]
    async fn passing_items_never_reach_the_proposer() {
        let escalator = Escalator::new(
            AuditEngine::new(),
            FixedProposer {
                candidate: json!("should never be used"),
            },
        );
        let result = escalator.escalate(&valid_item("q-1")).await;
        assert!(matches!(
            result,
            EscalationResult::NotNeeded { report } if report.verdict == Verdict::Pass
        ));
    }

    #[tokio::test]
    async fn accepted_candidates_are_re_audited() {
        let escalator = Escalator::new(
            AuditEngine::new(),
            FixedProposer {
                candidate: valid_item("q-1"),
            },
        );
        let result = escalator.escalate(&failing_item("q-1")).await;
        match result {
            EscalationResult::Replaced { before, after, .. } => {
                assert_eq!(before.verdict, Verdict::Fail);
                assert_eq!(after.verdict, Verdict::Pass);
            }
            other => panic!("expected Replaced, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bad_candidates_are_rejected() {
        let escalator = Escalator::new(
            AuditEngine::new(),
            FixedProposer {
                candidate: failing_item("q-1"),
            },
        );
        let result = escalator.escalate(&failing_item("q-1")).await;
        assert!(matches!(result, EscalationResult::Rejected { after, .. }
            if after.verdict == Verdict::Fail));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_proposers_time_out() {
        let escalator = Escalator::new(AuditEngine::new(), SlowProposer)
            .with_timeout(Duration::from_millis(50));
        let result = escalator.escalate(&failing_item("q-1")).await;
        assert!(matches!(
            result,
            EscalationResult::Failed {
                error: ProposeError::TimedOut(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn proposer_errors_are_surfaced() {
        struct DecliningProposer;

        #[async_trait]
        impl RepairProposer for DecliningProposer {
            async fn propose(
                &self,
                _item: &Value,
                _report: &ItemReport,
            ) -> Result<Value, ProposeError> {
                Err(ProposeError::Declined("out of repair budget".to_string()))
            }
        }

        let escalator = Escalator::new(AuditEngine::new(), DecliningProposer);
        let result = escalator.escalate(&failing_item("q-1")).await;
        assert!(matches!(
            result,
            EscalationResult::Failed {
                error: ProposeError::Declined(_),
                ..
            }
        ));
    }
}
