//! Verdict classification.

use crate::{CheckpointVerdict, VerificationOutcome, VerificationStatus};

/// Category a backend verdict collapses into for transport mapping.
///
/// Derived on demand, never stored or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The checkpoint passed; no further action required.
    Allowed,
    /// Verification still in progress; the caller resubmits later with
    /// the same verification id.
    Running,
    /// The checkpoint explicitly rejected the request.
    Denied,
    /// The verdict matches no recognized shape. Treated as a server-side
    /// failure, not a client error.
    Undetermined,
}

impl CheckpointVerdict {
    /// Collapses the verdict into its transport outcome.
    ///
    /// Predicates run in the backend's precedence order: allowed, running,
    /// denied. Anything that matches none of them is undetermined.
    pub fn outcome(&self) -> Outcome {
        if self.is_allowed() {
            Outcome::Allowed
        } else if self.is_running() {
            Outcome::Running
        } else if self.is_denied() {
            Outcome::Denied
        } else {
            Outcome::Undetermined
        }
    }

    /// The checkpoint passed. A successful verdict without a verification
    /// record counts: the backend approved without running a workflow.
    pub fn is_allowed(&self) -> bool {
        self.success
            && match &self.verification {
                None => true,
                Some(v) => {
                    v.status == VerificationStatus::Complete
                        && v.outcome == VerificationOutcome::Approved
                }
            }
    }

    /// A challenge was issued to the end user and has not yet resolved.
    pub fn is_running(&self) -> bool {
        self.success
            && matches!(
                &self.verification,
                Some(v) if matches!(
                    v.status,
                    VerificationStatus::Pending | VerificationStatus::Blocked
                )
            )
    }

    /// The verification concluded with an explicit denial.
    pub fn is_denied(&self) -> bool {
        matches!(
            &self.verification,
            Some(v) if v.outcome == VerificationOutcome::Denied
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Verification;

    fn verdict(
        success: bool,
        status: VerificationStatus,
        outcome: VerificationOutcome,
    ) -> CheckpointVerdict {
        CheckpointVerdict {
            success,
            verification: Some(Verification {
                id: "v-1".to_owned(),
                status,
                outcome,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn approved_complete_is_allowed() {
        let v = verdict(
            true,
            VerificationStatus::Complete,
            VerificationOutcome::Approved,
        );
        assert_eq!(v.outcome(), Outcome::Allowed);
    }

    #[test]
    fn success_without_verification_is_allowed() {
        let v = CheckpointVerdict {
            success: true,
            ..Default::default()
        };
        assert_eq!(v.outcome(), Outcome::Allowed);
    }

    #[test]
    fn pending_is_running() {
        let v = verdict(
            true,
            VerificationStatus::Pending,
            VerificationOutcome::Pending,
        );
        assert_eq!(v.outcome(), Outcome::Running);
    }

    #[test]
    fn blocked_is_running() {
        let v = verdict(
            true,
            VerificationStatus::Blocked,
            VerificationOutcome::Pending,
        );
        assert_eq!(v.outcome(), Outcome::Running);
    }

    #[test]
    fn denied_outcome_is_denied() {
        let v = verdict(
            true,
            VerificationStatus::Complete,
            VerificationOutcome::Denied,
        );
        assert_eq!(v.outcome(), Outcome::Denied);
    }

    #[test]
    fn denial_applies_even_without_success_flag() {
        let v = verdict(
            false,
            VerificationStatus::Complete,
            VerificationOutcome::Denied,
        );
        assert_eq!(v.outcome(), Outcome::Denied);
    }

    #[test]
    fn running_takes_precedence_over_denied() {
        // A denial recorded while the workflow is still pending keeps the
        // running classification, matching the backend's precedence.
        let v = verdict(
            true,
            VerificationStatus::Pending,
            VerificationOutcome::Denied,
        );
        assert_eq!(v.outcome(), Outcome::Running);
    }

    #[test]
    fn failed_status_is_undetermined() {
        let v = verdict(
            true,
            VerificationStatus::Failed,
            VerificationOutcome::Error,
        );
        assert_eq!(v.outcome(), Outcome::Undetermined);
    }

    #[test]
    fn unknown_discriminants_are_undetermined() {
        let v = verdict(
            true,
            VerificationStatus::Unknown,
            VerificationOutcome::Unknown,
        );
        assert_eq!(v.outcome(), Outcome::Undetermined);
    }

    #[test]
    fn unsuccessful_empty_verdict_is_undetermined() {
        let v = CheckpointVerdict::default();
        assert_eq!(v.outcome(), Outcome::Undetermined);
    }
}
