use super::ComparisonResult;
use crate::errors::AuditError;

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// The candidate was extracted, normalized and compared.
    Compared(ComparisonResult),
    /// The candidate could not be compared (only in `skip-candidate` mode).
    Fatal {
        candidate_id: String,
        error: AuditError,
    },
}

impl CandidateOutcome {
    pub fn candidate_id(&self) -> &str {
        match self {
            Self::Compared(result) => &result.candidate_id,
            Self::Fatal { candidate_id, .. } => candidate_id,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Compared(result) if result.ok)
    }
}

/// Overall process outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// Every candidate's outcome for one run, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub reference_id: String,
    pub reference_count: usize,
    pub outcomes: Vec<CandidateOutcome>,
}

impl AuditReport {
    /// Success only if every candidate conforms. An empty run is a success.
    pub fn status(&self) -> ExitStatus {
        if self.outcomes.iter().all(CandidateOutcome::is_ok) {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }

    pub fn diagnostic_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| match outcome {
                CandidateOutcome::Compared(result) => result.diagnostics.len(),
                CandidateOutcome::Fatal { .. } => 0,
            })
            .sum()
    }

    pub fn fatal_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, CandidateOutcome::Fatal { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Diagnostic, DiagnosticKind};

    fn report(outcomes: Vec<CandidateOutcome>) -> AuditReport {
        AuditReport {
            reference_id: "reference".into(),
            reference_count: 1,
            outcomes,
        }
    }

    #[test]
    fn test_all_clean_is_success() {
        let r = report(vec![
            CandidateOutcome::Compared(ComparisonResult::from_diagnostics("a", vec![])),
            CandidateOutcome::Compared(ComparisonResult::from_diagnostics("b", vec![])),
        ]);
        assert_eq!(r.status(), ExitStatus::Success);
        assert_eq!(r.status().code(), 0);
    }

    #[test]
    fn test_any_diagnostic_is_failure() {
        let r = report(vec![
            CandidateOutcome::Compared(ComparisonResult::from_diagnostics("a", vec![])),
            CandidateOutcome::Compared(ComparisonResult::from_diagnostics(
                "b",
                vec![Diagnostic::at(0, DiagnosticKind::NameMismatch, "x")],
            )),
        ]);
        assert_eq!(r.status(), ExitStatus::Failure);
        assert_eq!(r.diagnostic_count(), 1);
    }

    #[test]
    fn test_fatal_candidate_is_failure() {
        let r = report(vec![CandidateOutcome::Fatal {
            candidate_id: "a".into(),
            error: AuditError::parse("a.rs", "no matches"),
        }]);
        assert_eq!(r.status(), ExitStatus::Failure);
        assert_eq!(r.fatal_count(), 1);
        assert_eq!(r.outcomes[0].candidate_id(), "a");
    }
}
