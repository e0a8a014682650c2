//! Data model shared by extraction, normalization, comparison and reporting.

pub mod report;
pub mod types;

pub use report::{AuditReport, CandidateOutcome, ExitStatus};
pub use types::{
    CanonicalSignature, ComparisonResult, DeclarationSet, Diagnostic, DiagnosticKind, Dialect,
    RawSignature, WireType,
};
