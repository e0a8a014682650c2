//! Host function ABI conformance checking.
//!
//! Extracts host function signatures from the native host's paired import
//! and wrapper lists and from the guest's Rust bindings, normalizes every
//! type token to a shared [`WireType`], and compares the declaration sets
//! by position.

pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod errors;
pub mod extraction;
pub mod formatting;
pub mod io;
pub mod normalize;
pub mod output;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{
    AuditReport, CandidateOutcome, CanonicalSignature, ComparisonResult, DeclarationSet,
    Diagnostic, DiagnosticKind, Dialect, ExitStatus, RawSignature, WireType,
};

pub use crate::commands::run_audit;
pub use crate::comparison::ConformanceComparer;
pub use crate::config::{AuditConfig, CandidateSpec, FatalMode, ReferenceSpec, ReportFormat};
pub use crate::errors::{AuditError, Result};
pub use crate::extraction::{
    Artifact, DirectDeclarationExtractor, PairedDeclarationExtractor, SignatureExtractor,
};
pub use crate::io::{fetcher_for_root, LocalFetcher, RemoteFetcher, SourceFetcher};
pub use crate::normalize::{canonicalize, TypeNormalizer, TypeTable};
pub use crate::output::{emit_report, JsonEmitter, ReportEmitter, TerminalEmitter};
