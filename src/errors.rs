//! Fatal error types for host function audits.
//!
//! Everything in this module aborts a run (or, in `skip-candidate` mode, a
//! single candidate). Conformance mismatches are not errors: they are
//! [`Diagnostic`](crate::core::Diagnostic)s collected by the comparer and
//! only turned into an exit status once every candidate has been reported.
//!
//! # Categories
//!
//! - `Usage`: wrong command line
//! - `Fetch`: a remote artifact could not be retrieved
//! - `Read`: a local artifact could not be read
//! - `Parse`: a dialect grammar matched nothing, or paired artifacts disagree
//! - `UnknownType`: a type token has no wire mapping in its dialect's table

use crate::core::Dialect;
use thiserror::Error;

/// Main error type for audit operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// Command line errors
    #[error("{message}")]
    Usage { message: String },

    /// Remote retrieval errors (network failure, non-success status)
    #[error("Error fetching {url}: {message}")]
    Fetch { url: String, message: String },

    /// Local read errors (missing file, permissions, encoding)
    #[error("File not found: {path}, {message}")]
    Read { path: String, message: String },

    /// Grammar failures for one artifact group
    #[error("Parse error in {source_id}: {message}")]
    Parse { source_id: String, message: String },

    /// A type token the dialect's mapping table does not cover
    #[error("Unknown {dialect} type `{token}` in {source_id}")]
    UnknownType {
        token: String,
        dialect: Dialect,
        source_id: String,
    },
}

impl AuditError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    pub fn unknown_type(
        token: impl Into<String>,
        dialect: Dialect,
        source_id: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            token: token.into(),
            dialect,
            source_id: source_id.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Usage { .. } => "usage",
            Self::Fetch { .. } => "fetch",
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::UnknownType { .. } => "unknown-type",
        }
    }

    /// Process exit code for this error. Every fatal kind exits with 1.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Whether the error is confined to one candidate's artifacts.
    ///
    /// Usage errors are never candidate-local; I/O, grammar, and mapping
    /// failures are when they happen while processing a candidate.
    #[must_use]
    pub fn is_candidate_local(&self) -> bool {
        !matches!(self, Self::Usage { .. })
    }
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
