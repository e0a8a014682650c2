//! Dialect grammars that turn artifact text into ordered raw signatures.
//!
//! Every dialect implements [`SignatureExtractor`]. Extraction keeps the
//! dialect's own type spellings; [`crate::normalize`] maps them to wire
//! types afterwards, so a new dialect only needs a grammar here and a table
//! there. Nothing in [`crate::comparison`] changes.
//!
//! # Usage
//!
//! ```rust
//! use hostfn_audit::extraction::{Artifact, DirectDeclarationExtractor, SignatureExtractor};
//!
//! let artifact = Artifact::new(
//!     "host_bindings.rs",
//!     "pub fn get_ledger_sqn(out_buff_ptr: *mut u8, out_buff_len: usize) -> i32;",
//! );
//! let signatures = DirectDeclarationExtractor.parse(&[artifact]).unwrap();
//! assert_eq!(signatures[0].name, "get_ledger_sqn");
//! assert_eq!(signatures[0].params, vec!["*mut u8", "usize"]);
//! ```

pub mod direct;
pub mod paired;

use crate::core::{Dialect, RawSignature};
use crate::errors::AuditError;

pub use direct::DirectDeclarationExtractor;
pub use paired::{ImportEntry, PairedDeclarationExtractor, WrapperEntry, DEPRECATED_IMPORTS};

/// Raw text of one fetched artifact, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub text: String,
}

impl Artifact {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A grammar for one declaration dialect.
///
/// Implementations are pure: the same artifacts always yield the same
/// signatures, in source order.
pub trait SignatureExtractor {
    fn dialect(&self) -> Dialect;

    /// How many correlated artifacts [`parse`](Self::parse) expects, in order.
    fn artifact_count(&self) -> usize;

    /// # Errors
    ///
    /// Returns `AuditError::Parse` if a mandatory artifact yields zero
    /// matches, if correlated artifacts disagree, or if the wrong number of
    /// artifacts is supplied.
    fn parse(&self, artifacts: &[Artifact]) -> Result<Vec<RawSignature>, AuditError>;
}

pub(crate) fn artifact_count_error(
    extractor: &dyn SignatureExtractor,
    artifacts: &[Artifact],
) -> AuditError {
    let source_id = artifacts
        .iter()
        .map(|a| a.path.as_str())
        .collect::<Vec<_>>()
        .join(" + ");
    AuditError::parse(
        source_id,
        format!(
            "{} dialect expects {} artifact(s), got {}",
            extractor.dialect(),
            extractor.artifact_count(),
            artifacts.len()
        ),
    )
}
