//! Mapping from dialect-native type spellings to [`WireType`].
//!
//! Each dialect has one exhaustive table. A token missing from its table is
//! an [`UnknownTypeError`], never a guess: it means the table needs extending,
//! not that the bindings are wrong.

pub mod tables;

use crate::core::{CanonicalSignature, DeclarationSet, Dialect, RawSignature, WireType};
use crate::errors::AuditError;
use thiserror::Error;
use tracing::debug;

pub use tables::{TypeTable, GUEST_TYPES, NATIVE_HOST_TYPES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no wire mapping for {dialect} type `{token}`")]
pub struct UnknownTypeError {
    pub token: String,
    pub dialect: Dialect,
}

impl UnknownTypeError {
    pub fn into_audit_error(self, source_id: &str) -> AuditError {
        AuditError::unknown_type(self.token, self.dialect, source_id)
    }
}

/// Deterministic token-to-wire-type mapping for one dialect.
pub trait TypeNormalizer {
    fn dialect(&self) -> Dialect;

    fn normalize(&self, token: &str) -> Result<WireType, UnknownTypeError>;
}

/// Collapse whitespace runs and drop whitespace before `*`, so
/// `uint8_t const *` and `uint8_t  const*` look up the same entry.
pub fn canonical_spelling(token: &str) -> String {
    let collapsed = token.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(" *", "*")
}

/// Normalize every raw signature of one artifact group into a declaration set.
///
/// The first unmapped token aborts, naming the token and the source.
pub fn canonicalize(
    source_id: &str,
    raw: &[RawSignature],
    normalizer: &dyn TypeNormalizer,
) -> Result<DeclarationSet, AuditError> {
    let signatures = raw
        .iter()
        .map(|sig| canonicalize_one(sig, normalizer))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.into_audit_error(source_id))?;

    debug!(
        source = source_id,
        dialect = %normalizer.dialect(),
        count = signatures.len(),
        "normalized declaration set"
    );
    Ok(DeclarationSet::new(source_id, signatures))
}

fn canonicalize_one(
    raw: &RawSignature,
    normalizer: &dyn TypeNormalizer,
) -> Result<CanonicalSignature, UnknownTypeError> {
    let return_type = normalizer.normalize(&raw.return_type)?;
    let params = raw
        .params
        .iter()
        .map(|token| normalizer.normalize(token))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CanonicalSignature::new(raw.name.clone(), return_type, params))
}
