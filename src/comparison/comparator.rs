use crate::core::{
    CanonicalSignature, ComparisonResult, DeclarationSet, Diagnostic, DiagnosticKind,
};
use std::collections::HashSet;
use tracing::debug;

/// Compares candidate declaration sets against one reference set.
///
/// Candidates are compared independently. Matching is strictly positional:
/// index `k` of the candidate is only ever compared to index `k` of the
/// reference, never to a same-named entry elsewhere.
pub struct ConformanceComparer<'a> {
    reference: &'a DeclarationSet,
}

impl<'a> ConformanceComparer<'a> {
    pub fn new(reference: &'a DeclarationSet) -> Self {
        Self { reference }
    }

    /// Perform full comparison of one candidate.
    pub fn compare(&self, candidate: &DeclarationSet) -> ComparisonResult {
        let diagnostics = match self.check_cardinality(candidate) {
            Some(count_mismatch) => vec![count_mismatch],
            None => self
                .reference
                .signatures()
                .iter()
                .zip(candidate.signatures())
                .enumerate()
                .filter_map(|(index, (expected, actual))| {
                    check_position(index, expected, actual)
                })
                .collect(),
        };

        debug!(
            candidate = candidate.source_id(),
            diagnostics = diagnostics.len(),
            "compared candidate against reference"
        );
        ComparisonResult::from_diagnostics(candidate.source_id(), diagnostics)
    }

    /// Per-index checks are meaningless once lengths differ, so a count
    /// mismatch is the only diagnostic a candidate gets in that case.
    fn check_cardinality(&self, candidate: &DeclarationSet) -> Option<Diagnostic> {
        let (expected, actual) = (self.reference.len(), candidate.len());
        if expected == actual {
            return None;
        }

        let mut detail = format!(
            "{} declares {} host functions, {} declares {}",
            candidate.source_id(),
            actual,
            self.reference.source_id(),
            expected
        );
        let (note, names) = if actual < expected {
            (
                format!("missing from {}", candidate.source_id()),
                names_only_in(self.reference, candidate),
            )
        } else {
            (
                format!("not in {}", self.reference.source_id()),
                names_only_in(candidate, self.reference),
            )
        };
        if !names.is_empty() {
            detail.push_str(&format!("; {}: {}", note, names.join(", ")));
        }

        Some(Diagnostic::set_level(DiagnosticKind::CountMismatch, detail))
    }
}

/// Names in `from` (in `from`'s order) that `other` does not declare.
fn names_only_in<'s>(from: &'s DeclarationSet, other: &DeclarationSet) -> Vec<&'s str> {
    let present: HashSet<&str> = other.names().collect();
    from.names().filter(|name| !present.contains(name)).collect()
}

/// Name, then return type, then parameter count, then each parameter type.
/// The first failing field is the only one reported for this index.
fn check_position(
    index: usize,
    expected: &CanonicalSignature,
    actual: &CanonicalSignature,
) -> Option<Diagnostic> {
    if actual.name() != expected.name() {
        return Some(Diagnostic::at(
            index,
            DiagnosticKind::NameMismatch,
            format!(
                "name mismatch: {} (candidate) != {} (reference)",
                actual.name(),
                expected.name()
            ),
        ));
    }

    if actual.return_type() != expected.return_type() {
        return Some(Diagnostic::at(
            index,
            DiagnosticKind::ReturnTypeMismatch,
            format!(
                "return type mismatch for {}: {} (candidate) != {} (reference)",
                actual.name(),
                actual.return_type(),
                expected.return_type()
            ),
        ));
    }

    if actual.params().len() != expected.params().len() {
        return Some(Diagnostic::at(
            index,
            DiagnosticKind::ParamCountMismatch,
            format!(
                "parameter count mismatch for {}: {} (candidate) != {} (reference)",
                actual.name(),
                actual.params().len(),
                expected.params().len()
            ),
        ));
    }

    actual
        .params()
        .iter()
        .zip(expected.params())
        .position(|(a, e)| a != e)
        .map(|param| {
            Diagnostic::at(
                index,
                DiagnosticKind::ParamTypeMismatch,
                format!(
                    "parameter type mismatch for {}, parameter {}: {} (candidate) != {} (reference)",
                    actual.name(),
                    param,
                    actual.params()[param],
                    expected.params()[param]
                ),
            )
        })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::core::WireType;
    use proptest::prelude::*;

    fn wire_type() -> impl Strategy<Value = WireType> {
        prop_oneof![
            Just(WireType::Int32),
            Just(WireType::UInt32),
            Just(WireType::Int64),
            Just(WireType::ImmutableBytePointer),
            Just(WireType::MutableBytePointer),
        ]
    }

    fn declaration_set() -> impl Strategy<Value = DeclarationSet> {
        prop::collection::vec(
            ("[a-z_]{1,12}", wire_type(), prop::collection::vec(wire_type(), 0..6)),
            0..20,
        )
        .prop_map(|entries| {
            DeclarationSet::new(
                "reference",
                entries
                    .into_iter()
                    .map(|(name, ret, params)| CanonicalSignature::new(name, ret, params))
                    .collect(),
            )
        })
    }

    proptest! {
        /// Property: a set always conforms to an exact copy of itself.
        #[test]
        fn comparison_is_reflexive(reference in declaration_set()) {
            let copy = DeclarationSet::new("copy", reference.signatures().to_vec());
            let result = ConformanceComparer::new(&reference).compare(&copy);
            prop_assert!(result.ok);
            prop_assert!(result.diagnostics.is_empty());
        }

        /// Property: repeating a comparison yields an identical result.
        #[test]
        fn comparison_is_idempotent(
            reference in declaration_set(),
            candidate in declaration_set()
        ) {
            let comparer = ConformanceComparer::new(&reference);
            prop_assert_eq!(comparer.compare(&candidate), comparer.compare(&candidate));
        }

        /// Property: at most one diagnostic per index, never more than max(|R|, 1).
        #[test]
        fn diagnostics_are_bounded(
            reference in declaration_set(),
            candidate in declaration_set()
        ) {
            let result = ConformanceComparer::new(&reference).compare(&candidate);
            prop_assert!(result.diagnostics.len() <= reference.len().max(1));
            prop_assert_eq!(result.ok, result.diagnostics.is_empty());
        }
    }
}
