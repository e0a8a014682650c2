//! The audit pipeline: fetch → extract → normalize → compare.
//!
//! The reference is always built first and any failure there aborts the
//! run. Candidates are then loaded in configuration order; in
//! [`FatalMode::AbortRun`] every candidate is loaded before anything is
//! compared, so a fatal error anywhere means no comparison result exists.

use crate::comparison::ConformanceComparer;
use crate::config::{AuditConfig, CandidateSpec, FatalMode};
use crate::core::{AuditReport, CandidateOutcome, DeclarationSet, Dialect};
use crate::errors::AuditError;
use crate::extraction::{
    Artifact, DirectDeclarationExtractor, PairedDeclarationExtractor, SignatureExtractor,
};
use crate::io::SourceFetcher;
use crate::normalize::{canonicalize, TypeTable};
use tracing::{info, info_span, warn};

/// Run one audit.
///
/// `reference_fetcher` resolves paths beneath `config.source_root` (local or
/// remote); `local_fetcher` resolves candidate paths beneath
/// `config.bindings_root`.
///
/// # Errors
///
/// Returns the first fatal error, unless the error belongs to a candidate
/// and `config.fatal_mode` is [`FatalMode::SkipCandidate`].
pub fn run_audit(
    config: &AuditConfig,
    reference_fetcher: &dyn SourceFetcher,
    local_fetcher: &dyn SourceFetcher,
) -> Result<AuditReport, AuditError> {
    let _span = info_span!("audit", root = %config.source_root).entered();

    let reference = load_reference(config, reference_fetcher)?;
    info!(
        functions = reference.len(),
        "built reference declaration set"
    );

    let mut loaded = Vec::with_capacity(config.candidates.len());
    for spec in &config.candidates {
        match load_candidate(config, spec, local_fetcher) {
            Ok(set) => loaded.push((spec, Ok(set))),
            Err(err)
                if config.fatal_mode == FatalMode::SkipCandidate && err.is_candidate_local() =>
            {
                warn!(candidate = %spec.id, error = %err, "skipping candidate");
                loaded.push((spec, Err(err)));
            }
            Err(err) => return Err(err),
        }
    }

    let comparer = ConformanceComparer::new(&reference);
    let outcomes = loaded
        .into_iter()
        .map(|(spec, set)| match set {
            Ok(candidate) => CandidateOutcome::Compared(comparer.compare(&candidate)),
            Err(error) => CandidateOutcome::Fatal {
                candidate_id: spec.id.clone(),
                error,
            },
        })
        .collect();

    Ok(AuditReport {
        reference_id: config.reference.id.clone(),
        reference_count: reference.len(),
        outcomes,
    })
}

fn fetch_artifact(
    fetcher: &dyn SourceFetcher,
    root: &str,
    path: &str,
) -> Result<Artifact, AuditError> {
    let text = fetcher.fetch(root, path)?;
    Ok(Artifact::new(path, text))
}

fn load_reference(
    config: &AuditConfig,
    fetcher: &dyn SourceFetcher,
) -> Result<DeclarationSet, AuditError> {
    let spec = &config.reference;
    let artifacts = [
        fetch_artifact(fetcher, &config.source_root, &spec.import_list)?,
        fetch_artifact(fetcher, &config.source_root, &spec.wrapper_list)?,
    ];
    let extractor = PairedDeclarationExtractor::new(config.deprecated_imports.iter().cloned());
    let raw = extractor.parse(&artifacts)?;
    canonicalize(&spec.id, &raw, TypeTable::for_dialect(Dialect::NativeHost))
}

fn load_candidate(
    config: &AuditConfig,
    spec: &CandidateSpec,
    fetcher: &dyn SourceFetcher,
) -> Result<DeclarationSet, AuditError> {
    let artifact = fetch_artifact(fetcher, &config.bindings_root, &spec.path)?;
    let raw = DirectDeclarationExtractor.parse(&[artifact])?;
    canonicalize(&spec.id, &raw, TypeTable::for_dialect(Dialect::Guest))
}
