use crate::extraction::DEPRECATED_IMPORTS;
use crate::formatting::FormattingConfig;
use clap::ValueEnum;

/// Import registrations inside the native host tree.
pub const IMPORT_LIST_PATH: &str = "src/xrpld/app/misc/WasmVM.cpp";
/// Wrapper prototypes inside the native host tree.
pub const WRAPPER_LIST_PATH: &str = "src/xrpld/app/misc/WasmHostFuncWrapper.h";

/// Guest bindings, relative to the bindings root.
pub const PRIMARY_BINDINGS_PATH: &str = "xrpl-std/src/host/host_bindings.rs";
pub const TEST_BINDINGS_PATH: &str = "xrpl-std/src/host/host_bindings_for_testing.rs";

/// The crate lives at `tools/hostfn-audit` inside the bindings repository.
pub const DEFAULT_BINDINGS_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../..");

/// What a fatal error while processing one candidate does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FatalMode {
    /// Stop everything on the first fatal error; no results are reported
    #[default]
    AbortRun,
    /// Report the failing candidate as fatal and keep comparing the others
    SkipCandidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines (diagnostics on stderr)
    #[default]
    Terminal,
    /// One JSON document on stdout
    Json,
}

/// The reference artifact group: the native host's paired lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSpec {
    pub id: String,
    pub import_list: String,
    pub wrapper_list: String,
}

impl Default for ReferenceSpec {
    fn default() -> Self {
        Self {
            id: "reference".to_string(),
            import_list: IMPORT_LIST_PATH.to_string(),
            wrapper_list: WRAPPER_LIST_PATH.to_string(),
        }
    }
}

/// One guest binding artifact, always read locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpec {
    pub id: String,
    pub path: String,
}

impl CandidateSpec {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

pub fn default_candidates() -> Vec<CandidateSpec> {
    vec![
        CandidateSpec::new("host_bindings", PRIMARY_BINDINGS_PATH),
        CandidateSpec::new("host_bindings_for_testing", TEST_BINDINGS_PATH),
    ]
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Local directory or repository URL for the native host sources.
    pub source_root: String,
    /// Local directory the candidate paths are relative to.
    pub bindings_root: String,
    pub reference: ReferenceSpec,
    pub candidates: Vec<CandidateSpec>,
    pub deprecated_imports: Vec<String>,
    pub fatal_mode: FatalMode,
    pub format: ReportFormat,
    pub formatting: FormattingConfig,
}

impl AuditConfig {
    pub fn new(source_root: impl Into<String>) -> Self {
        Self {
            source_root: source_root.into(),
            bindings_root: DEFAULT_BINDINGS_ROOT.to_string(),
            reference: ReferenceSpec::default(),
            candidates: default_candidates(),
            deprecated_imports: DEPRECATED_IMPORTS.iter().map(|s| s.to_string()).collect(),
            fatal_mode: FatalMode::default(),
            format: ReportFormat::default(),
            formatting: FormattingConfig::default(),
        }
    }

    pub fn with_bindings_root(mut self, root: impl Into<String>) -> Self {
        self.bindings_root = root.into();
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<CandidateSpec>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_fatal_mode(mut self, mode: FatalMode) -> Self {
        self.fatal_mode = mode;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_formatting(mut self, formatting: FormattingConfig) -> Self {
        self.formatting = formatting;
        self
    }
}
