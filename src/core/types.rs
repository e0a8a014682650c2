use serde::Serialize;
use std::fmt;

/// Textual grammar family a set of host function declarations is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// The native host: paired import list + wrapper prototypes (C++).
    NativeHost,
    /// Guest bindings: one declaration per function (Rust).
    Guest,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeHost => write!(f, "native host"),
            Self::Guest => write!(f, "guest"),
        }
    }
}

/// A host function signature exactly as spelled in its source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSignature {
    pub name: String,
    pub return_type: String,
    pub params: Vec<String>,
}

impl RawSignature {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Canonical type space values cross the host/guest boundary in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireType {
    Int32,
    UInt32,
    Int64,
    ImmutableBytePointer,
    MutableBytePointer,
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::ImmutableBytePointer => "ImmutableBytePointer",
            Self::MutableBytePointer => "MutableBytePointer",
        };
        f.write_str(name)
    }
}

/// A normalized signature. Fields are private so a built signature cannot change.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalSignature {
    name: String,
    return_type: WireType,
    params: Vec<WireType>,
}

impl CanonicalSignature {
    pub fn new(name: impl Into<String>, return_type: WireType, params: Vec<WireType>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> WireType {
        self.return_type
    }

    pub fn params(&self) -> &[WireType] {
        &self.params
    }
}

/// One source's ordered view of the host function surface.
///
/// Order mirrors declaration order in the originating text and is the only
/// basis for positional comparison; nothing reorders it after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationSet {
    source_id: String,
    signatures: Vec<CanonicalSignature>,
}

impl DeclarationSet {
    pub fn new(source_id: impl Into<String>, signatures: Vec<CanonicalSignature>) -> Self {
        Self {
            source_id: source_id.into(),
            signatures,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn signatures(&self) -> &[CanonicalSignature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(CanonicalSignature::name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    CountMismatch,
    NameMismatch,
    ReturnTypeMismatch,
    ParamCountMismatch,
    ParamTypeMismatch,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CountMismatch => "count mismatch",
            Self::NameMismatch => "name mismatch",
            Self::ReturnTypeMismatch => "return type mismatch",
            Self::ParamCountMismatch => "parameter count mismatch",
            Self::ParamTypeMismatch => "parameter type mismatch",
        };
        f.write_str(label)
    }
}

/// A single conformance finding. `index` is `None` for set-level findings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub index: Option<usize>,
    pub kind: DiagnosticKind,
    pub detail: String,
}

impl Diagnostic {
    pub fn at(index: usize, kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            kind,
            detail: detail.into(),
        }
    }

    pub fn set_level(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            index: None,
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonResult {
    pub candidate_id: String,
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ComparisonResult {
    /// `ok` is derived from the diagnostics so the two can never disagree.
    pub fn from_diagnostics(candidate_id: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            ok: diagnostics.is_empty(),
            diagnostics,
        }
    }
}
