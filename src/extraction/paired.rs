//! Native host grammar: an import list and a wrapper prototype list.
//!
//! The import list (`WasmVM.cpp`) gives each function's exported name in
//! registration order:
//!
//! ```text
//! WASM_IMPORT_FUNC2(i, getLedgerSqn, "get_ledger_sqn", hfs, 60);
//! ```
//!
//! The wrapper list (`WasmHostFuncWrapper.h`) gives the prototype in the
//! same order:
//!
//! ```text
//! using getLedgerSqn_proto = int32_t(uint8_t*, int32_t);
//! ```
//!
//! Both lists are parsed independently and zipped by position.

use super::{artifact_count_error, Artifact, SignatureExtractor};
use crate::core::{Dialect, RawSignature};
use crate::errors::AuditError;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Legacy registrations kept in the host for old guests; not part of the bindings.
pub const DEPRECATED_IMPORTS: &[&str] = &["getLedgerSqnOld"];

static IMPORT_FUNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^ *WASM_IMPORT_FUNC2? *\(i, *([A-Za-z0-9_]+), *(?:"([A-Za-z0-9_]+)",)? *hfs, *[0-9]+\);\r?$"#,
    )
    .unwrap()
});

static WRAPPER_PROTO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^ *using ([A-Za-z0-9_]+)_proto =\s*([A-Za-z0-9_]+)\(([A-Za-z0-9_*\s,]*)\);\r?$")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Host-side identifier, e.g. `getLedgerSqn`.
    pub native: String,
    /// Name the guest imports, e.g. `get_ledger_sqn`.
    pub export: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperEntry {
    /// Prototype identifier without the `_proto` suffix.
    pub native: String,
    pub return_type: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PairedDeclarationExtractor {
    deprecated: Vec<String>,
}

impl Default for PairedDeclarationExtractor {
    fn default() -> Self {
        Self::new(DEPRECATED_IMPORTS.iter().copied())
    }
}

impl PairedDeclarationExtractor {
    pub fn new(deprecated: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            deprecated: deprecated.into_iter().map(Into::into).collect(),
        }
    }

    fn is_deprecated(&self, native: &str) -> bool {
        self.deprecated.iter().any(|d| d == native)
    }

    pub fn parse_imports(&self, text: &str) -> Vec<ImportEntry> {
        IMPORT_FUNC
            .captures_iter(text)
            .map(|caps| {
                let native = caps[1].to_string();
                let export = caps
                    .get(2)
                    .map_or_else(|| native.clone(), |m| m.as_str().to_string());
                ImportEntry { native, export }
            })
            .filter(|entry| !self.is_deprecated(&entry.native))
            .collect()
    }

    pub fn parse_wrappers(&self, text: &str) -> Vec<WrapperEntry> {
        WRAPPER_PROTO
            .captures_iter(text)
            .map(|caps| WrapperEntry {
                native: caps[1].to_string(),
                return_type: caps[2].to_string(),
                params: caps[3]
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            })
            .filter(|entry| !self.is_deprecated(&entry.native))
            .collect()
    }
}

impl SignatureExtractor for PairedDeclarationExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::NativeHost
    }

    fn artifact_count(&self) -> usize {
        2
    }

    fn parse(&self, artifacts: &[Artifact]) -> Result<Vec<RawSignature>, AuditError> {
        let [import_list, wrapper_list] = artifacts else {
            return Err(artifact_count_error(self, artifacts));
        };

        let imports = self.parse_imports(&import_list.text);
        if imports.is_empty() {
            return Err(AuditError::parse(
                &import_list.path,
                "no WASM_IMPORT_FUNC registrations found",
            ));
        }

        let wrappers = self.parse_wrappers(&wrapper_list.text);
        if wrappers.is_empty() {
            return Err(AuditError::parse(
                &wrapper_list.path,
                "no `using <name>_proto = ...;` prototypes found",
            ));
        }

        debug!(
            imports = imports.len(),
            wrappers = wrappers.len(),
            "parsed native host artifacts"
        );

        if imports.len() != wrappers.len() {
            return Err(AuditError::parse(
                format!("{} + {}", import_list.path, wrapper_list.path),
                format!(
                    "imports and host function wrappers do not match in length: {} != {}",
                    imports.len(),
                    wrappers.len()
                ),
            ));
        }

        imports
            .into_iter()
            .zip(wrappers)
            .enumerate()
            .map(|(index, (import, wrapper))| {
                if import.native != wrapper.native {
                    return Err(AuditError::parse(
                        format!("{} + {}", import_list.path, wrapper_list.path),
                        format!(
                            "imports and host function wrappers do not match at index {}: {} != {}",
                            index, import.native, wrapper.native
                        ),
                    ));
                }
                Ok(RawSignature {
                    name: import.export,
                    return_type: wrapper.return_type,
                    params: wrapper.params,
                })
            })
            .collect()
    }
}
