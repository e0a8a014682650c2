//! Guest binding grammar: one Rust declaration per host function.
//!
//! Matches both the `extern "C"` block of the wasm bindings and the
//! stand-in functions used for native test builds:
//!
//! ```text
//! pub fn get_ledger_sqn(out_buff_ptr: *mut u8, out_buff_len: usize) -> i32;
//! pub unsafe fn get_ledger_sqn(_out_buff_ptr: *mut u8, _out_buff_len: usize) -> i32 {
//! ```

use super::{artifact_count_error, Artifact, SignatureExtractor};
use crate::core::{Dialect, RawSignature};
use crate::errors::AuditError;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static GUEST_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*pub(?:\((?:crate|self|super|in\s+[A-Za-z0-9_:]+)\))?\s+(?:unsafe\s+)?(?:extern\s+"C"\s+)?fn\s+([A-Za-z0-9_]+)\s*\(([A-Za-z0-9_:*,\s]*)\)\s*->\s*([A-Za-z0-9_]+)"#,
    )
    .unwrap()
});

/// Extractor for the direct-declaration dialect. Visibility and `unsafe`
/// markers are accepted and ignored; parameter names are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDeclarationExtractor;

impl DirectDeclarationExtractor {
    fn param_types(artifact: &Artifact, name: &str, list: &str) -> Result<Vec<String>, AuditError> {
        list.split(',')
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(|param| match param.split_once(':') {
                Some((_, ty)) => Ok(ty.trim().to_string()),
                None => Err(AuditError::parse(
                    &artifact.path,
                    format!("parameter `{}` of `{}` has no type", param, name),
                )),
            })
            .collect()
    }
}

impl SignatureExtractor for DirectDeclarationExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Guest
    }

    fn artifact_count(&self) -> usize {
        1
    }

    fn parse(&self, artifacts: &[Artifact]) -> Result<Vec<RawSignature>, AuditError> {
        let [artifact] = artifacts else {
            return Err(artifact_count_error(self, artifacts));
        };

        let signatures = GUEST_FN
            .captures_iter(&artifact.text)
            .map(|caps| -> Result<RawSignature, AuditError> {
                let name = &caps[1];
                Ok(RawSignature {
                    name: name.to_string(),
                    return_type: caps[3].to_string(),
                    params: Self::param_types(artifact, name, &caps[2])?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if signatures.is_empty() {
            return Err(AuditError::parse(
                &artifact.path,
                "no `pub fn <name>(...) -> <type>` declarations found",
            ));
        }

        debug!(
            path = %artifact.path,
            count = signatures.len(),
            "parsed guest bindings"
        );
        Ok(signatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Vec<RawSignature>, AuditError> {
        DirectDeclarationExtractor.parse(&[Artifact::new("host_bindings.rs", text)])
    }

    #[test]
    fn test_extern_block_declarations() {
        let text = indoc! {r#"
            #[link(wasm_import_module = "host_lib")]
            unsafe extern "C" {
                /// Retrieves the current ledger sequence number.
                pub fn get_ledger_sqn(out_buff_ptr: *mut u8, out_buff_len: usize) -> i32;

                pub fn cache_ledger_obj(
                    keylet_ptr: *const u8,
                    keylet_len: usize,
                    cache_num: i32,
                ) -> i32;
            }
        "#};
        assert_eq!(
            parse(text).unwrap(),
            vec![
                RawSignature::new("get_ledger_sqn", "i32", ["*mut u8", "usize"]),
                RawSignature::new("cache_ledger_obj", "i32", ["*const u8", "usize", "i32"]),
            ]
        );
    }

    #[test]
    fn test_testing_stand_ins_with_qualifiers() {
        let text = indoc! {"
            #[allow(unused)]
            #[allow(clippy::missing_safety_doc)]
            pub unsafe fn get_tx_field(_field: i32, _out_buff_ptr: *mut u8, _out_buff_len: usize) -> i32 {
                -1
            }

            pub(super) fn trace_num(msg_read_ptr: *const u8, msg_read_len: usize, number: i64) -> i32;

            pub(in crate::host) fn get_ledger_sqn(out_buff_ptr: *mut u8, out_buff_len: usize) -> i32;
        "};
        let sigs = parse(text).unwrap();
        assert_eq!(sigs.len(), 3);
        assert_eq!(sigs[0].name, "get_tx_field");
        assert_eq!(sigs[0].params, vec!["i32", "*mut u8", "usize"]);
        assert_eq!(sigs[1].name, "trace_num");
        assert_eq!(sigs[1].params, vec!["*const u8", "usize", "i64"]);
        assert_eq!(sigs[2].name, "get_ledger_sqn");
        assert_eq!(sigs[2].params, vec!["*mut u8", "usize"]);
    }

    #[test]
    fn test_no_params() {
        let sigs = parse("pub fn ledger_time() -> u32;").unwrap();
        assert_eq!(sigs, vec![RawSignature::new("ledger_time", "u32", Vec::<String>::new())]);
    }

    #[test]
    fn test_private_and_unrelated_items_are_ignored() {
        let text = indoc! {"
            fn helper(x: i32) -> i32 { x }
            pub struct Wrapper;
            pub fn get_ledger_sqn(out_buff_ptr: *mut u8, out_buff_len: usize) -> i32;
        "};
        let names: Vec<_> = parse(text).unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["get_ledger_sqn"]);
    }

    #[test]
    fn test_zero_matches_is_parse_error() {
        let err = parse("// no bindings").unwrap_err();
        assert!(matches!(err, AuditError::Parse { ref source_id, .. } if source_id == "host_bindings.rs"));
    }

    #[test]
    fn test_untyped_parameter_is_parse_error() {
        let err = parse("pub fn broken(a, b: i32) -> i32;").unwrap_err();
        assert!(err.to_string().contains("parameter `a` of `broken` has no type"));
    }
}
