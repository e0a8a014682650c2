//! Fixture builders for host function artifacts.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`HostFunctionFixture`] | One function in both dialects |
//! | [`standard_host_functions`] | A small realistic function list |
//! | [`render_import_list`] / [`render_wrapper_list`] | Native host artifacts |
//! | [`render_guest_bindings`] | A guest binding artifact |
//! | [`AuditFixture`] | All four artifacts plus a matching config |
//!
//! ```rust,ignore
//! use hostfn_audit::testkit::AuditFixture;
//!
//! let fixture = AuditFixture::standard();
//! let fetcher = fixture.fetcher();
//! let report = run_audit(&fixture.config(), &fetcher, &fetcher)?;
//! ```

use super::MemoryFetcher;
use crate::config::{
    AuditConfig, IMPORT_LIST_PATH, PRIMARY_BINDINGS_PATH, TEST_BINDINGS_PATH, WRAPPER_LIST_PATH,
};
use std::fs;
use std::io;
use std::path::Path;

pub const HOST_ROOT: &str = "rippled";
pub const BINDINGS_ROOT: &str = "craft";

/// One host function as both sides declare it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFunctionFixture {
    pub native: String,
    pub export: String,
    pub native_return: String,
    pub native_params: Vec<String>,
    pub guest_return: String,
    pub guest_params: Vec<(String, String)>,
}

impl HostFunctionFixture {
    pub fn new(native: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            native: native.into(),
            export: export.into(),
            native_return: "int32_t".to_string(),
            native_params: Vec::new(),
            guest_return: "i32".to_string(),
            guest_params: Vec::new(),
        }
    }

    pub fn native(mut self, return_type: &str, params: &[&str]) -> Self {
        self.native_return = return_type.to_string();
        self.native_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn guest(mut self, return_type: &str, params: &[(&str, &str)]) -> Self {
        self.guest_return = return_type.to_string();
        self.guest_params = params
            .iter()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect();
        self
    }

    /// Replace the guest type of parameter `position`.
    pub fn with_guest_param_type(mut self, position: usize, ty: &str) -> Self {
        if let Some(param) = self.guest_params.get_mut(position) {
            param.1 = ty.to_string();
        }
        self
    }
}

pub fn standard_host_functions() -> Vec<HostFunctionFixture> {
    vec![
        HostFunctionFixture::new("getLedgerSqn", "get_ledger_sqn")
            .native("int32_t", &["uint8_t*", "int32_t"])
            .guest("i32", &[("out_buff_ptr", "*mut u8"), ("out_buff_len", "usize")]),
        HostFunctionFixture::new("getParentLedgerTime", "get_parent_ledger_time")
            .native("int32_t", &["uint8_t*", "int32_t"])
            .guest("i32", &[("out_buff_ptr", "*mut u8"), ("out_buff_len", "usize")]),
        HostFunctionFixture::new("cacheLedgerObj", "cache_ledger_obj")
            .native("int32_t", &["uint8_t const*", "int32_t", "int32_t"])
            .guest(
                "i32",
                &[
                    ("keylet_ptr", "*const u8"),
                    ("keylet_len", "usize"),
                    ("cache_num", "i32"),
                ],
            ),
        HostFunctionFixture::new("updateData", "update_data")
            .native("int32_t", &["uint8_t const*", "int32_t"])
            .guest("i32", &[("data_ptr", "*const u8"), ("data_len", "usize")]),
        HostFunctionFixture::new("traceNum", "trace_num")
            .native("int32_t", &["uint8_t const*", "int32_t", "int64_t"])
            .guest(
                "i32",
                &[
                    ("msg_read_ptr", "*const u8"),
                    ("msg_read_len", "usize"),
                    ("number", "i64"),
                ],
            ),
    ]
}

pub fn render_import_list(functions: &[HostFunctionFixture]) -> String {
    let mut text = String::from("void\nsetCommonHostFunctions(HostFunctions* hfs, ImportVec& i)\n{\n");
    for (cost, f) in functions.iter().enumerate() {
        if f.native == f.export {
            text.push_str(&format!(
                "    WASM_IMPORT_FUNC(i, {}, hfs, {});\n",
                f.native,
                (cost + 1) * 10
            ));
        } else {
            text.push_str(&format!(
                "    WASM_IMPORT_FUNC2(i, {}, \"{}\", hfs, {});\n",
                f.native,
                f.export,
                (cost + 1) * 10
            ));
        }
    }
    text.push_str("}\n");
    text
}

pub fn render_wrapper_list(functions: &[HostFunctionFixture]) -> String {
    let mut text = String::from("#pragma once\n\nnamespace ripple {\n\n");
    for f in functions {
        text.push_str(&format!(
            "using {}_proto = {}({});\nwasm_trap_t*\n{}_wrap(void* env, wasm_val_vec_t const* params, wasm_val_vec_t* results);\n\n",
            f.native,
            f.native_return,
            f.native_params.join(", "),
            f.native
        ));
    }
    text.push_str("}  // namespace ripple\n");
    text
}

pub fn render_guest_bindings(functions: &[HostFunctionFixture]) -> String {
    let mut text = String::from("#[allow(unused)]\n#[link(wasm_import_module = \"host_lib\")]\nunsafe extern \"C\" {\n");
    for f in functions {
        let params = f
            .guest_params
            .iter()
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!(
            "    pub fn {}({}) -> {};\n\n",
            f.export, params, f.guest_return
        ));
    }
    text.push_str("}\n");
    text
}

fn deprecated_function() -> HostFunctionFixture {
    HostFunctionFixture::new("getLedgerSqnOld", "getLedgerSqn").native("int32_t", &[])
}

/// The reference and both candidates, each with its own function list.
#[derive(Debug, Clone)]
pub struct AuditFixture {
    pub host: Vec<HostFunctionFixture>,
    pub primary: Vec<HostFunctionFixture>,
    pub testing: Vec<HostFunctionFixture>,
}

impl AuditFixture {
    /// Every artifact declares the same `functions`.
    pub fn matching(functions: Vec<HostFunctionFixture>) -> Self {
        Self {
            host: functions.clone(),
            primary: functions.clone(),
            testing: functions,
        }
    }

    pub fn standard() -> Self {
        Self::matching(standard_host_functions())
    }

    pub fn config(&self) -> AuditConfig {
        AuditConfig::new(HOST_ROOT).with_bindings_root(BINDINGS_ROOT)
    }

    /// Host artifacts, with the deprecated registration first as in the real tree.
    pub fn host_artifacts(&self) -> (String, String) {
        let mut host = vec![deprecated_function()];
        host.extend(self.host.iter().cloned());
        (render_import_list(&host), render_wrapper_list(&host))
    }

    /// A fetcher serving the host artifacts under [`HOST_ROOT`] and the
    /// bindings under [`BINDINGS_ROOT`].
    pub fn fetcher(&self) -> MemoryFetcher {
        let (imports, wrappers) = self.host_artifacts();
        MemoryFetcher::new()
            .with_file(HOST_ROOT, IMPORT_LIST_PATH, imports)
            .with_file(HOST_ROOT, WRAPPER_LIST_PATH, wrappers)
            .with_file(
                BINDINGS_ROOT,
                PRIMARY_BINDINGS_PATH,
                render_guest_bindings(&self.primary),
            )
            .with_file(
                BINDINGS_ROOT,
                TEST_BINDINGS_PATH,
                render_guest_bindings(&self.testing),
            )
    }

    /// Lay the artifacts out on disk at their real relative paths.
    pub fn write_to(&self, host_root: &Path, bindings_root: &Path) -> io::Result<()> {
        let (imports, wrappers) = self.host_artifacts();
        write_file(&host_root.join(IMPORT_LIST_PATH), &imports)?;
        write_file(&host_root.join(WRAPPER_LIST_PATH), &wrappers)?;
        write_file(
            &bindings_root.join(PRIMARY_BINDINGS_PATH),
            &render_guest_bindings(&self.primary),
        )?;
        write_file(
            &bindings_root.join(TEST_BINDINGS_PATH),
            &render_guest_bindings(&self.testing),
        )
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
