//! I/O trait definitions for artifact retrieval.
//!
//! The audit core never touches the file system or the network directly.
//! It asks a [`SourceFetcher`] for the text of `relative_path` beneath a
//! root, which keeps extraction and comparison pure and lets tests run
//! against in-memory artifacts.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostfn_audit::io::{LocalFetcher, SourceFetcher};
//!
//! let text = LocalFetcher.fetch("../rippled", "src/xrpld/app/misc/WasmVM.cpp")?;
//! ```

use crate::errors::AuditError;

/// Fetch-by-path capability over a local directory or a remote repository.
pub trait SourceFetcher {
    /// Return the full text of `relative_path` beneath `root`.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Read` for local failures (missing file,
    /// permissions, invalid UTF-8) and `AuditError::Fetch` for remote ones
    /// (network failure, non-success status).
    fn fetch(&self, root: &str, relative_path: &str) -> Result<String, AuditError>;
}

impl<F: SourceFetcher + ?Sized> SourceFetcher for Box<F> {
    fn fetch(&self, root: &str, relative_path: &str) -> Result<String, AuditError> {
        (**self).fetch(root, relative_path)
    }
}

impl<F: SourceFetcher + ?Sized> SourceFetcher for &F {
    fn fetch(&self, root: &str, relative_path: &str) -> Result<String, AuditError> {
        (**self).fetch(root, relative_path)
    }
}
