//! In-memory [`SourceFetcher`] for tests.
//!
//! Files are keyed by `(root, relative_path)`, so one fetcher can serve the
//! native host tree and the bindings tree at once. Lookups for anything not
//! registered fail with `AuditError::Read`, exactly like a missing local file.

use crate::errors::AuditError;
use crate::io::SourceFetcher;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct MemoryFetcher {
    files: Arc<RwLock<HashMap<(String, String), String>>>,
    failures: Arc<RwLock<HashMap<(String, String), AuditError>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` as the text of `path` beneath `root`.
    pub fn with_file(
        self,
        root: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.files
            .write()
            .expect("Lock poisoned")
            .insert((root.into(), path.into()), content.into());
        self
    }

    /// Make every fetch of `path` beneath `root` fail with `error`.
    pub fn with_failure(
        self,
        root: impl Into<String>,
        path: impl Into<String>,
        error: AuditError,
    ) -> Self {
        self.failures
            .write()
            .expect("Lock poisoned")
            .insert((root.into(), path.into()), error);
        self
    }

    #[cfg(test)]
    pub fn has_file(&self, root: &str, path: &str) -> bool {
        self.files
            .read()
            .expect("Lock poisoned")
            .contains_key(&(root.to_string(), path.to_string()))
    }
}

impl SourceFetcher for MemoryFetcher {
    fn fetch(&self, root: &str, relative_path: &str) -> Result<String, AuditError> {
        let key = (root.to_string(), relative_path.to_string());
        if let Some(error) = self.failures.read().expect("Lock poisoned").get(&key) {
            return Err(error.clone());
        }
        self.files
            .read()
            .expect("Lock poisoned")
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                AuditError::read(
                    format!("{}/{}", root, relative_path),
                    "No such file in test fixture",
                )
            })
    }
}
