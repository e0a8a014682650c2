//! Production implementations of [`SourceFetcher`].

use crate::errors::AuditError;
use crate::io::traits::SourceFetcher;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Reads artifacts from a local directory tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFetcher;

impl SourceFetcher for LocalFetcher {
    fn fetch(&self, root: &str, relative_path: &str) -> Result<String, AuditError> {
        let path = Path::new(root).join(relative_path);
        debug!(path = %path.display(), "reading local artifact");
        fs::read_to_string(&path)
            .map_err(|e| AuditError::read(path.display().to_string(), e.to_string()))
    }
}

/// Fetches artifacts from GitHub through `raw.githubusercontent.com`.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: reqwest::blocking::Client,
}

impl RemoteFetcher {
    pub fn new() -> Result<Self, AuditError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuditError::fetch("https://raw.githubusercontent.com", e.to_string()))?;
        Ok(Self { client })
    }

    /// GET `url`; any non-2xx status is a fetch error.
    pub fn fetch_url(&self, url: &str) -> Result<String, AuditError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AuditError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::fetch(url, status.to_string()));
        }

        response
            .text()
            .map_err(|e| AuditError::fetch(url, e.to_string()))
    }
}

impl SourceFetcher for RemoteFetcher {
    fn fetch(&self, root: &str, relative_path: &str) -> Result<String, AuditError> {
        let url = raw_url(root, relative_path);
        info!(%url, "fetching remote artifact");
        self.fetch_url(&url)
    }
}

/// Whether `root` names a remote repository rather than a local directory.
pub fn is_remote_root(root: &str) -> bool {
    root.contains("github.com")
}

/// Translate a repository browse URL plus a relative path into a raw
/// content URL. A root without a `tree` segment is taken to mean `HEAD`.
///
/// `https://github.com/XRPLF/rippled/tree/develop` + `README.md` becomes
/// `https://raw.githubusercontent.com/XRPLF/rippled/develop/README.md`.
pub fn raw_url(root: &str, relative_path: &str) -> String {
    let trimmed = root.trim_end_matches('/');
    let mut url = if trimmed.contains("tree") {
        trimmed.to_string()
    } else {
        format!("{}/tree/HEAD", trimmed)
    };
    url = url.replace("github.com", "raw.githubusercontent.com");
    url = url.replacen("tree/", "", 1);
    url.push('/');
    url.push_str(relative_path.trim_start_matches('/'));

    if !url.starts_with("http") {
        url = format!("https://{}", url);
    }
    url
}

/// Pick the fetcher for a reference root.
pub fn fetcher_for_root(root: &str) -> Result<Box<dyn SourceFetcher>, AuditError> {
    if is_remote_root(root) {
        Ok(Box::new(RemoteFetcher::new()?))
    } else {
        Ok(Box::new(LocalFetcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::TempDir;

    /// Serve one request on localhost with a canned status line.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            )
            .unwrap();
        });
        format!("http://{}/XRPLF/rippled/HEAD/src/xrpld/app/misc/WasmVM.cpp", addr)
    }

    fn local_only_fetcher() -> RemoteFetcher {
        RemoteFetcher {
            client: reqwest::blocking::Client::builder()
                .no_proxy()
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn test_raw_url_with_branch() {
        assert_eq!(
            raw_url(
                "https://github.com/XRPLF/rippled/tree/ripple/smart-escrow",
                "src/xrpld/app/misc/WasmVM.cpp"
            ),
            "https://raw.githubusercontent.com/XRPLF/rippled/ripple/smart-escrow/src/xrpld/app/misc/WasmVM.cpp"
        );
    }

    #[test]
    fn test_raw_url_defaults_to_head_and_scheme() {
        assert_eq!(
            raw_url("github.com/XRPLF/rippled/", "src/a.h"),
            "https://raw.githubusercontent.com/XRPLF/rippled/HEAD/src/a.h"
        );
    }

    #[test]
    fn test_is_remote_root() {
        assert!(is_remote_root("https://github.com/XRPLF/rippled"));
        assert!(!is_remote_root("../rippled"));
        assert!(!is_remote_root("/home/dev/src/rippled"));
    }

    #[test]
    fn test_local_fetcher_reads_relative_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/host")).unwrap();
        fs::write(dir.path().join("src/host/a.rs"), "pub fn a() -> i32;").unwrap();

        let root = dir.path().to_str().unwrap();
        let text = LocalFetcher.fetch(root, "src/host/a.rs").unwrap();
        assert_eq!(text, "pub fn a() -> i32;");
    }

    #[test]
    fn test_local_fetcher_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let err = LocalFetcher.fetch(root, "missing.rs").unwrap_err();
        assert_eq!(err.category(), "read");
        assert!(err.to_string().contains("missing.rs"));
    }

    #[test]
    fn test_fetcher_for_local_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.h"), "text").unwrap();
        let fetcher = fetcher_for_root(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(
            fetcher.fetch(dir.path().to_str().unwrap(), "x.h").unwrap(),
            "text"
        );
    }

    #[test]
    fn test_remote_fetcher_not_found_is_fetch_error() {
        let url = serve_once("404 Not Found", "");
        let err = local_only_fetcher().fetch_url(&url).unwrap_err();
        assert_eq!(err.category(), "fetch");
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains(&url));
    }

    #[test]
    fn test_remote_fetcher_returns_body_on_success() {
        let url = serve_once("200 OK", "WASM_IMPORT_FUNC(a, b);");
        let text = local_only_fetcher().fetch_url(&url).unwrap();
        assert_eq!(text, "WASM_IMPORT_FUNC(a, b);");
    }
}
