pub mod real;
pub mod traits;

pub use real::{fetcher_for_root, is_remote_root, raw_url, LocalFetcher, RemoteFetcher};
pub use traits::SourceFetcher;
