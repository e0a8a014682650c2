//! Testing infrastructure for hostfn-audit.
//!
//! - **[`MemoryFetcher`]**: in-memory [`SourceFetcher`](crate::io::SourceFetcher)
//!   keyed by root and relative path
//! - **Fixtures**: builders that render realistic import lists, wrapper lists
//!   and guest bindings from one function description
//!
//! Tests built on these never touch the network and only touch the disk
//! when they opt in through [`AuditFixture::write_to`].

pub mod helpers;
pub mod mock_env;

pub use helpers::{
    render_guest_bindings, render_import_list, render_wrapper_list, standard_host_functions,
    AuditFixture, HostFunctionFixture, BINDINGS_ROOT, HOST_ROOT,
};
pub use mock_env::MemoryFetcher;
