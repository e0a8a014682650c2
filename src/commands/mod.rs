//! Command implementations.
//!
//! - **audit**: compare the guest bindings against the native host declarations

pub mod audit;

pub use audit::run_audit;
