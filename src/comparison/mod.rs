//! Positional and nominal conformance checks between declaration sets.

pub mod comparator;

pub use comparator::ConformanceComparer;
