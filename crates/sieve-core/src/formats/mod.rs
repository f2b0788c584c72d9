//! # Formats
//!
//! Serializable forms of a stack for collaborators that store or transmit
//! sieve tests. File I/O lives in the app layer.

pub mod snapshot;

pub use snapshot::StackSnapshot;
