//! # sieve
//!
//! Library half of the `sieve` binary: command definitions and the sieve
//! test file format, exposed so integration tests can drive them.

pub mod cli;
pub mod config;
