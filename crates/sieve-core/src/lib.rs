//! # sieve-core
//!
//! The grain-size analysis engine - THE LOGIC.
//!
//! A sieve test passes a dried soil sample through a stack of mesh screens of
//! decreasing aperture. Each screen retains the particles too large to pass
//! it; a solid pan at the bottom catches the rest. This crate models that
//! stack and computes the cumulative percentage of the sample passing each
//! screen.
//!
//! ## Architecture
//!
//! ```text
//!   sizes + units + sample
//!            │
//!            ▼
//!   ┌────────────────┐   add / remove / set_retained
//!   │   SieveStack   │ ◄───────────────────────────
//!   │ Vec<Sieve>+Pan │
//!   └────────────────┘
//!            │ compute_passing()
//!            ▼
//!     Vec<PassingRow>
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure, synchronous, in-memory: no I/O, no async, no logging
//! - The stack owns its entries; nothing outside it can reorder them
//! - Every fallible operation returns `Result<_, SieveError>` and leaves the
//!   stack untouched on failure

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod passing;
pub mod primitives;
pub mod sieve;
pub mod stack;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use formats::StackSnapshot;
pub use passing::{PassingRow, Percent};
pub use sieve::Sieve;
pub use stack::SieveStack;
pub use types::{Sample, SieveError, SieveSize, SizeToken, UnitsSystem};
