//! # Stack Snapshot
//!
//! A plain, serde-friendly copy of a [`SieveStack`].
//!
//! Converting a snapshot back into a stack re-checks every stack invariant
//! before the data is trusted, so a hand-edited or corrupted file can never
//! produce a stack whose entries are out of order or missing the pan.

use crate::sieve::Sieve;
use crate::{Sample, SieveError, SieveStack, UnitsSystem};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Serializable copy of a stack's entries and sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSnapshot {
    #[serde(default)]
    pub units: UnitsSystem,
    #[serde(default)]
    pub sample: Sample,
    pub entries: Vec<Sieve>,
}

impl From<&SieveStack> for StackSnapshot {
    fn from(stack: &SieveStack) -> Self {
        Self {
            units: stack.units(),
            sample: *stack.sample(),
            entries: stack.entries().to_vec(),
        }
    }
}

impl SieveStack {
    /// Take a serializable copy of this stack.
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot::from(self)
    }
}

impl TryFrom<StackSnapshot> for SieveStack {
    type Error = SieveError;

    fn try_from(snapshot: StackSnapshot) -> Result<Self, Self::Error> {
        snapshot.validate()?;
        Ok(Self::from_parts(
            snapshot.entries,
            snapshot.units,
            snapshot.sample,
        ))
    }
}

impl StackSnapshot {
    /// Check the entries against the stack invariants.
    pub fn validate(&self) -> Result<(), SieveError> {
        let (last, screens) = self
            .entries
            .split_last()
            .ok_or_else(|| invalid("no entries"))?;

        if !last.is_pan() {
            return Err(invalid("last entry is not the pan"));
        }
        if screens.iter().any(Sieve::is_pan) {
            return Err(invalid("more than one pan"));
        }
        for pair in screens.windows(2) {
            if pair[0].size().stack_order(&pair[1].size()) != Ordering::Less {
                return Err(invalid(&format!(
                    "sizes not strictly descending at {} -> {}",
                    pair[0].size(),
                    pair[1].size()
                )));
            }
        }
        for sieve in &self.entries {
            sieve.size().validate()?;
            if sieve.units() != self.units {
                return Err(invalid(&format!(
                    "sieve {} uses {} units in a {} stack",
                    sieve.size(),
                    sieve.units(),
                    self.units
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> SieveError {
    SieveError::InvalidSnapshot(reason.to_string())
}

// =============================================================================
// TESTS
// =============================================================================
