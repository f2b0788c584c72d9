//! # Sieve
//!
//! One screen of a stack (or the pan) and the soil mass it retained.
//!
//! The size and unit system are fixed at construction. Only the retained
//! mass changes afterwards, through [`Sieve::retained`].

use crate::{SieveError, SieveSize, UnitsSystem};
use serde::{Deserialize, Serialize};

/// A screen of a given size holding a retained mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SieveRecord")]
pub struct Sieve {
    size: SieveSize,
    units: UnitsSystem,
    mass: f64,
}

impl Sieve {
    /// Create an empty sieve. Fails if `size` is not a valid mesh size or the pan.
    pub fn new(size: SieveSize, units: UnitsSystem) -> Result<Self, SieveError> {
        Ok(Self {
            size: size.validate()?,
            units,
            mass: 0.0,
        })
    }

    /// Create an empty mesh screen.
    pub fn mesh(aperture: f64, units: UnitsSystem) -> Result<Self, SieveError> {
        Self::new(SieveSize::Mesh(aperture), units)
    }

    /// Create an empty pan.
    #[must_use]
    pub const fn pan(units: UnitsSystem) -> Self {
        Self {
            size: SieveSize::Pan,
            units,
            mass: 0.0,
        }
    }

    /// Screen size.
    #[must_use]
    pub const fn size(&self) -> SieveSize {
        self.size
    }

    /// Unit system of this sieve.
    #[must_use]
    pub const fn units(&self) -> UnitsSystem {
        self.units
    }

    /// Retained mass, without updating it.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Display unit of the size.
    #[must_use]
    pub const fn size_unit(&self) -> &'static str {
        self.units.size_unit()
    }

    /// Display unit of the mass.
    #[must_use]
    pub const fn mass_unit(&self) -> &'static str {
        self.units.mass_unit()
    }

    #[must_use]
    pub const fn is_pan(&self) -> bool {
        self.size.is_pan()
    }

    /// Return the retained mass, first overwriting it with `mass` if given.
    ///
    /// Only finite, non-negative masses are stored (zero included). Anything
    /// else leaves the sieve untouched, so `retained(None)` is a pure read.
    pub fn retained(&mut self, mass: Option<f64>) -> f64 {
        if let Some(mass) = mass.filter(|m| Self::accepts_mass(*m)) {
            self.mass = mass;
        }
        self.mass
    }

    /// Whether `mass` can be stored on a sieve: finite and not negative.
    #[must_use]
    pub fn accepts_mass(mass: f64) -> bool {
        mass.is_finite() && mass >= 0.0
    }
}

/// Stored form of a sieve, checked before it becomes a [`Sieve`].
#[derive(Deserialize)]
struct SieveRecord {
    size: SieveSize,
    units: UnitsSystem,
    mass: f64,
}

impl TryFrom<SieveRecord> for Sieve {
    type Error = SieveError;

    fn try_from(record: SieveRecord) -> Result<Self, Self::Error> {
        if !Self::accepts_mass(record.mass) {
            return Err(SieveError::InvalidMass {
                size: record.size.to_string(),
                mass: record.mass,
            });
        }
        let mut sieve = Self::new(record.size, record.units)?;
        sieve.mass = record.mass;
        Ok(sieve)
    }
}

// =============================================================================
// TESTS
// =============================================================================
