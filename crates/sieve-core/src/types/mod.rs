//! # Core Type Definitions
//!
//! This module contains the value types shared by the sieve stack:
//! - Unit systems (`UnitsSystem`)
//! - Screen sizes and the pan sentinel (`SieveSize`, `SizeToken`)
//! - Sample context (`Sample`)
//! - Error types (`SieveError`)
//!
//! ## Ordering
//!
//! Stacks are ordered from the coarsest screen down to the pan. `SieveSize`
//! implements `PartialOrd` so that `Pan` compares smaller than every mesh
//! size; the stack sorts with [`SieveSize::stack_order`], which is total for
//! validated sizes.

use crate::primitives::{
    IMPERIAL_MASS_UNIT, IMPERIAL_SIZE_UNIT, METRIC_MASS_UNIT, METRIC_SIZE_UNIT, PAN_LABEL,
    PERCENT_SCALE,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

// =============================================================================
// UNITS
// =============================================================================

/// Unit system of a sieve test. Fixed when a sieve or stack is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitsSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitsSystem {
    /// Display unit for screen sizes ("mm" or "in").
    #[must_use]
    pub const fn size_unit(self) -> &'static str {
        match self {
            Self::Metric => METRIC_SIZE_UNIT,
            Self::Imperial => IMPERIAL_SIZE_UNIT,
        }
    }

    /// Display unit for retained masses ("g" or "lb").
    #[must_use]
    pub const fn mass_unit(self) -> &'static str {
        match self {
            Self::Metric => METRIC_MASS_UNIT,
            Self::Imperial => IMPERIAL_MASS_UNIT,
        }
    }
}

impl fmt::Display for UnitsSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "metric"),
            Self::Imperial => write!(f, "imperial"),
        }
    }
}

// =============================================================================
// SIEVE SIZE
// =============================================================================

/// Size of a screen: a mesh aperture or the terminal pan.
///
/// A valid mesh size is finite and strictly positive. `From<f64>` does not
/// validate and is meant for lookups; anything that builds a sieve goes
/// through [`SieveSize::validate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "SizeToken", into = "SizeToken")]
pub enum SieveSize {
    /// Aperture of a mesh screen.
    Mesh(f64),
    /// The solid collector below the finest screen.
    Pan,
}

impl SieveSize {
    /// Create a validated mesh size.
    pub fn mesh(aperture: f64) -> Result<Self, SieveError> {
        Self::Mesh(aperture).validate()
    }

    /// Return `self` if it is a valid size, `InvalidSize` otherwise.
    pub fn validate(self) -> Result<Self, SieveError> {
        match self {
            Self::Mesh(aperture) if !(aperture.is_finite() && aperture > 0.0) => {
                Err(SieveError::InvalidSize(aperture.to_string()))
            }
            _ => Ok(self),
        }
    }

    /// Whether this is the pan sentinel.
    #[must_use]
    pub const fn is_pan(self) -> bool {
        matches!(self, Self::Pan)
    }

    /// The numeric aperture, `None` for the pan.
    #[must_use]
    pub const fn aperture(self) -> Option<f64> {
        match self {
            Self::Mesh(aperture) => Some(aperture),
            Self::Pan => None,
        }
    }

    /// Ordering of two sizes within a stack: coarser screens first, pan last.
    #[must_use]
    pub fn stack_order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Pan, Self::Pan) => Ordering::Equal,
            (Self::Pan, Self::Mesh(_)) => Ordering::Greater,
            (Self::Mesh(_), Self::Pan) => Ordering::Less,
            (Self::Mesh(a), Self::Mesh(b)) => b.total_cmp(a),
        }
    }
}

impl PartialEq for SieveSize {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pan, Self::Pan) => true,
            (Self::Mesh(a), Self::Mesh(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for SieveSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Pan, Self::Pan) => Some(Ordering::Equal),
            (Self::Pan, Self::Mesh(_)) => Some(Ordering::Less),
            (Self::Mesh(_), Self::Pan) => Some(Ordering::Greater),
            (Self::Mesh(a), Self::Mesh(b)) => a.partial_cmp(b),
        }
    }
}

impl From<f64> for SieveSize {
    fn from(aperture: f64) -> Self {
        Self::Mesh(aperture)
    }
}

impl fmt::Display for SieveSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh(aperture) => write!(f, "{aperture}"),
            Self::Pan => write!(f, "{PAN_LABEL}"),
        }
    }
}

impl TryFrom<SizeToken> for SieveSize {
    type Error = SieveError;

    fn try_from(token: SizeToken) -> Result<Self, Self::Error> {
        match token {
            SizeToken::Number(aperture) => Self::mesh(aperture),
            SizeToken::Label(label) if label == PAN_LABEL => Ok(Self::Pan),
            SizeToken::Label(label) => Err(SieveError::InvalidSize(label)),
        }
    }
}

// =============================================================================
// SIZE TOKEN
// =============================================================================

/// Loosely-typed size as read from user input: a number or a text label.
///
/// Stack construction keeps only positive finite numbers. Labels, including
/// "Pan", are dropped because the pan is always synthesized by the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeToken {
    Number(f64),
    Label(String),
}

impl SizeToken {
    /// The mesh size this token contributes to a new stack, if any.
    #[must_use]
    pub fn screen_size(&self) -> Option<SieveSize> {
        match self {
            Self::Number(aperture) => SieveSize::mesh(*aperture).ok(),
            Self::Label(_) => None,
        }
    }
}

impl From<f64> for SizeToken {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SizeToken {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for SizeToken {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<SieveSize> for SizeToken {
    fn from(size: SieveSize) -> Self {
        match size {
            SieveSize::Mesh(aperture) => Self::Number(aperture),
            SieveSize::Pan => Self::Label(PAN_LABEL.to_string()),
        }
    }
}

// =============================================================================
// SAMPLE
// =============================================================================

/// The soil sample a stack is run against.
///
/// Only `dry_mass` feeds the passing calculation. Masses are expressed in the
/// stack's mass unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Oven-dried mass before sieving.
    #[serde(default)]
    pub dry_mass: f64,
    /// Moist mass as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wet_mass: Option<f64>,
    /// Dry mass remaining after washing over the finest screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub washed_mass: Option<f64>,
}

impl Sample {
    /// Create a sample with only a dry mass.
    #[must_use]
    pub const fn with_dry_mass(dry_mass: f64) -> Self {
        Self {
            dry_mass,
            wet_mass: None,
            washed_mass: None,
        }
    }

    /// Whether `dry_mass` can be used as a denominator.
    #[must_use]
    pub fn has_usable_dry_mass(&self) -> bool {
        self.dry_mass.is_finite() && self.dry_mass > 0.0
    }

    /// Water content as a percentage of dry mass.
    #[must_use]
    pub fn moisture_content(&self) -> Option<f64> {
        let wet = self.wet_mass?;
        if !self.has_usable_dry_mass() {
            return None;
        }
        Some(PERCENT_SCALE * (wet - self.dry_mass) / self.dry_mass)
    }

    /// Mass of fines removed by washing.
    #[must_use]
    pub fn wash_loss(&self) -> Option<f64> {
        self.washed_mass.map(|washed| self.dry_mass - washed)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by sieve and stack operations.
///
/// - No silent failures
/// - Every operation either completes or leaves the stack untouched
#[derive(Debug, Error, PartialEq)]
pub enum SieveError {
    /// A size is neither a positive finite number nor the pan.
    #[error("Invalid sieve size: {0}")]
    InvalidSize(String),

    /// The stack has no entries at all.
    #[error("There are no sieves in the stack")]
    EmptyStack,

    /// The requested size is not in the stack.
    #[error("Sieve with size {0} not found")]
    NotFound(String),

    /// A retained mass is negative or not a finite number.
    #[error("Invalid mass {mass} for sieve {size}")]
    InvalidMass { size: String, mass: f64 },

    /// The passing calculation needs a positive dry mass and at least one sieve.
    #[error("Passing calculation requires a dry mass and at least one sieve")]
    MissingSampleData,

    /// A sieve of this size is already in the stack.
    #[error("Sieve with size {0} is already in the stack")]
    DuplicateSize(String),

    /// The pan cannot be removed from a stack.
    #[error("The pan cannot be removed from the stack")]
    ProtectedEntry,

    /// A stored stack violates the stack invariants.
    #[error("Invalid stack snapshot: {0}")]
    InvalidSnapshot(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
