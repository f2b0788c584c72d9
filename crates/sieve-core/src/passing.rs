//! # Percent Passing
//!
//! Walks a stack from the top screen down, accumulating the retained mass,
//! and reports how much of the dry sample passed each screen:
//!
//! ```text
//! percent_passing = 100 × (dry_mass − cumulative_retained) / dry_mass
//! ```
//!
//! `cumulative_retained` includes the current screen. The pan adds to the
//! running total but has no row of its own.
//!
//! ## Rounding
//!
//! Values are rounded to [`PERCENT_DECIMALS`] places, half away from zero
//! (`f64::round`), and always printed with exactly that many decimals.

use crate::primitives::{PERCENT_DECIMALS, PERCENT_SCALE};
use crate::{SieveError, SieveStack};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// PERCENT
// =============================================================================

/// A percentage rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percent(f64);

impl Percent {
    /// Round `value` to one decimal place.
    #[must_use]
    pub fn new(value: f64) -> Self {
        let scale = 10f64.powi(PERCENT_DECIMALS);
        let rounded = (value * scale).round() / scale;
        // Keep "-0.0" out of reports.
        Self(if rounded == 0.0 { 0.0 } else { rounded })
    }

    /// The rounded value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", PERCENT_DECIMALS as usize, self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let value = text
            .trim()
            .parse::<f64>()
            .map_err(serde::de::Error::custom)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom(format!(
                "percentage must be a finite number, got {}",
                text
            )));
        }
        Ok(Self::new(value))
    }
}

// =============================================================================
// PASSING ROW
// =============================================================================

/// One line of a passing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassingRow {
    /// Screen aperture.
    pub size: f64,
    /// Mass retained on this screen.
    pub mass: f64,
    /// Mass retained on this screen and every screen above it.
    pub cumulative_retained: f64,
    /// Share of the dry sample that passed this screen.
    pub percent_passing: Percent,
}

impl PassingRow {
    /// Share of the dry sample held on or above this screen.
    #[must_use]
    pub fn percent_retained(&self) -> Percent {
        Percent::new(PERCENT_SCALE - self.percent_passing.value())
    }
}

// =============================================================================
// CALCULATION
// =============================================================================

impl SieveStack {
    /// Compute the passing table, one row per screen in stack order.
    ///
    /// Fails with `MissingSampleData` when the sample has no positive dry
    /// mass or the stack has no entries.
    pub fn compute_passing(&self) -> Result<Vec<PassingRow>, SieveError> {
        let dry_mass = self.sample().dry_mass;
        if !self.sample().has_usable_dry_mass() || self.is_empty() {
            return Err(SieveError::MissingSampleData);
        }

        let mut cumulative = 0.0;
        let mut rows = Vec::with_capacity(self.len().saturating_sub(1));

        for sieve in self {
            cumulative += sieve.mass();
            if let Some(size) = sieve.size().aperture() {
                rows.push(PassingRow {
                    size,
                    mass: sieve.mass(),
                    cumulative_retained: cumulative,
                    percent_passing: Percent::new(
                        PERCENT_SCALE * (dry_mass - cumulative) / dry_mass,
                    ),
                });
            }
        }

        Ok(rows)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sample, SieveSize, UnitsSystem};

    fn loaded_stack(sizes: &[f64], masses: &[f64], dry_mass: f64) -> SieveStack {
        let mut stack = SieveStack::new(
            sizes.iter().copied(),
            UnitsSystem::Metric,
            Some(Sample::with_dry_mass(dry_mass)),
        );
        for (size, mass) in stack.sizes().into_iter().zip(masses) {
            stack.set_retained(size, *mass).expect("retain");
        }
        stack
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(Percent::new(95.0).to_string(), "95.0");
        assert_eq!(Percent::new(33.333_333).to_string(), "33.3");
        assert_eq!(Percent::new(66.666_666).to_string(), "66.7");
        assert_eq!(Percent::new(12.25).value(), 12.3);
        assert_eq!(Percent::new(-0.01).to_string(), "0.0");
    }

    #[test]
    fn percent_serializes_as_text() {
        let json = serde_json::to_string(&Percent::new(87.5)).expect("ser");
        assert_eq!(json, r#""87.5""#);
        let back: Percent = serde_json::from_str(&json).expect("de");
        assert_eq!(back, Percent::new(87.5));
    }

    #[test]
    fn percent_rejects_non_finite_text() {
        for json in [r#""NaN""#, r#""inf""#, r#""-infinity""#, r#""abc""#] {
            assert!(serde_json::from_str::<Percent>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn pan_mass_counts_but_pan_has_no_row() {
        let stack = loaded_stack(&[10.0, 2.0], &[100.0, 300.0, 600.0], 1000.0);
        let rows = stack.compute_passing().expect("passing");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].percent_passing.to_string(), "90.0");
        assert_eq!(rows[1].percent_passing.to_string(), "60.0");
        assert_eq!(rows[1].cumulative_retained, 400.0);
        assert_eq!(stack.total_retained(), 1000.0);
    }

    #[test]
    fn empty_sieves_pass_everything() {
        let stack = loaded_stack(&[20.0, 5.0], &[], 500.0);
        let rows = stack.compute_passing().expect("passing");
        assert!(rows.iter().all(|r| r.percent_passing == Percent::new(100.0)));
        assert!(rows.iter().all(|r| r.percent_retained() == Percent::new(0.0)));
    }

    #[test]
    fn rows_follow_stack_order() {
        let stack = loaded_stack(&[0.08, 20.0, 2.0], &[10.0, 20.0, 30.0], 100.0);
        let sizes: Vec<f64> = stack
            .compute_passing()
            .expect("passing")
            .iter()
            .map(|r| r.size)
            .collect();
        assert_eq!(sizes, vec![20.0, 2.0, 0.08]);
    }

    #[test]
    fn percent_retained_complements_passing() {
        let stack = loaded_stack(&[10.0], &[250.0], 1000.0);
        let rows = stack.compute_passing().expect("passing");
        assert_eq!(rows[0].percent_retained().to_string(), "25.0");
    }

    #[test]
    fn missing_dry_mass_is_rejected() {
        let stack = SieveStack::new([16.0, 12.0, 5.0, 2.0], UnitsSystem::Metric, None);
        assert_eq!(stack.compute_passing(), Err(SieveError::MissingSampleData));

        let negative = loaded_stack(&[16.0], &[], -10.0);
        assert_eq!(
            negative.compute_passing(),
            Err(SieveError::MissingSampleData)
        );
    }

    #[test]
    fn pan_only_stack_has_empty_table() {
        let stack = loaded_stack(&[], &[], 100.0);
        assert_eq!(stack.sizes(), vec![SieveSize::Pan]);
        assert!(stack.compute_passing().expect("passing").is_empty());
    }
}
