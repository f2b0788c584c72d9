//! # Primitives
//!
//! Fixed constants for the sieve stack and the passing calculation.
//! These are compiled in and immutable at runtime.

/// Label of the terminal collector, used for display and serialized input.
pub const PAN_LABEL: &str = "Pan";

/// Decimal places kept in a percent-passing value.
pub const PERCENT_DECIMALS: i32 = 1;

/// Scale factor from a mass fraction to a percentage.
pub const PERCENT_SCALE: f64 = 100.0;

/// Metric size unit.
pub const METRIC_SIZE_UNIT: &str = "mm";

/// Metric mass unit.
pub const METRIC_MASS_UNIT: &str = "g";

/// Imperial size unit.
pub const IMPERIAL_SIZE_UNIT: &str = "in";

/// Imperial mass unit.
pub const IMPERIAL_MASS_UNIT: &str = "lb";
