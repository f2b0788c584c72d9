//! # Sieve Test Files
//!
//! Two on-disk forms describe a stack:
//!
//! - **Test file** (TOML): the screen sizes, unit system, sample masses and
//!   the mass retained on each screen, as written up at the bench.
//! - **Snapshot** (JSON): a [`StackSnapshot`] exported by `sieve export`.
//!
//! ```toml
//! units = "metric"
//! sizes = [37.5, 19.0, 9.5, 4.75, 2.0]
//!
//! [sample]
//! dry_mass = 2000.0
//! wet_mass = 2150.0
//!
//! [[retained]]
//! size = 19.0
//! mass = 215.4
//!
//! [[retained]]
//! size = "Pan"
//! mass = 88.0
//! ```

use serde::{Deserialize, Serialize};
use sieve_core::{
    Sample, Sieve, SieveError, SieveSize, SieveStack, SizeToken, StackSnapshot, UnitsSystem,
};
use std::fmt;
use std::path::Path;

// =============================================================================
// INPUT FORMAT
// =============================================================================

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Sieve test file.
    Toml,
    /// Stack snapshot.
    Json,
}

impl InputFormat {
    /// Parse an explicit `--format` value.
    pub fn parse(name: &str) -> Result<Self, SieveError> {
        match name {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(SieveError::Serialization(format!(
                "Unknown format: {} (expected toml or json)",
                other
            ))),
        }
    }

    /// Pick a format from the file extension. Anything but `.json` is a test file.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "toml"),
            Self::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// TEST FILE
// =============================================================================

/// Mass recorded on one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainedMass {
    pub size: SieveSize,
    pub mass: f64,
}

/// A sieve test as written in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    #[serde(default)]
    pub units: UnitsSystem,
    #[serde(default)]
    pub sizes: Vec<SizeToken>,
    #[serde(default)]
    pub sample: Option<Sample>,
    #[serde(default)]
    pub retained: Vec<RetainedMass>,
}

impl TestConfig {
    /// Parse a test file.
    pub fn from_toml_str(contents: &str) -> Result<Self, SieveError> {
        toml::from_str(contents).map_err(|e| SieveError::Serialization(e.to_string()))
    }

    /// Build the stack and record every retained mass.
    ///
    /// A mass recorded against a size that is not in the stack, or a mass
    /// that is negative or not finite, is an error rather than a silent zero.
    pub fn into_stack(self) -> Result<SieveStack, SieveError> {
        let mut stack = SieveStack::new(self.sizes, self.units, self.sample);
        for entry in self.retained {
            if !Sieve::accepts_mass(entry.mass) {
                return Err(SieveError::InvalidMass {
                    size: entry.size.to_string(),
                    mass: entry.mass,
                });
            }
            stack.set_retained(entry.size, entry.mass)?;
        }
        Ok(stack)
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Parse a stack from file contents in the given format.
pub fn parse_stack(contents: &str, format: InputFormat) -> Result<SieveStack, SieveError> {
    match format {
        InputFormat::Toml => TestConfig::from_toml_str(contents)?.into_stack(),
        InputFormat::Json => {
            let snapshot: StackSnapshot = serde_json::from_str(contents)
                .map_err(|e| SieveError::Serialization(e.to_string()))?;
            SieveStack::try_from(snapshot)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
