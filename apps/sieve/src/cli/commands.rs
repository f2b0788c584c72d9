//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::{InputFormat, parse_stack};
use sieve_core::{PassingRow, Percent, SieveError, SieveStack};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE ACCESS
// =============================================================================

/// Largest sieve test or snapshot file `sieve` will read (1 MB).
///
/// A laboratory stack holds a few dozen screens at most.
const MAX_INPUT_FILE_SIZE: u64 = 1024 * 1024;

/// Read a sieve test or snapshot file into memory.
///
/// The path must name a regular file no larger than `max_size` bytes.
fn read_test_file(path: &Path, max_size: u64) -> Result<String, SieveError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        SieveError::Io(format!("Cannot open sieve test '{}': {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(SieveError::Io(format!(
            "Sieve test '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(SieveError::Serialization(format!(
            "Sieve test '{}' is {} bytes; the limit is {} bytes",
            path.display(),
            metadata.len(),
            max_size
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| SieveError::Io(format!("Read sieve test '{}': {}", path.display(), e)))
}

/// Resolve where `sieve export` writes its snapshot.
///
/// The directory must already exist; the snapshot file itself is created or
/// replaced.
fn snapshot_output_path(path: &Path) -> Result<PathBuf, SieveError> {
    let filename = path
        .file_name()
        .ok_or_else(|| SieveError::Io("Snapshot path has no file name".to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let dir = dir.canonicalize().map_err(|e| {
        SieveError::Io(format!("Snapshot directory '{}': {}", dir.display(), e))
    })?;
    if !dir.is_dir() {
        return Err(SieveError::Io(format!(
            "Snapshot directory '{}' is not a directory",
            dir.display()
        )));
    }

    Ok(dir.join(filename))
}

// =============================================================================
// LOADING
// =============================================================================

/// Read a stack from a sieve test or snapshot file.
///
/// `format` overrides the extension-based detection.
pub fn load_stack(file: &Path, format: Option<&str>) -> Result<SieveStack, SieveError> {
    let format = match format {
        Some(name) => InputFormat::parse(name)?,
        None => InputFormat::from_path(file),
    };
    tracing::info!("Loading sieve test from {:?} (format: {})", file, format);

    let contents = read_test_file(file, MAX_INPUT_FILE_SIZE)?;
    let stack = parse_stack(&contents, format)?;
    tracing::debug!(
        sieves = stack.len(),
        units = %stack.units(),
        dry_mass = stack.sample().dry_mass,
        "Stack loaded"
    );
    Ok(stack)
}

// =============================================================================
// PASSING COMMAND
// =============================================================================

/// Print the percent-passing table.
pub fn cmd_passing(file: &Path, format: Option<&str>, json_mode: bool) -> Result<(), SieveError> {
    let stack = load_stack(file, format)?;
    let rows = stack.compute_passing()?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&passing_json(&stack, &rows)).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", format_passing_table(&stack, &rows));
    Ok(())
}

/// JSON form of a passing table.
pub fn passing_json(stack: &SieveStack, rows: &[PassingRow]) -> serde_json::Value {
    serde_json::json!({
        "units": stack.units(),
        "size_unit": stack.units().size_unit(),
        "mass_unit": stack.units().mass_unit(),
        "dry_mass": stack.sample().dry_mass,
        "rows": rows,
    })
}

/// Text form of a passing table.
pub fn format_passing_table(stack: &SieveStack, rows: &[PassingRow]) -> String {
    let units = stack.units();
    let mut lines = vec![
        "Percent Passing".to_string(),
        "===============".to_string(),
        format!(
            "Dry mass: {} {}",
            stack.sample().dry_mass,
            units.mass_unit()
        ),
        String::new(),
        format!(
            "{:>12} {:>14} {:>16} {:>12}",
            format!("Size ({})", units.size_unit()),
            format!("Retained ({})", units.mass_unit()),
            format!("Cumulative ({})", units.mass_unit()),
            "Passing (%)"
        ),
    ];

    for row in rows {
        lines.push(format!(
            "{:>12} {:>14.1} {:>16.1} {:>12}",
            row.size,
            row.mass,
            row.cumulative_retained,
            row.percent_passing.to_string()
        ));
    }

    if let Some(pan) = stack.pan() {
        lines.push(format!("{:>12} {:>14.1}", pan.size().to_string(), pan.mass()));
    }

    lines.join("\n")
}

// =============================================================================
// STACK COMMAND
// =============================================================================

/// List the sieves and the sample.
pub fn cmd_stack(file: &Path, format: Option<&str>, json_mode: bool) -> Result<(), SieveError> {
    let stack = load_stack(file, format)?;

    if !stack.sample().has_usable_dry_mass() {
        tracing::warn!("Sample has no usable dry mass; the passing table is unavailable");
    }

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&stack_json(&stack)).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", format_stack(&stack));
    Ok(())
}

/// JSON form of a stack listing.
pub fn stack_json(stack: &SieveStack) -> serde_json::Value {
    let sample = stack.sample();
    serde_json::json!({
        "units": stack.units(),
        "entries": stack.entries(),
        "total_retained": stack.total_retained(),
        "sample": sample,
        "moisture_content": sample.moisture_content().map(Percent::new),
        "wash_loss": sample.wash_loss(),
    })
}

/// Text form of a stack listing.
pub fn format_stack(stack: &SieveStack) -> String {
    let units = stack.units();
    let sample = stack.sample();
    let mut lines = vec![
        "Sieve Stack".to_string(),
        "===========".to_string(),
        format!(
            "Units: {} ({} / {})",
            units,
            units.size_unit(),
            units.mass_unit()
        ),
        String::new(),
    ];

    for sieve in stack {
        let size = if sieve.is_pan() {
            sieve.size().to_string()
        } else {
            format!("{} {}", sieve.size(), sieve.size_unit())
        };
        lines.push(format!(
            "  {:<12} {:>10.1} {}",
            size,
            sieve.mass(),
            sieve.mass_unit()
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Total retained: {:.1} {}",
        stack.total_retained(),
        units.mass_unit()
    ));
    lines.push(format!("Dry mass:       {} {}", sample.dry_mass, units.mass_unit()));

    if let (Some(wet), Some(moisture)) = (sample.wet_mass, sample.moisture_content()) {
        lines.push(format!(
            "Wet mass:       {} {} (moisture {}%)",
            wet,
            units.mass_unit(),
            Percent::new(moisture)
        ));
    }
    if let (Some(washed), Some(loss)) = (sample.washed_mass, sample.wash_loss()) {
        lines.push(format!(
            "Washed mass:    {} {} (wash loss {:.1} {})",
            washed,
            units.mass_unit(),
            loss,
            units.mass_unit()
        ));
    }

    lines.join("\n")
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Write a JSON snapshot of the stack.
pub fn cmd_export(file: &Path, format: Option<&str>, output: &Path) -> Result<(), SieveError> {
    let stack = load_stack(file, format)?;
    let output = snapshot_output_path(output)?;

    let json = serde_json::to_string_pretty(&stack.snapshot())
        .map_err(|e| SieveError::Serialization(e.to_string()))?;
    std::fs::write(&output, json)
        .map_err(|e| SieveError::Io(format!("Write snapshot '{}': {}", output.display(), e)))?;

    tracing::info!("Exported {} sieves to {:?}", stack.len(), output);
    Ok(())
}
