//! Seed pack loading
//!
//! Reads a seed pack file into a loosely typed JSON value. Shape checks
//! happen afterwards in [`super::extract`].

use crate::domain::{Result, SeedError};
use serde_json::Value;
use std::path::Path;

/// Fail with `NotFound` unless `path` exists
///
/// `kind` names the file in the error, e.g. "Seed pack JSON".
pub fn ensure_exists(path: impl AsRef<Path>, kind: &str) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SeedError::not_found(kind, path.display().to_string()));
    }
    Ok(())
}

/// Read and parse a seed pack file
///
/// # Errors
///
/// - `NotFound` if the file does not exist
/// - `Io` if it cannot be read
/// - `Parse` if it is not valid JSON
pub fn load_seed_pack(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    ensure_exists(path, "Seed pack JSON")?;

    let contents = std::fs::read_to_string(path)
        .map_err(|e| SeedError::Io(format!("Failed to read {}: {e}", path.display())))?;

    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| SeedError::Parse(format!("{}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Seed pack parsed");
    Ok(value)
}
