//! Whole-file IO for the scored and geocoded outputs.
//!
//! Both are full rewrites rather than appends: the score step recomputes
//! everything from its inputs, and the geocode step autosaves its complete
//! progress so an interrupted run can resume from the written file.

use std::path::Path;

use lottang_core::{GeoStore, ScoredStore};

use crate::error::StoreError;

/// # Errors
///
/// Returns [`StoreError`] when the file cannot be created or a row fails to
/// serialize.
pub fn write_scored(path: &Path, rows: &[ScoredStore]) -> Result<(), StoreError> {
    write_all(path, rows)
}

/// # Errors
///
/// Returns [`StoreError::Csv`] when the file cannot be opened or parsed.
pub fn read_scored(path: &Path) -> Result<Vec<ScoredStore>, StoreError> {
    read_all(path)
}

/// # Errors
///
/// Returns [`StoreError`] when the file cannot be created or a row fails to
/// serialize.
pub fn write_geocoded(path: &Path, rows: &[GeoStore]) -> Result<(), StoreError> {
    write_all(path, rows)
}

/// # Errors
///
/// Returns [`StoreError::Csv`] when the file cannot be opened or parsed.
pub fn read_geocoded(path: &Path) -> Result<Vec<GeoStore>, StoreError> {
    read_all(path)
}

fn write_all<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }
    let mut writer = csv::Writer::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}

fn read_all<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(|e| StoreError::csv(path, e))?);
    }
    Ok(rows)
}
