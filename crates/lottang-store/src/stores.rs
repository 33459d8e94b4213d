//! Persistence for the store-directory crawl.

use std::fs::File;
use std::path::{Path, PathBuf};

use lottang_core::StoreRow;

use crate::error::StoreError;

pub const STORE_COLUMNS: [&str; 5] = ["store_name", "address_full", "tel", "sell_type", "source"];

/// Sink for seller rows; always starts a fresh file (the directory crawl has
/// no resume semantics — a rerun re-crawls everything).
pub struct StoreSink {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl StoreSink {
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file cannot be created or written.
    pub fn create(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(STORE_COLUMNS)
            .map_err(|e| StoreError::csv(path, e))?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] when serialization fails.
    pub fn append(&mut self, rows: &[StoreRow]) -> Result<(), StoreError> {
        for row in rows {
            self.writer
                .serialize(row)
                .map_err(|e| StoreError::csv(&self.path, e))?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the flush fails.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.writer
            .flush()
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

/// # Errors
///
/// Returns [`StoreError::Csv`] when the file cannot be opened or parsed.
pub fn read_stores(path: &Path) -> Result<Vec<StoreRow>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(|e| StoreError::csv(path, e))?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_rows_with_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stores_raw.csv");

        let mut sink = StoreSink::create(&path).expect("create");
        sink.append(&[StoreRow {
            store_name: "복권백화점".to_string(),
            address_full: "서울 강서구 화곡동 1".to_string(),
            tel: "02-123-4567".to_string(),
            sell_type: "lotto6/45".to_string(),
            source: "dhLottery".to_string(),
        }])
        .expect("append");
        sink.flush().expect("flush");
        drop(sink);

        let content = std::fs::read_to_string(&path).expect("read");
        assert!(content.starts_with("store_name,address_full,tel,sell_type,source\n"));

        let rows = read_stores(&path).expect("roundtrip");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].store_name, "복권백화점");
    }
}
