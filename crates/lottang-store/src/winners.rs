//! Append-only persistence for winner rows.
//!
//! Each draw's rows are flushed as soon as they are produced, so a crash
//! mid-range leaves every prior draw's output intact. Re-invoking with
//! `append = true` continues an existing file without rewriting the header.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use lottang_core::WinnerRow;

use crate::error::StoreError;

/// Persisted column order. Append mode relies on this never changing, or an
/// appended run would not be a valid continuation of a prior one.
pub const WINNER_COLUMNS: [&str; 7] = [
    "draw_no",
    "no",
    "rank",
    "store_name",
    "address_full",
    "pick_type",
    "source",
];

pub struct WinnerSink {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl WinnerSink {
    /// Open the sink, creating parent directories as needed.
    ///
    /// With `append = true` and an existing file the header is skipped and
    /// rows are added at the end; otherwise the file is created (or
    /// truncated) and the header row written immediately, so even a run that
    /// produces no rows leaves a well-formed file behind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file cannot be created or written.
    pub fn open(path: &Path, append: bool) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let resume = append && path.exists();
        let file = if resume {
            OpenOptions::new().append(true).open(path)
        } else {
            File::create(path)
        }
        .map_err(|e| StoreError::io(path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !resume {
            writer
                .write_record(WINNER_COLUMNS)
                .map_err(|e| StoreError::csv(path, e))?;
        } else {
            tracing::info!(path = %path.display(), "resuming existing winners file");
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    /// Append rows in persisted column order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] when serialization or the underlying
    /// write fails.
    pub fn append(&mut self, rows: &[WinnerRow]) -> Result<(), StoreError> {
        for row in rows {
            self.writer
                .serialize(row)
                .map_err(|e| StoreError::csv(&self.path, e))?;
        }
        Ok(())
    }

    /// Flush buffered rows to disk; called once per completed draw.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the flush fails.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.writer
            .flush()
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

/// Read a winners file back, header row included in parsing.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] when the file cannot be opened or a row does
/// not deserialize.
pub fn read_winners(path: &Path) -> Result<Vec<WinnerRow>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(|e| StoreError::csv(path, e))?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use lottang_core::Rank;

    use super::*;

    fn row(draw_no: u32, name: &str, rank: Option<Rank>) -> WinnerRow {
        WinnerRow {
            draw_no,
            no: "1".to_string(),
            rank,
            store_name: name.to_string(),
            address_full: "서울 강남구 역삼동 1-1".to_string(),
            pick_type: "자동".to_string(),
            source: "parsed".to_string(),
        }
    }

    #[test]
    fn fresh_file_starts_with_the_header_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("winners_raw.csv");

        let mut sink = WinnerSink::open(&path, false).expect("open");
        sink.append(&[row(1100, "가게", Some(Rank::First))]).expect("append");
        sink.flush().expect("flush");
        drop(sink);

        let content = std::fs::read_to_string(&path).expect("read");
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("draw_no,no,rank,store_name,address_full,pick_type,source")
        );
        let first = lines.next().expect("data row");
        assert!(first.starts_with("1100,1,1,가게,"));
    }

    #[test]
    fn empty_run_still_leaves_a_headed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("winners_raw.csv");
        let mut sink = WinnerSink::open(&path, false).expect("open");
        sink.flush().expect("flush");
        drop(sink);

        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content.lines().count(), 1, "header only");
    }

    #[test]
    fn append_resume_keeps_prior_rows_and_single_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("winners_raw.csv");

        {
            let mut sink = WinnerSink::open(&path, false).expect("open fresh");
            for draw in 1100..=1110 {
                sink.append(&[row(draw, "기존가게", Some(Rank::First))]).expect("append");
                sink.flush().expect("flush");
            }
        }

        {
            let mut sink = WinnerSink::open(&path, true).expect("open resume");
            for draw in 1111..=1120 {
                sink.append(&[row(draw, "신규가게", Some(Rank::Second))]).expect("append");
                sink.flush().expect("flush");
            }
        }

        let content = std::fs::read_to_string(&path).expect("read");
        let header_count = content
            .lines()
            .filter(|l| l.starts_with("draw_no,"))
            .count();
        assert_eq!(header_count, 1, "append must not repeat the header");

        let rows = read_winners(&path).expect("roundtrip");
        assert_eq!(rows.len(), 21);
        let draws: Vec<u32> = rows.iter().map(|r| r.draw_no).collect();
        assert_eq!(draws, (1100..=1120).collect::<Vec<u32>>());
        assert_eq!(rows[0].store_name, "기존가게");
        assert_eq!(rows[20].store_name, "신규가게");
    }

    #[test]
    fn append_without_existing_file_writes_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fresh.csv");
        let mut sink = WinnerSink::open(&path, true).expect("open");
        sink.append(&[row(5, "가게", None)]).expect("append");
        sink.flush().expect("flush");
        drop(sink);

        let rows = read_winners(&path).expect("roundtrip");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, None);
    }

    #[test]
    fn undetermined_rank_roundtrips_as_empty_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("winners_raw.csv");
        let mut sink = WinnerSink::open(&path, false).expect("open");
        sink.append(&[row(9, "무순위가게", None)]).expect("append");
        sink.flush().expect("flush");
        drop(sink);

        let content = std::fs::read_to_string(&path).expect("read");
        assert!(content.lines().nth(1).expect("row").contains("9,1,,무순위가게"));
        let rows = read_winners(&path).expect("roundtrip");
        assert_eq!(rows[0].rank, None);
    }
}
