//! Reading history with a capped display view and CSV export

use crate::interpreter::Reading;
use crate::note::NO_NOTE;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Number of rows shown in the history table
pub const DEFAULT_DISPLAY_CAP: usize = 10;

/// CSV header for exported logs
pub const CSV_HEADER: &str = "timestamp,frequency,frozen_max,note";

/// Errors that can occur when exporting or importing a history log
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("No data to export")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// One exported row, as written to and read back from CSV
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub timestamp_ms: u64,
    pub frequency_hz: f32,
    pub frozen_max_hz: f32,
    /// Note label, [`NO_NOTE`] when absent
    pub note: String,
}

impl From<&Reading> for ExportRow {
    fn from(reading: &Reading) -> Self {
        Self {
            timestamp_ms: reading.timestamp_ms,
            frequency_hz: reading.frequency_hz,
            frozen_max_hz: reading.frozen_max_hz,
            note: reading
                .note
                .map(|n| n.to_string())
                .unwrap_or_else(|| NO_NOTE.to_string()),
        }
    }
}

/// Insertion-ordered log of valid readings
///
/// Every appended row is kept for export; only the most recent
/// `display_cap` rows are exposed through [`HistoryLog::recent`].
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Reading>,
    display_cap: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_CAP)
    }
}

impl HistoryLog {
    pub fn new(display_cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            display_cap,
        }
    }

    pub fn display_cap(&self) -> usize {
        self.display_cap
    }

    /// Append a reading
    pub fn push(&mut self, reading: Reading) {
        self.entries.push(reading);
    }

    /// Total rows appended since start (or last clear)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest `display_cap` rows, newest first
    pub fn recent(&self) -> impl Iterator<Item = &Reading> {
        self.entries.iter().rev().take(self.display_cap)
    }

    /// All rows in insertion order
    pub fn entries(&self) -> &[Reading] {
        &self.entries
    }

    /// Serialize every row as CSV
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + self.entries.len() * 32);
        out.push_str(CSV_HEADER);
        for reading in &self.entries {
            let row = ExportRow::from(reading);
            out.push('\n');
            out.push_str(&format!(
                "{},{:.1},{:.1},{}",
                row.timestamp_ms, row.frequency_hz, row.frozen_max_hz, row.note
            ));
        }
        out
    }

    /// Write the CSV export to `path`, creating parent directories
    pub fn write_csv(&self, path: &Path) -> Result<usize, HistoryError> {
        if self.entries.is_empty() {
            return Err(HistoryError::Empty);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_csv())?;
        tracing::info!(rows = self.entries.len(), path = %path.display(), "history exported");
        Ok(self.entries.len())
    }
}

/// Parse a CSV export back into rows
pub fn parse_csv(content: &str) -> Result<Vec<ExportRow>, HistoryError> {
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == CSV_HEADER => {}
        _ => {
            return Err(HistoryError::Parse {
                line: 1,
                reason: "missing header".to_string(),
            })
        }
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_err = |reason: &str| HistoryError::Parse {
            line: idx + 1,
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(parse_err("expected 4 fields"));
        }

        rows.push(ExportRow {
            timestamp_ms: fields[0].parse().map_err(|_| parse_err("bad timestamp"))?,
            frequency_hz: fields[1].parse().map_err(|_| parse_err("bad frequency"))?,
            frozen_max_hz: fields[2].parse().map_err(|_| parse_err("bad frozen_max"))?,
            note: fields[3].to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Loudness;
    use crate::note::Note;

    fn reading(ts: u64, freq: f32, max: f32) -> Reading {
        Reading {
            timestamp_ms: ts,
            frequency_hz: freq,
            note: Note::from_frequency(freq),
            frozen_max_hz: max,
            loudness: Loudness::default(),
        }
    }

    #[test]
    fn test_recent_view_capped_newest_first() {
        let mut log = HistoryLog::new(10);
        for i in 0..1000u64 {
            log.push(reading(i, 100.0 + i as f32, 1100.0));
        }
        let recent: Vec<u64> = log.recent().map(|r| r.timestamp_ms).collect();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent, (990..1000).rev().collect::<Vec<_>>());
        // Export keeps everything
        assert_eq!(log.len(), 1000);
    }

    #[test]
    fn test_recent_view_short_log() {
        let mut log = HistoryLog::new(10);
        log.push(reading(1, 100.0, 100.0));
        log.push(reading(2, 200.0, 200.0));
        let recent: Vec<u64> = log.recent().map(|r| r.timestamp_ms).collect();
        assert_eq!(recent, vec![2, 1]);
    }

    #[test]
    fn test_csv_format() {
        let mut log = HistoryLog::default();
        log.push(reading(1234, 440.0, 440.0));
        log.push(reading(1250, 64.599, 440.0));
        let csv = log.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "timestamp,frequency,frozen_max,note");
        assert_eq!(lines[1], "1234,440.0,440.0,A4");
        assert_eq!(lines[2], "1250,64.6,440.0,C2");
    }

    #[test]
    fn test_csv_roundtrip_preserves_order() {
        let mut log = HistoryLog::default();
        let mut max = 0.0f32;
        for (i, f) in [64.6f32, 430.66, 129.2, 880.0, 1001.27].iter().enumerate() {
            max = max.max(*f);
            log.push(reading(i as u64 * 16, *f, max));
        }

        let parsed = parse_csv(&log.to_csv()).unwrap();
        assert_eq!(parsed.len(), log.len());
        for (row, original) in parsed.iter().zip(log.entries()) {
            let expected = ExportRow::from(original);
            assert_eq!(row.timestamp_ms, expected.timestamp_ms);
            assert!((row.frequency_hz - expected.frequency_hz).abs() <= 0.05 + 1e-3);
            assert!((row.frozen_max_hz - expected.frozen_max_hz).abs() <= 0.05 + 1e-3);
            assert_eq!(row.note, expected.note);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse_csv("time,freq\n1,2"),
            Err(HistoryError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_csv("timestamp,frequency,frozen_max,note\n1,abc,2.0,A4"),
            Err(HistoryError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_csv("timestamp,frequency,frozen_max,note\n1,2.0,A4"),
            Err(HistoryError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_write_empty_log_fails() {
        let log = HistoryLog::default();
        let path = std::env::temp_dir().join("spectra-history-empty.csv");
        assert!(matches!(log.write_csv(&path), Err(HistoryError::Empty)));
    }

    #[test]
    fn test_write_csv_to_disk() {
        let mut log = HistoryLog::default();
        log.push(reading(7, 440.0, 440.0));
        let dir = std::env::temp_dir().join(format!("spectra-history-{}", std::process::id()));
        let path = dir.join("export.csv");
        assert_eq!(log.write_csv(&path).unwrap(), 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_csv(&content).unwrap().len(), 1);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
