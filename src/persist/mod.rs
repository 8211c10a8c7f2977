//! Durable history storage.
//!
//! History is persisted as a small text table, one row per
//! calculation, with an `operation,operand1,operand2,result,timestamp`
//! header and RFC 3339 timestamps. The format matches what the
//! persistence observer writes, so a file produced by auto-save loads
//! back verbatim.

use crate::core::{Calculation, OperationRegistry};
use crate::observe::{HistoryEvent, HistoryObserver, ObserverError};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod error;

pub use error::PersistError;

/// Expected header row of a history file.
pub const CSV_HEADER: &str = "operation,operand1,operand2,result,timestamp";

fn io_err(path: &Path, source: std::io::Error) -> PersistError {
    PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `entries` to `path` as a history table, creating parent
/// directories and truncating any previous file.
pub fn save_csv(path: &Path, entries: &[Calculation]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
        }
    }

    let mut out = Vec::new();
    writeln!(out, "{CSV_HEADER}").map_err(|e| io_err(path, e))?;
    for entry in entries {
        writeln!(
            out,
            "{},{},{},{},{}",
            entry.operation,
            entry.operand1,
            entry.operand2,
            entry.result,
            entry.timestamp.to_rfc3339()
        )
        .map_err(|e| io_err(path, e))?;
    }

    fs::write(path, out).map_err(|e| io_err(path, e))
}

/// Read a history table back into calculation entries.
///
/// Each row's operation must resolve in `registry`; the stored result
/// is kept as-is, but it is recomputed as a corruption check and a
/// mismatch logs a warning (the stored value wins). Timestamps are
/// restored from the file, not from load time.
pub fn load_csv(
    path: &Path,
    registry: &OperationRegistry,
) -> Result<Vec<Calculation>, PersistError> {
    let contents = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let mut lines = contents.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == CSV_HEADER => {}
        Some((_, header)) => {
            return Err(PersistError::InvalidHeader {
                path: path.to_path_buf(),
                found: header.to_string(),
            })
        }
        None => return Ok(Vec::new()),
    }

    let mut entries = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        entries.push(parse_row(path, idx + 1, line, registry)?);
    }
    Ok(entries)
}

fn parse_row(
    path: &Path,
    line_no: usize,
    line: &str,
    registry: &OperationRegistry,
) -> Result<Calculation, PersistError> {
    let malformed = |reason: String| PersistError::MalformedRow {
        path: path.to_path_buf(),
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 5 {
        return Err(malformed(format!(
            "expected 5 fields, found {}",
            fields.len()
        )));
    }

    let operation = fields[0].trim();
    let op = registry
        .resolve(operation)
        .map_err(|e| malformed(e.to_string()))?;

    let number = |field: &str, name: &str| -> Result<f64, PersistError> {
        field
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("invalid {name}: {field:?}")))
    };
    let operand1 = number(fields[1], "operand1")?;
    let operand2 = number(fields[2], "operand2")?;
    let result = number(fields[3], "result")?;

    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(fields[4].trim())
        .map_err(|_| malformed(format!("invalid timestamp: {:?}", fields[4])))?
        .with_timezone(&Utc);

    // Corruption check: stored result should match recomputation.
    // A mismatch is tolerated; the stored value wins.
    match op.apply(operand1, operand2) {
        Ok(recomputed) if recomputed != result => {
            tracing::warn!(
                operation,
                stored = result,
                recomputed,
                "loaded result differs from recomputed result"
            );
        }
        _ => {}
    }

    Ok(Calculation::from_parts(
        operation, operand1, operand2, result, timestamp,
    ))
}

/// Persistence observer: rewrites the history file after every
/// committed mutation.
#[derive(Clone, Debug)]
pub struct AutoSaveObserver {
    path: PathBuf,
}

impl AutoSaveObserver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where this observer writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryObserver for AutoSaveObserver {
    fn on_event(
        &mut self,
        _event: HistoryEvent,
        snapshot: &[Calculation],
    ) -> Result<(), ObserverError> {
        save_csv(&self.path, snapshot)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "autosave observer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Calculator;
    use tempfile::tempdir;

    fn sample_entries() -> Vec<Calculation> {
        vec![
            Calculation::new("add", 15.0, 7.0, 22.0),
            Calculation::new("power", 2.0, 8.0, 256.0),
            Calculation::new("divide", 10.0, 4.0, 2.5),
        ]
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let entries = sample_entries();

        save_csv(&path, &entries).unwrap();
        let loaded = load_csv(&path, &OperationRegistry::with_builtins()).unwrap();

        assert_eq!(loaded, entries);
    }

    #[test]
    fn saved_file_has_header_and_one_row_per_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        save_csv(&path, &sample_entries()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("add,15,7,22,"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("history.csv");
        save_csv(&path, &sample_entries()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_history_saves_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        save_csv(&path, &[]).unwrap();

        let loaded = load_csv(&path, &OperationRegistry::with_builtins()).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_csv(&path, &OperationRegistry::with_builtins()).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn wrong_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "op,a,b,out,when\n").unwrap();

        let err = load_csv(&path, &OperationRegistry::with_builtins()).unwrap_err();
        assert!(matches!(err, PersistError::InvalidHeader { .. }));
    }

    #[test]
    fn short_row_is_rejected_with_line_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, format!("{CSV_HEADER}\nadd,1,2\n")).unwrap();

        let err = load_csv(&path, &OperationRegistry::with_builtins()).unwrap_err();
        match err {
            PersistError::MalformedRow { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn unknown_operation_in_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            format!("{CSV_HEADER}\nfactorial,5,0,120,2024-01-01T00:00:00+00:00\n"),
        )
        .unwrap();

        let err = load_csv(&path, &OperationRegistry::with_builtins()).unwrap_err();
        assert!(matches!(err, PersistError::MalformedRow { .. }));
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            format!("{CSV_HEADER}\nadd,one,2,3,2024-01-01T00:00:00+00:00\n"),
        )
        .unwrap();

        let err = load_csv(&path, &OperationRegistry::with_builtins()).unwrap_err();
        assert!(matches!(err, PersistError::MalformedRow { .. }));
    }

    #[test]
    fn result_mismatch_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        // Stored result disagrees with add(1, 2); the stored value wins.
        fs::write(
            &path,
            format!("{CSV_HEADER}\nadd,1,2,99,2024-01-01T00:00:00+00:00\n"),
        )
        .unwrap();

        let loaded = load_csv(&path, &OperationRegistry::with_builtins()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].result, 99.0);
    }

    #[test]
    fn autosave_observer_rewrites_the_file_on_every_event() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");

        let mut calc = Calculator::new(100);
        calc.subscribe(Box::new(AutoSaveObserver::new(&path)));

        calc.evaluate("add", 15.0, 7.0).unwrap();
        let after_record = load_csv(&path, &OperationRegistry::with_builtins()).unwrap();
        assert_eq!(after_record.len(), 1);

        calc.clear();
        let after_clear = load_csv(&path, &OperationRegistry::with_builtins()).unwrap();
        assert!(after_clear.is_empty());
        assert!(calc.drain_warnings().is_empty());
    }

    #[test]
    fn autosave_failure_surfaces_as_warning() {
        let dir = tempdir().unwrap();
        // A directory at the target path makes every save fail.
        let path = dir.path().join("history.csv");
        fs::create_dir_all(&path).unwrap();

        let mut calc = Calculator::new(100);
        calc.subscribe(Box::new(AutoSaveObserver::new(&path)));
        calc.evaluate("add", 1.0, 1.0).unwrap();

        // Mutation stands despite the failed save.
        assert_eq!(calc.snapshot().len(), 1);
        let warnings = calc.drain_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].observer, "autosave observer");
    }
}
