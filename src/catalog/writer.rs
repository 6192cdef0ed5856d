// Catalog record writer
// Append-only plain-text catalog mapping source files to event times

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::catalog::storage::{CatalogError, CatalogResult};

/// One catalog line: a source file and one detected event time
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub filename: String,
    pub event_time: f64,
}

impl CatalogRecord {
    pub fn new(filename: impl Into<String>, event_time: f64) -> Self {
        CatalogRecord {
            filename: filename.into(),
            event_time,
        }
    }

    /// Serialize to one catalog line (with newline)
    pub fn to_line(&self) -> String {
        format!("{}, {}\n", self.filename, self.event_time)
    }
}

/// Append-only catalog writer
///
/// Clones share one lock, so appends from concurrent callers serialize
/// per file instead of interleaving partial lines.
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    file_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl CatalogWriter {
    /// Create a writer for a specific catalog file
    pub fn new(file_path: PathBuf) -> Self {
        CatalogWriter {
            file_path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Append one record, creating the file on first write
    pub fn append(&self, record: &CatalogRecord) -> CatalogResult<()> {
        let _guard = self.lock.lock().map_err(|_| CatalogError::Poisoned)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        file.write_all(record.to_line().as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Append every record of one run under a single lock acquisition
    pub fn append_all(&self, records: &[CatalogRecord]) -> CatalogResult<()> {
        let _guard = self.lock.lock().map_err(|_| CatalogError::Poisoned)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        for record in records {
            file.write_all(record.to_line().as_bytes())?;
        }

        file.flush()?;
        Ok(())
    }

    /// Get the catalog file path
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Read a catalog file back into records
pub fn read_catalog(path: &Path) -> CatalogResult<Vec<CatalogRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let mut records = Vec::new();

    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }

        records.push(parse_line(line)?);
    }

    Ok(records)
}

/// Parse one `filename, event_time` line
/// Splits on the last comma so commas in the filename survive
fn parse_line(line: &str) -> CatalogResult<CatalogRecord> {
    let (filename, time) = line.rsplit_once(',').ok_or_else(|| CatalogError::MalformedRecord {
        line: line.to_string(),
    })?;

    let event_time: f64 = time.trim().parse().map_err(|_| CatalogError::MalformedRecord {
        line: line.to_string(),
    })?;

    Ok(CatalogRecord {
        filename: filename.to_string(),
        event_time,
    })
}
