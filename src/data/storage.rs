//! Plain-text storage for running entries.
//!
//! File format, one record per line:
//! - `<day>;<distance>`, e.g. `12;5.4`
//! - comma or period accepted as decimal separator on read, period on write
//! - no header, no quoting

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::models::Entry;

/// File access failure, carrying the path that was being read or written
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse one line into an entry, or `None` if it should be skipped
fn parse_line(line: &str) -> Option<Entry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let normalized = line.replace(',', ".");
    let mut fields = normalized.split(';');
    let day = fields.next()?.trim().parse::<i64>().ok()?;
    let distance = fields.next()?.trim().parse::<f64>().ok()?;
    if !distance.is_finite() || distance < 0.0 {
        return None;
    }
    Some(Entry::new(day, distance))
}

/// Read entries from a reader.
///
/// Empty, malformed and non-numeric lines are skipped. When a day appears
/// more than once only the first occurrence is kept. The result is sorted
/// by day.
pub fn parse_entries<R: BufRead>(reader: R) -> io::Result<Vec<Entry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(entry) = parse_line(&line) {
            if seen.insert(entry.day) {
                entries.push(entry);
            }
        }
    }

    entries.sort_by_key(|e| e.day);
    Ok(entries)
}

/// Write entries in their given order, one `<day>;<distance>` line each
pub fn write_entries<W: Write>(mut writer: W, entries: &[Entry]) -> io::Result<()> {
    for entry in entries {
        writeln!(writer, "{};{}", entry.day, entry.distance)?;
    }
    writer.flush()
}

/// File-backed import and export
pub struct Storage;

impl Storage {
    /// Load entries from a file
    pub fn load(path: &Path) -> Result<Vec<Entry>, StorageError> {
        let read_err = |source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_err)?;
        let entries = parse_entries(BufReader::new(file)).map_err(|e| {
            warn!(?path, "import failed: {e}");
            read_err(e)
        })?;
        info!(?path, count = entries.len(), "entries imported");
        Ok(entries)
    }

    /// Write entries to a file, overwriting whatever is there
    pub fn save(path: &Path, entries: &[Entry]) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        write_entries(BufWriter::new(file), entries).map_err(|e| {
            warn!(?path, "export failed: {e}");
            write_err(e)
        })?;
        info!(?path, count = entries.len(), "entries exported");
        Ok(())
    }
}
