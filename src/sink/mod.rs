// Record Sinks
// Where the extracted records end up. Each sink owns its destination path;
// nothing here reads global state.
//
// - JSON: full fidelity (integers stay numbers)
// - XLSX: flat table with the fixed header row
// - CSV: same table as plain text

pub mod csv_file;
pub mod json_file;
#[cfg(feature = "xlsx")]
pub mod xlsx_file;

pub use csv_file::CsvSink;
pub use json_file::JsonSink;
#[cfg(feature = "xlsx")]
pub use xlsx_file::XlsxSink;

use crate::record::Record;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// RecordSink - Consumes the complete, ordered record sequence once
pub trait RecordSink {
    fn write(&self, records: &[Record]) -> Result<()>;

    /// Destination, for log lines and the CLI summary
    fn destination(&self) -> &Path;
}

/// Create the parent directory of `path` when it has one
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display())),
        _ => Ok(()),
    }
}
