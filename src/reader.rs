// Workbook enumeration + reading
// Turns files on disk into (sheet name, Sheet) pairs for the extractor

use crate::cell::Cell;
use crate::sheet::Sheet;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// A workbook that could not be turned into sheets
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot open {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("cannot read sheet '{sheet}' of {}: {message}", path.display())]
    Sheet {
        path: PathBuf,
        sheet: String,
        message: String,
    },
}

// ============================================================================
// READER TRAIT
// ============================================================================

/// WorkbookReader - Opens one workbook and hands back its sheets in order
///
/// All-or-nothing: either every sheet is returned or the workbook is
/// reported unreadable.
pub trait WorkbookReader {
    fn read(&self, path: &Path) -> std::result::Result<Vec<(String, Sheet)>, ReadError>;
}

/// CalamineReader - xlsx / xlsm / xlsb / xls / ods through `calamine`
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineReader;

impl CalamineReader {
    pub fn new() -> Self {
        CalamineReader
    }
}

impl WorkbookReader for CalamineReader {
    fn read(&self, path: &Path) -> std::result::Result<Vec<(String, Sheet)>, ReadError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ReadError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| ReadError::Sheet {
                    path: path.to_path_buf(),
                    sheet: name.clone(),
                    message: e.to_string(),
                })?;
            sheets.push((name, range_to_sheet(&range)));
        }

        Ok(sheets)
    }
}

/// Build a Sheet anchored at A1.
///
/// calamine ranges start at the first used cell; leading blank rows and
/// columns are padded back in so indices match the on-screen grid.
pub fn range_to_sheet(range: &Range<Data>) -> Sheet {
    let Some((row_offset, col_offset)) = range.start() else {
        return Sheet::default();
    };

    let mut rows: Vec<Vec<Cell>> = (0..row_offset).map(|_| Vec::new()).collect();
    for source in range.rows() {
        let mut row: Vec<Cell> = (0..col_offset).map(|_| Cell::Absent).collect();
        row.extend(source.iter().map(data_to_cell));
        rows.push(row);
    }

    Sheet::new(rows)
}

/// Text values read as missing, like pandas' default `na_values`.
///
/// Compared exactly: no trimming, no case folding.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Map one calamine value onto the closed Cell variant
pub fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Absent,
        Data::String(text) if MISSING_MARKERS.contains(&text.as_str()) => Cell::Absent,
        Data::Int(value) => Cell::Integer(*value),
        Data::Float(value) => Cell::Fraction(*value),
        Data::String(text) => Cell::Text(text.clone()),
        Data::Bool(flag) => Cell::Integer(i64::from(*flag)),
        Data::DateTime(stamp) => Cell::Opaque(render_date_time(stamp)),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Opaque(text.clone()),
    }
}

/// Serials below one day carry no date part and render as a bare time
fn render_date_time(stamp: &ExcelDateTime) -> String {
    let serial = stamp.as_f64();
    let pattern = if (0.0..1.0).contains(&serial) {
        "%H:%M:%S"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };

    stamp
        .as_datetime()
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|| serial.to_string())
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// List workbooks in `dir` (non-recursive), sorted by file name.
///
/// Keeps regular files whose extension is in `extensions` (lowercase, no
/// dot). Office lock files (`~$...`) and anything named like one of the
/// `exclude` paths (our own previous outputs) are left out.
pub fn enumerate_workbooks(dir: &Path, extensions: &[String], exclude: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let excluded: HashSet<OsString> = exclude
        .iter()
        .filter_map(|path| path.file_name().map(|name| name.to_os_string()))
        .collect();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list workbook directory: {}", dir.display()))?;

    let mut workbooks = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name();
        if excluded.contains(&name) || name.to_string_lossy().starts_with("~$") {
            continue;
        }

        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| extensions.contains(&ext));
        if accepted {
            workbooks.push(path);
        }
    }

    workbooks.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(workbooks)
}
