use super::{ensure_parent, RecordSink};
use crate::coerce::FieldValue;
use crate::record::{Record, FIELD_NAMES};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};
use std::path::{Path, PathBuf};

/// XlsxSink - Single-sheet workbook: bold header row, then one row per record
///
/// Integers are written as numbers and text as strings; empty text is an
/// empty string cell, never a missing one.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XlsxSink { path: path.into() }
    }
}

impl RecordSink for XlsxSink {
    fn write(&self, records: &[Record]) -> Result<()> {
        ensure_parent(&self.path)?;

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
        let worksheet = workbook.add_worksheet();

        for (col, name) in FIELD_NAMES.iter().enumerate() {
            worksheet.write_string_with_format(0, col_num(col)?, *name, &header_format)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = u32::try_from(idx + 1).context("Too many records for one worksheet")?;
            for (col, value) in record.values().iter().enumerate() {
                write_value(worksheet, row, col_num(col)?, value)?;
            }
        }

        workbook
            .save(&self.path)
            .with_context(|| format!("Failed to save XLSX output: {}", self.path.display()))?;

        Ok(())
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}

fn col_num(col: usize) -> Result<u16> {
    u16::try_from(col).context("Column index out of range")
}

/// Largest integer an Excel double holds exactly (2^53)
const MAX_EXACT_NUMBER: u64 = 1 << 53;

fn write_value(worksheet: &mut Worksheet, row: u32, col: u16, value: &FieldValue) -> Result<()> {
    match value {
        FieldValue::Integer(number) if *number <= MAX_EXACT_NUMBER => {
            worksheet.write_number(row, col, *number as f64)?;
        }
        // Digits past double precision go out as text
        FieldValue::Integer(number) => {
            worksheet.write_string(row, col, number.to_string())?;
        }
        FieldValue::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
    }
    Ok(())
}
