// Row Extractor
// Header Locator → Column Mapper → Name-Column Inferrer → one Record per data row

use crate::cell::normalize;
use crate::coerce::{coerce, is_all_digits, FieldValue};
use crate::columns::{map_columns, FieldKey, HeaderMap, MissingColumn};
use crate::header::locate_header;
use crate::name_column::infer_name_column;
use crate::record::Record;
use crate::sheet::Sheet;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Prefix (upper-cased) of a summary row's name cell
const TOTAL_PREFIX: &str = "TOTAL";

// ============================================================================
// SKIP REASONS
// ============================================================================

/// Why a whole sheet contributed nothing. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SheetSkip {
    #[error("no row mentions CPF")]
    NoHeader,

    #[error("required column {0} not found in header row")]
    MissingColumn(FieldKey),

    #[error("no name column left of CPF column {cpf_col}")]
    NoNameColumn { cpf_col: usize },
}

impl From<MissingColumn> for SheetSkip {
    fn from(err: MissingColumn) -> Self {
        SheetSkip::MissingColumn(err.0)
    }
}

/// Resolved layout of one sheet plus what came out of it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetExtraction {
    pub header_row: usize,
    pub columns: HeaderMap,
    pub name_col: usize,
    pub records: Vec<Record>,
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract every record from a sheet; empty when the layout can't be resolved.
pub fn extract(sheet: &Sheet) -> Vec<Record> {
    match try_extract(sheet) {
        Ok(extraction) => extraction.records,
        Err(_) => Vec::new(),
    }
}

/// Same as [`extract`], but says why a sheet was skipped.
pub fn try_extract(sheet: &Sheet) -> Result<SheetExtraction, SheetSkip> {
    let header_row = locate_header(sheet).ok_or(SheetSkip::NoHeader)?;
    let columns = map_columns(sheet, header_row)?;
    let name_col = infer_name_column(sheet, header_row, columns.cpf)
        .ok_or(SheetSkip::NoNameColumn { cpf_col: columns.cpf })?;

    debug!(header_row, name_col, ?columns, "resolved sheet layout");

    let records = sheet
        .rows_below(header_row)
        .filter_map(|row| extract_row(sheet, row, name_col, &columns))
        .collect();

    Ok(SheetExtraction {
        header_row,
        columns,
        name_col,
        records,
    })
}

/// One data row → at most one Record
fn extract_row(sheet: &Sheet, row: usize, name_col: usize, columns: &HeaderMap) -> Option<Record> {
    let read = |col: Option<usize>| col.map(|c| normalize(sheet.cell(row, c))).unwrap_or_default();

    let nome = read(Some(name_col));
    if nome.is_empty() || nome.to_uppercase().starts_with(TOTAL_PREFIX) {
        return None;
    }

    let cpf = read(Some(columns.cpf));
    let banco_codigo = read(Some(columns.banco));
    let banco_nome = read(Some(columns.bank_name()));
    let agencia = read(Some(columns.agencia));
    let conta = read(Some(columns.conta));
    let chave_tipo = read(columns.chave_tipo);
    let chave_valor = read(columns.chave_valor);

    // Name is deliberately not part of this check
    let payment_fields = [
        &cpf,
        &banco_codigo,
        &banco_nome,
        &agencia,
        &conta,
        &chave_tipo,
        &chave_valor,
    ];
    if payment_fields.iter().all(|field| field.is_empty()) {
        return None;
    }

    let chave_pix = if is_all_digits(&chave_valor) {
        coerce(&chave_valor)
    } else {
        FieldValue::Text(chave_valor)
    };

    Some(Record {
        nome,
        cpf,
        cod_banco: coerce(&banco_codigo),
        banco: banco_nome,
        agencia,
        conta,
        tipo_chave_pix: chave_tipo,
        chave_pix,
    })
}
