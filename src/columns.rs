// Column Mapper
// Resolves semantic fields to column indices from the header row labels

use crate::sheet::Sheet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

// ============================================================================
// FIELD KEYS
// ============================================================================

/// FieldKey - Closed set of columns located by header label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    Cpf,
    Banco,
    Agencia,
    Conta,
    ChaveTipo,
    ChaveValor,
}

impl FieldKey {
    pub const ALL: [FieldKey; 6] = [
        FieldKey::Cpf,
        FieldKey::Banco,
        FieldKey::Agencia,
        FieldKey::Conta,
        FieldKey::ChaveTipo,
        FieldKey::ChaveValor,
    ];

    /// Exact (upper-cased, trimmed) header text that identifies the column.
    ///
    /// Note the PIX pair: "CHAVE PIX" labels the key TYPE, bare "PIX" the key VALUE.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Cpf => "CPF",
            FieldKey::Banco => "BANCO",
            FieldKey::Agencia => "AGENCIA",
            FieldKey::Conta => "CONTA",
            FieldKey::ChaveTipo => "CHAVE PIX",
            FieldKey::ChaveValor => "PIX",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A required column (CPF, BANCO or AGENCIA) has no matching header label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("required column {0} not found in header row")]
pub struct MissingColumn(pub FieldKey);

// ============================================================================
// HEADER MAP
// ============================================================================

/// HeaderMap - Column index per field for one sheet; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMap {
    pub cpf: usize,
    pub banco: usize,
    pub agencia: usize,
    pub conta: usize,
    pub chave_tipo: Option<usize>,
    pub chave_valor: Option<usize>,
    /// false when CONTA was derived from the AGENCIA position
    pub conta_labeled: bool,
}

impl HeaderMap {
    /// Bank name sits right after the bank code.
    ///
    /// Positional on purpose: the label above it varies too much between
    /// documents to be matched.
    pub fn bank_name(&self) -> usize {
        self.banco + 1
    }
}

/// Upper-cased, trimmed text of every text cell in the header row, by column
pub fn header_labels(sheet: &Sheet, header_row: usize) -> BTreeMap<usize, String> {
    sheet
        .row(header_row)
        .iter()
        .enumerate()
        .filter_map(|(col, cell)| cell.as_text().map(|text| (col, text.trim().to_uppercase())))
        .collect()
}

/// Build the HeaderMap for `header_row`.
///
/// Matching is exact on cleaned text, first column wins. CONTA falls back
/// to the column right after AGENCIA when no label matches.
pub fn map_columns(sheet: &Sheet, header_row: usize) -> Result<HeaderMap, MissingColumn> {
    let mut found: HashMap<FieldKey, usize> = HashMap::new();
    for (col, label) in header_labels(sheet, header_row) {
        if let Some(key) = FieldKey::ALL.iter().find(|key| key.label() == label) {
            found.entry(*key).or_insert(col);
        }
    }

    let find = |key: FieldKey| found.get(&key).copied();
    let require = |key: FieldKey| find(key).ok_or(MissingColumn(key));

    let cpf = require(FieldKey::Cpf)?;
    let banco = require(FieldKey::Banco)?;
    let agencia = require(FieldKey::Agencia)?;

    let labeled_conta = find(FieldKey::Conta);

    Ok(HeaderMap {
        cpf,
        banco,
        agencia,
        conta: labeled_conta.unwrap_or(agencia + 1),
        chave_tipo: find(FieldKey::ChaveTipo),
        chave_valor: find(FieldKey::ChaveValor),
        conta_labeled: labeled_conta.is_some(),
    })
}
