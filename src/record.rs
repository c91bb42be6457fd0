// Record - One payment registration extracted from one data row

use crate::coerce::FieldValue;
use serde::{Deserialize, Serialize};

/// Output field names, in output order
pub const FIELD_NAMES: [&str; 8] = [
    "NOME",
    "CPF",
    "COD BANCO",
    "BANCO",
    "AGENCIA",
    "CONTA",
    "TIPO CHAVE PIX",
    "CHAVE PIX",
];

/// Record - Eight fields, fixed order, immutable after creation
///
/// Only the bank code and the PIX key value may be integers; every other
/// field is text. Struct field order drives serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "NOME")]
    pub nome: String,

    #[serde(rename = "CPF")]
    pub cpf: String,

    #[serde(rename = "COD BANCO")]
    pub cod_banco: FieldValue,

    #[serde(rename = "BANCO")]
    pub banco: String,

    #[serde(rename = "AGENCIA")]
    pub agencia: String,

    #[serde(rename = "CONTA")]
    pub conta: String,

    #[serde(rename = "TIPO CHAVE PIX")]
    pub tipo_chave_pix: String,

    #[serde(rename = "CHAVE PIX")]
    pub chave_pix: FieldValue,
}

impl Record {
    /// Field values in FIELD_NAMES order, for tabular sinks
    pub fn values(&self) -> [FieldValue; 8] {
        [
            FieldValue::text(self.nome.as_str()),
            FieldValue::text(self.cpf.as_str()),
            self.cod_banco.clone(),
            FieldValue::text(self.banco.as_str()),
            FieldValue::text(self.agencia.as_str()),
            FieldValue::text(self.conta.as_str()),
            FieldValue::text(self.tipo_chave_pix.as_str()),
            self.chave_pix.clone(),
        ]
    }
}
