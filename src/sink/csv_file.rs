use super::{ensure_parent, RecordSink};
use crate::record::{Record, FIELD_NAMES};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::path::{Path, PathBuf};

/// CsvSink - Header row of the eight field names, then one line per record
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSink { path: path.into() }
    }
}

impl RecordSink for CsvSink {
    fn write(&self, records: &[Record]) -> Result<()> {
        ensure_parent(&self.path)?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .with_context(|| format!("Failed to create CSV output: {}", self.path.display()))?;

        writer.write_record(FIELD_NAMES)?;
        for record in records {
            writer.write_record(record.values().iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;

        Ok(())
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::FieldValue;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let record = Record {
            nome: "Silva, Maria".to_string(),
            cpf: "11122233344".to_string(),
            cod_banco: FieldValue::Integer(1),
            banco: "Banco X".to_string(),
            agencia: "0001".to_string(),
            conta: "12345".to_string(),
            tipo_chave_pix: String::new(),
            chave_pix: FieldValue::text(""),
        };

        CsvSink::new(&path).write(&[record]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NOME,CPF,COD BANCO,BANCO,AGENCIA,CONTA,TIPO CHAVE PIX,CHAVE PIX");
        assert_eq!(lines[1], "\"Silva, Maria\",11122233344,1,Banco X,0001,12345,,");
        assert_eq!(lines.len(), 2);
    }
}
