use super::{ensure_parent, RecordSink};
use crate::record::Record;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JsonSink - Pretty-printed array of record objects (2-space indent, UTF-8 kept as-is)
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSink { path: path.into() }
    }
}

impl RecordSink for JsonSink {
    fn write(&self, records: &[Record]) -> Result<()> {
        ensure_parent(&self.path)?;

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create JSON output: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, records)
            .with_context(|| format!("Failed to serialize records to {}", self.path.display()))?;
        writer.flush()?;

        Ok(())
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}
