// PIX Extract - Core Library
// Extraction engine for payment-registration spreadsheets, plus the
// reader/sink collaborators used by the CLI and tests

pub mod cell;
pub mod coerce;
pub mod sheet;
pub mod header;
pub mod columns;
pub mod name_column;
pub mod record;
pub mod extractor;
pub mod reader;
pub mod batch;
pub mod sink;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use cell::{normalize, Cell};
pub use coerce::{coerce, is_all_digits, FieldValue};
pub use sheet::Sheet;
pub use header::{locate_header, HEADER_MARKER};
pub use columns::{map_columns, FieldKey, HeaderMap, MissingColumn};
pub use name_column::infer_name_column;
pub use record::{Record, FIELD_NAMES};
pub use extractor::{extract, try_extract, SheetExtraction, SheetSkip};
pub use reader::{enumerate_workbooks, CalamineReader, ReadError, WorkbookReader};
pub use batch::{
    process_workbook, run_batch, BatchOutcome, BatchReport, SheetReport, WorkbookReport,
    WorkbookStatus,
};
pub use sink::{CsvSink, JsonSink, RecordSink};
#[cfg(feature = "xlsx")]
pub use sink::XlsxSink;
pub use config::{CliArgs, Config};
pub use logging::{init_logging, LogFormat, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
