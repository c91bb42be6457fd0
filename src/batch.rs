// Batch orchestration
// Workbooks in order → sheets in order → records, with an audit trail of what was skipped

use crate::extractor::try_extract;
use crate::reader::WorkbookReader;
use crate::record::Record;
use crate::sheet::Sheet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// REPORT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    pub name: String,
    pub header_row: Option<usize>,
    pub records: usize,
    /// false when CONTA had no label and was taken from the column after AGENCIA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conta_labeled: Option<bool>,
    /// Why the sheet produced nothing, when it was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkbookStatus {
    Processed,
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: WorkbookStatus,
    pub sheets: Vec<SheetReport>,
}

impl WorkbookReport {
    pub fn is_unreadable(&self) -> bool {
        matches!(self.status, WorkbookStatus::Unreadable { .. })
    }

    pub fn record_count(&self) -> usize {
        self.sheets.iter().map(|s| s.records).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub workbooks: Vec<WorkbookReport>,
}

impl BatchReport {
    pub fn total_records(&self) -> usize {
        self.workbooks.iter().map(WorkbookReport::record_count).sum()
    }

    pub fn unreadable(&self) -> Vec<&WorkbookReport> {
        self.workbooks.iter().filter(|w| w.is_unreadable()).collect()
    }

    pub fn skipped_sheets(&self) -> usize {
        self.workbooks
            .iter()
            .flat_map(|w| &w.sheets)
            .filter(|s| s.skipped.is_some())
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} workbooks ({} unreadable), {} sheets skipped, {} records",
            self.workbooks.len(),
            self.unreadable().len(),
            self.skipped_sheets(),
            self.total_records()
        )
    }
}

/// Records in output order plus the audit report
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<Record>,
    pub report: BatchReport,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run every sheet of an already-loaded workbook through the extractor
pub fn extract_sheets(sheets: &[(String, Sheet)]) -> (Vec<Record>, Vec<SheetReport>) {
    let mut records = Vec::new();
    let mut reports = Vec::with_capacity(sheets.len());

    for (name, sheet) in sheets {
        match try_extract(sheet) {
            Ok(extraction) => {
                debug!(sheet = %name, header_row = extraction.header_row, records = extraction.records.len(), "sheet extracted");
                if !extraction.columns.conta_labeled {
                    debug!(sheet = %name, conta_col = extraction.columns.conta, "no CONTA label, using the column after AGENCIA");
                }
                reports.push(SheetReport {
                    name: name.clone(),
                    header_row: Some(extraction.header_row),
                    records: extraction.records.len(),
                    conta_labeled: Some(extraction.columns.conta_labeled),
                    skipped: None,
                });
                records.extend(extraction.records);
            }
            Err(skip) => {
                debug!(sheet = %name, reason = %skip, "sheet skipped");
                reports.push(SheetReport {
                    name: name.clone(),
                    header_row: None,
                    records: 0,
                    conta_labeled: None,
                    skipped: Some(skip.to_string()),
                });
            }
        }
    }

    (records, reports)
}

/// Read and extract one workbook. An unreadable workbook yields no records.
pub fn process_workbook<R>(path: &Path, reader: &R) -> (Vec<Record>, WorkbookReport)
where
    R: WorkbookReader + ?Sized,
{
    match reader.read(path) {
        Ok(sheets) => {
            let (records, sheet_reports) = extract_sheets(&sheets);
            info!(workbook = %path.display(), sheets = sheets.len(), records = records.len(), "workbook processed");
            (
                records,
                WorkbookReport {
                    path: path.to_path_buf(),
                    status: WorkbookStatus::Processed,
                    sheets: sheet_reports,
                },
            )
        }
        Err(err) => {
            warn!(workbook = %path.display(), error = %err, "workbook unreadable, skipping");
            (
                Vec::new(),
                WorkbookReport {
                    path: path.to_path_buf(),
                    status: WorkbookStatus::Unreadable {
                        reason: err.to_string(),
                    },
                    sheets: Vec::new(),
                },
            )
        }
    }
}

/// Process workbooks strictly in the given order and concatenate their records.
///
/// Never fails: unreadable workbooks and unresolvable sheets only show up in
/// the report.
pub fn run_batch<R>(paths: &[PathBuf], reader: &R) -> BatchOutcome
where
    R: WorkbookReader + ?Sized,
{
    let started_at = Utc::now();
    let mut records = Vec::new();
    let mut workbooks = Vec::with_capacity(paths.len());

    for path in paths {
        let (workbook_records, report) = process_workbook(path, reader);
        records.extend(workbook_records);
        workbooks.push(report);
    }

    BatchOutcome {
        records,
        report: BatchReport {
            started_at,
            finished_at: Utc::now(),
            workbooks,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::reader::ReadError;
    use std::collections::HashMap;

    /// In-memory reader: known paths yield sheets, anything else is unreadable
    struct FakeReader {
        books: HashMap<PathBuf, Vec<(String, Sheet)>>,
    }

    impl WorkbookReader for FakeReader {
        fn read(&self, path: &Path) -> Result<Vec<(String, Sheet)>, ReadError> {
            self.books.get(path).cloned().ok_or_else(|| ReadError::Open {
                path: path.to_path_buf(),
                message: "corrupt".to_string(),
            })
        }
    }

    fn payroll(name: &str) -> Sheet {
        Sheet::new(vec![
            vec![Cell::Absent, Cell::from("CPF"), Cell::from("BANCO"), Cell::Absent, Cell::from("AGENCIA")],
            vec![Cell::from(name), Cell::from("111"), Cell::Integer(1), Cell::from("BB"), Cell::from("0001")],
        ])
    }

    fn reader() -> FakeReader {
        let mut books = HashMap::new();
        books.insert(
            PathBuf::from("a.xlsx"),
            vec![
                ("Plan1".to_string(), payroll("Ana")),
                ("Capa".to_string(), Sheet::new(vec![vec![Cell::from("Resumo")]])),
                ("Plan2".to_string(), payroll("Bia")),
            ],
        );
        books.insert(PathBuf::from("c.xlsx"), vec![("Plan1".to_string(), payroll("Caio"))]);
        FakeReader { books }
    }

    #[test]
    fn test_batch_keeps_workbook_then_sheet_order() {
        let paths = vec![PathBuf::from("a.xlsx"), PathBuf::from("c.xlsx")];
        let outcome = run_batch(&paths, &reader());

        let names: Vec<&str> = outcome.records.iter().map(|r| r.nome.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bia", "Caio"]);
        assert_eq!(outcome.report.total_records(), 3);
    }

    #[test]
    fn test_unreadable_workbook_does_not_abort_batch() {
        let paths = vec![
            PathBuf::from("a.xlsx"),
            PathBuf::from("b.xlsx"),
            PathBuf::from("c.xlsx"),
        ];
        let outcome = run_batch(&paths, &reader());

        assert_eq!(outcome.records.len(), 3);
        let unreadable = outcome.report.unreadable();
        assert_eq!(unreadable.len(), 1);
        assert_eq!(unreadable[0].path, PathBuf::from("b.xlsx"));
        assert!(unreadable[0].sheets.is_empty());
    }

    #[test]
    fn test_skipped_sheet_is_reported() {
        let (_, report) = process_workbook(Path::new("a.xlsx"), &reader());

        assert_eq!(report.status, WorkbookStatus::Processed);
        assert_eq!(report.sheets.len(), 3);
        assert_eq!(report.sheets[1].name, "Capa");
        assert_eq!(report.sheets[1].skipped.as_deref(), Some("no row mentions CPF"));
        assert_eq!(report.sheets[0].header_row, Some(0));
        assert_eq!(report.sheets[0].conta_labeled, Some(false));
        assert_eq!(report.sheets[1].conta_labeled, None);
        assert_eq!(report.record_count(), 2);
    }

    #[test]
    fn test_report_summary_and_json() {
        let paths = vec![PathBuf::from("a.xlsx"), PathBuf::from("zzz.xlsx")];
        let outcome = run_batch(&paths, &reader());

        assert_eq!(
            outcome.report.summary(),
            "2 workbooks (1 unreadable), 1 sheets skipped, 2 records"
        );
        assert!(outcome.report.finished_at >= outcome.report.started_at);

        let json = serde_json::to_value(&outcome.report).unwrap();
        assert_eq!(json["workbooks"][0]["status"], "processed");
        assert_eq!(json["workbooks"][1]["status"], "unreadable");
        assert!(json["workbooks"][1]["reason"].as_str().unwrap().contains("corrupt"));
        assert_eq!(json["workbooks"][0]["sheets"][0]["conta_labeled"], false);
        assert!(json["workbooks"][0]["sheets"][1].get("conta_labeled").is_none());
    }

    #[test]
    fn test_empty_batch() {
        let outcome = run_batch(&[], &reader());
        assert!(outcome.records.is_empty());
        assert!(outcome.report.workbooks.is_empty());
    }
}
