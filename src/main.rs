use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::info;

use pix_extract::{
    enumerate_workbooks, init_logging, run_batch, BatchReport, CalamineReader, CliArgs, Config,
    CsvSink, JsonSink, RecordSink,
};

fn main() -> Result<()> {
    let config = Config::from_args(CliArgs::parse())?;
    init_logging(&config.logging)?;
    config.validate()?;

    run(&config)
}

fn run(config: &Config) -> Result<()> {
    println!("📂 Scanning {} ...", config.input_dir.display());
    let workbooks = enumerate_workbooks(&config.input_dir, &config.extensions, &config.output_paths())?;
    println!("✓ Found {} workbooks", workbooks.len());

    let outcome = run_batch(&workbooks, &CalamineReader::new());
    info!(summary = %outcome.report.summary(), "batch finished");

    for workbook in outcome.report.unreadable() {
        if let pix_extract::WorkbookStatus::Unreadable { reason } = &workbook.status {
            eprintln!("⚠️  Could not open {}: {}", workbook.path.display(), reason);
        }
    }

    for sink in build_sinks(config) {
        sink.write(&outcome.records)?;
        println!("✓ Wrote {} records to {}", outcome.records.len(), sink.destination().display());
    }

    if let Some(path) = &config.report_output {
        write_report(&outcome.report, path)?;
        println!("✓ Wrote batch report to {}", path.display());
    }

    println!("\n{}", outcome.report.summary());
    Ok(())
}

fn build_sinks(config: &Config) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();

    if let Some(path) = &config.json_output {
        sinks.push(Box::new(JsonSink::new(path)));
    }

    if let Some(path) = &config.xlsx_output {
        #[cfg(feature = "xlsx")]
        sinks.push(Box::new(pix_extract::XlsxSink::new(path)));

        #[cfg(not(feature = "xlsx"))]
        eprintln!(
            "⚠️  XLSX output {} skipped: rebuild with --features xlsx",
            path.display()
        );
    }

    if let Some(path) = &config.csv_output {
        sinks.push(Box::new(CsvSink::new(path)));
    }

    sinks
}

fn write_report(report: &BatchReport, path: &std::path::Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))
}
