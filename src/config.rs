// Configuration
// CLI flags (or PIX_EXTRACT_* env vars) layered over an optional JSON config file

use crate::logging::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSIONS: &[&str] = &["xlsx"];
const DEFAULT_JSON_OUTPUT: &str = "pix_output.json";
const DEFAULT_XLSX_OUTPUT: &str = "pix_output.xlsx";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "pix-extract",
    about = "Extract PIX payment registrations from loosely structured spreadsheets",
    version
)]
pub struct CliArgs {
    #[arg(long, value_name = "FILE", help = "Path to a JSON configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "PIX_EXTRACT_INPUT_DIR",
        value_name = "DIR",
        help = "Directory scanned for workbooks"
    )]
    pub input_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "PIX_EXTRACT_EXTENSIONS",
        value_name = "EXT",
        value_delimiter = ',',
        help = "Comma-separated list of workbook extensions"
    )]
    pub extensions: Option<Vec<String>>,

    #[arg(long, env = "PIX_EXTRACT_JSON_OUTPUT", value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    #[arg(long, env = "PIX_EXTRACT_XLSX_OUTPUT", value_name = "FILE")]
    pub xlsx_output: Option<PathBuf>,

    #[arg(long, env = "PIX_EXTRACT_CSV_OUTPUT", value_name = "FILE")]
    pub csv_output: Option<PathBuf>,

    #[arg(
        long,
        env = "PIX_EXTRACT_REPORT_OUTPUT",
        value_name = "FILE",
        help = "Write the batch audit report (JSON) here"
    )]
    pub report_output: Option<PathBuf>,

    #[arg(long, help = "Do not write the JSON output")]
    pub no_json: bool,

    #[arg(long, help = "Do not write the XLSX output")]
    pub no_xlsx: bool,

    #[arg(long, env = "PIX_EXTRACT_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[arg(long, env = "PIX_EXTRACT_LOG_FORMAT", value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

/// Same knobs as the CLI; every field optional
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub input_dir: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub json_output: Option<PathBuf>,
    pub xlsx_output: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub report_output: Option<PathBuf>,
    pub no_json: Option<bool>,
    pub no_xlsx: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

/// Config - Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub extensions: Vec<String>,
    pub json_output: Option<PathBuf>,
    pub xlsx_output: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub report_output: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let file = match args.config.as_ref() {
            Some(path) => load_config_file(path)?,
            None => PartialConfig::default(),
        };
        Self::merge(args, file)
    }

    /// CLI wins over file, file wins over defaults
    pub fn merge(args: CliArgs, file: PartialConfig) -> Result<Self> {
        let input_dir = args
            .input_dir
            .or(file.input_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut extensions = args
            .extensions
            .or(file.extensions)
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect())
            .into_iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect::<Vec<_>>();
        extensions.sort();
        extensions.dedup();

        let no_json = args.no_json || file.no_json.unwrap_or(false);
        let no_xlsx = args.no_xlsx || file.no_xlsx.unwrap_or(false);

        let json_output = (!no_json).then(|| {
            args.json_output
                .or(file.json_output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_JSON_OUTPUT))
        });
        let xlsx_output = (!no_xlsx).then(|| {
            args.xlsx_output
                .or(file.xlsx_output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_XLSX_OUTPUT))
        });

        let logging = LoggingConfig {
            level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            format: args.log_format.or(file.log_format).unwrap_or_default(),
        };

        Ok(Config {
            input_dir,
            extensions,
            json_output,
            xlsx_output,
            csv_output: args.csv_output.or(file.csv_output),
            report_output: args.report_output.or(file.report_output),
            logging,
        })
    }

    /// Fail fast before any workbook is touched
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.extensions.is_empty(),
            "at least one workbook extension must be provided"
        );
        anyhow::ensure!(
            self.input_dir.is_dir(),
            "input directory {:?} does not exist or is not a directory",
            self.input_dir
        );
        anyhow::ensure!(
            self.json_output.is_some() || self.xlsx_output.is_some() || self.csv_output.is_some(),
            "all outputs are disabled; nothing to write"
        );
        Ok(())
    }

    /// Every file this run writes; kept out of workbook enumeration
    pub fn output_paths(&self) -> Vec<PathBuf> {
        [
            &self.json_output,
            &self.xlsx_output,
            &self.csv_output,
            &self.report_output,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse JSON config {:?}", path))
}
