use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "shadow-report",
    version,
    about = "Compile test-run results into styled, formula-annotated spreadsheet reports"
)]
pub struct Cli {
    /// Testing framework the results came from
    #[arg(value_enum)]
    pub framework: Framework,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write today's report as a CSV file instead of the spreadsheet
    #[arg(long, global = true)]
    pub csv: bool,

    /// Write under a uniquified title when today's tab already exists
    #[arg(long, global = true)]
    pub duplicate: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: shadow-report.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

/// Closed framework tag. Only the CLI layer consumes it — the core operates
/// on normalized records and never branches on framework identity.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    #[value(alias = "cy")]
    Cypress,
    #[value(alias = "pw")]
    Playwright,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Only generate today's report
    TodaysReport,

    /// Only generate the previous month's summary
    MonthlySummary,
}

/// Reject flag/command combinations before any core work runs.
pub fn validate_cli(cli: &Cli) -> Result<(), ReportError> {
    if cli.csv && cli.command == Some(Commands::MonthlySummary) {
        return Err(ReportError::Config(
            "--csv is not supported with monthly-summary".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `shadow-report.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub csv: CsvConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Destination spreadsheet id; required for sheet output
    pub spreadsheet_id: Option<String>,

    /// Environment variable holding the API bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            spreadsheet_id: None,
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_cypress_results")]
    pub cypress_results: String,

    #[serde(default = "default_playwright_results")]
    pub playwright_results: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cypress_results: default_cypress_results(),
            playwright_results: default_playwright_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default = "default_csv_dir")]
    pub output_dir: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            output_dir: default_csv_dir(),
        }
    }
}

// Serde default helpers
fn default_endpoint() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}
fn default_token_env() -> String {
    "SHADOW_REPORT_TOKEN".to_string()
}
fn default_cypress_results() -> String {
    "cypress/results/output.json".to_string()
}
fn default_playwright_results() -> String {
    "playwright/results/output.json".to_string()
}
fn default_csv_dir() -> String {
    "reports".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("shadow-report.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolved values (merge CLI args with config file)
// ============================================================================

/// The results file for the selected framework.
pub fn results_path_for(framework: Framework, config: &AppConfig) -> String {
    match framework {
        Framework::Cypress => config.data.cypress_results.clone(),
        Framework::Playwright => config.data.playwright_results.clone(),
    }
}

/// Resolved spreadsheet access for sheet-writing runs. An explicit value
/// handed to the pipeline — core components never read configuration
/// themselves.
#[derive(Debug, Clone)]
pub struct SheetAccess {
    pub endpoint: String,
    pub spreadsheet_id: String,
    pub token: String,
}

pub fn resolve_sheet_access(config: &AppConfig) -> Result<SheetAccess, ReportError> {
    let spreadsheet_id = config
        .sheet
        .spreadsheet_id
        .clone()
        .ok_or_else(|| ReportError::Config("sheet.spreadsheet_id is not configured".to_string()))?;

    let token = std::env::var(&config.sheet.token_env).map_err(|_| {
        ReportError::Config(format!(
            "API token environment variable '{}' is not set",
            config.sheet.token_env
        ))
    })?;

    Ok(SheetAccess {
        endpoint: config.sheet.endpoint.clone(),
        spreadsheet_id,
        token,
    })
}
