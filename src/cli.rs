//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::config::{AppSettings, Paths};
use crate::error::CliResult;
use crate::output;
use crate::scanner::{run_scan, ScanConfig};
use crate::types::PortRange;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// A concurrent TCP connect port scanner.
///
/// Probes every port of a range with a full TCP handshake and reports each
/// one as open, closed, filtered, or error.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
pub struct Cli {
    /// Target hostname or IP address to scan
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Port range to scan ("start-end" or a single port)
    #[arg(short, long, default_value = "1-1024")]
    pub ports: String,

    /// Maximum number of concurrent workers [default: 100]
    #[arg(short, long, env = "PORTSWEEP_WORKERS")]
    pub workers: Option<usize>,

    /// Per-port connection timeout in milliseconds [default: 1000]
    #[arg(short, long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Output format for results [default: plain]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Only list open ports in the output
    #[arg(long)]
    pub open_only: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Show a progress bar while scanning (plain output without --verbose)
    #[arg(long)]
    pub progress: bool,

    /// Suppress the scan header
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a settings file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store this run's workers, timeout, output and verbose as the new defaults
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Read the settings file this invocation points at.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// Where settings are read from and saved to.
    pub fn settings_path(&self) -> CliResult<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Paths::discover()?.settings_file()),
        }
    }

    /// Settings with this invocation's flags applied on top.
    pub fn effective_settings(&self, settings: &AppSettings) -> AppSettings {
        AppSettings {
            default_workers: self.workers.unwrap_or(settings.default_workers),
            default_timeout_ms: self.timeout.unwrap_or(settings.default_timeout_ms),
            default_output_format: match self.output {
                Some(format) => format.to_string(),
                None => settings.default_output_format.clone(),
            },
            verbose: self.verbose || settings.verbose,
        }
    }

    /// Whether to draw a progress bar. Debug logs on stderr would tear it, so
    /// verbose runs go without.
    pub fn show_progress(&self, verbose: bool, format: OutputFormat) -> bool {
        self.progress && !verbose && format == OutputFormat::Plain
    }

    /// Resolve, scan and print. `cancel` aborts the scan early.
    pub async fn execute(
        &self,
        settings: &AppSettings,
        cancel: CancellationToken,
    ) -> CliResult<()> {
        let range: PortRange = self.ports.parse()?;
        let effective = self.effective_settings(settings);
        let format = effective.output_format()?;
        let workers = effective.default_workers;
        let timeout = effective.timeout();
        let verbose = effective.verbose;

        if self.save_config {
            let path = self.settings_path()?;
            effective.save_to(&path)?;
            info!(path = %path.display(), "saved settings");
        }

        if !self.quiet && format == OutputFormat::Plain {
            output::print_scan_header(&self.host, &range, workers, timeout);
        }

        let mut config = ScanConfig::new(&self.host, range)
            .with_workers(workers)
            .with_timeout(timeout);
        if self.show_progress(verbose, format) {
            config = config.with_progress();
        }

        let report = run_scan(config, cancel).await?;

        if report.cancelled && !self.quiet {
            output::print_warning(&format!(
                "scan cancelled: {} of {} ports probed",
                report.ports_scanned(),
                report.range.len()
            ));
        }

        output::print_results(&report, format, self.open_only)?;
        Ok(())
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}
