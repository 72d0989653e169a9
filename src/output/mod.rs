//! Output formatting module.
//!
//! Renders a finalized [`ScanReport`] as plain text, JSON, or CSV. Workers
//! never print; everything here runs after the scan has completed.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{print_error, print_scan_header, print_warning, write_plain};

use crate::cli::OutputFormat;
use crate::scanner::{ProbeOutcome, ScanReport};
use std::io::{self, Write};

/// Format and print scan results to stdout.
pub fn print_results(report: &ScanReport, format: OutputFormat, open_only: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, report, format, open_only)?;
    out.flush()
}

/// Format scan results into any writer.
pub fn write_results<W: Write>(
    out: &mut W,
    report: &ScanReport,
    format: OutputFormat,
    open_only: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, report, open_only),
        OutputFormat::Json => write_json(out, report, open_only),
        OutputFormat::Csv => write_csv(out, report, open_only),
    }
}

/// Rows to display, ascending by port.
fn visible(report: &ScanReport, open_only: bool) -> impl Iterator<Item = &ProbeOutcome> {
    report
        .outcomes
        .iter()
        .filter(move |o| !open_only || o.is_open())
}
