//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use super::visible;
use crate::scanner::{ProbeState, ScanReport};
use crate::services::service_label;
use crate::types::PortRange;
use console::{style, Style};
use std::io::{self, Write};
use std::time::Duration;

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write the report as a table.
pub fn write_plain<W: Write>(out: &mut W, report: &ScanReport, open_only: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(HEAVY_RULE).cyan())?;
    writeln!(
        out,
        "                    {} Scan Results",
        style("portsweep").cyan().bold()
    )?;
    writeln!(out, "{}", style(HEAVY_RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Target:").bold(), report.target.hostname)?;
    writeln!(out, "  {} {}", style("IP Address:").bold(), report.target.address)?;
    writeln!(out, "  {} {}", style("Ports:").bold(), report.range)?;
    writeln!(out, "  {} {}", style("Workers:").bold(), report.worker_count)?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s{}",
        style("Statistics:").bold(),
        report.ports_scanned(),
        report.duration_ms as f64 / 1000.0,
        if report.cancelled {
            style(" (cancelled)").yellow().to_string()
        } else {
            String::new()
        }
    )?;
    writeln!(
        out,
        "               {} open, {} closed, {} filtered, {} errors",
        style(report.open_ports).green().bold(),
        style(report.closed_ports).red(),
        style(report.filtered_ports).yellow(),
        style(report.error_ports).magenta()
    )?;
    writeln!(out)?;

    let mut rows = visible(report, open_only).peekable();
    if rows.peek().is_none() {
        writeln!(out, "  {}", style("No ports to display.").dim())?;
    } else {
        writeln!(out, "  {}", style(LIGHT_RULE).dim())?;
        writeln!(
            out,
            "  {:>6}  {:^10}  {:<15}  {}",
            style("PORT").bold(),
            style("STATE").bold(),
            style("SERVICE").bold(),
            style("OBSERVED").bold()
        )?;
        writeln!(out, "  {}", style(LIGHT_RULE).dim())?;

        for outcome in rows {
            let state_style = match outcome.state {
                ProbeState::Open => Style::new().green().bold(),
                ProbeState::Closed => Style::new().red(),
                ProbeState::Filtered => Style::new().yellow(),
                ProbeState::Error(_) => Style::new().magenta(),
            };

            let observed = outcome.observed_at.format("%H:%M:%S%.3f").to_string();
            let detail = match &outcome.state {
                ProbeState::Error(reason) => format!("  {}", truncate_string(reason, 30)),
                _ => String::new(),
            };

            writeln!(
                out,
                "  {:>6}  {:^10}  {:<15}  {}{}",
                outcome.port,
                state_style.apply_to(outcome.state.label()),
                service_label(outcome.port),
                style(observed).dim(),
                style(detail).dim()
            )?;
        }

        writeln!(out, "  {}", style(LIGHT_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(HEAVY_RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(host: &str, range: &PortRange, workers: usize, timeout: Duration) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Target: {}", style("•").dim(), style(host).white().bold());
    println!(
        "{} Scanning {} ports ({}) with up to {} workers, {}ms timeout...",
        style("•").dim(),
        style(range.len()).white().bold(),
        range,
        workers,
        timeout.as_millis()
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Truncate a string to a maximum length, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
