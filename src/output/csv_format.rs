//! CSV output formatting.

use super::visible;
use crate::scanner::{ProbeState, ScanReport};
use crate::services::service_label;
use std::io::{self, Write};

/// Write one row per port.
pub fn write_csv<W: Write>(out: &mut W, report: &ScanReport, open_only: bool) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record([
        "port",
        "state",
        "service",
        "observed_at",
        "response_time_ms",
        "reason",
    ])?;

    for outcome in visible(report, open_only) {
        let reason = match &outcome.state {
            ProbeState::Error(reason) => reason.as_str(),
            _ => "",
        };
        wtr.write_record([
            outcome.port.to_string().as_str(),
            outcome.state.label(),
            service_label(outcome.port),
            outcome.observed_at.to_rfc3339().as_str(),
            outcome
                .response_time_ms
                .map_or(String::new(), |t| t.to_string())
                .as_str(),
            reason,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
