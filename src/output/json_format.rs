//! JSON output formatting.

use crate::scanner::ScanReport;
use std::io::{self, Write};

/// Write the report as pretty-printed JSON.
///
/// With `open_only` the `outcomes` array is filtered; the counters still
/// describe the whole scan.
pub fn write_json<W: Write>(out: &mut W, report: &ScanReport, open_only: bool) -> io::Result<()> {
    let json = if open_only {
        let mut filtered = report.clone();
        filtered.outcomes.retain(|o| o.is_open());
        serde_json::to_string_pretty(&filtered)
    } else {
        serde_json::to_string_pretty(report)
    }
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    writeln!(out, "{}", json)
}
