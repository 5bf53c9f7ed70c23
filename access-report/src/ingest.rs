use std::{fs, path::Path};

use num_format::{Locale, ToFormattedString};
use tracing::info;

use crate::{
    analytics::Analytics,
    error::IngestError,
    parser::{SEPARATOR, parse_lines},
    report::Report,
};

const BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub comments: usize,
    pub dropped: usize,
    pub records: usize,
    pub distinct_ips: usize,
}

/// Parses `text` and ranks its client addresses. Nothing is written here, so
/// a failure leaves no partial report behind.
pub fn build_report(text: &str) -> Result<(Report, Summary), IngestError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let parsed = parse_lines(text.lines(), SEPARATOR)?;
    let analytics: Analytics = parsed.records.iter().collect();
    let summary = Summary {
        lines: parsed.lines,
        comments: parsed.comments,
        dropped: parsed.dropped,
        records: parsed.records.len(),
        distinct_ips: analytics.distinct_ips(),
    };
    let report = Report::assemble(analytics.into_ranked()?);
    Ok((report, summary))
}

pub fn run(input: &Path, output: &Path) -> Result<Summary, IngestError> {
    info!(path = %input.display(), "ingesting access log");
    let bytes = fs::read(input).map_err(|source| IngestError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    // Undecodable bytes become U+FFFD instead of failing the run.
    let text = String::from_utf8_lossy(&bytes);
    let (report, summary) = build_report(&text)?;
    let csv = report.to_csv()?;

    let write_err = |source: std::io::Error| IngestError::WriteReport {
        path: output.to_path_buf(),
        source,
    };
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(output, csv).map_err(write_err)?;

    info!(
        lines = %summary.lines.to_formatted_string(&Locale::en),
        records = %summary.records.to_formatted_string(&Locale::en),
        dropped = summary.dropped,
        distinct_ips = %summary.distinct_ips.to_formatted_string(&Locale::en),
        path = %output.display(),
        "report written"
    );
    Ok(summary)
}
