//! Report generation — JSON and Markdown renderings of a snapshot.

pub mod json;
pub mod markdown;

use std::path::Path;

use crate::model::AggregateSnapshot;
use crate::VulnsumResult;

/// Output format for a rendered snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Structured JSON (machine-readable)
    Json,
    /// Human-readable Markdown with summary tables
    Markdown,
}

/// Render a snapshot to a string.
pub fn render_report(
    snapshot: &AggregateSnapshot,
    format: ReportFormat,
) -> VulnsumResult<String> {
    match format {
        ReportFormat::Json => json::render(snapshot),
        ReportFormat::Markdown => markdown::render(snapshot),
    }
}

/// Write a rendered snapshot to a path.
pub fn write_report(
    snapshot: &AggregateSnapshot,
    format: ReportFormat,
    output: &Path,
) -> VulnsumResult<()> {
    let content = render_report(snapshot, format)?;
    std::fs::write(output, content).map_err(crate::VulnsumError::Io)?;
    Ok(())
}
