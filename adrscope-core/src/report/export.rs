use crate::report::AnalysisReport;
use crate::report::render::{render_plain, render_pretty};
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Coloured terminal summary
    Pretty,
    /// Uncoloured text summary
    Plain,
    /// Full report as JSON
    Json,
    /// Full report as YAML
    Yaml,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn write_report<W: Write>(
    report: &AnalysisReport,
    format: ReportFormat,
    mut out: W,
) -> Result<(), ExportError> {
    match format {
        ReportFormat::Pretty => out.write_all(render_pretty(report).as_bytes())?,
        ReportFormat::Plain => out.write_all(render_plain(report).as_bytes())?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            out.write_all(b"\n")?;
        }
        ReportFormat::Yaml => serde_yaml::to_writer(&mut out, report)?,
    }
    out.flush()?;
    Ok(())
}
