//! End-to-end wiring: ingest -> correlate + summarize -> report.

use crate::conf::AnalysisConfig;
use crate::ingest::{IngestError, Ingested, ingest_file};
use crate::report::{AnalysisReport, build_report};
use crate::spatial::SpatialSummarizer;
use crate::timeline::{SettingAttributor, TimelineCorrelator};
use std::path::Path;

/// Runs correlation and spatial summarization over an already ingested log.
///
/// Both stages only read the log, so their order is irrelevant.
pub fn analyze(ingested: &Ingested, config: &AnalysisConfig) -> AnalysisReport {
    let timelines = TimelineCorrelator::from_config(config).correlate(&ingested.log);
    let spatial =
        SpatialSummarizer::new(SettingAttributor::new(config.baseline)).summarize(&ingested.log);

    let report = build_report(config, ingested, timelines, spatial);

    tracing::info!(
        devices = report.devices.len(),
        uplink_sends = report.delivery.uplink.total.sends,
        uplink_failed = report.delivery.uplink.total.failures,
        downlink_sends = report.delivery.downlink.total.sends,
        downlink_failed = report.delivery.downlink.total.failures,
        "analysis complete"
    );

    report
}

pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<AnalysisReport, IngestError> {
    let ingested = ingest_file(path)?;
    Ok(analyze(&ingested, config))
}
