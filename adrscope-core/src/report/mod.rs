//! The structured result of an analysis run, and its export formats.
//!
//! Ingested
//! TimelineCorrelator -> DeviceTimeline
//! SpatialSummarizer -> SpatialSummary
//! build_report
//! AnalysisReport
//! render_pretty / render_plain / JSON / YAML

mod delivery;
mod export;
mod render;

#[cfg(test)]
mod tests;

pub use delivery::*;
pub use export::*;
pub use render::*;

use crate::conf::AnalysisConfig;
use crate::ingest::{IngestStats, Ingested};
use crate::spatial::SpatialSummary;
use crate::timeline::{
    DeviceId, DeviceTimeline, Location, Setting, SettingAttributor, Timestamp, TransmissionRecord,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    pub ingest: IngestStats,
    pub delivery: DirectionalDelivery,
    pub convergence: ConvergenceSummary,
    pub spatial: SpatialSummary,
    pub devices: Vec<DeviceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub device: DeviceId,
    /// Node number the simulator printed for this device.
    pub node: Option<u32>,
    pub location: Option<Location>,
    pub final_setting: Setting,
    pub adr_decisions: usize,
    pub adr_failures: usize,
    /// Time of the last ADR decision, i.e. when the device settled.
    pub convergence_time: Option<Timestamp>,
    pub delivery: DirectionalDelivery,
    pub uplink: Vec<TransmissionRecord>,
    pub downlink: Vec<TransmissionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvergenceSummary {
    pub converged_devices: usize,
    /// Devices that never received an ADR decision.
    pub unconverged_devices: usize,
    pub mean_secs: Option<f64>,
    pub latest_secs: Option<f64>,
}

impl ConvergenceSummary {
    pub fn from_devices(devices: &[DeviceReport]) -> Self {
        let times: Vec<f64> = devices
            .iter()
            .filter_map(|device| device.convergence_time)
            .collect();

        let mean_secs = (!times.is_empty()).then(|| times.iter().sum::<f64>() / times.len() as f64);
        let latest_secs = times.iter().copied().reduce(f64::max);

        Self {
            converged_devices: times.len(),
            unconverged_devices: devices.len() - times.len(),
            mean_secs,
            latest_secs,
        }
    }
}

/// Assembles the report. `timelines` must come from correlating `ingested.log`.
pub fn build_report(
    config: &AnalysisConfig,
    ingested: &Ingested,
    timelines: Vec<DeviceTimeline>,
    spatial: SpatialSummary,
) -> AnalysisReport {
    let attributor = SettingAttributor::new(config.baseline);
    let mut delivery = DirectionalDelivery::default();

    let devices: Vec<DeviceReport> = timelines
        .into_iter()
        .filter_map(|timeline| {
            let Some(record) = ingested.log.device(timeline.device) else {
                tracing::warn!(device = timeline.device.0, "timeline for unknown device");
                return None;
            };
            let decisions = &record.streams.adr_decisions;

            let device_delivery = DirectionalDelivery::from_timeline(&timeline);
            delivery.merge(&device_delivery);

            Some(DeviceReport {
                device: timeline.device,
                node: record.node,
                location: record.location,
                final_setting: attributor.final_setting(decisions),
                adr_decisions: decisions.len(),
                adr_failures: record.streams.adr_failures.len(),
                convergence_time: decisions.last().map(|decision| decision.at),
                delivery: device_delivery,
                uplink: timeline.uplink,
                downlink: timeline.downlink,
            })
        })
        .collect();

    AnalysisReport {
        config: config.clone(),
        ingest: ingested.stats.clone(),
        delivery,
        convergence: ConvergenceSummary::from_devices(&devices),
        spatial,
        devices,
    }
}
