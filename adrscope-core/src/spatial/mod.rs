//! Groups end devices by the setting they finish the run with, ready for a
//! scatter plot of node locations.
//!
//! Devices below DR5 are grouped by data rate. Devices at DR5 are grouped by
//! tx power instead, since DR5 is the only rate at which power is stepped.

use crate::timeline::{DeviceId, NodeEventLog, Setting, SettingAttributor};
use serde::Serialize;


/// Data rates 0..=4. DR5 is split out by tx power.
pub const DATA_RATE_BUCKETS: usize = Setting::MAX_DATA_RATE as usize;
pub const TX_POWER_BUCKETS: usize = Setting::MAX_TX_POWER as usize + 1;

/// One legend entry: the plotted coordinates of every device in the group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateBucket {
    pub label: String,
    pub devices: Vec<DeviceId>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl CoordinateBucket {
    fn new(label: String) -> Self {
        Self {
            label,
            devices: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    fn push(&mut self, device: DeviceId, x: f64, y: f64) {
        self.devices.push(device);
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialSummary {
    /// Index = final data rate (0..=4).
    pub by_data_rate: Vec<CoordinateBucket>,
    /// Index = final tx power of DR5 devices (0..=7).
    pub dr5_by_tx_power: Vec<CoordinateBucket>,
}

impl SpatialSummary {
    fn empty() -> Self {
        Self {
            by_data_rate: (0..DATA_RATE_BUCKETS)
                .map(|dr| CoordinateBucket::new(format!("DR{dr}")))
                .collect(),
            dr5_by_tx_power: (0..TX_POWER_BUCKETS)
                .map(|tx| CoordinateBucket::new(format!("DR5, TX{tx}")))
                .collect(),
        }
    }

    pub fn device_count(&self) -> usize {
        self.by_data_rate
            .iter()
            .chain(&self.dr5_by_tx_power)
            .map(CoordinateBucket::len)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialSummarizer {
    attributor: SettingAttributor,
}

impl SpatialSummarizer {
    pub fn new(attributor: SettingAttributor) -> Self {
        Self { attributor }
    }

    pub fn summarize(&self, log: &NodeEventLog) -> SpatialSummary {
        let mut summary = SpatialSummary::empty();

        for record in log.end_devices() {
            let Some(location) = record.location else {
                continue;
            };

            let setting = self.attributor.final_setting(&record.streams.adr_decisions);
            let bucket = if setting.data_rate == Setting::MAX_DATA_RATE {
                summary
                    .dr5_by_tx_power
                    .get_mut(usize::from(setting.tx_power))
            } else {
                summary.by_data_rate.get_mut(usize::from(setting.data_rate))
            };

            match bucket {
                Some(bucket) => bucket.push(record.id, location.x, location.y),
                None => tracing::warn!(
                    device = record.id.0,
                    setting = %setting,
                    "final setting out of range, device not plotted"
                ),
            }
        }

        summary
    }
}
