use crate::timeline::{DeviceTimeline, Setting, TransmissionRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeliveryCounts {
    pub sends: u64,
    pub successes: u64,
    pub failures: u64,
    /// successes / sends; absent when nothing was sent.
    pub ratio: Option<f64>,
}

impl DeliveryCounts {
    fn record(&mut self, record: &TransmissionRecord) {
        self.sends += 1;
        if record.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.ratio = Some(self.successes as f64 / self.sends as f64);
    }

    fn merge(&mut self, other: &DeliveryCounts) {
        self.sends += other.sends;
        self.successes += other.successes;
        self.failures += other.failures;
        self.ratio = (self.sends > 0).then(|| self.successes as f64 / self.sends as f64);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateDelivery {
    pub data_rate: u8,
    #[serde(flatten)]
    pub counts: DeliveryCounts,
}

/// Delivery for one direction, overall and per attributed data rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliverySummary {
    pub total: DeliveryCounts,
    /// One row per data rate 0..=5, in order.
    pub by_data_rate: Vec<RateDelivery>,
}

impl Default for DeliverySummary {
    fn default() -> Self {
        Self {
            total: DeliveryCounts::default(),
            by_data_rate: (0..=Setting::MAX_DATA_RATE)
                .map(|data_rate| RateDelivery {
                    data_rate,
                    counts: DeliveryCounts::default(),
                })
                .collect(),
        }
    }
}

impl DeliverySummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TransmissionRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total.record(record);
            if let Some(row) = summary
                .by_data_rate
                .get_mut(usize::from(record.setting.data_rate))
            {
                row.counts.record(record);
            }
        }
        summary
    }

    pub fn merge(&mut self, other: &DeliverySummary) {
        self.total.merge(&other.total);
        for (row, other) in self.by_data_rate.iter_mut().zip(&other.by_data_rate) {
            row.counts.merge(&other.counts);
        }
    }

    #[cfg(test)]
    pub(crate) fn rate(&self, data_rate: u8) -> Option<&DeliveryCounts> {
        self.by_data_rate
            .get(usize::from(data_rate))
            .map(|row| &row.counts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectionalDelivery {
    pub uplink: DeliverySummary,
    pub downlink: DeliverySummary,
}

impl DirectionalDelivery {
    pub fn from_timeline(timeline: &DeviceTimeline) -> Self {
        Self {
            uplink: DeliverySummary::from_records(&timeline.uplink),
            downlink: DeliverySummary::from_records(&timeline.downlink),
        }
    }

    pub fn merge(&mut self, other: &DirectionalDelivery) {
        self.uplink.merge(&other.uplink);
        self.downlink.merge(&other.downlink);
    }
}
