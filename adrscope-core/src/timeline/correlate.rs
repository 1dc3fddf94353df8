use crate::conf::AnalysisConfig;
use crate::timeline::attribution::SettingAttributor;
use crate::timeline::log::NodeEventLog;
use crate::timeline::types::{DeviceId, DeviceStreams, ReceiveWindow, Setting, Timestamp};
use serde::{Deserialize, Serialize};

/// How receive events are shared between sends that fall in the same window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// A receive confirms at most one send: the earliest unconfirmed send it
    /// is within the window of.
    #[default]
    ConsumeOnce,
    /// A receive confirms every send it is within the window of, so bursts of
    /// sends can all be marked successful by one receive.
    Shared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransmissionRecord {
    pub at: Timestamp,
    #[serde(flatten)]
    pub setting: Setting,
    pub outcome: Outcome,
    /// Only set for downlinks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<ReceiveWindow>,
}

impl TransmissionRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Classified transmissions for one end device, in send order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTimeline {
    pub device: DeviceId,
    pub uplink: Vec<TransmissionRecord>,
    pub downlink: Vec<TransmissionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineCorrelator {
    attributor: SettingAttributor,
    rw2_setting: Setting,
    window_secs: f64,
    policy: MatchPolicy,
}

impl TimelineCorrelator {
    pub fn new(
        attributor: SettingAttributor,
        rw2_setting: Setting,
        window_secs: f64,
        policy: MatchPolicy,
    ) -> Self {
        Self {
            attributor,
            rw2_setting,
            window_secs,
            policy,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            SettingAttributor::new(config.baseline),
            config.rw2,
            config.correlation.window_secs,
            config.correlation.match_policy,
        )
    }

    /// Correlates every declared end device. The network-server slot is skipped.
    pub fn correlate(&self, log: &NodeEventLog) -> Vec<DeviceTimeline> {
        log.end_devices()
            .map(|record| {
                let (uplink, downlink) = self.correlate_streams(&record.streams);
                DeviceTimeline {
                    device: record.id,
                    uplink,
                    downlink,
                }
            })
            .collect()
    }

    pub fn correlate_streams(
        &self,
        streams: &DeviceStreams,
    ) -> (Vec<TransmissionRecord>, Vec<TransmissionRecord>) {
        let decisions = &streams.adr_decisions;

        let uplink_outcomes = match_sends(
            streams.uplink_sends.iter().copied(),
            &streams.uplink_recvs,
            self.window_secs,
            self.policy,
        );
        let uplink = streams
            .uplink_sends
            .iter()
            .zip(uplink_outcomes)
            .map(|(&at, outcome)| TransmissionRecord {
                at,
                setting: self.attributor.setting_at(decisions, at),
                outcome,
                window: None,
            })
            .collect();

        let downlink_outcomes = match_sends(
            streams.downlink_sends.iter().map(|send| send.at),
            &streams.downlink_recvs,
            self.window_secs,
            self.policy,
        );
        let downlink = streams
            .downlink_sends
            .iter()
            .zip(downlink_outcomes)
            .map(|(send, outcome)| {
                // RW2 always runs at the fixed second-window parameters.
                let setting = match send.window {
                    ReceiveWindow::Rw2 => self.rw2_setting,
                    ReceiveWindow::Rw1 => self.attributor.setting_at(decisions, send.at),
                };
                TransmissionRecord {
                    at: send.at,
                    setting,
                    outcome,
                    window: Some(send.window),
                }
            })
            .collect();

        (uplink, downlink)
    }
}

/// Classifies each send against a receive stream in one merge pass.
///
/// A send at `s` succeeds when some receive `r` satisfies `0 <= r - s <= window`.
/// Both inputs must be non-decreasing in time.
pub fn match_sends(
    sends: impl IntoIterator<Item = Timestamp>,
    recvs: &[Timestamp],
    window_secs: f64,
    policy: MatchPolicy,
) -> Vec<Outcome> {
    let mut next = 0;

    sends
        .into_iter()
        .map(|sent| {
            // Receives earlier than this send can't match it or any later send.
            while next < recvs.len() && recvs[next] < sent {
                next += 1;
            }

            match recvs.get(next) {
                Some(&received) if received - sent <= window_secs => {
                    if policy == MatchPolicy::ConsumeOnce {
                        next += 1;
                    }
                    Outcome::Success
                }
                _ => Outcome::Failed,
            }
        })
        .collect()
}
