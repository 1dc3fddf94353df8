use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simulated time in seconds, as printed by the simulator.
pub type Timestamp = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceId(pub u32);

impl DeviceId {
    /// Slot reserved for the gateway / network server. Never an end device.
    pub const NETWORK_SERVER: DeviceId = DeviceId(0);

    pub fn is_network_server(self) -> bool {
        self == Self::NETWORK_SERVER
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A data-rate / transmit-power pair as committed by the network server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Setting {
    pub data_rate: u8,
    pub tx_power: u8,
}

impl Setting {
    pub const BASELINE: Setting = Setting {
        data_rate: 0,
        tx_power: 0,
    };

    /// Fastest data rate; the only one at which transmit power is stepped.
    pub const MAX_DATA_RATE: u8 = 5;
    pub const MAX_TX_POWER: u8 = 7;

    pub const fn new(data_rate: u8, tx_power: u8) -> Self {
        Self {
            data_rate,
            tx_power,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DR{}/TX{}", self.data_rate, self.tx_power)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReceiveWindow {
    #[serde(rename = "RW1")]
    Rw1,
    #[serde(rename = "RW2")]
    Rw2,
}

impl FromStr for ReceiveWindow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RW1" => Ok(Self::Rw1),
            "RW2" => Ok(Self::Rw2),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReceiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rw1 => f.write_str("RW1"),
            Self::Rw2 => f.write_str("RW2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownlinkSend {
    pub at: Timestamp,
    pub window: ReceiveWindow,
}

/// "ADR success": the network server committed `setting` at `at`; it holds
/// until the next decision for the same device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdrDecision {
    pub at: Timestamp,
    pub setting: Setting,
}

/// Every event stream recorded for a single device, in log order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceStreams {
    pub uplink_sends: Vec<Timestamp>,
    pub uplink_recvs: Vec<Timestamp>,
    pub downlink_sends: Vec<DownlinkSend>,
    pub downlink_recvs: Vec<Timestamp>,
    pub adr_decisions: Vec<AdrDecision>,
    pub adr_failures: Vec<Timestamp>,
}

impl DeviceStreams {
    pub fn is_empty(&self) -> bool {
        self.uplink_sends.is_empty()
            && self.uplink_recvs.is_empty()
            && self.downlink_sends.is_empty()
            && self.downlink_recvs.is_empty()
            && self.adr_decisions.is_empty()
            && self.adr_failures.is_empty()
    }

    /// Stable-sorts every stream by time. Returns how many streams were out of order.
    pub(crate) fn sort_by_time(&mut self) -> usize {
        let mut reordered = 0;
        reordered += sort_stream(&mut self.uplink_sends, |t| *t);
        reordered += sort_stream(&mut self.uplink_recvs, |t| *t);
        reordered += sort_stream(&mut self.downlink_sends, |s| s.at);
        reordered += sort_stream(&mut self.downlink_recvs, |t| *t);
        reordered += sort_stream(&mut self.adr_decisions, |d| d.at);
        reordered += sort_stream(&mut self.adr_failures, |t| *t);
        reordered
    }
}

fn sort_stream<T>(stream: &mut [T], at: impl Fn(&T) -> Timestamp) -> usize {
    if stream.windows(2).all(|w| at(&w[0]) <= at(&w[1])) {
        return 0;
    }
    // Timestamps are checked finite at ingestion, so total_cmp agrees with <=.
    stream.sort_by(|a, b| at(a).total_cmp(&at(b)));
    1
}
