//! Positional line templates for the simulator's MAIN section.
//!
//! Each template names the literal anchor tokens that identify a line and the
//! minimum token count needed to pull its fields out. A line that carries the
//! anchors but is too short is simply unmatched.

use crate::ingest::error::IngestError;
use crate::timeline::{AdrDecision, DeviceId, Location, ReceiveWindow, Setting, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    UplinkSend,
    UplinkRecv,
    DownlinkSend,
    DownlinkRecv,
    AdrDecision,
    AdrFailure,
}

struct LineTemplate {
    kind: TemplateKind,
    anchors: &'static [(usize, &'static str)],
    min_tokens: usize,
}

impl LineTemplate {
    fn matches(&self, tokens: &[&str]) -> bool {
        tokens.len() >= self.min_tokens
            && self
                .anchors
                .iter()
                .all(|(position, literal)| tokens.get(*position) == Some(literal))
    }
}

// Field positions used by `extract`.
const TIMESTAMP: usize = 0;
const UPLINK_SEND_DEVICE: usize = 8;
const UPLINK_RECV_DEVICE: usize = 11;
const DOWNLINK_SEND_DEVICE: usize = 8;
const DOWNLINK_SEND_WINDOW: usize = 13;
const DOWNLINK_RECV_DEVICE: usize = 9;
const ADR_DECISION_DEVICE: usize = 7;
const ADR_DECISION_DATA_RATE: usize = 18;
const ADR_DECISION_TX_POWER: usize = 21;
const ADR_FAILURE_DEVICE: usize = 8;

const ADR_PREFIX: [(usize, &str); 4] = [(1, "ADR"), (2, "algorithm"), (3, "(NS"), (4, "side)")];

/// Tested in order; the first match wins.
const TEMPLATES: &[LineTemplate] = &[
    LineTemplate {
        kind: TemplateKind::UplinkSend,
        anchors: &[
            (4, "LoRaWANEndDevice"),
            (5, "application"),
            (6, "on"),
            (7, "node"),
        ],
        min_tokens: UPLINK_SEND_DEVICE + 1,
    },
    LineTemplate {
        kind: TemplateKind::UplinkRecv,
        anchors: &[(4, "the"), (5, "Network"), (6, "Server"), (7, "received")],
        min_tokens: UPLINK_RECV_DEVICE + 1,
    },
    LineTemplate {
        kind: TemplateKind::DownlinkSend,
        anchors: &[(2, "Sent"), (3, "DS"), (4, "Packet"), (5, "to")],
        min_tokens: DOWNLINK_SEND_WINDOW + 1,
    },
    LineTemplate {
        kind: TemplateKind::DownlinkRecv,
        anchors: &[(4, "end"), (5, "device"), (6, "(Receiver)"), (7, "on")],
        min_tokens: DOWNLINK_RECV_DEVICE + 1,
    },
    LineTemplate {
        kind: TemplateKind::AdrDecision,
        anchors: &[
            ADR_PREFIX[0],
            ADR_PREFIX[1],
            ADR_PREFIX[2],
            ADR_PREFIX[3],
            (5, "for"),
        ],
        min_tokens: ADR_DECISION_TX_POWER + 1,
    },
    LineTemplate {
        kind: TemplateKind::AdrFailure,
        anchors: &[
            ADR_PREFIX[0],
            ADR_PREFIX[1],
            ADR_PREFIX[2],
            ADR_PREFIX[3],
            (5, "failed"),
        ],
        min_tokens: ADR_FAILURE_DEVICE + 1,
    },
];

/// A classified log line with its fields already decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLine {
    /// A location table row. `node` is the simulator's own node number; the
    /// device index is assigned from the row's position in the table.
    Location {
        node: u32,
        location: Location,
    },
    UplinkSend {
        device: DeviceId,
        at: Timestamp,
    },
    UplinkRecv {
        device: DeviceId,
        at: Timestamp,
    },
    DownlinkSend {
        device: DeviceId,
        at: Timestamp,
        window: ReceiveWindow,
    },
    DownlinkRecv {
        device: DeviceId,
        at: Timestamp,
    },
    AdrDecision {
        device: DeviceId,
        decision: AdrDecision,
    },
    AdrFailure {
        device: DeviceId,
        at: Timestamp,
    },
    Unmatched,
}

impl LogLine {
    pub fn device(&self) -> Option<DeviceId> {
        match *self {
            LogLine::UplinkSend { device, .. }
            | LogLine::UplinkRecv { device, .. }
            | LogLine::DownlinkSend { device, .. }
            | LogLine::DownlinkRecv { device, .. }
            | LogLine::AdrDecision { device, .. }
            | LogLine::AdrFailure { device, .. } => Some(device),
            LogLine::Location { .. } | LogLine::Unmatched => None,
        }
    }

    pub fn template_kind(&self) -> Option<TemplateKind> {
        match self {
            LogLine::UplinkSend { .. } => Some(TemplateKind::UplinkSend),
            LogLine::UplinkRecv { .. } => Some(TemplateKind::UplinkRecv),
            LogLine::DownlinkSend { .. } => Some(TemplateKind::DownlinkSend),
            LogLine::DownlinkRecv { .. } => Some(TemplateKind::DownlinkRecv),
            LogLine::AdrDecision { .. } => Some(TemplateKind::AdrDecision),
            LogLine::AdrFailure { .. } => Some(TemplateKind::AdrFailure),
            LogLine::Location { .. } | LogLine::Unmatched => None,
        }
    }
}

/// `<node> <x> <y> <z>`. Lines with fewer than four tokens are unmatched.
pub fn parse_location_line(line: &str, line_no: usize) -> Result<LogLine, IngestError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [node, x, y, z, ..] = tokens[..] else {
        return Ok(LogLine::Unmatched);
    };

    Ok(LogLine::Location {
        node: node
            .parse::<u32>()
            .map_err(|_| IngestError::corrupt(line_no, "node id", node))?,
        location: Location {
            x: parse_coordinate(x, line_no)?,
            y: parse_coordinate(y, line_no)?,
            z: parse_coordinate(z, line_no)?,
        },
    })
}

/// Classifies a MAIN-section line against the template table.
pub fn parse_event_line(line: &str, line_no: usize) -> Result<LogLine, IngestError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let Some(template) = TEMPLATES.iter().find(|t| t.matches(&tokens)) else {
        return Ok(LogLine::Unmatched);
    };

    extract(template.kind, &tokens, line_no)
}

fn extract(kind: TemplateKind, tokens: &[&str], line_no: usize) -> Result<LogLine, IngestError> {
    let at = parse_timestamp(tokens[TIMESTAMP], line_no)?;
    let device_at = |position: usize| parse_device(tokens[position], line_no);

    let line = match kind {
        TemplateKind::UplinkSend => LogLine::UplinkSend {
            device: device_at(UPLINK_SEND_DEVICE)?,
            at,
        },
        TemplateKind::UplinkRecv => LogLine::UplinkRecv {
            device: device_at(UPLINK_RECV_DEVICE)?,
            at,
        },
        TemplateKind::DownlinkSend => {
            let token = tokens[DOWNLINK_SEND_WINDOW];
            let window = token
                .parse::<ReceiveWindow>()
                .map_err(|_| IngestError::corrupt(line_no, "receive window", token))?;
            LogLine::DownlinkSend {
                device: device_at(DOWNLINK_SEND_DEVICE)?,
                at,
                window,
            }
        }
        TemplateKind::DownlinkRecv => LogLine::DownlinkRecv {
            device: device_at(DOWNLINK_RECV_DEVICE)?,
            at,
        },
        TemplateKind::AdrDecision => {
            let data_rate = decode_code_point(
                tokens[ADR_DECISION_DATA_RATE],
                Setting::MAX_DATA_RATE,
                "data rate",
                line_no,
            )?;
            let tx_power = decode_code_point(
                tokens[ADR_DECISION_TX_POWER],
                Setting::MAX_TX_POWER,
                "tx power",
                line_no,
            )?;
            LogLine::AdrDecision {
                device: device_at(ADR_DECISION_DEVICE)?,
                decision: AdrDecision {
                    at,
                    setting: Setting::new(data_rate, tx_power),
                },
            }
        }
        TemplateKind::AdrFailure => LogLine::AdrFailure {
            device: device_at(ADR_FAILURE_DEVICE)?,
            at,
        },
    };

    Ok(line)
}

/// Timestamps carry a unit suffix (`12.5s`); a token without one is taken as-is.
fn parse_timestamp(token: &str, line_no: usize) -> Result<Timestamp, IngestError> {
    let digits = match token.chars().next_back() {
        Some(last) if !last.is_ascii_digit() => &token[..token.len() - last.len_utf8()],
        _ => token,
    };

    digits
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| IngestError::corrupt(line_no, "timestamp", token))
}

fn parse_device(token: &str, line_no: usize) -> Result<DeviceId, IngestError> {
    token
        .parse::<u32>()
        .map(DeviceId)
        .map_err(|_| IngestError::corrupt(line_no, "device id", token))
}

fn parse_coordinate(token: &str, line_no: usize) -> Result<f64, IngestError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IngestError::corrupt(line_no, "coordinate", token))
}

/// The simulator streams rate and power as raw bytes, so the value is the
/// code point of a single-character token.
fn decode_code_point(
    token: &str,
    max: u8,
    field: &'static str,
    line_no: usize,
) -> Result<u8, IngestError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => u8::try_from(u32::from(c))
            .ok()
            .filter(|value| *value <= max)
            .ok_or_else(|| IngestError::corrupt(line_no, field, token)),
        _ => Err(IngestError::corrupt(line_no, field, token)),
    }
}
