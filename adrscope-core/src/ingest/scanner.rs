use crate::ingest::error::IngestError;
use crate::ingest::template::{LogLine, TemplateKind, parse_event_line, parse_location_line};
use crate::timeline::{DeviceStreams, DownlinkSend, NodeEventLog, NodeEventLogBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const LOCATIONS_START: &str = "LOCATIONS START";
pub const LOCATIONS_END: &str = "LOCATIONS END";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Simulator set-up chatter before the location table.
    Build,
    Locations,
    Main,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestStats {
    pub total_lines: u64,
    pub build_lines: u64,
    pub location_lines: u64,
    pub main_lines: u64,
    pub matched: BTreeMap<TemplateKind, u64>,
    pub unmatched_lines: u64,
    /// Events addressed to the network-server slot (device 0).
    pub sentinel_events: u64,
    pub reordered_streams: u64,
}

/// The frozen result of a scan.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub log: NodeEventLog,
    pub stats: IngestStats,
}

/// Single-pass BUILD -> LOCATIONS -> MAIN scanner.
#[derive(Debug)]
pub struct LogIngester {
    phase: Phase,
    builder: NodeEventLogBuilder,
    stats: IngestStats,
}

impl Default for LogIngester {
    fn default() -> Self {
        Self::new()
    }
}

impl LogIngester {
    pub fn new() -> Self {
        Self {
            phase: Phase::Build,
            builder: NodeEventLogBuilder::new(),
            stats: IngestStats::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Feeds one line (without its newline). `line_no` is 1-based and only
    /// used in diagnostics.
    pub fn push_line(&mut self, line: &str, line_no: usize) -> Result<(), IngestError> {
        self.stats.total_lines += 1;

        match self.phase {
            Phase::Build => {
                self.stats.build_lines += 1;
                if line == LOCATIONS_START {
                    tracing::debug!(line = line_no, "entering location table");
                    self.phase = Phase::Locations;
                }
            }
            Phase::Locations => {
                if line == LOCATIONS_END {
                    tracing::debug!(
                        line = line_no,
                        devices = self.stats.location_lines,
                        "location table complete"
                    );
                    self.phase = Phase::Main;
                    return Ok(());
                }
                match parse_location_line(line, line_no)? {
                    LogLine::Location { node, location } => {
                        let device = self.builder.declare(node, location);
                        tracing::trace!(
                            line = line_no,
                            node,
                            device = device.0,
                            "device declared"
                        );
                        self.stats.location_lines += 1;
                    }
                    _ => {
                        tracing::debug!(line = line_no, "skipping short location line");
                    }
                }
            }
            Phase::Main => {
                self.stats.main_lines += 1;
                let parsed = parse_event_line(line, line_no)?;
                self.record(parsed, line_no)?;
            }
        }

        Ok(())
    }

    fn record(&mut self, parsed: LogLine, line_no: usize) -> Result<(), IngestError> {
        let (Some(device), Some(kind)) = (parsed.device(), parsed.template_kind()) else {
            self.stats.unmatched_lines += 1;
            return Ok(());
        };

        let streams = self
            .builder
            .streams_mut(device)
            .ok_or(IngestError::UndeclaredDevice {
                device: device.0,
                line: line_no,
            })?;

        append(streams, parsed);

        *self.stats.matched.entry(kind).or_insert(0) += 1;
        if device.is_network_server() {
            self.stats.sentinel_events += 1;
        }
        Ok(())
    }

    /// Ends the scan. The log must have reached the MAIN phase.
    pub fn finish(self) -> Result<Ingested, IngestError> {
        match self.phase {
            Phase::Build => {
                return Err(IngestError::MissingMarker {
                    expected: LOCATIONS_START,
                });
            }
            Phase::Locations => {
                return Err(IngestError::MissingMarker {
                    expected: LOCATIONS_END,
                });
            }
            Phase::Main => {}
        }

        let (log, reordered) = self.builder.finish();
        let mut stats = self.stats;
        stats.reordered_streams = reordered as u64;

        if stats.sentinel_events > 0 {
            tracing::warn!(
                events = stats.sentinel_events,
                "events addressed to device 0 are excluded from analysis"
            );
        }

        tracing::info!(
            lines = stats.total_lines,
            devices = log.end_device_count(),
            matched = stats.matched.values().sum::<u64>(),
            unmatched = stats.unmatched_lines,
            "ingestion complete"
        );

        Ok(Ingested { log, stats })
    }
}

fn append(streams: &mut DeviceStreams, parsed: LogLine) {
    match parsed {
        LogLine::UplinkSend { at, .. } => streams.uplink_sends.push(at),
        LogLine::UplinkRecv { at, .. } => streams.uplink_recvs.push(at),
        LogLine::DownlinkSend { at, window, .. } => {
            streams.downlink_sends.push(DownlinkSend { at, window })
        }
        LogLine::DownlinkRecv { at, .. } => streams.downlink_recvs.push(at),
        LogLine::AdrDecision { decision, .. } => streams.adr_decisions.push(decision),
        LogLine::AdrFailure { at, .. } => streams.adr_failures.push(at),
        LogLine::Location { .. } | LogLine::Unmatched => {}
    }
}

pub fn ingest_reader<R: BufRead>(reader: R) -> Result<Ingested, IngestError> {
    let mut ingester = LogIngester::new();
    for (index, line) in reader.lines().enumerate() {
        ingester.push_line(&line?, index + 1)?;
    }
    ingester.finish()
}

pub fn ingest_str(contents: &str) -> Result<Ingested, IngestError> {
    ingest_reader(contents.as_bytes())
}

pub fn ingest_file(path: &Path) -> Result<Ingested, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::read_file(path, e))?;
    tracing::info!(path = %path.display(), "reading simulation log");

    let mut ingester = LogIngester::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| IngestError::read_file(path, e))?;
        ingester.push_line(&line, index + 1)?;
    }
    ingester.finish()
}
