use super::lines;
use crate::ingest::{IngestError, LogIngester, Phase, TemplateKind, ingest_file, ingest_str};
use crate::timeline::{DeviceId, ReceiveWindow, Setting};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn log_with(nodes: &[u32], events: &[String]) -> String {
    let mut out = vec![
        "Simulation setup".to_string(),
        "Installing gateways".to_string(),
        "LOCATIONS START".to_string(),
    ];
    for (i, node) in nodes.iter().enumerate() {
        out.push(format!("{node} {} {} 1.5", i * 10, i * 20));
    }
    out.push("LOCATIONS END".to_string());
    out.extend(events.iter().cloned());
    out.join("\n")
}

#[test]
fn phases_advance_on_exact_markers() {
    let mut ingester = LogIngester::new();
    assert_eq!(ingester.phase(), Phase::Build);

    ingester.push_line("LOCATIONS START ", 1).unwrap();
    assert_eq!(ingester.phase(), Phase::Build);

    ingester.push_line("LOCATIONS START", 2).unwrap();
    assert_eq!(ingester.phase(), Phase::Locations);

    ingester.push_line("1 0 0 0", 3).unwrap();
    ingester.push_line("LOCATIONS END", 4).unwrap();
    assert_eq!(ingester.phase(), Phase::Main);
}

#[test]
fn build_phase_ignores_event_shaped_lines() {
    // Arrange: an uplink send for an undeclared device before LOCATIONS START
    let contents = format!(
        "{}\n{}",
        lines::uplink_send(0.5, 99),
        log_with(&[1], &[])
    );

    // Act
    let ingested = ingest_str(&contents).unwrap();

    // Assert
    assert_eq!(ingested.stats.build_lines, 4);
    assert!(ingested.stats.matched.is_empty());
}

#[test]
fn events_land_in_their_device_streams() {
    // Arrange
    let contents = log_with(
        &[1, 2],
        &[
            lines::uplink_send(1.0, 1),
            lines::uplink_recv(1.5, 1),
            lines::adr_decision(1.5, 1, 3, 0),
            lines::downlink_send(2.5, 1, "RW1"),
            lines::downlink_recv(2.6, 1),
            lines::uplink_send(3.0, 2),
            lines::adr_failure(3.5, 2),
            "+4s some unrelated chatter".to_string(),
        ],
    );

    // Act
    let ingested = ingest_str(&contents).unwrap();

    // Assert
    let one = &ingested.log.device(DeviceId(1)).unwrap().streams;
    assert_eq!(one.uplink_sends, vec![1.0]);
    assert_eq!(one.uplink_recvs, vec![1.5]);
    assert_eq!(one.downlink_sends.len(), 1);
    assert_eq!(one.downlink_sends[0].window, ReceiveWindow::Rw1);
    assert_eq!(one.downlink_recvs, vec![2.6]);
    assert_eq!(one.adr_decisions[0].setting, Setting::new(3, 0));

    let two = &ingested.log.device(DeviceId(2)).unwrap().streams;
    assert_eq!(two.uplink_sends, vec![3.0]);
    assert_eq!(two.adr_failures, vec![3.5]);
    assert!(two.adr_decisions.is_empty());

    assert_eq!(ingested.stats.unmatched_lines, 1);
    assert_eq!(ingested.stats.matched[&TemplateKind::UplinkSend], 2);
    assert_eq!(ingested.stats.location_lines, 2);
    assert_eq!(ingested.log.end_device_count(), 2);
}

#[test]
fn locations_are_recorded_per_device() {
    let ingested = ingest_str(&log_with(&[1, 2], &[])).unwrap();

    let two = ingested.log.device(DeviceId(2)).unwrap();
    let location = two.location.unwrap();
    assert_eq!((location.x, location.y, location.z), (10.0, 20.0, 1.5));
    assert!(ingested.log.network_server().location.is_none());
}

#[test]
fn undeclared_device_is_reported_distinctly() {
    let contents = log_with(&[1], &[lines::uplink_send(1.0, 5)]);

    let err = ingest_str(&contents).unwrap_err();

    assert!(matches!(
        err,
        IngestError::UndeclaredDevice { device: 5, line: 6 }
    ));
    assert_eq!(
        err.to_string(),
        "line 6: event references undeclared device 5"
    );
}

#[test]
fn location_table_starting_at_node_zero_maps_to_devices_one_and_up() {
    // Arrange: the simulator numbers its nodes from 0
    let contents = log_with(
        &[0, 1],
        &[
            lines::uplink_send(1.0, 1),
            lines::uplink_recv(1.2, 1),
            lines::uplink_send(2.0, 2),
        ],
    );

    // Act
    let ingested = ingest_str(&contents).unwrap();

    // Assert
    assert_eq!(ingested.log.end_device_count(), 2);
    let first = ingested.log.device(DeviceId(1)).unwrap();
    assert_eq!(first.node, Some(0));
    assert_eq!(first.streams.uplink_sends, vec![1.0]);
    assert_eq!(first.streams.uplink_recvs, vec![1.2]);
    let second = ingested.log.device(DeviceId(2)).unwrap();
    assert_eq!(second.node, Some(1));
    assert_eq!(second.streams.uplink_sends, vec![2.0]);
    assert_eq!(ingested.stats.sentinel_events, 0);
}

#[test]
fn repeated_node_numbers_still_get_their_own_slot() {
    let ingested = ingest_str(&log_with(&[5, 5], &[lines::uplink_send(1.0, 2)])).unwrap();

    assert_eq!(ingested.log.end_device_count(), 2);
    assert_eq!(
        ingested.log.device(DeviceId(2)).unwrap().streams.uplink_sends,
        vec![1.0]
    );
}

#[test]
fn events_for_network_server_slot_are_counted() {
    let contents = log_with(&[1], &[lines::uplink_recv(1.0, 0)]);

    let ingested = ingest_str(&contents).unwrap();

    assert_eq!(ingested.stats.sentinel_events, 1);
    assert_eq!(ingested.log.network_server().streams.uplink_recvs, vec![1.0]);
}

#[test]
fn corrupt_timestamp_aborts_scan() {
    let line = lines::uplink_send(1.0, 1).replacen("+1s", "+1.x.2s", 1);

    let err = ingest_str(&log_with(&[1], &[line])).unwrap_err();

    assert!(matches!(
        err,
        IngestError::CorruptLog {
            field: "timestamp",
            ..
        }
    ));
}

#[test]
fn missing_markers_are_fatal() {
    let no_start = ingest_str("just\nsome\nlines").unwrap_err();
    let no_end = ingest_str("LOCATIONS START\n1 0 0 0").unwrap_err();

    assert!(matches!(
        no_start,
        IngestError::MissingMarker {
            expected: "LOCATIONS START"
        }
    ));
    assert!(matches!(
        no_end,
        IngestError::MissingMarker {
            expected: "LOCATIONS END"
        }
    ));
}

#[test]
fn out_of_order_events_are_sorted() {
    let contents = log_with(
        &[1],
        &[lines::uplink_send(5.0, 1), lines::uplink_send(2.0, 1)],
    );

    let ingested = ingest_str(&contents).unwrap();

    assert_eq!(ingested.stats.reordered_streams, 1);
    assert_eq!(
        ingested.log.device(DeviceId(1)).unwrap().streams.uplink_sends,
        vec![2.0, 5.0]
    );
}

#[test]
fn crlf_line_endings_are_accepted() {
    let contents = log_with(&[1], &[lines::uplink_send(1.0, 1)]).replace('\n', "\r\n");

    let ingested = ingest_str(&contents).unwrap();

    assert_eq!(
        ingested.log.device(DeviceId(1)).unwrap().streams.uplink_sends,
        vec![1.0]
    );
}

#[test]
fn ingest_file_reads_from_disk() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("err.txt");
    fs::write(&path, log_with(&[1], &[lines::uplink_send(1.0, 1)])).unwrap();

    // Act
    let ingested = ingest_file(&path).unwrap();

    // Assert
    assert_eq!(ingested.log.end_device_count(), 1);
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.txt");

    let err = ingest_file(&path).unwrap_err();

    assert!(matches!(err, IngestError::ReadFile { .. }));
}
