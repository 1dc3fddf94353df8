use crate::report::{DeliveryCounts, DeliverySummary, DirectionalDelivery};
use crate::timeline::{DeviceId, DeviceTimeline, Outcome, Setting, TransmissionRecord};
use pretty_assertions::assert_eq;

fn record(data_rate: u8, outcome: Outcome) -> TransmissionRecord {
    TransmissionRecord {
        at: 0.0,
        setting: Setting::new(data_rate, 0),
        outcome,
        window: None,
    }
}

#[test]
fn empty_summary_has_a_row_per_rate_and_no_ratio() {
    let summary = DeliverySummary::from_records(&[]);

    assert_eq!(summary.by_data_rate.len(), 6);
    assert_eq!(summary.total, DeliveryCounts::default());
    assert!(summary.by_data_rate.iter().all(|row| row.counts.ratio.is_none()));
}

#[test]
fn records_are_tallied_per_attributed_rate() {
    // Arrange
    let records = [
        record(0, Outcome::Success),
        record(0, Outcome::Failed),
        record(3, Outcome::Success),
        record(3, Outcome::Success),
    ];

    // Act
    let summary = DeliverySummary::from_records(&records);

    // Assert
    assert_eq!(summary.total.sends, 4);
    assert_eq!(summary.total.successes, 3);
    assert_eq!(summary.total.failures, 1);
    assert_eq!(summary.total.ratio, Some(0.75));
    assert_eq!(summary.rate(0).unwrap().ratio, Some(0.5));
    assert_eq!(summary.rate(3).unwrap().ratio, Some(1.0));
    assert_eq!(summary.rate(5).unwrap().sends, 0);
}

#[test]
fn merge_accumulates_counts_and_recomputes_ratio() {
    let timeline = |outcomes: &[Outcome]| DeviceTimeline {
        device: DeviceId(1),
        uplink: outcomes.iter().map(|&o| record(1, o)).collect(),
        downlink: Vec::new(),
    };

    let mut total = DirectionalDelivery::default();
    total.merge(&DirectionalDelivery::from_timeline(&timeline(&[Outcome::Success])));
    total.merge(&DirectionalDelivery::from_timeline(&timeline(&[
        Outcome::Failed,
        Outcome::Failed,
        Outcome::Success,
    ])));

    assert_eq!(total.uplink.total.sends, 4);
    assert_eq!(total.uplink.total.ratio, Some(0.5));
    assert_eq!(total.uplink.rate(1).unwrap().successes, 2);
    assert_eq!(total.downlink.total.ratio, None);
}
