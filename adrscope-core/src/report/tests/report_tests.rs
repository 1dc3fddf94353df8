use crate::conf::AnalysisConfig;
use crate::ingest::ingest_str;
use crate::pipeline::analyze;
use crate::report::{ConvergenceSummary, render_plain};
use crate::timeline::{DeviceId, Outcome, Setting};
use pretty_assertions::assert_eq;

const LOG: &str = "\
setup chatter
LOCATIONS START
1 10 20 0
2 30 40 0
LOCATIONS END
+1s At time 1s LoRaWANEndDevice application on node 1 sent 23 bytes, total Tx 23 bytes
+2s At time 2 the Network Server received 23 bytes from 1
+2s ADR algorithm (NS side) for device 1 ran successfully at time 2, old dr= \u{0}, new dr= \u{5} new txPow= \u{3} channelMask=7 chMaskCtrl=0 nbTrans=1
+3s 0x1 Sent DS Packet to device addr 1 via GW #0 in RW1
+3.5s At time 3.5s end device (Receiver) on node 1 received 12 bytes from 02-06, total Rx 12 bytes
+10s At time 10s LoRaWANEndDevice application on node 1 sent 23 bytes, total Tx 23 bytes
+10s At time 10s LoRaWANEndDevice application on node 2 sent 23 bytes, total Tx 23 bytes
+11s ADR algorithm (NS side) failed for device 2
";

#[test]
fn report_carries_per_device_records_and_final_settings() {
    // Arrange
    let ingested = ingest_str(LOG).unwrap();
    let config = AnalysisConfig::default();

    // Act
    let report = analyze(&ingested, &config);

    // Assert
    assert_eq!(report.devices.len(), 2);

    let one = &report.devices[0];
    assert_eq!(one.device, DeviceId(1));
    assert_eq!(one.final_setting, Setting::new(5, 3));
    assert_eq!(one.convergence_time, Some(2.0));
    let uplink: Vec<_> = one.uplink.iter().map(|r| (r.at, r.setting, r.outcome)).collect();
    assert_eq!(
        uplink,
        vec![
            (1.0, Setting::new(0, 0), Outcome::Success),
            (10.0, Setting::new(5, 3), Outcome::Failed),
        ]
    );
    assert_eq!(one.downlink.len(), 1);
    assert_eq!(one.downlink[0].setting, Setting::new(5, 3));
    assert_eq!(one.downlink[0].outcome, Outcome::Success);

    let two = &report.devices[1];
    assert_eq!(two.final_setting, Setting::BASELINE);
    assert_eq!(two.adr_failures, 1);
    assert_eq!(two.convergence_time, None);
    assert_eq!(two.uplink[0].outcome, Outcome::Failed);
}

#[test]
fn network_totals_and_spatial_buckets() {
    let report = analyze(&ingest_str(LOG).unwrap(), &AnalysisConfig::default());

    assert_eq!(report.delivery.uplink.total.sends, 3);
    assert_eq!(report.delivery.uplink.total.successes, 1);
    assert_eq!(report.delivery.downlink.total.sends, 1);
    assert_eq!(report.spatial.dr5_by_tx_power[3].devices, vec![DeviceId(1)]);
    assert_eq!(report.spatial.by_data_rate[0].devices, vec![DeviceId(2)]);
    assert_eq!(
        report.convergence,
        ConvergenceSummary {
            converged_devices: 1,
            unconverged_devices: 1,
            mean_secs: Some(2.0),
            latest_secs: Some(2.0),
        }
    );
}

#[test]
fn plain_rendering_mentions_every_device_and_bucket() {
    let report = analyze(&ingest_str(LOG).unwrap(), &AnalysisConfig::default());

    let text = render_plain(&report);

    assert!(text.starts_with("ADR Timeline Report"));
    assert!(text.contains("#1"));
    assert!(text.contains("#2"));
    assert!(text.contains("DR5, TX3"));
    assert!(text.contains("DR0"));
    assert!(!text.contains('\u{1b}'), "plain output must not contain ANSI escapes");
}
