//! Event lines in the exact shapes the simulator prints, for building
//! synthetic logs in tests.

pub fn uplink_send(at: f64, device: u32) -> String {
    format!(
        "+{at}s At time {at}s LoRaWANEndDevice application on node {device} sent 23 bytes, total Tx 23 bytes"
    )
}

pub fn uplink_recv(at: f64, device: u32) -> String {
    format!("+{at}s At time {at} the Network Server received 23 bytes from {device}")
}

pub fn downlink_send(at: f64, device: u32, window: &str) -> String {
    format!("+{at}s 0x5581c2a0 Sent DS Packet to device addr {device} via GW #0 in {window}")
}

pub fn downlink_recv(at: f64, device: u32) -> String {
    format!(
        "+{at}s At time {at}s end device (Receiver) on node {device} received 12 bytes from 02-06-00:00:00:00, total Rx 12 bytes"
    )
}

pub fn adr_decision(at: f64, device: u32, data_rate: u8, tx_power: u8) -> String {
    format!(
        "+{at}s ADR algorithm (NS side) for device {device} ran successfully at time {at}, old dr= {}, new dr= {} new txPow= {} channelMask=7 chMaskCtrl=0 nbTrans=1",
        char::from(0u8),
        char::from(data_rate),
        char::from(tx_power)
    )
}

pub fn adr_failure(at: f64, device: u32) -> String {
    format!("+{at}s ADR algorithm (NS side) failed for device {device}")
}
