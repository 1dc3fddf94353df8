use crate::timeline::types::{DeviceId, DeviceStreams, Location};
use std::collections::BTreeMap;

/// One declared device together with everything the log recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub id: DeviceId,
    /// Node number printed in the location table. `None` only for the
    /// network-server slot.
    pub node: Option<u32>,
    /// `None` only for the network-server slot.
    pub location: Option<Location>,
    pub streams: DeviceStreams,
}

/// Per-device event streams, built once by the ingester and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEventLog {
    devices: BTreeMap<DeviceId, DeviceRecord>,
}

impl NodeEventLog {
    pub fn device(&self, id: DeviceId) -> Option<&DeviceRecord> {
        self.devices.get(&id)
    }

    /// Declared end devices in ascending id order. Never yields the network server.
    pub fn end_devices(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices
            .values()
            .filter(|record| !record.id.is_network_server())
    }

    pub fn end_device_count(&self) -> usize {
        self.devices.len() - 1
    }
}

/// Append-only construction side of [`NodeEventLog`].
#[derive(Debug)]
pub(crate) struct NodeEventLogBuilder {
    devices: BTreeMap<DeviceId, DeviceRecord>,
}

impl NodeEventLogBuilder {
    pub(crate) fn new() -> Self {
        let mut devices = BTreeMap::new();
        devices.insert(
            DeviceId::NETWORK_SERVER,
            DeviceRecord {
                id: DeviceId::NETWORK_SERVER,
                node: None,
                location: None,
                streams: DeviceStreams::default(),
            },
        );
        Self { devices }
    }

    /// Allocates empty streams for the next end device and returns its index.
    /// Indices follow declaration order starting at 1, whatever `node` says.
    pub(crate) fn declare(&mut self, node: u32, location: Location) -> DeviceId {
        // Slot 0 is always present, so the map length is the next free index.
        let id = DeviceId(self.devices.len() as u32);
        self.devices.insert(
            id,
            DeviceRecord {
                id,
                node: Some(node),
                location: Some(location),
                streams: DeviceStreams::default(),
            },
        );
        id
    }

    pub(crate) fn streams_mut(&mut self, id: DeviceId) -> Option<&mut DeviceStreams> {
        self.devices.get_mut(&id).map(|record| &mut record.streams)
    }

    /// Freezes the log. Streams that arrived out of time order are stably
    /// sorted; the number of such streams is returned alongside the log.
    pub(crate) fn finish(mut self) -> (NodeEventLog, usize) {
        let mut reordered = 0;
        for record in self.devices.values_mut() {
            let n = record.streams.sort_by_time();
            if n > 0 {
                tracing::warn!(
                    device = record.id.0,
                    streams = n,
                    "event timestamps out of order, re-sorted"
                );
            }
            reordered += n;
        }
        (
            NodeEventLog {
                devices: self.devices,
            },
            reordered,
        )
    }
}

#[cfg(test)]
impl NodeEventLog {
    pub(crate) fn network_server(&self) -> &DeviceRecord {
        &self.devices[&DeviceId::NETWORK_SERVER]
    }

    /// Builds a log directly from records; the network-server slot is added if absent.
    pub(crate) fn from_records(records: impl IntoIterator<Item = DeviceRecord>) -> Self {
        let mut builder = NodeEventLogBuilder::new();
        for record in records {
            builder.devices.insert(record.id, record);
        }
        builder.finish().0
    }
}
