//! Per-device event streams and the engine that turns them into classified
//! transmissions.
//!
//! NodeEventLog
//! SettingAttributor (which DR/TX was active at t)
//! TimelineCorrelator (send -> receive matching)
//! DeviceTimeline

mod attribution;
mod correlate;
mod log;
mod types;


pub use attribution::*;
pub use correlate::*;
pub use log::{DeviceRecord, NodeEventLog};
pub(crate) use log::NodeEventLogBuilder;
pub use types::*;
