//! Turns a raw simulator log into a [`NodeEventLog`](crate::timeline::NodeEventLog).
//!
//! The log has three phases separated by literal marker lines:
//!
//! BUILD (ignored)
//! LOCATIONS START
//! <deviceId> <x> <y> <z>   (one per end device)
//! LOCATIONS END
//! MAIN (matched against the line templates)
//!
//! Lines that match no template are skipped. Unparseable fields inside a
//! matched line, or events for a device that was never declared, abort the scan.

pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;
mod scanner;
mod template;

#[cfg(test)]
mod tests;

pub use error::IngestError;
pub use scanner::*;
pub use template::{LogLine, TemplateKind, parse_event_line, parse_location_line};
