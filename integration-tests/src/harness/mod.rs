mod log;
pub mod tracing;

pub use log::{LogBuilder, lines};
pub use tracing::{CapturedEvent, captured_events};
