pub mod cli;
pub mod conf;
pub mod ingest;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod spatial;
pub mod timeline;

pub use pipeline::{analyze, analyze_file};
