mod analysis;
pub mod error;
mod loader;

#[cfg(test)]
mod tests;

pub use analysis::*;
pub use error::ConfigError;
pub use loader::{load_config, parse_config_file};
