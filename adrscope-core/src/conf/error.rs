use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(code(adrscope::config::read))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse TOML in {path}: {source}")]
    #[diagnostic(code(adrscope::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Validation
    #[error("{field}: data rate {value} is out of range (0..={max})")]
    #[diagnostic(code(adrscope::config::data_rate))]
    InvalidDataRate {
        field: &'static str,
        value: u8,
        max: u8,
    },

    #[error("{field}: tx power {value} is out of range (0..={max})")]
    #[diagnostic(code(adrscope::config::tx_power))]
    InvalidTxPower {
        field: &'static str,
        value: u8,
        max: u8,
    },

    #[error("correlation window must be a finite, non-negative number of seconds (got {0})")]
    #[diagnostic(code(adrscope::config::window))]
    InvalidWindow(f64),
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
