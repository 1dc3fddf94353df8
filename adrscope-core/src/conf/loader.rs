use crate::conf::analysis::{AnalysisConfig, ConfigOverrides};
use crate::conf::error::ConfigError;
use std::fs;
use std::path::Path;

/// Resolves the run configuration: defaults, then the optional TOML file,
/// then command-line overrides. The result is validated.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AnalysisConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None => AnalysisConfig::default(),
    };

    config.apply(overrides);
    config.validate()?;

    tracing::debug!(
        window_secs = config.correlation.window_secs,
        match_policy = ?config.correlation.match_policy,
        baseline = %config.baseline,
        "configuration resolved"
    );

    Ok(config)
}

pub fn parse_config_file(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}
