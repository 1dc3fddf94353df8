use crate::conf::error::ConfigError;
use crate::timeline::{MatchPolicy, Setting};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CORRELATION_WINDOW_SECS: f64 = 3.0;

/// Tunables of a single analysis run.
///
/// ```toml
/// [baseline]
/// data_rate = 0
/// tx_power = 0
///
/// [rw2]
/// data_rate = 0
/// tx_power = 0
///
/// [correlation]
/// window_secs = 3.0
/// match_policy = "consume_once"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Setting a device is assumed to use before its first ADR decision.
    pub baseline: Setting,
    /// Fixed setting of the second receive window.
    pub rw2: Setting,
    pub correlation: CorrelationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baseline: Setting::BASELINE,
            rw2: Setting::BASELINE,
            correlation: CorrelationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorrelationConfig {
    /// Max seconds between a send and the receive that confirms it.
    pub window_secs: f64,
    pub match_policy: MatchPolicy,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_CORRELATION_WINDOW_SECS,
            match_policy: MatchPolicy::default(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub window_secs: Option<f64>,
    pub baseline_data_rate: Option<u8>,
    pub baseline_tx_power: Option<u8>,
    pub match_policy: Option<MatchPolicy>,
}

impl AnalysisConfig {
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(window) = overrides.window_secs {
            self.correlation.window_secs = window;
        }
        if let Some(data_rate) = overrides.baseline_data_rate {
            self.baseline.data_rate = data_rate;
        }
        if let Some(tx_power) = overrides.baseline_tx_power {
            self.baseline.tx_power = tx_power;
        }
        if let Some(policy) = overrides.match_policy {
            self.correlation.match_policy = policy;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_setting("baseline", &self.baseline)?;
        validate_setting("rw2", &self.rw2)?;

        let window = self.correlation.window_secs;
        if !window.is_finite() || window < 0.0 {
            return Err(ConfigError::InvalidWindow(window));
        }

        Ok(())
    }
}

fn validate_setting(field: &'static str, setting: &Setting) -> Result<(), ConfigError> {
    if setting.data_rate > Setting::MAX_DATA_RATE {
        return Err(ConfigError::InvalidDataRate {
            field,
            value: setting.data_rate,
            max: Setting::MAX_DATA_RATE,
        });
    }
    if setting.tx_power > Setting::MAX_TX_POWER {
        return Err(ConfigError::InvalidTxPower {
            field,
            value: setting.tx_power,
            max: Setting::MAX_TX_POWER,
        });
    }
    Ok(())
}
