use crate::conf::{AnalysisConfig, ConfigError, ConfigOverrides, load_config};
use crate::timeline::Setting;

#[test]
fn default_config_is_valid() {
    assert!(AnalysisConfig::default().validate().is_ok());
}

#[test]
fn baseline_data_rate_above_five_is_rejected() {
    let overrides = ConfigOverrides {
        baseline_data_rate: Some(6),
        ..Default::default()
    };

    let err = load_config(None, &overrides).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidDataRate {
            field: "baseline",
            value: 6,
            max: 5
        }
    ));
}

#[test]
fn rw2_tx_power_above_seven_is_rejected() {
    let config = AnalysisConfig {
        rw2: Setting::new(0, 8),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidTxPower {
            field: "rw2",
            value: 8,
            ..
        }
    ));
}

#[test]
fn negative_or_non_finite_window_is_rejected() {
    for window in [-1.0, f64::NAN, f64::INFINITY] {
        let overrides = ConfigOverrides {
            window_secs: Some(window),
            ..Default::default()
        };

        let err = load_config(None, &overrides).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidWindow(_)));
    }
}

#[test]
fn zero_window_is_allowed() {
    let overrides = ConfigOverrides {
        window_secs: Some(0.0),
        ..Default::default()
    };

    assert!(load_config(None, &overrides).is_ok());
}
