use crate::conf::{AnalysisConfig, ConfigError, ConfigOverrides, load_config, parse_config_file};
use crate::timeline::{MatchPolicy, Setting};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn no_file_yields_defaults() {
    let config = load_config(None, &ConfigOverrides::default()).unwrap();

    assert_eq!(config, AnalysisConfig::default());
    assert_eq!(config.correlation.window_secs, 3.0);
    assert_eq!(config.baseline, Setting::new(0, 0));
    assert_eq!(config.correlation.match_policy, MatchPolicy::ConsumeOnce);
}

#[test]
fn file_values_override_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("adrscope.toml");
    fs::write(
        &path,
        r#"
[baseline]
data_rate = 2

[correlation]
window_secs = 1.5
match_policy = "shared"
"#,
    )
    .unwrap();

    // Act
    let config = load_config(Some(&path), &ConfigOverrides::default()).unwrap();

    // Assert
    assert_eq!(config.baseline, Setting::new(2, 0));
    assert_eq!(config.rw2, Setting::BASELINE);
    assert_eq!(config.correlation.window_secs, 1.5);
    assert_eq!(config.correlation.match_policy, MatchPolicy::Shared);
}

#[test]
fn overrides_take_precedence_over_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("adrscope.toml");
    fs::write(&path, "[correlation]\nwindow_secs = 1.5\n").unwrap();

    let overrides = ConfigOverrides {
        window_secs: Some(5.0),
        baseline_tx_power: Some(3),
        match_policy: Some(MatchPolicy::Shared),
        ..Default::default()
    };
    let config = load_config(Some(&path), &overrides).unwrap();

    assert_eq!(config.correlation.window_secs, 5.0);
    assert_eq!(config.baseline, Setting::new(0, 3));
    assert_eq!(config.correlation.match_policy, MatchPolicy::Shared);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = parse_config_file(&dir.path().join("missing.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("adrscope.toml");
    fs::write(&path, "[correlation]\nwindow = 3.0\n").unwrap();

    let err = parse_config_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn config_round_trips_through_toml() {
    let config = AnalysisConfig::default();

    let text = toml::to_string(&config).unwrap();
    let parsed: AnalysisConfig = toml::from_str(&text).unwrap();

    assert_eq!(parsed, config);
}
