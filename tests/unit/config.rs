//! `TageConfig` defaults and validation tests.

use tage_core::error::PredictorError;
use tage_core::TageConfig;

/// The default configuration reproduces the normative 12-table geometric
/// setup and passes validation.
#[test]
fn default_config_is_valid() {
    let config = TageConfig::default();
    assert_eq!(config.num_tables, 12);
    assert_eq!(config.history_lengths.len(), 12);
    assert_eq!(config.history_lengths[0], 640);
    assert_eq!(*config.history_lengths.last().unwrap(), 4);
    config.validate().expect("default config must validate");
}

/// A mismatched per-table vector length is rejected.
#[test]
fn mismatched_vector_length_is_rejected() {
    let mut config = TageConfig::default();
    config.tag_bits.pop();
    let err = config.validate().unwrap_err();
    assert_eq!(
        err,
        PredictorError::ConfigMismatch {
            field: "tag_bits",
            expected: 12,
            actual: 11,
        }
    );
}

/// A tag width below the minimum usable width is rejected.
#[test]
fn narrow_tag_width_is_rejected() {
    let mut config = TageConfig::default();
    config.tag_bits[0] = 1;
    let err = config.validate().unwrap_err();
    assert_eq!(err, PredictorError::InvalidTagWidth { width: 1 });
}

/// A zero-width index is rejected.
#[test]
fn zero_index_width_is_rejected() {
    let mut config = TageConfig::default();
    config.index_bits[0] = 0;
    let err = config.validate().unwrap_err();
    assert_eq!(err, PredictorError::InvalidIndexWidth { width: 0 });
}

/// Deserializing an empty JSON object falls back to every default.
#[test]
fn deserializes_from_empty_json() {
    let config: TageConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.num_tables, TageConfig::default().num_tables);
    assert_eq!(config.rng_seed, TageConfig::default().rng_seed);
}

/// Deserializing can override a single field while defaulting the rest.
#[test]
fn deserializes_partial_override() {
    let config: TageConfig = serde_json::from_str(r#"{"rng_seed": 42}"#).unwrap();
    assert_eq!(config.rng_seed, 42);
    assert_eq!(config.num_tables, TageConfig::default().num_tables);
}
