/*!
 * Tests for application configuration functionality
 */

use tutorbot::app_config::{Config, GenerationProvider, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.generation.provider, GenerationProvider::Groq);
    assert_eq!(config.generation.model, "llama-3.3-70b-specdec");
    assert_eq!(config.generation.endpoint, "https://api.groq.com");
    assert_eq!(config.generation.timeout_secs, 60);
    assert_eq!(config.generation.temperature, 0.7);
    assert_eq!(config.generation.max_tokens, 500);

    assert_eq!(config.telegram.poll_timeout_secs, 30);
    assert!(config.telegram.token.is_empty());

    assert_eq!(config.session.idle_ttl_mins, 1440);
    assert_eq!(config.session.purge_interval_mins, 60);

    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Default config has no secrets and must not validate
    // (assumes TUTORBOT_TELEGRAM_TOKEN / GROQ_API_KEY are unset in the test env)
    let mut config = Config::default();
    assert!(config.validate().is_err());

    // With both secrets present it validates
    config.telegram.token = "123:abc".to_string();
    config.generation.api_key = "gsk_test".to_string();
    assert!(config.validate().is_ok());

    // Broken endpoint fails validation
    config.generation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.generation.endpoint = "https://api.groq.com".to_string();

    // Empty model fails validation
    config.generation.model = String::new();
    assert!(config.validate().is_err());
}

/// Test saving and loading configuration round-trips
#[test]
fn test_config_saveAndLoad_withTempFile_shouldRoundTrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.telegram.token = "123:abc".to_string();
    config.generation.model = "custom-model".to_string();
    config.session.idle_ttl_mins = 0;
    config.save(&path).expect("save config");

    let loaded = Config::from_file(&path).expect("load config");
    assert_eq!(loaded.telegram.token, "123:abc");
    assert_eq!(loaded.generation.model, "custom-model");
    assert_eq!(loaded.session.idle_ttl_mins, 0);
}

/// Test that partial JSON files are completed with defaults
#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("conf.json");
    std::fs::write(&path, r#"{ "generation": { "model": "other" } }"#).expect("write config");

    let loaded = Config::from_file(&path).expect("load config");
    assert_eq!(loaded.generation.model, "other");
    assert_eq!(loaded.generation.max_tokens, 500);
    assert_eq!(loaded.telegram.poll_timeout_secs, 30);
}
