//! Tests for config module

#[cfg(test)]
mod tests {
    use crate::config::*;
    use serial_test::serial;
    use std::io::Write;

    // ========================================================================
    // Enum tests
    // ========================================================================

    #[test]
    fn test_undefined_policy_default_is_skip() {
        assert_eq!(UndefinedPolicy::default(), UndefinedPolicy::Skip);
    }

    #[test]
    fn test_history_mode_serialization() {
        // Arrange
        let mode = HistoryMode::Replace;

        // Act
        let json = serde_json::to_string(&mode).expect("serialize");
        let deserialized: HistoryMode = serde_json::from_str(&json).expect("deserialize");

        // Assert
        assert_eq!(json, "\"replace\"");
        assert_eq!(deserialized, mode);
    }

    // ========================================================================
    // Default tests
    // ========================================================================

    #[test]
    fn test_config_default_values() {
        // Arrange & Act
        let config = QueryParamsConfig::default();

        // Assert
        assert!(!config.write.replace);
        assert_eq!(config.write.undefined, UndefinedPolicy::Skip);
        assert_eq!(config.write.history, HistoryMode::Push);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
        assert!(config.validate().is_ok());
    }

    // ========================================================================
    // TOML parsing tests
    // ========================================================================

    #[test]
    fn test_config_from_toml_minimal() {
        // Arrange
        let toml = r#"
[write]
replace = true
"#;

        // Act
        let config = QueryParamsConfig::from_toml(toml).expect("parse");

        // Assert
        assert!(config.write.replace);
        // Other values should be defaults
        assert_eq!(config.write.history, HistoryMode::Push);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_toml_full() {
        // Arrange
        let toml = r#"
[write]
replace = false
undefined = "literal"
history = "replace"

[logging]
level = "debug"
format = "compact"
"#;

        // Act
        let config = QueryParamsConfig::from_toml(toml).expect("parse");

        // Assert
        assert!(!config.write.replace);
        assert_eq!(config.write.undefined, UndefinedPolicy::Literal);
        assert_eq!(config.write.history, HistoryMode::Replace);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_config_from_toml_invalid_history() {
        // Arrange
        let toml = r#"
[write]
history = "teleport"
"#;

        // Act
        let result = QueryParamsConfig::from_toml(toml);

        // Assert
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    // ========================================================================
    // Validation tests
    // ========================================================================

    #[test]
    fn test_config_validate_invalid_log_level() {
        // Arrange
        let mut config = QueryParamsConfig::default();
        config.logging.level = "verbose".to_string();

        // Act
        let result = config.validate();

        // Assert
        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "logging.level"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_config_validate_invalid_log_format() {
        // Arrange
        let mut config = QueryParamsConfig::default();
        config.logging.format = "xml".to_string();

        // Act
        let result = config.validate();

        // Assert
        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "logging.format"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    // ========================================================================
    // File and environment tests
    // ========================================================================

    #[test]
    #[serial]
    fn test_config_load_from_file() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[write]\nundefined = \"literal\"").expect("write");

        // Act
        let config = QueryParamsConfig::load_from_path(file.path()).expect("load");

        // Assert
        assert_eq!(config.write.undefined, UndefinedPolicy::Literal);
    }

    #[test]
    #[serial]
    fn test_config_missing_file_uses_defaults() {
        // Arrange
        let dir = tempfile::tempdir().expect("temp dir");

        // Act
        let config =
            QueryParamsConfig::load_from_path(dir.path().join("absent.toml")).expect("load");

        // Assert
        assert!(!config.write.replace);
    }

    #[test]
    #[serial]
    fn test_config_env_overrides_file() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[write]\nreplace = false").expect("write");
        std::env::set_var("QUERYPARAMS_WRITE_REPLACE", "true");

        // Act
        let config = QueryParamsConfig::load_from_path(file.path());
        std::env::remove_var("QUERYPARAMS_WRITE_REPLACE");

        // Assert
        assert!(config.expect("load").write.replace);
    }

    // ========================================================================
    // Serialization tests
    // ========================================================================

    #[test]
    fn test_config_roundtrip() {
        // Arrange
        let mut config = QueryParamsConfig::default();
        config.write.history = HistoryMode::Replace;

        // Act
        let toml_str = config.to_toml().expect("serialize");
        let parsed = QueryParamsConfig::from_toml(&toml_str).expect("parse");

        // Assert
        assert!(toml_str.contains("[write]"));
        assert_eq!(parsed.write, config.write);
    }
}
