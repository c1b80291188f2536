//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::PlacerConfig;
use std::path::Path;

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<PlacerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<PlacerConfig, ConfigError> {
    let config: PlacerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks value ranges the search relies on.
pub fn validate_config(config: &PlacerConfig) -> Result<(), ConfigError> {
    let search = &config.search;
    if search.iterations == 0 {
        return invalid("search.iterations must be at least 1");
    }
    if !(search.exploration >= 0.0) {
        return invalid("search.exploration must be non-negative");
    }
    if !(search.penalty >= 0.0) {
        return invalid("search.penalty must be non-negative");
    }
    if !(search.rollout_temperature > 0.0) {
        return invalid("search.rollout_temperature must be positive");
    }
    if config.moves.max_step < 1 {
        return invalid("moves.max_step must be at least 1");
    }
    if !(config.moves.step_decay > 0.0) {
        return invalid("moves.step_decay must be positive");
    }
    if config.port.width < 0 {
        return invalid("port.width must be non-negative");
    }
    Ok(())
}

fn invalid(message: &str) -> Result<(), ConfigError> {
    Err(ConfigError::ValidationError(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, PlacerConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[search]
iterations = 200
max_depth = 50
exploration = 12.5
penalty = 4.0
rollout_trials = 300
rollout_temperature = 250.0
seed = 42

[moves]
max_step = 6
step_decay = 1.001

[port]
width = 4
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.search.iterations, 200);
        assert_eq!(config.search.max_depth, 50);
        assert_eq!(config.search.penalty, 4.0);
        assert_eq!(config.search.seed, Some(42));
        assert_eq!(config.moves.max_step, 6);
        assert_eq!(config.port.width, 4);
    }

    #[test]
    fn zero_iterations_errors() {
        let err = load_config_from_str("[search]\niterations = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_penalty_errors() {
        let err = load_config_from_str("[search]\npenalty = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn nan_temperature_errors() {
        let err = load_config_from_str("[search]\nrollout_temperature = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_step_errors() {
        let err = load_config_from_str("[moves]\nmax_step = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("edgeport.toml");
        std::fs::write(&path, "[port]\nwidth = 3\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.port.width, 3);
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
