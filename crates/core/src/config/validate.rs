use crate::resolver::MAX_COLLECTION_BATCH;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Scryfall batch size within 1..=75
/// - Narrative mode has the LLM section it needs
/// - Scoring weights and threshold pairs are consistent
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let batch = config.scryfall.batch_size;
    if batch == 0 || batch > MAX_COLLECTION_BATCH {
        return Err(ConfigError::ValidationError(format!(
            "scryfall.batch_size must be between 1 and {}, got {}",
            MAX_COLLECTION_BATCH, batch
        )));
    }

    config
        .narrative
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("narrative: {}", e)))?;

    config
        .scoring
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("scoring: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::{NarrativeConfig, NarrativeSource};

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_batch_size_bounds() {
        let mut config = Config::default();
        config.scryfall.batch_size = 0;
        assert!(validate_config(&config).is_err());

        config.scryfall.batch_size = 76;
        assert!(validate_config(&config).is_err());

        config.scryfall.batch_size = 40;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_llm_first_without_llm() {
        let mut config = Config::default();
        config.narrative = NarrativeConfig {
            mode: NarrativeSource::LlmFirst,
            llm: None,
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("narrative"));
    }

    #[test]
    fn test_validate_tutor_weights_must_decrease() {
        let mut config = Config::default();
        config.scoring.tutor_standard_weight = 2.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("scoring"));
    }

    #[test]
    fn test_validate_inverted_thresholds() {
        let mut config = Config::default();
        config.scoring.fast_mana_low_threshold = 5;
        config.scoring.fast_mana_high_threshold = 3;
        assert!(validate_config(&config).is_err());
    }
}
