use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides (`BRACKET_SERVER_PORT=9000`).
pub const ENV_PREFIX: &str = "BRACKET_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::{LlmProvider, NarrativeSource};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_string_is_valid() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_str_sections() {
        let toml = r#"
[server]
port = 9000

[scryfall]
rate_limit_ms = 250

[spellbook]
enabled = false

[narrative]
mode = "llm_first"

[narrative.llm]
provider = "ollama"
model = "llama3"

[scoring]
tutor_high_threshold = 15.0
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.scryfall.rate_limit_ms, 250);
        assert!(!config.spellbook.enabled);
        assert_eq!(config.narrative.mode, NarrativeSource::LlmFirst);
        assert_eq!(
            config.narrative.llm.as_ref().map(|l| l.provider),
            Some(LlmProvider::Ollama)
        );
        assert_eq!(config.scoring.tutor_high_threshold, 15.0);
        // untouched scoring fields keep their defaults
        assert_eq!(config.scoring.tutor_low_threshold, 6.0);
    }

    #[test]
    fn test_load_config_from_str_bad_enum() {
        let result = load_config_from_str("[narrative]\nmode = \"sometimes\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[server]
host = "127.0.0.1"
port = 3000
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }
}
