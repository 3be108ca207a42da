use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// API key for the recognition service; can also come from the
    /// SAYFORM_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: u32,
    /// Extra slot names registered alongside the built-in ordinals
    #[serde(default)]
    pub slot_names: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language_code: default_language_code(),
            sample_rate_hz: default_sample_rate(),
            slot_names: Vec::new(),
        }
    }
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_sample_rate() -> u32 {
    44100
}

impl Config {
    /// Load from a TOML file, falling back to defaults when the file does
    /// not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// API key from config, overridden by the environment
    pub fn api_key(&self) -> Option<String> {
        std::env::var("SAYFORM_API_KEY")
            .ok()
            .or_else(|| self.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.language_code, "en-US");
        assert_eq!(config.sample_rate_hz, 44100);
        assert!(config.slot_names.is_empty());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            slot_names = ["name", "surname"]
            "#,
        )
        .unwrap();
        assert_eq!(config.slot_names, vec!["name", "surname"]);
        assert_eq!(config.language_code, "en-US");
    }

    #[test]
    fn test_parse_full_toml() {
        let config: Config = toml::from_str(
            r#"
            api_key = "abc123"
            language_code = "en-GB"
            sample_rate_hz = 16000
            slot_names = ["email"]
            "#,
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.language_code, "en-GB");
        assert_eq!(config.sample_rate_hz, 16000);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("no/such/file.toml").unwrap();
        assert_eq!(config.sample_rate_hz, 44100);
    }
}
