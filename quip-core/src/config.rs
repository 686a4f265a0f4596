use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::QuipError;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";
pub const WEATHER_BASE_URL_VAR: &str = "WEATHER_API_BASE_URL";
pub const GEMINI_BASE_URL_VAR: &str = "GEMINI_API_BASE_URL";

/// Handler configuration, built once at startup.
///
/// Example TOML:
/// ```toml
/// weather_api_key = "..."
/// gemini_api_key = "..."
/// gemini_model = "gemini-pro"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_base_url: Option<String>,
}

/// Both provider credentials, guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub weather_api_key: String,
    pub gemini_api_key: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("weather_api_key", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load the config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-quip", "weather-quip")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from a variable lookup (normally the process environment).
    ///
    /// Empty values count as unset and leave the current value alone.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(v) = get(WEATHER_API_KEY_VAR) {
            self.weather_api_key = Some(v);
        }
        if let Some(v) = get(GEMINI_API_KEY_VAR) {
            self.gemini_api_key = Some(v);
        }
        if let Some(v) = get(GEMINI_MODEL_VAR) {
            self.gemini_model = Some(v);
        }
        if let Some(v) = get(WEATHER_BASE_URL_VAR) {
            self.weather_base_url = Some(v);
        }
        if let Some(v) = get(GEMINI_BASE_URL_VAR) {
            self.gemini_base_url = Some(v);
        }
    }

    /// Both credentials, or [`QuipError::MissingKeys`] if either is absent or empty.
    pub fn secrets(&self) -> Result<Secrets, QuipError> {
        let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

        match (non_empty(&self.weather_api_key), non_empty(&self.gemini_api_key)) {
            (Some(weather_api_key), Some(gemini_api_key)) => {
                Ok(Secrets { weather_api_key, gemini_api_key })
            }
            _ => Err(QuipError::MissingKeys),
        }
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn weather_base_url(&self) -> &str {
        self.weather_base_url.as_deref().unwrap_or(DEFAULT_WEATHER_BASE_URL)
    }

    pub fn gemini_base_url(&self) -> &str {
        self.gemini_base_url.as_deref().unwrap_or(DEFAULT_GEMINI_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn secrets_error_when_not_set() {
        let cfg = Config::default();
        assert_eq!(cfg.secrets().unwrap_err(), QuipError::MissingKeys);
    }

    #[test]
    fn secrets_error_when_only_one_key_present() {
        let cfg = Config { weather_api_key: Some("W".into()), ..Default::default() };
        assert_eq!(cfg.secrets().unwrap_err(), QuipError::MissingKeys);

        let cfg = Config { gemini_api_key: Some("G".into()), ..Default::default() };
        assert_eq!(cfg.secrets().unwrap_err(), QuipError::MissingKeys);
    }

    #[test]
    fn secrets_error_when_key_is_empty() {
        let cfg = Config {
            weather_api_key: Some(String::new()),
            gemini_api_key: Some("G".into()),
            ..Default::default()
        };
        assert_eq!(cfg.secrets().unwrap_err(), QuipError::MissingKeys);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config {
            weather_api_key: Some("FILE_W".into()),
            gemini_model: Some("gemini-1.5-flash".into()),
            ..Default::default()
        };

        cfg.apply_overrides(lookup(&[
            (WEATHER_API_KEY_VAR, "ENV_W"),
            (GEMINI_API_KEY_VAR, "ENV_G"),
        ]));

        let secrets = cfg.secrets().expect("both keys set");
        assert_eq!(secrets.weather_api_key, "ENV_W");
        assert_eq!(secrets.gemini_api_key, "ENV_G");
        assert_eq!(cfg.gemini_model(), "gemini-1.5-flash");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = Config { weather_api_key: Some("FILE_W".into()), ..Default::default() };
        cfg.apply_overrides(lookup(&[(WEATHER_API_KEY_VAR, "")]));
        assert_eq!(cfg.weather_api_key.as_deref(), Some("FILE_W"));
    }

    #[test]
    fn defaults_for_model_and_urls() {
        let cfg = Config::default();
        assert_eq!(cfg.gemini_model(), DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.weather_base_url(), DEFAULT_WEATHER_BASE_URL);
        assert_eq!(cfg.gemini_base_url(), DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn toml_roundtrip_skips_unset_fields() {
        let cfg = Config {
            weather_api_key: Some("W".into()),
            gemini_api_key: Some("G".into()),
            ..Default::default()
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(!text.contains("gemini_model"));

        let parsed: Config = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn secrets_debug_is_redacted() {
        let cfg = Config {
            weather_api_key: Some("SECRET_W".into()),
            gemini_api_key: Some("SECRET_G".into()),
            ..Default::default()
        };
        let dbg = format!("{:?}", cfg.secrets().expect("both keys set"));
        assert!(!dbg.contains("SECRET_W"));
        assert!(!dbg.contains("SECRET_G"));
    }
}
