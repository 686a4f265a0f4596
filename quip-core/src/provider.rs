use crate::{
    Config, WeatherReport,
    config::Secrets,
    provider::{gemini::GeminiGenerator, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod gemini;
pub mod openweather;

/// Outcome of a current-conditions lookup that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Found(WeatherReport),
    /// The provider answered, but with a non-success status code in the body.
    NotFound { code: String },
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> anyhow::Result<WeatherLookup>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// The two upstream clients one invocation talks to.
#[derive(Debug, Clone)]
pub struct Providers {
    pub weather: Arc<dyn WeatherProvider>,
    pub generator: Arc<dyn TextGenerator>,
}

/// Construct both HTTP providers from config and validated secrets.
pub fn providers_from_config(config: &Config, secrets: Secrets) -> Providers {
    let http = reqwest::Client::new();

    let weather = OpenWeatherProvider::new(secrets.weather_api_key)
        .with_base_url(config.weather_base_url())
        .with_client(http.clone());

    let generator = GeminiGenerator::new(secrets.gemini_api_key, config.gemini_model())
        .with_base_url(config.gemini_base_url())
        .with_client(http);

    Providers { weather: Arc::new(weather), generator: Arc::new(generator) }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_from_config_uses_configured_model() {
        let cfg = Config {
            weather_api_key: Some("W".into()),
            gemini_api_key: Some("G".into()),
            gemini_model: Some("gemini-1.5-flash".into()),
            ..Default::default()
        };
        let secrets = cfg.secrets().expect("both keys set");

        let providers = providers_from_config(&cfg, secrets);
        let dbg = format!("{:?}", providers.generator);
        assert!(dbg.contains("gemini-1.5-flash"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "°".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
