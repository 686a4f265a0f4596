use log::{debug, warn};

use crate::{
    config::Config,
    error::QuipError,
    model::{QuipRequest, QuipResponse, WeatherReport},
    prompt::compose_prompt,
    provider::{Providers, WeatherLookup, providers_from_config},
};

/// Runs one city query through weather lookup and text generation.
///
/// Holds no per-request state; share it behind an `Arc` across requests.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    /// `None` when credentials were missing at startup.
    providers: Option<Providers>,
}

impl Orchestrator {
    pub fn new(providers: Providers) -> Self {
        Self { providers: Some(providers) }
    }

    /// An orchestrator that answers every request with the missing-keys error.
    pub fn unconfigured() -> Self {
        Self { providers: None }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.secrets() {
            Ok(secrets) => Self::new(providers_from_config(config, secrets)),
            Err(_) => {
                warn!("Weather or Gemini API key is missing; every request will fail");
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.providers.is_some()
    }

    /// Handle one request and map the outcome onto a response envelope.
    pub async fn handle(&self, request: &QuipRequest) -> QuipResponse {
        let outcome = self.run(request).await;

        if let Err(err) = &outcome {
            warn!("Request failed with status {}: {err}", err.status());
        }

        QuipResponse::from(outcome)
    }

    /// The request chain with its failure kept typed.
    pub async fn run(&self, request: &QuipRequest) -> Result<String, QuipError> {
        let providers = self.providers.as_ref().ok_or(QuipError::MissingKeys)?;
        let city = request.city()?;

        let report = lookup_weather(providers, city).await?;
        debug!(
            "Weather for {city:?}: {}°C, {}",
            report.temperature_c, report.condition
        );

        let prompt = compose_prompt(&report);

        let text = providers
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| QuipError::upstream(&e))?;
        debug!("Generated {} characters for {city:?}", text.chars().count());

        Ok(text)
    }
}

async fn lookup_weather(providers: &Providers, city: &str) -> Result<WeatherReport, QuipError> {
    match providers.weather.current_weather(city).await {
        Ok(WeatherLookup::Found(report)) => Ok(report),
        Ok(WeatherLookup::NotFound { code }) => {
            debug!("Weather provider returned code {code} for {city:?}");
            Err(QuipError::CityNotFound)
        }
        Err(e) => Err(QuipError::upstream(&e)),
    }
}
