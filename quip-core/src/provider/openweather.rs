use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{config::DEFAULT_WEATHER_BASE_URL, model::WeatherReport};

use super::{WeatherLookup, WeatherProvider};

pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider").field("base_url", &self.base_url).finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_WEATHER_BASE_URL.to_string(), http: Client::new() }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherLookup> {
        let url = format!("{}/weather", self.base_url);

        // The API key travels in the query string; strip URLs from errors so it never leaks.
        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read OpenWeather current response body")?;

        debug!("OpenWeather answered {status} for {city:?}");

        parse_current(city, &body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

/// Error bodies carry `cod` as a string (`"404"`), success bodies as a number.
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    cod: Value,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

fn cod_is_ok(cod: &Value) -> bool {
    match cod {
        Value::Number(n) => n.as_f64() == Some(200.0),
        Value::String(s) => s.trim() == "200",
        _ => false,
    }
}

fn cod_label(cod: &Value) -> String {
    match cod {
        Value::String(s) => s.clone(),
        Value::Null => "missing".to_string(),
        other => other.to_string(),
    }
}

/// Interpret a current-weather body, independent of the HTTP status it came with.
fn parse_current(city: &str, body: &str) -> Result<WeatherLookup> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

    if !cod_is_ok(&parsed.cod) {
        return Ok(WeatherLookup::NotFound { code: cod_label(&parsed.cod) });
    }

    let main = parsed
        .main
        .ok_or_else(|| anyhow!("OpenWeather response is missing `main.temp`"))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| anyhow!("OpenWeather response is missing `weather[0].description`"))?;

    Ok(WeatherLookup::Found(WeatherReport {
        city: city.to_string(),
        temperature_c: main.temp,
        condition,
    }))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherLookup> {
        self.fetch_current(city).await
    }
}
