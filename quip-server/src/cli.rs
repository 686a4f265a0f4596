use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Password;
use log::info;
use quip_core::{Config, Orchestrator, QuipRequest};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-quip", version, about = "Sarcastic weather reports over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the handler over HTTP.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: SocketAddr,

        /// Port override, as set by most hosting platforms.
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Run a single request and print the JSON response.
    Ask {
        /// City name.
        city: String,
    },

    /// Store provider API keys in the local config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind, port } => {
                let addr = match port {
                    Some(port) => SocketAddr::new(bind.ip(), port),
                    None => bind,
                };

                let orchestrator = Arc::new(load_orchestrator()?);
                if orchestrator.is_configured() {
                    info!("Weather and Gemini credentials loaded");
                }

                server::run_http_server(addr, orchestrator).await?;
            }
            Command::Ask { city } => {
                let orchestrator = load_orchestrator()?;
                let response = orchestrator.handle(&QuipRequest::for_city(city)).await;

                let json = serde_json::to_string_pretty(&response.body)
                    .context("Failed to serialize response")?;
                println!("{json}");

                if !response.is_success() {
                    bail!("request failed with status {}", response.status);
                }
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

fn load_orchestrator() -> anyhow::Result<Orchestrator> {
    let config = Config::load()?;
    Ok(Orchestrator::from_config(&config))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let weather_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read OpenWeather API key")?;

    let gemini_key = Password::new("Gemini API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read Gemini API key")?;

    config.weather_api_key = non_empty(weather_key).or(config.weather_api_key);
    config.gemini_api_key = non_empty(gemini_key).or(config.gemini_api_key);
    config.save()?;

    info!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Blank input keeps the previously stored key.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
