//! Core library for the `weather-quip` handler.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstractions over the weather and text-generation providers
//! - Shared domain models (request, weather report, response envelope)
//! - The orchestrator chaining a weather lookup into a sarcastic summary
//!
//! It is used by `quip-server`, but can also be embedded in other hosts.

pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod provider;

pub use config::{Config, Secrets};
pub use error::QuipError;
pub use model::{Envelope, QuipRequest, QuipResponse, WeatherReport};
pub use orchestrator::Orchestrator;
pub use provider::{Providers, TextGenerator, WeatherLookup, WeatherProvider};
