use serde::{Deserialize, Serialize};

use crate::error::QuipError;

/// Inbound query: `?city=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuipRequest {
    pub city: Option<String>,
}

impl QuipRequest {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()) }
    }

    /// The requested city, or [`QuipError::MissingCity`] if absent or empty.
    pub fn city(&self) -> Result<&str, QuipError> {
        self.city.as_deref().filter(|c| !c.is_empty()).ok_or(QuipError::MissingCity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
}

/// Body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Result(String),
    Error(String),
}

impl From<QuipError> for Envelope {
    fn from(err: QuipError) -> Self {
        Envelope::Error(err.to_string())
    }
}

/// Envelope plus the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuipResponse {
    pub status: u16,
    pub body: Envelope,
}

impl QuipResponse {
    pub fn ok(text: String) -> Self {
        Self { status: 200, body: Envelope::Result(text) }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

impl From<Result<String, QuipError>> for QuipResponse {
    fn from(outcome: Result<String, QuipError>) -> Self {
        match outcome {
            Ok(text) => QuipResponse::ok(text),
            Err(err) => QuipResponse { status: err.status(), body: err.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_serializes_as_single_key_object() {
        let ok = serde_json::to_value(Envelope::Result("Sunny, sadly.".into())).unwrap();
        assert_eq!(ok, json!({ "result": "Sunny, sadly." }));

        let err = serde_json::to_value(Envelope::Error("City not found".into())).unwrap();
        assert_eq!(err, json!({ "error": "City not found" }));
    }

    #[test]
    fn empty_city_is_missing() {
        assert_eq!(QuipRequest::default().city(), Err(QuipError::MissingCity));
        assert_eq!(QuipRequest::for_city("").city(), Err(QuipError::MissingCity));
        assert_eq!(QuipRequest::for_city("Oslo").city(), Ok("Oslo"));
    }

    #[test]
    fn response_from_error_uses_error_status() {
        let res = QuipResponse::from(Err::<String, _>(QuipError::MissingCity));
        assert_eq!(res.status, 400);
        assert_eq!(res.body, Envelope::Error("City name is required".into()));
        assert!(!res.is_success());
    }
}
