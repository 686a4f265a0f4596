use thiserror::Error;

/// Every way a single invocation can fail.
///
/// Each variant maps to exactly one HTTP status via [`QuipError::status`];
/// the `Display` text is what the caller sees in the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuipError {
    #[error("API Keys missing on server")]
    MissingKeys,

    #[error("City name is required")]
    MissingCity,

    /// The weather provider answered with a non-success `cod`.
    #[error("City not found")]
    CityNotFound,

    /// Network fault, malformed payload or provider-side error.
    #[error("{0}")]
    Upstream(String),
}

impl QuipError {
    /// HTTP status code for this failure.
    ///
    /// A missing city is the only client fault; an unknown city collapses
    /// into the same 500 as any other upstream failure.
    pub fn status(&self) -> u16 {
        match self {
            QuipError::MissingCity => 400,
            QuipError::MissingKeys | QuipError::CityNotFound | QuipError::Upstream(_) => 500,
        }
    }

    /// Wrap a provider error, keeping only the message the provider raised.
    pub fn upstream(err: &anyhow::Error) -> Self {
        QuipError::Upstream(err.root_cause().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_city_is_a_client_fault() {
        assert_eq!(QuipError::MissingCity.status(), 400);
        assert_eq!(QuipError::MissingKeys.status(), 500);
        assert_eq!(QuipError::CityNotFound.status(), 500);
        assert_eq!(QuipError::Upstream("boom".into()).status(), 500);
    }

    #[test]
    fn messages_match_wire_text() {
        assert_eq!(QuipError::MissingKeys.to_string(), "API Keys missing on server");
        assert_eq!(QuipError::MissingCity.to_string(), "City name is required");
        assert_eq!(QuipError::CityNotFound.to_string(), "City not found");
        assert_eq!(QuipError::Upstream("quota exceeded".into()).to_string(), "quota exceeded");
    }

    #[test]
    fn upstream_keeps_root_message() {
        let err = anyhow::anyhow!("model overloaded").context("Failed to call Gemini");
        assert_eq!(QuipError::upstream(&err), QuipError::Upstream("model overloaded".into()));
    }
}
