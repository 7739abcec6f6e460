/// Error types for the Machine Translation module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// The provider answered but could not translate (server error, rate limit, bad payload)
    TranslationError(String),
    /// The provider is misconfigured (missing or rejected API key, bad request)
    ConfigError(String),
    /// The request never reached the provider or the connection broke
    NetworkError(String),
    /// A language code the provider cannot accept
    InvalidLocale(String),
}

impl MtError {
    /// Whether a later run can reasonably expect the same call to succeed
    ///
    /// Configuration and locale errors repeat on every call, so they are not retriable.
    pub fn is_retriable(&self) -> bool {
        matches!(self, MtError::TranslationError(_) | MtError::NetworkError(_))
    }
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            MtError::TranslationError(format!("Failed to decode response: {}", error))
        } else {
            MtError::NetworkError(error.to_string())
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;

/// What the caller should do with the answer of a single provider call
///
/// `Retry` leaves the directive in place so that a later run picks it up again;
/// `Fatal` means no further call in this run can succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Translated(String),
    Retry(String),
    Fatal(MtError),
}

impl From<MtResult<String>> for ProviderOutcome {
    fn from(result: MtResult<String>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => {
                ProviderOutcome::Retry("provider returned an empty translation".to_string())
            }
            Ok(text) => ProviderOutcome::Translated(text),
            Err(e) if e.is_retriable() => ProviderOutcome::Retry(e.to_string()),
            Err(e) => ProviderOutcome::Fatal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_outcome() {
        let outcome = ProviderOutcome::from(Ok("Werfer".to_string()));
        assert_eq!(outcome, ProviderOutcome::Translated("Werfer".to_string()));
    }

    #[test]
    fn test_empty_translation_is_retry() {
        assert!(matches!(
            ProviderOutcome::from(Ok(String::new())),
            ProviderOutcome::Retry(_)
        ));
        assert!(matches!(
            ProviderOutcome::from(Ok("  ".to_string())),
            ProviderOutcome::Retry(_)
        ));
    }

    #[test]
    fn test_transient_errors_are_retry() {
        let outcome =
            ProviderOutcome::from(Err(MtError::NetworkError("connection reset".to_string())));
        assert!(matches!(outcome, ProviderOutcome::Retry(msg) if msg.contains("connection reset")));

        let outcome = ProviderOutcome::from(Err(MtError::TranslationError("503".to_string())));
        assert!(matches!(outcome, ProviderOutcome::Retry(_)));
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let outcome = ProviderOutcome::from(Err(MtError::ConfigError("bad key".to_string())));
        assert_eq!(
            outcome,
            ProviderOutcome::Fatal(MtError::ConfigError("bad key".to_string()))
        );
        let outcome = ProviderOutcome::from(Err(MtError::InvalidLocale("x@y".to_string())));
        assert!(matches!(outcome, ProviderOutcome::Fatal(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            MtError::ConfigError("API key cannot be empty".to_string()).to_string(),
            "Configuration error: API key cannot be empty"
        );
    }
}
