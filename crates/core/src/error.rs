//! Error types for deck content generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the generation pipeline.
///
/// Each variant wraps the typed error of the stage that failed, unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The generation request itself is unusable (e.g. blank topic).
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    /// The text-generation backend failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider output could not be coerced into parseable JSON.
    #[error("Repair error: {0}")]
    Repair(#[from] RepairError),

    /// The parsed output could not be reconciled with the catalog.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Failures of a text-generation backend call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The endpoint could not be reached (DNS, connection refused, reset).
    #[error("network failure: {0}")]
    Network(String),

    /// The credential was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The backend asked us to slow down.
    #[error("rate limited{}", retry_hint(.retry_after_secs))]
    RateLimit { retry_after_secs: Option<u64> },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The backend answered, but not with a usable completion.
    #[error("malformed HTTP response{}: {message}", status_hint(.status))]
    MalformedHttp {
        status: Option<u16>,
        message: String,
    },
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!(": retry after {secs}s"),
        None => String::new(),
    }
}

fn status_hint(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

/// The provider text could not be turned into valid JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} near `{offending_snippet}`")]
pub struct RepairError {
    /// Parser message describing what is still wrong.
    pub reason: String,
    /// Excerpt of the repaired text around the failure position.
    pub offending_snippet: String,
}

/// The parsed document cannot be reconciled with the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No catalog slide survived filtering.
    #[error("no valid slides selected")]
    EmptySelection,

    /// A top-level member has the wrong JSON type (or is missing).
    #[error("`{field}` must be {expected}")]
    MalformedTopLevel {
        field: String,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::RateLimit {
            retry_after_secs: Some(30),
        };
        assert_eq!(err.to_string(), "rate limited: retry after 30s");

        let err = ProviderError::RateLimit {
            retry_after_secs: None,
        };
        assert_eq!(err.to_string(), "rate limited");

        let err = ProviderError::MalformedHttp {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed HTTP response (status 502): bad gateway"
        );
    }

    #[test]
    fn test_stage_errors_convert_into_error() {
        let err: Error = ValidationError::EmptySelection.into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptySelection)
        ));

        let err: Error = ProviderError::Network("refused".to_string()).into();
        assert!(matches!(err, Error::Provider(ProviderError::Network(_))));
    }
}
