//! Defines the engine's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.
//!
//! Every variant maps onto an [`ErrorKind`] so callers can tell "not found" from
//! "try again later" without matching on transport details.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Message shown to end users for any upstream failure. Details go to the logs.
pub const SERVICE_UNAVAILABLE: &str = "Air quality service is unavailable, please try again later";

/// Coarse classification of an [`AppError`], stable across transport details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No location or no monitoring station exists for the query. User-correctable.
    NotFound,
    /// Network failure, timeout or malformed upstream response. Retry-worthy.
    Provider,
    /// The query was rejected before any outbound call.
    Validation,
    /// Local failures of the CLI glue (I/O, prompts, configuration).
    Internal,
}

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// No candidate exists for the query (unknown city, no stations nearby).
    #[error("{0}")]
    NotFound(String),

    /// Malformed input coordinates or an empty query.
    #[error("Invalid query: {0}")]
    Validation(String),

    /// Transport-level error from an HTTP provider (`reqwest`).
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// Error during JSON parsing (`serde_json`). Wrapped in Arc as serde_json::Error is not Clone.
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// The provider answered, but with something the engine cannot use.
    #[error("Provider Error: {0}")]
    Provider(String),

    /// An outbound call exceeded its time budget.
    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },

    /// Missing or malformed configuration.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Error related to progress spinner style templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

impl AppError {
    /// Classifies the error for callers that need to react differently per category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Api(_)
            | AppError::JsonParse(_)
            | AppError::Provider(_)
            | AppError::Timeout { .. } => ErrorKind::Provider,
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Cli(_)
            | AppError::Dialoguer(_)
            | AppError::Template(_) => ErrorKind::Internal,
        }
    }

    /// Text suitable for an end user.
    ///
    /// `NotFound` and `Validation` are surfaced verbatim; provider failures collapse
    /// into a generic message since their detail is only useful in the logs.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NotFound | ErrorKind::Validation | ErrorKind::Internal => self.to_string(),
            ErrorKind::Provider => SERVICE_UNAVAILABLE.to_string(),
        }
    }

    /// Returns `true` when repeating the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Provider
    }
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---
// These allow easy conversion from external error types into AppError
// using the `?` operator. Arc is used for non-Clone error types.

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct_for_not_found_and_provider() {
        let not_found = AppError::NotFound("city not found".to_string());
        let provider = AppError::Provider("bad payload".to_string());
        let timeout = AppError::Timeout {
            operation: "geocode".to_string(),
            after: Duration::from_secs(1),
        };

        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(provider.kind(), ErrorKind::Provider);
        assert_eq!(timeout.kind(), ErrorKind::Provider);
        assert!(!not_found.is_retryable());
        assert!(timeout.is_retryable());
    }

    #[test]
    fn test_user_message_hides_provider_detail() {
        let provider = AppError::Provider("upstream returned HTML".to_string());
        assert_eq!(provider.user_message(), SERVICE_UNAVAILABLE);

        let not_found = AppError::NotFound("city not found".to_string());
        assert_eq!(not_found.user_message(), "city not found");

        let invalid = AppError::Validation("latitude out of range".to_string());
        assert!(invalid.user_message().contains("latitude out of range"));
    }

    #[test]
    fn test_json_error_is_provider_kind() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Provider);
    }
}
