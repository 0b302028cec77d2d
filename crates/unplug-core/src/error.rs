//! Core error types for unplug-core.
//!
//! One enum per concern, unified under [`CoreError`] via `#[from]`
//! conversions. Network failures split into the transport / server /
//! malformed taxonomy; none of them is ever retried automatically.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for unplug-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend HTTP API errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Personality classification errors
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Question flow errors
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Usage-statistics errors
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// Preference store errors
    #[error("Preferences error: {0}")]
    Prefs(#[from] PrefsError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the backend HTTP API.
#[derive(Error, Debug)]
pub enum BackendError {
    /// No response was received (connect failure or timeout).
    #[error("Transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend responded with a non-2xx status.
    #[error("Server returned HTTP {status}")]
    Server { status: u16 },

    /// The body did not parse or lacked an expected field.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The configured base URL is not a valid URL.
    #[error("Invalid backend base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Server {
                status: status.as_u16(),
            }
        } else {
            BackendError::Transport(err)
        }
    }
}

/// Personality classification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// The answer sequence does not have exactly the expected length.
    #[error("Expected {expected} answers, got {got}")]
    InvalidAnswerCount { expected: usize, got: usize },

    /// A label string is not a well-formed 4-letter personality code.
    #[error("Invalid personality label: {0:?}")]
    InvalidLabel(String),
}

/// Question flow errors.
#[derive(Error, Debug)]
pub enum QuizError {
    /// The question payload does not contain exactly the expected count.
    #[error("Expected {expected} questions, got {got}")]
    InvalidQuestionCount { expected: usize, got: usize },

    /// Questions arrived while the flow was not awaiting them.
    #[error("Quiz is not awaiting questions")]
    NotAwaitingQuestions,

    /// An answer arrived while no question was being presented.
    #[error("No question is being presented")]
    NotPresenting,

    /// Classification of the collected answers failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Usage-statistics errors.
#[derive(Error, Debug)]
pub enum UsageError {
    /// Usage access has not been granted -- there is no recorder database.
    #[error("Usage access not granted: no usage database at {path}")]
    PermissionMissing { path: PathBuf },

    /// A query against the usage database failed.
    #[error("Usage query failed: {0}")]
    Query(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for UsageError {
    fn from(err: rusqlite::Error) -> Self {
        UsageError::Query(err.to_string())
    }
}

/// Preference store errors.
#[derive(Error, Debug)]
pub enum PrefsError {
    /// Failed to load preferences
    #[error("Failed to load preferences from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save preferences
    #[error("Failed to save preferences to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_errors_convert_into_core_error() {
        let err: CoreError = ClassifierError::InvalidAnswerCount {
            expected: 16,
            got: 3,
        }
        .into();
        assert!(matches!(err, CoreError::Classifier(_)));

        let err: CoreError = QuizError::NotPresenting.into();
        assert!(matches!(err, CoreError::Quiz(_)));

        let err: CoreError = UsageError::Query("boom".into()).into();
        assert!(matches!(err, CoreError::Usage(_)));

        let err: CoreError = ConfigError::UnknownKey("nope".into()).into();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn classifier_error_inside_quiz_error() {
        let err: QuizError = ClassifierError::InvalidAnswerCount {
            expected: 16,
            got: 15,
        }
        .into();
        assert_eq!(err.to_string(), "Expected 16 answers, got 15");
    }

    #[test]
    fn rusqlite_errors_become_query_failures() {
        let err: UsageError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, UsageError::Query(_)));
    }
}
