//! Error types for configuration, form mutation, and the two remote calls.

use thiserror::Error;

use crate::fields::Field;
use crate::validation::ValidationErrors;

/// Configuration could not be read or parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The form controller refused a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field {0} is filled by the postal-code lookup and cannot be edited")]
    ReadOnly(Field),

    #[error("field {0} does not accept this kind of value")]
    WrongKind(Field),
}

/// Postal-code lookup failed. Always recovered by skipping the autofill.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("postal code must have 8 digits, got {0:?}")]
    InvalidPostalCode(String),

    #[error("postal-code service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("postal-code service answered {0}")]
    Status(u16),

    #[error("malformed postal-code response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Registration request failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// No response was received.
    #[error("registration endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("registration rejected with status {status}")]
    Rejected {
        status: u16,
        errors: ValidationErrors,
    },
}

impl SubmitError {
    /// Field errors reported by the endpoint, if any.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmitError::Rejected { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }
}
