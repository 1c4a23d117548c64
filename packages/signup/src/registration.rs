//! # Registration endpoint client
//!
//! [`RegistrationService`] delivers a validated [`RegistrationRecord`].
//! [`HttpRegistrationClient`] sends it as a JSON `POST` and classifies the answer:
//!
//! | Response | Result |
//! |----------|--------|
//! | any 2xx | `Ok(())` |
//! | non-2xx with `{"errors": {...}}` | [`SubmitError::Rejected`] carrying the field errors |
//! | non-2xx with any other body | [`SubmitError::Rejected`] with no field errors |
//! | no response | [`SubmitError::Transport`] |
//!
//! Error messages may be a string or a list of strings per field.

use std::collections::BTreeMap;
use std::future::Future;

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::SignupConfig;
use crate::error::SubmitError;
use crate::http;
use crate::record::RegistrationRecord;
use crate::validation::ValidationErrors;

/// Async delivery of a registration.
pub trait RegistrationService {
    fn register(
        &self,
        record: &RegistrationRecord,
    ) -> impl Future<Output = Result<(), SubmitError>>;
}

/// JSON-over-HTTP registration client.
#[derive(Clone, Debug)]
pub struct HttpRegistrationClient {
    http: reqwest::Client,
    url: String,
}

impl HttpRegistrationClient {
    pub fn new(config: &SignupConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            http::client(&config.http)?,
            config.endpoints.registration_url.clone(),
        ))
    }

    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

impl RegistrationService for HttpRegistrationClient {
    async fn register(&self, record: &RegistrationRecord) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read registration error body");
                String::new()
            }
        };
        Err(rejection(status.as_u16(), &body))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: BTreeMap<String, Messages>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Messages {
    One(String),
    Many(Vec<String>),
}

impl From<Messages> for Vec<String> {
    fn from(messages: Messages) -> Self {
        match messages {
            Messages::One(message) => vec![message],
            Messages::Many(messages) => messages,
        }
    }
}

/// Build the error for a non-success response.
pub(crate) fn rejection(status: u16, body: &str) -> SubmitError {
    let errors = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ValidationErrors::from_server(
            parsed
                .errors
                .into_iter()
                .map(|(field, messages)| (field, messages.into())),
        ),
        Err(e) => {
            tracing::debug!(status, error = %e, "Registration error body carried no field errors");
            ValidationErrors::new()
        }
    };
    SubmitError::Rejected { status, errors }
}
