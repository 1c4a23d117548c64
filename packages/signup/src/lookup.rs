//! # Postal-code lookup
//!
//! [`PostalCodeLookup`] resolves an 8-digit CEP to a street and city.
//! [`BrasilApiClient`] implements it against BrasilAPI's CEP v2 endpoint
//! (`GET {base}/api/cep/v2/{digits}`), which answers with at least `street` and
//! `city`. Any non-2xx status or body without those fields is a [`LookupError`];
//! callers treat every error as "no autofill".

use std::future::Future;

use crate::config::SignupConfig;
use crate::controller::POSTAL_CODE_DIGITS;
use crate::error::LookupError;
use crate::http;
use crate::mask;
use crate::record::Address;

/// Async lookup of an address by postal code.
pub trait PostalCodeLookup {
    fn lookup(&self, postal_code: &str) -> impl Future<Output = Result<Address, LookupError>>;
}

/// BrasilAPI CEP v2 client.
#[derive(Clone, Debug)]
pub struct BrasilApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl BrasilApiClient {
    /// Create a client from the configured base URL and HTTP settings.
    pub fn new(config: &SignupConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            http::client(&config.http)?,
            config.endpoints.postal_code_base_url.clone(),
        ))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, digits: &str) -> String {
        http::join(&self.base_url, &format!("api/cep/v2/{digits}"))
    }
}

impl PostalCodeLookup for BrasilApiClient {
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        let digits = mask::digits(postal_code);
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(LookupError::InvalidPostalCode(postal_code.to_string()));
        }

        let response = self
            .http
            .get(self.url(&digits))
            .send()
            .await
            .map_err(LookupError::Transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(LookupError::Transport)?;

        parse_response(status, &body)
    }
}

/// Interpret a lookup response.
pub(crate) fn parse_response(status: u16, body: &str) -> Result<Address, LookupError> {
    if !(200..300).contains(&status) {
        return Err(LookupError::Status(status));
    }
    serde_json::from_str(body).map_err(LookupError::Decode)
}
