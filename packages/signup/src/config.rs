//! # Form configuration — `signup.toml`
//!
//! Endpoints, HTTP settings and the behavioural switches of the registration form.
//!
//! ```toml
//! [endpoints]
//! registration_url = "https://apis.codante.io/api/register-user/register"
//! postal_code_base_url = "https://brasilapi.com.br"
//!
//! [http]
//! timeout_secs = 10        # native only
//!
//! [policy]
//! password_min_length = 6
//! reset = "always"          # or "on_success"
//! require_address = false
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`SignupConfig`] | Top-level config with TOML (de)serialisation and builder helpers. |
//! | [`EndpointsConfig`] | Registration endpoint and postal-code service base URL. |
//! | [`HttpConfig`] | Request timeout for the native HTTP client. |
//! | [`PolicyConfig`] | Password floor, reset policy, and whether address/city are required. |
//!
//! Every section defaults, so a missing or empty file is the default configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration stored in `signup.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Remote services the form talks to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_registration_url")]
    pub registration_url: String,
    /// Base URL of the BrasilAPI-compatible CEP service.
    #[serde(default = "default_postal_code_base_url")]
    pub postal_code_base_url: String,
}

fn default_registration_url() -> String {
    "https://apis.codante.io/api/register-user/register".to_string()
}

fn default_postal_code_base_url() -> String {
    "https://brasilapi.com.br".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            registration_url: default_registration_url(),
            postal_code_base_url: default_postal_code_base_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Ignored on wasm32, where the browser owns timeouts.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// When the form is cleared after a submission attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Clear after every completed attempt, success or failure.
    #[default]
    Always,
    /// Clear only after the endpoint accepted the registration.
    OnSuccess,
}

/// Validation and lifecycle switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    #[serde(default)]
    pub reset: ResetPolicy,
    /// Reject submissions whose address/city were never filled by the lookup.
    #[serde(default)]
    pub require_address: bool,
}

fn default_password_min_length() -> usize {
    6
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            reset: ResetPolicy::default(),
            require_address: false,
        }
    }
}

impl SignupConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "signup.toml"
    }

    /// Builder method to set the minimum password length.
    pub fn with_password_min_length(mut self, len: usize) -> Self {
        self.policy.password_min_length = len;
        self
    }

    /// Builder method to set the reset policy.
    pub fn with_reset_policy(mut self, reset: ResetPolicy) -> Self {
        self.policy.reset = reset;
        self
    }

    /// Builder method to require the derived address fields.
    pub fn with_required_address(mut self, required: bool) -> Self {
        self.policy.require_address = required;
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}
