//! # Signup — validation and submission pipeline for the registration form
//!
//! Everything the registration form does besides drawing pixels: the record and its
//! rules, the controller that owns form state, and the two remote calls (CEP lookup
//! and account registration). The crate has no UI dependency and builds for both
//! native targets and `wasm32`; the `web` crate binds it to Dioxus components.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`fields`] | [`Field`] identifiers with wire names, labels and masks |
//! | [`record`] | [`RegistrationRecord`] and the values written into it |
//! | [`mask`] | Digit masks for phone, CPF and CEP inputs |
//! | [`schema`] | Declarative per-field rule tables and the password-match check |
//! | [`validation`] | [`ValidationErrors`], shared by local and server-reported errors |
//! | [`controller`] | [`FormController`], the single owner of form state |
//! | [`lookup`] | [`PostalCodeLookup`] and the BrasilAPI client |
//! | [`registration`] | [`RegistrationService`] and the JSON/HTTP client |
//! | [`notify`] | [`Notifier`] and the success/failure notices |
//! | [`coordinator`] | [`SubmissionCoordinator`], which runs the remote calls against a controller |
//! | [`config`] | [`SignupConfig`], loaded from `signup.toml` |
//!
//! ## Flow
//!
//! 1. Input goes through [`FormController::set_field`]. A complete CEP yields a
//!    [`LookupTicket`]; the coordinator resolves it and the controller applies the
//!    address only if the CEP is unchanged.
//! 2. On submit, [`FormController::begin_submit`] validates. Errors stay on the form.
//! 3. A valid record is sent by [`SubmissionCoordinator::deliver`];
//!    [`SubmissionCoordinator::conclude`] shows one notice, resets the form per
//!    [`ResetPolicy`], and merges any server field errors.

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod fields;
pub mod http;
pub mod logging;
pub mod lookup;
pub mod mask;
pub mod notify;
pub mod record;
pub mod registration;
pub mod schema;
pub mod validation;

pub use config::{ResetPolicy, SignupConfig};
pub use controller::{FormController, LookupTicket};
pub use coordinator::{SubmissionCoordinator, SubmitOutcome};
pub use error::{ConfigError, FormError, LookupError, SubmitError};
pub use fields::Field;
pub use lookup::{BrasilApiClient, PostalCodeLookup};
pub use mask::Mask;
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use record::{Address, FieldValue, RegistrationRecord};
pub use registration::{HttpRegistrationClient, RegistrationService};
pub use schema::Schema;
pub use validation::ValidationErrors;

/// Coordinator wired to the real HTTP services.
pub type HttpCoordinator<N> = SubmissionCoordinator<BrasilApiClient, HttpRegistrationClient, N>;

/// Build a coordinator for the configured endpoints.
pub fn http_coordinator<N: Notifier>(
    config: &SignupConfig,
    notifier: N,
) -> Result<HttpCoordinator<N>, reqwest::Error> {
    let client = http::client(&config.http)?;
    Ok(SubmissionCoordinator::new(
        BrasilApiClient::with_client(client.clone(), config.endpoints.postal_code_base_url.clone()),
        HttpRegistrationClient::with_client(client, config.endpoints.registration_url.clone()),
        notifier,
    ))
}
