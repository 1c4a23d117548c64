//! # Submission coordinator: the two network-bound behaviours of the form
//!
//! [`SubmissionCoordinator`] ties a [`PostalCodeLookup`], a [`RegistrationService`]
//! and a [`Notifier`] to a [`FormController`]. It never touches form state directly;
//! everything goes through the controller's methods.
//!
//! ## Postal-code autofill
//!
//! [`resolve`](SubmissionCoordinator::resolve) runs the lookup for a
//! [`LookupTicket`] and swallows every failure (logged at `warn`). The caller hands
//! the result to [`FormController::apply_address`], which drops it if the CEP has
//! changed meanwhile. [`autofill`](SubmissionCoordinator::autofill) does both steps
//! for callers that can hold the controller across the request.
//!
//! ## Submission
//!
//! | Step | Method |
//! |------|--------|
//! | validate, mark submitting | [`FormController::begin_submit`] |
//! | send | [`deliver`](SubmissionCoordinator::deliver) |
//! | notify once, reset, merge server errors | [`conclude`](SubmissionCoordinator::conclude) |
//!
//! [`submit`](SubmissionCoordinator::submit) chains the three. UI code that cannot
//! keep the controller borrowed across an `await` calls them one by one.

use crate::controller::{FormController, LookupTicket};
use crate::error::SubmitError;
use crate::logging::SanitizedEmail;
use crate::lookup::PostalCodeLookup;
use crate::notify::{self, Notice, Notifier};
use crate::record::{Address, RegistrationRecord};
use crate::registration::RegistrationService;

/// How a submission attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The endpoint accepted the registration.
    Registered,
    /// The endpoint answered with an error status.
    Rejected,
    /// No response was received.
    Failed,
}

impl SubmitOutcome {
    fn of(result: &Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => SubmitOutcome::Registered,
            Err(SubmitError::Rejected { .. }) => SubmitOutcome::Rejected,
            Err(SubmitError::Transport(_)) => SubmitOutcome::Failed,
        }
    }

    fn notice(&self) -> Option<Notice> {
        match self {
            SubmitOutcome::Invalid => None,
            SubmitOutcome::Registered => Some(Notice::success(notify::REGISTERED)),
            SubmitOutcome::Rejected => Some(Notice::error(notify::REJECTED)),
            SubmitOutcome::Failed => Some(Notice::error(notify::UNEXPECTED)),
        }
    }
}

/// Issues the form's network requests and reconciles their results.
#[derive(Clone, Debug)]
pub struct SubmissionCoordinator<L, R, N> {
    lookup: L,
    registration: R,
    notifier: N,
}

impl<L, R, N> SubmissionCoordinator<L, R, N>
where
    L: PostalCodeLookup,
    R: RegistrationService,
    N: Notifier,
{
    pub fn new(lookup: L, registration: R, notifier: N) -> Self {
        Self {
            lookup,
            registration,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Look up the ticket's postal code; failures degrade to `None`.
    pub async fn resolve(&self, ticket: &LookupTicket) -> Option<Address> {
        match self.lookup.lookup(ticket.postal_code()).await {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::warn!(
                    postal_code = %ticket.postal_code(),
                    error = %e,
                    "Postal-code lookup failed, leaving address empty"
                );
                None
            }
        }
    }

    /// Resolve and apply in one go. Returns whether the form was updated.
    pub async fn autofill(&self, form: &mut FormController, ticket: LookupTicket) -> bool {
        match self.resolve(&ticket).await {
            Some(address) => form.apply_address(&ticket, address),
            None => false,
        }
    }

    /// Send a validated record to the registration endpoint.
    pub async fn deliver(&self, record: &RegistrationRecord) -> Result<(), SubmitError> {
        let email = SanitizedEmail::new(&record.email);
        tracing::info!(email = %email, "Submitting registration");

        let result = self.registration.register(record).await;
        match &result {
            Ok(()) => tracing::info!(email = %email, "Registration accepted"),
            Err(SubmitError::Rejected { status, errors }) => tracing::warn!(
                email = %email,
                status,
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Registration rejected"
            ),
            Err(e @ SubmitError::Transport(_)) => {
                tracing::error!(email = %email, error = %e, "Registration request failed")
            }
        }
        result
    }

    /// Finish an attempt: show exactly one notice, then let the form apply its reset policy.
    pub fn conclude(
        &self,
        form: &mut FormController,
        result: Result<(), SubmitError>,
    ) -> SubmitOutcome {
        let outcome = SubmitOutcome::of(&result);
        if let Some(notice) = outcome.notice() {
            self.notifier.notify(notice);
        }
        form.finish_submit(&result);
        outcome
    }

    /// Validate, send, and conclude.
    pub async fn submit(&self, form: &mut FormController) -> SubmitOutcome {
        let Some(record) = form.begin_submit() else {
            return SubmitOutcome::Invalid;
        };
        let result = self.deliver(&record).await;
        self.conclude(form, result)
    }
}
