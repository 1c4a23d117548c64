//! # Form controller: the single owner of form state
//!
//! [`FormController`] holds the [`RegistrationRecord`] being edited, the current
//! [`ValidationErrors`], the shared password-visibility flag and the submitting
//! flag. The front end keeps exactly one controller (a `Signal<FormController>`
//! in the web crate) and mutates it only through the methods below.
//!
//! ## Editing
//!
//! [`set_field`](FormController::set_field) masks phone/CPF/CEP input, clears the
//! edited field's errors, and refuses writes to the derived `address`/`city`. When
//! the CEP changes to a complete 8-digit code it hands back a [`LookupTicket`]; the result is
//! applied with [`apply_address`](FormController::apply_address) only while the CEP
//! still carries the ticket's digits, so a slow answer for an older CEP never
//! overwrites a newer one.
//!
//! ## Submitting
//!
//! [`begin_submit`](FormController::begin_submit) validates the record; invalid
//! input only updates the errors. A valid record is returned for delivery and the
//! form is marked as submitting until [`finish_submit`](FormController::finish_submit)
//! applies the reset policy and merges any server-side field errors.

use crate::config::{ResetPolicy, SignupConfig};
use crate::error::{FormError, SubmitError};
use crate::fields::Field;
use crate::mask;
use crate::record::{Address, FieldValue, RegistrationRecord};
use crate::schema::Schema;
use crate::validation::ValidationErrors;

/// Number of digits in a complete CEP.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// A pending postal-code lookup, keyed by the CEP digits that triggered it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    postal_code: String,
}

impl LookupTicket {
    /// Ticket for `value` if it holds exactly 8 digits once non-digits are stripped.
    pub fn for_postal_code(value: &str) -> Option<Self> {
        let postal_code = mask::digits(value);
        (postal_code.len() == POSTAL_CODE_DIGITS).then_some(Self { postal_code })
    }

    /// The 8 digits to look up.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

/// Owns the values and errors of one registration form session.
#[derive(Clone, Debug)]
pub struct FormController {
    schema: Schema,
    reset_policy: ResetPolicy,
    record: RegistrationRecord,
    errors: ValidationErrors,
    password_visible: bool,
    submitting: bool,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(&SignupConfig::default())
    }
}

impl PartialEq for FormController {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
            && self.errors == other.errors
            && self.password_visible == other.password_visible
            && self.submitting == other.submitting
    }
}

impl FormController {
    pub fn new(config: &SignupConfig) -> Self {
        Self {
            schema: Schema::new(&config.policy),
            reset_policy: config.policy.reset,
            record: RegistrationRecord::new(),
            errors: ValidationErrors::new(),
            password_visible: false,
            submitting: false,
        }
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    /// Current text of a field; empty for the terms flag.
    pub fn value(&self, field: Field) -> &str {
        self.record.text(field).unwrap_or_default()
    }

    pub fn terms_accepted(&self) -> bool {
        self.record.terms_accepted
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Message to display under a field.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.first(field)
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    /// Show or hide both password inputs.
    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Update a field from user input.
    ///
    /// Returns a ticket when the edit should trigger a postal-code lookup.
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<FieldValue>,
    ) -> Result<Option<LookupTicket>, FormError> {
        if field.is_derived() {
            return Err(FormError::ReadOnly(field));
        }

        let previous_postal_code = mask::digits(&self.record.postal_code);
        match value.into() {
            FieldValue::Flag(accepted) if field.is_flag() => self.record.terms_accepted = accepted,
            FieldValue::Text(text) => {
                let Some(slot) = self.record.text_mut(field) else {
                    return Err(FormError::WrongKind(field));
                };
                *slot = match field.mask() {
                    Some(mask) => mask.apply(&text),
                    None => text,
                };
            }
            FieldValue::Flag(_) => return Err(FormError::WrongKind(field)),
        }
        self.errors.clear_field(field);

        if field != Field::PostalCode || mask::digits(&self.record.postal_code) == previous_postal_code {
            return Ok(None);
        }
        let ticket = LookupTicket::for_postal_code(&self.record.postal_code);
        if let Some(ticket) = &ticket {
            tracing::debug!(postal_code = %ticket.postal_code(), "Postal code complete, lookup requested");
        }
        Ok(ticket)
    }

    /// Fill address and city from a lookup, unless the CEP changed since the ticket was issued.
    pub fn apply_address(&mut self, ticket: &LookupTicket, address: Address) -> bool {
        if mask::digits(&self.record.postal_code) != ticket.postal_code {
            tracing::debug!(
                postal_code = %ticket.postal_code(),
                "Discarding lookup result for a postal code no longer in the form"
            );
            return false;
        }

        self.record.address = address.street;
        self.record.city = address.city;
        self.errors.clear_field(Field::Address);
        self.errors.clear_field(Field::City);
        true
    }

    /// Validate the record for submission.
    ///
    /// Invalid input replaces the current errors and yields `None`. A valid record
    /// clears the errors, marks the form as submitting, and is returned for delivery.
    pub fn begin_submit(&mut self) -> Option<RegistrationRecord> {
        if self.submitting {
            tracing::debug!("Submission already in flight");
            return None;
        }

        match self.schema.validate(&self.record) {
            Ok(validated) => {
                self.errors.clear();
                self.submitting = true;
                Some(validated)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Merge errors reported by the registration endpoint.
    pub fn apply_server_errors(&mut self, errors: ValidationErrors) {
        self.errors.merge(errors);
    }

    /// Close a submission attempt: apply the reset policy, then surface server field errors.
    pub fn finish_submit(&mut self, result: &Result<(), SubmitError>) {
        self.submitting = false;

        if result.is_ok() || self.reset_policy == ResetPolicy::Always {
            self.reset();
        }
        if let Some(errors) = result.as_ref().err().and_then(SubmitError::field_errors) {
            self.apply_server_errors(errors.clone());
        }
    }

    /// Clear values, errors, and flags back to a freshly mounted form.
    pub fn reset(&mut self) {
        self.record = RegistrationRecord::new();
        self.errors.clear();
        self.password_visible = false;
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::tests::unbuildable_request;
    use crate::schema::tests::valid_record;

    fn filled_form(config: &SignupConfig) -> FormController {
        let record = valid_record();
        let mut form = FormController::new(config);
        for field in Field::ALL {
            if field.is_derived() {
                continue;
            }
            let value: FieldValue = match record.text(field) {
                Some(text) => text.into(),
                None => record.terms_accepted.into(),
            };
            form.set_field(field, value).unwrap();
        }
        form
    }

    fn rejected_email() -> Result<(), SubmitError> {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Email, "Email já cadastrado");
        Err(SubmitError::Rejected {
            status: 422,
            errors,
        })
    }

    #[test]
    fn test_set_field_masks_input() {
        let mut form = FormController::default();
        form.set_field(Field::Phone, "11987654321").unwrap();
        form.set_field(Field::NationalId, "12345678901").unwrap();
        form.set_field(Field::Name, "Maria").unwrap();

        assert_eq!(form.value(Field::Phone), "(11) 98765-4321");
        assert_eq!(form.value(Field::NationalId), "123.456.789-01");
        assert_eq!(form.value(Field::Name), "Maria");
    }

    #[test]
    fn test_set_field_rejects_derived_and_wrong_kind() {
        let mut form = FormController::default();
        assert_eq!(
            form.set_field(Field::Address, "Rua A"),
            Err(FormError::ReadOnly(Field::Address))
        );
        assert_eq!(
            form.set_field(Field::TermsAccepted, "yes"),
            Err(FormError::WrongKind(Field::TermsAccepted))
        );
        assert_eq!(
            form.set_field(Field::Email, true),
            Err(FormError::WrongKind(Field::Email))
        );
        assert!(form.record().is_empty());
    }

    #[test]
    fn test_lookup_triggered_only_at_eight_digits() {
        let mut form = FormController::default();
        for partial in ["", "0", "0131", "01310-10", "abc"] {
            assert_eq!(form.set_field(Field::PostalCode, partial), Ok(None), "{partial}");
        }

        let ticket = form.set_field(Field::PostalCode, "01310100").unwrap().unwrap();
        assert_eq!(ticket.postal_code(), "01310100");
        assert_eq!(form.value(Field::PostalCode), "01310-100");

        // Extra digits are dropped by the mask, so the code is unchanged.
        assert_eq!(form.set_field(Field::PostalCode, "01310-1009"), Ok(None));
        assert_eq!(form.value(Field::PostalCode), "01310-100");
    }

    #[test]
    fn test_lookup_reissued_only_when_code_changes() {
        let mut form = FormController::default();
        assert!(form.set_field(Field::PostalCode, "01310-100").unwrap().is_some());
        assert_eq!(form.set_field(Field::PostalCode, "01310-100"), Ok(None));

        assert_eq!(form.set_field(Field::PostalCode, "01310-10"), Ok(None));
        let ticket = form.set_field(Field::PostalCode, "01310-100").unwrap().unwrap();
        assert_eq!(ticket.postal_code(), "01310100");
    }

    #[test]
    fn test_ticket_for_postal_code() {
        assert!(LookupTicket::for_postal_code("01310-100").is_some());
        assert!(LookupTicket::for_postal_code("1310-100").is_none());
        assert!(LookupTicket::for_postal_code("013101000").is_none());
    }

    #[test]
    fn test_apply_address_for_current_code() {
        let mut form = FormController::default();
        let ticket = form.set_field(Field::PostalCode, "01310-100").unwrap().unwrap();

        let applied = form.apply_address(
            &ticket,
            Address {
                street: "Rua A".to_string(),
                city: "City B".to_string(),
            },
        );
        assert!(applied);
        assert_eq!(form.value(Field::Address), "Rua A");
        assert_eq!(form.value(Field::City), "City B");
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let mut form = FormController::default();
        let first = form.set_field(Field::PostalCode, "01310-100").unwrap().unwrap();
        let second = form.set_field(Field::PostalCode, "20040-002").unwrap().unwrap();

        assert!(form.apply_address(
            &second,
            Address {
                street: "Avenida Rio Branco".to_string(),
                city: "Rio de Janeiro".to_string(),
            },
        ));
        assert!(!form.apply_address(
            &first,
            Address {
                street: "Avenida Paulista".to_string(),
                city: "São Paulo".to_string(),
            },
        ));

        assert_eq!(form.value(Field::Address), "Avenida Rio Branco");
        assert_eq!(form.value(Field::City), "Rio de Janeiro");
    }

    #[test]
    fn test_invalid_submit_sets_errors_only() {
        let mut form = FormController::default();
        form.set_field(Field::Name, "Maria").unwrap();

        assert!(form.begin_submit().is_none());
        assert!(!form.is_submitting());
        assert!(form.error(Field::Email).is_some());
        assert!(form.error(Field::Name).is_none());
        assert_eq!(form.value(Field::Name), "Maria");
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut form = FormController::default();
        assert!(form.begin_submit().is_none());
        assert!(form.error(Field::Email).is_some());

        form.set_field(Field::Email, "m").unwrap();
        assert!(form.error(Field::Email).is_none());
        assert!(form.error(Field::Name).is_some());
    }

    #[test]
    fn test_valid_submit_returns_record() {
        let mut form = filled_form(&SignupConfig::default());
        let record = form.begin_submit().unwrap();

        assert_eq!(record.email, "maria@example.com");
        assert!(form.is_submitting());
        assert!(form.errors().is_empty());
        assert!(form.begin_submit().is_none(), "no second submission while in flight");
    }

    #[test]
    fn test_finish_success_resets() {
        let mut form = filled_form(&SignupConfig::default());
        form.toggle_password_visibility();
        form.begin_submit().unwrap();

        form.finish_submit(&Ok(()));
        assert_eq!(form, FormController::default());
    }

    #[test]
    fn test_finish_rejection_resets_and_keeps_server_errors() {
        let mut form = filled_form(&SignupConfig::default());
        form.begin_submit().unwrap();

        form.finish_submit(&rejected_email());
        assert!(form.record().is_empty());
        assert!(!form.is_submitting());
        assert_eq!(form.error(Field::Email), Some("Email já cadastrado"));
    }

    #[test]
    fn test_on_success_policy_keeps_values_after_failure() {
        let config = SignupConfig::default().with_reset_policy(ResetPolicy::OnSuccess);
        let mut form = filled_form(&config);
        form.begin_submit().unwrap();

        form.finish_submit(&Err(SubmitError::from(unbuildable_request())));
        assert_eq!(form.record(), &valid_record_without_address());
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
    }

    fn valid_record_without_address() -> RegistrationRecord {
        RegistrationRecord {
            address: String::new(),
            city: String::new(),
            ..valid_record()
        }
    }

    #[test]
    fn test_password_visibility_is_shared() {
        let mut form = FormController::default();
        assert!(!form.password_visible());
        form.toggle_password_visibility();
        assert!(form.password_visible());
        form.reset();
        assert!(!form.password_visible());
    }
}
