//! The registration record and the values the form writes into it.

use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Everything the user submits when creating an account.
///
/// Serializes with the wire names the registration endpoint expects
/// (`cpf`, `zipcode`, `terms`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub phone: String,
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "zipcode")]
    pub postal_code: String,
    pub address: String,
    pub city: String,
    #[serde(rename = "terms")]
    pub terms_accepted: bool,
}

impl RegistrationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a field, `None` for the terms flag.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::PasswordConfirmation => &self.password_confirmation,
            Field::Phone => &self.phone,
            Field::NationalId => &self.national_id,
            Field::PostalCode => &self.postal_code,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::TermsAccepted => return None,
        };
        Some(value.as_str())
    }

    pub(crate) fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::PasswordConfirmation => &mut self.password_confirmation,
            Field::Phone => &mut self.phone,
            Field::NationalId => &mut self.national_id,
            Field::PostalCode => &mut self.postal_code,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::TermsAccepted => return None,
        };
        Some(value)
    }

    /// True when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A value written into a form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Street and city resolved from a postal code.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}
