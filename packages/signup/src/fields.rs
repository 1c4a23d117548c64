//! Field identifiers for the registration form.
//!
//! Every field has a stable wire name (the key used in the JSON body sent to the
//! registration endpoint and in the `errors` map it returns) and a placeholder
//! label shown by the front end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mask::Mask;

/// A field of the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    PasswordConfirmation,
    Phone,
    #[serde(rename = "cpf")]
    NationalId,
    #[serde(rename = "zipcode")]
    PostalCode,
    Address,
    City,
    #[serde(rename = "terms")]
    TermsAccepted,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::PasswordConfirmation,
        Field::Phone,
        Field::NationalId,
        Field::PostalCode,
        Field::Address,
        Field::City,
        Field::TermsAccepted,
    ];

    /// Key used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "password_confirmation",
            Field::Phone => "phone",
            Field::NationalId => "cpf",
            Field::PostalCode => "zipcode",
            Field::Address => "address",
            Field::City => "city",
            Field::TermsAccepted => "terms",
        }
    }

    /// Placeholder text for the input bound to this field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Nome Completo",
            Field::Email => "E-mail",
            Field::Password => "Senha",
            Field::PasswordConfirmation => "Confirmar Senha",
            Field::Phone => "Celular",
            Field::NationalId => "CPF",
            Field::PostalCode => "CEP",
            Field::Address => "Endereço",
            Field::City => "Cidade",
            Field::TermsAccepted => "Aceito os termos e condições",
        }
    }

    /// Derived fields are filled by the postal-code lookup, never by the user.
    pub fn is_derived(&self) -> bool {
        matches!(self, Field::Address | Field::City)
    }

    /// Whether the field holds a boolean rather than text.
    pub fn is_flag(&self) -> bool {
        matches!(self, Field::TermsAccepted)
    }

    /// Input mask applied to raw keystrokes, if any.
    pub fn mask(&self) -> Option<Mask> {
        match self {
            Field::Phone => Some(Mask::PHONE),
            Field::NationalId => Some(Mask::CPF),
            Field::PostalCode => Some(Mask::ZIPCODE),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A wire key that does not name any form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_parse_wire_name() {
        assert_eq!("cpf".parse::<Field>(), Ok(Field::NationalId));
        assert_eq!("zipcode".parse::<Field>(), Ok(Field::PostalCode));
        assert_eq!(
            "password_confirmation".parse::<Field>(),
            Ok(Field::PasswordConfirmation)
        );
        assert_eq!(
            "server".parse::<Field>(),
            Err(UnknownField("server".to_string()))
        );
    }

    #[test]
    fn test_derived_and_masked_fields() {
        assert!(Field::Address.is_derived());
        assert!(Field::City.is_derived());
        assert!(!Field::PostalCode.is_derived());
        assert!(Field::PostalCode.mask().is_some());
        assert!(Field::Email.mask().is_none());
        assert!(Field::TermsAccepted.is_flag());
    }
}
