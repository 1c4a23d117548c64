//! # Registration schema: declarative field rules
//!
//! [`Schema`] holds one rule table per field: an ordered list of [`Rule`]s, each
//! with the message shown when it fails. Validation walks the table, keeps the
//! first failing rule per field, then applies the cross-field password check.
//!
//! ## Rules
//!
//! | Field | Rules |
//! |-------|-------|
//! | `name` | required, at least 3 characters |
//! | `email` | required, email pattern |
//! | `password` / `password_confirmation` | required, at least `password_min_length` characters |
//! | `phone` | required, `(DD) DDDDD-DDDD` |
//! | `cpf` | required, `DDD.DDD.DDD-DD` |
//! | `zipcode` | required, `DDDDD-DDD` |
//! | `address` / `city` | required only when [`PolicyConfig::require_address`] is set |
//! | `terms` | must be accepted |
//!
//! When the two passwords differ, "As senhas devem ser iguais" is attached to
//! `password_confirmation` whatever else failed.
//!
//! `name` and `email` are checked and returned trimmed; every other value is
//! checked exactly as typed.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PolicyConfig;
use crate::fields::Field;
use crate::record::RegistrationRecord;
use crate::validation::ValidationErrors;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email pattern")
});
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([0-9]{2}\) [0-9]{5}-[0-9]{4}$").expect("valid phone pattern"));
static CPF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("valid cpf pattern"));
static ZIPCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{3}$").expect("valid zipcode pattern"));

pub const PASSWORD_MISMATCH: &str = "As senhas devem ser iguais";

const NAME_MIN_LENGTH: usize = 3;

/// A single check on a field.
#[derive(Clone, Debug)]
pub enum Rule {
    /// Not empty once surrounding whitespace is removed.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// Fully matches the pattern.
    Pattern(Regex),
    /// The flag is set.
    Accepted,
}

impl Rule {
    fn passes(&self, value: Value<'_>) -> bool {
        match (self, value) {
            (Rule::Required, Value::Text(s)) => !s.trim().is_empty(),
            (Rule::MinLength(min), Value::Text(s)) => s.chars().count() >= *min,
            (Rule::Pattern(re), Value::Text(s)) => re.is_match(s),
            (Rule::Accepted, Value::Flag(b)) => b,
            // Text rules never target the flag and vice versa.
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Value<'a> {
    Text(&'a str),
    Flag(bool),
}

/// The rules for one field, checked in order.
#[derive(Clone, Debug)]
pub struct FieldRules {
    pub field: Field,
    pub trim: bool,
    pub rules: Vec<(Rule, String)>,
}

impl FieldRules {
    fn new(field: Field) -> Self {
        Self {
            field,
            trim: false,
            rules: Vec::new(),
        }
    }

    fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    fn rule(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.rules.push((rule, message.into()));
        self
    }

    /// Message of the first failing rule.
    pub fn first_failure(&self, record: &RegistrationRecord) -> Option<&str> {
        let value = match record.text(self.field) {
            Some(text) if self.trim => Value::Text(text.trim()),
            Some(text) => Value::Text(text),
            None => Value::Flag(record.terms_accepted),
        };
        self.rules
            .iter()
            .find(|(rule, _)| !rule.passes(value))
            .map(|(_, message)| message.as_str())
    }
}

/// Validation rules for [`RegistrationRecord`].
#[derive(Clone, Debug)]
pub struct Schema {
    table: Vec<FieldRules>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(&PolicyConfig::default())
    }
}

impl Schema {
    /// Build the rule table for the given policy.
    pub fn new(policy: &PolicyConfig) -> Self {
        let min = policy.password_min_length;

        let mut table = vec![
            FieldRules::new(Field::Name)
                .trimmed()
                .rule(Rule::Required, "O campo nome é obrigatório")
                .rule(
                    Rule::MinLength(NAME_MIN_LENGTH),
                    format!("O nome deve ter pelo menos {NAME_MIN_LENGTH} caracteres"),
                ),
            FieldRules::new(Field::Email)
                .trimmed()
                .rule(Rule::Required, "O campo email é obrigatório")
                .rule(Rule::Pattern(EMAIL.clone()), "Email inválido"),
            FieldRules::new(Field::Password)
                .rule(Rule::Required, "O campo senha é obrigatório")
                .rule(
                    Rule::MinLength(min),
                    format!("A senha deve ter pelo menos {min} caracteres"),
                ),
            FieldRules::new(Field::PasswordConfirmation)
                .rule(Rule::Required, "O campo confirmação de senha é obrigatório")
                .rule(
                    Rule::MinLength(min),
                    format!("A confirmação de senha deve ter pelo menos {min} caracteres"),
                ),
            FieldRules::new(Field::Phone)
                .rule(Rule::Required, "O campo telefone é obrigatório")
                .rule(Rule::Pattern(PHONE.clone()), "Telefone inválido."),
            FieldRules::new(Field::NationalId)
                .rule(Rule::Required, "O campo CPF é obrigatório")
                .rule(Rule::Pattern(CPF.clone()), "CPF inválido."),
            FieldRules::new(Field::PostalCode)
                .rule(Rule::Required, "O campo CEP é obrigatório")
                .rule(Rule::Pattern(ZIPCODE.clone()), "CEP inválido."),
        ];

        if policy.require_address {
            table.push(
                FieldRules::new(Field::Address).rule(Rule::Required, "O campo endereço é obrigatório"),
            );
            table.push(FieldRules::new(Field::City).rule(Rule::Required, "O campo cidade é obrigatório"));
        }

        table.push(
            FieldRules::new(Field::TermsAccepted)
                .rule(Rule::Accepted, "Os termos de uso são obrigatórios"),
        );

        Self { table }
    }

    /// The rule table, in field order.
    pub fn rules(&self) -> &[FieldRules] {
        &self.table
    }

    /// Validate a record. On success the record comes back in its submitted shape.
    pub fn validate(
        &self,
        record: &RegistrationRecord,
    ) -> Result<RegistrationRecord, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for rules in &self.table {
            if let Some(message) = rules.first_failure(record) {
                errors.add(rules.field, message);
            }
        }

        if record.password != record.password_confirmation {
            errors.add(Field::PasswordConfirmation, PASSWORD_MISMATCH);
        }

        if !errors.is_empty() {
            tracing::debug!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Registration record failed validation"
            );
            return Err(errors);
        }

        let mut validated = record.clone();
        for rules in self.table.iter().filter(|r| r.trim) {
            if let Some(value) = validated.text_mut(rules.field) {
                *value = value.trim().to_string();
            }
        }
        Ok(validated)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn valid_record() -> RegistrationRecord {
        RegistrationRecord {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            password: "segredo123".to_string(),
            password_confirmation: "segredo123".to_string(),
            phone: "(11) 98765-4321".to_string(),
            national_id: "123.456.789-01".to_string(),
            postal_code: "01310-100".to_string(),
            address: "Avenida Paulista".to_string(),
            city: "São Paulo".to_string(),
            terms_accepted: true,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        let record = valid_record();
        assert_eq!(Schema::default().validate(&record), Ok(record));
    }

    #[test]
    fn test_missing_required_fields_are_reported() {
        let schema = Schema::default();
        let required = [
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::NationalId,
            Field::PostalCode,
        ];

        for field in required {
            let mut record = valid_record();
            *record.text_mut(field).unwrap() = String::new();
            let errors = schema.validate(&record).unwrap_err();
            assert!(errors.contains(field), "{field} should be reported");
            assert_eq!(errors.fields().count(), 1, "only {field} should fail");
        }
    }

    #[test]
    fn test_whitespace_fails_required() {
        let mut record = valid_record();
        record.name = "   ".to_string();
        record.email = "\t".to_string();

        let errors = Schema::default().validate(&record).unwrap_err();
        assert_eq!(errors.first(Field::Name), Some("O campo nome é obrigatório"));
        assert_eq!(errors.first(Field::Email), Some("O campo email é obrigatório"));
    }

    #[test]
    fn test_first_failure_wins_per_field() {
        let mut record = valid_record();
        record.email = String::new();

        let errors = Schema::default().validate(&record).unwrap_err();
        assert_eq!(errors.messages(Field::Email), ["O campo email é obrigatório"]);
    }

    #[test]
    fn test_name_min_length() {
        let mut record = valid_record();
        record.name = " Al ".to_string();

        let errors = Schema::default().validate(&record).unwrap_err();
        assert_eq!(
            errors.first(Field::Name),
            Some("O nome deve ter pelo menos 3 caracteres")
        );
    }

    #[test]
    fn test_email_pattern() {
        let schema = Schema::default();
        for bad in ["maria", "maria@", "maria@example", "ma ria@example.com", "@example.com"] {
            let mut record = valid_record();
            record.email = bad.to_string();
            let errors = schema.validate(&record).unwrap_err();
            assert_eq!(errors.first(Field::Email), Some("Email inválido"), "{bad}");
        }

        let mut record = valid_record();
        record.email = "  Maria.Silva+news@Example.COM.br ".to_string();
        let validated = schema.validate(&record).unwrap();
        assert_eq!(validated.email, "Maria.Silva+news@Example.COM.br");
    }

    #[test]
    fn test_masked_patterns() {
        let schema = Schema::default();

        let mut record = valid_record();
        record.phone = "(11) 9876-4321".to_string();
        record.national_id = "12345678901".to_string();
        record.postal_code = "01310-10".to_string();

        let errors = schema.validate(&record).unwrap_err();
        assert_eq!(errors.first(Field::Phone), Some("Telefone inválido."));
        assert_eq!(errors.first(Field::NationalId), Some("CPF inválido."));
        assert_eq!(errors.first(Field::PostalCode), Some("CEP inválido."));
    }

    #[test]
    fn test_masked_patterns_reject_non_ascii_digits() {
        let mut record = valid_record();
        record.phone = "(١١) ٩٨٧٦٥-٤٣٢١".to_string();
        record.national_id = "١٢٣.٤٥٦.٧٨٩-٠١".to_string();
        record.postal_code = "０１３１０-１００".to_string();

        let errors = Schema::default().validate(&record).unwrap_err();
        assert_eq!(errors.first(Field::Phone), Some("Telefone inválido."));
        assert_eq!(errors.first(Field::NationalId), Some("CPF inválido."));
        assert_eq!(errors.first(Field::PostalCode), Some("CEP inválido."));
    }

    #[test]
    fn test_password_mismatch_on_confirmation() {
        let mut record = valid_record();
        record.password_confirmation = "outrasenha".to_string();

        let errors = Schema::default().validate(&record).unwrap_err();
        assert!(!errors.contains(Field::Password));
        assert_eq!(errors.messages(Field::PasswordConfirmation), [PASSWORD_MISMATCH]);
    }

    #[test]
    fn test_password_mismatch_regardless_of_other_failures() {
        let mut record = valid_record();
        record.password = "abc".to_string();
        record.password_confirmation = String::new();
        record.terms_accepted = false;

        let errors = Schema::default().validate(&record).unwrap_err();
        assert_eq!(
            errors.first(Field::Password),
            Some("A senha deve ter pelo menos 6 caracteres")
        );
        assert_eq!(
            errors.messages(Field::PasswordConfirmation),
            ["O campo confirmação de senha é obrigatório", PASSWORD_MISMATCH]
        );
    }

    #[test]
    fn test_password_min_length_policy() {
        let mut record = valid_record();
        record.password = "seis66".to_string();
        record.password_confirmation = "seis66".to_string();

        assert!(Schema::default().validate(&record).is_ok());

        let strict = Schema::new(&PolicyConfig {
            password_min_length: 8,
            ..Default::default()
        });
        let errors = strict.validate(&record).unwrap_err();
        assert_eq!(
            errors.first(Field::Password),
            Some("A senha deve ter pelo menos 8 caracteres")
        );
        assert!(errors.contains(Field::PasswordConfirmation));
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let mut record = valid_record();
        record.terms_accepted = false;

        let errors = Schema::default().validate(&record).unwrap_err();
        assert_eq!(
            errors.first(Field::TermsAccepted),
            Some("Os termos de uso são obrigatórios")
        );
    }

    #[test]
    fn test_address_optional_by_default() {
        let mut record = valid_record();
        record.address = String::new();
        record.city = String::new();
        assert!(Schema::default().validate(&record).is_ok());

        let strict = Schema::new(&PolicyConfig {
            require_address: true,
            ..Default::default()
        });
        let errors = strict.validate(&record).unwrap_err();
        assert_eq!(errors.first(Field::Address), Some("O campo endereço é obrigatório"));
        assert_eq!(errors.first(Field::City), Some("O campo cidade é obrigatório"));
    }

    #[test]
    fn test_empty_record_reports_every_required_field() {
        let errors = Schema::default()
            .validate(&RegistrationRecord::new())
            .unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                Field::Name,
                Field::Email,
                Field::Password,
                Field::PasswordConfirmation,
                Field::Phone,
                Field::NationalId,
                Field::PostalCode,
                Field::TermsAccepted,
            ]
        );
    }
}
