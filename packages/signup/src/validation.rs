//! Per-field error messages shown next to the form inputs.
//!
//! Local schema failures and errors reported by the registration endpoint land
//! in the same [`ValidationErrors`], so the front end renders both the same way.
//! Server keys that do not name a form field are kept as form-level messages.

use std::collections::BTreeMap;

use crate::fields::Field;

/// Mapping from field to the messages currently attached to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, Vec<String>>,
    form: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a server `errors` payload keyed by wire names.
    pub fn from_server<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut set = Self::new();
        for (key, messages) in errors {
            match key.parse::<Field>() {
                Ok(field) => {
                    for message in messages {
                        set.add(field, message);
                    }
                }
                Err(_) => {
                    tracing::warn!(key = %key, "Server reported an error for an unknown field");
                    set.form.extend(messages);
                }
            }
        }
        set
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// All messages for a field, empty when the field is valid.
    pub fn messages(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The message the front end shows under the input.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    /// Messages not tied to any field.
    pub fn form_messages(&self) -> &[String] {
        &self.form
    }

    /// Fields that currently carry at least one message.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    pub fn clear_field(&mut self, field: Field) {
        self.fields.remove(&field);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.form.clear();
    }

    /// Append every message of `other`, keeping existing ones.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
        self.form.extend(other.form);
    }
}
