//! Redaction helpers so personal data never reaches the log in clear.

use std::fmt;

/// Email with the local part masked: `maria@example.com` logs as `m***@example.com`.
#[derive(Debug, Clone)]
pub struct SanitizedEmail(String);

impl SanitizedEmail {
    pub fn new(email: &str) -> Self {
        Self(Self::sanitize(email.trim()))
    }

    fn sanitize(email: &str) -> String {
        match email.split_once('@') {
            Some((local, domain)) => {
                let masked = match local.chars().next() {
                    Some(first) if local.chars().count() > 2 => format!("{first}***"),
                    _ => "*".repeat(local.chars().count()),
                };
                format!("{masked}@{domain}")
            }
            None => "***@***".to_string(),
        }
    }
}

impl fmt::Display for SanitizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
