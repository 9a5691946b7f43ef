//! Contact form fields and validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fields are read once per submit attempt, trimmed, and validated fail-fast.
//! Nothing is kept between attempts.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use thiserror::Error;

use crate::util::email::is_valid_email;

pub const FIELD_NAMES: [&str; 4] = ["name", "email", "subject", "message"];

/// Validation failures. `Display` is the message shown to the visitor.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    /// Read and trim the four named fields through `lookup`.
    pub fn read(lookup: impl Fn(&str) -> String) -> Self {
        let field = |name: &str| lookup(name).trim().to_owned();
        Self { name: field("name"), email: field("email"), subject: field("subject"), message: field("message") }
    }

    /// First failure wins: any blank field, then a malformed email.
    pub fn validate(&self) -> Result<(), FormError> {
        if [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|value| value.is_empty())
        {
            return Err(FormError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }
}

/// Status line styling, applied as `form-message <kind>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}
