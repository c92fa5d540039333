//! Field validation for inbound registrations.

use crate::types::{NewRegistration, PassType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 200;
pub const DEFAULT_VARIANT: &str = "A";

/// A registration as submitted, before validation.
///
/// Every field is optional so a missing field is reported the same way as an
/// invalid one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationDraft {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub pass_type: Option<String>,
    /// Absent and `null` both fall back to the default variant
    pub variant: Option<String>,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Submission rejected by validation. Holds at least one field error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_errors(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of the rejected fields, in submission order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl RegistrationDraft {
    /// Check every field and produce a normalized registration.
    ///
    /// All offending fields are collected rather than stopping at the first.
    pub fn validate(self) -> Result<NewRegistration, ValidationError> {
        let mut errors = Vec::new();

        let full_name = match validate_full_name(self.full_name.as_deref()) {
            Ok(name) => Some(name),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let email = match validate_email(self.email.as_deref()) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let pass_type = match validate_pass_type(self.pass_type.as_deref()) {
            Ok(pass_type) => Some(pass_type),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (full_name, email, pass_type) {
            (Some(full_name), Some(email), Some(pass_type)) => Ok(NewRegistration {
                full_name,
                email,
                pass_type,
                variant: self.variant.unwrap_or_else(|| DEFAULT_VARIANT.to_string()),
            }),
            _ => Err(ValidationError { errors }),
        }
    }
}

fn validate_full_name(value: Option<&str>) -> Result<String, FieldError> {
    let name = value
        .ok_or_else(|| FieldError::new("full_name", "field required"))?
        .trim();

    let len = name.chars().count();
    if len < MIN_NAME_LEN {
        return Err(FieldError::new(
            "full_name",
            format!("must be at least {} characters", MIN_NAME_LEN),
        ));
    }
    if len > MAX_NAME_LEN {
        return Err(FieldError::new(
            "full_name",
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }

    Ok(name.to_string())
}

fn validate_email(value: Option<&str>) -> Result<String, FieldError> {
    let email = value
        .ok_or_else(|| FieldError::new("email", "field required"))?
        .trim();

    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(FieldError::new(
            "email",
            format!("must be at most {} characters", MAX_EMAIL_LEN),
        ));
    }

    let address = email
        .parse::<lettre::Address>()
        .map_err(|e| FieldError::new("email", format!("not a valid email address: {}", e)))?;

    // Deliverable addresses need a dotted hostname, not a bare host or IP literal
    let domain = address.domain();
    if domain.starts_with('[') || !domain.contains('.') {
        return Err(FieldError::new(
            "email",
            "not a valid email address: domain must be a qualified hostname",
        ));
    }
    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(FieldError::new(
            "email",
            "not a valid email address: malformed domain",
        ));
    }

    Ok(email.to_string())
}

fn validate_pass_type(value: Option<&str>) -> Result<PassType, FieldError> {
    let raw = value.ok_or_else(|| FieldError::new("pass_type", "field required"))?;
    raw.parse::<PassType>()
        .map_err(|_| FieldError::new("pass_type", "must be one of: silver, gold, vip"))
}
