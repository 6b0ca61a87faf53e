//! Client-side order validation.
//!
//! Rules are applied synchronously before any network call. Errors are
//! field-scoped: each failing field gets exactly one [`FieldError`], and
//! `comment` is never checked.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;
use crate::order::{OrderField, OrderSubmission};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Digits, whitespace, `+`, `-`, `(` and `)`.
pub const PHONE_PATTERN: &str = r"^[0-9\s+\-()]+$";

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NAME_REQUIRED: &str = "Пожалуйста, введите ваше имя";
pub const MSG_PHONE_REQUIRED: &str = "Пожалуйста, введите номер телефона";
pub const MSG_PHONE_INVALID: &str = "Введите корректный номер телефона";
pub const MSG_EMAIL_REQUIRED: &str = "Пожалуйста, введите email";
pub const MSG_EMAIL_INVALID: &str = "Введите корректный email адрес";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldErrorCode {
    Required,
    InvalidFormat,
}

/// A single field-level rule violation with its display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: FieldErrorCode,
    pub message: &'static str,
}

impl FieldError {
    fn required(message: &'static str) -> Self {
        Self {
            code: FieldErrorCode::Required,
            message,
        }
    }

    fn invalid(message: &'static str) -> Self {
        Self {
            code: FieldErrorCode::InvalidFormat,
            message,
        }
    }
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    valid: bool,
    errors: BTreeMap<OrderField, FieldError>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::from_errors(BTreeMap::new())
    }
}

impl ValidationReport {
    fn from_errors(errors: BTreeMap<OrderField, FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error(&self, field: OrderField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &BTreeMap<OrderField, FieldError> {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Drop the error for one field. Returns `true` if there was one.
    pub fn clear(&mut self, field: OrderField) -> bool {
        let removed = self.errors.remove(&field).is_some();
        self.valid = self.errors.is_empty();
        removed
    }

    pub fn into_result(self) -> Result<(), CoreError> {
        if self.valid {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn check_name(name: &str) -> Option<FieldError> {
    is_blank(name).then(|| FieldError::required(MSG_NAME_REQUIRED))
}

pub fn check_phone(phone: &str) -> Option<FieldError> {
    if is_blank(phone) {
        Some(FieldError::required(MSG_PHONE_REQUIRED))
    } else if !PHONE_RE.is_match(phone) {
        Some(FieldError::invalid(MSG_PHONE_INVALID))
    } else {
        None
    }
}

pub fn check_email(email: &str) -> Option<FieldError> {
    if is_blank(email) {
        Some(FieldError::required(MSG_EMAIL_REQUIRED))
    } else if !EMAIL_RE.is_match(email) {
        Some(FieldError::invalid(MSG_EMAIL_INVALID))
    } else {
        None
    }
}

/// Validate every field of a submission.
pub fn validate(submission: &OrderSubmission) -> ValidationReport {
    let checks = [
        (OrderField::Name, check_name(&submission.name)),
        (OrderField::Phone, check_phone(&submission.phone)),
        (OrderField::Email, check_email(&submission.email)),
    ];

    let errors = checks
        .into_iter()
        .filter_map(|(field, err)| err.map(|e| (field, e)))
        .collect();

    ValidationReport::from_errors(errors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
