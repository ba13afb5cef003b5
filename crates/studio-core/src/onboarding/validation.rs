//! Synchronous field-level validation for wizard forms.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// A validation message attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects field errors while a form is checked.
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: Vec<FieldError>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors
                .push(FieldError::new(field, format!("{} is required", label(field))));
        }
        self
    }

    /// Skips the length check for empty values; pair with `required` when needed.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len > 0 && len < min {
            self.errors.push(FieldError::new(
                field,
                format!("{} must be at least {} characters", label(field), min),
            ));
        }
        self
    }

    /// Skips empty values; pair with `required` when needed.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && !is_valid_email(value) {
            self.errors
                .push(FieldError::new(field, "Please enter a valid email address"));
        }
        self
    }

    /// Run a nested validator for list items, prefixing fields with `prefix[index].`.
    pub fn nested(&mut self, prefix: &str, index: usize, errors: Vec<FieldError>) -> &mut Self {
        self.errors.extend(errors.into_iter().map(|e| FieldError {
            field: format!("{}[{}].{}", prefix, index, e.field),
            message: e.message,
        }));
        self
    }

    pub fn push(&mut self, error: FieldError) -> &mut Self {
        self.errors.push(error);
        self
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
