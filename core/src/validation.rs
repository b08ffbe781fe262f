//! Client-side form validation.
//!
//! Runs before a request is built: a form with any error never reaches the
//! network. All field errors are collected in one pass so a form screen can
//! mark every offending field at once.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"));

static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("static regex"));

const MIN_PHONE_DIGITS: usize = 10;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field error found in one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Accumulates field errors for one form.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        // First error per field wins.
        if self.errors.for_field(field).is_none() {
            self.errors.errors.push(FieldError {
                field: field.to_string(),
                message: message.into(),
            });
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.reject(field, format!("{field} is required"));
        }
        self
    }

    pub fn date(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && parse_date(value).is_none() {
            self.reject(field, format!("{field} must be a date in YYYY-MM-DD format"));
        }
        self
    }

    pub fn required_date(&mut self, field: &str, value: &str) -> &mut Self {
        self.required(field, value).date(field, value)
    }

    pub fn optional_date(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => self.date(field, v),
            None => self,
        }
    }

    pub fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && !is_valid_phone(value) {
            self.reject(field, format!("{field} must be a phone number with at least {MIN_PHONE_DIGITS} digits"));
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                self.reject(field, format!("{field} must not be negative"));
            }
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        if let Some(v) = value {
            if !v.is_finite() || v <= 0.0 {
                self.reject(field, format!("{field} must be greater than zero"));
            }
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !DATE_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    PHONE_CHARS.is_match(value) && phone_digits(value).len() >= MIN_PHONE_DIGITS
}

pub(crate) fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
