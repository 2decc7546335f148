//! Field validation helpers
//!
//! Request payloads are validated field by field. Each check returns a
//! `SharedError::ValidationError`; `FieldErrors` collects them so a single
//! response can report every offending field at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::shared::error::SharedError;

/// Message used when a required field is absent.
pub const REQUIRED: &str = "This field is required.";

/// Message used when a required text field is empty.
pub const BLANK: &str = "This field may not be blank.";

/// Validation failures keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding exactly one error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record the error of a failed check and hand back the value of a
    /// successful one.
    pub fn check<T>(&mut self, result: Result<T, SharedError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(SharedError::ValidationError { field, message }) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<SharedError> for FieldErrors {
    fn from(err: SharedError) -> Self {
        let mut errors = Self::new();
        errors.check::<()>(Err(err));
        errors
    }
}

/// Require a present, non-blank value of at most `max_chars` characters.
pub fn required_text(field: &str, value: Option<&str>, max_chars: usize) -> Result<String, SharedError> {
    let value = value.ok_or_else(|| SharedError::validation(field, REQUIRED))?;
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, BLANK));
    }
    max_length(field, value, max_chars)?;
    Ok(value.to_string())
}

/// Accept an absent value as empty; otherwise enforce `max_chars`.
pub fn optional_text(field: &str, value: Option<&str>, max_chars: usize) -> Result<String, SharedError> {
    let value = value.unwrap_or_default();
    max_length(field, value, max_chars)?;
    Ok(value.to_string())
}

/// Character (not byte) length limit.
pub fn max_length(field: &str, value: &str, max_chars: usize) -> Result<(), SharedError> {
    if value.chars().count() > max_chars {
        return Err(SharedError::validation(
            field,
            format!("Ensure this field has no more than {} characters.", max_chars),
        ));
    }
    Ok(())
}
