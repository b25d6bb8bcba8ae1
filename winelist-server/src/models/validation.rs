//! Validation error types

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field was not supplied at all
    Required { field: &'static str },

    /// Field is empty (after trimming) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field contains a character the database cannot store (NUL)
    InvalidCharacter { field: &'static str },
}

impl ValidationError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidCharacter { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be blank", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidCharacter { field } => {
                write!(f, "{} contains a null character", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// All validation failures for one payload, keyed by field name.
///
/// Serializes as `{"name": ["name cannot be blank"], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.entry(err.field()).or_default().push(err.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Ok if nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(err: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.push(err);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "varietal",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "varietal exceeds maximum length of 100 characters"
        );
        assert_eq!(
            ValidationError::Required { field: "price" }.to_string(),
            "price is required"
        );
        assert_eq!(
            ValidationError::InvalidCharacter { field: "name" }.to_string(),
            "name contains a null character"
        );
    }

    #[test]
    fn field_errors_group_by_field() {
        let mut errors = FieldErrors::new();
        errors.push(ValidationError::Empty { field: "name" });
        errors.push(ValidationError::Required { field: "price" });

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some(&["name cannot be blank".to_string()][..]));
        assert!(errors.get("varietal").is_none());

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["price"][0], "price is required");
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::from(ValidationError::Empty { field: "name" })
            .into_result()
            .is_err());
    }
}
