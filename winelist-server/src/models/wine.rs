//! Wine input validation
//!
//! Request bodies deserialize into [`WinePayload`], where every field is
//! optional. Validation turns a payload into either a [`NewWine`] (all
//! fields required, used by create and full update) or a [`WinePatch`]
//! (fields optional, used by partial update).
//!
//! Rules shared by both:
//! - Surrounding whitespace is trimmed
//! - A value that is empty after trimming is rejected
//! - `name`, `price` and `varietal` are limited to [`MAX_SHORT_TEXT_LEN`] characters
//! - `description` has no length limit
//! - NUL characters are rejected in every field
//!
//! `id` and `created_at` are server-assigned and never read from input.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use super::{FieldErrors, ValidationError};

/// Maximum length for the short text columns (`VARCHAR(100)`)
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Raw wine fields as sent by a client (JSON or form encoded).
///
/// Unknown keys, including `id` and `created_at`, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WinePayload {
    #[serde(default, deserialize_with = "text_value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub varietal: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub description: Option<String>,
}

/// A fully validated wine, ready to insert or to replace an existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWine {
    pub name: String,
    pub price: String,
    pub varietal: String,
    pub description: String,
}

impl NewWine {
    /// Validate a payload where every field is required.
    pub fn validate(payload: WinePayload) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required(&mut errors, "name", payload.name, Some(MAX_SHORT_TEXT_LEN));
        let price = required(&mut errors, "price", payload.price, Some(MAX_SHORT_TEXT_LEN));
        let varietal = required(
            &mut errors,
            "varietal",
            payload.varietal,
            Some(MAX_SHORT_TEXT_LEN),
        );
        let description = required(&mut errors, "description", payload.description, None);

        match (name, price, varietal, description) {
            (Some(name), Some(price), Some(varietal), Some(description)) if errors.is_empty() => {
                Ok(Self {
                    name,
                    price,
                    varietal,
                    description,
                })
            }
            _ => Err(errors),
        }
    }
}

/// A validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinePatch {
    pub name: Option<String>,
    pub price: Option<String>,
    pub varietal: Option<String>,
    pub description: Option<String>,
}

impl WinePatch {
    /// Validate only the fields that are present.
    pub fn validate(payload: WinePayload) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let patch = Self {
            name: optional(&mut errors, "name", payload.name, Some(MAX_SHORT_TEXT_LEN)),
            price: optional(&mut errors, "price", payload.price, Some(MAX_SHORT_TEXT_LEN)),
            varietal: optional(
                &mut errors,
                "varietal",
                payload.varietal,
                Some(MAX_SHORT_TEXT_LEN),
            ),
            description: optional(&mut errors, "description", payload.description, None),
        };

        errors.into_result().map(|()| patch)
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.varietal.is_none()
            && self.description.is_none()
    }
}

fn required(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<String>,
    max: Option<usize>,
) -> Option<String> {
    match value {
        Some(value) => check(errors, field, value, max),
        None => {
            errors.push(ValidationError::Required { field });
            None
        }
    }
}

fn optional(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<String>,
    max: Option<usize>,
) -> Option<String> {
    value.and_then(|value| check(errors, field, value, max))
}

fn check(
    errors: &mut FieldErrors,
    field: &'static str,
    value: String,
    max: Option<usize>,
) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        errors.push(ValidationError::Empty { field });
        return None;
    }

    // Postgres text columns reject U+0000
    if trimmed.contains('\0') {
        errors.push(ValidationError::InvalidCharacter { field });
        return None;
    }

    if let Some(max) = max {
        if trimmed.chars().count() > max {
            errors.push(ValidationError::TooLong { field, max });
            return None;
        }
    }

    Some(trimmed.to_owned())
}

/// Accept strings, numbers and booleans as text; `null` becomes an empty
/// string so it fails the blank check instead of reading as "absent".
fn text_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Some(String::new()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Some(String::new()))
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
