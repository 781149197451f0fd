//! Field-level validation primitives shared by every entity.
//!
//! The `validate_*` functions plug into `#[validate(custom(function = ...))]`.
//! They only set an error code; [`collect`] turns codes into messages using
//! the field path, so one function serves every field it is attached to.

use std::borrow::Cow;

use dentalab_shared::constants::MAX_NAME_LENGTH;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::FieldErrors;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone pattern compiles"));

const CODE_REQUIRED: &str = "required";
const CODE_TOO_LONG: &str = "too_long";
const CODE_EMAIL: &str = "email";
const CODE_PHONE: &str = "phone";

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// E.164-like: optional `+`, no leading zero, 2 to 15 digits. Inner spaces are ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.trim().chars().filter(|c| *c != ' ').collect();
    PHONE_RE.is_match(&compact)
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new(CODE_REQUIRED));
    }
    Ok(())
}

pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if value.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(CODE_TOO_LONG));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if !is_valid_email(value) {
        return Err(ValidationError::new(CODE_EMAIL));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if !is_valid_phone(value) {
        return Err(ValidationError::new(CODE_PHONE));
    }
    Ok(())
}

/// Flattens validator output into path-addressed field errors, sorted by path.
pub fn collect(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect_into(None, errors, &mut out);
    out.sort();
    out
}

fn collect_into(prefix: Option<&str>, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let raw = field.to_string();
        let name = wire_name(&raw);
        let path = match prefix {
            Some(p) => format!("{}.{}", p, name),
            None => name.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(path.clone(), message_for(name, error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_into(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_into(Some(&format!("{}[{}]", path, index)), inner, out);
                }
            }
        }
    }
}

/// Rust field names that differ from their JSON names.
fn wire_name(field: &str) -> &str {
    match field {
        "kind" => "type",
        other => other,
    }
}

fn message_for(field: &str, error: &ValidationError) -> String {
    let label = field.replace('_', " ");
    match error.code.as_ref() {
        CODE_REQUIRED => format!("{} is required", label),
        CODE_TOO_LONG => format!("{} must be at most {} characters", label, MAX_NAME_LENGTH),
        CODE_EMAIL => "invalid email format".to_string(),
        CODE_PHONE => "invalid phone format".to_string(),
        _ => error
            .message
            .clone()
            .unwrap_or_else(|| Cow::Owned(format!("{} is invalid", label)))
            .into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("lab@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("lab@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("lab example.com"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_valid_phone("+5511999999999"));
        assert!(is_valid_phone("+55 11 99999 9999"));
        assert!(is_valid_phone("12"));
        assert!(!is_valid_phone("1"));
        assert!(!is_valid_phone("+0123456"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("555-1234"));
    }

    #[test]
    fn test_name_length_is_capped() {
        assert!(validate_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
        let err = validate_name(&"a".repeat(MAX_NAME_LENGTH + 1)).unwrap_err();
        assert_eq!(err.code, CODE_TOO_LONG);
        assert_eq!(validate_name("   ").unwrap_err().code, CODE_REQUIRED);
    }

    #[test]
    fn test_messages_use_field_label() {
        let required = ValidationError::new(CODE_REQUIRED);
        assert_eq!(message_for("postal_code", &required), "postal code is required");
        let long = ValidationError::new(CODE_TOO_LONG);
        assert_eq!(message_for("name", &long), "name must be at most 200 characters");
    }
}
