use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use validator::{ValidationError, ValidationErrors};

pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 50;

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[0-9]{10,14}$").expect("phone pattern compiles"))
}

pub fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < FULL_NAME_MIN {
        return Err(error_with_message(
            "length",
            "Name must be at least 2 characters",
        ));
    }
    if len > FULL_NAME_MAX {
        return Err(error_with_message("length", "Name too long"));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if phone_pattern().is_match(value) {
        Ok(())
    } else {
        Err(error_with_message("phone", "Please enter a valid phone number"))
    }
}

pub fn validate_terms(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(error_with_message(
            "terms",
            "You must accept the terms and conditions",
        ))
    }
}

/// Flattens field errors into `field -> messages`, falling back to the
/// error code when a rule carries no message.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
