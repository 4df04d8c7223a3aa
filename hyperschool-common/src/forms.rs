//! Field cleaning shared by the HTML forms.
//!
//! Mirrors the behaviour of the classic server-side form fields: values are
//! trimmed, empty required values are rejected and every failure is
//! collected per field so the bound form can be rendered again.

use std::collections::BTreeMap;

use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_AN_INTEGER: &str = "Enter a whole number.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Key used for errors that belong to the form as a whole.
pub const NON_FIELD: &str = "non_field";

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(Vec::new)
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// Flattens into `field: message` lines, for non-HTML callers.
    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{}: {}", field, m)))
            .collect()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A required text field limited to `max_length` characters.
pub fn char_field(
    errors: &mut FormErrors,
    field: &str,
    raw: &str,
    max_length: usize,
) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let len = value.chars().count();
    if len > max_length {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max_length, len
            ),
        );
        return None;
    }
    Some(value.to_string())
}

/// A required integer field. A trailing `.0` is accepted, `4.5` is not.
pub fn integer_field(errors: &mut FormErrors, field: &str, raw: &str) -> Option<i32> {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let digits = match value.find('.') {
        Some(dot) if value[dot + 1..].chars().all(|c| c == '0') => &value[..dot],
        _ => value,
    };
    match digits.parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, NOT_AN_INTEGER);
            None
        }
    }
}

/// A required value that must not be blank; kept verbatim (passwords).
pub fn secret_field(errors: &mut FormErrors, field: &str, raw: &str) -> Option<String> {
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    Some(raw.to_string())
}
