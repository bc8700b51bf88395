//! Form input state for the editors.
//!
//! A [`Form`] is an ordered set of labelled [`TextField`]s with one focused
//! field. The helpers at the bottom turn raw field text into typed values,
//! reporting problems as [`ValidationError`]s.

mod field;

pub use field::TextField;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    labels: &'static [&'static str],
    fields: Vec<TextField>,
    focused: usize,
}

impl Form {
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            fields: vec![TextField::default(); labels.len()],
            focused: 0,
        }
    }

    pub const fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub const fn focused(&self) -> usize {
        self.focused
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        &mut self.fields[self.focused]
    }

    /// Text of field `index`, trimmed.
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.text().trim())
    }

    /// Fill every field, in label order.
    pub fn set_values<S: AsRef<str>>(&mut self, values: &[S]) {
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.set(value.as_ref());
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focused = 0;
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len().max(1);
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields.len().max(1);
        self.focused = (self.focused + len - 1) % len;
    }

    pub const fn focus_first(&mut self) {
        self.focused = 0;
    }
}

/// A non-empty value.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `value` is blank.
pub fn required<'a>(label: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(label))
    } else {
        Ok(value)
    }
}

/// A required non-negative whole number.
///
/// # Errors
///
/// Returns [`ValidationError`] when `value` is blank or not a number.
pub fn integer<T: std::str::FromStr>(label: &'static str, value: &str) -> Result<T, ValidationError> {
    let value = required(label, value)?;
    value.parse().map_err(|_| ValidationError::NotAnInteger {
        field: label,
        value: value.to_string(),
    })
}

/// An optional whole number; blank means `None`.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnInteger`] when `value` is not a number.
pub fn optional_integer<T: std::str::FromStr>(
    label: &'static str,
    value: &str,
) -> Result<Option<T>, ValidationError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        integer(label, value).map(Some)
    }
}
