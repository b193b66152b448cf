//! Field-presence checks for create requests.
//!
//! Validation is limited to "present / absent": a required text field that is
//! missing or whitespace-only is treated as absent.

use crate::error::CoreError;

/// Values that can be "present but blank".
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Require a non-blank text field.
pub fn require_text(entity: &str, field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.is_blank() => Ok(v),
        _ => Err(CoreError::missing_field(entity, field)),
    }
}

/// Require a field to be present, whatever its contents.
pub fn require<T>(entity: &str, field: &str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::missing_field(entity, field))
}

/// Treat a blank optional text field as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_blank())
}
