//! Three-state partial-update values.
//!
//! A [`Patch`] distinguishes a field that was left out of the request body
//! (`Absent`) from one explicitly sent as `null` (`Null`) and one carrying a
//! value (`Set`). Use it with `#[serde(default)]` so a missing field
//! deserializes to `Absent`:
//!
//! ```
//! use serde::Deserialize;
//! use showcase_core::patch::Patch;
//!
//! #[derive(Deserialize)]
//! struct UpdateTitle {
//!     #[serde(default)]
//!     title: Patch<String>,
//! }
//!
//! let body: UpdateTitle = serde_json::from_str("{}").unwrap();
//! assert!(body.title.is_absent());
//! ```
//!
//! Blank values (whitespace-only text, empty lists) are normalized to
//! `Absent`: the admin client submits every form field and leaves the
//! untouched ones blank.

use serde::{Deserialize, Deserializer};

use crate::fields::Blank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<T: Blank> Patch<T> {
    /// Collapse a blank `Set` into `Absent`.
    pub fn normalized(self) -> Self {
        match self {
            Patch::Set(value) if value.is_blank() => Patch::Absent,
            other => other,
        }
    }

    /// The new value for a required field, if the request supplies one.
    ///
    /// Required fields cannot be cleared, so `Null` behaves like `Absent`.
    pub fn into_value(self) -> Option<T> {
        match self.normalized() {
            Patch::Set(value) => Some(value),
            Patch::Absent | Patch::Null => None,
        }
    }

    /// Apply to a required field.
    pub fn apply(self, target: &mut T) {
        if let Some(value) = self.into_value() {
            *target = value;
        }
    }

    /// Apply to an optional field; an explicit `null` clears it.
    pub fn apply_optional(self, target: &mut Option<T>) {
        match self.normalized() {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }
}
