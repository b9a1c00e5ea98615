//! Field-presence wrapper for partial updates.
//!
//! A JSON body of `{"name": "Rex"}` must leave every other field alone, and
//! `{"note": null}` must be told apart from a body that never mentions
//! `note`. Plain `Option<T>` cannot carry both distinctions, so update
//! payloads declare each field as `#[serde(default)] Patch<T>`:
//!
//! | JSON            | `Patch<String>`     | `Patch<Option<String>>` |
//! |-----------------|---------------------|-------------------------|
//! | key omitted     | `Absent`            | `Absent`                |
//! | `"x"`           | `Value("x")`        | `Value(Some("x"))`      |
//! | `""`            | `Value("")`         | `Value(Some(""))`       |
//! | `null`          | deserialize error   | `Value(None)`           |

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; the stored value is kept.
    Absent,
    /// The field was supplied and replaces the stored value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Patch::Value(_))
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present; `#[serde(default)]` covers the rest.
        T::deserialize(deserializer).map(Patch::Value)
    }
}
