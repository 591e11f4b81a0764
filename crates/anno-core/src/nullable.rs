//! Optional fields that remember an explicit `null`.
//!
//! The service distinguishes a key it never sent from a key sent as `null`,
//! and a round trip must reproduce whichever it got. Entity structs therefore
//! hold optional fields as [`Nullable<T>`]:
//!
//! | wire            | native                |
//! |-----------------|-----------------------|
//! | key absent      | `None`                |
//! | `"key": null`   | `Some(None)`          |
//! | `"key": value`  | `Some(Some(value))`   |
//!
//! Fields are declared as
//! `#[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]`.
//! Serialization needs no helper: `Some(None)` already serializes as `null`.

use serde::{Deserialize, Deserializer};

/// An optional field that keeps absent and `null` apart.
#[allow(clippy::option_option)]
pub type Nullable<T> = Option<Option<T>>;

/// Deserialize a present key, `null` included, as `Some(..)`.
///
/// Absent keys never reach this function; `#[serde(default)]` makes them `None`.
///
/// # Errors
///
/// Propagates the inner type's deserialization error.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The value of a nullable field, treating absent and `null` alike.
#[must_use]
pub fn value<T>(field: &Nullable<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}
