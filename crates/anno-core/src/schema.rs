//! Entity traits tying typed structs to their mapping tables.
//!
//! [`Schema`] is implemented by every table-driven entity; the blanket
//! [`WireEntity`] impl turns it into `from_wire`/`to_wire`. Polymorphic
//! families and list-shaped payloads implement [`WireEntity`] directly.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::codec::{from_native, to_native};
use crate::convert;
use crate::errors::ModelError;
use crate::mapping::MappingTable;

/// Anything that converts to and from its wire JSON form.
pub trait WireEntity: Sized {
    /// Entity name used in error messages.
    const NAME: &'static str;

    /// Build from a wire payload.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the payload cannot be converted.
    fn from_wire(wire: &Value) -> Result<Self, ModelError>;

    /// Produce the wire payload.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the entity violates its invariants or a field
    /// cannot be encoded.
    fn to_wire(&self) -> Result<Value, ModelError>;
}

/// A typed entity described by one [`MappingTable`].
///
/// Implementors derive serde with native (`snake_case`) field names and keep a
/// `#[serde(flatten)]` map for unknown fields so passthrough survives the
/// typed hop.
pub trait Schema: Serialize + DeserializeOwned {
    const ENTITY: &'static str;

    fn table() -> &'static MappingTable;

    /// Consistency checks run after `from_wire` and before `to_wire`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvariantViolation`] on a programming error such as
    /// a mismatched `kind` tag.
    fn check_invariants(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

impl<T: Schema> WireEntity for T {
    const NAME: &'static str = T::ENTITY;

    fn from_wire(wire: &Value) -> Result<Self, ModelError> {
        let object = wire.as_object().ok_or(ModelError::Shape {
            entity: T::ENTITY,
            expected: "object",
        })?;
        let native = convert::from_wire(object, T::table())?;
        let entity: Self = from_native(T::ENTITY, Value::Object(native))?;
        entity.check_invariants()?;
        Ok(entity)
    }

    fn to_wire(&self) -> Result<Value, ModelError> {
        self.check_invariants()?;
        let Value::Object(native) = to_native(T::ENTITY, self)? else {
            return Err(ModelError::Shape {
                entity: T::ENTITY,
                expected: "object",
            });
        };
        Ok(Value::Object(convert::to_wire(&native, T::table())?))
    }
}
