//! Field codecs: the decode/encode pairs referenced by [`FieldRule::Convert`].
//!
//! Codecs work on JSON values. The wire side is the API encoding; the native
//! side is the serde representation of the Rust type the entity struct holds
//! (`NaiveDateTime`, `Vec<u8>`, an enum member, a nested entity). JSON `null`
//! passes through unchanged in both directions so optional fields need no
//! special casing.
//!
//! [`FieldRule::Convert`]: crate::mapping::FieldRule::Convert

use std::marker::PhantomData;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::enums::WireTag;
use crate::errors::ModelError;
use crate::scalar::{decode_bytes_b64, decode_timestamp, encode_bytes_b64, encode_timestamp};
use crate::schema::WireEntity;

/// A decode/encode pair. Implementations must be exact inverses over legal values.
pub trait FieldCodec: Sync {
    /// Wire value → native value.
    fn decode(&self, wire: Value) -> Result<Value, ModelError>;

    /// Native value → wire value.
    fn encode(&self, native: Value) -> Result<Value, ModelError>;
}

/// Serialize a native value into its JSON representation.
pub(crate) fn to_native<T: Serialize>(entity: &'static str, value: &T) -> Result<Value, ModelError> {
    serde_json::to_value(value).map_err(|source| ModelError::Schema { entity, source })
}

/// Deserialize a native value from its JSON representation.
pub(crate) fn from_native<T: DeserializeOwned>(
    entity: &'static str,
    value: Value,
) -> Result<T, ModelError> {
    serde_json::from_value(value).map_err(|source| ModelError::Schema { entity, source })
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// Wire timestamp string ↔ `NaiveDateTime`.
#[derive(Debug, Clone, Copy)]
pub struct TimestampCodec;

pub static TIMESTAMP: TimestampCodec = TimestampCodec;

impl FieldCodec for TimestampCodec {
    fn decode(&self, wire: Value) -> Result<Value, ModelError> {
        match wire {
            Value::Null => Ok(Value::Null),
            Value::String(raw) => to_native("timestamp", &decode_timestamp(raw)?),
            _ => Err(ModelError::Shape {
                entity: "timestamp",
                expected: "string",
            }),
        }
    }

    fn encode(&self, native: Value) -> Result<Value, ModelError> {
        if native.is_null() {
            return Ok(Value::Null);
        }
        let timestamp: NaiveDateTime = from_native("timestamp", native)?;
        Ok(Value::String(encode_timestamp(&timestamp)))
    }
}

/// Base64 string ↔ byte vector.
#[derive(Debug, Clone, Copy)]
pub struct Base64Codec;

pub static BYTES_B64: Base64Codec = Base64Codec;

impl FieldCodec for Base64Codec {
    fn decode(&self, wire: Value) -> Result<Value, ModelError> {
        match wire {
            Value::Null => Ok(Value::Null),
            Value::String(raw) => to_native("bytes", &decode_bytes_b64(&raw)?),
            _ => Err(ModelError::Shape {
                entity: "bytes",
                expected: "string",
            }),
        }
    }

    fn encode(&self, native: Value) -> Result<Value, ModelError> {
        if native.is_null() {
            return Ok(Value::Null);
        }
        let bytes: Vec<u8> = from_native("bytes", native)?;
        Ok(Value::String(encode_bytes_b64(&bytes)))
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Enum tag validation. Wire and native hold the same string; both
/// directions reject anything outside the enumeration.
pub struct TagCodec<E>(PhantomData<fn() -> E>);

impl<E> TagCodec<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for TagCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: WireTag> TagCodec<E> {
    fn check(value: Value) -> Result<Value, ModelError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(raw) => match E::from_tag(&raw) {
                Some(member) => Ok(Value::String(member.tag().to_string())),
                None => Err(ModelError::UnknownKind {
                    family: E::FAMILY,
                    value: raw,
                }),
            },
            other => Err(ModelError::UnknownKind {
                family: E::FAMILY,
                value: other.to_string(),
            }),
        }
    }
}

impl<E: WireTag> FieldCodec for TagCodec<E> {
    fn decode(&self, wire: Value) -> Result<Value, ModelError> {
        Self::check(wire)
    }

    fn encode(&self, native: Value) -> Result<Value, ModelError> {
        Self::check(native)
    }
}

// ---------------------------------------------------------------------------
// Nested entities
// ---------------------------------------------------------------------------

/// A nested entity (or polymorphic family) converted through its own schema.
pub struct EntityCodec<T>(PhantomData<fn() -> T>);

impl<T> EntityCodec<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EntityCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_entity<T>(wire: &Value) -> Result<Value, ModelError>
where
    T: WireEntity + Serialize,
{
    let entity = T::from_wire(wire)?;
    to_native(T::NAME, &entity)
}

fn encode_entity<T>(native: Value) -> Result<Value, ModelError>
where
    T: WireEntity + DeserializeOwned,
{
    let entity: T = from_native(T::NAME, native)?;
    entity.to_wire()
}

impl<T> FieldCodec for EntityCodec<T>
where
    T: WireEntity + Serialize + DeserializeOwned,
{
    fn decode(&self, wire: Value) -> Result<Value, ModelError> {
        if wire.is_null() {
            return Ok(Value::Null);
        }
        decode_entity::<T>(&wire)
    }

    fn encode(&self, native: Value) -> Result<Value, ModelError> {
        if native.is_null() {
            return Ok(Value::Null);
        }
        encode_entity::<T>(native)
    }
}

/// A list of nested entities, converted element-wise.
pub struct ListCodec<T>(PhantomData<fn() -> T>);

impl<T> ListCodec<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ListCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldCodec for ListCodec<T>
where
    T: WireEntity + Serialize + DeserializeOwned,
{
    fn decode(&self, wire: Value) -> Result<Value, ModelError> {
        match wire {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    decode_entity::<T>(item).map_err(|e| e.in_field(&index.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Err(ModelError::Shape {
                entity: T::NAME,
                expected: "array",
            }),
        }
    }

    fn encode(&self, native: Value) -> Result<Value, ModelError> {
        match native {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    encode_entity::<T>(item).map_err(|e| e.in_field(&index.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Err(ModelError::Shape {
                entity: T::NAME,
                expected: "array",
            }),
        }
    }
}
