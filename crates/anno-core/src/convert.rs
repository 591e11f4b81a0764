//! The generic converter: applies a [`MappingTable`] in either direction.
//!
//! Both functions are pure. Mapped fields are renamed (and decoded/encoded
//! when the rule carries a codec); every other field passes through under its
//! own name so payloads keep fields this crate does not know about.
//!
//! An unmapped wire key can spell a native name the table produces, e.g. a
//! stray `copyright` next to `copyrightAndUsageRestrictions`. Such keys are
//! stored natively under [`SHADOWED_PREFIX`] and restored by [`to_wire`], so
//! they never overwrite the mapped field. Wire keys that already start with
//! the prefix are escaped the same way, which keeps the scheme reversible.

use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::mapping::{FieldRule, MappingTable};

/// A JSON object keyed by field name.
pub type FieldMap = Map<String, Value>;

/// Native-side prefix for passthrough wire keys that shadow a native name.
pub const SHADOWED_PREFIX: &str = "wire:";

/// Wire object → native field map.
///
/// # Errors
///
/// Fails only if a codec rejects a value (wrapped in [`ModelError::Field`]).
/// Unmapped wire keys are never rejected.
pub fn from_wire(wire: &FieldMap, table: &MappingTable) -> Result<FieldMap, ModelError> {
    let mut native = FieldMap::new();

    for (key, value) in wire {
        match table.get(key) {
            Some(FieldRule::Rename(target)) => {
                native.insert((*target).to_string(), value.clone());
            }
            Some(FieldRule::Convert(target, codec)) => {
                let decoded = codec.decode(value.clone()).map_err(|e| e.in_field(key))?;
                native.insert((*target).to_string(), decoded);
            }
            None if table.covers(key) || key.starts_with(SHADOWED_PREFIX) => {
                tracing::trace!(field = %key, "escaping wire field that shadows a native name");
                native.insert(format!("{SHADOWED_PREFIX}{key}"), value.clone());
            }
            None => {
                tracing::trace!(field = %key, "passing through unmapped wire field");
                native.insert(key.clone(), value.clone());
            }
        }
    }

    Ok(native)
}

/// Native field map → wire object.
///
/// Table entries whose native field is absent are omitted. Native fields the
/// table does not cover pass through under their own name, minus
/// [`SHADOWED_PREFIX`] when they carry it.
///
/// # Errors
///
/// Fails if a codec rejects a value (wrapped in [`ModelError::Field`]) or if a
/// hand-built passthrough key would land on a wire name the table produces
/// ([`ModelError::FieldCollision`]). Output of [`from_wire`] never collides.
pub fn to_wire(native: &FieldMap, table: &MappingTable) -> Result<FieldMap, ModelError> {
    let mut wire = FieldMap::new();

    for (wire_name, rule) in table.entries() {
        let Some(value) = native.get(rule.native_name()) else {
            continue;
        };
        let encoded = match rule {
            FieldRule::Rename(_) => value.clone(),
            FieldRule::Convert(_, codec) => {
                codec.encode(value.clone()).map_err(|e| e.in_field(wire_name))?
            }
        };
        wire.insert(wire_name.to_string(), encoded);
    }

    for (key, value) in native {
        if table.covers(key) {
            continue;
        }
        let wire_key = key.strip_prefix(SHADOWED_PREFIX).unwrap_or(key);
        if table.get(wire_key).is_some() {
            return Err(ModelError::FieldCollision { field: key.clone() });
        }
        tracing::trace!(field = %key, "passing through unmapped native field");
        wire.insert(wire_key.to_string(), value.clone());
    }

    Ok(wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TIMESTAMP;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn table() -> MappingTable {
        MappingTable::new([
            ("summaryCode", FieldRule::Rename("summary_code")),
            ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ])
        .unwrap()
    }

    #[test]
    fn renames_converts_and_passes_through() {
        let wire = object(json!({
            "summaryCode": "WORDS",
            "created": "2018-04-23T18:25:43.511000Z",
            "segments": [0.1, 2.0],
        }));

        let native = from_wire(&wire, &table()).unwrap();
        assert_eq!(
            Value::Object(native.clone()),
            json!({
                "summary_code": "WORDS",
                "created": "2018-04-23T18:25:43.511",
                "segments": [0.1, 2.0],
            })
        );

        let back = to_wire(&native, &table()).unwrap();
        assert_eq!(back, wire);
    }

    #[test]
    fn absent_native_fields_are_omitted() {
        let native = object(json!({ "summary_code": "X" }));
        let wire = to_wire(&native, &table()).unwrap();
        assert_eq!(Value::Object(wire), json!({ "summaryCode": "X" }));
    }

    #[test]
    fn unknown_wire_keys_are_never_rejected() {
        let wire = object(json!({ "somethingNew": { "nested": [1, 2, 3] } }));
        let native = from_wire(&wire, &table()).unwrap();
        assert_eq!(native, wire);
        assert_eq!(to_wire(&native, &table()).unwrap(), wire);
    }

    #[test]
    fn codec_errors_name_the_wire_field() {
        let wire = object(json!({ "created": "not a timestamp" }));
        let err = from_wire(&wire, &table()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("created"));
        assert!(matches!(err.root(), ModelError::Format(_)));
    }

    #[test]
    fn wire_key_shadowing_a_native_name_passes_through_escaped() {
        let wire = object(json!({ "summaryCode": "A", "summary_code": "B" }));
        let native = from_wire(&wire, &table()).unwrap();
        assert_eq!(
            Value::Object(native.clone()),
            json!({ "summary_code": "A", "wire:summary_code": "B" })
        );
        assert_eq!(to_wire(&native, &table()).unwrap(), wire);
    }

    #[test]
    fn prefixed_wire_keys_are_escaped_too() {
        let wire = object(json!({ "wire:note": 1, "wire:summary_code": 2 }));
        let native = from_wire(&wire, &table()).unwrap();
        assert_eq!(
            Value::Object(native.clone()),
            json!({ "wire:wire:note": 1, "wire:wire:summary_code": 2 })
        );
        assert_eq!(to_wire(&native, &table()).unwrap(), wire);
    }

    #[test]
    fn passthrough_native_key_shadowing_a_wire_name_is_rejected() {
        let native = object(json!({ "summaryCode": "A" }));
        let err = to_wire(&native, &table()).unwrap_err();
        assert!(matches!(err, ModelError::FieldCollision { ref field } if field == "summaryCode"));

        let native = object(json!({ "wire:created": "A" }));
        let err = to_wire(&native, &table()).unwrap_err();
        assert!(matches!(err, ModelError::FieldCollision { ref field } if field == "wire:created"));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let wire = object(json!({ "summaryCode": "A", "extra": true }));
        let snapshot = wire.clone();
        let _ = from_wire(&wire, &table()).unwrap();
        assert_eq!(wire, snapshot);
    }
}
