//! Small service responses: setup state, inserted ids, and validation errors.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::schema::{Schema, WireEntity};

static CONFIGURATION_TABLE: LazyLock<MappingTable> =
    LazyLock::new(|| static_table([("requiresSetup", FieldRule::Rename("requires_setup"))]));

static INSERT_TABLE: LazyLock<MappingTable> =
    LazyLock::new(|| static_table([("insertedId", FieldRule::Rename("id"))]));

static EMPTY_TABLE: LazyLock<MappingTable> = LazyLock::new(MappingTable::empty);

/// Whether the service is ready to use or still needs first-run setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationResponse {
    pub requires_setup: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for ConfigurationResponse {
    const ENTITY: &'static str = "ConfigurationResponse";

    fn table() -> &'static MappingTable {
        &CONFIGURATION_TABLE
    }
}

/// Id of a freshly inserted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessfulInsert {
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for SuccessfulInsert {
    const ENTITY: &'static str = "SuccessfulInsert";

    fn table() -> &'static MappingTable {
        &INSERT_TABLE
    }
}

/// One field-level problem reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub name: String,
    pub error: String,
    #[serde(default)]
    pub warning: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldError {
    #[must_use]
    pub fn new(name: impl Into<String>, error: impl Into<String>, warning: bool) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
            warning,
            extra: Map::new(),
        }
    }
}

impl Schema for FieldError {
    const ENTITY: &'static str = "FieldError";

    fn table() -> &'static MappingTable {
        &EMPTY_TABLE
    }
}

/// A rejected request: a JSON array of [`FieldError`]s on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// True when every entry is only a warning.
    #[must_use]
    pub fn is_warning_only(&self) -> bool {
        self.errors.iter().all(|e| e.warning)
    }
}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl WireEntity for ValidationError {
    const NAME: &'static str = "ValidationError";

    fn from_wire(wire: &Value) -> Result<Self, ModelError> {
        let items = wire.as_array().ok_or(ModelError::Shape {
            entity: Self::NAME,
            expected: "array",
        })?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                FieldError::from_wire(item).map_err(|e| e.in_field(&index.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    fn to_wire(&self) -> Result<Value, ModelError> {
        self.errors
            .iter()
            .map(WireEntity::to_wire)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn field_error_to_wire() {
        let fe = FieldError::new("field", "not filled in", true);
        assert_eq!(
            fe.to_wire().unwrap(),
            json!({ "name": "field", "error": "not filled in", "warning": true })
        );
    }

    #[test]
    fn validation_error_to_wire() {
        let ve = ValidationError::new(vec![
            FieldError::new("field", "not filled in", true),
            FieldError::new("email", "obviously wrong", false),
        ]);
        assert_eq!(
            ve.to_wire().unwrap(),
            json!([
                { "name": "field", "error": "not filled in", "warning": true },
                { "name": "email", "error": "obviously wrong", "warning": false },
            ])
        );
        assert!(!ve.is_warning_only());
        assert_eq!(ve.iter().count(), 2);
    }

    #[test]
    fn validation_error_from_wire() {
        let ve = ValidationError::from_wire(&json!([
            { "name": "field", "error": "not filled in", "warning": true },
        ]))
        .unwrap();
        let fe = &ve.errors[0];
        assert_eq!(fe.name, "field");
        assert_eq!(fe.error, "not filled in");
        assert!(fe.warning);
        assert!(ve.is_warning_only());
    }

    #[test]
    fn validation_error_requires_an_array() {
        let err = ValidationError::from_wire(&json!({ "name": "field" })).unwrap_err();
        assert!(matches!(err, ModelError::Shape { expected: "array", .. }));
    }

    #[test]
    fn inserted_id_is_renamed() {
        let insert = SuccessfulInsert::from_wire(&json!({ "insertedId": 42 })).unwrap();
        assert_eq!(insert.id, 42);
        assert_eq!(insert.to_wire().unwrap(), json!({ "insertedId": 42 }));
    }

    #[test]
    fn configuration_response_roundtrips() {
        let wire = json!({ "requiresSetup": true });
        let response = ConfigurationResponse::from_wire(&wire).unwrap();
        assert!(response.requires_setup);
        assert_eq!(response.to_wire().unwrap(), wire);
    }
}
