//! Error types for wire conversion.
//!
//! Scalar encoding failures live in [`crate::scalar::FormatError`] and table
//! construction failures in [`crate::mapping::MappingError`]. Everything that
//! can go wrong while converting an entity surfaces as a [`ModelError`].

use thiserror::Error;

use crate::scalar::FormatError;

/// Errors raised while converting between wire and native representations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A scalar (timestamp, base64) was malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A tag value is outside its closed enumeration.
    #[error("Unknown {family} value: {value}")]
    UnknownKind { family: &'static str, value: String },

    /// A polymorphic payload carries no `kind` field.
    #[error("Missing 'kind' discriminator on {family} payload")]
    MissingDiscriminator { family: &'static str },

    /// A concrete schema holds an object tagged with a different kind.
    ///
    /// This is a caller bug, not bad input.
    #[error("Invariant violation: {family} schema for '{expected}' holds an object tagged '{found}'")]
    InvariantViolation {
        family: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A passthrough field would overwrite or be confused with a mapped field.
    #[error("Field collision on '{field}': unmapped field shadows a mapped one")]
    FieldCollision { field: String },

    /// A field's codec failed. `field` is the wire name.
    #[error("Invalid value for field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<ModelError>,
    },

    /// The JSON value has the wrong overall shape.
    #[error("Expected a JSON {expected} for {entity}")]
    Shape {
        entity: &'static str,
        expected: &'static str,
    },

    /// The native field map does not fit the typed entity.
    #[error("{entity} does not fit its schema: {source}")]
    Schema {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ModelError {
    /// Attach the wire field name a codec failure happened in.
    #[must_use]
    pub(crate) fn in_field(self, field: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any field context.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wire path of the failing field, outermost first (`question.created`).
    #[must_use]
    pub fn field_path(&self) -> Option<String> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field { field, source } = current {
            path.push(field.as_str());
            current = source;
        }
        (!path.is_empty()).then(|| path.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_skips_field_context() {
        let err = ModelError::UnknownKind {
            family: "annotation source",
            value: "Robot".into(),
        }
        .in_field("source")
        .in_field("response");

        assert!(matches!(err.root(), ModelError::UnknownKind { .. }));
        assert_eq!(err.field_path().as_deref(), Some("response.source"));
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'response': Invalid value for field 'source': Unknown annotation source value: Robot"
        );
    }

    #[test]
    fn field_path_is_none_without_context() {
        let err = ModelError::MissingDiscriminator {
            family: "annotation kind",
        };
        assert!(err.field_path().is_none());
    }
}
