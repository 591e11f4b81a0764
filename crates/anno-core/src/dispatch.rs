//! Polymorphic `kind` dispatch.
//!
//! Annotation and question payloads carry a `kind` discriminator. Each family
//! is a closed sum type generated by `polymorphic_family!`: `from_wire` reads
//! the tag, rejects anything outside the enumeration, and hands the payload to
//! the matching variant schema. The generated `match` is exhaustive, so adding
//! a kind without a variant fails to compile.

use serde_json::Value;

use crate::enums::WireTag;
use crate::errors::ModelError;

/// Discriminator field on polymorphic wire objects.
pub const KIND_FIELD: &str = "kind";

/// Read and validate the `kind` tag of a wire (or native) object.
///
/// # Errors
///
/// - [`ModelError::Shape`] if the value is not an object
/// - [`ModelError::MissingDiscriminator`] if there is no `kind` field
/// - [`ModelError::UnknownKind`] if the tag is not a member of `K`
pub fn read_kind<K: WireTag>(wire: &Value) -> Result<K, ModelError> {
    let object = wire.as_object().ok_or(ModelError::Shape {
        entity: K::FAMILY,
        expected: "object",
    })?;
    let raw = object
        .get(KIND_FIELD)
        .ok_or(ModelError::MissingDiscriminator { family: K::FAMILY })?;
    let tag = raw.as_str().ok_or_else(|| ModelError::UnknownKind {
        family: K::FAMILY,
        value: raw.to_string(),
    })?;
    K::from_tag(tag).ok_or_else(|| ModelError::UnknownKind {
        family: K::FAMILY,
        value: tag.to_string(),
    })
}

/// Assert that a concrete schema holds an object of its own kind.
///
/// # Errors
///
/// Returns [`ModelError::InvariantViolation`] when `found != expected`.
pub fn expect_kind<K: WireTag>(expected: K, found: K) -> Result<(), ModelError> {
    if expected == found {
        Ok(())
    } else {
        Err(ModelError::InvariantViolation {
            family: K::FAMILY,
            expected: expected.tag(),
            found: found.tag(),
        })
    }
}

/// Generate a closed family enum over concrete schemas.
///
/// Family variant names must equal the kind enum's member names. The output
/// includes `kind()`, a [`WireEntity`](crate::schema::WireEntity) impl that
/// dispatches on the tag, `From` impls for each variant, and serde impls for
/// the native form (also dispatched on `kind`) so families can nest inside
/// other entities.
macro_rules! polymorphic_family {
    (
        $(#[$meta:meta])*
        pub enum $family:ident : $kind:ident {
            $($variant:ident($schema:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $family {
            $($variant($schema)),+
        }

        impl $family {
            /// The kind tag carried by the inner object.
            #[must_use]
            pub const fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant(inner) => inner.kind),+
                }
            }
        }

        impl $crate::schema::WireEntity for $family {
            const NAME: &'static str = stringify!($family);

            fn from_wire(
                wire: &::serde_json::Value,
            ) -> Result<Self, $crate::errors::ModelError> {
                let kind: $kind = $crate::dispatch::read_kind(wire)?;
                ::tracing::debug!(family = stringify!($family), %kind, "dispatching wire payload");
                match kind {
                    $($kind::$variant => {
                        <$schema as $crate::schema::WireEntity>::from_wire(wire).map(Self::$variant)
                    })+
                }
            }

            fn to_wire(&self) -> Result<::serde_json::Value, $crate::errors::ModelError> {
                match self {
                    $(Self::$variant(inner) => $crate::schema::WireEntity::to_wire(inner)),+
                }
            }
        }

        $(
            impl From<$schema> for $family {
                fn from(inner: $schema) -> Self {
                    Self::$variant(inner)
                }
            }
        )+

        impl ::serde::Serialize for $family {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Self::$variant(inner) => ::serde::Serialize::serialize(inner, serializer)),+
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $family {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use ::serde::de::Error as _;

                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                let kind: $kind = $crate::dispatch::read_kind(&value).map_err(D::Error::custom)?;
                match kind {
                    $($kind::$variant => {
                        ::serde_json::from_value::<$schema>(value)
                            .map(Self::$variant)
                            .map_err(D::Error::custom)
                    })+
                }
            }
        }
    };
}

pub(crate) use polymorphic_family;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{AnnotationKind, QuestionKind};
    use serde_json::json;

    #[test]
    fn reads_known_kind() {
        let kind: AnnotationKind = read_kind(&json!({ "kind": "TextAnnotation" })).unwrap();
        assert_eq!(kind, AnnotationKind::Text);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = read_kind::<AnnotationKind>(&json!({ "kind": "Bogus" })).unwrap_err();
        assert!(matches!(
            err,
            ModelError::UnknownKind { family: "annotation kind", ref value } if value == "Bogus"
        ));
    }

    #[test]
    fn question_tag_is_not_an_annotation_kind() {
        let err = read_kind::<AnnotationKind>(&json!({ "kind": "MultipleChoiceQuestion" }))
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownKind { .. }));
    }

    #[test]
    fn non_string_kind_is_rejected() {
        let err = read_kind::<QuestionKind>(&json!({ "kind": 3 })).unwrap_err();
        assert!(matches!(err, ModelError::UnknownKind { ref value, .. } if value == "3"));
    }

    #[test]
    fn missing_kind_is_reported() {
        let err = read_kind::<QuestionKind>(&json!({ "summaryCode": "X" })).unwrap_err();
        assert!(matches!(err, ModelError::MissingDiscriminator { family: "question kind" }));
    }

    #[test]
    fn non_object_is_a_shape_error() {
        let err = read_kind::<QuestionKind>(&json!(["kind"])).unwrap_err();
        assert!(matches!(err, ModelError::Shape { .. }));
    }

    #[test]
    fn expect_kind_flags_mismatch() {
        assert!(expect_kind(AnnotationKind::Text, AnnotationKind::Text).is_ok());
        let err = expect_kind(AnnotationKind::Text, AnnotationKind::MultipleChoice).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvariantViolation {
                expected: "TextAnnotation",
                found: "MultipleChoiceAnnotation",
                ..
            }
        ));
    }
}
