use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::codec::{ListCodec, TIMESTAMP, TagCodec};
use crate::dispatch::{expect_kind, polymorphic_family};
use crate::enums::{AnnotationKind, AnnotationSource};
use crate::errors::ModelError;
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::schema::Schema;

static SOURCE: TagCodec<AnnotationSource> = TagCodec::new();
static KIND: TagCodec<AnnotationKind> = TagCodec::new();
static RANGES: ListCodec<TimeSeriesRange> = ListCodec::new();

/// Fields every annotation variant shares.
static COMMON_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("summaryCode", FieldRule::Rename("summary_code")),
        ("source", FieldRule::Convert("source", &SOURCE)),
        ("kind", FieldRule::Convert("kind", &KIND)),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
    ])
});

static RANGE_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("summaryCode", FieldRule::Rename("summary_code")),
        ("source", FieldRule::Convert("source", &SOURCE)),
        ("kind", FieldRule::Convert("kind", &KIND)),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ("ranges", FieldRule::Convert("ranges", &RANGES)),
    ])
});

static EMPTY_TABLE: LazyLock<MappingTable> = LazyLock::new(MappingTable::empty);

/// Implements [`Schema`] for an annotation variant: table plus `kind` check.
macro_rules! annotation_schema {
    ($ty:ty, $kind:expr, $table:expr) => {
        impl Schema for $ty {
            const ENTITY: &'static str = $kind.as_str();

            fn table() -> &'static MappingTable {
                &$table
            }

            fn check_invariants(&self) -> Result<(), ModelError> {
                expect_kind($kind, self.kind)
            }
        }
    };
}

/// Word-level (or other) segmentation of a time series: boundaries plus one
/// label per segment.
///
/// Boundaries are kept as JSON numbers so integer and float inputs come back
/// exactly as they were sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSegmentationAnnotation {
    pub created: NaiveDateTime,
    pub source: AnnotationSource,
    pub kind: AnnotationKind,
    pub summary_code: String,
    pub segments: Vec<Number>,
    pub annotations: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeSeriesSegmentationAnnotation {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        source: AnnotationSource,
        summary_code: impl Into<String>,
        segments: Vec<Number>,
        annotations: Vec<String>,
    ) -> Self {
        Self {
            created,
            source,
            kind: AnnotationKind::TimeSeriesSegmentation,
            summary_code: summary_code.into(),
            segments,
            annotations,
            extra: Map::new(),
        }
    }
}

annotation_schema!(
    TimeSeriesSegmentationAnnotation,
    AnnotationKind::TimeSeriesSegmentation,
    COMMON_TABLE
);

/// One labelled span inside a [`TimeSeriesRangeAnnotation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRange {
    pub label: String,
    pub start: Number,
    pub end: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeSeriesRange {
    #[must_use]
    pub fn new(label: impl Into<String>, start: Number, end: Number) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            extra: Map::new(),
        }
    }
}

impl Schema for TimeSeriesRange {
    const ENTITY: &'static str = "TimeSeriesRange";

    fn table() -> &'static MappingTable {
        &EMPTY_TABLE
    }
}

/// Labelled, possibly overlapping spans of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRangeAnnotation {
    pub created: NaiveDateTime,
    pub source: AnnotationSource,
    pub kind: AnnotationKind,
    pub summary_code: String,
    pub ranges: Vec<TimeSeriesRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeSeriesRangeAnnotation {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        source: AnnotationSource,
        summary_code: impl Into<String>,
        ranges: Vec<TimeSeriesRange>,
    ) -> Self {
        Self {
            created,
            source,
            kind: AnnotationKind::TimeSeriesRange,
            summary_code: summary_code.into(),
            ranges,
            extra: Map::new(),
        }
    }
}

annotation_schema!(
    TimeSeriesRangeAnnotation,
    AnnotationKind::TimeSeriesRange,
    RANGE_TABLE
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceAnnotation {
    pub created: NaiveDateTime,
    pub source: AnnotationSource,
    pub kind: AnnotationKind,
    pub summary_code: String,
    pub choices: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipleChoiceAnnotation {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        source: AnnotationSource,
        summary_code: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            created,
            source,
            kind: AnnotationKind::MultipleChoice,
            summary_code: summary_code.into(),
            choices,
            extra: Map::new(),
        }
    }
}

annotation_schema!(
    MultipleChoiceAnnotation,
    AnnotationKind::MultipleChoice,
    COMMON_TABLE
);

/// Free-form JSON content, opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericJsonAnnotation {
    pub created: NaiveDateTime,
    pub source: AnnotationSource,
    pub kind: AnnotationKind,
    pub summary_code: String,
    pub content: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenericJsonAnnotation {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        source: AnnotationSource,
        summary_code: impl Into<String>,
        content: Value,
    ) -> Self {
        Self {
            created,
            source,
            kind: AnnotationKind::GenericJson,
            summary_code: summary_code.into(),
            content,
            extra: Map::new(),
        }
    }
}

annotation_schema!(GenericJsonAnnotation, AnnotationKind::GenericJson, COMMON_TABLE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub created: NaiveDateTime,
    pub source: AnnotationSource,
    pub kind: AnnotationKind,
    pub summary_code: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextAnnotation {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        source: AnnotationSource,
        summary_code: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            created,
            source,
            kind: AnnotationKind::Text,
            summary_code: summary_code.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }
}

annotation_schema!(TextAnnotation, AnnotationKind::Text, COMMON_TABLE);

polymorphic_family! {
    /// An annotation of any kind, selected by its `kind` tag.
    pub enum Annotation: AnnotationKind {
        TimeSeriesSegmentation(TimeSeriesSegmentationAnnotation),
        TimeSeriesRange(TimeSeriesRangeAnnotation),
        MultipleChoice(MultipleChoiceAnnotation),
        GenericJson(GenericJsonAnnotation),
        Text(TextAnnotation),
    }
}

impl Annotation {
    #[must_use]
    pub const fn source(&self) -> AnnotationSource {
        match self {
            Self::TimeSeriesSegmentation(inner) => inner.source,
            Self::TimeSeriesRange(inner) => inner.source,
            Self::MultipleChoice(inner) => inner.source,
            Self::GenericJson(inner) => inner.source,
            Self::Text(inner) => inner.source,
        }
    }

    #[must_use]
    pub fn summary_code(&self) -> &str {
        match self {
            Self::TimeSeriesSegmentation(inner) => &inner.summary_code,
            Self::TimeSeriesRange(inner) => &inner.summary_code,
            Self::MultipleChoice(inner) => &inner.summary_code,
            Self::GenericJson(inner) => &inner.summary_code,
            Self::Text(inner) => &inner.summary_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WireEntity;
    use chrono::NaiveDate;
    use serde_json::json;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 4, 23)
            .unwrap()
            .and_hms_micro_opt(18, 25, 43, 511_000)
            .unwrap()
    }

    #[test]
    fn constructors_set_matching_kind() {
        let text = TextAnnotation::new(created(), AnnotationSource::Human, "EVALUATION", "?");
        assert_eq!(text.kind, AnnotationKind::Text);
        assert!(text.check_invariants().is_ok());

        let annotation = Annotation::from(text);
        assert_eq!(annotation.kind(), AnnotationKind::Text);
        assert_eq!(annotation.summary_code(), "EVALUATION");
        assert_eq!(annotation.source(), AnnotationSource::Human);
    }

    #[test]
    fn mistagged_variant_refuses_to_serialize() {
        let mut text = TextAnnotation::new(created(), AnnotationSource::Human, "EVALUATION", "?");
        text.kind = AnnotationKind::MultipleChoice;

        let err = text.to_wire().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvariantViolation {
                expected: "TextAnnotation",
                found: "MultipleChoiceAnnotation",
                ..
            }
        ));
    }

    #[test]
    fn concrete_schema_rejects_foreign_kind() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "kind": "TextAnnotation",
            "source": "Human",
            "summaryCode": "SENTIMENT",
            "choices": ["positive"],
        });
        let err = MultipleChoiceAnnotation::from_wire(&wire).unwrap_err();
        assert!(matches!(err, ModelError::InvariantViolation { .. }));
    }

    #[test]
    fn missing_required_field_is_a_schema_error() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "kind": "TextAnnotation",
            "source": "Human",
            "summaryCode": "EVALUATION",
        });
        let err = Annotation::from_wire(&wire).unwrap_err();
        assert!(matches!(err, ModelError::Schema { entity: "TextAnnotation", .. }));
    }

    #[test]
    fn native_form_dispatches_on_kind() {
        let annotation = Annotation::from(MultipleChoiceAnnotation::new(
            created(),
            AnnotationSource::Aggregated,
            "SENTIMENT",
            vec!["positive".into()],
        ));
        let native = serde_json::to_value(&annotation).unwrap();
        assert_eq!(native["summary_code"], json!("SENTIMENT"));

        let back: Annotation = serde_json::from_value(native).unwrap();
        assert_eq!(back, annotation);
    }

    #[test]
    fn range_elements_keep_unknown_fields() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "kind": "TimeSeriesRangeAnnotation",
            "source": "SystemGenerated",
            "summaryCode": "AMBIENT",
            "ranges": [{ "label": "noisy", "start": 0.0, "end": 0.1, "confidence": 0.9 }],
        });
        let Annotation::TimeSeriesRange(range) = Annotation::from_wire(&wire).unwrap() else {
            panic!("expected a range annotation");
        };
        assert_eq!(range.ranges[0].extra["confidence"], json!(0.9));
        assert_eq!(range.to_wire().unwrap(), wire);
    }

    #[test]
    fn integer_boundaries_stay_integers() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "kind": "TimeSeriesSegmentationAnnotation",
            "source": "Human",
            "summaryCode": "WORDS",
            "segments": [0, 2.5, 4],
            "annotations": ["hello", "world"],
        });
        let Annotation::TimeSeriesSegmentation(inner) = Annotation::from_wire(&wire).unwrap()
        else {
            panic!("expected a segmentation annotation");
        };
        assert!(inner.segments[0].is_i64());
        assert!(inner.segments[1].is_f64());
        assert_eq!(inner.to_wire().unwrap(), wire);
    }

    #[test]
    fn integer_range_bounds_stay_integers() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "kind": "TimeSeriesRangeAnnotation",
            "source": "Human",
            "summaryCode": "AMBIENT",
            "ranges": [{ "label": "quiet", "start": 0, "end": 1 }],
        });
        let annotation = Annotation::from_wire(&wire).unwrap();
        assert_eq!(annotation.to_wire().unwrap(), wire);

        let range = TimeSeriesRange::new("quiet", Number::from(0_i64), Number::from(1_i64));
        assert_eq!(range.to_wire().unwrap(), json!({ "label": "quiet", "start": 0, "end": 1 }));
    }

    #[test]
    fn malformed_range_element_names_its_index() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "kind": "TimeSeriesRangeAnnotation",
            "source": "Human",
            "summaryCode": "AMBIENT",
            "ranges": [
                { "label": "noisy", "start": 0.0, "end": 0.1 },
                { "label": "talking", "start": "soon", "end": 0.25 },
            ],
        });
        let err = Annotation::from_wire(&wire).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("ranges.1"));
        assert!(matches!(err.root(), ModelError::Schema { entity: "TimeSeriesRange", .. }));
    }
}
