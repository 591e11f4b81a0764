use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{TIMESTAMP, TagCodec};
use crate::dispatch::{expect_kind, polymorphic_family};
use crate::enums::QuestionKind;
use crate::errors::ModelError;
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::nullable::{self, Nullable};
use crate::schema::Schema;

static KIND: TagCodec<QuestionKind> = TagCodec::new();

static MULTIPLE_CHOICE_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("summaryCode", FieldRule::Rename("summary_code")),
        ("humanPrompt", FieldRule::Rename("human_prompt")),
        ("annotationInstructions", FieldRule::Rename("annotation_instructions")),
        (
            "detailedAnnotationInstructions",
            FieldRule::Rename("detailed_annotation_instructions"),
        ),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ("kind", FieldRule::Convert("kind", &KIND)),
    ])
});

static RANGE_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("summaryCode", FieldRule::Rename("summary_code")),
        ("humanPrompt", FieldRule::Rename("human_prompt")),
        ("canOverlap", FieldRule::Rename("can_overlap")),
        ("annotationInstructions", FieldRule::Rename("annotation_instructions")),
        (
            "detailedAnnotationInstructions",
            FieldRule::Rename("detailed_annotation_instructions"),
        ),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ("kind", FieldRule::Convert("kind", &KIND)),
    ])
});

static SEGMENTATION_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("summaryCode", FieldRule::Rename("summary_code")),
        ("humanPrompt", FieldRule::Rename("human_prompt")),
        ("maximumSegments", FieldRule::Rename("maximum_segments")),
        ("minimumSegments", FieldRule::Rename("minimum_segments")),
        ("segmentChoices", FieldRule::Rename("segment_choices")),
        ("freeFormAllowed", FieldRule::Rename("free_form_allowed")),
        ("annotationInstructions", FieldRule::Rename("annotation_instructions")),
        (
            "detailedAnnotationInstructions",
            FieldRule::Rename("detailed_annotation_instructions"),
        ),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ("kind", FieldRule::Convert("kind", &KIND)),
    ])
});

macro_rules! question_schema {
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

/// Pick one or more of a fixed set of choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub created: NaiveDateTime,
    pub summary_code: String,
    pub human_prompt: String,
    pub kind: QuestionKind,
    pub choices: Vec<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub annotation_instructions: Nullable<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub detailed_annotation_instructions: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipleChoiceQuestion {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        summary_code: impl Into<String>,
        human_prompt: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            created,
            summary_code: summary_code.into(),
            human_prompt: human_prompt.into(),
            kind: QuestionKind::MultipleChoice,
            choices,
            annotation_instructions: None,
            detailed_annotation_instructions: None,
            extra: Map::new(),
        }
    }
}

question_schema!(
    MultipleChoiceQuestion,
    QuestionKind::MultipleChoice,
    MULTIPLE_CHOICE_TABLE
);

/// Mark labelled ranges of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRangeQuestion {
    pub created: NaiveDateTime,
    pub summary_code: String,
    pub human_prompt: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub can_overlap: bool,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub annotation_instructions: Nullable<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub detailed_annotation_instructions: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeSeriesRangeQuestion {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        summary_code: impl Into<String>,
        human_prompt: impl Into<String>,
    ) -> Self {
        Self {
            created,
            summary_code: summary_code.into(),
            human_prompt: human_prompt.into(),
            kind: QuestionKind::TimeSeriesRange,
            can_overlap: false,
            annotation_instructions: None,
            detailed_annotation_instructions: None,
            extra: Map::new(),
        }
    }
}

question_schema!(
    TimeSeriesRangeQuestion,
    QuestionKind::TimeSeriesRange,
    RANGE_TABLE
);

/// Split a time series into segments, optionally labelling each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSegmentationQuestion {
    pub created: NaiveDateTime,
    pub summary_code: String,
    pub human_prompt: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub maximum_segments: i64,
    #[serde(default)]
    pub minimum_segments: i64,
    #[serde(default)]
    pub segment_choices: Vec<String>,
    #[serde(default)]
    pub free_form_allowed: bool,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub annotation_instructions: Nullable<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub detailed_annotation_instructions: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeSeriesSegmentationQuestion {
    #[must_use]
    pub fn new(
        created: NaiveDateTime,
        summary_code: impl Into<String>,
        human_prompt: impl Into<String>,
    ) -> Self {
        Self {
            created,
            summary_code: summary_code.into(),
            human_prompt: human_prompt.into(),
            kind: QuestionKind::TimeSeriesSegmentation,
            maximum_segments: 0,
            minimum_segments: 0,
            segment_choices: Vec::new(),
            free_form_allowed: false,
            annotation_instructions: None,
            detailed_annotation_instructions: None,
            extra: Map::new(),
        }
    }
}

question_schema!(
    TimeSeriesSegmentationQuestion,
    QuestionKind::TimeSeriesSegmentation,
    SEGMENTATION_TABLE
);

polymorphic_family! {
    /// A question of any kind, selected by its `kind` tag.
    pub enum Question: QuestionKind {
        TimeSeriesSegmentation(TimeSeriesSegmentationQuestion),
        TimeSeriesRange(TimeSeriesRangeQuestion),
        MultipleChoice(MultipleChoiceQuestion),
    }
}

impl Question {
    #[must_use]
    pub fn summary_code(&self) -> &str {
        match self {
            Self::TimeSeriesSegmentation(inner) => &inner.summary_code,
            Self::TimeSeriesRange(inner) => &inner.summary_code,
            Self::MultipleChoice(inner) => &inner.summary_code,
        }
    }

    #[must_use]
    pub fn human_prompt(&self) -> &str {
        match self {
            Self::TimeSeriesSegmentation(inner) => &inner.human_prompt,
            Self::TimeSeriesRange(inner) => &inner.human_prompt,
            Self::MultipleChoice(inner) => &inner.human_prompt,
        }
    }
}
