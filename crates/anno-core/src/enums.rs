//! Closed tag enumerations used on the wire.
//!
//! Every enum serializes as its declared wire tag (`"Human"`,
//! `"TimeSeriesRangeAnnotation"`, `"UTF8Text"`, ...), never as a numeric code.
//! The native side holds the enum member; [`WireTag`] gives the mapping tables
//! a uniform way to validate and look up tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of string tags shared by wire and native representations.
pub trait WireTag: Copy + Eq + fmt::Display + 'static {
    /// Human-readable name of the enumeration, used in error messages.
    const FAMILY: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The wire tag of this member.
    fn tag(self) -> &'static str;

    /// Look up a member by its exact wire tag.
    #[must_use]
    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.tag() == tag)
    }
}

// ---------------------------------------------------------------------------
// AnnotationSource
// ---------------------------------------------------------------------------

/// Where an annotation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationSource {
    Reference,
    SystemGenerated,
    Human,
    Aggregated,
}

impl AnnotationSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "Reference",
            Self::SystemGenerated => "SystemGenerated",
            Self::Human => "Human",
            Self::Aggregated => "Aggregated",
        }
    }
}

impl WireTag for AnnotationSource {
    const FAMILY: &'static str = "annotation source";
    const ALL: &'static [Self] = &[
        Self::Reference,
        Self::SystemGenerated,
        Self::Human,
        Self::Aggregated,
    ];

    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AnnotationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AnnotationKind
// ---------------------------------------------------------------------------

/// Discriminator describing the structure of an annotation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    #[serde(rename = "TimeSeriesSegmentationAnnotation")]
    TimeSeriesSegmentation,
    #[serde(rename = "TimeSeriesRangeAnnotation")]
    TimeSeriesRange,
    #[serde(rename = "MultipleChoiceAnnotation")]
    MultipleChoice,
    #[serde(rename = "GenericJSONAnnotation")]
    GenericJson,
    #[serde(rename = "TextAnnotation")]
    Text,
}

impl AnnotationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeriesSegmentation => "TimeSeriesSegmentationAnnotation",
            Self::TimeSeriesRange => "TimeSeriesRangeAnnotation",
            Self::MultipleChoice => "MultipleChoiceAnnotation",
            Self::GenericJson => "GenericJSONAnnotation",
            Self::Text => "TextAnnotation",
        }
    }
}

impl WireTag for AnnotationKind {
    const FAMILY: &'static str = "annotation kind";
    const ALL: &'static [Self] = &[
        Self::TimeSeriesSegmentation,
        Self::TimeSeriesRange,
        Self::MultipleChoice,
        Self::GenericJson,
        Self::Text,
    ];

    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionKind
// ---------------------------------------------------------------------------

/// Discriminator describing the structure of a question payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "TimeSeriesSegmentationQuestion")]
    TimeSeriesSegmentation,
    #[serde(rename = "TimeSeriesRangeQuestion")]
    TimeSeriesRange,
    #[serde(rename = "MultipleChoiceQuestion")]
    MultipleChoice,
}

impl QuestionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeriesSegmentation => "TimeSeriesSegmentationQuestion",
            Self::TimeSeriesRange => "TimeSeriesRangeQuestion",
            Self::MultipleChoice => "MultipleChoiceQuestion",
        }
    }
}

impl WireTag for QuestionKind {
    const FAMILY: &'static str = "question kind";
    const ALL: &'static [Self] = &[
        Self::TimeSeriesSegmentation,
        Self::TimeSeriesRange,
        Self::MultipleChoice,
    ];

    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserKind
// ---------------------------------------------------------------------------

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserKind {
    Administrator,
    Staff,
    Reviewer,
    Annotator,
}

impl UserKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Staff => "Staff",
            Self::Reviewer => "Reviewer",
            Self::Annotator => "Annotator",
        }
    }
}

impl WireTag for UserKind {
    const FAMILY: &'static str = "user role";
    const ALL: &'static [Self] = &[
        Self::Administrator,
        Self::Staff,
        Self::Reviewer,
        Self::Annotator,
    ];

    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BinaryAssetKind
// ---------------------------------------------------------------------------

/// Broad media type of a binary asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryAssetKind {
    #[serde(rename = "UTF8Text")]
    Utf8Text,
    Audio,
    Image,
    Video,
    Other,
}

impl BinaryAssetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8Text => "UTF8Text",
            Self::Audio => "Audio",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Other => "Other",
        }
    }
}

impl WireTag for BinaryAssetKind {
    const FAMILY: &'static str = "binary asset kind";
    const ALL: &'static [Self] = &[
        Self::Utf8Text,
        Self::Audio,
        Self::Image,
        Self::Video,
        Self::Other,
    ];

    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for BinaryAssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DataLossReason
// ---------------------------------------------------------------------------

/// Why the service refused a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataLossReason {
    AssetStillLinkedToCorpus,
    AssetContainsAnnotationsInCorpus,
    QuestionHasAnnotations,
}

impl DataLossReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssetStillLinkedToCorpus => "AssetStillLinkedToCorpus",
            Self::AssetContainsAnnotationsInCorpus => "AssetContainsAnnotationsInCorpus",
            Self::QuestionHasAnnotations => "QuestionHasAnnotations",
        }
    }
}

impl WireTag for DataLossReason {
    const FAMILY: &'static str = "data loss reason";
    const ALL: &'static [Self] = &[
        Self::AssetStillLinkedToCorpus,
        Self::AssetContainsAnnotationsInCorpus,
        Self::QuestionHasAnnotations,
    ];

    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for DataLossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
