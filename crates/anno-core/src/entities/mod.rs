//! Entity schemas for every resource the annotation service exchanges.
//!
//! Each struct carries its mapping table through [`Schema`](crate::schema::Schema)
//! and collects unmapped wire fields in `extra`. The two polymorphic families,
//! [`Annotation`] and [`Question`], dispatch on the wire `kind` field.

mod annotation;
mod asset;
mod assignment;
mod corpus;
mod question;
mod responses;
mod user;

pub use annotation::{
    Annotation, GenericJsonAnnotation, MultipleChoiceAnnotation, TextAnnotation,
    TimeSeriesRange, TimeSeriesRangeAnnotation, TimeSeriesSegmentationAnnotation,
};
pub use asset::{AssetCorpusLink, BinaryAsset};
pub use assignment::Assignment;
pub use corpus::Corpus;
pub use question::{
    MultipleChoiceQuestion, Question, TimeSeriesRangeQuestion, TimeSeriesSegmentationQuestion,
};
pub use responses::{ConfigurationResponse, FieldError, SuccessfulInsert, ValidationError};
pub use user::{LoginRequest, LoginResponse, NewUserRequest, User};
