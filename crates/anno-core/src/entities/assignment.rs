use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{EntityCodec, TIMESTAMP};
use crate::entities::{Annotation, Question};
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::nullable::{self, Nullable};
use crate::scalar::now_micros;
use crate::schema::Schema;

static QUESTION: EntityCodec<Question> = EntityCodec::new();
static RESPONSE: EntityCodec<Annotation> = EntityCodec::new();

static TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("userId", FieldRule::Rename("user_id")),
        ("questionId", FieldRule::Rename("question_id")),
        ("assignedUserId", FieldRule::Rename("assigned_user_id")),
        ("assignedAnnotatorId", FieldRule::Rename("assigned_annotator_id")),
        ("assignedReviewerId", FieldRule::Rename("assigned_reviewer_id")),
        ("actualReviewerId", FieldRule::Rename("actual_reviewer_id")),
        ("annotatorNotes", FieldRule::Rename("annotator_notes")),
        ("reviewerNotes", FieldRule::Rename("reviewer_notes")),
        ("originalAnnotationId", FieldRule::Rename("original_annotation_id")),
        ("correctedAnnotationId", FieldRule::Rename("corrected_annotation_id")),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ("completed", FieldRule::Convert("completed", &TIMESTAMP)),
        ("reviewed", FieldRule::Convert("reviewed", &TIMESTAMP)),
        ("question", FieldRule::Convert("question", &QUESTION)),
        ("response", FieldRule::Convert("response", &RESPONSE)),
    ])
});

/// A question handed to an annotator, optionally with their response and
/// the reviewer's verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub assets: Nullable<Vec<i64>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_user_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_annotator_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_reviewer_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_reviewer_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub question: Nullable<Question>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub response: Nullable<Annotation>,
    #[serde(default = "now_micros")]
    pub created: NaiveDateTime,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Nullable<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub reviewed: Nullable<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub annotator_notes: Nullable<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub reviewer_notes: Nullable<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_annotation_id: Nullable<i64>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub corrected_annotation_id: Nullable<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Assignment {
    /// A fresh assignment of `question` to a user, created now.
    #[must_use]
    pub fn new(assigned_user_id: i64, question: Question) -> Self {
        Self {
            user_id: None,
            question_id: None,
            assets: None,
            assigned_user_id: Some(Some(assigned_user_id)),
            assigned_annotator_id: None,
            assigned_reviewer_id: None,
            actual_reviewer_id: None,
            question: Some(Some(question)),
            response: None,
            created: now_micros(),
            completed: None,
            reviewed: None,
            annotator_notes: None,
            reviewer_notes: None,
            original_annotation_id: None,
            corrected_annotation_id: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.completed, Some(Some(_)))
    }

    #[must_use]
    pub const fn is_reviewed(&self) -> bool {
        matches!(self.reviewed, Some(Some(_)))
    }
}

impl Schema for Assignment {
    const ENTITY: &'static str = "Assignment";

    fn table() -> &'static MappingTable {
        &TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MultipleChoiceQuestion;
    use crate::errors::ModelError;
    use crate::scalar::decode_timestamp;
    use crate::schema::WireEntity;
    use serde_json::json;

    #[test]
    fn reviewer_ids_stay_distinct() {
        let wire = json!({
            "assignedReviewerId": 47,
            "actualReviewerId": 48,
            "created": "2018-04-23T18:25:43.511000Z",
        });
        let assignment = Assignment::from_wire(&wire).unwrap();
        assert_eq!(assignment.assigned_reviewer_id, Some(Some(47)));
        assert_eq!(assignment.actual_reviewer_id, Some(Some(48)));
        assert_eq!(assignment.to_wire().unwrap(), wire);
    }

    #[test]
    fn new_assignment_nests_question_in_wire_form() {
        let created = decode_timestamp("2018-04-23T18:25:43.511000Z").unwrap();
        let question = MultipleChoiceQuestion::new(
            created,
            "SENTIMENT",
            "Judge whether this text is positive",
            vec!["positive".into()],
        );
        let assignment = Assignment::new(12, question.into());
        assert!(!assignment.is_completed());
        assert!(!assignment.is_reviewed());

        let wire = assignment.to_wire().unwrap();
        assert_eq!(wire["assignedUserId"], json!(12));
        assert_eq!(wire["question"]["kind"], json!("MultipleChoiceQuestion"));
        assert_eq!(wire["question"]["created"], json!("2018-04-23T18:25:43.511000Z"));
        assert_eq!(wire["question"]["humanPrompt"], json!("Judge whether this text is positive"));
    }

    #[test]
    fn nested_unknown_kind_names_the_field() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "response": { "kind": "Bogus" },
        });
        let err = Assignment::from_wire(&wire).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("response"));
        assert!(matches!(err.root(), ModelError::UnknownKind { .. }));
    }

    #[test]
    fn null_question_stays_null() {
        let wire = json!({
            "created": "2018-04-23T18:25:43.511000Z",
            "question": null,
            "completed": null,
        });
        let assignment = Assignment::from_wire(&wire).unwrap();
        assert_eq!(assignment.question, Some(None));
        assert!(!assignment.is_completed());
        assert_eq!(assignment.to_wire().unwrap(), wire);
    }

    #[test]
    fn absent_question_stays_absent() {
        let assignment = Assignment::from_wire(&json!({
            "created": "2018-04-23T18:25:43.511000Z",
        }))
        .unwrap();
        assert!(assignment.question.is_none());
        assert!(assignment.to_wire().unwrap().get("question").is_none());
    }
}
