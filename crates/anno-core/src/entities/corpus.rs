use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::TIMESTAMP;
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::nullable::{self, Nullable};
use crate::scalar::now_micros;
use crate::schema::Schema;

static TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
        ("copyrightAndUsageRestrictions", FieldRule::Rename("copyright")),
    ])
});

/// A named collection of assets.
///
/// `created` defaults to the time of construction (or of deserialization when
/// the payload omits it), computed per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Nullable<String>,
    #[serde(default = "now_micros")]
    pub created: NaiveDateTime,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub copyright: Nullable<String>,
    #[serde(default)]
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Corpus {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            created: now_micros(),
            copyright: None,
            id: 0,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }
}

impl Schema for Corpus {
    const ENTITY: &'static str = "Corpus";

    fn table() -> &'static MappingTable {
        &TABLE
    }
}
