use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{TIMESTAMP, TagCodec};
use crate::enums::UserKind;
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::nullable::{self, Nullable};
use crate::scalar::now_micros;
use crate::schema::Schema;

static ROLE: TagCodec<UserKind> = TagCodec::new();

static NEW_USER_TABLE: LazyLock<MappingTable> =
    LazyLock::new(|| static_table([("role", FieldRule::Convert("role", &ROLE))]));

static USER_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("role", FieldRule::Convert("role", &ROLE)),
        ("created", FieldRule::Convert("created", &TIMESTAMP)),
    ])
});

static EMPTY_TABLE: LazyLock<MappingTable> = LazyLock::new(MappingTable::empty);

/// Request body for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
    pub email: String,
    pub role: UserKind,
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewUserRequest {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        role: UserKind,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            role,
            password: password.into(),
            extra: Map::new(),
        }
    }
}

impl Schema for NewUserRequest {
    const ENTITY: &'static str = "NewUserRequest";

    fn table() -> &'static MappingTable {
        &NEW_USER_TABLE
    }
}

/// A user account as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub role: UserKind,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Nullable<String>,
    #[serde(default = "now_micros")]
    pub created: NaiveDateTime,
    #[serde(default)]
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for User {
    const ENTITY: &'static str = "User";

    fn table() -> &'static MappingTable {
        &USER_TABLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            extra: Map::new(),
        }
    }
}

impl Schema for LoginRequest {
    const ENTITY: &'static str = "LoginRequest";

    fn table() -> &'static MappingTable {
        &EMPTY_TABLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema for LoginResponse {
    const ENTITY: &'static str = "LoginResponse";

    fn table() -> &'static MappingTable {
        &EMPTY_TABLE
    }
}
