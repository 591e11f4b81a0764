use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{BYTES_B64, TIMESTAMP, TagCodec};
use crate::enums::BinaryAssetKind;
use crate::mapping::{FieldRule, MappingTable, static_table};
use crate::nullable::{self, Nullable};
use crate::scalar::now_micros;
use crate::schema::Schema;

static TYPE_DESCRIPTION: TagCodec<BinaryAssetKind> = TagCodec::new();

static ASSET_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("userIdWhoUploaded", FieldRule::Rename("uploader_id")),
        ("dateUploaded", FieldRule::Convert("date_uploaded", &TIMESTAMP)),
        ("copyrightAndUsageRestrictions", FieldRule::Rename("copyright")),
        ("content", FieldRule::Convert("content", &BYTES_B64)),
        ("mimeType", FieldRule::Rename("mime_type")),
        (
            "typeDescription",
            FieldRule::Convert("type_description", &TYPE_DESCRIPTION),
        ),
    ])
});

static LINK_TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    static_table([
        ("uniqueName", FieldRule::Rename("unique_name")),
        ("assetId", FieldRule::Rename("asset_id")),
        ("corpusId", FieldRule::Rename("corpus_id")),
    ])
});

/// A document stored in a corpus. `content` travels as base64 on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryAsset {
    pub content: Vec<u8>,
    pub mime_type: String,
    pub type_description: BinaryAssetKind,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub copyright: Nullable<String>,
    /// Hex digest of `content`, computed by the uploader.
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub checksum: Nullable<String>,
    #[serde(default)]
    pub uploader_id: i64,
    #[serde(default = "now_micros")]
    pub date_uploaded: NaiveDateTime,
    #[serde(default)]
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Nullable<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BinaryAsset {
    #[must_use]
    pub fn new(
        content: Vec<u8>,
        mime_type: impl Into<String>,
        type_description: BinaryAssetKind,
    ) -> Self {
        Self {
            content,
            mime_type: mime_type.into(),
            type_description,
            copyright: None,
            checksum: None,
            uploader_id: 0,
            date_uploaded: now_micros(),
            id: 0,
            metadata: None,
            extra: Map::new(),
        }
    }
}

impl Schema for BinaryAsset {
    const ENTITY: &'static str = "BinaryAsset";

    fn table() -> &'static MappingTable {
        &ASSET_TABLE
    }
}

/// Places an asset inside a corpus under a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCorpusLink {
    pub unique_name: String,
    pub asset_id: i64,
    pub corpus_id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetCorpusLink {
    #[must_use]
    pub fn new(unique_name: impl Into<String>, asset_id: i64, corpus_id: i64) -> Self {
        Self {
            unique_name: unique_name.into(),
            asset_id,
            corpus_id,
            extra: Map::new(),
        }
    }
}

impl Schema for AssetCorpusLink {
    const ENTITY: &'static str = "AssetCorpusLink";

    fn table() -> &'static MappingTable {
        &LINK_TABLE
    }
}
