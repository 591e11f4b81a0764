//! # anno-core
//!
//! Wire-format data model for the annotation service client.
//!
//! The service speaks camelCase JSON with ISO-8601 timestamps and base64
//! payloads. This crate converts between that wire form and native Rust types:
//! - Scalar codecs for timestamps and base64 bytes
//! - Declarative per-entity field mapping tables (rename or convert)
//! - A generic table-driven converter that passes unknown fields through
//! - Kind dispatch for the polymorphic annotation and question families
//! - Entity structs for corpora, assets, questions, annotations, assignments, users
//! - Enumerations with their wire tags
//! - Nullable optional fields that keep absent and `null` apart
//! - Error types shared by every conversion

pub mod codec;
pub mod convert;
pub mod dispatch;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod mapping;
pub mod nullable;
pub mod scalar;
pub mod schema;

pub use errors::ModelError;
pub use schema::{Schema, WireEntity};
