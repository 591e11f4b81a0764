//! `anno decode`, `anno encode` and `anno roundtrip`.

use std::collections::BTreeSet;

use anno_core::WireEntity;
use anno_core::entities::{
    Annotation, AssetCorpusLink, Assignment, BinaryAsset, ConfigurationResponse, Corpus,
    FieldError, LoginRequest, LoginResponse, NewUserRequest, Question, SuccessfulInsert, User,
    ValidationError,
};
use anyhow::{Context, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cli::{ConvertArgs, EntityArg};
use crate::output;

/// Run `$body` with `$ty` aliased to the entity type selected by `$entity`.
macro_rules! with_entity {
    ($entity:expr, $ty:ident => $body:expr) => {
        match $entity {
            EntityArg::Annotation => {
                type $ty = Annotation;
                $body
            }
            EntityArg::Question => {
                type $ty = Question;
                $body
            }
            EntityArg::Corpus => {
                type $ty = Corpus;
                $body
            }
            EntityArg::Asset => {
                type $ty = BinaryAsset;
                $body
            }
            EntityArg::AssetLink => {
                type $ty = AssetCorpusLink;
                $body
            }
            EntityArg::Assignment => {
                type $ty = Assignment;
                $body
            }
            EntityArg::NewUser => {
                type $ty = NewUserRequest;
                $body
            }
            EntityArg::User => {
                type $ty = User;
                $body
            }
            EntityArg::FieldError => {
                type $ty = FieldError;
                $body
            }
            EntityArg::ValidationError => {
                type $ty = ValidationError;
                $body
            }
            EntityArg::Configuration => {
                type $ty = ConfigurationResponse;
                $body
            }
            EntityArg::Inserted => {
                type $ty = SuccessfulInsert;
                $body
            }
            EntityArg::LoginRequest => {
                type $ty = LoginRequest;
                $body
            }
            EntityArg::LoginResponse => {
                type $ty = LoginResponse;
                $body
            }
        }
    };
}

/// Handle `anno decode`: wire JSON in, native JSON out.
pub fn decode(args: &ConvertArgs, default_entity: &str, pretty: bool) -> anyhow::Result<()> {
    let entity = EntityArg::resolve(args.entity, default_entity)?;
    let wire = output::read_json(args.input.as_deref())?;
    let native = with_entity!(entity, T => decode_as::<T>(&wire))?;
    output::output(&native, pretty)
}

/// Handle `anno encode`: native JSON in, wire JSON out.
pub fn encode(args: &ConvertArgs, default_entity: &str, pretty: bool) -> anyhow::Result<()> {
    let entity = EntityArg::resolve(args.entity, default_entity)?;
    let native = output::read_json(args.input.as_deref())?;
    let wire = with_entity!(entity, T => encode_as::<T>(native))?;
    output::output(&wire, pretty)
}

/// Handle `anno roundtrip`. Prints the re-encoded payload, then fails if it
/// differs from the input.
pub fn roundtrip(args: &ConvertArgs, default_entity: &str, pretty: bool) -> anyhow::Result<()> {
    let entity = EntityArg::resolve(args.entity, default_entity)?;
    let wire = output::read_json(args.input.as_deref())?;
    let rewired = with_entity!(entity, T => roundtrip_as::<T>(&wire))?;
    output::output(&rewired, pretty)?;

    let changed = diff_paths(&wire, &rewired);
    if !changed.is_empty() {
        bail!(
            "round trip changed {} field(s): {}",
            changed.len(),
            changed.join(", ")
        );
    }
    tracing::info!(?entity, "round trip is lossless");
    Ok(())
}

fn decode_as<T: WireEntity + Serialize>(wire: &Value) -> anyhow::Result<Value> {
    let entity = T::from_wire(wire).with_context(|| format!("failed to decode {}", T::NAME))?;
    serde_json::to_value(&entity).with_context(|| format!("failed to serialize {}", T::NAME))
}

fn encode_as<T: WireEntity + DeserializeOwned>(native: Value) -> anyhow::Result<Value> {
    let entity: T = serde_json::from_value(native)
        .with_context(|| format!("input is not a native {}", T::NAME))?;
    entity
        .to_wire()
        .with_context(|| format!("failed to encode {}", T::NAME))
}

fn roundtrip_as<T: WireEntity>(wire: &Value) -> anyhow::Result<Value> {
    let entity = T::from_wire(wire).with_context(|| format!("failed to decode {}", T::NAME))?;
    entity
        .to_wire()
        .with_context(|| format!("failed to encode {}", T::NAME))
}

/// Paths (`a.b.0`) at which two JSON documents differ. `$` is the root.
pub fn diff_paths(before: &Value, after: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_diffs(before, after, "", &mut out);
    out
}

fn collect_diffs(before: &Value, after: &Value, path: &str, out: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(left), Value::Object(right)) => {
            let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
            for key in keys {
                let child = join_path(path, key);
                match (left.get(key), right.get(key)) {
                    (Some(l), Some(r)) => collect_diffs(l, r, &child, out),
                    _ => out.push(child),
                }
            }
        }
        (Value::Array(left), Value::Array(right)) if left.len() == right.len() => {
            for (index, (l, r)) in left.iter().zip(right).enumerate() {
                collect_diffs(l, r, &join_path(path, &index.to_string()), out);
            }
        }
        _ if before == after => {}
        _ => out.push(if path.is_empty() {
            "$".to_string()
        } else {
            path.to_string()
        }),
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}
