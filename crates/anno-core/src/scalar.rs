//! Scalar wire codecs.
//!
//! The annotation API encodes timestamps as `YYYY-MM-DDTHH:MM:SS.ffffffZ`
//! (naive UTC, microsecond precision, literal `Z`) and binary content as
//! padded standard-alphabet base64. These functions convert between those
//! encodings and native Rust values; the mapping tables wrap them as field
//! codecs (see [`crate::codec`]).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDateTime, SubsecRound, Timelike, Utc};
use thiserror::Error;

/// Date and whole-second part of a wire timestamp.
const WIRE_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Full wire timestamp, always rendered with six fractional digits.
const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

const MAX_FRACTION_DIGITS: usize = 6;

/// Malformed scalar encoding on the wire.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The string does not match the wire timestamp pattern.
    #[error("Invalid timestamp '{input}': {reason}")]
    Timestamp { input: String, reason: String },

    /// The string is not valid standard base64.
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Anything [`decode_timestamp`] accepts: a wire string, or a timestamp that
/// has already been decoded.
pub trait TimestampInput {
    fn into_timestamp(self) -> Result<NaiveDateTime, FormatError>;
}

impl TimestampInput for &str {
    fn into_timestamp(self) -> Result<NaiveDateTime, FormatError> {
        parse_wire_timestamp(self)
    }
}

impl TimestampInput for &String {
    fn into_timestamp(self) -> Result<NaiveDateTime, FormatError> {
        parse_wire_timestamp(self)
    }
}

impl TimestampInput for String {
    fn into_timestamp(self) -> Result<NaiveDateTime, FormatError> {
        parse_wire_timestamp(&self)
    }
}

impl TimestampInput for NaiveDateTime {
    fn into_timestamp(self) -> Result<NaiveDateTime, FormatError> {
        Ok(self)
    }
}

/// Parse a wire timestamp. Already-native timestamps are returned unchanged.
///
/// One to six fractional digits are accepted and right-padded to
/// microseconds, so `.511Z` and `.511000Z` decode to the same instant.
///
/// # Errors
///
/// Returns [`FormatError::Timestamp`] if the string does not match the wire
/// pattern exactly.
pub fn decode_timestamp<T: TimestampInput>(input: T) -> Result<NaiveDateTime, FormatError> {
    input.into_timestamp()
}

/// Render a timestamp in wire form. Sub-microsecond precision is truncated.
#[must_use]
pub fn encode_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(WIRE_TIMESTAMP_FORMAT).to_string()
}

/// Decode padded standard-alphabet base64.
///
/// # Errors
///
/// Returns [`FormatError::Base64`] on malformed input.
pub fn decode_bytes_b64(input: &str) -> Result<Vec<u8>, FormatError> {
    Ok(STANDARD.decode(input)?)
}

/// Encode bytes as padded standard-alphabet base64 without line wrapping.
#[must_use]
pub fn encode_bytes_b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Current UTC time at the precision the wire can carry.
///
/// Used as a per-construction default for `created`-style fields.
#[must_use]
pub fn now_micros() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

fn parse_wire_timestamp(input: &str) -> Result<NaiveDateTime, FormatError> {
    let invalid = |reason: &str| FormatError::Timestamp {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let body = input
        .strip_suffix('Z')
        .ok_or_else(|| invalid("missing trailing 'Z'"))?;
    let (seconds, fraction) = body
        .split_once('.')
        .ok_or_else(|| invalid("missing fractional seconds"))?;

    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("fractional seconds must be 1 to 6 digits"));
    }

    let whole = NaiveDateTime::parse_from_str(seconds, WIRE_SECONDS_FORMAT)
        .map_err(|error| invalid(&error.to_string()))?;
    let micros: u32 = format!("{fraction:0<6}")
        .parse()
        .map_err(|_| invalid("fractional seconds must be 1 to 6 digits"))?;

    whole
        .with_nanosecond(micros * 1_000)
        .ok_or_else(|| invalid("fractional seconds out of range"))
}
