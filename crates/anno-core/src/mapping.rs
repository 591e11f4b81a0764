//! Declarative field mapping tables.
//!
//! A [`MappingTable`] says, for one entity schema, which wire fields are
//! renamed and which additionally run through a [`FieldCodec`]. Fields the
//! table does not mention pass through unchanged in both directions.
//!
//! Tables are built once per process (see [`static_table`]) and precompute the
//! set of native names they cover, so passthrough reconciliation in
//! [`crate::convert::to_wire`] is a set lookup instead of a table scan.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use crate::codec::FieldCodec;

/// How one wire field maps onto the native side.
#[derive(Clone, Copy)]
pub enum FieldRule {
    /// Pure rename; the value is copied as-is.
    Rename(&'static str),
    /// Rename plus a decode/encode pair.
    Convert(&'static str, &'static dyn FieldCodec),
}

impl FieldRule {
    /// The native field name this rule targets.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::Rename(native) | Self::Convert(native, _) => native,
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename(native) => f.debug_tuple("Rename").field(native).finish(),
            Self::Convert(native, _) => f.debug_tuple("Convert").field(native).finish(),
        }
    }
}

/// A table that cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The same wire field appears in two entries.
    #[error("Wire field '{0}' is mapped more than once")]
    DuplicateWireName(String),

    /// Two wire fields would write the same native field.
    #[error("Native field '{native}' is targeted by both '{first}' and '{second}'")]
    DuplicateNativeName {
        native: String,
        first: String,
        second: String,
    },
}

/// Wire-name → [`FieldRule`] table for one entity schema.
#[derive(Debug, Default)]
pub struct MappingTable {
    rules: HashMap<&'static str, FieldRule>,
    covered: HashSet<&'static str>,
}

impl MappingTable {
    /// Build a table, rejecting duplicate wire names and duplicate native targets.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] if two entries share a wire name or a native name.
    pub fn new(
        entries: impl IntoIterator<Item = (&'static str, FieldRule)>,
    ) -> Result<Self, MappingError> {
        let mut rules = HashMap::new();
        let mut targets: HashMap<&'static str, &'static str> = HashMap::new();

        for (wire, rule) in entries {
            if rules.contains_key(wire) {
                return Err(MappingError::DuplicateWireName(wire.to_string()));
            }
            if let Some(first) = targets.insert(rule.native_name(), wire) {
                return Err(MappingError::DuplicateNativeName {
                    native: rule.native_name().to_string(),
                    first: first.to_string(),
                    second: wire.to_string(),
                });
            }
            rules.insert(wire, rule);
        }

        let covered = targets.into_keys().collect();
        Ok(Self { rules, covered })
    }

    /// A table with no entries: every field passes through.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rule for a wire field, if the table maps it.
    #[must_use]
    pub fn get(&self, wire: &str) -> Option<&FieldRule> {
        self.rules.get(wire)
    }

    /// Whether some entry targets this native name.
    #[must_use]
    pub fn covers(&self, native: &str) -> bool {
        self.covered.contains(native)
    }

    /// All `(wire name, rule)` entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &FieldRule)> + '_ {
        self.rules.iter().map(|(wire, rule)| (*wire, rule))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Build a process-wide table from literal entries.
///
/// # Panics
///
/// Panics if the entries are malformed. Tables are static data, so this fires
/// the first time any test touches the entity.
#[must_use]
pub fn static_table<const N: usize>(entries: [(&'static str, FieldRule); N]) -> MappingTable {
    match MappingTable::new(entries) {
        Ok(table) => table,
        Err(error) => panic!("malformed mapping table: {error}"),
    }
}
