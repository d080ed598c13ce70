//! Cursor spec types and normalization

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Mapping from a cursor variable name to its spec.
///
/// Cursors in one table are independent of each other; iteration order is
/// not part of the contract. A `BTreeMap` keeps runs deterministic.
pub type CursorTable = BTreeMap<String, CursorSpec>;

/// Describes one paginated field: where it sits relative to a reference
/// point in the result tree, and which cursors paginate collections nested
/// inside its nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CursorSpec {
    /// Field-name steps from the reference point to the paginated field.
    pub path: Vec<String>,

    /// Cursors paginating collections inside each node of this field.
    /// Only consulted once this spec's own pagination is fully exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<CursorTable>,
}

impl CursorSpec {
    /// Create a spec with no nested table.
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            next: None,
        }
    }

    /// Attach a nested cursor table.
    #[must_use]
    pub fn with_next(mut self, table: CursorTable) -> Self {
        self.next = Some(table);
        self
    }
}

/// Raw spec shapes accepted on the wire. A bare array is shorthand for the
/// full mapping form with no nested table.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Path(Vec<String>),
    Full {
        path: Vec<String>,
        #[serde(default)]
        next: Option<CursorTable>,
    },
}

impl<'de> Deserialize<'de> for CursorSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (path, next) = match RawSpec::deserialize(deserializer)? {
            RawSpec::Path(path) => (path, None),
            RawSpec::Full { path, next } => (path, next),
        };
        if path.is_empty() {
            return Err(D::Error::custom(
                "cursor spec path must name at least one field",
            ));
        }
        // An empty nested table means there is nothing to fan out into.
        let next = next.filter(|table| !table.is_empty());
        Ok(CursorSpec { path, next })
    }
}

/// Normalize a loosely-shaped cursor table value into canonical form.
///
/// Accepts the same shapes as deserialization: bare path arrays or full
/// `{path, next}` mappings, recursively. The input is borrowed and never
/// mutated; callers can reuse it across calls. Normalizing an
/// already-canonical value yields an identical table.
pub fn normalize(value: &JsonValue) -> Result<CursorTable> {
    CursorTable::deserialize(value).map_err(|err| Error::cursor(err.to_string()))
}
