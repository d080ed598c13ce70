//! Runtime paths into the result tree
//!
//! Cursor specs carry field names only; at runtime the engine also descends
//! into `nodes` arrays by index, so a resolved path mixes both step kinds.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// One step of a runtime tree path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Descend into an object field
    Key(String),
    /// Descend into an array element
    Index(usize),
}

impl Step {
    /// Create a field step
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Key(key) => f.write_str(key),
            Step::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Render a path in dotted form for error messages and logs.
pub fn render(path: &[Step]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Extend a base path with the field steps of a cursor spec path.
pub fn extend(base: &[Step], fields: &[String]) -> Vec<Step> {
    let mut out = base.to_vec();
    out.extend(fields.iter().cloned().map(Step::Key));
    out
}

/// Walk `path` down from `root`.
pub fn walk<'tree>(root: &'tree JsonValue, path: &[Step]) -> Result<&'tree JsonValue> {
    let mut current = root;
    for (depth, step) in path.iter().enumerate() {
        let child = match (step, current) {
            (Step::Key(key), JsonValue::Object(map)) => map.get(key),
            (Step::Index(index), JsonValue::Array(items)) => items.get(*index),
            _ => None,
        };
        current = child.ok_or_else(|| unresolved(path, depth))?;
    }
    Ok(current)
}

/// Walk `path` down from `root`, mutably.
pub fn walk_mut<'tree>(root: &'tree mut JsonValue, path: &[Step]) -> Result<&'tree mut JsonValue> {
    let mut current = root;
    for (depth, step) in path.iter().enumerate() {
        let child = match (step, current) {
            (Step::Key(key), JsonValue::Object(map)) => map.get_mut(key),
            (Step::Index(index), JsonValue::Array(items)) => items.get_mut(*index),
            _ => None,
        };
        current = child.ok_or_else(|| unresolved(path, depth))?;
    }
    Ok(current)
}

fn unresolved(path: &[Step], depth: usize) -> Error {
    Error::shape(render(&path[..=depth]), "path does not resolve in the result tree")
}
