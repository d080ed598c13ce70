//! Cursor specification data model
//!
//! A [`CursorTable`] maps cursor variable names (as used in query variables)
//! to [`CursorSpec`]s describing where pagination occurs in the result tree
//! and how nested pagination composes.
//!
//! # Overview
//!
//! Specs are accepted in two shapes: a bare path array (`["repository",
//! "issues"]`) as shorthand for a spec with no nested table, or the full
//! mapping form with an optional `next` table. Both shapes are normalized
//! into the canonical [`CursorSpec`] once, at the deserialization boundary;
//! the engine never re-inspects raw structure.

mod loader;
mod spec;

pub use loader::{load_cursor_table, parse_cursor_table, CursorFileFormat};
pub use spec::{normalize, CursorSpec, CursorTable};
