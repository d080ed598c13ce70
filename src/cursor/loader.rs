//! Cursor table file loader
//!
//! The CLI keeps cursor tables next to their queries, in JSON or YAML.

use super::spec::CursorTable;
use crate::error::Result;
use std::path::Path;

/// On-disk format of a cursor table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorFileFormat {
    /// JSON document
    #[default]
    Json,
    /// YAML document
    Yaml,
}

impl CursorFileFormat {
    /// Infer the format from a file extension; anything that is not
    /// `yml`/`yaml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load a cursor table from a JSON or YAML file.
pub fn load_cursor_table(path: impl AsRef<Path>) -> Result<CursorTable> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    parse_cursor_table(&raw, CursorFileFormat::from_path(path))
}

/// Parse a cursor table from a string.
///
/// Shorthand path arrays are normalized into full specs during parsing.
pub fn parse_cursor_table(raw: &str, format: CursorFileFormat) -> Result<CursorTable> {
    let table = match format {
        CursorFileFormat::Json => serde_json::from_str(raw)?,
        CursorFileFormat::Yaml => serde_yaml::from_str(raw)?,
    };
    Ok(table)
}
