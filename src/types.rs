//! Common types used throughout gql-harvest
//!
//! The result tree and query variables are untyped JSON; these aliases keep
//! signatures readable across modules.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query variables sent alongside a query, keyed by variable name.
///
/// Cursor variables are written into this map by the engine as pages are
/// fetched; all other entries pass through untouched.
pub type Variables = JsonObject;
