//! Error types for gql-harvest
//!
//! The taxonomy follows the depagination contract: credential problems fail
//! before any network activity, transport failures carry the HTTP status,
//! and protocol-level errors carry the response's `errors` array. Every
//! variant is terminal for the whole depagination call; nothing is caught,
//! retried, or converted internally.

use thiserror::Error;

/// The main error type for gql-harvest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("No usable credential: {message}")]
    Credential { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport failure: HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("Query failed with {} protocol error(s)", .errors.len())]
    Query { errors: Vec<serde_json::Value> },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Result Tree Errors
    // ============================================================================
    #[error("Malformed result tree at '{path}': {message}")]
    Shape { path: String, message: String },

    // ============================================================================
    // Cursor Table Errors
    // ============================================================================
    #[error("Invalid cursor table: {message}")]
    Cursor { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a credential error
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Create a transport error from a status code and response body
    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    /// Create a protocol error from a response's `errors` array
    pub fn query(errors: Vec<serde_json::Value>) -> Self {
        Self::Query { errors }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a result-tree shape error
    pub fn shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a cursor table error
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error was raised before any network activity
    pub fn is_credential(&self) -> bool {
        matches!(self, Error::Credential { .. })
    }

    /// Check if this error came from the transport boundary
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport { .. })
    }

    /// Check if this error carries protocol-level errors from a
    /// transport-successful response
    pub fn is_query(&self) -> bool {
        matches!(self, Error::Query { .. })
    }
}

/// Result type alias for gql-harvest
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::credential("token is unset");
        assert_eq!(err.to_string(), "No usable credential: token is unset");

        let err = Error::transport(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Transport failure: HTTP 502: Bad Gateway");

        let err = Error::shape("repository.issues", "missing pageInfo");
        assert_eq!(
            err.to_string(),
            "Malformed result tree at 'repository.issues': missing pageInfo"
        );
    }

    #[test]
    fn test_query_error_counts_entries() {
        let err = Error::query(vec![
            serde_json::json!({"message": "Field 'foo' doesn't exist"}),
            serde_json::json!({"message": "rate limited"}),
        ]);
        assert_eq!(err.to_string(), "Query failed with 2 protocol error(s)");
    }

    #[test]
    fn test_classification() {
        assert!(Error::credential("x").is_credential());
        assert!(Error::transport(500, "").is_transport());
        assert!(Error::query(vec![]).is_query());

        assert!(!Error::transport(500, "").is_query());
        assert!(!Error::query(vec![]).is_transport());
        assert!(!Error::cursor("bad").is_credential());
    }
}
