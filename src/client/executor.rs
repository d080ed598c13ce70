//! The transport seam used by the depagination engine

use crate::error::Result;
use crate::types::{JsonValue, Variables};
use async_trait::async_trait;

/// Executes one query/variables pair against the upstream API.
///
/// Implementations own every transport concern: endpoint, headers,
/// credentials, timeouts. The engine never retries; an error from `execute`
/// aborts the entire depagination with no partial result.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `query` once with `variables` and return the result tree
    /// (the `data` subtree of a successful response).
    async fn execute(&self, query: &str, variables: &Variables) -> Result<JsonValue>;
}
