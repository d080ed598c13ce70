//! # gql-harvest
//!
//! Execute a GraphQL query against a cursor-paginated API and fully
//! materialize the result: every paginated collection the query touches —
//! at any nesting depth — is drained page by page and merged into one
//! complete, cursor-free result tree.
//!
//! ## Features
//!
//! - **Recursive depagination**: follow `pageInfo { endCursor hasNextPage }`
//!   cursors at several nested levels simultaneously
//! - **Cursor tables**: a small declarative model describing where
//!   pagination occurs and how nested pagination composes
//! - **Pluggable transport**: the engine only needs a [`QueryExecutor`];
//!   the bundled [`GraphQlClient`] speaks HTTP via reqwest
//! - **All-or-nothing**: any transport or protocol error aborts the whole
//!   operation; no partial trees are ever returned
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gql_harvest::{depaginate, GraphQlClient, GraphQlClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = GraphQlClientConfig::builder()
//!         .endpoint("https://api.github.com/graphql")
//!         .token(std::env::var("BOT_TOKEN").unwrap_or_default())
//!         .build();
//!     let client = GraphQlClient::new(config)?;
//!
//!     let cursors = gql_harvest::cursor::normalize(&serde_json::json!({
//!         "cursor1": ["repository", "issues"],
//!         "cursor2": {
//!             "path": ["repository", "pullRequests"],
//!             "next": { "cursor3": ["timelineItems"] }
//!         }
//!     }))?;
//!
//!     let variables = serde_json::Map::from_iter([
//!         ("owner".into(), "enarx".into()),
//!         ("name".into(), "enarx".into()),
//!     ]);
//!     let tree = depaginate(&client, QUERY, &cursors, variables).await?;
//!     println!("{}", serde_json::to_string_pretty(&tree)?);
//!     Ok(())
//! }
//! ```
//!
//! Your query MUST declare each cursor as an optional `String` variable,
//! apply it with `after: $cursor`, fetch `pageInfo { endCursor hasNextPage }`
//! on every paginated field, and expose the items under `nodes`.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  depaginate(query, cursor table, variables) → ResultTree  │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴────────────┬─────────────────┐
//! │    Cursor    │          Depage          │     Client      │
//! ├──────────────┼──────────────────────────┼─────────────────┤
//! │ CursorSpec   │ merge_pages (page loop)  │ QueryExecutor   │
//! │ CursorTable  │ depaginate_node (fan-out)│ GraphQlClient   │
//! │ normalize    │ weld / pageInfo strip    │ credential check│
//! └──────────────┴──────────────────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Cursor specification data model and normalization
pub mod cursor;

/// Query executor trait and the HTTP GraphQL client
pub mod client;

/// The recursive depagination engine
pub mod depage;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{GraphQlClient, GraphQlClientConfig, QueryExecutor};
pub use cursor::{CursorSpec, CursorTable};
pub use depage::{depaginate, Depaginator};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
