//! Query executor and HTTP GraphQL client
//!
//! The depagination engine talks to the upstream API through the
//! [`QueryExecutor`] trait: one query/variables pair in, one result tree
//! out. [`GraphQlClient`] is the production implementation over reqwest;
//! tests substitute scripted executors.

mod executor;
mod graphql;

pub use executor::QueryExecutor;
pub use graphql::{GraphQlClient, GraphQlClientConfig, GraphQlClientConfigBuilder};
