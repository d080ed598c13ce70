//! HTTP GraphQL client
//!
//! A thin, retry-free executor: one POST per call, strict error
//! classification. Timeout and cancellation live here at the transport
//! boundary, never in the engine.

use super::executor::QueryExecutor;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Variables};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the GraphQL client
#[derive(Debug, Clone)]
pub struct GraphQlClientConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Credential token, supplied explicitly at construction. `None` or an
    /// empty string makes every `execute` fail before any network call.
    pub token: Option<String>,
    /// Authorization scheme placed before the token (e.g. `Bearer`, `token`)
    pub auth_prefix: String,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for GraphQlClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: None,
            auth_prefix: "Bearer".to_string(),
            default_headers: HashMap::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("gql-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GraphQlClientConfig {
    /// Create a new config builder
    pub fn builder() -> GraphQlClientConfigBuilder {
        GraphQlClientConfigBuilder::default()
    }
}

/// Builder for the GraphQL client config
#[derive(Default)]
pub struct GraphQlClientConfigBuilder {
    config: GraphQlClientConfig,
}

impl GraphQlClientConfigBuilder {
    /// Set the endpoint URL
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the credential token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set an optional credential token
    pub fn maybe_token(mut self, token: Option<String>) -> Self {
        self.config.token = token;
        self
    }

    /// Set the authorization scheme (default `Bearer`)
    pub fn auth_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.auth_prefix = prefix.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> GraphQlClientConfig {
        self.config
    }
}

/// HTTP GraphQL client implementing [`QueryExecutor`]
pub struct GraphQlClient {
    client: Client,
    config: GraphQlClientConfig,
}

impl GraphQlClient {
    /// Create a client from a config, validating the endpoint URL.
    pub fn new(config: GraphQlClientConfig) -> Result<Self> {
        Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    fn credential(&self) -> Result<&str> {
        self.config
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::credential(
                    "no token configured; supply one when building the client \
                     to opt in to API access",
                )
            })
    }
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("endpoint", &self.config.endpoint)
            .field("has_token", &self.config.token.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QueryExecutor for GraphQlClient {
    async fn execute(&self, query: &str, variables: &Variables) -> Result<JsonValue> {
        // Credential check happens before any network activity.
        let token = self.credential()?;

        let body = serde_json::json!({
            "query": query.trim(),
            "variables": variables,
        });

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header(
                AUTHORIZATION,
                format!("{} {}", self.config.auth_prefix, token),
            )
            .json(&body);
        for (key, value) in &self.config.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(status.as_u16(), body));
        }

        let reply: JsonValue = response.json().await?;
        if let Some(errors) = reply.get("errors").and_then(JsonValue::as_array) {
            if !errors.is_empty() {
                return Err(Error::query(errors.clone()));
            }
        }

        debug!(endpoint = %self.config.endpoint, "query succeeded");
        match reply {
            JsonValue::Object(mut map) => map
                .remove("data")
                .ok_or_else(|| Error::decode("response has no data field")),
            _ => Err(Error::decode("response body is not an object")),
        }
    }
}
