//! CLI command execution

use super::commands::{Cli, Commands, OutputFormat};
use crate::client::{GraphQlClient, GraphQlClientConfig};
use crate::cursor::{load_cursor_table, CursorTable};
use crate::depage::depaginate;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Variables};
use std::path::{Path, PathBuf};
use tracing::info;

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner from parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                endpoint,
                token,
                token_env,
                auth_prefix,
                query,
                cursors,
                variables,
                headers,
                output,
                format,
            } => {
                self.run_query(RunArgs {
                    endpoint,
                    token: token.as_deref(),
                    token_env: token_env.as_deref(),
                    auth_prefix,
                    query,
                    cursors: cursors.as_deref(),
                    variables,
                    headers,
                    output: output.as_deref(),
                    format: *format,
                })
                .await
            }
            Commands::Validate { cursors } => validate(cursors),
        }
    }

    async fn run_query(&self, args: RunArgs<'_>) -> Result<()> {
        let query = std::fs::read_to_string(args.query)?;
        let variables = parse_variables(args.variables)?;
        let table = match args.cursors {
            Some(path) => load_cursor_table(path)?,
            None => CursorTable::new(),
        };

        // The credential is resolved exactly once, here at process start;
        // the core never consults the environment.
        let token = resolve_token(args.token, args.token_env)?;

        let mut builder = GraphQlClientConfig::builder()
            .endpoint(args.endpoint)
            .maybe_token(token)
            .auth_prefix(args.auth_prefix);
        for header in args.headers {
            let (name, value) = split_header(header)?;
            builder = builder.header(name, value);
        }
        let client = GraphQlClient::new(builder.build())?;

        info!(endpoint = args.endpoint, cursors = table.len(), "running query");
        let tree = depaginate(&client, &query, &table, variables).await?;

        let rendered = render(&tree, args.format)?;
        match args.output {
            Some(path) => {
                std::fs::write(path, rendered + "\n")?;
                info!(path = %path.display(), "merged result written");
            }
            None => println!("{rendered}"),
        }
        Ok(())
    }
}

struct RunArgs<'a> {
    endpoint: &'a str,
    token: Option<&'a str>,
    token_env: Option<&'a str>,
    auth_prefix: &'a str,
    query: &'a PathBuf,
    cursors: Option<&'a Path>,
    variables: &'a str,
    headers: &'a [String],
    output: Option<&'a Path>,
    format: OutputFormat,
}

fn validate(cursors: &Path) -> Result<()> {
    let table = load_cursor_table(cursors)?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}

fn render(tree: &JsonValue, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(tree)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(tree)?,
    };
    Ok(rendered)
}

fn parse_variables(raw: &str) -> Result<Variables> {
    let value: JsonValue = serde_json::from_str(raw)?;
    match value {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::config("--variables must be a JSON object")),
    }
}

fn resolve_token(token: Option<&str>, token_env: Option<&str>) -> Result<Option<String>> {
    if let Some(token) = token {
        return Ok(Some(token.to_string()));
    }
    match token_env {
        Some(name) => match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(Error::credential(format!(
                "environment variable {name} is unset"
            ))),
        },
        None => Ok(None),
    }
}

fn split_header(raw: &str) -> Result<(&str, &str)> {
    raw.split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
        .ok_or_else(|| Error::config(format!("invalid header '{raw}', expected 'Name: value'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = parse_variables(r#"{"owner": "enarx"}"#).unwrap();
        assert_eq!(vars["owner"], "enarx");

        assert!(parse_variables("[]").is_err());
        assert!(parse_variables("not json").is_err());
    }

    #[test]
    fn test_resolve_token_prefers_flag() {
        let token = resolve_token(Some("abc"), None).unwrap();
        assert_eq!(token.as_deref(), Some("abc"));

        let token = resolve_token(None, None).unwrap();
        assert!(token.is_none());
    }

    #[test]
    fn test_resolve_token_missing_env_is_credential_error() {
        let err = resolve_token(None, Some("GQL_HARVEST_NO_SUCH_VAR")).unwrap_err();
        assert!(err.is_credential());
    }

    #[test]
    fn test_split_header() {
        let (name, value) = split_header("Accept: application/json").unwrap();
        assert_eq!(name, "Accept");
        assert_eq!(value, "application/json");

        assert!(split_header("no-colon").is_err());
    }
}
