//! Command-line arguments.

use clap::{Parser, Subcommand};
use openmemory_client::{
    DEFAULT_BASE_URL, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, ENV_BASE_URL, ENV_TOKEN,
};
use serde_json::Value;

/// Trailer of `--help` listing the exit codes.
pub const EXIT_STATUS_HELP: &str = "Exit status:\n  \
    0  the command succeeded\n  \
    1  the canister answered with a non-2xx status, could not be reached,\n     \
    or sent an unexpected body (the error is printed to stderr)";

#[derive(Debug, Parser)]
#[command(name = "openmemory")]
#[command(version)]
#[command(about = "Talk to an OpenMemory canister over its REST API", long_about = None)]
#[command(after_help = EXIT_STATUS_HELP)]
pub struct Cli {
    /// Canister base URL
    #[arg(long, global = true, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = ENV_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show service health
    Health,

    /// Store a new memory and print its id
    Add {
        content: String,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Metadata entry as key=value; the value is parsed as JSON when possible
        #[arg(long = "meta", value_parser = parse_meta)]
        metadata: Vec<(String, Value)>,
    },

    /// Semantic search
    Search {
        query: String,

        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,

        /// Only match memories with this tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Print one memory as JSON
    Get { id: String },

    /// Delete a memory
    Delete { id: String },

    /// List memories page by page
    List {
        #[arg(long, default_value_t = 0)]
        offset: u32,

        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
    },

    /// Show service statistics
    Stats,

    /// Walk through health, add, search, list, and stats against the canister
    Demo,
}

fn parse_meta(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty metadata key in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn help_documents_exit_status() {
        use clap::CommandFactory;
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Exit status:"));
        assert!(help.contains("1  the canister answered with a non-2xx status"));
    }

    #[test]
    fn meta_values_parse_as_json_or_string() {
        assert_eq!(parse_meta("n=3").unwrap(), ("n".to_string(), json!(3)));
        assert_eq!(
            parse_meta("lang=ja").unwrap(),
            ("lang".to_string(), json!("ja"))
        );
        assert_eq!(
            parse_meta("k=a=b").unwrap(),
            ("k".to_string(), json!("a=b"))
        );
        assert!(parse_meta("novalue").is_err());
        assert!(parse_meta("=x").is_err());
    }

    #[test]
    fn parses_add_with_tags_and_meta() {
        let cli = Cli::try_parse_from([
            "openmemory",
            "--base-url",
            "https://x/",
            "add",
            "hello",
            "--tag",
            "a",
            "--tag",
            "b",
            "--meta",
            "source=docs",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "https://x/");
        match cli.command {
            Command::Add {
                content,
                tags,
                metadata,
            } => {
                assert_eq!(content, "hello");
                assert_eq!(tags, vec!["a", "b"]);
                assert_eq!(metadata, vec![("source".to_string(), json!("docs"))]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_and_list_defaults() {
        let cli = Cli::try_parse_from(["openmemory", "search", "rust"]).unwrap();
        match cli.command {
            Command::Search { limit, tags, .. } => {
                assert_eq!(limit, 10);
                assert!(tags.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["openmemory", "list", "--offset", "5"]).unwrap();
        match cli.command {
            Command::List { offset, limit } => {
                assert_eq!(offset, 5);
                assert_eq!(limit, 20);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
