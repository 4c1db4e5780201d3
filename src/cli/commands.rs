//! CLI commands and argument parsing

use crate::types::{parse_method, Method};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build, authenticate and send HTTP requests
#[derive(Parser, Debug)]
#[command(name = "restreq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client definition file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a request and print the response
    Send {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Print the encoded wire request without sending it
    Prepare {
        #[command(flatten)]
        request: RequestArgs,
    },
}

/// Description of a single request
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// HTTP method
    #[arg(value_parser = parse_method)]
    pub method: Method,

    /// Resource path, or an absolute URL
    pub resource: String,

    /// Base URL (overrides the client definition)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Header as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Query parameter as `name=value` (repeatable)
    #[arg(short, long = "query", value_parser = parse_pair)]
    pub query: Vec<(String, String)>,

    /// Url-encoded body field as `name=value` (repeatable)
    #[arg(short, long = "data", value_parser = parse_pair)]
    pub data: Vec<(String, String)>,

    /// Value for a `{name}` placeholder in the resource, as `name=value`
    #[arg(short, long = "segment", value_parser = parse_pair)]
    pub segments: Vec<(String, String)>,

    /// File part as `name=@path` (repeatable)
    #[arg(short = 'F', long = "file", value_parser = parse_file)]
    pub files: Vec<(String, PathBuf)>,

    /// JSON request body
    #[arg(long)]
    pub json: Option<String>,

    /// Basic credentials as `user:password`
    #[arg(short, long)]
    pub user: Option<String>,

    /// Bearer token
    #[arg(long, conflicts_with = "user")]
    pub bearer: Option<String>,

    /// Indent the JSON body
    #[arg(long, requires = "json")]
    pub pretty_json: bool,

    /// Never build multipart bodies
    #[arg(long)]
    pub simple_encoding: bool,

    /// Match parameter names case-insensitively
    #[arg(long)]
    pub ignore_case: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    Ok((name.to_string(), value.to_string()))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{s}'"))?;
    Ok((name.trim().to_string(), value.trim_start().to_string()))
}

fn parse_file(s: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = parse_pair(s)?;
    let path = path
        .strip_prefix('@')
        .ok_or_else(|| format!("expected name=@path, got '{s}'"))?;
    Ok((name, PathBuf::from(path)))
}
