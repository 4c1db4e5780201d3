//! CLI runner - executes commands

use crate::auth::{BearerAuthenticator, HttpBasicAuthenticator};
use crate::cli::commands::{Cli, Commands, OutputFormat, RequestArgs};
use crate::config::{load_client_definition, ClientDefinition};
use crate::error::Result;
use crate::http::RestClient;
use crate::request::{NameComparer, Request};
use crate::serializer::JsonSerializer;
use crate::types::ContentCollectionMode;
use anyhow::Context;
use serde_json::{json, Map, Value};
use std::fs;
use std::sync::Arc;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Send { request } => self.send(request).await,
            Commands::Prepare { request } => self.prepare(request),
        }
    }

    /// Load the client definition, or an empty one when none was given
    fn load_definition(&self) -> Result<ClientDefinition> {
        match &self.cli.config {
            Some(path) => load_client_definition(path),
            None => Ok(ClientDefinition::default()),
        }
    }

    /// Build the client. Command-line credentials run before the definition's
    /// authenticator so they take precedence.
    pub fn build_client(&self, args: &RequestArgs) -> Result<RestClient> {
        let mut definition = self.load_definition()?;
        if let Some(base_url) = &args.base_url {
            definition.base_url = Some(base_url.clone());
        }
        if definition.base_url.is_none() {
            if let Ok(url) = url::Url::parse(&args.resource) {
                definition.base_url = Some(url.origin().ascii_serialization());
            }
        }

        let mut client = RestClient::with_config(definition.client_config())?;
        if let Some(user) = &args.user {
            let (username, password) = user.split_once(':').unwrap_or((user.as_str(), ""));
            client.add_authenticator(HttpBasicAuthenticator::new(username, password));
        }
        if let Some(token) = &args.bearer {
            client.add_authenticator(BearerAuthenticator::new(token));
        }
        if let Some(authenticator) = definition.auth.build() {
            client.add_authenticator(authenticator);
        }
        Ok(client)
    }

    /// Build the request described by the arguments
    pub fn build_request(&self, args: &RequestArgs) -> Result<Request> {
        let mut request = Request::from_uri(&args.resource, args.method.clone());

        for (name, value) in &args.headers {
            request.add_header(name, value);
        }
        for (name, value) in &args.query {
            request.add_query_parameter(name, value);
        }
        for (name, value) in &args.segments {
            request.add_url_segment(name, value);
        }
        for (name, value) in &args.data {
            request.add_url_encoded_parameter(name, value);
        }
        for (name, path) in &args.files {
            let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.clone());
            request.add_file(name, file_name, None, data);
        }
        if let Some(body) = &args.json {
            let body: Value = serde_json::from_str(body)?;
            request.add_json_body(body);
        }

        if args.pretty_json {
            request.serializer = Arc::new(JsonSerializer::pretty());
        }
        if args.simple_encoding {
            request.content_collection_mode = ContentCollectionMode::SimpleEncodingOnly;
        }
        if args.ignore_case {
            request.parameter_name_comparer = Some(NameComparer::OrdinalIgnoreCase);
        }

        debug!(
            method = %request.method,
            resource = ?request.resource,
            parameters = request.parameters().len(),
            "Built request"
        );
        Ok(request)
    }

    /// Print the wire request without sending it
    fn prepare(&self, args: &RequestArgs) -> Result<()> {
        let client = self.build_client(args)?;
        let mut request = self.build_request(args)?;
        let wire = client.build_request(&mut request)?;

        let headers: Vec<(String, String)> = wire
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = match wire.body() {
            None => None,
            Some(body) => Some(match body.as_bytes() {
                Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                None => "<streamed body>".to_string(),
            }),
        };

        match self.cli.format {
            OutputFormat::Json => {
                let doc = json!({
                    "method": wire.method().as_str(),
                    "url": wire.url().as_str(),
                    "headers": headers,
                    "body": body,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
            OutputFormat::Pretty => {
                println!("{} {}", wire.method(), wire.url());
                for (name, value) in &headers {
                    println!("{name}: {value}");
                }
                if let Some(body) = body {
                    println!();
                    println!("{body}");
                }
            }
        }
        Ok(())
    }

    /// Execute the request and print the response
    async fn send(&self, args: &RequestArgs) -> Result<()> {
        let client = self.build_client(args)?;
        let mut request = self.build_request(args)?;
        let response = client.execute(&mut request).await?;

        let status = response.status();
        let headers: Map<String, Value> = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()),
                )
            })
            .collect();
        let text = response.text().await?;

        match self.cli.format {
            OutputFormat::Json => {
                let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
                let doc = json!({
                    "status": status.as_u16(),
                    "headers": headers,
                    "body": body,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
            OutputFormat::Pretty => {
                println!("{status}");
                for (name, value) in &headers {
                    println!("{name}: {}", value.as_str().unwrap_or_default());
                }
                println!();
                println!("{text}");
            }
        }
        Ok(())
    }
}
