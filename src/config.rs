//! Client definition files
//!
//! A client definition is a YAML document describing the base URL, HTTP
//! behaviour, default headers and authentication of a [`RestClient`]:
//!
//! ```yaml
//! base_url: "https://api.example.com/v1"
//! http:
//!   timeout_seconds: 10
//!   max_retries: 2
//! parameter_names: ordinal_ignore_case
//! default_headers:
//!   Accept: application/json
//! auth:
//!   type: basic
//!   username: alice
//!   password: s3cr3t
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{ClientConfig, RestClient};
use crate::request::NameComparer;
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Client Definition
// ============================================================================

/// Complete client definition loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientDefinition {
    /// Base URL for API requests
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Default parameter name comparer
    #[serde(default)]
    pub parameter_names: NameComparer,

    /// Headers sent with every request unless the request sets its own
    #[serde(default)]
    pub default_headers: StringMap,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl ClientDefinition {
    /// Runtime client configuration for this definition
    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_ms),
                Duration::from_millis(self.http.retry_backoff.max_ms),
            )
            .parameter_name_comparer(self.parameter_names);

        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        let mut headers: Vec<_> = self.default_headers.iter().collect();
        headers.sort();
        for (name, value) in headers {
            builder = builder.header(name.clone(), value.clone());
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Backoff type
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::default(),
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60_000
}

// ============================================================================
// Loading
// ============================================================================

/// Load a client definition from a YAML file
pub fn load_client_definition(path: impl AsRef<Path>) -> Result<ClientDefinition> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read client definition {}", path.display()))?;
    load_client_definition_from_str(&yaml)
}

/// Parse a client definition from a YAML string
pub fn load_client_definition_from_str(yaml: &str) -> Result<ClientDefinition> {
    let definition: ClientDefinition = serde_yaml::from_str(yaml)?;
    if definition
        .base_url
        .as_deref()
        .is_some_and(|url| url.trim().is_empty())
    {
        return Err(Error::missing_field("base_url"));
    }
    Ok(definition)
}

impl RestClient {
    /// Build a client, including its authenticator, from a definition
    pub fn from_definition(definition: &ClientDefinition) -> Result<Self> {
        let mut client = RestClient::with_config(definition.client_config())?;
        if let Some(authenticator) = definition.auth.build() {
            client.add_authenticator(authenticator);
        }
        Ok(client)
    }
}
