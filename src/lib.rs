//! # restreq
//!
//! Declarative HTTP request construction with pluggable authenticators.
//!
//! A [`Request`] describes a call that has not been sent yet: method,
//! resource, ordered parameters (query, url-encoded body, raw body, file,
//! header, URL segment), serializer, transport credentials and content
//! collection mode. [`Authenticator`]s mutate it in place before it is
//! handed to the [`RestClient`], and are idempotent so they can be re-run on
//! every retry.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restreq::{ClientConfig, HttpBasicAuthenticator, Method, Request, RestClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = RestClient::with_config(
//!         ClientConfig::builder().base_url("https://api.example.com").build(),
//!     )?
//!     .with_authenticator(HttpBasicAuthenticator::new("alice", "s3cr3t"));
//!
//!     let mut request = Request::with_resource("users/{id}", Method::GET);
//!     request.add_url_segment("id", 1i64).add_query_parameter("expand", "teams");
//!
//!     let response = client.execute(&mut request).await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   authenticate()   ┌─────────────────┐   build_request()   ┌─────────┐
//! │   Request    │ ─────────────────► │  Authenticator  │ ──────────────────► │ reqwest │
//! │  Parameters  │   (idempotent)     │ Basic / Bearer  │   url, headers,     │ Client  │
//! │  Serializer  │                    │ ApiKey / Headers│   body encoding     │         │
//! └──────────────┘                    └─────────────────┘                     └─────────┘
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

/// Request model
pub mod request;

/// Body serializers
pub mod serializer;

/// Authenticators
pub mod auth;

/// HTTP client
pub mod http;

/// Client definition files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{
    ApiKeyAuthenticator, AuthConfig, Authenticator, BearerAuthenticator, HeadersAuthenticator,
    HttpBasicAuthenticator,
};
pub use error::{Error, Result};
pub use http::{ClientConfig, RestClient};
pub use request::{NameComparer, NetworkCredential, Parameter, ParameterKind, ParameterValue, Request};
pub use serializer::{JsonSerializer, Serializer};
pub use types::{ContentCollectionMode, Method};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
