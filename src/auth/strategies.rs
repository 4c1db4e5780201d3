//! Token and header based authenticators
//!
//! Each strategy follows the same idempotent rule as
//! [`HttpBasicAuthenticator`](super::HttpBasicAuthenticator): an existing
//! parameter with the target name is never overwritten.

use super::authenticator::{ensure_header, ensure_parameter, Authenticator, AUTHORIZATION};
use super::types::Location;
use crate::http::RestClient;
use crate::request::{ParameterKind, Request};
use std::fmt;
use tracing::debug;

/// Bearer token authentication
#[derive(Clone)]
pub struct BearerAuthenticator {
    header_value: String,
}

impl BearerAuthenticator {
    /// Create the authenticator, precomputing `Bearer <token>`
    pub fn new(token: &str) -> Self {
        Self {
            header_value: format!("Bearer {token}"),
        }
    }
}

impl Authenticator for BearerAuthenticator {
    fn authenticate(&self, _client: &RestClient, request: &mut Request) {
        if ensure_header(request, AUTHORIZATION, || self.header_value.clone()) {
            debug!("Added Bearer authorization header");
        }
    }
}

impl fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuthenticator").finish_non_exhaustive()
    }
}

/// API key placed in a header or in the query string
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    location: Location,
    name: String,
    value: String,
}

impl ApiKeyAuthenticator {
    /// Create an API key authenticator.
    ///
    /// `name` defaults to `Authorization` for headers and `api_key` for
    /// query placement. `prefix` is prepended to the key verbatim.
    pub fn new(location: Location, name: Option<&str>, prefix: Option<&str>, key: &str) -> Self {
        let name = name.unwrap_or(match location {
            Location::Header => AUTHORIZATION,
            Location::Query => "api_key",
        });
        Self {
            location,
            name: name.to_string(),
            value: format!("{}{key}", prefix.unwrap_or("")),
        }
    }

    /// Parameter name the key is written under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Authenticator for ApiKeyAuthenticator {
    fn authenticate(&self, client: &RestClient, request: &mut Request) {
        let added = match self.location {
            Location::Header => ensure_header(request, &self.name, || self.value.clone()),
            Location::Query => ensure_parameter(
                client,
                request,
                &self.name,
                ParameterKind::Query,
                || self.value.clone(),
            ),
        };
        if added {
            debug!(parameter = %self.name, location = ?self.location, "Added API key");
        }
    }
}

impl fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("location", &self.location)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Fixed set of headers added to every request
#[derive(Debug, Clone, Default)]
pub struct HeadersAuthenticator {
    headers: Vec<(String, String)>,
}

impl HeadersAuthenticator {
    /// Create from name/value pairs; order is preserved
    pub fn new<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Authenticator for HeadersAuthenticator {
    fn authenticate(&self, _client: &RestClient, request: &mut Request) {
        for (name, value) in &self.headers {
            ensure_header(request, name, || value.clone());
        }
    }
}
