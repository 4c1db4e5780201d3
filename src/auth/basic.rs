//! HTTP Basic authentication (RFC 7617)

use super::authenticator::{ensure_header, Authenticator, AUTHORIZATION};
use crate::http::RestClient;
use crate::request::Request;
use base64::Engine as _;
use std::fmt;
use tracing::debug;

/// Basic authenticator with a precomputed `Authorization` value
#[derive(Clone)]
pub struct HttpBasicAuthenticator {
    header_value: String,
}

impl HttpBasicAuthenticator {
    /// Create the authenticator.
    ///
    /// The credential string `username:password` is encoded as UTF-8 before
    /// base64. Empty halves are accepted as-is.
    pub fn new(username: &str, password: &str) -> Self {
        let token = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        Self {
            header_value: format!("Basic {token}"),
        }
    }

    /// The full `Authorization` header value
    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

impl Authenticator for HttpBasicAuthenticator {
    fn authenticate(&self, _client: &RestClient, request: &mut Request) {
        // only add the header if it hasn't been added by a previous execution
        if ensure_header(request, AUTHORIZATION, || self.header_value.clone()) {
            debug!("Added Basic authorization header");
        }
    }
}

impl fmt::Debug for HttpBasicAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBasicAuthenticator").finish_non_exhaustive()
    }
}
