//! Auth configuration types
//!
//! [`AuthConfig`] is the declarative form of an authenticator, loaded from
//! client definition files or assembled by the CLI.

use super::authenticator::Authenticator;
use super::basic::HttpBasicAuthenticator;
use super::strategies::{ApiKeyAuthenticator, BearerAuthenticator, HeadersAuthenticator};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        #[serde(default)]
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// API Key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        #[serde(default)]
        location: Location,
        /// Header or query parameter name
        #[serde(default)]
        name: Option<String>,
        /// Prefix to add before the value (e.g., "Token ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add to each request
        headers: StringMap,
    },
}

impl AuthConfig {
    /// Build the authenticator this config describes (`None` for no auth)
    pub fn build(&self) -> Option<Box<dyn Authenticator>> {
        match self {
            AuthConfig::None => None,
            AuthConfig::Basic { username, password } => {
                Some(Box::new(HttpBasicAuthenticator::new(username, password)))
            }
            AuthConfig::Bearer { token } => Some(Box::new(BearerAuthenticator::new(token))),
            AuthConfig::ApiKey {
                location,
                name,
                prefix,
                value,
            } => Some(Box::new(ApiKeyAuthenticator::new(
                *location,
                name.as_deref(),
                prefix.as_deref(),
                value,
            ))),
            AuthConfig::CustomHeaders { headers } => {
                let mut pairs: Vec<_> = headers.iter().collect();
                pairs.sort();
                Some(Box::new(HeadersAuthenticator::new(
                    pairs.into_iter().map(|(k, v)| (k.clone(), v.clone())),
                )))
            }
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
        assert!(config.build().is_none());
    }

    #[test]
    fn test_parse_basic() {
        let yaml = r#"
type: basic
username: alice
password: s3cr3t
"#;
        let config: AuthConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config,
            AuthConfig::Basic {
                username: "alice".to_string(),
                password: "s3cr3t".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_api_key_defaults() {
        let yaml = r#"
type: api_key
value: "k-123"
"#;
        let config: AuthConfig = serde_yaml::from_str(yaml).unwrap();
        match config {
            AuthConfig::ApiKey {
                location,
                name,
                prefix,
                value,
            } => {
                assert_eq!(location, Location::Header);
                assert!(name.is_none());
                assert!(prefix.is_none());
                assert_eq!(value, "k-123");
            }
            other => panic!("Expected ApiKey auth, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_custom_headers() {
        let yaml = r#"
type: custom_headers
headers:
  X-Tenant: acme
"#;
        let config: AuthConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.build().is_some());
    }
}
