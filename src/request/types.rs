//! The request model
//!
//! A [`Request`] is an in-memory description of an HTTP call that has not
//! been sent yet. It performs no validation: method/body combinations,
//! duplicate names and malformed values all pass through to the client.

use super::comparer::NameComparer;
use super::parameter::{Parameter, ParameterKind, ParameterValue};
use crate::serializer::{JsonSerializer, Serializer};
use crate::types::{ContentCollectionMode, JsonValue, Method};
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

/// Transport-level credentials, independent of header authenticators
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkCredential {
    /// User name
    pub username: String,
    /// Password
    pub password: String,
    /// Optional authentication domain
    pub domain: Option<String>,
}

impl NetworkCredential {
    /// Create credentials without a domain
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            domain: None,
        }
    }

    /// Set the authentication domain
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// User name qualified with the domain (`DOMAIN\user`) when one is set
    pub fn qualified_username(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{domain}\\{}", self.username),
            None => self.username.clone(),
        }
    }
}

impl fmt::Debug for NetworkCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCredential")
            .field("username", &self.username)
            .field("password", &"***")
            .field("domain", &self.domain)
            .finish()
    }
}

/// An HTTP call described declaratively, not yet executed
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Resource relative to the client's base URL (`None` is the root)
    pub resource: Option<String>,
    /// Serializer for structured body parameters
    pub serializer: Arc<dyn Serializer>,
    /// Transport-level credentials (challenge based)
    pub credentials: Option<NetworkCredential>,
    /// Multipart vs. simple body encoding policy
    pub content_collection_mode: ContentCollectionMode,
    /// Name comparer override; the client default applies when unset
    pub parameter_name_comparer: Option<NameComparer>,
    parameters: Vec<Parameter>,
}

impl Request {
    /// GET request for the root resource
    pub fn new() -> Self {
        Self::init(None, Method::GET)
    }

    /// Request for the root resource with the given method
    pub fn with_method(method: Method) -> Self {
        Self::init(None, method)
    }

    /// Request for `resource`, kept verbatim
    pub fn with_resource(resource: impl Into<String>, method: Method) -> Self {
        Self::init(Some(resource.into()), method)
    }

    /// Request from a URI.
    ///
    /// Absolute URIs keep only their path and query since scheme and host
    /// belong to the client. Anything else is kept verbatim.
    pub fn from_uri(uri: &str, method: Method) -> Self {
        let resource = match url::Url::parse(uri) {
            Ok(url) => match url.query() {
                Some(query) => format!("{}?{query}", url.path()),
                None => url.path().to_string(),
            },
            Err(_) => uri.to_string(),
        };
        Self::init(Some(resource), method)
    }

    fn init(resource: Option<String>, method: Method) -> Self {
        Self {
            method,
            resource,
            serializer: Arc::new(JsonSerializer::new()),
            credentials: None,
            content_collection_mode: ContentCollectionMode::MultiPartForFileParameters,
            parameter_name_comparer: None,
            parameters: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------------

    /// All parameters in insertion order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Append a parameter. Never deduplicates.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
        kind: ParameterKind,
    ) -> &mut Self {
        self.parameters.push(Parameter::new(name, value, kind));
        self
    }

    /// Append an already built parameter
    pub fn push_parameter(&mut self, parameter: Parameter) -> &mut Self {
        self.parameters.push(parameter);
        self
    }

    pub fn add_query_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> &mut Self {
        self.add_parameter(name, value, ParameterKind::Query)
    }

    pub fn add_url_encoded_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> &mut Self {
        self.add_parameter(name, value, ParameterKind::UrlEncodedBody)
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add_parameter(name, value.into(), ParameterKind::HttpHeader)
    }

    pub fn add_url_segment(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> &mut Self {
        self.add_parameter(name, value, ParameterKind::UrlSegment)
    }

    /// Add a structured body, serialized by [`Request::serializer`]
    pub fn add_json_body(&mut self, body: JsonValue) -> &mut Self {
        self.add_parameter("body", body, ParameterKind::RequestBody)
    }

    /// Add a file part
    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> &mut Self {
        self.push_parameter(Parameter::file(name, file_name, content_type, data))
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// First parameter of `kind` whose name matches under `comparer`
    pub fn find_parameter(
        &self,
        name: &str,
        kind: ParameterKind,
        comparer: NameComparer,
    ) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.kind() == kind && comparer.matches(p.name(), name))
    }

    /// Whether a parameter of `kind` named `name` exists under `comparer`
    pub fn has_parameter(&self, name: &str, kind: ParameterKind, comparer: NameComparer) -> bool {
        self.find_parameter(name, kind, comparer).is_some()
    }

    /// Whether any parameter, of any kind, is named `name` (case-insensitive)
    pub fn has_parameter_named(&self, name: &str) -> bool {
        self.parameters
            .iter()
            .any(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Parameters of the given kind, in insertion order
    pub fn parameters_of_kind(&self, kind: ParameterKind) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.kind() == kind)
    }

    /// Whether the request carries at least one file parameter
    pub fn has_files(&self) -> bool {
        self.parameters_of_kind(ParameterKind::File).next().is_some()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
