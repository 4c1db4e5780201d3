//! REST client over `reqwest`
//!
//! Turns a [`Request`] into a wire request and executes it:
//! - Runs the configured authenticators before every attempt
//! - Merges client default parameters the request does not override
//! - Resolves the resource against the base URL and substitutes URL segments
//! - Encodes the body per the request's content collection mode
//! - Retries transient failures with configurable backoff
//! - Answers a Basic challenge with the request's transport credentials

use super::body::{encode_body, field_text, EncodedBody};
use crate::auth::{Authenticator, HttpBasicAuthenticator, AUTHORIZATION};
use crate::error::{is_retryable_status, Error, Result};
use crate::request::{NameComparer, Parameter, ParameterKind, ParameterValue, Request};
use crate::types::BackoffType;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Characters escaped when substituting URL segment values
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every resource is resolved against
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Default headers for all requests (requests may override them)
    pub default_headers: Vec<(String, String)>,
    /// User agent string
    pub user_agent: String,
    /// Name comparer used when a request does not set its own
    pub parameter_name_comparer: NameComparer,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            default_headers: Vec::new(),
            user_agent: format!("restreq/{}", env!("CARGO_PKG_VERSION")),
            parameter_name_comparer: NameComparer::Ordinal,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((key.into(), value.into()));
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the default parameter name comparer
    pub fn parameter_name_comparer(mut self, comparer: NameComparer) -> Self {
        self.config.parameter_name_comparer = comparer;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// REST client: executes [`Request`]s through `reqwest`
pub struct RestClient {
    client: Client,
    config: ClientConfig,
    authenticators: Vec<Box<dyn Authenticator>>,
    default_parameters: Vec<Parameter>,
}

impl RestClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let default_parameters = config
            .default_headers
            .iter()
            .map(|(name, value)| Parameter::header(name.clone(), value.clone()))
            .collect();

        Ok(Self {
            client,
            config,
            authenticators: Vec::new(),
            default_parameters,
        })
    }

    /// Add an authenticator (builder style)
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.add_authenticator(authenticator);
        self
    }

    /// Add an authenticator. Authenticators run in insertion order.
    pub fn add_authenticator(&mut self, authenticator: impl Authenticator + 'static) {
        self.authenticators.push(Box::new(authenticator));
    }

    /// Add a parameter sent with every request that lacks one of the same
    /// kind and name
    pub fn add_default_parameter(&mut self, parameter: Parameter) {
        self.default_parameters.push(parameter);
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Client-level default name comparer
    pub fn default_parameter_name_comparer(&self) -> NameComparer {
        self.config.parameter_name_comparer
    }

    /// Name comparer that applies to `request`
    pub fn parameter_name_comparer_for(&self, request: &Request) -> NameComparer {
        NameComparer::resolve(
            request.parameter_name_comparer,
            self.config.parameter_name_comparer,
        )
    }

    /// Number of configured authenticators
    pub fn authenticator_count(&self) -> usize {
        self.authenticators.len()
    }

    /// Run every authenticator against `request`, in order
    pub fn authenticate(&self, request: &mut Request) {
        for authenticator in &self.authenticators {
            authenticator.authenticate(self, request);
        }
    }

    /// Request parameters followed by the default parameters the request
    /// does not override
    pub fn effective_parameters<'a>(&'a self, request: &'a Request) -> Vec<&'a Parameter> {
        let comparer = self.parameter_name_comparer_for(request);
        let mut parameters: Vec<&Parameter> = request.parameters().iter().collect();
        parameters.extend(
            self.default_parameters
                .iter()
                .filter(|d| !request.has_parameter(d.name(), d.kind(), comparer)),
        );
        parameters
    }

    /// Resolve the full URL for `request`
    pub fn build_url(&self, request: &Request) -> Result<Url> {
        let parameters = self.effective_parameters(request);
        self.resolve_url(request, &parameters)
    }

    fn resolve_url(&self, request: &Request, parameters: &[&Parameter]) -> Result<Url> {
        let comparer = self.parameter_name_comparer_for(request);
        let mut resource = request.resource.clone().unwrap_or_default();

        for segment in parameters
            .iter()
            .filter(|p| p.kind() == ParameterKind::UrlSegment)
        {
            let value = field_text(segment)?;
            let encoded = utf8_percent_encode(&value, SEGMENT).to_string();
            resource = replace_placeholder(&resource, segment.name(), &encoded, comparer);
        }

        let full = if resource.starts_with("http://") || resource.starts_with("https://") {
            resource
        } else {
            match &self.config.base_url {
                Some(base) if resource.is_empty() => base.clone(),
                Some(base) => {
                    let base = base.trim_end_matches('/');
                    let path = resource.trim_start_matches('/');
                    format!("{base}/{path}")
                }
                None => {
                    return Err(Error::config(format!(
                        "cannot resolve resource '{resource}' without a base URL"
                    )))
                }
            }
        };

        let mut url = Url::parse(&full)?;
        let query = parameters
            .iter()
            .filter(|p| p.kind() == ParameterKind::Query)
            .map(|p| Ok((p.name(), field_text(p)?)))
            .collect::<Result<Vec<(&str, String)>>>()?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Authenticate `request` and encode it into a wire request.
    ///
    /// This is the last point where the request is mutated.
    pub fn build_request(&self, request: &mut Request) -> Result<reqwest::Request> {
        self.authenticate(request);

        let request: &Request = request;
        let parameters = self.effective_parameters(request);
        let url = self.resolve_url(request, &parameters)?;

        let mut builder = self.client.request(request.method.clone(), url);

        let mut has_content_type = false;
        for header in parameters
            .iter()
            .filter(|p| p.kind() == ParameterKind::HttpHeader)
        {
            let (name, value) = header_pair(header)?;
            has_content_type |= name == CONTENT_TYPE;
            builder = builder.header(name, value);
        }

        builder = match encode_body(
            &parameters,
            request.content_collection_mode,
            request.serializer.as_ref(),
        )? {
            EncodedBody::Empty => builder,
            EncodedBody::Raw { content_type, data } => {
                if !has_content_type {
                    builder = builder.header(CONTENT_TYPE, content_type);
                }
                builder.body(data)
            }
            EncodedBody::Form(pairs) => builder.form(&pairs),
            EncodedBody::Multipart(form) => builder.multipart(form),
        };

        Ok(builder.build()?)
    }

    /// Execute `request`, retrying transient failures.
    ///
    /// Authenticators run before every attempt; non-success statuses are
    /// returned as [`Error::HttpStatus`].
    pub async fn execute(&self, request: &mut Request) -> Result<Response> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;
        let mut last_error = None;
        let mut answer_challenge = false;

        while attempt <= max_retries {
            let mut http_request = self.build_request(request)?;
            if answer_challenge {
                if let Some(credentials) = &request.credentials {
                    let basic = HttpBasicAuthenticator::new(
                        &credentials.qualified_username(),
                        &credentials.password,
                    );
                    let value = HeaderValue::from_str(basic.header_value())
                        .map_err(|e| Error::invalid_header(AUTHORIZATION, e.to_string()))?;
                    http_request
                        .headers_mut()
                        .insert(reqwest::header::AUTHORIZATION, value);
                }
            }
            let sent_authorization = http_request
                .headers()
                .contains_key(reqwest::header::AUTHORIZATION);
            let method = http_request.method().clone();
            let url = http_request.url().clone();

            debug!(%method, %url, attempt, "Sending request");

            match self.client.execute(http_request).await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::UNAUTHORIZED
                        && !sent_authorization
                        && request.credentials.is_some()
                        && has_basic_challenge(&response)
                    {
                        debug!("Answering Basic challenge with request credentials");
                        answer_challenge = true;
                        continue;
                    }

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = if status == StatusCode::TOO_MANY_REQUESTS {
                            extract_retry_after(&response)
                                .unwrap_or_else(|| self.calculate_backoff(attempt))
                        } else {
                            self.calculate_backoff(attempt)
                        };
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::http_status(status.as_u16(), ""));
                        continue;
                    }

                    if status.is_client_error() || status.is_server_error() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::http_status(status.as_u16(), body));
                    }

                    debug!("Request succeeded: {} {}", method, url);
                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        let timeout_ms = self.config.timeout.as_millis() as u64;
                        if attempt < max_retries {
                            let delay = self.calculate_backoff(attempt);
                            warn!(
                                "Request timeout, attempt {}/{}, retrying in {:?}",
                                attempt + 1,
                                max_retries + 1,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            last_error = Some(Error::Timeout { timeout_ms });
                            continue;
                        }
                        return Err(Error::Timeout { timeout_ms });
                    }

                    if e.is_connect() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Connection error, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::Http(e));
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }

        // Exhausted all retries
        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .field("authenticators", &self.authenticators.len())
            .field("default_parameters", &self.default_parameters.len())
            .finish_non_exhaustive()
    }
}

/// Replace every `{name}` placeholder in `resource`
fn replace_placeholder(resource: &str, name: &str, value: &str, comparer: NameComparer) -> String {
    let mut out = String::with_capacity(resource.len());
    let mut rest = resource;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let candidate = &rest[open + 1..open + close];
        out.push_str(&rest[..open]);
        if comparer.matches(candidate, name) {
            out.push_str(value);
        } else {
            out.push_str(&rest[open..=open + close]);
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

fn header_pair(parameter: &Parameter) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(parameter.name().as_bytes())
        .map_err(|e| Error::invalid_header(parameter.name(), e.to_string()))?;
    let value = match parameter.text() {
        Some(text) => HeaderValue::from_str(&text),
        None => match parameter.value() {
            ParameterValue::Bytes(bytes) => HeaderValue::from_bytes(bytes),
            _ => {
                return Err(Error::invalid_header(
                    parameter.name(),
                    "file values cannot be sent as headers",
                ))
            }
        },
    }
    .map_err(|e| Error::invalid_header(parameter.name(), e.to_string()))?;
    Ok((name, value))
}

/// Whether the response carries a Basic `WWW-Authenticate` challenge
fn has_basic_challenge(response: &Response) -> bool {
    response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| {
            v.trim_start()
                .get(..5)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("basic"))
        })
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
}
