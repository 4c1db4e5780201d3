//! Tests for the auth module

use super::*;
use crate::http::{ClientConfig, RestClient};
use crate::request::{NameComparer, ParameterKind, ParameterValue, Request};
use crate::types::Method;
use base64::Engine;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use test_case::test_case;

fn client() -> RestClient {
    RestClient::new().unwrap()
}

fn authorization_values(request: &Request) -> Vec<String> {
    request
        .parameters()
        .iter()
        .filter(|p| p.name().eq_ignore_ascii_case(AUTHORIZATION))
        .map(|p| p.text().unwrap().into_owned())
        .collect()
}

// ============================================================================
// Basic
// ============================================================================

#[test]
fn test_basic_auth_end_to_end() {
    let auth = HttpBasicAuthenticator::new("alice", "s3cr3t");
    let mut request = Request::with_resource("users/1", Method::GET);

    auth.authenticate(&client(), &mut request);

    assert_eq!(request.parameters().len(), 1);
    let param = &request.parameters()[0];
    assert_eq!(param.name(), "Authorization");
    assert_eq!(param.kind(), ParameterKind::HttpHeader);
    assert_eq!(
        param.value(),
        &ParameterValue::Text("Basic YWxpY2U6czNjcjN0".to_string())
    );
    assert_eq!(request.resource.as_deref(), Some("users/1"));
}

#[test_case("alice", "s3cr3t" ; "plain")]
#[test_case("", "password" ; "empty username")]
#[test_case("username", "" ; "empty password")]
#[test_case("", "" ; "both empty")]
#[test_case("jürgen", "pässwörd" ; "non ascii")]
#[test_case("user:name", "pa:ss" ; "colons")]
fn test_basic_header_value_is_base64_of_utf8(username: &str, password: &str) {
    let auth = HttpBasicAuthenticator::new(username, password);
    let mut request = Request::new();
    auth.authenticate(&client(), &mut request);

    let values = authorization_values(&request);
    assert_eq!(values.len(), 1);

    let encoded = values[0].strip_prefix("Basic ").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(
        String::from_utf8(decoded).unwrap(),
        format!("{username}:{password}")
    );
    assert_eq!(auth.header_value(), values[0]);
}

#[test]
fn test_basic_non_ascii_is_utf8_encoded() {
    let auth = HttpBasicAuthenticator::new("pässword", "ü");
    assert_eq!(auth.header_value(), "Basic cMOkc3N3b3JkOsO8");
}

#[test]
fn test_basic_is_idempotent() {
    let auth = HttpBasicAuthenticator::new("alice", "s3cr3t");
    let client = client();
    let mut request = Request::new();

    auth.authenticate(&client, &mut request);
    auth.authenticate(&client, &mut request);
    auth.authenticate(&client, &mut request);

    assert_eq!(request.parameters().len(), 1);
    assert_eq!(authorization_values(&request), vec!["Basic YWxpY2U6czNjcjN0"]);
}

#[test]
fn test_basic_never_overwrites_other_credentials() {
    let client = client();
    let mut request = Request::new();

    HttpBasicAuthenticator::new("alice", "s3cr3t").authenticate(&client, &mut request);
    HttpBasicAuthenticator::new("mallory", "other").authenticate(&client, &mut request);

    assert_eq!(authorization_values(&request), vec!["Basic YWxpY2U6czNjcjN0"]);
}

#[test_case("authorization" ; "lowercase")]
#[test_case("AUTHORIZATION" ; "uppercase")]
#[test_case("AuThOrIzAtIoN" ; "mixed")]
fn test_basic_existing_header_any_case_is_kept(name: &str) {
    let mut request = Request::new();
    request.add_header(name, "Token  preexisting ");

    HttpBasicAuthenticator::new("alice", "s3cr3t").authenticate(&client(), &mut request);

    assert_eq!(request.parameters().len(), 1);
    assert_eq!(request.parameters()[0].name(), name);
    assert_eq!(
        request.parameters()[0].text().unwrap(),
        "Token  preexisting "
    );
}

#[test]
fn test_basic_skips_when_authorization_exists_with_other_kind() {
    let mut request = Request::new();
    request.add_query_parameter("Authorization", "x");

    HttpBasicAuthenticator::new("alice", "s3cr3t").authenticate(&client(), &mut request);

    assert_eq!(request.parameters().len(), 1);
    assert_eq!(request.parameters()[0].kind(), ParameterKind::Query);
}

#[test]
fn test_basic_debug_hides_credentials() {
    let auth = HttpBasicAuthenticator::new("alice", "s3cr3t");
    let debug = format!("{auth:?}");
    assert!(!debug.contains("YWxpY2U6czNjcjN0"));
}

// ============================================================================
// ensure_header
// ============================================================================

#[test]
fn test_ensure_header_only_computes_value_when_missing() {
    let mut request = Request::new();
    request.add_header("x-api-key", "existing");

    let mut calls = 0;
    let added = ensure_header(&mut request, "X-Api-Key", || {
        calls += 1;
        "new".to_string()
    });

    assert!(!added);
    assert_eq!(calls, 0);

    let added = ensure_header(&mut request, "X-Other", || {
        calls += 1;
        "value".to_string()
    });
    assert!(added);
    assert_eq!(calls, 1);
    assert_eq!(request.parameters().len(), 2);
}

#[test]
fn test_ensure_parameter_uses_client_comparer() {
    let strict = client();
    let relaxed = RestClient::with_config(
        ClientConfig::builder()
            .parameter_name_comparer(NameComparer::OrdinalIgnoreCase)
            .build(),
    )
    .unwrap();

    let mut request = Request::new();
    request.add_query_parameter("API_KEY", "a");

    assert!(!ensure_parameter(
        &relaxed,
        &mut request,
        "api_key",
        ParameterKind::Query,
        || "b".to_string()
    ));
    assert!(ensure_parameter(
        &strict,
        &mut request,
        "api_key",
        ParameterKind::Query,
        || "b".to_string()
    ));
    assert_eq!(request.parameters().len(), 2);
}

// ============================================================================
// Bearer / API key / headers
// ============================================================================

#[test]
fn test_bearer_auth() {
    let auth = BearerAuthenticator::new("my-bearer-token");
    let client = client();
    let mut request = Request::new();

    auth.authenticate(&client, &mut request);
    auth.authenticate(&client, &mut request);

    assert_eq!(authorization_values(&request), vec!["Bearer my-bearer-token"]);
}

#[test]
fn test_api_key_header_with_prefix() {
    let auth = ApiKeyAuthenticator::new(Location::Header, None, Some("Token "), "my-token");
    assert_eq!(auth.name(), "Authorization");

    let mut request = Request::new();
    auth.authenticate(&client(), &mut request);
    auth.authenticate(&client(), &mut request);

    assert_eq!(authorization_values(&request), vec!["Token my-token"]);
}

#[test]
fn test_api_key_query() {
    let auth = ApiKeyAuthenticator::new(Location::Query, Some("apikey"), None, "secret123");
    let client = client();
    let mut request = Request::new();

    auth.authenticate(&client, &mut request);
    auth.authenticate(&client, &mut request);

    let params: Vec<_> = request.parameters_of_kind(ParameterKind::Query).collect();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name(), "apikey");
    assert_eq!(params[0].text().unwrap(), "secret123");
}

#[test]
fn test_api_key_query_default_name() {
    let auth = ApiKeyAuthenticator::new(Location::Query, None, None, "k");
    assert_eq!(auth.name(), "api_key");
    assert_eq!(auth.location(), Location::Query);
}

#[test]
fn test_custom_headers() {
    let auth = HeadersAuthenticator::new([("X-Custom-1", "value1"), ("X-Custom-2", "value2")]);
    let client = client();
    let mut request = Request::new();
    request.add_header("x-custom-2", "kept");

    auth.authenticate(&client, &mut request);
    auth.authenticate(&client, &mut request);

    let headers: Vec<(String, String)> = request
        .parameters()
        .iter()
        .map(|p| (p.name().to_string(), p.text().unwrap().into_owned()))
        .collect();
    assert_eq!(
        headers,
        vec![
            ("x-custom-2".to_string(), "kept".to_string()),
            ("X-Custom-1".to_string(), "value1".to_string()),
        ]
    );
}

// ============================================================================
// AuthConfig
// ============================================================================

#[test]
fn test_auth_config_builds_matching_authenticator() {
    let client = client();

    let cases = vec![
        (
            AuthConfig::Basic {
                username: "alice".to_string(),
                password: "s3cr3t".to_string(),
            },
            "Basic YWxpY2U6czNjcjN0",
        ),
        (
            AuthConfig::Bearer {
                token: "t0k".to_string(),
            },
            "Bearer t0k",
        ),
        (
            AuthConfig::ApiKey {
                location: Location::Header,
                name: None,
                prefix: Some("Key ".to_string()),
                value: "abc".to_string(),
            },
            "Key abc",
        ),
    ];

    for (config, expected) in cases {
        let auth = config.build().unwrap();
        let mut request = Request::new();
        auth.authenticate(&client, &mut request);
        auth.authenticate(&client, &mut request);
        assert_eq!(authorization_values(&request), vec![expected]);
    }
}

#[test]
fn test_auth_config_custom_headers_sorted() {
    let mut headers = HashMap::new();
    headers.insert("X-B".to_string(), "2".to_string());
    headers.insert("X-A".to_string(), "1".to_string());

    let auth = AuthConfig::CustomHeaders { headers }.build().unwrap();
    let mut request = Request::new();
    auth.authenticate(&client(), &mut request);

    let names: Vec<&str> = request.parameters().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["X-A", "X-B"]);
}

#[test]
fn test_boxed_authenticator_delegates() {
    let boxed: Box<dyn Authenticator> = Box::new(BearerAuthenticator::new("x"));
    let shared = std::sync::Arc::new(boxed);
    let mut request = Request::new();
    shared.authenticate(&client(), &mut request);
    assert_eq!(authorization_values(&request), vec!["Bearer x"]);
}
