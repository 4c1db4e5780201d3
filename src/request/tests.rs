//! Tests for the request module

use super::*;
use crate::types::{ContentCollectionMode, Method};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

#[test]
fn test_default_request() {
    let request = Request::new();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.resource, None);
    assert_eq!(
        request.content_collection_mode,
        ContentCollectionMode::MultiPartForFileParameters
    );
    assert!(request.parameters().is_empty());
    assert!(request.credentials.is_none());
    assert!(request.parameter_name_comparer.is_none());
    assert_eq!(request.serializer.content_type(), "application/json");
}

#[test]
fn test_constructors_share_defaults() {
    let by_method = Request::with_method(Method::POST);
    assert_eq!(by_method.method, Method::POST);
    assert_eq!(by_method.resource, None);

    let by_resource = Request::with_resource("users/1", Method::DELETE);
    assert_eq!(by_resource.method, Method::DELETE);
    assert_eq!(by_resource.resource.as_deref(), Some("users/1"));
    assert_eq!(
        by_resource.content_collection_mode,
        ContentCollectionMode::MultiPartForFileParameters
    );
    assert_eq!(by_resource.serializer.content_type(), "application/json");
}

#[test_case("https://host/api/v1/items?x=1", "/api/v1/items?x=1" ; "absolute with query")]
#[test_case("https://host/api/v1/items", "/api/v1/items" ; "absolute without query")]
#[test_case("http://host", "/" ; "absolute root")]
#[test_case("items?x=1", "items?x=1" ; "relative with query")]
#[test_case("/items", "/items" ; "rooted relative")]
#[test_case("", "" ; "empty")]
fn test_from_uri(uri: &str, expected: &str) {
    let request = Request::from_uri(uri, Method::GET);
    assert_eq!(request.resource.as_deref(), Some(expected));
}

#[test]
fn test_from_uri_drops_fragment() {
    let request = Request::from_uri("https://host/a?b=c#frag", Method::PUT);
    assert_eq!(request.resource.as_deref(), Some("/a?b=c"));
    assert_eq!(request.method, Method::PUT);
}

#[test]
fn test_duplicate_query_parameters_keep_order() {
    let mut request = Request::with_resource("search", Method::GET);
    request
        .add_query_parameter("tag", "a")
        .add_query_parameter("tag", "b")
        .add_query_parameter("tag", "c");

    let values: Vec<String> = request
        .parameters_of_kind(ParameterKind::Query)
        .map(|p| p.text().unwrap().into_owned())
        .collect();
    assert_eq!(values, vec!["a", "b", "c"]);
    assert_eq!(request.parameters().len(), 3);
    assert!(request.parameters().iter().all(|p| p.name() == "tag"));
}

#[test]
fn test_add_parameter_never_deduplicates_headers() {
    let mut request = Request::new();
    request.add_header("Accept", "application/json");
    request.add_header("Accept", "text/plain");
    assert_eq!(request.parameters().len(), 2);
}

#[test]
fn test_no_validation_on_get_with_body() {
    let mut request = Request::new();
    request.add_json_body(json!({"name": "alice"}));
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.parameters()[0].kind(), ParameterKind::RequestBody);
}

#[test]
fn test_find_parameter_respects_comparer_and_kind() {
    let mut request = Request::new();
    request.add_query_parameter("Page", 2i64);
    request.add_header("page", "header-value");

    assert!(request
        .find_parameter("page", ParameterKind::Query, NameComparer::Ordinal)
        .is_none());
    let found = request
        .find_parameter("page", ParameterKind::Query, NameComparer::OrdinalIgnoreCase)
        .unwrap();
    assert_eq!(found.text().unwrap(), "2");

    assert!(request.has_parameter("page", ParameterKind::HttpHeader, NameComparer::Ordinal));
    assert!(!request.has_parameter("Page", ParameterKind::HttpHeader, NameComparer::Ordinal));
}

#[test]
fn test_has_parameter_named_ignores_kind_and_case() {
    let mut request = Request::new();
    request.add_query_parameter("authorization", "x");
    assert!(request.has_parameter_named("Authorization"));
    assert!(!request.has_parameter_named("Auth"));
}

#[test]
fn test_has_files() {
    let mut request = Request::with_method(Method::POST);
    request.add_url_encoded_parameter("title", "report");
    assert!(!request.has_files());

    request.add_file("upload", "report.csv", Some("text/csv".to_string()), vec![1u8, 2, 3]);
    assert!(request.has_files());
}

#[test]
fn test_network_credential_debug_hides_password() {
    let credential = NetworkCredential::new("alice", "s3cr3t").with_domain("CORP");
    let debug = format!("{credential:?}");
    assert!(!debug.contains("s3cr3t"));
    assert_eq!(credential.qualified_username(), "CORP\\alice");
}
