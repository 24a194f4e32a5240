#![allow(dead_code)]

use std::{fs, path::Path};

use edinet_rs::EdinetClient;
use httpmock::{Method::GET, Mock, MockServer};
use url::Url;

pub const API_KEY: &str = "test-subscription-key";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// Client pointed at the mock server's index and archive endpoints.
pub fn client_for(server: &MockServer) -> EdinetClient {
    EdinetClient::builder()
        .api_key(API_KEY)
        .base_documents(
            Url::parse(&format!("{}/api/v2/documents.json", server.base_url())).unwrap(),
        )
        .base_archive(Url::parse(&format!("{}/api/v2/documents/", server.base_url())).unwrap())
        .build()
        .unwrap()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Mock one date's disclosure index.
pub fn mock_index<'a>(server: &'a MockServer, date: &str, body: String) -> Mock<'a> {
    let date = date.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/documents.json")
            .query_param("date", date)
            .query_param("type", "2")
            .query_param("Subscription-Key", API_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_index_empty<'a>(server: &'a MockServer, date: &str) -> Mock<'a> {
    mock_index(server, date, fixture("documents_empty.json"))
}

pub fn mock_index_error<'a>(server: &'a MockServer, date: &str) -> Mock<'a> {
    let date = date.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/documents.json")
            .query_param("date", date);
        then.status(500).body("internal server error");
    })
}

/// Mock the ZIP download for one document id.
pub fn mock_archive_zip<'a>(server: &'a MockServer, doc_id: &str, zip_fixture: &str) -> Mock<'a> {
    let path = format!("/api/v2/documents/{doc_id}");
    let body = fixture_bytes(zip_fixture);
    server.mock(|when, then| {
        when.method(GET)
            .path(path)
            .query_param("type", "1")
            .query_param("Subscription-Key", API_KEY);
        then.status(200)
            .header("content-type", "application/octet-stream")
            .body(body);
    })
}

/// EDINET signals "no file for this document" with a JSON body, not a 404.
pub fn mock_archive_no_file<'a>(server: &'a MockServer, doc_id: &str) -> Mock<'a> {
    let path = format!("/api/v2/documents/{doc_id}");
    server.mock(|when, then| {
        when.method(GET)
            .path(path)
            .query_param("type", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"metadata":{"status":"404","message":"NOT FOUND"}}"#);
    })
}
