//! Common test utilities for teamsync-core integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use teamsync_core::config::AzureSettings;
use teamsync_core::directory::AzureProvider;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TENANT_ID: &str = "test-tenant";
pub const GROUPS_PATH: &str = "/v1.0/groups";

/// Test data factory for a Graph group record.
pub fn create_test_group(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "displayName": name
    })
}

/// Wraps groups in an OData page.
pub fn create_odata_page(items: Vec<Value>, next_link: Option<&str>) -> Value {
    let mut response = json!({ "value": items });
    if let Some(link) = next_link {
        response["@odata.nextLink"] = json!(link);
    }
    response
}

/// Creates an OData error response.
pub fn create_odata_error(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Continuation link pointing back at the mock server.
pub fn next_link(server: &MockServer, token: &str) -> String {
    format!("{}{}?$skiptoken={}", server.uri(), GROUPS_PATH, token)
}

/// Settings whose login and Graph endpoints both point at `server`.
pub fn azure_settings(server: &MockServer) -> AzureSettings {
    AzureSettings {
        tenant_id: TENANT_ID.to_string(),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        graph_endpoint: Some(server.uri()),
        login_endpoint: Some(server.uri()),
    }
}

pub fn azure_provider(server: &MockServer, max_pages: Option<usize>) -> AzureProvider {
    AzureProvider::from_settings(&azure_settings(server), max_pages).unwrap()
}

/// Mounts a client-credentials token endpoint.
pub async fn mock_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/{}/oauth2/v2.0/token", TENANT_ID)))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "mock-access-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(server)
        .await;
}
