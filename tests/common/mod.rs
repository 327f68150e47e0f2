//! Common test utilities for catalog integration testing.
//!
//! Every integration test talks to a [`wiremock::MockServer`] standing in for
//! a ServiceNow instance. The helpers here build clients pointed at it and
//! decode the JSON that tools and the stdio transport produce.

use serde_json::Value;
use servicenow_catalog_mcp::{
    AuthConfig, CatalogMcpServer, CatalogService, CatalogToolResult, ServerConfig,
};
use wiremock::MockServer;


pub const USERNAME: &str = "catalog.admin";
pub const PASSWORD: &str = "s3cret";

/// Configuration with basic auth pointed at the mock instance.
pub fn mock_config(server: &MockServer) -> ServerConfig {
    ServerConfig::new(server.uri()).with_auth(AuthConfig::Basic {
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
    })
}

pub fn mock_service(server: &MockServer) -> CatalogService {
    CatalogService::from_config(&mock_config(server)).expect("Failed to build catalog service")
}

pub fn mock_mcp_server(server: &MockServer) -> CatalogMcpServer {
    CatalogMcpServer::from_config(&mock_config(server)).expect("Failed to build MCP server")
}

/// Table API style envelope.
pub fn envelope(result: Value) -> Value {
    serde_json::json!({ "result": result })
}

/// Assert a failed tool result and return its error code.
pub fn expect_failure(result: &CatalogToolResult) -> String {
    assert!(
        !result.success,
        "expected failure, got: {}",
        result.content
    );
    assert_eq!(result.content["success"], false);
    result.content["error_code"]
        .as_str()
        .expect("failure should carry an error_code")
        .to_string()
}

/// Body of the `n`th request the mock instance received, as JSON.
pub async fn request_body(server: &MockServer, n: usize) -> Value {
    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    serde_json::from_slice(&requests[n].body).expect("request body should be JSON")
}
