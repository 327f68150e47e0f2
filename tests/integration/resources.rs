//! `catalog://` resource tests.

use crate::common::{self, envelope, fixtures};
use serde_json::{Value, json};
use servicenow_catalog_mcp::mcp_integration::stdio::{INTERNAL_ERROR, INVALID_PARAMS};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_read_items_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/now/table/sc_cat_item"))
        .and(query_param("sysparm_limit", "10"))
        .and(query_param("sysparm_query", "active=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            fixtures::laptop_item(),
            fixtures::monitor_item()
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let items = mcp_server.read_resource("catalog://items").await.unwrap();

    assert_eq!(items.as_array().unwrap().len(), 2);
    assert_eq!(items[1]["sys_id"], fixtures::MONITOR_ITEM_ID);
}

#[tokio::test]
async fn test_read_categories_resource_over_jsonrpc() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/now/table/sc_category"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([fixtures::hardware_category()]))),
        )
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let response = mcp_server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "resources/read",
            "params": {"uri": "catalog://categories"}
        }))
        .await
        .unwrap();

    let result = response.result.expect("resource read should succeed");
    let contents = &result["contents"][0];
    assert_eq!(contents["uri"], "catalog://categories");
    assert_eq!(contents["mimeType"], "application/json");

    let categories: Value = serde_json::from_str(contents["text"].as_str().unwrap()).unwrap();
    assert_eq!(categories[0]["title"], "Hardware");
}

#[tokio::test]
async fn test_read_item_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/sn_sc/servicecatalog/items/{}",
            fixtures::LAPTOP_ITEM_ID
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(fixtures::laptop_item_detail())),
        )
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let item = mcp_server
        .read_resource(&format!("catalog://{}", fixtures::LAPTOP_ITEM_ID))
        .await
        .unwrap();

    assert_eq!(item["name"], "Developer Laptop (Mac)");
    assert_eq!(item["variables"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_read_missing_item_resource_is_invalid_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Null)))
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let response = mcp_server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "id": 8,
            "method": "resources/read",
            "params": {"uri": "catalog://nothing-here"}
        }))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error["code"], INVALID_PARAMS);
    assert_eq!(error["message"], "Catalog item not found: nothing-here");
}

#[tokio::test]
async fn test_read_resource_server_failure_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let response = mcp_server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "resources/read",
            "params": {"uri": "catalog://items"}
        }))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap()["code"], INTERNAL_ERROR);
}
