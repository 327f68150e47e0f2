//! Catalog request submission tests.

use crate::common::{self, envelope, expect_failure, fixtures};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REQUEST_ITEM_PATH: &str = "/api/now/table/sc_req_item";

fn action_path(item_id: &str, action: &str) -> String {
    format!("/api/sn_sc/servicecatalog/items/{}/{}", item_id, action)
}

async fn mount_order_now(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(action_path(fixtures::LAPTOP_ITEM_ID, "order_now")))
        .and(body_json(json!({
            "variables": {"ram": "32", "justification": "New hire"},
            "sysparm_quantity": "2"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(fixtures::order_now_result())),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn order_arguments() -> serde_json::Value {
    json!({
        "item_id": fixtures::LAPTOP_ITEM_ID,
        "variables": {"ram": "32", "justification": "New hire"},
        "quantity": 2
    })
}

#[tokio::test]
async fn test_order_returns_requested_item() {
    let server = MockServer::start().await;
    mount_order_now(&server).await;
    Mock::given(method("GET"))
        .and(path(REQUEST_ITEM_PATH))
        .and(query_param(
            "sysparm_query",
            format!("request={}", fixtures::REQUEST_ID),
        ))
        .and(query_param("sysparm_limit", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!([fixtures::requested_item()]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool("submit_catalog_request", order_arguments())
        .await;

    assert!(result.success, "{}", result.content);
    assert_eq!(
        result.content["message"],
        "Submitted catalog request; created record RITM0010077"
    );
    assert_eq!(result.content["data"]["record_id"], fixtures::RITM_ID);
    assert_eq!(result.content["data"]["record_number"], "RITM0010077");
    assert_eq!(result.metadata.unwrap()["record_table"], "sc_req_item");
}

#[tokio::test]
async fn test_order_without_requested_items_falls_back_to_request() {
    let server = MockServer::start().await;
    mount_order_now(&server).await;
    Mock::given(method("GET"))
        .and(path(REQUEST_ITEM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let service = common::mock_service(&server);
    let params = servicenow_catalog_mcp::catalog::parse_params(order_arguments()).unwrap();
    let record = service.submit_catalog_request(&params).await.unwrap();

    assert_eq!(record.record_id.as_deref(), Some(fixtures::REQUEST_ID));
    assert_eq!(record.record_number.as_deref(), Some("REQ0010045"));
    assert_eq!(record.table.as_deref(), Some("sc_request"));
}

#[tokio::test]
async fn test_submit_record_producer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(action_path("producer1", "submit_producer")))
        .and(body_json(json!({"variables": {"short_description": "VPN is down"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(fixtures::producer_result())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool(
            "submit_catalog_request",
            json!({
                "item_id": "producer1",
                "item_type": "producer",
                "variables": {"short_description": "VPN is down"}
            }),
        )
        .await;

    assert!(result.success, "{}", result.content);
    assert_eq!(result.content["data"]["record_number"], "INC0010123");
    // Only the producer endpoint was called; no requested item lookup
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_rejects_invalid_arguments() {
    let server = MockServer::start().await;
    let mcp_server = common::mock_mcp_server(&server);

    for arguments in [
        json!({"item_id": "producer1", "item_type": "producer", "quantity": 3}),
        json!({"item_id": "item1", "quantity": 0}),
        json!({"item_id": "item1", "item_type": "bundle"}),
        json!({"item_id": " "}),
    ] {
        let result = mcp_server
            .execute_tool("submit_catalog_request", arguments.clone())
            .await;
        assert_eq!(expect_failure(&result), "INVALID_REQUEST", "{}", arguments);
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_error_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Mandatory variables are missing"}
        })))
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool("submit_catalog_request", json!({"item_id": "item1"}))
        .await;

    assert_eq!(expect_failure(&result), "HTTP_STATUS_400");
    assert!(
        result.content["message"]
            .as_str()
            .unwrap()
            .starts_with("Error submitting catalog request")
    );
}
