//! Category tool tests.

use crate::common::{self, envelope, expect_failure, fixtures};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY_PATH: &str = "/api/now/table/sc_category";

#[tokio::test]
async fn test_list_categories_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("sysparm_limit", "10"))
        .and(query_param("sysparm_offset", "0"))
        .and(query_param("sysparm_display_value", "true"))
        .and(query_param("sysparm_exclude_reference_link", "true"))
        .and(query_param("sysparm_query", "active=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            fixtures::hardware_category(),
            fixtures::software_category()
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool("list_catalog_categories", json!({}))
        .await;

    assert!(result.success, "{}", result.content);
    assert_eq!(result.content["message"], "Retrieved 2 catalog categories");
    assert_eq!(result.content["total"], 2);
    assert_eq!(result.content["limit"], 10);
    assert_eq!(result.content["offset"], 0);

    let categories = result.content["categories"].as_array().unwrap();
    assert_eq!(categories[0]["sys_id"], fixtures::HARDWARE_CATEGORY_ID);
    assert_eq!(categories[0]["title"], "Hardware");
    assert_eq!(categories[1]["order"], "200");
}

#[tokio::test]
async fn test_list_categories_with_search_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("sysparm_limit", "5"))
        .and(query_param("sysparm_offset", "5"))
        .and(query_param(
            "sysparm_query",
            "titleLIKEHard^ORdescriptionLIKEHard",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([fixtures::hardware_category()]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool(
            "list_catalog_categories",
            json!({"limit": 5, "offset": 5, "query": "Hard", "active": false}),
        )
        .await;

    assert!(result.success, "{}", result.content);
    assert_eq!(result.content["total"], 1);
    assert_eq!(result.content["offset"], 5);
}

#[tokio::test]
async fn test_list_categories_without_filters_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param_is_missing("sysparm_query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let service = common::mock_service(&server);
    let params = servicenow_catalog_mcp::catalog::ListCatalogCategoriesParams {
        active: false,
        ..Default::default()
    };
    let page = service.list_catalog_categories(&params).await.unwrap();

    assert!(page.records.is_empty());
    assert_eq!(page.total(), 0);
}

#[tokio::test]
async fn test_list_categories_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool("list_catalog_categories", json!({"limit": 25, "offset": 50}))
        .await;

    assert_eq!(expect_failure(&result), "HTTP_STATUS_500");
    assert_eq!(result.content["categories"], json!([]));
    assert_eq!(result.content["total"], 0);
    assert_eq!(result.content["limit"], 25);
    assert_eq!(result.content["offset"], 50);
    assert!(
        result.content["message"]
            .as_str()
            .unwrap()
            .starts_with("Error listing catalog categories")
    );
}

#[tokio::test]
async fn test_create_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CATEGORY_PATH))
        .and(body_json(json!({
            "title": "Peripherals",
            "description": "Mice, keyboards and docks",
            "parent": fixtures::HARDWARE_CATEGORY_ID,
            "active": "true",
            "order": "300"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "sys_id": "5c1f8ab1db0b3300f4e0d9f2ca9619a0",
            "title": "Peripherals",
            "description": "Mice, keyboards and docks",
            "parent": "Hardware",
            "icon": "",
            "active": "true",
            "order": "300"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool(
            "create_catalog_category",
            json!({
                "title": "Peripherals",
                "description": "Mice, keyboards and docks",
                "parent": fixtures::HARDWARE_CATEGORY_ID,
                "order": 300
            }),
        )
        .await;

    assert!(result.success, "{}", result.content);
    assert_eq!(result.content["message"], "Created catalog category: Peripherals");
    assert_eq!(result.content["data"]["parent"], "Hardware");
    assert_eq!(
        result.metadata.unwrap()["resource_id"],
        "5c1f8ab1db0b3300f4e0d9f2ca9619a0"
    );
}

#[tokio::test]
async fn test_create_category_requires_title() {
    let server = MockServer::start().await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool("create_catalog_category", json!({"description": "No title"}))
        .await;

    assert_eq!(expect_failure(&result), "INVALID_REQUEST");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_category_sends_only_supplied_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!(
            "{}/{}",
            CATEGORY_PATH,
            fixtures::SOFTWARE_CATEGORY_ID
        )))
        .and(body_json(json!({"title": "Software & Licenses", "active": "false"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "sys_id": fixtures::SOFTWARE_CATEGORY_ID,
            "title": "Software & Licenses",
            "active": "false"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool(
            "update_catalog_category",
            json!({
                "category_id": fixtures::SOFTWARE_CATEGORY_ID,
                "title": "Software & Licenses",
                "active": false
            }),
        )
        .await;

    assert!(result.success, "{}", result.content);
    assert_eq!(
        result.content["message"],
        format!("Updated catalog category: {}", fixtures::SOFTWARE_CATEGORY_ID)
    );
    assert_eq!(result.content["data"]["title"], "Software & Licenses");
    assert_eq!(result.content["data"]["description"], "");
}

#[tokio::test]
async fn test_update_missing_category() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{}/does-not-exist", CATEGORY_PATH)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "No Record found", "detail": "Record doesn't exist"},
            "status": "failure"
        })))
        .mount(&server)
        .await;

    let mcp_server = common::mock_mcp_server(&server);
    let result = mcp_server
        .execute_tool(
            "update_catalog_category",
            json!({"category_id": "does-not-exist", "icon": "new.png"}),
        )
        .await;

    assert_eq!(expect_failure(&result), "HTTP_STATUS_404");
    assert!(result.content["error"].as_str().unwrap().contains("No Record found"));
}
