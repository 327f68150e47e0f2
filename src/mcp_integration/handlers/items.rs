//! Catalog item handlers for MCP integration

use crate::catalog::{
    GetCatalogItemParams, ListCatalogItemsParams, MoveCatalogItemsParams, parse_params,
};
use crate::mcp_integration::core::{CatalogMcpServer, CatalogToolResult};
use serde_json::{Value, json};

/// Handle catalog item listing through MCP
pub async fn handle_list_catalog_items(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "list_catalog_items";
    const CONTEXT: &str = "Error listing catalog items";

    let params = match parse_params::<ListCatalogItemsParams>(arguments) {
        Ok(params) => params,
        Err(e) => {
            return CatalogToolResult::failure(OPERATION, CONTEXT, &e)
                .with_content("items", json!([]))
                .with_content("total", json!(0));
        }
    };

    match server.service.list_catalog_items(&params).await {
        Ok(page) => CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!("Retrieved {} catalog items", page.total()),
                "items": page.records,
                "total": page.total(),
                "limit": page.limit,
                "offset": page.offset,
            }),
        ),
        Err(e) => CatalogToolResult::failure(OPERATION, CONTEXT, &e)
            .with_content("items", json!([]))
            .with_content("total", json!(0))
            .with_content("limit", json!(params.limit))
            .with_content("offset", json!(params.offset)),
    }
}

/// Handle catalog item retrieval through MCP
///
/// Returns the item with its variables folded into a hierarchy, so
/// container variables hold their members in `children`.
///
/// # Errors
///
/// Returns a failed result with `NOT_FOUND` when the instance has no item
/// with the given id.
pub async fn handle_get_catalog_item(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "get_catalog_item";
    const CONTEXT: &str = "Error getting catalog item";

    let params = match parse_params::<GetCatalogItemParams>(arguments) {
        Ok(params) => params,
        Err(e) => return CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    };

    match server.service.get_catalog_item(&params).await {
        Ok(item) => CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!("Retrieved catalog item: {}", item.name),
                "data": item,
            }),
        )
        .with_metadata("resource_id", json!(params.item_id))
        .with_metadata("variable_count", json!(item.variable_count())),
        Err(e) => CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    }
}

/// Handle moving catalog items between categories through MCP
///
/// A batch where only some items move is still reported as a success,
/// listing the items that failed. Only a batch where nothing moved fails.
pub async fn handle_move_catalog_items(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "move_catalog_items";
    const CONTEXT: &str = "Error moving catalog items";

    let params = match parse_params::<MoveCatalogItemsParams>(arguments) {
        Ok(params) => params,
        Err(e) => return CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    };

    let outcome = match server.service.move_catalog_items(&params).await {
        Ok(outcome) => outcome,
        Err(e) => return CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    };

    let moved = outcome.moved.len();
    if outcome.is_complete() {
        CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!(
                    "Successfully moved {} catalog items to category {}",
                    moved, params.target_category_id
                ),
                "data": {"moved_items_count": moved},
            }),
        )
        .with_metadata("resource_id", json!(params.target_category_id))
    } else if outcome.is_partial() {
        CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!(
                    "Partially moved catalog items. {} succeeded, {} failed.",
                    moved,
                    outcome.failed.len()
                ),
                "data": {
                    "moved_items_count": moved,
                    "failed_items": outcome.failed,
                },
            }),
        )
        .with_metadata("resource_id", json!(params.target_category_id))
    } else {
        CatalogToolResult::new(
            OPERATION,
            false,
            json!({
                "success": false,
                "message": "Failed to move any catalog items",
                "error": "Failed to move any catalog items",
                "error_code": "MOVE_FAILED",
                "data": {"failed_items": outcome.failed},
            }),
        )
    }
}
