//! Catalog category handlers for MCP integration
//!
//! Each handler parses its arguments into typed parameters, calls the
//! matching [`CatalogService`](crate::catalog::CatalogService) operation and
//! shapes the outcome into a [`CatalogToolResult`]. Bad arguments and remote
//! failures both come back as failed results; nothing here panics.

use crate::catalog::{
    CreateCatalogCategoryParams, ListCatalogCategoriesParams, UpdateCatalogCategoryParams,
    parse_params,
};
use crate::mcp_integration::core::{CatalogMcpServer, CatalogToolResult};
use serde_json::{Value, json};

/// Handle category listing through MCP
///
/// Content carries `categories`, `total` (rows returned), `limit` and `offset`.
pub async fn handle_list_catalog_categories(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "list_catalog_categories";
    const CONTEXT: &str = "Error listing catalog categories";

    let params = match parse_params::<ListCatalogCategoriesParams>(arguments) {
        Ok(params) => params,
        Err(e) => {
            return CatalogToolResult::failure(OPERATION, CONTEXT, &e)
                .with_content("categories", json!([]))
                .with_content("total", json!(0));
        }
    };

    match server.service.list_catalog_categories(&params).await {
        Ok(page) => CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!("Retrieved {} catalog categories", page.total()),
                "categories": page.records,
                "total": page.total(),
                "limit": page.limit,
                "offset": page.offset,
            }),
        ),
        Err(e) => CatalogToolResult::failure(OPERATION, CONTEXT, &e)
            .with_content("categories", json!([]))
            .with_content("total", json!(0))
            .with_content("limit", json!(params.limit))
            .with_content("offset", json!(params.offset)),
    }
}

/// Handle category creation through MCP
///
/// # Errors
///
/// Returns a failed result if `title` is missing or blank, or if the
/// instance rejects the record.
pub async fn handle_create_catalog_category(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "create_catalog_category";
    const CONTEXT: &str = "Error creating catalog category";

    let params = match parse_params::<CreateCatalogCategoryParams>(arguments) {
        Ok(params) => params,
        Err(e) => return CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    };

    match server.service.create_catalog_category(&params).await {
        Ok(category) => {
            let resource_id = category.sys_id.clone();
            CatalogToolResult::success(
                OPERATION,
                json!({
                    "success": true,
                    "message": format!("Created catalog category: {}", params.title),
                    "data": category,
                }),
            )
            .with_metadata("resource_id", json!(resource_id))
        }
        Err(e) => CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    }
}

/// Handle category update through MCP
///
/// Only the fields present in the arguments are sent. A call with nothing
/// to change fails before any request is made.
pub async fn handle_update_catalog_category(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "update_catalog_category";
    const CONTEXT: &str = "Error updating catalog category";

    let params = match parse_params::<UpdateCatalogCategoryParams>(arguments) {
        Ok(params) => params,
        Err(e) => return CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    };

    match server.service.update_catalog_category(&params).await {
        Ok(category) => CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!("Updated catalog category: {}", params.category_id),
                "data": category,
            }),
        )
        .with_metadata("resource_id", json!(params.category_id)),
        Err(e) => CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    }
}
