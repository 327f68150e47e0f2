//! Catalog request handlers for MCP integration

use crate::catalog::{SubmitCatalogRequestParams, parse_params};
use crate::mcp_integration::core::{CatalogMcpServer, CatalogToolResult};
use serde_json::{Value, json};

/// Handle catalog request submission through MCP
///
/// Content `data` holds `record_id` and `record_number` of the requested
/// item created for the order (or of the request itself when it has none).
pub async fn handle_submit_catalog_request(
    server: &CatalogMcpServer,
    arguments: Value,
) -> CatalogToolResult {
    const OPERATION: &str = "submit_catalog_request";
    const CONTEXT: &str = "Error submitting catalog request";

    let params = match parse_params::<SubmitCatalogRequestParams>(arguments) {
        Ok(params) => params,
        Err(e) => return CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    };

    match server.service.submit_catalog_request(&params).await {
        Ok(record) => CatalogToolResult::success(
            OPERATION,
            json!({
                "success": true,
                "message": format!(
                    "Submitted catalog request; created record {}",
                    record.reference()
                ),
                "data": {
                    "record_id": record.record_id,
                    "record_number": record.record_number,
                },
            }),
        )
        .with_metadata("item_id", json!(params.item_id))
        .with_metadata("record_table", json!(record.table)),
        Err(e) => CatalogToolResult::failure(OPERATION, CONTEXT, &e),
    }
}
