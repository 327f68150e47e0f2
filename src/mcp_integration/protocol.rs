//! MCP protocol layer for tool discovery and dispatch
//!
//! This module handles tool discovery and execution dispatch. It is the
//! interface between AI agents and the catalog operations; the JSON-RPC
//! framing lives in [`super::stdio`].

use super::core::{CatalogMcpServer, CatalogToolResult};
use super::handlers::{categories, items, requests};
use super::tools::{category_schemas, item_schemas, request_schemas};
use log::{debug, warn};
use serde_json::{Value, json};

impl CatalogMcpServer {
    /// Get the list of available MCP tools as JSON
    ///
    /// Returns all tool definitions that AI agents can discover and execute.
    /// Each tool includes its name, description and input schema.
    pub fn get_tools(&self) -> Vec<Value> {
        vec![
            category_schemas::list_catalog_categories_tool(),
            category_schemas::create_catalog_category_tool(),
            category_schemas::update_catalog_category_tool(),
            item_schemas::move_catalog_items_tool(),
            item_schemas::list_catalog_items_tool(),
            item_schemas::get_catalog_item_tool(),
            request_schemas::submit_catalog_request_tool(),
        ]
    }

    /// Execute a tool by name with arguments
    ///
    /// Routes the request to the handler for `tool_name`. Unknown tools
    /// produce a failed result with `UNKNOWN_TOOL` rather than an error.
    pub async fn execute_tool(&self, tool_name: &str, arguments: Value) -> CatalogToolResult {
        debug!("Executing MCP tool: {} with args: {}", tool_name, arguments);

        match tool_name {
            // Category operations
            "list_catalog_categories" => {
                categories::handle_list_catalog_categories(self, arguments).await
            }
            "create_catalog_category" => {
                categories::handle_create_catalog_category(self, arguments).await
            }
            "update_catalog_category" => {
                categories::handle_update_catalog_category(self, arguments).await
            }

            // Item operations
            "move_catalog_items" => items::handle_move_catalog_items(self, arguments).await,
            "list_catalog_items" => items::handle_list_catalog_items(self, arguments).await,
            "get_catalog_item" => items::handle_get_catalog_item(self, arguments).await,

            // Request operations
            "submit_catalog_request" => {
                requests::handle_submit_catalog_request(self, arguments).await
            }

            _ => {
                warn!("Unknown tool requested: {}", tool_name);
                CatalogToolResult::new(
                    tool_name,
                    false,
                    json!({
                        "success": false,
                        "message": format!("Unknown tool: {}", tool_name),
                        "error": "Unknown tool",
                        "error_code": "UNKNOWN_TOOL",
                        "tool_name": tool_name,
                    }),
                )
            }
        }
    }
}
