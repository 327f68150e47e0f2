//! Catalog item tool schema definitions for MCP integration

use serde_json::{Value, json};

/// Schema definition for catalog item listing tool
pub fn list_catalog_items_tool() -> Value {
    json!({
        "name": "list_catalog_items",
        "description": "List service catalog items, optionally filtered by category or search term",
        "inputSchema": {
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of items to return",
                    "default": 10,
                    "minimum": 0
                },
                "offset": {
                    "type": "integer",
                    "description": "Offset for pagination",
                    "default": 0,
                    "minimum": 0
                },
                "category": {
                    "type": "string",
                    "description": "sys_id of the category to filter by"
                },
                "query": {
                    "type": "string",
                    "description": "Search term matched against name and short description"
                },
                "active": {
                    "type": "boolean",
                    "description": "Whether to only return active items",
                    "default": true
                }
            }
        }
    })
}

/// Schema definition for catalog item retrieval tool
///
/// The result includes the item's variables as a nested hierarchy.
pub fn get_catalog_item_tool() -> Value {
    json!({
        "name": "get_catalog_item",
        "description": "Get a specific service catalog item, including its variables",
        "inputSchema": {
            "type": "object",
            "properties": {
                "item_id": {
                    "type": "string",
                    "description": "sys_id of the catalog item"
                }
            },
            "required": ["item_id"]
        }
    })
}

/// Schema definition for catalog item move tool
pub fn move_catalog_items_tool() -> Value {
    json!({
        "name": "move_catalog_items",
        "description": "Move catalog items to a different category",
        "inputSchema": {
            "type": "object",
            "properties": {
                "item_ids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "description": "sys_ids of the catalog items to move"
                },
                "target_category_id": {
                    "type": "string",
                    "description": "sys_id of the destination category"
                }
            },
            "required": ["item_ids", "target_category_id"]
        }
    })
}
