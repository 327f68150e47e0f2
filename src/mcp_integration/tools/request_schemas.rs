//! Catalog request tool schema definitions for MCP integration

use serde_json::{Value, json};

/// Schema definition for catalog request submission tool
pub fn submit_catalog_request_tool() -> Value {
    json!({
        "name": "submit_catalog_request",
        "description": "Order a catalog item or submit a record producer with variable values",
        "inputSchema": {
            "type": "object",
            "properties": {
                "item_id": {
                    "type": "string",
                    "description": "sys_id of the catalog item or record producer"
                },
                "variables": {
                    "type": "object",
                    "description": "Variable values keyed by variable name",
                    "additionalProperties": true
                },
                "item_type": {
                    "type": "string",
                    "enum": ["item", "producer"],
                    "description": "Whether item_id is a catalog item or a record producer",
                    "default": "item"
                },
                "quantity": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Quantity to order (catalog items only)"
                }
            },
            "required": ["item_id"]
        }
    })
}
