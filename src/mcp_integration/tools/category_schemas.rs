//! Category tool schema definitions for MCP integration
//!
//! JSON schema definitions that let AI agents discover the catalog category
//! tools and the parameters they accept.
//!
//! - [`list_catalog_categories_tool`] - filtered, paginated category listing
//! - [`create_catalog_category_tool`] - category creation
//! - [`update_catalog_category_tool`] - partial category update

use serde_json::{Value, json};

/// Schema definition for category listing tool
pub fn list_catalog_categories_tool() -> Value {
    json!({
        "name": "list_catalog_categories",
        "description": "List service catalog categories, optionally filtered by a search term",
        "inputSchema": {
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of categories to return",
                    "default": 10,
                    "minimum": 0
                },
                "offset": {
                    "type": "integer",
                    "description": "Offset for pagination",
                    "default": 0,
                    "minimum": 0
                },
                "query": {
                    "type": "string",
                    "description": "Search term matched against title and description"
                },
                "active": {
                    "type": "boolean",
                    "description": "Whether to only return active categories",
                    "default": true
                }
            }
        }
    })
}

/// Schema definition for category creation tool
pub fn create_catalog_category_tool() -> Value {
    json!({
        "name": "create_catalog_category",
        "description": "Create a new service catalog category",
        "inputSchema": {
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the category"
                },
                "description": {
                    "type": "string",
                    "description": "Description of the category"
                },
                "parent": {
                    "type": "string",
                    "description": "sys_id of the parent category"
                },
                "icon": {
                    "type": "string",
                    "description": "Icon for the category"
                },
                "active": {
                    "type": "boolean",
                    "description": "Whether the category is active",
                    "default": true
                },
                "order": {
                    "type": "integer",
                    "description": "Order of the category"
                }
            },
            "required": ["title"]
        }
    })
}

/// Schema definition for category update tool
///
/// At least one field besides `category_id` must be supplied.
pub fn update_catalog_category_tool() -> Value {
    json!({
        "name": "update_catalog_category",
        "description": "Update an existing service catalog category",
        "inputSchema": {
            "type": "object",
            "properties": {
                "category_id": {
                    "type": "string",
                    "description": "sys_id of the category to update"
                },
                "title": {
                    "type": "string",
                    "description": "New title of the category"
                },
                "description": {
                    "type": "string",
                    "description": "New description of the category"
                },
                "parent": {
                    "type": "string",
                    "description": "sys_id of the new parent category"
                },
                "icon": {
                    "type": "string",
                    "description": "New icon for the category"
                },
                "active": {
                    "type": "boolean",
                    "description": "Whether the category is active"
                },
                "order": {
                    "type": "integer",
                    "description": "New order of the category"
                }
            },
            "required": ["category_id"]
        }
    })
}
