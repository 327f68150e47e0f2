//! Read-only MCP resources over the catalog
//!
//! - `catalog://items` - first page of active catalog items
//! - `catalog://categories` - first page of active categories
//! - `catalog://{item_id}` - one catalog item with its variables
//!
//! The two fixed names take precedence, so an item whose sys_id is literally
//! `items` or `categories` cannot be read through the template.

use super::core::CatalogMcpServer;
use crate::catalog::{GetCatalogItemParams, ListCatalogCategoriesParams, ListCatalogItemsParams};
use crate::error::{CatalogError, CatalogResult};
use log::info;
use serde_json::{Value, json};

pub const RESOURCE_SCHEME: &str = "catalog://";
pub const ITEMS_URI: &str = "catalog://items";
pub const CATEGORIES_URI: &str = "catalog://categories";
pub const ITEM_URI_TEMPLATE: &str = "catalog://{item_id}";

/// A parsed `catalog://` resource address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogResource {
    Items,
    Categories,
    Item(String),
}

impl CatalogResource {
    pub fn parse(uri: &str) -> CatalogResult<Self> {
        let path = uri.strip_prefix(RESOURCE_SCHEME).ok_or_else(|| {
            CatalogError::invalid_request(format!("unsupported resource URI: {}", uri))
        })?;

        match path.trim_end_matches('/') {
            "items" => Ok(Self::Items),
            "categories" => Ok(Self::Categories),
            "" => Err(CatalogError::invalid_request(format!(
                "resource URI has no item id: {}",
                uri
            ))),
            id if id.contains('/') => Err(CatalogError::invalid_request(format!(
                "unsupported resource URI: {}",
                uri
            ))),
            id => Ok(Self::Item(id.to_string())),
        }
    }
}

impl CatalogMcpServer {
    /// Static resources for `resources/list`.
    pub fn list_resources(&self) -> Vec<Value> {
        vec![
            json!({
                "uri": ITEMS_URI,
                "name": "Catalog items",
                "description": "Active service catalog items",
                "mimeType": "application/json"
            }),
            json!({
                "uri": CATEGORIES_URI,
                "name": "Catalog categories",
                "description": "Active service catalog categories",
                "mimeType": "application/json"
            }),
        ]
    }

    /// Parameterized resources for `resources/templates/list`.
    pub fn list_resource_templates(&self) -> Vec<Value> {
        vec![json!({
            "uriTemplate": ITEM_URI_TEMPLATE,
            "name": "Catalog item",
            "description": "A service catalog item with its variables",
            "mimeType": "application/json"
        })]
    }

    /// Read a `catalog://` resource as JSON.
    pub async fn read_resource(&self, uri: &str) -> CatalogResult<Value> {
        info!("Reading resource {}", uri);

        match CatalogResource::parse(uri)? {
            CatalogResource::Items => {
                let page = self
                    .service
                    .list_catalog_items(&ListCatalogItemsParams::default())
                    .await?;
                Ok(serde_json::to_value(page.records)?)
            }
            CatalogResource::Categories => {
                let page = self
                    .service
                    .list_catalog_categories(&ListCatalogCategoriesParams::default())
                    .await?;
                Ok(serde_json::to_value(page.records)?)
            }
            CatalogResource::Item(item_id) => {
                let item = self
                    .service
                    .get_catalog_item(&GetCatalogItemParams { item_id })
                    .await?;
                Ok(serde_json::to_value(item)?)
            }
        }
    }
}
