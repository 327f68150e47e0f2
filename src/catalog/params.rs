//! Typed parameter objects for the catalog tools.
//!
//! Tool arguments arrive as loose JSON. [`parse_params`] deserializes them
//! into one of the structs below, filling in defaults, and then runs the
//! struct's [`ToolParams::validate`] check so handlers only ever see
//! well-formed input.

use crate::error::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_true() -> bool {
    true
}

/// Behaviour shared by all tool parameter objects.
pub trait ToolParams: DeserializeOwned {
    /// Check constraints serde cannot express.
    fn validate(&self) -> CatalogResult<()> {
        Ok(())
    }
}

/// Deserialize and validate tool arguments.
///
/// `null` arguments are treated as an empty object so tools whose
/// parameters are all optional can be called without any.
pub fn parse_params<T: ToolParams>(arguments: Value) -> CatalogResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    let params: T = serde_json::from_value(arguments)
        .map_err(|e| CatalogError::invalid_request(format!("invalid parameters: {}", e)))?;
    params.validate()?;
    Ok(params)
}

fn require_non_blank(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        Err(CatalogError::invalid_request(format!(
            "{} must not be empty",
            field
        )))
    } else {
        Ok(())
    }
}

/// Treat `Some("")` like `None` for optional filters.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parameters for `list_catalog_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCatalogItemsParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    /// Category sys_id to filter by
    #[serde(default)]
    pub category: Option<String>,
    /// Text matched against name and short description
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Default for ListCatalogItemsParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            category: None,
            query: None,
            active: true,
        }
    }
}

impl ToolParams for ListCatalogItemsParams {}

/// Parameters for `get_catalog_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCatalogItemParams {
    /// Catalog item sys_id
    pub item_id: String,
}

impl ToolParams for GetCatalogItemParams {
    fn validate(&self) -> CatalogResult<()> {
        require_non_blank("item_id", &self.item_id)
    }
}

/// Parameters for `list_catalog_categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCatalogCategoriesParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    /// Text matched against title and description
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Default for ListCatalogCategoriesParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            query: None,
            active: true,
        }
    }
}

impl ToolParams for ListCatalogCategoriesParams {}

/// Parameters for `create_catalog_category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCatalogCategoryParams {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Parent category sys_id
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: Option<i64>,
}

impl ToolParams for CreateCatalogCategoryParams {
    fn validate(&self) -> CatalogResult<()> {
        require_non_blank("title", &self.title)
    }
}

impl CreateCatalogCategoryParams {
    /// Record body for the Table API insert.
    pub fn to_record(&self) -> Value {
        let mut body = Map::new();
        body.insert("title".to_string(), Value::String(self.title.clone()));
        insert_category_fields(
            &mut body,
            self.description.as_ref(),
            self.parent.as_ref(),
            self.icon.as_ref(),
            Some(self.active),
            self.order,
        );
        Value::Object(body)
    }
}

/// Parameters for `update_catalog_category`. Only supplied fields change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCatalogCategoryParams {
    /// Category sys_id
    pub category_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl ToolParams for UpdateCatalogCategoryParams {
    fn validate(&self) -> CatalogResult<()> {
        require_non_blank("category_id", &self.category_id)?;
        if let Some(title) = &self.title {
            require_non_blank("title", title)?;
        }
        if self.to_record().as_object().is_some_and(Map::is_empty) {
            return Err(CatalogError::invalid_request(
                "no fields to update were provided",
            ));
        }
        Ok(())
    }
}

impl UpdateCatalogCategoryParams {
    /// Record body for the Table API patch, containing only supplied fields.
    pub fn to_record(&self) -> Value {
        let mut body = Map::new();
        if let Some(title) = &self.title {
            body.insert("title".to_string(), Value::String(title.clone()));
        }
        insert_category_fields(
            &mut body,
            self.description.as_ref(),
            self.parent.as_ref(),
            self.icon.as_ref(),
            self.active,
            self.order,
        );
        Value::Object(body)
    }
}

// ServiceNow's Table API expects booleans and integers as strings.
fn insert_category_fields(
    body: &mut Map<String, Value>,
    description: Option<&String>,
    parent: Option<&String>,
    icon: Option<&String>,
    active: Option<bool>,
    order: Option<i64>,
) {
    if let Some(description) = description {
        body.insert("description".to_string(), Value::String(description.clone()));
    }
    if let Some(parent) = parent {
        body.insert("parent".to_string(), Value::String(parent.clone()));
    }
    if let Some(icon) = icon {
        body.insert("icon".to_string(), Value::String(icon.clone()));
    }
    if let Some(active) = active {
        body.insert("active".to_string(), Value::String(active.to_string()));
    }
    if let Some(order) = order {
        body.insert("order".to_string(), Value::String(order.to_string()));
    }
}

/// Parameters for `move_catalog_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCatalogItemsParams {
    /// Catalog item sys_ids to move
    pub item_ids: Vec<String>,
    /// Destination category sys_id
    pub target_category_id: String,
}

impl ToolParams for MoveCatalogItemsParams {
    fn validate(&self) -> CatalogResult<()> {
        require_non_blank("target_category_id", &self.target_category_id)?;
        if self.item_ids.is_empty() {
            return Err(CatalogError::invalid_request("item_ids must not be empty"));
        }
        for item_id in &self.item_ids {
            require_non_blank("item_ids entry", item_id)?;
        }
        Ok(())
    }
}

/// What kind of catalog entry is being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Regular catalog item, ordered through `order_now`
    #[default]
    Item,
    /// Record producer, submitted through `submit_producer`
    Producer,
}

impl ItemType {
    /// Service Catalog API action segment for this item type.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Item => "order_now",
            Self::Producer => "submit_producer",
        }
    }
}

/// Parameters for `submit_catalog_request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitCatalogRequestParams {
    /// Catalog item or record producer sys_id
    pub item_id: String,
    /// Variable values keyed by variable name
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
    #[serde(default)]
    pub item_type: ItemType,
    /// Quantity to order (catalog items only)
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl ToolParams for SubmitCatalogRequestParams {
    fn validate(&self) -> CatalogResult<()> {
        require_non_blank("item_id", &self.item_id)?;
        match (self.item_type, self.quantity) {
            (_, Some(0)) => Err(CatalogError::invalid_request(
                "quantity must be at least 1",
            )),
            (ItemType::Producer, Some(_)) => Err(CatalogError::invalid_request(
                "quantity is not supported for record producers",
            )),
            _ => Ok(()),
        }
    }
}

impl SubmitCatalogRequestParams {
    /// Request body for the Service Catalog API.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(variables) = &self.variables {
            body.insert("variables".to_string(), Value::Object(variables.clone()));
        }
        if let Some(quantity) = self.quantity {
            body.insert(
                "sysparm_quantity".to_string(),
                Value::String(quantity.to_string()),
            );
        }
        Value::Object(body)
    }
}
