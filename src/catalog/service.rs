//! Catalog operations against a ServiceNow instance.
//!
//! [`CatalogService`] is the transport-agnostic core: one async method per
//! operation, typed parameters in, typed results out. The MCP layer wraps
//! these methods in tool handlers; library users can call them directly.

use super::models::{
    CatalogCategoryModel, CatalogItemDetailModel, CatalogItemModel, first_field,
};
use super::params::{
    CreateCatalogCategoryParams, GetCatalogItemParams, ListCatalogCategoriesParams,
    ListCatalogItemsParams, MoveCatalogItemsParams, SubmitCatalogRequestParams, ToolParams,
    UpdateCatalogCategoryParams, non_blank,
};
use super::query::EncodedQuery;
use crate::client::{DISPLAY_PARAMS, ServiceNowClient};
use crate::config::ServerConfig;
use crate::error::{CatalogError, CatalogResult};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const CATEGORY_TABLE: &str = "sc_category";
pub const ITEM_TABLE: &str = "sc_cat_item";
pub const REQUEST_ITEM_TABLE: &str = "sc_req_item";

/// One page of list results, echoing the requested window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage<T> {
    pub records: Vec<T>,
    pub limit: u32,
    pub offset: u32,
}

impl<T> CatalogPage<T> {
    /// Number of records on this page.
    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// A catalog item that could not be moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFailure {
    pub item_id: String,
    pub error: String,
}

/// Per-item outcome of [`CatalogService::move_catalog_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: Vec<String>,
    pub failed: Vec<MoveFailure>,
}

impl MoveOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.moved.is_empty() && !self.failed.is_empty()
    }
}

/// Record created by a catalog submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedRecord {
    pub record_id: Option<String>,
    pub record_number: Option<String>,
    /// Table of the returned record when known (`sc_req_item`, `sc_request`, ...)
    pub table: Option<String>,
}

impl SubmittedRecord {
    /// Number if known, else sys_id, for human-readable messages.
    pub fn reference(&self) -> &str {
        self.record_number
            .as_deref()
            .or(self.record_id.as_deref())
            .unwrap_or("unknown")
    }
}

fn some_if_present(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Service Catalog operations bound to one instance.
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: ServiceNowClient,
}

impl CatalogService {
    pub fn new(client: ServiceNowClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client from configuration and wrap it.
    pub fn from_config(config: &ServerConfig) -> CatalogResult<Self> {
        Ok(Self::new(ServiceNowClient::new(config)?))
    }

    pub fn client(&self) -> &ServiceNowClient {
        &self.client
    }

    fn list_query(limit: u32, offset: u32, filter: &EncodedQuery) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("sysparm_limit", limit.to_string()),
            ("sysparm_offset", offset.to_string()),
        ];
        query.extend(DISPLAY_PARAMS.iter().map(|(k, v)| (*k, v.to_string())));
        if let Some(encoded) = filter.build() {
            query.push(("sysparm_query", encoded));
        }
        query
    }

    fn rows<T>(result: &Value, map: impl Fn(&Value) -> T) -> Vec<T> {
        result
            .as_array()
            .map(|rows| rows.iter().map(map).collect())
            .unwrap_or_default()
    }

    /// List service catalog categories.
    pub async fn list_catalog_categories(
        &self,
        params: &ListCatalogCategoriesParams,
    ) -> CatalogResult<CatalogPage<CatalogCategoryModel>> {
        params.validate()?;
        info!("Listing service catalog categories");

        let filter = EncodedQuery::new()
            .active_only(params.active)
            .like_any(&["title", "description"], non_blank(&params.query));
        let url = self.client.table_url(CATEGORY_TABLE, None)?;
        let result = self
            .client
            .get(url, &Self::list_query(params.limit, params.offset, &filter))
            .await?;

        let records = Self::rows(&result, CatalogCategoryModel::from_record);
        debug!("Retrieved {} catalog categories", records.len());
        Ok(CatalogPage {
            records,
            limit: params.limit,
            offset: params.offset,
        })
    }

    /// Create a new service catalog category.
    pub async fn create_catalog_category(
        &self,
        params: &CreateCatalogCategoryParams,
    ) -> CatalogResult<CatalogCategoryModel> {
        params.validate()?;
        info!("Creating service catalog category '{}'", params.title);

        let url = self.client.table_url(CATEGORY_TABLE, None)?;
        let result = self.client.post(url, &[], &params.to_record()).await?;
        Ok(CatalogCategoryModel::from_record(&result))
    }

    /// Update an existing service catalog category.
    pub async fn update_catalog_category(
        &self,
        params: &UpdateCatalogCategoryParams,
    ) -> CatalogResult<CatalogCategoryModel> {
        params.validate()?;
        info!("Updating service catalog category {}", params.category_id);

        let url = self
            .client
            .table_url(CATEGORY_TABLE, Some(params.category_id.as_str()))?;
        let result = self.client.patch(url, &params.to_record()).await?;
        Ok(CatalogCategoryModel::from_record(&result))
    }

    /// Move catalog items into another category, one PATCH per item.
    ///
    /// Individual failures are collected rather than aborting the batch.
    pub async fn move_catalog_items(
        &self,
        params: &MoveCatalogItemsParams,
    ) -> CatalogResult<MoveOutcome> {
        params.validate()?;
        info!(
            "Moving {} catalog items to category {}",
            params.item_ids.len(),
            params.target_category_id
        );

        let body = json!({"category": params.target_category_id});
        let mut outcome = MoveOutcome::default();

        for item_id in &params.item_ids {
            let result = match self.client.table_url(ITEM_TABLE, Some(item_id.as_str())) {
                Ok(url) => self.client.patch(url, &body).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => outcome.moved.push(item_id.clone()),
                Err(e) => {
                    error!("Error moving catalog item {}: {}", item_id, e);
                    outcome.failed.push(MoveFailure {
                        item_id: item_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// List service catalog items.
    pub async fn list_catalog_items(
        &self,
        params: &ListCatalogItemsParams,
    ) -> CatalogResult<CatalogPage<CatalogItemModel>> {
        params.validate()?;
        info!("Listing service catalog items");

        let filter = EncodedQuery::new()
            .active_only(params.active)
            .equals_opt("category", non_blank(&params.category))
            .like_any(&["short_description", "name"], non_blank(&params.query));
        let url = self.client.table_url(ITEM_TABLE, None)?;
        let result = self
            .client
            .get(url, &Self::list_query(params.limit, params.offset, &filter))
            .await?;

        let records = Self::rows(&result, CatalogItemModel::from_record);
        debug!("Retrieved {} catalog items", records.len());
        Ok(CatalogPage {
            records,
            limit: params.limit,
            offset: params.offset,
        })
    }

    /// Fetch one catalog item with its variables.
    pub async fn get_catalog_item(
        &self,
        params: &GetCatalogItemParams,
    ) -> CatalogResult<CatalogItemDetailModel> {
        params.validate()?;
        info!("Getting service catalog item {}", params.item_id);

        let url = self.client.catalog_item_url(&params.item_id, None)?;
        let query: Vec<(&str, String)> = DISPLAY_PARAMS
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();
        let result = self.client.get(url, &query).await?;

        let is_empty = match &result {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(rows) => rows.is_empty(),
            _ => false,
        };
        if is_empty {
            warn!("Catalog item not found: {}", params.item_id);
            return Err(CatalogError::not_found("Catalog item", &params.item_id));
        }

        Ok(CatalogItemDetailModel::from_record(&result))
    }

    /// Order a catalog item or submit a record producer.
    ///
    /// When the submission creates a request (`sc_request`), the first
    /// requested item beneath it is returned instead, since that is the
    /// record fulfilment works on. If the request has no items the request
    /// itself is returned.
    pub async fn submit_catalog_request(
        &self,
        params: &SubmitCatalogRequestParams,
    ) -> CatalogResult<SubmittedRecord> {
        params.validate()?;
        info!(
            "Submitting catalog request for {:?} {}",
            params.item_type, params.item_id
        );

        let url = self
            .client
            .catalog_item_url(&params.item_id, Some(params.item_type.action()))?;
        let result = self.client.post(url, &[], &params.to_body()).await?;

        let created_table = first_field(&result, &["table", "record"]);
        if created_table != "sc_request" {
            return Ok(SubmittedRecord {
                record_id: some_if_present(first_field(&result, &["sys_id"])),
                record_number: some_if_present(first_field(&result, &["number", "request_number"])),
                table: some_if_present(created_table),
            });
        }

        let request_id = first_field(&result, &["sys_id", "request_id"]);
        if request_id.is_empty() {
            return Err(CatalogError::not_found(
                "Created request for catalog item",
                &params.item_id,
            ));
        }

        let url = self.client.table_url(REQUEST_ITEM_TABLE, None)?;
        let query = [
            ("sysparm_query", format!("request={}", request_id)),
            ("sysparm_fields", "sys_id,number".to_string()),
            ("sysparm_limit", "1".to_string()),
            ("sysparm_display_value", "true".to_string()),
        ];
        let items = self.client.get(url, &query).await?;

        match items.as_array().and_then(|rows| rows.first()) {
            Some(item) => Ok(SubmittedRecord {
                record_id: some_if_present(first_field(item, &["sys_id"])),
                record_number: some_if_present(first_field(item, &["number"])),
                table: Some(REQUEST_ITEM_TABLE.to_string()),
            }),
            None => Ok(SubmittedRecord {
                record_id: Some(request_id),
                record_number: some_if_present(first_field(&result, &["request_number", "number"])),
                table: Some("sc_request".to_string()),
            }),
        }
    }
}
