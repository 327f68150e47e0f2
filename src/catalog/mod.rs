//! Service Catalog domain: parameters, queries, models and operations.
//!
//! - [`params`] - typed tool parameters with defaults and validation
//! - [`query`] - encoded query (`sysparm_query`) builder
//! - [`models`] - normalized category, item and variable records
//! - [`service`] - [`CatalogService`], one method per catalog operation

pub mod models;
pub mod params;
pub mod query;
pub mod service;

pub use models::{
    CatalogCategoryModel, CatalogItemDetailModel, CatalogItemModel, CatalogItemVariableModel,
    ChoiceModel, ColumnModel, VariableType, normalize_variables,
};
pub use params::{
    CreateCatalogCategoryParams, GetCatalogItemParams, ItemType, ListCatalogCategoriesParams,
    ListCatalogItemsParams, MoveCatalogItemsParams, SubmitCatalogRequestParams, ToolParams,
    UpdateCatalogCategoryParams, parse_params,
};
pub use query::EncodedQuery;
pub use service::{CatalogPage, CatalogService, MoveFailure, MoveOutcome, SubmittedRecord};
