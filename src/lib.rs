//! ServiceNow Service Catalog tools for AI agents.
//!
//! Wraps the ServiceNow Table API and Service Catalog API behind typed catalog
//! operations and exposes them over the Model Context Protocol.
//!
//! # Core Components
//!
//! - [`CatalogService`] - One async method per catalog operation
//! - [`CatalogMcpServer`] - MCP tools and resources over [`CatalogService`]
//! - [`ServerConfig`] - Instance URL, credentials and timeouts
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use servicenow_catalog_mcp::{AuthConfig, CatalogService, ServerConfig};
//! use servicenow_catalog_mcp::catalog::ListCatalogCategoriesParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::new("https://dev12345.service-now.com").with_auth(
//!     AuthConfig::Basic {
//!         username: "admin".to_string(),
//!         password: "secret".to_string(),
//!     },
//! );
//! let service = CatalogService::from_config(&config)?;
//! let page = service
//!     .list_catalog_categories(&ListCatalogCategoriesParams::default())
//!     .await?;
//! println!("{} categories", page.total());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
/// Model Context Protocol integration for AI agents.
pub mod mcp_integration;

pub use catalog::CatalogService;
pub use client::ServiceNowClient;
pub use config::{AuthConfig, ServerConfig};
pub use error::{CatalogError, CatalogResult};
pub use mcp_integration::{CatalogMcpServer, CatalogToolResult, McpServerInfo};
