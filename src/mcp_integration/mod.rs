//! MCP (Model Context Protocol) integration for the ServiceNow service catalog
//!
//! This module exposes the catalog operations as MCP tools and resources so
//! AI agents can browse categories and items, inspect item variables, reorganize
//! the catalog and place requests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   AI Agent      │───▶│  MCP Protocol    │───▶│  ServiceNow     │
//! │   (Client)      │    │  (This Module)   │    │  Instance       │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!          │                        │                       │
//!          ▼                        ▼                       ▼
//!    Tool Discovery          Tool Execution           Table API
//!    Resource Reads          JSON Validation          Catalog API
//! ```
//!
//! ## Module Structure
//!
//! - `core` - Core types (McpServerInfo, CatalogToolResult, CatalogMcpServer)
//! - `protocol` - Tool discovery and dispatch
//! - `resources` - `catalog://` resources
//! - `stdio` - JSON-RPC 2.0 framing over stdin/stdout
//! - `tools/` - JSON schema definitions for MCP tool discovery
//! - `handlers/` - Tool execution handlers
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use servicenow_catalog_mcp::{CatalogMcpServer, ServerConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let mcp_server = CatalogMcpServer::from_config(&config)?;
//!
//!     let result = mcp_server
//!         .execute_tool("list_catalog_items", json!({"query": "laptop", "limit": 5}))
//!         .await;
//!
//!     if result.success {
//!         println!("{}", result.content["message"]);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod handlers;
pub mod protocol;
pub mod resources;
pub mod stdio;
pub mod tools;


pub use core::{CatalogMcpServer, CatalogToolResult, McpServerInfo};
pub use resources::CatalogResource;
pub use stdio::McpResponse;
