//! Core MCP integration infrastructure
//!
//! This module contains the foundational types and constructors for MCP integration.
//! It provides the basic building blocks that other MCP modules depend on.

use crate::catalog::CatalogService;
use crate::config::ServerConfig;
use crate::error::{CatalogError, CatalogResult};
use chrono::Utc;
use log::warn;
use serde_json::{Value, json};
use uuid::Uuid;

/// Information about the MCP server for AI agent discovery
///
/// Reported to clients in the `initialize` handshake.
///
/// # Examples
///
/// ```rust
/// use servicenow_catalog_mcp::mcp_integration::McpServerInfo;
///
/// let server_info = McpServerInfo {
///     name: "Acme Catalog".to_string(),
///     version: "1.0.0".to_string(),
///     description: "Service catalog tools for the Acme instance".to_string(),
/// };
/// assert_eq!(server_info.name, "Acme Catalog");
/// ```
#[derive(Debug, Clone)]
pub struct McpServerInfo {
    /// Human-readable name of the server
    pub name: String,
    /// Version string for the server implementation
    pub version: String,
    /// Description sent to clients as usage instructions
    pub description: String,
}

impl Default for McpServerInfo {
    fn default() -> Self {
        Self {
            name: "ServiceNow Catalog".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Browse and manage the ServiceNow service catalog: categories, \
                          items, item variables and catalog requests"
                .to_string(),
        }
    }
}

/// Tool execution result for MCP clients
///
/// `content` always carries a `success` flag and a human-readable `message`;
/// failures add `error` and `error_code`. `metadata` identifies the call.
///
/// # Examples
///
/// ```rust
/// use servicenow_catalog_mcp::mcp_integration::CatalogToolResult;
/// use serde_json::json;
///
/// let result = CatalogToolResult::success(
///     "get_catalog_item",
///     json!({"success": true, "message": "Retrieved catalog item: Laptop"}),
/// );
/// assert!(result.success);
/// assert_eq!(result.metadata.unwrap()["operation"], "get_catalog_item");
/// ```
#[derive(Debug, Clone)]
pub struct CatalogToolResult {
    /// Whether the tool execution was successful
    pub success: bool,
    /// The main result content
    pub content: Value,
    /// Operation name, request id and timestamp, plus per-tool extras
    pub metadata: Option<Value>,
}

impl CatalogToolResult {
    pub fn new(operation: &str, success: bool, content: Value) -> Self {
        Self {
            success,
            content,
            metadata: Some(operation_metadata(operation)),
        }
    }

    pub fn success(operation: &str, content: Value) -> Self {
        Self::new(operation, true, content)
    }

    /// Failed result for `error`, with `message` as `"{context}: {error}"`.
    pub fn failure(operation: &str, context: &str, error: &CatalogError) -> Self {
        warn!("{} failed: {}", operation, error);
        Self {
            success: false,
            content: json!({
                "success": false,
                "message": format!("{}: {}", context, error),
                "error": error.to_string(),
                "error_code": error.error_code(),
            }),
            metadata: Some(operation_metadata(operation)),
        }
    }

    /// Add a key to the content object.
    pub fn with_content(mut self, key: &str, value: Value) -> Self {
        if let Some(content) = self.content.as_object_mut() {
            content.insert(key.to_string(), value);
        }
        self
    }

    /// Add an operation-specific metadata key.
    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        if let Some(metadata) = self.metadata.as_mut().and_then(Value::as_object_mut) {
            metadata.insert(key.to_string(), value);
        }
        self
    }
}

fn operation_metadata(operation: &str) -> Value {
    json!({
        "operation": operation,
        "request_id": Uuid::new_v4().to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    })
}

/// MCP server wrapper for catalog operations
///
/// This is the main entry point for MCP integration. It wraps a
/// [`CatalogService`] and exposes its operations as MCP tools and resources.
///
/// # Examples
///
/// ```rust,no_run
/// use servicenow_catalog_mcp::{CatalogMcpServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let config = ServerConfig::from_env()?;
///     let mcp_server = CatalogMcpServer::from_config(&config)?;
///
///     println!("Available tools: {}", mcp_server.get_tools().len());
///     mcp_server.run_stdio().await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogMcpServer {
    pub(crate) service: CatalogService,
    pub(crate) server_info: McpServerInfo,
}

impl CatalogMcpServer {
    /// Create a new MCP server with default server information
    pub fn new(service: CatalogService) -> Self {
        Self {
            service,
            server_info: McpServerInfo::default(),
        }
    }

    /// Create a new MCP server with custom server information
    pub fn with_info(service: CatalogService, server_info: McpServerInfo) -> Self {
        Self {
            service,
            server_info,
        }
    }

    /// Build the server, and its HTTP client, from `config`.
    pub fn from_config(config: &ServerConfig) -> CatalogResult<Self> {
        Ok(Self::new(CatalogService::from_config(config)?))
    }

    pub fn server_info(&self) -> &McpServerInfo {
        &self.server_info
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }
}
