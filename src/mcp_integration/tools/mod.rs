//! MCP tool schema definitions
//!
//! This module contains the JSON schema definitions for MCP tools that
//! AI agents can discover and execute.
//!
//! Tool schemas are organized by functional area:
//! - [`category_schemas`] - Category listing, creation and update
//! - [`item_schemas`] - Catalog item listing, retrieval and moves
//! - [`request_schemas`] - Catalog request submission
//!
//! Each schema defines the tool name, a description, and a JSON Schema for
//! the accepted arguments. Argument defaults shown in the schemas are the
//! ones applied by [`crate::catalog::params`].

pub mod category_schemas;
pub mod item_schemas;
pub mod request_schemas;

pub use category_schemas::*;
pub use item_schemas::*;
pub use request_schemas::*;
