//! MCP integration handlers
//!
//! This module contains the handler implementations for MCP tool execution,
//! organized by the catalog record they act on.

pub mod categories;
pub mod items;
pub mod requests;

pub use categories::*;
pub use items::*;
pub use requests::*;
