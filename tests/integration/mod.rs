//! Integration tests against a mock ServiceNow instance.
//!
//! Each test starts its own [`wiremock::MockServer`], mounts the endpoints
//! the operation should hit, and checks both the tool result and the
//! requests the instance received.

pub mod categories;
pub mod requests;
pub mod resources;
pub mod stdio;
