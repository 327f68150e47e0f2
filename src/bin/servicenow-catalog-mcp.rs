//! # ServiceNow Catalog MCP server
//!
//! Serves the service catalog tools over MCP on stdin/stdout. Every option
//! can also be set through its `SERVICENOW_*` environment variable.
//!
//! ```bash
//! SERVICENOW_INSTANCE_URL=https://dev12345.service-now.com \
//! SERVICENOW_USERNAME=admin SERVICENOW_PASSWORD=secret \
//!     servicenow-catalog-mcp
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` for request-level detail.

use clap::Parser;
use log::{error, info};
use servicenow_catalog_mcp::config::DEFAULT_API_KEY_HEADER;
use servicenow_catalog_mcp::{CatalogMcpServer, ServerConfig};

/// Command-line arguments for servicenow-catalog-mcp
#[derive(Parser)]
#[command(name = "servicenow-catalog-mcp")]
#[command(about = "MCP server for the ServiceNow service catalog")]
#[command(version)]
struct Args {
    /// Instance base URL, e.g. https://dev12345.service-now.com
    #[arg(long, env = "SERVICENOW_INSTANCE_URL")]
    instance_url: String,

    /// Basic auth username
    #[arg(long, env = "SERVICENOW_USERNAME")]
    username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "SERVICENOW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// OAuth bearer token
    #[arg(long, env = "SERVICENOW_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API key
    #[arg(long, env = "SERVICENOW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Header carrying the API key
    #[arg(long, env = "SERVICENOW_API_KEY_HEADER", default_value = DEFAULT_API_KEY_HEADER)]
    api_key_header: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "SERVICENOW_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

impl Args {
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "SERVICENOW_INSTANCE_URL" => Some(self.instance_url.clone()),
            "SERVICENOW_USERNAME" => self.username.clone(),
            "SERVICENOW_PASSWORD" => self.password.clone(),
            "SERVICENOW_TOKEN" => self.token.clone(),
            "SERVICENOW_API_KEY" => self.api_key.clone(),
            "SERVICENOW_API_KEY_HEADER" => Some(self.api_key_header.clone()),
            "SERVICENOW_TIMEOUT_SECS" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout carries the protocol, so logs must go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    let config = match ServerConfig::from_lookup(|key| args.lookup(key)) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Connecting to {} using {} authentication",
        config.instance_url,
        config.auth.kind()
    );

    let server = CatalogMcpServer::from_config(&config)?;
    server.run_stdio().await
}
