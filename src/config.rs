//! Connection settings for a ServiceNow instance.
//!
//! [`ServerConfig`] names the instance and how to authenticate against it.
//! Credentials are static: a username/password pair, a pre-issued bearer
//! token, or an API key header. Acquiring or refreshing tokens is left to
//! whatever launches the server.

use crate::error::{CatalogError, CatalogResult};
use std::fmt;
use std::time::Duration;

/// Default header ServiceNow reads API keys from.
pub const DEFAULT_API_KEY_HEADER: &str = "x-sn-apikey";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests to the instance are authenticated.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthConfig {
    /// No credentials (useful against mock instances)
    #[default]
    None,
    /// HTTP basic authentication
    Basic { username: String, password: String },
    /// Pre-issued OAuth access token sent as `Authorization: Bearer`
    Bearer { token: String },
    /// API key sent in a custom header
    ApiKey { header: String, key: String },
}

// Hand-written so secrets never reach logs through `{:?}`.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            Self::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("key", &"***")
                .finish(),
        }
    }
}

impl AuthConfig {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "api_key",
        }
    }
}

/// Configuration for talking to a ServiceNow instance.
///
/// # Examples
///
/// ```rust
/// use servicenow_catalog_mcp::config::{AuthConfig, ServerConfig};
///
/// let config = ServerConfig::new("https://dev12345.service-now.com/")
///     .with_auth(AuthConfig::Basic {
///         username: "admin".to_string(),
///         password: "secret".to_string(),
///     });
/// assert_eq!(config.instance_url, "https://dev12345.service-now.com");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Instance base URL without a trailing slash, e.g. `https://dev12345.service-now.com`
    pub instance_url: String,
    /// Credentials attached to every request
    pub auth: AuthConfig,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            instance_url: "https://localhost".to_string(),
            auth: AuthConfig::None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServerConfig {
    /// Create a configuration for the given instance with default settings.
    pub fn new(instance_url: impl Into<String>) -> Self {
        Self {
            instance_url: normalize_instance_url(instance_url.into()),
            ..Self::default()
        }
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `SERVICENOW_*` environment variables.
    ///
    /// See [`ServerConfig::from_lookup`] for the variables read.
    pub fn from_env() -> CatalogResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Reads `SERVICENOW_INSTANCE_URL` (required), then the first complete
    /// credential set among `SERVICENOW_USERNAME`/`SERVICENOW_PASSWORD`,
    /// `SERVICENOW_TOKEN`, and `SERVICENOW_API_KEY` (header overridable via
    /// `SERVICENOW_API_KEY_HEADER`), and `SERVICENOW_TIMEOUT_SECS`.
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let instance_url = get("SERVICENOW_INSTANCE_URL")
            .ok_or_else(|| CatalogError::config("SERVICENOW_INSTANCE_URL is not set"))?;

        let auth = match (
            get("SERVICENOW_USERNAME"),
            get("SERVICENOW_PASSWORD"),
            get("SERVICENOW_TOKEN"),
            get("SERVICENOW_API_KEY"),
        ) {
            (Some(username), Some(password), _, _) => AuthConfig::Basic { username, password },
            (Some(_), None, _, _) => {
                return Err(CatalogError::config(
                    "SERVICENOW_USERNAME is set but SERVICENOW_PASSWORD is not",
                ));
            }
            (_, _, Some(token), _) => AuthConfig::Bearer { token },
            (_, _, None, Some(key)) => AuthConfig::ApiKey {
                header: get("SERVICENOW_API_KEY_HEADER")
                    .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string()),
                key,
            },
            _ => AuthConfig::None,
        };

        let mut config = Self::new(instance_url).with_auth(auth);
        if let Some(secs) = get("SERVICENOW_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CatalogError::config(format!("SERVICENOW_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> CatalogResult<()> {
        let parsed = url::Url::parse(&self.instance_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::config(format!(
                "instance URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(CatalogError::config("instance URL has no host"));
        }
        if self.timeout.is_zero() {
            return Err(CatalogError::config("timeout must be greater than zero"));
        }

        match &self.auth {
            AuthConfig::Basic { username, .. } if username.is_empty() => {
                Err(CatalogError::config("basic auth username is empty"))
            }
            AuthConfig::Bearer { token } if token.is_empty() => {
                Err(CatalogError::config("bearer token is empty"))
            }
            AuthConfig::ApiKey { header, key } if header.is_empty() || key.is_empty() => {
                Err(CatalogError::config("API key header and value are required"))
            }
            _ => Ok(()),
        }
    }
}

fn normalize_instance_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
