//! Error types for ServiceNow catalog operations.
//!
//! Every failure a tool call can hit is one of the [`CatalogError`] variants.
//! Tool handlers translate these into structured results with a stable
//! `error_code`, so AI agents can branch on the code rather than the text.

/// Longest response body kept in a [`CatalogError::Status`] error.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Main error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport-level failures (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// ServiceNow answered with a non-success status
    #[error("ServiceNow returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed instance or resource URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid tool parameters
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Record not found on the instance
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },

    /// Missing or inconsistent server configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CatalogError {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a status error, truncating oversized response bodies.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > MAX_ERROR_BODY_LEN {
            let mut cut = MAX_ERROR_BODY_LEN;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
            body.push_str("...");
        }
        Self::Status { status, body }
    }

    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> String {
        match self {
            Self::Http(_) => "HTTP_ERROR".to_string(),
            Self::Status { status, .. } => format!("HTTP_STATUS_{}", status),
            Self::Json(_) => "JSON_ERROR".to_string(),
            Self::Url(_) => "URL_ERROR".to_string(),
            Self::InvalidRequest { .. } => "INVALID_REQUEST".to_string(),
            Self::NotFound { .. } => "NOT_FOUND".to_string(),
            Self::Config { .. } => "CONFIG_ERROR".to_string(),
        }
    }

    /// Whether the caller supplied bad input, as opposed to a remote failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. } | Self::NotFound { .. })
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
