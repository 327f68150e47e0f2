//! Authenticated HTTP access to a ServiceNow instance.
//!
//! [`ServiceNowClient`] knows two API families:
//!
//! - the Table API (`/api/now/table/{table}`), used for `sc_category`,
//!   `sc_cat_item` and `sc_req_item` records
//! - the Service Catalog API (`/api/sn_sc/servicecatalog/items/{id}`), used
//!   for item details with variables and for ordering
//!
//! Both wrap their payload in a top-level `result` member, which
//! [`ServiceNowClient`] unwraps before handing data back.

use crate::config::{AuthConfig, ServerConfig};
use crate::error::{CatalogError, CatalogResult};
use log::{debug, warn};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use url::Url;

/// Query parameters sent with every read so references come back as
/// display strings instead of link objects.
pub const DISPLAY_PARAMS: [(&str, &str); 2] = [
    ("sysparm_display_value", "true"),
    ("sysparm_exclude_reference_link", "true"),
];

/// HTTP client bound to one ServiceNow instance.
#[derive(Debug, Clone)]
pub struct ServiceNowClient {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthConfig,
}

impl ServiceNowClient {
    /// Build a client from a validated configuration.
    pub fn new(config: &ServerConfig) -> CatalogResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.instance_url)?,
            auth: config.auth.clone(),
        })
    }

    /// Instance base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a Table API collection, or of one record when `sys_id` is given.
    pub fn table_url(&self, table: &str, sys_id: Option<&str>) -> CatalogResult<Url> {
        let mut segments = vec!["api", "now", "table", table];
        segments.extend(sys_id);
        self.url_with_segments(&segments)
    }

    /// URL of a Service Catalog item, optionally followed by an action
    /// segment such as `order_now`.
    pub fn catalog_item_url(&self, item_id: &str, action: Option<&str>) -> CatalogResult<Url> {
        let mut segments = vec!["api", "sn_sc", "servicecatalog", "items", item_id];
        segments.extend(action);
        self.url_with_segments(&segments)
    }

    fn url_with_segments(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::config("instance URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a URL and return its `result` member.
    pub async fn get(&self, url: Url, query: &[(&str, String)]) -> CatalogResult<Value> {
        let request = self.request(Method::GET, url).query(query);
        self.send(request).await
    }

    /// POST a JSON body and return the `result` member.
    pub async fn post(
        &self,
        url: Url,
        query: &[(&str, String)],
        body: &Value,
    ) -> CatalogResult<Value> {
        let request = self.request(Method::POST, url).query(query).json(body);
        self.send(request).await
    }

    /// PATCH a JSON body and return the `result` member.
    pub async fn patch(&self, url: Url, body: &Value) -> CatalogResult<Value> {
        let request = self.request(Method::PATCH, url).json(body);
        self.send(request).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.auth {
            AuthConfig::None => builder,
            AuthConfig::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            AuthConfig::Bearer { token } => builder.bearer_auth(token),
            AuthConfig::ApiKey { header, key } => builder.header(header.as_str(), key.as_str()),
        }
    }

    async fn send(&self, request: RequestBuilder) -> CatalogResult<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("ServiceNow request failed with status {}", status);
            return Err(CatalogError::status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        let mut payload: Value = serde_json::from_slice(&bytes)?;
        Ok(payload
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}
