//! TFE HTTP client for API interactions

use std::time::Duration;

use log::debug;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::{api, lock};
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::context::RequestContext;
use crate::hcp::pagination::{self, Page};
use crate::hcp::traits::{ApiListResponse, PaginatedResponse};
use crate::hcp::transport::{open_client, LogCloser, RawResponse, Transport};
use crate::settings::{self, Config};

/// TFE API client
///
/// Owns the transport (and the HTTP log behind it) plus the request context
/// every call is raced against.
pub struct TfeClient {
    transport: Transport,
    token: String,
    host: String,
    organization: Option<String>,
    ctx: RequestContext,
    /// Custom base URL override (for testing with mock servers)
    base_url_override: Option<String>,
    log: LogCloser,
}

impl TfeClient {
    /// Build a client from resolved settings
    pub fn new(config: &Config, ctx: RequestContext) -> Result<Self> {
        let (transport, log) =
            open_client(&config.hostname, &config.token, config.http_log.as_deref())?;
        debug!(
            host = config.hostname.as_str(),
            http_log = log.is_active();
            "client ready"
        );

        Ok(Self {
            transport,
            token: config.token.clone(),
            host: config.hostname.clone(),
            organization: config.organization.clone(),
            ctx,
            base_url_override: None,
            log,
        })
    }

    /// Hostname requests are sent to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Default organization, if configured
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref().filter(|o| !o.is_empty())
    }

    /// Organization, or a config error
    pub fn require_organization(&self) -> Result<&str> {
        settings::require_organization(self.organization.as_deref())
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Flush and close the HTTP log, if any
    pub fn close(self) -> Result<()> {
        let TfeClient { log, .. } = self;
        log.close()
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        if let Some(ref url) = self.base_url_override {
            return url.clone();
        }
        format!(
            "https://{}/{}",
            self.host,
            api::BASE_PATH.trim_start_matches('/')
        )
    }

    /// Absolute URL for an API path (`/workspaces/ws-1`)
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Request builder with auth and JSON:API headers
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.transport
            .http()
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", api::MEDIA_TYPE)
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Attach a JSON:API body
    fn with_body(builder: RequestBuilder, body: &serde_json::Value) -> Result<RequestBuilder> {
        Ok(builder
            .header("Content-Type", api::MEDIA_TYPE)
            .body(serde_json::to_vec(body)?))
    }

    /// Send a request through the transport under the request context
    ///
    /// Non-success responses become typed errors carrying the API's message.
    pub(crate) async fn send(&self, builder: RequestBuilder, what: &str) -> Result<RawResponse> {
        self.send_in(&self.ctx, builder, what).await
    }

    async fn send_in(
        &self,
        ctx: &RequestContext,
        builder: RequestBuilder,
        what: &str,
    ) -> Result<RawResponse> {
        let request = builder.build()?;
        debug!(
            method = request.method().as_str(),
            url = request.url().as_str();
            "sending request"
        );

        let response = ctx.run(self.transport.round_trip(request)).await?;

        if !response.is_success() {
            let status = response.status.as_u16();
            let message = response.error_detail().unwrap_or_else(|| {
                format!(
                    "failed to {} ({})",
                    what,
                    response.status.canonical_reason().unwrap_or("unknown status")
                )
            });
            debug!(status = status; "request failed: {}", message);
            return Err(TfeError::from_status(status, message));
        }

        Ok(response)
    }

    /// GET an API path and decode the body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let response = self.send(self.get(&self.url(path)), what).await?;
        response.json()
    }

    /// Fetch a single resource by API path
    ///
    /// Returns the typed `data` member plus the raw document, or `None` on 404.
    pub async fn fetch_resource_by_path<T>(
        &self,
        path: &str,
        resource_label: &str,
    ) -> Result<Option<(T, serde_json::Value)>>
    where
        T: DeserializeOwned,
    {
        debug!("Fetching {} from: {}", resource_label, path);
        let what = format!("read {}", resource_label);
        match self.get_json::<serde_json::Value>(path, &what).await {
            Ok(raw) => {
                let item: T = serde_json::from_value(raw["data"].clone()).map_err(|e| {
                    TfeError::Json(format!("failed to parse {}: {}", resource_label, e))
                })?;
                Ok(Some((item, raw)))
            }
            Err(e) if e.kind() == crate::error::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Send a JSON:API body and decode the response document
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
        what: &str,
    ) -> Result<T> {
        let builder = Self::with_body(self.request(method, &self.url(path)), body)?;
        self.send(builder, what).await?.json()
    }

    /// Like `send_json`, but outside the invocation's cancellation and deadline
    ///
    /// Only for compensating calls (lock release) that must go out even after
    /// Ctrl-C or `--timeout`; bounded by `lock::RELEASE_GRACE_SECS`.
    pub(crate) async fn send_json_detached<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
        what: &str,
    ) -> Result<T> {
        let ctx = self
            .ctx
            .detached(Duration::from_secs(lock::RELEASE_GRACE_SECS));
        let builder = Self::with_body(self.request(method, &self.url(path)), body)?;
        self.send_in(&ctx, builder, what).await?.json()
    }

    /// Send a request whose response body is ignored
    pub(crate) async fn send_no_content(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        what: &str,
    ) -> Result<()> {
        let mut builder = self.request(method, &self.url(path));
        if let Some(body) = body {
            builder = Self::with_body(builder, body)?;
        }
        self.send(builder, what).await?;
        Ok(())
    }

    /// PUT raw bytes to a pre-signed upload URL (no credentials attached)
    pub(crate) async fn upload(&self, url: &str, bytes: Vec<u8>, what: &str) -> Result<()> {
        let builder = self
            .transport
            .http()
            .put(url)
            .header("Content-Type", "application/octet-stream")
            .body(bytes);
        self.send(builder, what).await?;
        Ok(())
    }

    /// Download raw bytes; API paths carry credentials, absolute URLs do not
    pub(crate) async fn download(&self, path_or_url: &str, what: &str) -> Result<Vec<u8>> {
        let builder = if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            self.transport.http().get(path_or_url)
        } else {
            self.request(Method::GET, &self.url(path_or_url))
        };
        Ok(self.send(builder, what).await?.body)
    }

    /// Fetch one page of a list endpoint
    pub(crate) async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page_number: u32,
    ) -> Result<ApiListResponse<T>> {
        let separator = if path.contains('?') { "&" } else { "?" };
        let url = format!(
            "{}{}{}page[number]={}&page[size]={}",
            self.base_url(),
            path,
            separator,
            page_number,
            api::DEFAULT_PAGE_SIZE,
        );
        debug!("Fetching page {} from: {}", page_number, url);

        self.send(self.get(&url), "list resources").await?.json()
    }

    /// Fetch all pages from a paginated API endpoint, sequentially
    ///
    /// # Arguments
    /// * `path` - API path (e.g., "/organizations/my-org/projects?search[name]=foo")
    /// * `error_context` - What is listed, for error annotations (e.g., "projects for organization 'my-org'")
    pub async fn fetch_all_pages<T>(&self, path: &str, error_context: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let items = pagination::fetch_all(&self.ctx, move |n| async move {
            Ok::<Page<T>, TfeError>(self.list_page::<T>(path, n).await?.into_page())
        })
        .await
        .with_context(|| format!("failed to list {}", error_context))?;

        debug!("Fetched {} total items for {}", items.len(), error_context);
        Ok(items)
    }

    /// Fetch pages until `max_items` are collected; the overshoot of the
    /// last page is dropped
    pub async fn fetch_pages_bounded<T>(
        &self,
        path: &str,
        max_items: usize,
        error_context: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut items = pagination::fetch_all_bounded(&self.ctx, max_items, move |n| async move {
            Ok::<Page<T>, TfeError>(self.list_page::<T>(path, n).await?.into_page())
        })
        .await
        .with_context(|| format!("failed to list {}", error_context))?;

        items.truncate(max_items);
        Ok(items)
    }
}

#[cfg(test)]
impl TfeClient {
    /// Create a test client with mock base URL
    pub fn test_client(base_url: &str) -> Self {
        Self::test_client_with_org(base_url, Some("test-org"))
    }

    pub fn test_client_with_org(base_url: &str, organization: Option<&str>) -> Self {
        Self {
            transport: Transport::direct(),
            token: "test-token".to_string(),
            host: "mock.terraform.io".to_string(),
            organization: organization.map(|o| o.to_string()),
            ctx: RequestContext::new(),
            base_url_override: Some(base_url.to_string()),
            log: LogCloser::default(),
        }
    }
}
