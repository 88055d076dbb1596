//! REST transport for the document service
//!
//! Two layers:
//! - [`HttpClient`] sends a fully formed request and returns status + body.
//!   [`ReqwestHttpClient`] is the production implementation; tests swap in
//!   [`crate::mock::MockHttpClient`].
//! - [`RestTransport`] turns a [`ResourceRequest`] into an HTTP request by
//!   stamping the date, version and authorization headers on it.

use crate::auth::MasterKeySigner;
use crate::error::TransportError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use colladmin_core::error::{Error, Result};
use colladmin_core::ConnectionContext;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const HEADER_DATE: &str = "x-ms-date";
pub const HEADER_VERSION: &str = "x-ms-version";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_OFFER_THROUGHPUT: &str = "x-ms-offer-throughput";
pub const HEADER_IS_QUERY: &str = "x-ms-documentdb-isquery";

pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Query media type; the service rejects it with a charset parameter
pub const CONTENT_TYPE_QUERY_JSON: &str = "application/query+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// Resource types addressed by this client, as they appear in signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Collections,
    Offers,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Collections => "colls",
            ResourceType::Offers => "offers",
        }
    }
}

/// Outbound HTTP request, fully formed
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header with this name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Fail with [`Error::Connection`] unless the status is 2xx
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::connection(self.status, self.body))
        }
    }

    /// Decode the JSON body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            Error::serialization(format!("Failed to decode response body: {e}"))
        })
    }
}

/// Sends one HTTP request
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpClient`] backed by reqwest
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Raw body: reqwest's json() would add its own content type
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            let error_kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connection"
            } else if e.is_request() {
                "request build"
            } else {
                "unknown"
            };
            warn!(
                method = %request.method,
                url = %request.url,
                "HTTP request failed ({error_kind}): {e}"
            );
            TransportError::Request(format!("{} {} ({error_kind}): {e}", request.method, request.url))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Request against one service resource, before signing
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub method: HttpMethod,
    pub resource_type: ResourceType,
    /// Resource id as signed, e.g. `dbs/shop/colls/orders`
    pub resource_link: String,
    /// URL path below the base URI, e.g. `/dbs/shop/colls/orders`
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ResourceRequest {
    pub fn new(
        method: HttpMethod,
        resource_type: ResourceType,
        resource_link: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            method,
            resource_type,
            resource_link: resource_link.into(),
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach a JSON body with `application/json`
    pub fn json_body<T: Serialize>(self, body: &T) -> Result<Self> {
        self.body_with_content_type(body, CONTENT_TYPE_JSON)
    }

    /// Attach a query body with `application/query+json` and the is-query marker
    pub fn query_body<T: Serialize>(self, body: &T) -> Result<Self> {
        self.header(HEADER_IS_QUERY, "True")
            .body_with_content_type(body, CONTENT_TYPE_QUERY_JSON)
    }

    fn body_with_content_type<T: Serialize>(mut self, body: &T, content_type: &str) -> Result<Self> {
        let payload = serde_json::to_string(body)
            .map_err(|e| Error::serialization(format!("Failed to encode request body: {e}")))?;
        self.headers
            .push((HEADER_CONTENT_TYPE.to_string(), content_type.to_string()));
        self.body = Some(payload);
        Ok(self)
    }
}

/// RFC 1123 date as the service expects it in `x-ms-date`
pub fn format_request_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Signs and executes [`ResourceRequest`]s against one service endpoint
pub struct RestTransport {
    client: Arc<dyn HttpClient>,
    base_uri: String,
    api_version: String,
    signer: MasterKeySigner,
}

impl RestTransport {
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyFormat`] when the context's master key is not base64.
    pub fn new(
        client: Arc<dyn HttpClient>,
        context: &ConnectionContext,
        api_version: impl Into<String>,
        key_type: &str,
        token_version: &str,
    ) -> Result<Self> {
        Ok(Self {
            client,
            base_uri: context.base_uri(),
            api_version: api_version.into(),
            signer: MasterKeySigner::new(context.master_key(), key_type, token_version)?,
        })
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Execute one request; any status is returned, only transport failures error
    pub async fn execute(&self, request: ResourceRequest) -> Result<HttpResponse> {
        let date = format_request_date(Utc::now());
        let authorization = self.signer.sign(
            request.method,
            request.resource_type.as_str(),
            &request.resource_link,
            &date,
        )?;

        let mut headers = Vec::with_capacity(request.headers.len() + 3);
        headers.push((HEADER_DATE.to_string(), date));
        headers.push((HEADER_VERSION.to_string(), self.api_version.clone()));
        headers.push((HEADER_AUTHORIZATION.to_string(), authorization));
        headers.extend(request.headers);

        let http_request = HttpRequest {
            method: request.method,
            url: format!("{}{}", self.base_uri, request.path),
            headers,
            body: request.body,
        };

        debug!(
            method = %http_request.method,
            url = %http_request.url,
            "Sending request"
        );

        let response = self.client.send(http_request).await?;

        debug!(status = response.status, "Received response");

        Ok(response)
    }
}
