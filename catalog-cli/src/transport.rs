//! reqwest-backed transport for the container client

use std::time::Duration;

use async_trait::async_trait;
use catalog_shared::client::{ApiRequest, ApiResponse, ClientError, Method, Transport};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::trace;

use crate::config::CatalogConfig;

/// Sends each [`ApiRequest`] as exactly one HTTP call
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ReqwestTransport {
    /// Fails when the HTTP client cannot be built (e.g. no TLS backend)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, ClientError> {
        let mut transport = Self::new(&config.server_url, Duration::from_secs(config.timeout_secs))?;
        transport.token = config.token.clone();
        Ok(transport)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn map_error(err: reqwest::Error) -> ClientError {
    if err.is_connect() || err.is_timeout() {
        ClientError::ConnectionFailed(err.to_string())
    } else {
        ClientError::RequestFailed(err.to_string())
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = request.url(&self.base_url);
        trace!("{} {}", request.method, url);

        let mut builder = self.client.request(to_reqwest(request.method), &url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            if let Some(content_type) = request.content_type {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
            builder = builder.body(body.into_string());
        }

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;

        Ok(ApiResponse { status, body })
    }
}
