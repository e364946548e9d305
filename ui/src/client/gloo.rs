//! Browser transport
//!
//! Sends [`ApiRequest`]s through the Fetch API via `gloo-net`. One call to
//! `send` is one fetch; nothing is retried.

use async_trait::async_trait;
use catalog_shared::client::{ApiRequest, ApiResponse, ClientError, Method, Transport};
use gloo_net::http::{Request, RequestBuilder};

#[derive(Debug, Clone)]
pub struct GlooTransport {
    /// Catalog API root
    base_url: String,
}

impl GlooTransport {
    pub fn new(url: &str) -> Self {
        // Normalize URL (remove trailing slash)
        let base_url = url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = request.url(&self.base_url);
        match request.method {
            Method::Get => Request::get(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut builder = self.builder(&request);
        if let Some(content_type) = request.content_type {
            builder = builder.header("Content-Type", content_type);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body.into_string()),
            None => builder.build(),
        }
        .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}
