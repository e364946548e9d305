//! Containers REST client
//!
//! The client is split in two layers so the same code runs in the browser
//! and in the CLI:
//!
//! - [`requests`]: pure builders producing an [`ApiRequest`] per endpoint
//! - [`Transport`]: performs one HTTP call (gloo-net in the UI, reqwest in the CLI)
//!
//! [`ContainerClient`] ties them together, checking the status code and
//! decoding the JSON body. Every operation issues exactly one call; errors are
//! returned to the caller untouched, without retries.

pub mod requests;
mod types;

pub use requests::{ApiRequest, Method, RequestBody};
pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::entity::{Container, FollowerChange, PatchOperation};
use crate::profile::{
    ColumnProfile, PagingResponse, SystemProfile, TableData, TableProfile, TableProfilerConfig,
};
use crate::quality::{CreateCustomMetric, TestCase};

/// Error types for catalog client operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Non-2xx response, with the body exactly as the server sent it
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Raw HTTP response handed back by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP call for an [`ApiRequest`]
///
/// Implementations must not retry: one `send` is one request on the wire.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        (**self).send(request).await
    }
}

/// Typed client for the `/containers` resource
#[derive(Debug, Clone)]
pub struct ContainerClient<T> {
    transport: T,
}

impl<T: Transport> ContainerClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        debug!(method = %request.method, path = %request.path, "containers request");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            debug!(status = response.status, "containers request rejected");
            return Err(ClientError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let response = self.call(request).await?;
        serde_json::from_str(&response.body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// List containers with cursor paging
    pub async fn list_containers(
        &self,
        params: &ListParams,
    ) -> Result<PagingResponse<Vec<Container>>, ClientError> {
        self.execute(requests::list_containers(params)).await
    }

    /// Fetch a container by FQN; `include` defaults to `all`
    pub async fn get_container_by_fqn(
        &self,
        fqn: &str,
        params: &ListParams,
    ) -> Result<Container, ClientError> {
        self.execute(requests::get_container_by_fqn(fqn, params)).await
    }

    pub async fn get_container_by_id(
        &self,
        id: &Uuid,
        params: &ListParams,
    ) -> Result<Container, ClientError> {
        self.execute(requests::get_container_by_id(id, params)).await
    }

    pub async fn patch_container(
        &self,
        id: &Uuid,
        operations: &[PatchOperation],
    ) -> Result<Container, ClientError> {
        self.execute(requests::patch_container(id, operations)?).await
    }

    /// Restore a soft-deleted container
    pub async fn restore_container(&self, id: &Uuid) -> Result<Container, ClientError> {
        self.execute(requests::restore_container(id)?).await
    }

    pub async fn add_follower(
        &self,
        container_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<FollowerChange, ClientError> {
        self.execute(requests::add_follower(container_id, user_id)).await
    }

    pub async fn remove_follower(
        &self,
        container_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<FollowerChange, ClientError> {
        self.execute(requests::remove_follower(container_id, user_id)).await
    }

    /// Container with its `tableProfilerConfig` populated
    pub async fn get_table_profiler_config(&self, container_id: &Uuid) -> Result<Container, ClientError> {
        self.execute(requests::get_table_profiler_config(container_id)).await
    }

    pub async fn put_table_profiler_config(
        &self,
        container_id: &Uuid,
        config: &TableProfilerConfig,
    ) -> Result<Container, ClientError> {
        self.execute(requests::put_table_profiler_config(container_id, config)?).await
    }

    pub async fn delete_table_profiler_config(&self, container_id: &Uuid) -> Result<Container, ClientError> {
        self.execute(requests::delete_table_profiler_config(container_id)).await
    }

    pub async fn get_table_profiles(
        &self,
        container_fqn: &str,
        range: &ProfileRange,
    ) -> Result<PagingResponse<Vec<TableProfile>>, ClientError> {
        self.execute(requests::get_table_profiles(container_fqn, range)).await
    }

    pub async fn get_system_profiles(
        &self,
        container_fqn: &str,
        range: &ProfileRange,
    ) -> Result<PagingResponse<Vec<SystemProfile>>, ClientError> {
        self.execute(requests::get_system_profiles(container_fqn, range)).await
    }

    pub async fn get_column_profiles(
        &self,
        column_fqn: &str,
        params: &ColumnProfileParams,
    ) -> Result<PagingResponse<Vec<ColumnProfile>>, ClientError> {
        self.execute(requests::get_column_profiles(column_fqn, params)).await
    }

    /// Container with its latest `profile` populated
    pub async fn get_latest_profile(&self, container_fqn: &str) -> Result<Container, ClientError> {
        self.execute(requests::get_latest_profile(container_fqn)).await
    }

    /// Delete one profile record; `entity_type` is `table` or `column`
    pub async fn delete_profile_data(
        &self,
        fqn: &str,
        entity_type: &str,
        timestamp: i64,
    ) -> Result<(), ClientError> {
        self.call(requests::delete_profile_data(fqn, entity_type, timestamp))
            .await
            .map(|_| ())
    }

    /// Container with its `sampleData` populated
    pub async fn get_sample_data(&self, container_id: &Uuid) -> Result<Container, ClientError> {
        self.execute(requests::get_sample_data(container_id)).await
    }

    pub async fn put_sample_data(
        &self,
        container_id: &Uuid,
        data: &TableData,
    ) -> Result<Container, ClientError> {
        self.execute(requests::put_sample_data(container_id, data)?).await
    }

    pub async fn delete_sample_data(&self, container_id: &Uuid) -> Result<Container, ClientError> {
        self.execute(requests::delete_sample_data(container_id)).await
    }

    pub async fn add_custom_metric(
        &self,
        container_id: &Uuid,
        metric: &CreateCustomMetric,
    ) -> Result<Container, ClientError> {
        self.execute(requests::add_custom_metric(container_id, metric)?).await
    }

    pub async fn delete_custom_metric(
        &self,
        container_id: &Uuid,
        column: Option<&str>,
        name: &str,
    ) -> Result<Container, ClientError> {
        self.execute(requests::delete_custom_metric(container_id, column, name)).await
    }

    /// One page of the test cases attached to an entity
    pub async fn list_test_cases(
        &self,
        params: &TestCaseListParams,
    ) -> Result<PagingResponse<Vec<TestCase>>, ClientError> {
        self.execute(requests::list_test_cases(params)).await
    }
}
