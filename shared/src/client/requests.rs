//! Request builders for the `/containers` resource
//!
//! Each function turns its arguments into an [`ApiRequest`] without doing
//! any I/O. Paths are relative to the API root (e.g. `http://host/api/v1`).

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::types::{ColumnProfileParams, ListParams, ProfileRange, TestCaseListParams};
use super::ClientError;
use crate::entity::{Include, PatchOperation, RestoreRequest};
use crate::fqn::encode_fqn;
use crate::profile::{TableData, TableProfilerConfig};
use crate::quality::CreateCustomMetric;

pub const BASE_PATH: &str = "/containers";

/// Test cases are served by the data quality resource
pub const TEST_CASES_PATH: &str = "/dataQuality/testCases";

pub const APPLICATION_JSON: &str = "application/json";
pub const JSON_PATCH: &str = "application/json-patch+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized JSON document
    Json(Value),
    /// Raw text sent as-is
    Text(String),
}

impl RequestBody {
    pub fn into_string(self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Text(text) => text,
        }
    }
}

/// A single HTTP call, independent of the transport that performs it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,

    /// Path relative to the API root, already percent-encoded
    pub path: String,

    /// Query parameters in the order they will be sent
    pub query: Vec<(String, String)>,

    pub body: Option<RequestBody>,

    /// Content type of `body`
    pub content_type: Option<&'static str>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B, content_type: &'static str) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::RequestFailed(format!("Failed to encode body: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        self.content_type = Some(content_type);
        Ok(self)
    }

    pub fn with_text(mut self, body: impl Into<String>, content_type: &'static str) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self.content_type = Some(content_type);
        self
    }

    /// Encoded query string without the leading `?`
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Absolute URL for this request under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query_string());
        }
        url
    }

    /// Query value for `key`, if present
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn segment(value: &str) -> String {
    encode_fqn(value).into_owned()
}

pub fn list_containers(params: &ListParams) -> ApiRequest {
    ApiRequest::new(Method::Get, BASE_PATH).with_query(params.to_query())
}

pub fn get_container_by_fqn(fqn: &str, params: &ListParams) -> ApiRequest {
    let params = ListParams {
        include: Some(params.include.unwrap_or(Include::All)),
        ..params.clone()
    };
    ApiRequest::new(Method::Get, format!("{}/name/{}", BASE_PATH, segment(fqn)))
        .with_query(params.to_query())
}

pub fn get_container_by_id(id: &Uuid, params: &ListParams) -> ApiRequest {
    let params = ListParams {
        include: Some(params.include.unwrap_or(Include::All)),
        ..params.clone()
    };
    ApiRequest::new(Method::Get, format!("{}/{}", BASE_PATH, id)).with_query(params.to_query())
}

pub fn patch_container(id: &Uuid, operations: &[PatchOperation]) -> Result<ApiRequest, ClientError> {
    ApiRequest::new(Method::Patch, format!("{}/{}", BASE_PATH, id)).with_json(&operations, JSON_PATCH)
}

pub fn restore_container(id: &Uuid) -> Result<ApiRequest, ClientError> {
    ApiRequest::new(Method::Put, format!("{}/restore", BASE_PATH))
        .with_json(&RestoreRequest { id: *id }, APPLICATION_JSON)
}

/// The follower id travels as the raw request body
pub fn add_follower(container_id: &Uuid, user_id: &Uuid) -> ApiRequest {
    ApiRequest::new(Method::Put, format!("{}/{}/followers", BASE_PATH, container_id))
        .with_text(user_id.to_string(), APPLICATION_JSON)
}

pub fn remove_follower(container_id: &Uuid, user_id: &Uuid) -> ApiRequest {
    ApiRequest::new(
        Method::Delete,
        format!("{}/{}/followers/{}", BASE_PATH, container_id, user_id),
    )
}

pub fn get_table_profiler_config(container_id: &Uuid) -> ApiRequest {
    ApiRequest::new(Method::Get, format!("{}/{}/tableProfilerConfig", BASE_PATH, container_id))
}

pub fn put_table_profiler_config(
    container_id: &Uuid,
    config: &TableProfilerConfig,
) -> Result<ApiRequest, ClientError> {
    ApiRequest::new(Method::Put, format!("{}/{}/tableProfilerConfig", BASE_PATH, container_id))
        .with_json(config, APPLICATION_JSON)
}

pub fn delete_table_profiler_config(container_id: &Uuid) -> ApiRequest {
    ApiRequest::new(Method::Delete, format!("{}/{}/tableProfilerConfig", BASE_PATH, container_id))
}

pub fn get_table_profiles(container_fqn: &str, range: &ProfileRange) -> ApiRequest {
    ApiRequest::new(Method::Get, format!("{}/{}/tableProfile", BASE_PATH, segment(container_fqn)))
        .with_query(range.to_query())
}

pub fn get_system_profiles(container_fqn: &str, range: &ProfileRange) -> ApiRequest {
    ApiRequest::new(Method::Get, format!("{}/{}/systemProfile", BASE_PATH, segment(container_fqn)))
        .with_query(range.to_query())
}

pub fn get_column_profiles(column_fqn: &str, params: &ColumnProfileParams) -> ApiRequest {
    ApiRequest::new(Method::Get, format!("{}/{}/columnProfile", BASE_PATH, segment(column_fqn)))
        .with_query(params.to_query())
}

pub fn get_latest_profile(container_fqn: &str) -> ApiRequest {
    ApiRequest::new(
        Method::Get,
        format!("{}/{}/tableProfile/latest", BASE_PATH, segment(container_fqn)),
    )
}

pub fn delete_profile_data(fqn: &str, entity_type: &str, timestamp: i64) -> ApiRequest {
    ApiRequest::new(
        Method::Delete,
        format!("{}/{}/{}/{}/profile", BASE_PATH, segment(fqn), segment(entity_type), timestamp),
    )
}

pub fn get_sample_data(container_id: &Uuid) -> ApiRequest {
    ApiRequest::new(Method::Get, format!("{}/{}/sampleData", BASE_PATH, container_id))
}

pub fn put_sample_data(container_id: &Uuid, data: &TableData) -> Result<ApiRequest, ClientError> {
    ApiRequest::new(Method::Put, format!("{}/{}/sampleData", BASE_PATH, container_id))
        .with_json(data, APPLICATION_JSON)
}

pub fn delete_sample_data(container_id: &Uuid) -> ApiRequest {
    ApiRequest::new(Method::Delete, format!("{}/{}/sampleData", BASE_PATH, container_id))
}

pub fn add_custom_metric(
    container_id: &Uuid,
    metric: &CreateCustomMetric,
) -> Result<ApiRequest, ClientError> {
    ApiRequest::new(Method::Put, format!("{}/{}/customMetric", BASE_PATH, container_id))
        .with_json(metric, APPLICATION_JSON)
}

/// Table-level metrics live at `customMetric/{name}`, column metrics at
/// `customMetric/{column}/{name}`
pub fn delete_custom_metric(container_id: &Uuid, column: Option<&str>, name: &str) -> ApiRequest {
    let path = match column {
        Some(column) => format!(
            "{}/{}/customMetric/{}/{}",
            BASE_PATH,
            container_id,
            segment(column),
            segment(name)
        ),
        None => format!("{}/{}/customMetric/{}", BASE_PATH, container_id, segment(name)),
    };
    ApiRequest::new(Method::Delete, path)
}

pub fn list_test_cases(params: &TestCaseListParams) -> ApiRequest {
    ApiRequest::new(Method::Get, TEST_CASES_PATH).with_query(params.to_query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fqn::decode_fqn;

    fn container_id() -> Uuid {
        Uuid::parse_str("6a0b6c1a-3b0c-4a55-9d1c-1b4cd5b8f4a2").unwrap()
    }

    #[test]
    fn test_get_by_fqn_defaults_include_all() {
        let request = get_container_by_fqn("s3.sales", &ListParams::default());
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/containers/name/s3.sales");
        assert_eq!(request.query, vec![("include".to_string(), "all".to_string())]);
    }

    #[test]
    fn test_get_by_fqn_keeps_caller_params() {
        let params = ListParams::new()
            .with_fields("owner,followers")
            .with_include(Include::NonDeleted);
        let request = get_container_by_fqn("s3.sales", &params);

        assert_eq!(request.query_value("fields"), Some("owner,followers"));
        assert_eq!(request.query_value("include"), Some("non-deleted"));
        assert_eq!(request.query.len(), 2);
    }

    #[test]
    fn test_methods_render_uppercase() {
        let rendered: Vec<String> = [Method::Get, Method::Put, Method::Patch, Method::Delete]
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(rendered, vec!["GET", "PUT", "PATCH", "DELETE"]);
    }

    #[test]
    fn test_list_test_cases_keeps_entity_link_raw() {
        let request = list_test_cases(&TestCaseListParams::for_entity("<#E::container::s3.sales>"));
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, TEST_CASES_PATH);
        assert_eq!(request.query_value("entityLink"), Some("<#E::container::s3.sales>"));
        assert_eq!(request.query_value("includeAllTests"), Some("true"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_fqn_segment_is_encoded_and_reversible() {
        let fqn = "s3 prod.\"raw/landing\".events?v=2";
        let request = get_table_profiles(fqn, &ProfileRange::default());

        let encoded = request
            .path
            .strip_prefix("/containers/")
            .and_then(|rest| rest.strip_suffix("/tableProfile"))
            .unwrap();
        assert!(!encoded.contains('/'));
        assert_eq!(decode_fqn(encoded).unwrap(), fqn);
    }

    #[test]
    fn test_table_profile_forwards_exact_range() {
        let request = get_table_profiles("s3.sales", &ProfileRange::new(0, 100));
        assert_eq!(request.path, "/containers/s3.sales/tableProfile");
        assert_eq!(
            request.query,
            vec![
                ("startTs".to_string(), "0".to_string()),
                ("endTs".to_string(), "100".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_patch_uses_json_patch_content_type() {
        let ops = vec![PatchOperation::Remove { path: "/owner".to_string() }];
        let request = patch_container(&container_id(), &ops).unwrap();

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.content_type, Some(JSON_PATCH));
        assert_eq!(
            request.body,
            Some(RequestBody::Json(serde_json::json!([{ "op": "remove", "path": "/owner" }])))
        );
    }

    #[test]
    fn test_follower_body_is_raw_user_id() {
        let user = Uuid::parse_str("0b1c2d3e-4f50-4617-8899-aabbccddeeff").unwrap();
        let request = add_follower(&container_id(), &user);

        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, format!("/containers/{}/followers", container_id()));
        assert_eq!(request.body, Some(RequestBody::Text(user.to_string())));
        assert_eq!(request.content_type, Some(APPLICATION_JSON));

        let removal = remove_follower(&container_id(), &user);
        assert_eq!(removal.method, Method::Delete);
        assert!(removal.path.ends_with(&format!("/followers/{}", user)));
    }

    #[test]
    fn test_delete_custom_metric_paths() {
        let table_level = delete_custom_metric(&container_id(), None, "row ratio");
        assert!(table_level.path.ends_with("/customMetric/row%20ratio"));

        let column_level = delete_custom_metric(&container_id(), Some("amount"), "avg_amount");
        assert!(column_level.path.ends_with("/customMetric/amount/avg_amount"));
    }

    #[test]
    fn test_url_building() {
        let request = get_column_profiles(
            "s3.sales.amount",
            &ColumnProfileParams {
                start_ts: Some(10),
                after: Some("a b".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(
            request.url("http://localhost:8585/api/v1/"),
            "http://localhost:8585/api/v1/containers/s3.sales.amount/columnProfile?startTs=10&after=a%20b"
        );
    }
}
