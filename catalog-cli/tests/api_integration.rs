//! API Integration Tests
//!
//! These tests drive the container client over real HTTP against a local
//! axum server that records every request it receives.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use catalog_cli::ReqwestTransport;
use catalog_shared::client::{ClientError, ProfileRange};
use catalog_shared::views::{SampleData, TableProfilerViewModel};
use catalog_shared::{ContainerClient, PatchOperation};
use serde_json::{json, Value};
use uuid::Uuid;

const CONTAINER_ID: &str = "6a0b6c1a-3b0c-4a55-9d1c-1b4cd5b8f4a2";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    content_type: Option<String>,
    authorization: Option<String>,
    body: String,
}

#[derive(Clone)]
struct TestServer {
    status: StatusCode,
    reply: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(server): State<TestServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    server.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: header_value(header::CONTENT_TYPE),
        authorization: header_value(header::AUTHORIZATION),
        body,
    });
    (server.status, server.reply.clone())
}

// Test utilities
async fn setup_test_server(status: StatusCode, reply: Value) -> (String, TestServer) {
    let server = TestServer {
        status,
        reply: reply.to_string(),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new().fallback(record).with_state(server.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), server)
}

fn client(base_url: &str) -> ContainerClient<ReqwestTransport> {
    ContainerClient::new(ReqwestTransport::new(base_url, Duration::from_secs(5)).unwrap())
}

fn container_json() -> Value {
    json!({
        "id": CONTAINER_ID,
        "name": "orders",
        "fullyQualifiedName": "s3.orders",
        "dataModel": { "columns": [{ "name": "id", "dataType": "INT" }] }
    })
}

fn container_id() -> Uuid {
    CONTAINER_ID.parse().unwrap()
}

// =============================================================================
// Read Tests
// =============================================================================

#[tokio::test]
async fn test_table_profile_range_is_forwarded_exactly() {
    let (url, server) = setup_test_server(
        StatusCode::OK,
        json!({ "data": [{ "timestamp": 50, "rowCount": 10 }], "paging": { "total": 1 } }),
    )
    .await;

    let page = client(&url)
        .get_table_profiles("s3.orders", &ProfileRange::new(0, 100))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].row_count, Some(10.0));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/v1/containers/s3.orders/tableProfile");
    assert_eq!(requests[0].query.as_deref(), Some("startTs=0&endTs=100"));
}

#[tokio::test]
async fn test_fqn_with_reserved_characters_is_encoded() {
    let (url, server) = setup_test_server(StatusCode::OK, container_json()).await;

    let container = client(&url)
        .get_container_by_fqn("s3 prod.\"sales/2024\".tx?#%", &Default::default())
        .await
        .unwrap();
    assert_eq!(container.fully_qualified_name, "s3.orders");

    let requests = server.requests();
    assert_eq!(
        requests[0].path,
        "/api/v1/containers/name/s3%20prod.%22sales%2F2024%22.tx%3F%23%25"
    );
    assert_eq!(requests[0].query.as_deref(), Some("include=all"));
}

#[tokio::test]
async fn test_sample_data_view_from_live_response() {
    let mut body = container_json();
    body["sampleData"] = json!({ "columns": ["id", "note"], "rows": [[1, "first"], [2]] });
    let (url, _server) = setup_test_server(StatusCode::OK, body).await;

    let container = client(&url).get_sample_data(&container_id()).await.unwrap();
    let data = SampleData::from_container(&container).unwrap();

    assert_eq!(data.columns[0].data_type, "INT");
    assert_eq!(data.cell(0, 1), "first");
    assert_eq!(data.cell(1, 1), "");
}

#[tokio::test]
async fn test_latest_profile_summary() {
    let mut body = container_json();
    body["profile"] = json!({ "timestamp": 1, "rowCount": 1234567, "columnCount": 4, "profileSample": 50 });
    let (url, server) = setup_test_server(StatusCode::OK, body).await;

    let container = client(&url).get_latest_profile("s3.orders").await.unwrap();
    let model = TableProfilerViewModel {
        table_profiler: Some(container),
        ..Default::default()
    };

    let summary = model.overall_summary();
    assert_eq!(summary[0].value, "1,234,567");
    assert_eq!(summary[2].value, "50%");
    assert_eq!(server.requests()[0].path, "/api/v1/containers/s3.orders/tableProfile/latest");
}

// =============================================================================
// Write Tests
// =============================================================================

#[tokio::test]
async fn test_follower_id_is_sent_as_raw_body() {
    let (url, server) = setup_test_server(StatusCode::OK, json!({ "changeDescription": {} })).await;
    let user: Uuid = "0f8fad5b-d9cb-469f-a165-70867728950e".parse().unwrap();

    client(&url).add_follower(&container_id(), &user).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].path, format!("/api/v1/containers/{}/followers", CONTAINER_ID));
    assert_eq!(requests[0].body, user.to_string());
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_patch_uses_json_patch_content_type() {
    let (url, server) = setup_test_server(StatusCode::OK, container_json()).await;
    let operations = vec![PatchOperation::Add {
        path: "/description".to_string(),
        value: json!("Raw orders"),
    }];

    client(&url).patch_container(&container_id(), &operations).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json-patch+json"));
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent, json!([{ "op": "add", "path": "/description", "value": "Raw orders" }]));
}

#[tokio::test]
async fn test_delete_sample_data_is_not_retried() {
    let (url, server) = setup_test_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "code": 500, "message": "boom" }),
    )
    .await;

    let err = client(&url).delete_sample_data(&container_id()).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Status {
            status: 500,
            body: r#"{"code":500,"message":"boom"}"#.to_string(),
        }
    );
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path, format!("/api/v1/containers/{}/sampleData", CONTAINER_ID));
}

#[tokio::test]
async fn test_delete_profile_accepts_empty_body() {
    let (url, server) = setup_test_server(StatusCode::OK, Value::Null).await;

    client(&url)
        .delete_profile_data("s3.orders", "table", 1_700_000_000_000)
        .await
        .unwrap();

    assert_eq!(
        server.requests()[0].path,
        "/api/v1/containers/s3.orders/table/1700000000000/profile"
    );
}

// =============================================================================
// Error & Transport Tests
// =============================================================================

#[tokio::test]
async fn test_not_found_is_surfaced() {
    let (url, _server) = setup_test_server(StatusCode::NOT_FOUND, json!({ "message": "missing" })).await;

    let err = client(&url)
        .get_container_by_id(&container_id(), &Default::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api/v1", addr))
        .get_latest_profile("s3.orders")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ConnectionFailed(_)));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let (url, server) = setup_test_server(StatusCode::OK, container_json()).await;
    let config = catalog_cli::CatalogConfig {
        server_url: url,
        token: Some("secret-token".to_string()),
        ..Default::default()
    };

    ContainerClient::new(ReqwestTransport::from_config(&config).unwrap())
        .get_table_profiler_config(&container_id())
        .await
        .unwrap();

    assert_eq!(
        server.requests()[0].authorization.as_deref(),
        Some("Bearer secret-token")
    );
}
