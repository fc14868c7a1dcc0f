//! HttpClient tests against a mock backend

use std::sync::Arc;

use futures::StreamExt;
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lynx_mcp::config::BackendSettings;
use lynx_mcp::errors::McpError;
use lynx_mcp::http::{FilePart, HttpClient, MultipartUpload, Transport};
use lynx_mcp::McpClient;

use crate::support::metrics_json;

fn settings(server: &MockServer) -> BackendSettings {
    BackendSettings {
        base_url: server.uri(),
        api_token: Some("test-token".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_rejects_invalid_base_url() {
    let bad = BackendSettings {
        base_url: "not a url".to_string(),
        ..Default::default()
    };
    assert!(matches!(HttpClient::new(&bad), Err(McpError::ConfigError(_))));

    let ftp = BackendSettings {
        base_url: "ftp://mcp.example.com".to_string(),
        ..Default::default()
    };
    assert!(HttpClient::new(&ftp).is_err());
}

#[tokio::test]
async fn test_send_attaches_auth_request_id_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mcp/users"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_exists("x-request-id"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let query = vec![("status".to_string(), "active".to_string())];
    let body = client.send(Method::GET, "/mcp/users", &query, None).await.unwrap();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_send_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp/agents/a1/upgrade"))
        .and(body_json(json!({"version": "2.2.0"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "ok"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let body = client
        .send(
            Method::POST,
            "/mcp/agents/a1/upgrade",
            &[],
            Some(json!({"version": "2.2.0"})),
        )
        .await
        .unwrap();

    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mcp/tasks/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("task not found"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let err = client
        .send(Method::GET, "/mcp/tasks/missing", &[], None)
        .await
        .unwrap_err();

    match err {
        McpError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "task not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/mcp/users/u1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let body = client
        .send(Method::DELETE, "/mcp/users/u1", &[], None)
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mcp/logs/export"))
        .and(query_param("format", "csv"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ts,level\n".to_vec()))
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let query = vec![("format".to_string(), "csv".to_string())];
    let bytes = client.download("/mcp/logs/export", &query).await.unwrap();

    assert_eq!(bytes, b"ts,level\n");
}

#[tokio::test]
async fn test_upload_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp/docs/upload"))
        .and(header_exists("content-type"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "d1", "status": "processing"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let form = MultipartUpload {
        file: FilePart {
            field: "file".to_string(),
            file_name: "bol.pdf".to_string(),
            mime_type: Some("application/pdf".to_string()),
            bytes: b"%PDF-1.7".to_vec(),
        },
        fields: vec![("metadata".to_string(), "{}".to_string())],
    };
    let body = client.upload("/mcp/docs/upload", form).await.unwrap();

    assert_eq!(body["id"], "d1");
    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(String::from_utf8_lossy(&requests[0].body).contains("bol.pdf"));
}

#[tokio::test]
async fn test_open_stream_parses_event_framing() {
    let server = MockServer::start().await;
    let body = concat!(
        ": keep-alive\n\n",
        "event: log\n",
        "data: {\"message\":\"one\"}\n\n",
        "{\"message\":\"two\"}\n",
        "data: {\"message\":\"three\"}\n\n",
    );
    Mock::given(method("GET"))
        .and(path("/mcp/logs/stream"))
        .and(header("accept", "text/event-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let events: Vec<String> = client
        .open_stream("/mcp/logs/stream", &[])
        .await
        .unwrap()
        .map(|event| event.unwrap())
        .collect()
        .await;

    assert_eq!(
        events,
        vec![
            r#"{"message":"one"}"#,
            r#"{"message":"two"}"#,
            r#"{"message":"three"}"#,
        ]
    );
}

#[tokio::test]
async fn test_open_stream_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mcp/logs/stream"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let err = client.open_stream("/mcp/logs/stream", &[]).await.err().unwrap();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_live_metrics_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mcp/metrics/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": metrics_json(),
            "message": "ok"
        })))
        .mount(&server)
        .await;

    let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&settings(&server)).unwrap());
    let client = McpClient::new(transport);
    let overview = client.metrics.overview().await;

    assert!(!overview.is_mock());
    assert_eq!(overview.live().unwrap().agents.total, 42);
}

#[tokio::test]
async fn test_unreachable_backend_degrades_metrics_only() {
    // Nothing listens on the discard port
    let settings = BackendSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout_secs: 1,
        ..Default::default()
    };
    let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&settings).unwrap());
    let client = McpClient::new(transport);

    assert!(client.metrics.overview().await.is_mock());

    let err = client.system.health().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_bodyless_actions_are_acknowledged() {
    let server = MockServer::start().await;
    for (verb, route, status) in [
        ("DELETE", "/mcp/users/u1", 204),
        ("DELETE", "/mcp/workflows/w1", 204),
        ("DELETE", "/mcp/profile", 204),
        ("POST", "/mcp/tasks/t1/cancel", 202),
    ] {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;
    }

    let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&settings(&server)).unwrap());
    let client = McpClient::new(transport);

    for ack in [
        client.users.remove("u1").await.unwrap(),
        client.workflows.remove("w1").await.unwrap(),
        client.profile.delete_account().await.unwrap(),
        client.tasks.cancel("t1").await.unwrap(),
    ] {
        assert!(ack.success);
        assert!(ack.message.is_empty());
    }
}

#[tokio::test]
async fn test_action_body_is_still_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp/system/drain"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "already draining"})),
        )
        .mount(&server)
        .await;

    let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&settings(&server)).unwrap());
    let ack = McpClient::new(transport).system.drain().await.unwrap();

    assert!(!ack.success);
    assert_eq!(ack.message, "already draining");
}

#[tokio::test]
async fn test_upload_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp/profile/avatar"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let form = MultipartUpload {
        file: FilePart {
            field: "avatar".to_string(),
            file_name: "me.png".to_string(),
            mime_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        },
        fields: Vec::new(),
    };

    assert!(client.upload("/mcp/profile/avatar", form).await.unwrap().is_null());
}

#[tokio::test]
async fn test_open_stream_fails_on_unterminated_oversized_line() {
    let server = MockServer::start().await;
    let body = format!(
        "data: {{\"message\":\"ok\"}}\n\n{}",
        "x".repeat(lynx_mcp::http::sse::MAX_LINE_BYTES + 1)
    );
    Mock::given(method("GET"))
        .and(path("/mcp/logs/stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&settings(&server)).unwrap();
    let events: Vec<Result<String, McpError>> = client
        .open_stream("/mcp/logs/stream", &[])
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(events.first().unwrap().as_ref().unwrap(), r#"{"message":"ok"}"#);
    assert!(matches!(events.last().unwrap(), Err(McpError::Stream(_))));
}
