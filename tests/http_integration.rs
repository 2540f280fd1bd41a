//! HTTP integration tests
//!
//! Drive the full axum router the way an MCP client would: initialize,
//! call `get_session_id`, close the session, and hit the edges of the
//! transport (wrong path, missing or stale session, malformed bodies).

use a3s_session::api::mcp::MCP_SESSION_ID;
use a3s_session::server::router;
use a3s_session::{AppState, ServerConfig};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::from_config(config);
    (router::build(state.clone()), state)
}

fn app() -> (Router, AppState) {
    app_with(ServerConfig::default())
}

fn post(path: &str, session: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream");
    if let Some(id) = session {
        builder = builder.header(MCP_SESSION_ID, id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Pull the JSON-RPC message out of an SSE or JSON body.
async fn rpc_body(response: axum::response::Response) -> Value {
    let text = body_text(response).await;
    let payload = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap_or(&text)
        .to_string();
    serde_json::from_str(&payload).unwrap()
}

fn initialize_body() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0"}
        }
    })
}

fn call_body(id: i64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": "get_session_id", "arguments": {}}
    })
}

async fn initialize(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post("/mcp/", None, initialize_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let id = response.headers()[MCP_SESSION_ID]
        .to_str()
        .unwrap()
        .to_string();
    let body = rpc_body(response).await;
    assert_eq!(body["result"]["serverInfo"]["name"], "session-test");
    assert_eq!(body["result"]["protocolVersion"], "2025-06-18");
    id
}

async fn get_session_id(app: &Router, session: &str, id: i64) -> Value {
    let response = app
        .clone()
        .oneshot(post("/mcp/", Some(session), call_body(id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[MCP_SESSION_ID], session);
    rpc_body(response).await
}

// ─── Session identity ────────────────────────────────────────────

#[tokio::test]
async fn test_same_session_returns_same_id() {
    let (app, _) = app();
    let session = initialize(&app).await;

    let first = get_session_id(&app, &session, 1).await;
    let second = get_session_id(&app, &session, 2).await;

    assert_eq!(first["id"], 1);
    assert_eq!(
        first["result"]["structuredContent"]["session_id"],
        session.as_str()
    );
    assert_eq!(
        first["result"]["structuredContent"],
        second["result"]["structuredContent"]
    );
    let text: Value =
        serde_json::from_str(first["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(text, json!({"session_id": session}));
}

#[tokio::test]
async fn test_concurrent_sessions_have_distinct_ids() {
    let (app, state) = app();
    let (a, b) = tokio::join!(initialize(&app), initialize(&app));
    assert_ne!(a, b);
    assert_eq!(state.sessions.count().await, 2);

    let (ra, rb) = tokio::join!(get_session_id(&app, &a, 1), get_session_id(&app, &b, 1));
    assert_eq!(ra["result"]["structuredContent"]["session_id"], a.as_str());
    assert_eq!(rb["result"]["structuredContent"]["session_id"], b.as_str());
}

#[tokio::test]
async fn test_sse_framing_by_default() {
    let (app, _) = app();
    let session = initialize(&app).await;
    let response = app
        .oneshot(post("/mcp/", Some(&session), call_body(5)))
        .await
        .unwrap();
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    let text = body_text(response).await;
    assert!(text.starts_with("event: message\ndata: "));
}

#[tokio::test]
async fn test_json_response_mode() {
    let (app, _) = app_with(ServerConfig {
        json_response: true,
        ..Default::default()
    });
    let session = initialize(&app).await;
    let response = app
        .oneshot(post("/mcp/", Some(&session), call_body(1)))
        .await
        .unwrap();
    assert_eq!(response.headers()["content-type"], "application/json");
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body["result"]["structuredContent"]["session_id"],
        session.as_str()
    );
}

// ─── No active session ───────────────────────────────────────────

#[tokio::test]
async fn test_call_without_session_is_rejected() {
    let (app, _) = app();
    let response = app.oneshot(post("/mcp/", None, call_body(9))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = rpc_body(response).await;
    assert_eq!(body["id"], 9);
    assert_eq!(body["error"]["code"], -32000);
    assert_eq!(body["error"]["message"], "Bad Request: No active session");
}

#[tokio::test]
async fn test_unknown_session_is_404() {
    let (app, _) = app();
    let response = app
        .oneshot(post("/mcp/", Some("0123456789abcdef"), call_body(1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = rpc_body(response).await;
    assert_eq!(body["error"]["code"], -32001);
}

#[tokio::test]
async fn test_stateless_mode_reports_no_active_session() {
    let (app, _) = app_with(ServerConfig {
        stateless: true,
        ..Default::default()
    });
    let response = app
        .clone()
        .oneshot(post("/mcp/", None, initialize_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(MCP_SESSION_ID).is_none());

    let response = app.oneshot(post("/mcp/", None, call_body(1))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = rpc_body(response).await;
    assert_eq!(body["result"]["isError"], true);
    assert_eq!(body["result"]["content"][0]["text"], "No active session");
}

// ─── Session lifecycle ───────────────────────────────────────────

#[tokio::test]
async fn test_delete_closes_session() {
    let (app, state) = app();
    let session = initialize(&app).await;

    let delete = |id: &str| {
        Request::builder()
            .method("DELETE")
            .uri("/mcp/")
            .header(MCP_SESSION_ID, id)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete(&session)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.sessions.count().await, 0);

    let response = app.clone().oneshot(delete(&session)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post("/mcp/", Some(&session), call_body(1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_header_is_bad_request() {
    let (app, _) = app();
    let request = Request::builder()
        .method("DELETE")
        .uri("/mcp/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notification_is_accepted() {
    let (app, _) = app();
    let session = initialize(&app).await;
    let response = app
        .oneshot(post(
            "/mcp/",
            Some(&session),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(response.headers()[MCP_SESSION_ID], session.as_str());
    assert!(body_text(response).await.is_empty());
}

// ─── Transport edges ─────────────────────────────────────────────

#[tokio::test]
async fn test_other_path_is_not_found() {
    let (app, _) = app();
    let response = app
        .oneshot(post("/other/", None, initialize_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Not found: /other/");
}

#[tokio::test]
async fn test_path_without_trailing_slash_is_served() {
    let (app, _) = app();
    let response = app
        .oneshot(post("/mcp", None, initialize_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(MCP_SESSION_ID).is_some());
}

#[tokio::test]
async fn test_custom_path() {
    let (app, _) = app_with(ServerConfig {
        path: "/rpc/".to_string(),
        ..Default::default()
    });
    let response = app
        .clone()
        .oneshot(post("/mcp/", None, initialize_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post("/rpc/", None, initialize_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_is_method_not_allowed() {
    let (app, _) = app();
    let request = Request::builder()
        .method("GET")
        .uri("/mcp/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/mcp/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = rpc_body(response).await;
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_tools_list_over_http() {
    let (app, _) = app();
    let session = initialize(&app).await;
    let response = app
        .oneshot(post(
            "/mcp/",
            Some(&session),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}),
        ))
        .await
        .unwrap();
    let body = rpc_body(response).await;
    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "get_session_id");
}

#[tokio::test]
async fn test_null_id_is_invalid_request() {
    let (app, _) = app();
    let session = initialize(&app).await;
    let response = app
        .oneshot(post(
            "/mcp/",
            Some(&session),
            json!({"jsonrpc": "2.0", "id": null, "method": "ping"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = rpc_body(response).await;
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_initialize_without_id_creates_no_session() {
    let (app, state) = app();
    let response = app
        .oneshot(post(
            "/mcp/",
            None,
            json!({"jsonrpc": "2.0", "method": "initialize"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(MCP_SESSION_ID).is_none());
    let body = rpc_body(response).await;
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(state.sessions.count().await, 0);
}

#[tokio::test]
async fn test_offerings_list_over_http() {
    let (app, _) = app();
    let session = initialize(&app).await;
    let response = app
        .oneshot(post(
            "/mcp/",
            Some(&session),
            json!({"jsonrpc": "2.0", "id": 4, "method": "offerings/list"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = rpc_body(response).await;
    assert_eq!(body["result"]["offerings"]["tools"], true);
}
