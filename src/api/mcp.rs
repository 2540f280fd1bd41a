//! Streamable HTTP endpoint
//!
//! - `POST {path}`   — one JSON-RPC message, reply framed as SSE or JSON
//! - `DELETE {path}` — close the session named by `Mcp-Session-Id`
//! - `GET {path}`    — no standalone server stream; 405

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use super::dispatch::dispatch;
use super::sse;
use crate::error::SessionError;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::server::state::AppState;
use crate::session::{Session, SessionId};

/// Header carrying the session identifier in both directions.
pub const MCP_SESSION_ID: &str = "mcp-session-id";

/// POST {path} - Handle one JSON-RPC message.
pub async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = match JsonRpcRequest::parse(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected malformed message: {e}");
            return rpc_error(Value::Null, &e);
        }
    };

    let request_id = request.id.clone().unwrap_or(Value::Null);
    let method = request.method.clone();

    let dispatched = match dispatch(&state, session_header(&headers), request).await {
        Ok(dispatched) => dispatched,
        Err(e) => {
            tracing::warn!(%method, "Rejected request: {e}");
            return rpc_error(request_id, &e);
        }
    };

    let mut response = match dispatched.response {
        None => StatusCode::ACCEPTED.into_response(),
        Some(reply) => frame(&state, &reply),
    };
    if let Some(session) = dispatched.session.as_deref() {
        attach_session(&mut response, session);
    }
    response
}

/// DELETE {path} - Terminate a session.
pub async fn delete_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.config.stateless {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let Some(raw) = session_header(&headers) else {
        return rpc_error(Value::Null, &SessionError::NoActiveSession);
    };
    if state.sessions.close(&SessionId::from(raw)).await {
        StatusCode::OK.into_response()
    } else {
        rpc_error(Value::Null, &SessionError::SessionNotFound(raw.to_string()))
    }
}

/// GET {path} - Server-initiated streams are not offered.
pub async fn get_handler() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST, DELETE")],
    )
        .into_response()
}

/// Fallback for every path other than the MCP endpoint.
pub async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": format!("Not found: {}", uri.path()) })),
    )
        .into_response()
}

fn session_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(MCP_SESSION_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn attach_session(response: &mut Response, session: &Session) {
    if let Ok(value) = HeaderValue::from_str(session.id().as_str()) {
        response.headers_mut().insert(MCP_SESSION_ID, value);
    }
}

/// Frame a reply according to the configured response mode.
fn frame(state: &AppState, reply: &JsonRpcResponse) -> Response {
    if state.config.json_response {
        return Json(reply).into_response();
    }
    match sse::format_sse_data(reply) {
        Some(data) => sse::single_message(data).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Transport-level rejection: always plain JSON.
fn rpc_error(id: Value, err: &SessionError) -> Response {
    (err.status(), Json(JsonRpcResponse::failure(id, err))).into_response()
}
