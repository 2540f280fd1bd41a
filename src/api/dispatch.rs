//! JSON-RPC dispatch for MCP requests
//!
//! Resolves the session a message belongs to, then routes it by method.
//! Transport-level rejections (no session, unknown session) come back as
//! `Err`; everything else is a JSON-RPC response, possibly carrying an error.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::context::RequestContext;
use crate::error::{Result, SessionError};
use crate::protocol::{
    negotiate_version, CallToolParams, CallToolResult, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use crate::server::state::AppState;
use crate::session::{Session, SessionId};

/// Outcome of dispatching one message.
#[derive(Debug)]
pub struct Dispatched {
    /// Session the message was served in (new for `initialize`)
    pub session: Option<Arc<Session>>,
    /// `None` for notifications
    pub response: Option<JsonRpcResponse>,
}

/// Dispatch a parsed message. `session_header` is the raw `Mcp-Session-Id`
/// value sent by the client, if any.
pub async fn dispatch(
    state: &AppState,
    session_header: Option<&str>,
    request: JsonRpcRequest,
) -> Result<Dispatched> {
    if request.method == "initialize" {
        return initialize(state, request).await;
    }

    let session = resolve_session(state, session_header).await?;

    if request.is_notification() {
        tracing::debug!(method = %request.method, "Notification accepted");
        return Ok(Dispatched {
            session,
            response: None,
        });
    }
    let id = request.id.clone().unwrap_or(Value::Null);

    let result = match request.method.as_str() {
        "ping" => Ok(json!({})),
        "tools/list" => list_tools(state),
        "offerings/list" => Ok(offerings()),
        "tools/call" => call_tool(state, &session, id.clone(), request.params).await,
        other => Err(SessionError::MethodNotFound(other.to_string())),
    };

    let response = match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            tracing::debug!(method = %request.method, "Request failed: {e}");
            JsonRpcResponse::failure(id, &e)
        }
    };

    Ok(Dispatched {
        session,
        response: Some(response),
    })
}

async fn resolve_session(
    state: &AppState,
    session_header: Option<&str>,
) -> Result<Option<Arc<Session>>> {
    if state.config.stateless {
        return Ok(None);
    }
    let raw = session_header
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SessionError::NoActiveSession)?;
    let id = SessionId::from(raw);
    match state.sessions.get(&id).await {
        Some(session) => Ok(Some(session)),
        None => Err(SessionError::SessionNotFound(raw.to_string())),
    }
}

async fn initialize(state: &AppState, request: JsonRpcRequest) -> Result<Dispatched> {
    // A session the client never hears about would only linger until expiry.
    let Some(id) = request.id else {
        return Err(SessionError::InvalidRequest(
            "initialize must carry an id".to_string(),
        ));
    };
    let params: InitializeParams = match request.params {
        Some(p) => serde_json::from_value(p)
            .map_err(|e| SessionError::InvalidRequest(format!("initialize params: {e}")))?,
        None => InitializeParams::default(),
    };
    let version = negotiate_version(params.protocol_version.as_deref());

    let session = if state.config.stateless {
        None
    } else {
        Some(state.sessions.create(version, params.client_info).await)
    };

    let result = InitializeResult {
        protocol_version: version.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: false,
            }),
        },
        server_info: ServerInfo {
            name: state.config.server_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };
    let response = match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::failure(id, &SessionError::Serialization(e)),
    };

    Ok(Dispatched {
        session,
        response: Some(response),
    })
}

/// Feature summary requested by hub clients ahead of `tools/list`.
fn offerings() -> Value {
    json!({
        "offerings": {
            "tools": true,
            "prompts": false,
            "resources": false,
            "logging": false
        }
    })
}

fn list_tools(state: &AppState) -> Result<Value> {
    let result = ListToolsResult {
        tools: state.tools.definitions(),
    };
    Ok(serde_json::to_value(result)?)
}

async fn call_tool(
    state: &AppState,
    session: &Option<Arc<Session>>,
    request_id: Value,
    params: Option<Value>,
) -> Result<Value> {
    let params: CallToolParams = params
        .ok_or_else(|| SessionError::InvalidParams("missing params".to_string()))
        .and_then(|p| {
            serde_json::from_value(p).map_err(|e| SessionError::InvalidParams(e.to_string()))
        })?;

    let tool = state
        .tools
        .get(&params.name)
        .ok_or_else(|| SessionError::ToolNotFound(params.name.clone()))?;

    let ctx = RequestContext::new(session.clone(), request_id);
    let arguments = params.arguments.unwrap_or_else(|| json!({}));

    let result = match tool.call(&ctx, &arguments).await {
        Ok(value) => CallToolResult::structured(value),
        Err(e) => {
            tracing::warn!(
                tool = %params.name,
                request_id = %ctx.request_id(),
                "Tool call failed: {e}"
            );
            CallToolResult::error(e.to_string())
        }
    };
    Ok(serde_json::to_value(result)?)
}
