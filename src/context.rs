//! Per-request context handed to tool handlers

use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, SessionError};
use crate::session::{Session, SessionId};

/// Read-only view of the request being served. Built by the dispatcher for
/// each call and dropped once the handler returns.
#[derive(Debug, Clone)]
pub struct RequestContext {
    session: Option<Arc<Session>>,
    request_id: Value,
}

impl RequestContext {
    pub fn new(session: Option<Arc<Session>>, request_id: Value) -> Self {
        Self {
            session,
            request_id,
        }
    }

    /// The resolved session, or `NoActiveSession`.
    pub fn session(&self) -> Result<&Session> {
        self.session.as_deref().ok_or(SessionError::NoActiveSession)
    }

    /// Identifier of the caller's session.
    pub fn session_id(&self) -> Result<&SessionId> {
        let id = self.session()?.id();
        if id.as_str().is_empty() {
            return Err(SessionError::NoActiveSession);
        }
        Ok(id)
    }

    pub fn request_id(&self) -> &Value {
        &self.request_id
    }
}
