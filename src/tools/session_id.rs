use async_trait::async_trait;
use serde_json::{json, Value};

use super::ToolHandler;
use crate::context::RequestContext;
use crate::error::Result;

/// `get_session_id`: report the caller's session identifier.
pub struct GetSessionId;

#[async_trait]
impl ToolHandler for GetSessionId {
    fn name(&self) -> &str {
        "get_session_id"
    }

    fn description(&self) -> &str {
        "Return the identifier of the caller's current session"
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn call(&self, ctx: &RequestContext, _arguments: &Value) -> Result<Value> {
        let id = ctx.session_id()?;
        Ok(json!({ "session_id": id.as_str() }))
    }
}
