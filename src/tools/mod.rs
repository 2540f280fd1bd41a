//! Tool registry
//!
//! Remotely invocable operations are registered by name at startup. The
//! dispatcher looks handlers up here for every `tools/call`.

pub mod session_id;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::RequestContext;
use crate::error::Result;
use crate::protocol::McpTool;

pub use session_id::GetSessionId;

/// A named operation callable through `tools/call`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool name (must be unique within registry)
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the tool arguments
    fn input_schema(&self) -> Value;

    /// Run the tool. Errors are reported to the caller as a tool error
    /// result, not a protocol error.
    async fn call(&self, ctx: &RequestContext, arguments: &Value) -> Result<Value>;
}

/// Name-to-handler table, immutable once serving starts.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GetSessionId));
        registry
    }

    /// Register a tool, replacing any previous one with the same name.
    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) {
        let name = tool.name().to_string();
        tracing::debug!("Registering tool: {}", name);
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!("Tool '{}' registered twice; keeping the latest", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).cloned()
    }

    /// Tool definitions for `tools/list`, sorted by name.
    pub fn definitions(&self) -> Vec<McpTool> {
        self.tools
            .values()
            .map(|tool| McpTool {
                name: tool.name().to_string(),
                description: Some(tool.description().to_string()),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
