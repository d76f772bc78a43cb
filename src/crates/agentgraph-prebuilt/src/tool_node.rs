//! ToolNode - executes the tool calls requested by the last message
//!
//! For every pending tool call on the last message, in the order the calls were
//! requested, `ToolNode` invokes the [`ToolService`] and produces exactly one
//! `tool` message carrying the call's id and tool name. All result messages are
//! returned together as a single update.
//!
//! ```text
//! Input state (last message):
//!   assistant  tool_calls: [search#call_1, add#call_2]
//!
//! Update appended by ToolNode:
//!   tool  "<search result>"  tool_call_id: call_1  name: search
//!   tool  "<add result>"     tool_call_id: call_2  name: add
//! ```
//!
//! # Errors
//!
//! Calls run one after another. By default the first failing call aborts the
//! node with [`GraphError::Upstream`]; no partial results are appended. With
//! [`with_error_handling(true)`](ToolNode::with_error_handling) a failure is
//! reported to the model instead, as a tool message whose content is
//! `{"error": "...", "status": "error"}`.
//!
//! Tool calls are never retried.

use crate::agents::TOOLS;
use crate::tools::{Tool, ToolRegistry, ToolService};
use agentgraph_core::{ConversationState, GraphError, Message, Node, StateUpdate, ToolCall};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// ToolNode executes tools based on tool calls in messages
#[derive(Clone)]
pub struct ToolNode {
    service: Arc<dyn ToolService>,
    handle_tool_errors: bool,
}

impl ToolNode {
    /// Create a ToolNode backed by `service`
    pub fn new(service: Arc<dyn ToolService>) -> Self {
        Self {
            service,
            handle_tool_errors: false,
        }
    }

    /// Create a ToolNode from a list of tools
    pub fn from_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self::new(Arc::new(ToolRegistry::from_tools(tools)))
    }

    /// Report tool failures to the model instead of failing the run (default: false)
    pub fn with_error_handling(mut self, handle_errors: bool) -> Self {
        self.handle_tool_errors = handle_errors;
        self
    }

    /// The tool service this node calls
    pub fn service(&self) -> &Arc<dyn ToolService> {
        &self.service
    }

    async fn run_call(&self, call: &ToolCall) -> agentgraph_core::Result<Message> {
        debug!(tool = %call.name, call_id = %call.id, "Invoking tool");

        let content = match self.service.invoke(&call.name, call.args.clone()).await {
            Ok(output) => render(output)?,
            Err(err) if self.handle_tool_errors => {
                warn!(tool = %call.name, call_id = %call.id, "Tool failed: {}", err);
                json!({"error": err.to_string(), "status": "error"}).to_string()
            }
            Err(err) => {
                return Err(GraphError::upstream(
                    TOOLS,
                    format!("tool '{}' failed: {}", call.name, err),
                ))
            }
        };

        Ok(Message::tool(content, call.id.clone()).with_name(call.name.clone()))
    }
}

/// Tool output as message text: strings verbatim, anything else as JSON
fn render(output: Value) -> agentgraph_core::Result<String> {
    match output {
        Value::String(text) => Ok(text),
        other => Ok(serde_json::to_string(&other)?),
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn execute(&self, state: &ConversationState) -> agentgraph_core::Result<StateUpdate> {
        let calls = state.pending_tool_calls();
        if calls.is_empty() {
            debug!("No pending tool calls");
            return Ok(StateUpdate::empty());
        }

        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.run_call(call).await?);
        }
        Ok(StateUpdate::messages(results))
    }
}

impl std::fmt::Debug for ToolNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolNode")
            .field("tools", &self.service.definitions().len())
            .field("handle_tool_errors", &self.handle_tool_errors)
            .finish()
    }
}
