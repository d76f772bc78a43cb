//! Tools - the actions an agent can request
//!
//! A [`Tool`] is a named async function from a JSON arguments object to a JSON
//! result. Tools are collected in a [`ToolRegistry`], which implements
//! [`ToolService`], the capability the `tools` node calls once per pending
//! tool call.
//!
//! ```text
//! assistant message                ToolService::invoke(name, args)
//!   tool_calls: [search{query}] ─────────────► ToolRegistry ─► SearchTool::execute
//! ```
//!
//! # Implementing a Tool
//!
//! ```rust
//! use agentgraph_prebuilt::{Tool, ToolInput, ToolOutput};
//! use async_trait::async_trait;
//! use serde_json::{json, Value};
//!
//! struct Calculator;
//!
//! #[async_trait]
//! impl Tool for Calculator {
//!     fn name(&self) -> &str {
//!         "add"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Add two integers"
//!     }
//!
//!     fn input_schema(&self) -> Option<Value> {
//!         Some(json!({
//!             "type": "object",
//!             "properties": {"a": {"type": "integer"}, "b": {"type": "integer"}},
//!             "required": ["a", "b"]
//!         }))
//!     }
//!
//!     async fn execute(&self, input: ToolInput) -> agentgraph_prebuilt::Result<ToolOutput> {
//!         let a = input["a"].as_i64().unwrap_or_default();
//!         let b = input["b"].as_i64().unwrap_or_default();
//!         Ok(json!(a + b))
//!     }
//! }
//! ```
//!
//! Arguments are checked against the `required` list of the input schema
//! before `execute` runs.

use crate::error::{PrebuiltError, Result};
use agentgraph_core::llm::ToolDefinition;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tool arguments
pub type ToolInput = Value;

/// Tool result payload
pub type ToolOutput = Value;

/// A callable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool description
    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn input_schema(&self) -> Option<Value> {
        None
    }

    /// Execute the tool with the given input
    async fn execute(&self, input: ToolInput) -> Result<ToolOutput>;

    /// Validate input before execution
    ///
    /// The default checks that every property listed under `required` in
    /// [`input_schema`](Tool::input_schema) is present.
    fn validate_input(&self, input: &ToolInput) -> Result<()> {
        match self.input_schema() {
            Some(schema) => check_required(&schema, input),
            None => Ok(()),
        }
    }

    /// Definition advertised to the reasoning service
    fn definition(&self) -> ToolDefinition {
        let definition = ToolDefinition::new(self.name(), self.description());
        match self.input_schema() {
            Some(schema) => definition.with_parameters(schema),
            None => definition,
        }
    }
}

fn check_required(schema: &Value, input: &ToolInput) -> Result<()> {
    let required = match schema.get("required").and_then(Value::as_array) {
        Some(required) => required,
        None => return Ok(()),
    };

    let object = input
        .as_object()
        .ok_or_else(|| PrebuiltError::InvalidInput("arguments must be a JSON object".into()))?;

    for field in required.iter().filter_map(Value::as_str) {
        if !object.contains_key(field) {
            return Err(PrebuiltError::InvalidInput(format!(
                "missing required field '{}'",
                field
            )));
        }
    }
    Ok(())
}

/// The tool-service capability: run a named tool on some arguments
#[async_trait]
pub trait ToolService: Send + Sync {
    /// Invoke `name` with `args`
    async fn invoke(&self, name: &str, args: ToolInput) -> Result<ToolOutput>;

    /// Definitions of every tool this service can run
    fn definitions(&self) -> Vec<ToolDefinition> {
        Vec::new()
    }
}

/// Tool registry for managing multiple tools
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `tools`
    pub fn from_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// List all tool names, sorted
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: ToolInput) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| PrebuiltError::ToolNotFound(name.to_string()))?;

        tool.validate_input(&input)?;
        debug!(tool = name, "Executing tool");
        tool.execute(input).await
    }
}

#[async_trait]
impl ToolService for ToolRegistry {
    async fn invoke(&self, name: &str, args: ToolInput) -> Result<ToolOutput> {
        self.execute(name, args).await
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools()
            .iter()
            .filter_map(|name| self.get(name))
            .map(|tool| tool.definition())
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_tools())
            .finish()
    }
}
