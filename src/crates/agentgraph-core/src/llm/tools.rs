//! Tool definitions advertised to the reasoning service

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Description of a callable tool, as the reasoning service sees it
///
/// ```rust
/// use agentgraph_core::llm::ToolDefinition;
/// use serde_json::json;
///
/// let search = ToolDefinition::new("search", "Search the web for current information")
///     .with_parameters(json!({
///         "type": "object",
///         "properties": {"query": {"type": "string"}},
///         "required": ["query"]
///     }));
/// assert_eq!(search.parameters["required"][0], "query");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,

    /// What the tool does; the model uses this to decide when to call it
    pub description: String,

    /// JSON Schema of the arguments object
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a definition taking no arguments
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: json!({"type": "object", "properties": {}}),
        }
    }

    /// Set the arguments schema
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }
}
