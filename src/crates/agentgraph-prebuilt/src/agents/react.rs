//! Agent graph factories and the `should_continue` router
//!
//! # Example
//!
//! ```rust,no_run
//! use agentgraph_checkpoint::InMemoryCheckpointSaver;
//! use agentgraph_core::llm::ChatModel;
//! use agentgraph_core::{ConversationState, Message};
//! use agentgraph_prebuilt::{create_tool_agent, ToolRegistry};
//! use std::sync::Arc;
//!
//! # async fn example(model: Arc<dyn ChatModel>, tools: ToolRegistry) -> Result<(), Box<dyn std::error::Error>> {
//! let agent = create_tool_agent(model, tools)
//!     .with_checkpointer(Arc::new(InMemoryCheckpointSaver::new()))
//!     .with_system_prompt("You are a helpful assistant.")
//!     .with_recursion_limit(25)
//!     .build()?;
//!
//! let input = ConversationState::new().with_message(Message::user("What's the weather in Paris?"));
//! let result = agent.run(input, Some("1")).await?;
//! println!("{}", result.last_message().map(|m| m.content.as_str()).unwrap_or(""));
//! # Ok(())
//! # }
//! ```

use super::{AgentNode, AGENT, TOOLS};
use crate::error::Result;
use crate::tool_node::ToolNode;
use crate::tools::ToolService;
use agentgraph_checkpoint::CheckpointSaver;
use agentgraph_core::llm::ChatModel;
use agentgraph_core::{CompiledGraph, ConversationState, NodeId, RetryPolicy, StateGraph, END, START};
use std::sync::Arc;

/// Route to [`TOOLS`] when the last message requests tool calls, else [`END`]
///
/// Evaluated after every `agent` execution.
pub fn should_continue(state: &ConversationState) -> NodeId {
    if state.pending_tool_calls().is_empty() {
        END.to_string()
    } else {
        TOOLS.to_string()
    }
}

/// Configuration for an agent graph
pub struct AgentConfig {
    model: Arc<dyn ChatModel>,
    tools: Option<Arc<dyn ToolService>>,
    checkpointer: Option<Arc<dyn CheckpointSaver>>,
    system_prompt: Option<String>,
    retry_policy: RetryPolicy,
    recursion_limit: Option<usize>,
    handle_tool_errors: bool,
}

impl AgentConfig {
    /// Create a configuration for a chat agent without tools
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            tools: None,
            checkpointer: None,
            system_prompt: None,
            retry_policy: RetryPolicy::default(),
            recursion_limit: None,
            handle_tool_errors: false,
        }
    }

    /// Give the agent a tool service, adding the `tools` loop
    pub fn with_tools(mut self, tools: Arc<dyn ToolService>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Persist conversation state per thread
    pub fn with_checkpointer(mut self, saver: Arc<dyn CheckpointSaver>) -> Self {
        self.checkpointer = Some(saver);
        self
    }

    /// Set system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Replace the rate-limit retry policy of the `agent` node
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Cap node executions per run
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Report tool failures to the model instead of failing the run
    pub fn with_tool_error_handling(mut self, handle_errors: bool) -> Self {
        self.handle_tool_errors = handle_errors;
        self
    }

    /// Build the compiled agent graph
    pub fn build(self) -> Result<CompiledGraph> {
        let mut agent = AgentNode::new(self.model).with_retry_policy(self.retry_policy);
        if let Some(prompt) = self.system_prompt {
            agent = agent.with_system_prompt(prompt);
        }

        let mut graph = StateGraph::new();
        graph.add_edge(START, AGENT);

        match self.tools {
            Some(tools) => {
                agent = agent.with_tools(tools.definitions());
                let tool_node = ToolNode::new(tools).with_error_handling(self.handle_tool_errors);

                graph
                    .add_node_with_executor(AGENT, Arc::new(agent))
                    .add_node_with_executor(TOOLS, Arc::new(tool_node))
                    .add_conditional_edge(AGENT, should_continue, [TOOLS, END])
                    .add_edge(TOOLS, AGENT);
            }
            None => {
                graph
                    .add_node_with_executor(AGENT, Arc::new(agent))
                    .add_edge(AGENT, END);
            }
        }

        let mut compiled = graph.compile()?;
        if let Some(saver) = self.checkpointer {
            compiled = compiled.with_checkpointer(saver);
        }
        if let Some(limit) = self.recursion_limit {
            compiled = compiled.with_recursion_limit(limit);
        }
        Ok(compiled)
    }
}

/// Create a chat agent: `START -> agent -> END`
pub fn create_chat_agent(model: Arc<dyn ChatModel>) -> AgentConfig {
    AgentConfig::new(model)
}

/// Create a tool-calling agent looping `agent -> tools -> agent` until the model answers
pub fn create_tool_agent(model: Arc<dyn ChatModel>, tools: impl ToolService + 'static) -> AgentConfig {
    AgentConfig::new(model).with_tools(Arc::new(tools))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;
    use agentgraph_core::llm::ChatRequest;
    use agentgraph_core::{Message, ModelError, ToolCall};
    use async_trait::async_trait;
    use serde_json::json;

    struct Silent;

    #[async_trait]
    impl ChatModel for Silent {
        async fn chat(&self, _request: ChatRequest) -> std::result::Result<Message, ModelError> {
            Ok(Message::assistant("..."))
        }
    }

    #[test]
    fn test_should_continue_with_tool_calls() {
        let state = ConversationState::new()
            .with_message(Message::user("Hello"))
            .with_message(
                Message::assistant("").with_tool_calls(vec![ToolCall::new("c1", "search", json!({"query": "x"}))]),
            );
        assert_eq!(should_continue(&state), TOOLS);
    }

    #[test]
    fn test_should_continue_without_tool_calls() {
        let state = ConversationState::new()
            .with_message(Message::user("Hello"))
            .with_message(Message::assistant("Hi"));
        assert_eq!(should_continue(&state), END);
    }

    #[test]
    fn test_chat_agent_shape() {
        let graph = create_chat_agent(Arc::new(Silent)).build().unwrap();
        assert_eq!(graph.graph().nodes.names(), vec![AGENT.to_string()]);
    }

    #[test]
    fn test_tool_agent_shape() {
        let graph = create_tool_agent(Arc::new(Silent), ToolRegistry::new())
            .with_recursion_limit(10)
            .build()
            .unwrap();

        assert_eq!(
            graph.graph().nodes.names(),
            vec![AGENT.to_string(), TOOLS.to_string()]
        );
        assert!(graph.graph().edges_from(AGENT)[0].is_conditional());
        assert_eq!(graph.recursion_limit(), Some(10));
    }
}
