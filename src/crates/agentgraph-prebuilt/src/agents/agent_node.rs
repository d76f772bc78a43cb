//! The `agent` node: one call to the reasoning service per execution

use super::AGENT;
use agentgraph_core::llm::{ChatModel, ChatRequest, ToolDefinition};
use agentgraph_core::{
    ConversationState, GraphError, Message, Node, RetryPolicy, Role, StateUpdate,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Node that sends the conversation to a [`ChatModel`] and appends its reply
///
/// Rate-limit errors are retried according to the node's [`RetryPolicy`]
/// (once, by default). A failure that survives the policy becomes
/// [`GraphError::Upstream`].
///
/// A system prompt, when set, is prepended to the request only. It is never
/// written to the conversation state, so checkpoints hold the conversation
/// exactly as the user saw it.
#[derive(Clone)]
pub struct AgentNode {
    model: Arc<dyn ChatModel>,
    tools: Vec<ToolDefinition>,
    system_prompt: Option<String>,
    retry_policy: RetryPolicy,
}

impl AgentNode {
    /// Create an agent node calling `model`
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            tools: Vec::new(),
            system_prompt: None,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Advertise tools to the model
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Prepend a system message to every request
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Replace the rate-limit retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    fn request(&self, state: &ConversationState) -> ChatRequest {
        let mut messages = Vec::with_capacity(state.len() + 1);

        if let Some(prompt) = &self.system_prompt {
            let has_system = state
                .messages()
                .first()
                .map(|m| m.role == Role::System)
                .unwrap_or(false);
            if !has_system {
                messages.push(Message::system(prompt.clone()));
            }
        }
        messages.extend_from_slice(state.messages());

        ChatRequest::new(messages).with_tools(self.tools.clone())
    }
}

#[async_trait]
impl Node for AgentNode {
    async fn execute(&self, state: &ConversationState) -> agentgraph_core::Result<StateUpdate> {
        let request = self.request(state);

        info!(model = self.model.model_name(), messages = request.messages.len(), "Calling LLM");
        let reply = self
            .retry_policy
            .execute(|| self.model.chat(request.clone()))
            .await
            .map_err(|err| GraphError::upstream(AGENT, err))?;

        Ok(StateUpdate::message(reply))
    }
}

impl std::fmt::Debug for AgentNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentNode")
            .field("model", &self.model.model_name())
            .field("tools", &self.tools.len())
            .field("system_prompt", &self.system_prompt.is_some())
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}
