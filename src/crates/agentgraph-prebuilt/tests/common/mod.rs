//! Scripted reasoning and tool services shared by the integration tests

#![allow(dead_code)]

use agentgraph_core::llm::{ChatModel, ChatRequest};
use agentgraph_core::{Message, ModelError};
use agentgraph_prebuilt::{PrebuiltError, ToolInput, ToolOutput, ToolService};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted replies and records every request it receives
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<Message, ModelError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<Message, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn chat(&self, request: ChatRequest) -> Result<Message, ModelError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Upstream("no scripted reply left".into())))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Tool service answering `search` with a canned result; anything else fails
#[derive(Default)]
pub struct FakeSearch {
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeSearch {
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolService for FakeSearch {
    async fn invoke(&self, name: &str, args: ToolInput) -> agentgraph_prebuilt::Result<ToolOutput> {
        self.calls.lock().unwrap().push((name.to_string(), args.clone()));
        match name {
            "search" => Ok(json!({"results": [format!("result for {}", args["query"].as_str().unwrap_or(""))]})),
            other => Err(PrebuiltError::ToolNotFound(other.to_string())),
        }
    }
}

/// Shares one `FakeSearch` between the agent and the test body
pub struct SharedSearch(pub Arc<FakeSearch>);

#[async_trait]
impl ToolService for SharedSearch {
    async fn invoke(&self, name: &str, args: ToolInput) -> agentgraph_prebuilt::Result<ToolOutput> {
        self.0.invoke(name, args).await
    }
}
