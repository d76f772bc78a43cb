//! `search` tool backed by the Tavily web search API

use crate::config::SearchSettings;
use agentgraph_prebuilt::{PrebuiltError, Result, Tool, ToolInput, ToolOutput};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// Web search through Tavily
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_results: u32,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>, settings: &SearchSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_results: settings.max_results,
        }
    }

    /// Build the tool from the configured environment variable, if it is set
    pub fn from_env(settings: &SearchSettings) -> Option<Self> {
        std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Self::new(key, settings))
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: u32,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Serialize, Deserialize)]
struct SearchResult {
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl Tool for TavilySearch {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search the web for current information"
    }

    fn input_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        }))
    }

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput> {
        let query = input["query"]
            .as_str()
            .ok_or_else(|| PrebuiltError::InvalidInput("'query' must be a string".into()))?;
        debug!(%query, "Searching the web");

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SearchRequest {
                query,
                max_results: self.max_results,
            })
            .send()
            .await
            .map_err(|e| PrebuiltError::ToolExecution(format!("search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrebuiltError::ToolExecution(format!(
                "search returned {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| PrebuiltError::ToolExecution(format!("invalid search response: {}", e)))?;

        Ok(json!({ "query": query, "results": parsed.results }))
    }
}
