//! # agentgraph
//!
//! Terminal chat with a tool-using agent.
//!
//! Reads one line at a time, runs it through the agent graph under a fixed
//! thread id and prints the reply, until the sentinel (`bye` by default) is
//! entered. The reasoning service is any OpenAI-compatible endpoint (Groq by
//! default, key in `GROQ_API_KEY`); a `search` tool is added when
//! `TAVILY_API_KEY` is set.

mod cli;
mod config;
mod repl;
mod search;

use agentgraph_checkpoint::InMemoryCheckpointSaver;
use agentgraph_core::llm::ChatModel;
use agentgraph_core::{CompiledGraph, RetryPolicy};
use agentgraph_prebuilt::{create_chat_agent, create_tool_agent, Tool, ToolRegistry};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::Args;
use config::AppConfig;
use llm::{OpenAiCompatibleClient, RemoteLlmConfig};
use repl::{run_repl, ReplOptions};
use search::TavilySearch;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(&args.config).await?;
    args.apply(&mut config);

    init_tracing(&config.logging.level)?;

    let model = build_model(&config)?;
    let search = if args.no_tools {
        None
    } else {
        TavilySearch::from_env(&config.search)
    };
    let agent = build_agent(model, search, &config)?;

    let options = ReplOptions {
        thread_id: config.agent.thread_id.clone(),
        sentinel: config.agent.sentinel.clone(),
    };
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    run_repl(&agent, &options, stdin, &mut stdout).await
}

/// Log to stderr so the conversation on stdout stays clean
fn init_tracing(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .map_err(|_| anyhow!("Invalid log level: {}", level))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_model(config: &AppConfig) -> Result<Arc<dyn ChatModel>> {
    let llm = &config.llm;
    let remote = RemoteLlmConfig::from_env(&llm.api_key_env, llm.base_url.clone(), llm.model.clone())
        .with_context(|| format!("Set {} to your API key", llm.api_key_env))?
        .with_chat_config(&llm.chat_config());

    info!(model = %remote.model, base_url = %remote.base_url, "Using reasoning service");
    Ok(Arc::new(OpenAiCompatibleClient::new(remote)?))
}

fn build_agent(
    model: Arc<dyn ChatModel>,
    search: Option<TavilySearch>,
    config: &AppConfig,
) -> Result<CompiledGraph> {
    let settings = &config.agent;

    let agent = match search {
        Some(search) => {
            info!("Web search enabled");
            let tools = ToolRegistry::from_tools([Arc::new(search) as Arc<dyn Tool>]);
            create_tool_agent(model, tools).with_tool_error_handling(settings.handle_tool_errors)
        }
        None => create_chat_agent(model),
    };

    let mut agent = agent
        .with_checkpointer(Arc::new(
            InMemoryCheckpointSaver::new().with_history_limit(settings.checkpoint_history),
        ))
        .with_retry_policy(
            RetryPolicy::default()
                .with_default_retry_after(Duration::from_secs(settings.rate_limit_default_secs)),
        )
        .with_recursion_limit(settings.recursion_limit);
    if let Some(prompt) = &settings.system_prompt {
        agent = agent.with_system_prompt(prompt.clone());
    }

    Ok(agent.build()?)
}
