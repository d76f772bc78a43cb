//! Command line arguments

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agentgraph")]
#[command(about = "Chat with a tool-using agent from the terminal", long_about = None)]
#[command(version)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "agentgraph.toml")]
    pub config: PathBuf,

    /// Model identifier
    #[arg(short, long, env = "AGENTGRAPH_MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Transport retries inside the reasoning service client
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// OpenAI-compatible endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Conversation thread id
    #[arg(short, long)]
    pub thread: Option<String>,

    /// System prompt sent ahead of the conversation
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Maximum node executions per turn
    #[arg(long)]
    pub recursion_limit: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Disable the web search tool even when an API key is available
    #[arg(long)]
    pub no_tools: bool,
}

impl Args {
    /// Override file settings with the flags that were given
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_retries) = self.max_retries {
            config.llm.max_retries = max_retries;
        }
        if let Some(base_url) = &self.base_url {
            config.llm.base_url = base_url.clone();
        }
        if let Some(thread) = &self.thread {
            config.agent.thread_id = thread.clone();
        }
        if let Some(prompt) = &self.system_prompt {
            config.agent.system_prompt = Some(prompt.clone());
        }
        if let Some(limit) = self.recursion_limit {
            config.agent.recursion_limit = limit;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "agentgraph",
            "--model",
            "llama-3.3-70b-versatile",
            "--thread",
            "work",
            "--recursion-limit",
            "8",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.agent.thread_id, "work");
        assert_eq!(config.agent.recursion_limit, 8);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.agent.sentinel, "bye");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["agentgraph", "--config", "custom.toml"]).unwrap();
        let mut config = AppConfig::default();
        config.llm.temperature = 0.5;

        args.apply(&mut config);

        assert_eq!(args.config, PathBuf::from("custom.toml"));
        assert_eq!(config.llm.temperature, 0.5);
        assert!(!args.no_tools);
    }
}
