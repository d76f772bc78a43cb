//! Interactive conversation loop
//!
//! ```text
//! You: Hello
//! AI: Hi! How can I help?
//! You: bye
//! ```
//!
//! Every line is sent as a `user` message to the agent under one thread id, so
//! the checkpointer carries the conversation from turn to turn. A failed turn
//! prints `Error: ...` and the loop continues.

use agentgraph_core::{CompiledGraph, ConversationState, Message};
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::error;

/// Conversation loop settings
#[derive(Debug, Clone)]
pub struct ReplOptions {
    pub thread_id: String,
    /// Input that ends the loop, compared after trimming surrounding
    /// whitespace, so `"  bye "` also exits
    pub sentinel: String,
}

/// Run the loop until the sentinel or end of input; `input` is dropped on return
pub async fn run_repl<R, W>(
    agent: &CompiledGraph,
    options: &ReplOptions,
    input: R,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == options.sentinel {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let turn = ConversationState::new().with_message(Message::user(line));
        let reply = match agent.run(turn, Some(options.thread_id.as_str())).await {
            Ok(state) => {
                let content = state.last_message().map(|m| m.content.as_str()).unwrap_or("");
                format!("AI: {}\n", content)
            }
            Err(err) => {
                error!(thread_id = %options.thread_id, "Turn failed: {}", err);
                format!("Error: {}\n", err)
            }
        };
        output.write_all(reply.as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}
