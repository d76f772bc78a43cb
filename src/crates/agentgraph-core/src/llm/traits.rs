//! The [`ChatModel`] trait

use super::config::ChatRequest;
use crate::error::ModelError;
use crate::messages::Message;
use async_trait::async_trait;

/// A reasoning service that answers a conversation with one assistant message
///
/// The returned message may carry tool calls; the caller decides whether to
/// execute them. Implementations must be `Send + Sync` so a single client can
/// be shared across graph runs behind an `Arc<dyn ChatModel>`.
///
/// # Errors
///
/// Return [`ModelError::RateLimited`] when the service asks the caller to back
/// off, so the agent's retry policy can wait and try again. Everything else is
/// [`ModelError::Upstream`].
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate the next assistant message
    async fn chat(&self, request: ChatRequest) -> Result<Message, ModelError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Fixed;

    #[async_trait]
    impl ChatModel for Fixed {
        async fn chat(&self, _request: ChatRequest) -> Result<Message, ModelError> {
            Ok(Message::assistant("fixed"))
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let model: Arc<dyn ChatModel> = Arc::new(Fixed);
        let reply = model
            .chat(ChatRequest::new(vec![Message::user("hi")]))
            .await
            .unwrap();

        assert_eq!(reply.content, "fixed");
        assert_eq!(model.model_name(), "unknown");
    }
}
