//! Conversation state threaded through every node
//!
//! [`ConversationState`] is an append-only, ordered sequence of messages.
//! Nodes never replace it; they return a [`StateUpdate`] whose messages the
//! executor appends in order. Insertion order is conversation order.

use crate::messages::{Message, ToolCall};
use serde::{Deserialize, Serialize};

/// Ordered conversation history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state from existing messages
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Builder-style append of a single message
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Append every message of `update`, preserving their order
    pub fn apply(&mut self, update: StateUpdate) {
        self.messages.extend(update.messages);
    }

    /// Append the messages of another state after this one's
    pub fn extend(&mut self, other: ConversationState) {
        self.messages.extend(other.messages);
    }

    /// All messages in conversation order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the state, returning its messages
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// The most recent message
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool calls requested by the last message, in request order
    ///
    /// Empty when the conversation is empty or the last message requested nothing.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.last_message()
            .map(|msg| msg.tool_calls.as_slice())
            .unwrap_or(&[])
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if there are no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for ConversationState {
    fn from(messages: Vec<Message>) -> Self {
        Self::from_messages(messages)
    }
}

/// Partial update returned by a node: messages to append
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    /// Messages to append, in order
    pub messages: Vec<Message>,
}

impl StateUpdate {
    /// An update that appends nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// An update appending a single message
    pub fn message(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }

    /// An update appending several messages
    pub fn messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}
