//! Tests for CompiledGraph

use crate::error::GraphError;
use crate::graph::{END, START};
use crate::messages::Message;
use crate::state::{ConversationState, StateUpdate};
use crate::StateGraph;
use agentgraph_checkpoint::{CheckpointSaver, InMemoryCheckpointSaver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn user(text: &str) -> ConversationState {
    ConversationState::new().with_message(Message::user(text))
}

fn contents(state: &ConversationState) -> Vec<&str> {
    state.messages().iter().map(|m| m.content.as_str()).collect()
}

/// START -> echo -> END, replying with the message count it saw
fn counting_graph() -> StateGraph {
    let mut graph = StateGraph::new();
    graph.add_node("echo", |state| {
        Box::pin(async move {
            Ok(StateUpdate::message(Message::assistant(format!("seen {}", state.len()))))
        })
    });
    graph.add_edge(START, "echo");
    graph.add_edge("echo", END);
    graph
}

#[tokio::test]
async fn test_single_node_run() {
    let compiled = counting_graph().compile().unwrap();
    let result = compiled.invoke(user("Hello")).await.unwrap();

    assert_eq!(contents(&result), vec!["Hello", "seen 1"]);
}

#[tokio::test]
async fn test_nodes_run_in_edge_order() {
    let mut graph = StateGraph::new();
    for name in ["first", "second", "third"] {
        graph.add_node(name, move |_| {
            Box::pin(async move { Ok(StateUpdate::message(Message::assistant(name))) })
        });
    }
    graph
        .add_edge(START, "first")
        .add_edge("first", "second")
        .add_edge("second", "third")
        .add_edge("third", END);

    let result = graph.compile().unwrap().invoke(user("go")).await.unwrap();
    assert_eq!(contents(&result), vec!["go", "first", "second", "third"]);
}

#[tokio::test]
async fn test_conditional_loop_terminates() {
    let mut graph = StateGraph::new();
    graph.add_node("step", |_| {
        Box::pin(async move { Ok(StateUpdate::message(Message::assistant("tick"))) })
    });
    graph.add_edge(START, "step");
    graph.add_conditional_edge(
        "step",
        |state| {
            if state.len() < 4 {
                "step".to_string()
            } else {
                END.to_string()
            }
        },
        ["step", END],
    );

    let result = graph.compile().unwrap().invoke(user("go")).await.unwrap();
    assert_eq!(contents(&result), vec!["go", "tick", "tick", "tick"]);
}

#[tokio::test]
async fn test_router_to_unknown_destination() {
    let mut graph = StateGraph::new();
    graph.add_node("agent", |_| {
        Box::pin(async move { Ok(StateUpdate::message(Message::assistant("hi"))) })
    });
    graph.add_edge(START, "agent");
    graph.add_conditional_edge("agent", |_| "nowhere".to_string(), [END]);

    let err = graph.compile().unwrap().invoke(user("go")).await.unwrap_err();
    match err {
        GraphError::Routing { node, destination } => {
            assert_eq!(node, "agent");
            assert_eq!(destination, "nowhere");
        }
        other => panic!("expected routing error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_router_to_undeclared_branch() {
    let mut graph = StateGraph::new();
    graph.add_node("agent", |_| Box::pin(async move { Ok(StateUpdate::empty()) }));
    graph.add_node("tools", |_| Box::pin(async move { Ok(StateUpdate::empty()) }));
    graph.add_edge(START, "agent");
    graph.add_conditional_edge("agent", |_| "tools".to_string(), [END]);
    graph.add_edge("tools", END);

    let err = graph.compile().unwrap().invoke(user("go")).await.unwrap_err();
    assert!(matches!(err, GraphError::Routing { .. }));
}

#[tokio::test]
async fn test_empty_input_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut graph = StateGraph::new();
    graph.add_node("agent", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(StateUpdate::empty()) })
    });
    graph.add_edge(START, "agent");
    graph.add_edge("agent", END);

    let err = graph
        .compile()
        .unwrap()
        .invoke(ConversationState::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::EmptyState { ref node } if node == "agent"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_checkpoint_accumulates_across_turns() {
    let saver = Arc::new(InMemoryCheckpointSaver::new());
    let compiled = counting_graph().compile().unwrap().with_checkpointer(saver.clone());

    let first = compiled.run(user("Hi, I'm Bob"), Some("1")).await.unwrap();
    assert_eq!(contents(&first), vec!["Hi, I'm Bob", "seen 1"]);

    let second = compiled.run(user("What's my name?"), Some("1")).await.unwrap();
    assert_eq!(
        contents(&second),
        vec!["Hi, I'm Bob", "seen 1", "What's my name?", "seen 3"]
    );

    let saved = compiled.get_state("1").await.unwrap().unwrap();
    assert_eq!(saved, second);
    assert_eq!(saver.checkpoint_count().await, 2);
}

#[tokio::test]
async fn test_threads_are_isolated() {
    let compiled = counting_graph()
        .compile()
        .unwrap()
        .with_checkpointer(Arc::new(InMemoryCheckpointSaver::new()));

    compiled.run(user("one"), Some("a")).await.unwrap();
    let other = compiled.run(user("two"), Some("b")).await.unwrap();

    assert_eq!(contents(&other), vec!["two", "seen 1"]);
    assert_eq!(compiled.get_state("a").await.unwrap().unwrap().len(), 2);
}

#[tokio::test]
async fn test_run_without_thread_is_stateless() {
    let saver = Arc::new(InMemoryCheckpointSaver::new());
    let compiled = counting_graph().compile().unwrap().with_checkpointer(saver.clone());

    compiled.run(user("one"), None).await.unwrap();
    let result = compiled.run(user("two"), None).await.unwrap();

    assert_eq!(contents(&result), vec!["two", "seen 1"]);
    assert_eq!(saver.thread_count().await, 0);
}

#[tokio::test]
async fn test_failed_run_writes_no_checkpoint() {
    let saver = Arc::new(InMemoryCheckpointSaver::new());

    let mut graph = StateGraph::new();
    graph.add_node("agent", |state| {
        Box::pin(async move {
            if state.len() > 2 {
                Err(GraphError::upstream("agent", "service unavailable"))
            } else {
                Ok(StateUpdate::message(Message::assistant("ok")))
            }
        })
    });
    graph.add_edge(START, "agent");
    graph.add_edge("agent", END);
    let compiled = graph.compile().unwrap().with_checkpointer(saver.clone());

    compiled.run(user("first"), Some("t")).await.unwrap();
    let err = compiled.run(user("second"), Some("t")).await.unwrap_err();
    assert!(matches!(err, GraphError::Upstream { .. }));

    let saved = compiled.get_state("t").await.unwrap().unwrap();
    assert_eq!(contents(&saved), vec!["first", "ok"]);
    assert_eq!(saver.checkpoint_count().await, 1);
}

#[tokio::test]
async fn test_recursion_limit() {
    let mut graph = StateGraph::new();
    graph.add_node("spin", |_| {
        Box::pin(async move { Ok(StateUpdate::message(Message::assistant("again"))) })
    });
    graph.add_edge(START, "spin");
    graph.add_conditional_edge("spin", |_| "spin".to_string(), ["spin", END]);

    let compiled = graph.compile().unwrap().with_recursion_limit(5);
    let err = compiled.invoke(user("go")).await.unwrap_err();

    assert!(matches!(err, GraphError::RecursionLimit { limit: 5 }));
}

#[tokio::test]
async fn test_checkpoint_metadata_counts_steps() {
    let saver = Arc::new(InMemoryCheckpointSaver::new());
    let compiled = counting_graph().compile().unwrap().with_checkpointer(saver.clone());

    compiled.run(user("hi"), Some("s")).await.unwrap();

    let checkpoint = saver.get("s").await.unwrap().unwrap();
    assert_eq!(checkpoint.metadata.step, Some(1));
}

#[tokio::test]
async fn test_get_state_without_checkpointer() {
    let compiled = counting_graph().compile().unwrap();
    assert!(compiled.get_state("any").await.unwrap().is_none());
}

#[tokio::test]
async fn test_blank_thread_rejected_before_any_node() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut graph = StateGraph::new();
    graph.add_node("agent", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(StateUpdate::message(Message::assistant("ok"))) })
    });
    graph.add_edge(START, "agent");
    graph.add_edge("agent", END);

    let saver = Arc::new(InMemoryCheckpointSaver::new());
    let compiled = graph.compile().unwrap().with_checkpointer(saver.clone());

    for thread_id in ["", "  "] {
        let err = compiled.run(user("hi"), Some(thread_id)).await.unwrap_err();
        assert!(matches!(err, GraphError::InvalidThread(ref id) if id == thread_id));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(saver.thread_count().await, 0);

    // without a checkpointer the thread id is not used
    let stateless = counting_graph().compile().unwrap();
    assert!(stateless.run(user("hi"), Some("")).await.is_ok());
}
