use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use stackweave::graph::{
    Connection, GraphStore, KnowledgeBaseConfig, LlmEngineConfig, Node, NodeConfig, Position,
    UserQueryConfig,
};
use stackweave::notify::NoticeHub;
use stackweave::request::WorkflowRequest;
use stackweave::session::{
    CancelHandle, CreditLedger, ExecuteResponse, ExecutionSession, Executor, ExecutorError,
};
use stackweave::types::NodeType;

/// What a [`ScriptedExecutor`] does when the session calls it.
#[derive(Clone, Debug)]
pub enum Script {
    /// Resolve immediately with this answer.
    Answer(String),
    /// Resolve immediately with an empty answer.
    Blank,
    /// Fail immediately with this detail.
    Fail(String),
    /// Never resolve; the caller is expected to cancel.
    Stall,
}

/// In-process executor stand-in driven by a fixed script.
pub struct ScriptedExecutor {
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl ScriptedExecutor {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn answer(text: &str) -> Self {
        Self::new(Script::Answer(text.to_string()))
    }

    pub fn failing(detail: &str) -> Self {
        Self::new(Script::Fail(detail.to_string()))
    }

    /// Shared call counter; grab a clone before handing the executor to a
    /// session.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn run(
        &self,
        _workflow: &WorkflowRequest,
        _user_query: &str,
    ) -> Result<ExecuteResponse, ExecutorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Answer(text) => Ok(ExecuteResponse {
                answer: text.clone(),
                logs: vec![],
            }),
            Script::Blank => Ok(ExecuteResponse::default()),
            Script::Fail(detail) => Err(ExecutorError::Api {
                detail: detail.clone(),
            }),
            Script::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ExecuteResponse::default())
            }
        }
    }
}

/// Executor that fires the session's cancel handle from inside the call and
/// still returns an answer, simulating a response that races the cancel to
/// the finish line.
pub struct SelfCancellingExecutor {
    handle: Arc<Mutex<Option<CancelHandle>>>,
    answer: String,
}

impl SelfCancellingExecutor {
    pub fn new(answer: &str) -> Self {
        Self {
            handle: Arc::new(Mutex::new(None)),
            answer: answer.to_string(),
        }
    }

    /// Slot for the session's cancel handle; filled once the session exists.
    pub fn handle_slot(&self) -> Arc<Mutex<Option<CancelHandle>>> {
        Arc::clone(&self.handle)
    }
}

#[async_trait]
impl Executor for SelfCancellingExecutor {
    async fn run(
        &self,
        _workflow: &WorkflowRequest,
        _user_query: &str,
    ) -> Result<ExecuteResponse, ExecutorError> {
        if let Some(handle) = self.handle.lock().unwrap().as_ref() {
            handle.cancel();
        }
        Ok(ExecuteResponse {
            answer: self.answer.clone(),
            logs: vec![],
        })
    }
}

/// Session wired to a scripted executor and a hub to observe notices.
pub fn scripted_session(
    executor: ScriptedExecutor,
    quota: u32,
) -> (ExecutionSession<ScriptedExecutor>, NoticeHub) {
    let hub = NoticeHub::new();
    let session = ExecutionSession::new(executor, CreditLedger::new(quota), hub.sender());
    (session, hub)
}

/// Query -> engine -> output, the smallest runnable pipeline with a place
/// to write the answer back.
pub fn pipeline_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(Node::with_config(
        "userQuery-1",
        Position::new(50.0, 100.0),
        NodeConfig::UserQuery(UserQueryConfig {
            query: Some("What does the report conclude?".to_string()),
        }),
    ));
    store.add_node(Node::with_config(
        "llmEngine-1",
        Position::new(300.0, 100.0),
        NodeConfig::LlmEngine(LlmEngineConfig {
            model: "gemini-2.0-flash".to_string(),
            system_prompt: None,
        }),
    ));
    store.add_node(Node::new(
        "output-1",
        NodeType::Output,
        Position::new(550.0, 100.0),
    ));
    store.connect(Connection::new("userQuery-1", "llmEngine-1"));
    store.connect(Connection::new("llmEngine-1", "output-1"));
    store
}

/// Fully connected four-node store for exercising change batches.
pub fn mesh_store() -> GraphStore {
    let ids = ["userQuery-a", "llmEngine-b", "knowledgeBase-c", "output-d"];
    let kinds = [
        NodeType::UserQuery,
        NodeType::LlmEngine,
        NodeType::KnowledgeBase,
        NodeType::Output,
    ];
    let mut store = GraphStore::new();
    for (i, (id, kind)) in ids.iter().zip(kinds).enumerate() {
        store.add_node(Node::new(*id, kind, Position::new(i as f64 * 100.0, 0.0)));
    }
    for source in &ids {
        for target in &ids {
            if source != target {
                store.connect(Connection::new(*source, *target));
            }
        }
    }
    store
}

/// Store with a single knowledge base node for attach/config tests.
pub fn knowledge_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(Node::with_config(
        "knowledgeBase-1",
        Position::new(0.0, 0.0),
        NodeConfig::KnowledgeBase(KnowledgeBaseConfig { file_name: None }),
    ));
    store
}
