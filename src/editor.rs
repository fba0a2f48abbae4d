//! Top-level editor facade tying the graph store, execution session, and
//! backend clients together.
//!
//! An [`Editor`] is what an application embeds: it owns the working graph,
//! the chat session with its credit ledger, and the persistence and upload
//! clients, and it funnels user-facing notices through a single
//! [`NoticeHub`].
//!
//! # Examples
//!
//! ```no_run
//! use stackweave::config::EditorConfig;
//! use stackweave::editor::Editor;
//!
//! # async fn demo() -> miette::Result<()> {
//! let mut editor = Editor::new(EditorConfig::from_env());
//! let stack = editor.create("Chat With PDF", Some("demo")).await?;
//! editor.open(&stack.id).await?;
//! let outcome = editor.chat("What does the document say?").await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::api::{ApiError, DocumentClient, Stack, StackUpdate, StacksClient, UploadReceipt};
use crate::config::EditorConfig;
use crate::graph::GraphStore;
use crate::notify::{Notice, NoticeHub, StderrSink};
use crate::request::WorkflowRequest;
use crate::session::{
    CreditLedger, ExecutionSession, Executor, HttpExecutor, RunOutcome, SubmitError,
};
use crate::types::NodeType;

/// Query sent when the run button is pressed and no query node supplies one.
const DEFAULT_RUN_QUERY: &str = "Summarize the document.";

/// The workflow editor core: graph, session, persistence, notices.
pub struct Editor<E> {
    config: EditorConfig,
    store: GraphStore,
    session: ExecutionSession<E>,
    stacks: StacksClient,
    documents: DocumentClient,
    notices: NoticeHub,
    stack_id: Option<String>,
    stack_name: String,
}

impl Editor<HttpExecutor> {
    /// Editor wired to the HTTP executor at the configured API base.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let executor = HttpExecutor::new(config.api_base_url.clone());
        Self::with_executor(config, executor)
    }
}

impl<E: Executor> Editor<E> {
    /// Editor with a caller-supplied executor, for tests or alternate
    /// transports.
    #[must_use]
    pub fn with_executor(config: EditorConfig, executor: E) -> Self {
        let notices = NoticeHub::new();
        let session = ExecutionSession::new(
            executor,
            CreditLedger::new(config.credit_quota),
            notices.sender(),
        );
        let stacks = StacksClient::new(config.api_base_url.clone());
        let documents = DocumentClient::new(config.api_base_url.clone());
        Self {
            config,
            store: GraphStore::new(),
            session,
            stacks,
            documents,
            notices,
            stack_id: None,
            stack_name: String::new(),
        }
    }

    /// Also mirror every drained notice to stderr, for headless hosts
    /// without their own toast rendering.
    #[must_use]
    pub fn with_stderr_notices(mut self) -> Self {
        self.notices = self.notices.with_sink(Box::new(StderrSink));
        self
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn session(&self) -> &ExecutionSession<E> {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Id of the currently open stack, if any.
    pub fn stack_id(&self) -> Option<&str> {
        self.stack_id.as_deref()
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Handle for stopping an in-flight run from outside [`chat`](Self::chat).
    #[must_use]
    pub fn cancel_handle(&self) -> crate::session::CancelHandle {
        self.session.cancel_handle()
    }

    /// Pending user-facing notices, oldest first.
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Create a stack on the backend. Does not open it.
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Stack, ApiError> {
        self.stacks.create(name, description).await
    }

    pub async fn list_stacks(&self) -> Result<Vec<Stack>, ApiError> {
        self.stacks.list().await
    }

    /// Load a stack into the working graph, replacing it wholesale.
    ///
    /// On failure the working graph and open-stack identity are left as
    /// they were.
    #[instrument(skip(self))]
    pub async fn open(&mut self, id: &str) -> Result<(), ApiError> {
        let stack = match self.stacks.read(id).await {
            Ok(stack) => stack,
            Err(err) => {
                warn!(id, error = %err, "stack load failed");
                self.notices.sender().send(Notice::error("Failed to load stack"));
                return Err(err);
            }
        };
        self.store.set_nodes(stack.nodes);
        self.store.set_edges(stack.edges);
        self.stack_id = Some(stack.id);
        self.stack_name = stack.name;
        info!(stack = %self.stack_name, "stack opened");
        Ok(())
    }

    /// Persist the working graph to the open stack. No-op when no stack is
    /// open.
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> Result<(), ApiError> {
        let Some(id) = self.stack_id.clone() else {
            return Ok(());
        };
        let update = StackUpdate::graph(self.store.nodes().to_vec(), self.store.edges().to_vec());
        self.stacks.update(&id, &update).await?;
        self.notices
            .sender()
            .send(Notice::success("Stack saved successfully"));
        Ok(())
    }

    /// Delete a stack on the backend. Closing the working graph if the
    /// deleted stack was open is the caller's choice.
    pub async fn delete_stack(&mut self, id: &str) -> Result<(), ApiError> {
        self.stacks.delete(id).await?;
        if self.stack_id.as_deref() == Some(id) {
            self.stack_id = None;
            self.stack_name.clear();
        }
        Ok(())
    }

    /// Submit a chat message against the current graph.
    pub async fn chat(&mut self, text: &str) -> Result<RunOutcome, SubmitError> {
        self.session.submit(&mut self.store, text).await
    }

    /// Run the workflow without typing a message: the query comes from the
    /// query node's configured text, falling back to a generic prompt.
    pub async fn run(&mut self) -> Result<RunOutcome, SubmitError> {
        let query = self
            .store
            .find_by_type(NodeType::UserQuery)
            .and_then(|node| node.data.get("query"))
            .and_then(|value| value.as_str().map(str::to_owned))
            .filter(|query| !query.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RUN_QUERY.to_string());
        self.session.submit(&mut self.store, &query).await
    }

    /// Upload a document and record its name in the node's nested config.
    ///
    /// The rest of the node's config survives the patch; only `fileName`
    /// changes.
    #[instrument(skip(self, bytes))]
    pub async fn attach_document(
        &mut self,
        node_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, ApiError> {
        let receipt = self.documents.upload(file_name, bytes).await?;
        let mut config = self
            .store
            .node(node_id)
            .and_then(|node| node.data.config().cloned())
            .unwrap_or_default();
        config.insert("fileName".to_string(), Value::String(file_name.to_owned()));
        let mut patch = Map::new();
        patch.insert("config".to_string(), Value::Object(config));
        self.store.update_node_data(node_id, patch);
        info!(node_id, file_name, chunks = receipt.chunks, "document attached");
        Ok(receipt)
    }

    /// Model the next run will use: the engine node's configured model, or
    /// the configured default.
    pub fn active_model(&self) -> String {
        self.store
            .find_by_type(NodeType::LlmEngine)
            .and_then(|node| node.data.config())
            .and_then(|config| config.get("model"))
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_else(|| self.config.default_model.clone())
    }

    /// The wire form of the current graph, as a submit would send it.
    #[must_use]
    pub fn snapshot_request(&self) -> WorkflowRequest {
        crate::request::serialize(self.store.nodes(), self.store.edges())
    }
}
