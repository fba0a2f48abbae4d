//! # Stackweave: Workflow Graph Editor Core
//!
//! Stackweave is the headless core of a visual workflow editor: a mutable
//! graph of typed nodes and edges, a serializer that turns the graph into an
//! executor request, and a chat session that runs the workflow against a
//! remote executor with credits and cooperative cancellation.
//!
//! ## Core Concepts
//!
//! - **Nodes and edges**: Typed graph elements with free-form, shallowly
//!   mergeable data ([`graph`])
//! - **Store**: The single working copy of the graph, mutated through total
//!   operations that never leave dangling edges ([`graph::GraphStore`])
//! - **Requests**: The pure projection from graph to executor wire format
//!   ([`request`])
//! - **Sessions**: One in-flight run at a time, guarded by a credit ledger
//!   and cancellable mid-flight ([`session`])
//! - **Editor**: The facade an application embeds, wiring store, session,
//!   persistence, and notices together ([`editor`])
//!
//! ## Quick Start
//!
//! ### Building a graph
//!
//! ```
//! use stackweave::graph::{Connection, GraphStore, Node, NodeChange, Position};
//! use stackweave::types::NodeType;
//!
//! let mut store = GraphStore::new();
//! store.add_node(Node::new("userQuery-1", NodeType::UserQuery, Position::new(50.0, 100.0)));
//! store.add_node(Node::new("llmEngine-1", NodeType::LlmEngine, Position::new(300.0, 100.0)));
//! store.connect(Connection::new("userQuery-1", "llmEngine-1"));
//!
//! // Removing a node also removes its incident edges.
//! store.apply_node_changes(&[NodeChange::remove("llmEngine-1")]);
//! assert!(store.edges().is_empty());
//! ```
//!
//! ### Running a workflow
//!
//! ```no_run
//! use stackweave::config::EditorConfig;
//! use stackweave::editor::Editor;
//! use stackweave::session::RunOutcome;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = Editor::new(EditorConfig::from_env());
//! editor.open("stack-id").await?;
//!
//! match editor.chat("What does the uploaded report conclude?").await? {
//!     RunOutcome::Succeeded { answer } => println!("{answer}"),
//!     RunOutcome::Failed { reason } => eprintln!("run failed: {reason}"),
//!     RunOutcome::Cancelled => eprintln!("run cancelled"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Messages
//!
//! ```
//! use stackweave::message::{Message, Role};
//!
//! let user = Message::user("What's in the document?");
//! let reply = Message::assistant("It covers quarterly results.");
//! assert!(user.has_role(Role::User));
//! assert!(!reply.has_role(Role::System));
//! ```
//!
//! ## Module Guide
//!
//! - [`types`]: Node type vocabulary and wire names
//! - [`graph`]: Nodes, edges, change events, and the store
//! - [`request`]: Graph to executor-request serialization
//! - [`message`]: Chat transcript entries
//! - [`session`]: Execution lifecycle, credits, cancellation
//! - [`api`]: Stack persistence and document upload clients
//! - [`editor`]: Application-facing facade
//! - [`notify`]: User-facing notices and sinks
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod editor;
pub mod graph;
pub mod message;
pub mod notify;
pub mod request;
pub mod session;
pub mod telemetry;
pub mod types;
