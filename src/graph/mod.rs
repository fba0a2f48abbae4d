//! Workflow graph definition and the editable canvas state.
//!
//! This module is organized into focused submodules:
//!
//! - [`node`]: Canvas nodes, their positions, data maps, and the typed
//!   per-kind configuration union
//! - [`edge`]: Directed connections between nodes and their decoration
//! - [`changes`]: Incremental change descriptors batched by the canvas
//! - [`store`]: The [`GraphStore`], single source of truth for the graph
//!
//! The store is deliberately permissive: every operation is synchronous and
//! total, unknown ids degrade to no-ops, and structural validation (cycles,
//! missing query nodes) is the executor's concern.

pub mod changes;
pub mod edge;
pub mod node;
pub mod store;

pub use changes::{EdgeChange, NodeChange};
pub use edge::{Connection, Edge, EdgeMarker, MarkerKind};
pub use node::{
    KnowledgeBaseConfig, LlmEngineConfig, Node, NodeConfig, NodeData, OutputConfig, Position,
    UserQueryConfig,
};
pub use store::GraphStore;
