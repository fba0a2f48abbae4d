//! The graph store: single source of truth for the editable workflow graph.

use rustc_hash::FxHashSet;
use serde_json::Map;
use tracing::debug;

use crate::graph::changes::{EdgeChange, NodeChange};
use crate::graph::edge::{Connection, Edge, EdgeMarker};
use crate::graph::node::{KnowledgeBaseConfig, Node, NodeConfig, Position};
use crate::types::NodeType;

/// Canonical in-memory representation of the nodes and edges under edit.
///
/// Every visual affordance reads and writes through the store's named
/// operations; raw field assignment is never exposed. One editor instance
/// owns one store, and all mutation happens from that instance's event
/// handlers, so no locking is needed.
///
/// # Failure semantics
///
/// All operations are synchronous and total. Invalid input (an unknown id)
/// degrades to a no-op rather than an error, because the store must stay
/// usable under speculative UI-driven calls.
///
/// # Examples
///
/// ```
/// use stackweave::graph::{Connection, GraphStore, Node, NodeChange, Position};
/// use stackweave::types::NodeType;
///
/// let mut store = GraphStore::new();
/// store.add_node(Node::new("1", NodeType::UserQuery, Position::new(50.0, 100.0)));
/// store.add_node(Node::new("3", NodeType::Output, Position::new(450.0, 100.0)));
/// store.connect(Connection::new("1", "3"));
///
/// assert_eq!(store.nodes().len(), 2);
/// assert_eq!(store.edges().len(), 1);
///
/// // Removing a node cascades to its incident edges in the same update.
/// store.apply_node_changes(&[NodeChange::remove("1")]);
/// assert!(store.edges().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The seeded starter graph new editors open with: a user query feeding a
    /// knowledge base feeding an LLM engine.
    #[must_use]
    pub fn demo() -> Self {
        let nodes = vec![
            Node::new("1", NodeType::UserQuery, Position::new(50.0, 100.0)),
            Node::with_config(
                "4",
                Position::new(300.0, 100.0),
                NodeConfig::KnowledgeBase(KnowledgeBaseConfig {
                    file_name: Some("test_data.pdf".into()),
                }),
            ),
            Node::new("2", NodeType::LlmEngine, Position::new(550.0, 100.0)),
        ];
        let edges = vec![Edge::new("e1-4", "1", "4"), Edge::new("e4-2", "4", "2")];
        Self { nodes, edges }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node matching `id`, if any.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The first node of the given kind, in insertion order.
    #[must_use]
    pub fn find_by_type(&self, kind: NodeType) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == kind)
    }

    /// The currently selected node, if exactly one affordance needs it (the
    /// configuration panel reads this).
    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.selected)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Full replace of the node collection, used when loading a persisted
    /// stack. No validation beyond shape; the loader owns well-formedness.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    /// Full replace of the edge collection.
    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
    }

    /// Append a node with a caller-supplied id. The caller generates a fresh
    /// unique id (see [`Node::generated_id`]); collisions are undefined
    /// behavior the store does not detect.
    pub fn add_node(&mut self, node: Node) {
        debug!(id = %node.id, kind = %node.kind, "add node");
        self.nodes.push(node);
    }

    /// Append a new edge for a canvas connection, with generated or supplied
    /// id and default decoration. Parallel edges and self-loops are allowed;
    /// validation, if any, belongs to the executor.
    pub fn connect(&mut self, connection: Connection) {
        let id = connection.edge_id();
        debug!(%id, source = %connection.source, target = %connection.target, "connect");
        self.edges.push(Edge {
            id,
            source: connection.source,
            target: connection.target,
            marker_end: Some(EdgeMarker::default()),
            selected: false,
        });
    }

    /// Apply an ordered batch of node changes atomically.
    ///
    /// Unaffected nodes keep their relative order and identity. Removals
    /// cascade: any edge whose source or target is a removed node is dropped
    /// in the same logical update, so a reader never observes a dangling
    /// edge between one read and the next.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        let mut removed: FxHashSet<&str> = FxHashSet::default();
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
                        node.position = *position;
                    }
                }
                NodeChange::Select { id, selected } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
                        node.selected = *selected;
                    }
                }
                NodeChange::Remove { id } => {
                    removed.insert(id);
                }
            }
        }
        if !removed.is_empty() {
            debug!(count = removed.len(), "remove nodes with incident edges");
            self.nodes.retain(|n| !removed.contains(n.id.as_str()));
            self.edges.retain(|e| {
                !removed.contains(e.source.as_str()) && !removed.contains(e.target.as_str())
            });
        }
    }

    /// Apply an ordered batch of edge changes atomically.
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        let mut removed: FxHashSet<&str> = FxHashSet::default();
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| &e.id == id) {
                        edge.selected = *selected;
                    }
                }
                EdgeChange::Remove { id } => {
                    removed.insert(id);
                }
            }
        }
        if !removed.is_empty() {
            self.edges.retain(|e| !removed.contains(e.id.as_str()));
        }
    }

    /// Shallow-merge `patch` into the data map of the node matching `id`.
    /// No-op if `id` is not found. Nested objects are replaced wholesale;
    /// callers wanting to change one key inside `config` supply the full
    /// desired object (see [`NodeData::merge`]).
    pub fn update_node_data(&mut self, id: &str, patch: Map<String, serde_json::Value>) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.data.merge(patch);
        }
    }

    /// Remove every edge incident to `id`, leaving the node in place. Backs
    /// the node menu's "disconnect" action.
    pub fn disconnect_node(&mut self, id: &str) {
        self.edges.retain(|e| !e.touches(id));
    }
}
