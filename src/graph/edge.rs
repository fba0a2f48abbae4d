//! Directed edges between canvas nodes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Arrowhead style rendered at the target end of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    #[default]
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
    #[serde(rename = "arrow")]
    Arrow,
}

/// Decoration-only metadata on an edge. The serializer drops it; only the
/// canvas and persisted stacks carry it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMarker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
}

/// A directed connection between two nodes.
///
/// `source` and `target` reference nodes present in the graph at creation
/// time. The store keeps that invariant observable by cascading node removal
/// to incident edges (see [`crate::graph::store::GraphStore`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "markerEnd",
        skip_serializing_if = "Option::is_none"
    )]
    pub marker_end: Option<EdgeMarker>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Edge {
    /// An edge with the default closed-arrow decoration.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            marker_end: Some(EdgeMarker::default()),
            selected: false,
        }
    }

    /// Returns true if this edge touches the given node id on either end.
    #[must_use]
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A connection attempt reported by the canvas: a source/target pair, with
/// an optional caller-supplied edge id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub source: String,
    pub target: String,
    pub id: Option<String>,
}

impl Connection {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The edge id to use: the supplied one, or a generated
    /// `e{source}-{target}-{fragment}` id unique across parallel edges.
    #[must_use]
    pub fn edge_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            let fragment = Uuid::new_v4().simple().to_string();
            format!("e{}-{}-{}", self.source, self.target, &fragment[..8])
        })
    }
}
