//! Incremental change descriptors batched by the canvas.
//!
//! Every drag, click, and key press on the canvas arrives at the store as an
//! ordered batch of these descriptors. Changes touching disjoint ids commute;
//! changes touching the same id apply in the given order, last write winning
//! on conflicting fields.

use crate::graph::node::Position;

/// A single incremental change to the node collection.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
    /// Move a node to a new canvas position.
    Position { id: String, position: Position },
    /// Toggle a node's selection state.
    Select { id: String, selected: bool },
    /// Remove a node. Incident edges are removed in the same update.
    Remove { id: String },
}

impl NodeChange {
    #[must_use]
    pub fn position(id: impl Into<String>, x: f64, y: f64) -> Self {
        NodeChange::Position {
            id: id.into(),
            position: Position::new(x, y),
        }
    }

    #[must_use]
    pub fn select(id: impl Into<String>, selected: bool) -> Self {
        NodeChange::Select {
            id: id.into(),
            selected,
        }
    }

    #[must_use]
    pub fn remove(id: impl Into<String>) -> Self {
        NodeChange::Remove { id: id.into() }
    }

    /// The node id this change targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }
}

/// A single incremental change to the edge collection.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
    /// Toggle an edge's selection state.
    Select { id: String, selected: bool },
    /// Remove an edge.
    Remove { id: String },
}

impl EdgeChange {
    #[must_use]
    pub fn select(id: impl Into<String>, selected: bool) -> Self {
        EdgeChange::Select {
            id: id.into(),
            selected,
        }
    }

    #[must_use]
    pub fn remove(id: impl Into<String>) -> Self {
        EdgeChange::Remove { id: id.into() }
    }

    /// The edge id this change targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }
}
