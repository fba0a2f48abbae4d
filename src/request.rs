//! Projection of the editable graph into an execution-ready request.
//!
//! [`serialize`] is a pure function over a graph snapshot: it drops the
//! view-only fields (positions stay, markers and selection go), normalizes
//! each node's configuration, and produces the exact shape the executor's
//! `/run_workflow` endpoint accepts. It never mutates its inputs and never
//! performs I/O, so the request for a run reflects the store at the instant
//! submit was invoked, regardless of edits made while the run is in flight.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::graph::{Edge, Node, Position};
use crate::types::NodeType;

/// One node as the executor sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub position: Position,
    pub data: RequestNodeData,
}

/// Normalized node data: the label plus a single generic config map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestNodeData {
    pub label: String,
    pub config: Map<String, Value>,
}

/// One edge as the executor sees it: decoration stripped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The serialized, view-stripped projection of a graph. Derived, never
/// persisted, never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub nodes: Vec<RequestNode>,
    pub edges: Vec<RequestEdge>,
}

/// Project a graph snapshot into a [`WorkflowRequest`].
///
/// Per-node config normalization: if the node carries a nested `config`
/// object, that object is forwarded; otherwise the entire data map
/// (including `label`) is used as the config, so nodes whose editors write
/// flat fields still forward them to the executor. The fallback forwards the
/// label as part of the config; the executor ignores keys it does not read.
#[must_use]
pub fn serialize(nodes: &[Node], edges: &[Edge]) -> WorkflowRequest {
    let nodes = nodes
        .iter()
        .map(|node| RequestNode {
            id: node.id.clone(),
            kind: node.kind,
            position: node.position,
            data: RequestNodeData {
                label: node.data.label.clone(),
                config: node
                    .data
                    .config()
                    .cloned()
                    .unwrap_or_else(|| node.data.as_map()),
            },
        })
        .collect();

    let edges = edges
        .iter()
        .map(|edge| RequestEdge {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        })
        .collect();

    WorkflowRequest { nodes, edges }
}
