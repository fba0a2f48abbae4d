//! Core types for the Stackweave workflow editor.
//!
//! This module defines the fundamental type used throughout the system for
//! identifying what kind of work a canvas node represents. Everything else
//! about a node (position, label, configuration) lives in [`crate::graph`].
//!
//! # Key Types
//!
//! - [`NodeType`]: Identifies the five node kinds a workflow graph may contain
//!
//! # Examples
//!
//! ```rust
//! use stackweave::types::NodeType;
//!
//! let llm = NodeType::LlmEngine;
//!
//! // Encode for the wire / persisted stacks
//! assert_eq!(llm.encode(), "llmEngine");
//! assert_eq!(NodeType::decode("llmEngine"), Some(NodeType::LlmEngine));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the kind of a node within a workflow graph.
///
/// The type is fixed at node creation and never changes for the node's
/// lifetime. The executor interprets each kind differently; the graph store
/// treats them all uniformly.
///
/// # Wire format
///
/// Persisted stacks and execution requests use the camelCase string form
/// (`"userQuery"`, `"llmEngine"`, ...), produced by [`encode`](Self::encode)
/// and by serde.
///
/// # Examples
///
/// ```rust
/// use stackweave::types::NodeType;
///
/// let kind = NodeType::KnowledgeBase;
/// assert_eq!(kind.encode(), "knowledgeBase");
/// assert_eq!(NodeType::decode("knowledgeBase"), Some(kind));
/// assert_eq!(NodeType::decode("sparkleEmitter"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Entry point carrying the user's question into the workflow.
    #[serde(rename = "userQuery")]
    UserQuery,

    /// LLM call configured with a model and system prompt.
    #[serde(rename = "llmEngine")]
    LlmEngine,

    /// Retrieval over an uploaded document collection.
    #[serde(rename = "knowledgeBase")]
    KnowledgeBase,

    /// Live web search feeding context into downstream nodes.
    #[serde(rename = "webSearch")]
    WebSearch,

    /// Terminal node that receives the executor's answer.
    #[serde(rename = "output")]
    Output,
}

impl NodeType {
    /// All node types, in palette order.
    pub const ALL: [NodeType; 5] = [
        NodeType::UserQuery,
        NodeType::LlmEngine,
        NodeType::KnowledgeBase,
        NodeType::WebSearch,
        NodeType::Output,
    ];

    /// Encode a node type into its persisted camelCase string form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use stackweave::types::NodeType;
    /// assert_eq!(NodeType::UserQuery.encode(), "userQuery");
    /// assert_eq!(NodeType::Output.encode(), "output");
    /// ```
    #[must_use]
    pub fn encode(&self) -> &'static str {
        match self {
            NodeType::UserQuery => "userQuery",
            NodeType::LlmEngine => "llmEngine",
            NodeType::KnowledgeBase => "knowledgeBase",
            NodeType::WebSearch => "webSearch",
            NodeType::Output => "output",
        }
    }

    /// Decode a persisted string form back into a node type.
    ///
    /// Returns `None` for unrecognized strings rather than guessing; a stack
    /// that carries an unknown node type is a compatibility break, not
    /// something to paper over.
    pub fn decode(s: &str) -> Option<Self> {
        match s {
            "userQuery" => Some(NodeType::UserQuery),
            "llmEngine" => Some(NodeType::LlmEngine),
            "knowledgeBase" => Some(NodeType::KnowledgeBase),
            "webSearch" => Some(NodeType::WebSearch),
            "output" => Some(NodeType::Output),
            _ => None,
        }
    }

    /// Human-readable default label for a freshly dropped node.
    #[must_use]
    pub fn default_label(&self) -> &'static str {
        match self {
            NodeType::UserQuery => "User Query",
            NodeType::LlmEngine => "LLM Engine",
            NodeType::KnowledgeBase => "Knowledge Base",
            NodeType::WebSearch => "Web Search",
            NodeType::Output => "Output",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        for kind in NodeType::ALL {
            assert_eq!(NodeType::decode(kind.encode()), Some(kind));
        }
    }

    #[test]
    fn decode_rejects_unknown() {
        assert_eq!(NodeType::decode("default"), None);
        assert_eq!(NodeType::decode(""), None);
        assert_eq!(NodeType::decode("UserQuery"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&NodeType::KnowledgeBase).unwrap();
        assert_eq!(json, "\"knowledgeBase\"");
        let back: NodeType = serde_json::from_str("\"webSearch\"").unwrap();
        assert_eq!(back, NodeType::WebSearch);
    }

    #[test]
    fn display_matches_encode() {
        assert_eq!(NodeType::LlmEngine.to_string(), "llmEngine");
    }
}
