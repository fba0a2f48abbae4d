//! Canvas nodes: identity, position, label, and per-kind configuration.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::types::NodeType;

/// Canvas coordinates of a node.
///
/// Pixel semantics belong to the rendering layer; the store only carries the
/// numbers through edits and persistence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The free-form data map carried by every node.
///
/// `label` is the one field every node shares; everything else lives in
/// `fields`, a flat JSON map whose shape is interpreted only by the node's
/// own editor affordance and by the executor, never by the store. Nested
/// objects (the `config` key in particular) are merged wholesale, not deep:
/// a patch that wants to change one key inside `config` must supply the full
/// desired `config` object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NodeData {
    /// Data with a label and no other fields.
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Map::new(),
        }
    }

    /// Data built from a typed configuration.
    #[must_use]
    pub fn with_config(label: impl Into<String>, config: NodeConfig) -> Self {
        Self {
            label: label.into(),
            fields: config.into_fields(),
        }
    }

    /// Look up a field, `label` included.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == "label" {
            return Some(Value::String(self.label.clone()));
        }
        self.fields.get(key).cloned()
    }

    /// The nested `config` object, if this node carries one.
    #[must_use]
    pub fn config(&self) -> Option<&Map<String, Value>> {
        self.fields.get("config").and_then(Value::as_object)
    }

    /// Shallow-merge a patch into this data map, patch values winning on key
    /// collision. One level deep only.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            if key == "label" {
                if let Value::String(label) = value {
                    self.label = label;
                }
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// The full data map including `label`, as the wire sees it.
    #[must_use]
    pub fn as_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("label".to_string(), Value::String(self.label.clone()));
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        map
    }
}

/// A typed unit of work on the canvas.
///
/// Invariants: `id` is unique within a graph and stable for the node's
/// lifetime; `kind` is immutable after creation. Callers generate fresh ids
/// (see [`Node::generated_id`]); id collisions are a caller bug the store
/// does not detect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub position: Position,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Node {
    /// A node with the kind's default label and no configuration, as produced
    /// by a palette drop.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeType, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            data: NodeData::labeled(kind.default_label()),
            selected: false,
        }
    }

    /// A node carrying a typed configuration; the kind comes from the config
    /// variant.
    #[must_use]
    pub fn with_config(id: impl Into<String>, position: Position, config: NodeConfig) -> Self {
        let kind = config.kind();
        Self {
            id: id.into(),
            kind,
            position,
            data: NodeData::with_config(kind.default_label(), config),
            selected: false,
        }
    }

    /// Generate a fresh node id from the kind and the current time, matching
    /// the canvas drop handler's `{type}-{millis}` scheme.
    #[must_use]
    pub fn generated_id(kind: NodeType) -> String {
        format!("{kind}-{}", Utc::now().timestamp_millis())
    }
}

/// Typed per-kind node configuration.
///
/// The store never inspects these: node data is a free-form map there. The
/// union exists at the seams (constructing well-formed nodes and projecting
/// configuration into the generic map the executor expects) so that each
/// kind's schema is a compile-time checked variant instead of duck-typed
/// key access.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeConfig {
    UserQuery(UserQueryConfig),
    LlmEngine(LlmEngineConfig),
    KnowledgeBase(KnowledgeBaseConfig),
    WebSearch,
    Output(OutputConfig),
}

/// Query text typed into a user-query node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserQueryConfig {
    pub query: Option<String>,
}

/// Model selection and system prompt for an LLM node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmEngineConfig {
    pub model: String,
    pub system_prompt: Option<String>,
}

/// Uploaded document handle for a knowledge-base node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KnowledgeBaseConfig {
    pub file_name: Option<String>,
}

/// Answer written back into an output node after a successful run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputConfig {
    pub output_result: Option<String>,
}

impl NodeConfig {
    /// The node kind this configuration belongs to.
    #[must_use]
    pub fn kind(&self) -> NodeType {
        match self {
            NodeConfig::UserQuery(_) => NodeType::UserQuery,
            NodeConfig::LlmEngine(_) => NodeType::LlmEngine,
            NodeConfig::KnowledgeBase(_) => NodeType::KnowledgeBase,
            NodeConfig::WebSearch => NodeType::WebSearch,
            NodeConfig::Output(_) => NodeType::Output,
        }
    }

    /// Project this configuration into the flat data-map shape the executor
    /// reads: flat keys for query and output text, a nested `config` object
    /// for LLM and knowledge-base settings.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        match self {
            NodeConfig::UserQuery(cfg) => {
                if let Some(query) = cfg.query {
                    fields.insert("query".to_string(), Value::String(query));
                }
            }
            NodeConfig::LlmEngine(cfg) => {
                let mut config = Map::new();
                config.insert("model".to_string(), Value::String(cfg.model));
                if let Some(prompt) = cfg.system_prompt {
                    config.insert("system_prompt".to_string(), Value::String(prompt));
                }
                fields.insert("config".to_string(), Value::Object(config));
            }
            NodeConfig::KnowledgeBase(cfg) => {
                let mut config = Map::new();
                if let Some(file_name) = cfg.file_name {
                    config.insert("fileName".to_string(), Value::String(file_name));
                }
                fields.insert("config".to_string(), Value::Object(config));
            }
            NodeConfig::WebSearch => {}
            NodeConfig::Output(cfg) => {
                if let Some(result) = cfg.output_result {
                    fields.insert("outputResult".to_string(), Value::String(result));
                }
            }
        }
        fields
    }
}

/// Key under which a successful run's answer lands in an output node's data.
pub const OUTPUT_RESULT_KEY: &str = "outputResult";

/// Convenience: the patch that writes an answer into an output node.
#[must_use]
pub fn output_result_patch(answer: &str) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert(OUTPUT_RESULT_KEY.to_string(), json!(answer));
    patch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_drop_node_has_default_label() {
        let node = Node::new("llmEngine-1", NodeType::LlmEngine, Position::new(10.0, 20.0));
        assert_eq!(node.data.label, "LLM Engine");
        assert!(node.data.fields.is_empty());
        assert!(!node.selected);
    }

    #[test]
    fn generated_id_carries_kind_prefix() {
        let id = Node::generated_id(NodeType::WebSearch);
        assert!(id.starts_with("webSearch-"));
    }

    #[test]
    fn llm_config_projects_nested() {
        let fields = NodeConfig::LlmEngine(LlmEngineConfig {
            model: "gpt-4o".into(),
            system_prompt: Some("You are helpful.".into()),
        })
        .into_fields();
        assert_eq!(fields["config"]["model"], "gpt-4o");
        assert_eq!(fields["config"]["system_prompt"], "You are helpful.");
    }

    #[test]
    fn knowledge_base_config_projects_file_name() {
        let node = Node::with_config(
            "4",
            Position::default(),
            NodeConfig::KnowledgeBase(KnowledgeBaseConfig {
                file_name: Some("report.pdf".into()),
            }),
        );
        assert_eq!(node.kind, NodeType::KnowledgeBase);
        assert_eq!(node.data.config().unwrap()["fileName"], "report.pdf");
    }

    #[test]
    fn merge_is_shallow_and_label_aware() {
        let mut data = NodeData::labeled("Output");
        data.fields
            .insert("outputResult".to_string(), json!("old answer"));

        let mut patch = Map::new();
        patch.insert("label".to_string(), json!("Final Output"));
        patch.insert("outputResult".to_string(), json!("new answer"));
        data.merge(patch);

        assert_eq!(data.label, "Final Output");
        assert_eq!(data.fields["outputResult"], "new answer");
    }

    #[test]
    fn merge_replaces_nested_config_wholesale() {
        let mut data = NodeData::with_config(
            "LLM Engine",
            NodeConfig::LlmEngine(LlmEngineConfig {
                model: "gpt-4o".into(),
                system_prompt: Some("old".into()),
            }),
        );

        let mut patch = Map::new();
        patch.insert("config".to_string(), json!({"model": "gemini-2.0-flash"}));
        data.merge(patch);

        // The whole config object was replaced; system_prompt is gone.
        let config = data.config().unwrap();
        assert_eq!(config["model"], "gemini-2.0-flash");
        assert!(!config.contains_key("system_prompt"));
    }

    #[test]
    fn node_serde_uses_wire_shape() {
        let node = Node::new("1", NodeType::UserQuery, Position::new(50.0, 100.0));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "userQuery");
        assert_eq!(value["data"]["label"], "User Query");
        assert_eq!(value["position"]["x"], 50.0);
        // Unselected nodes omit the flag entirely.
        assert!(value.get("selected").is_none());

        let back: Node = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }
}
