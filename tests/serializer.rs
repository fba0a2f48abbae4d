mod common;
use common::*;

use serde_json::json;
use stackweave::graph::GraphStore;
use stackweave::request::serialize;

#[test]
fn nested_configs_pass_through_verbatim() {
    let store = pipeline_store();
    let request = serialize(store.nodes(), store.edges());

    let engine = request
        .nodes
        .iter()
        .find(|node| node.id == "llmEngine-1")
        .unwrap();
    assert_eq!(engine.data.config.get("model").unwrap(), &json!("gemini-2.0-flash"));
    assert!(engine.data.config.get("label").is_none());
}

#[test]
fn flat_data_falls_back_to_the_whole_map() {
    let store = pipeline_store();
    let request = serialize(store.nodes(), store.edges());

    let query = request
        .nodes
        .iter()
        .find(|node| node.id == "userQuery-1")
        .unwrap();
    assert_eq!(
        query.data.config.get("query").unwrap(),
        &json!("What does the report conclude?")
    );
    // The fallback copies the full data map, label included.
    assert_eq!(query.data.config.get("label").unwrap(), &json!("User Query"));
}

#[test]
fn empty_nested_config_still_wins_over_the_fallback() {
    let store = knowledge_store();
    let request = serialize(store.nodes(), store.edges());

    // No file attached yet: the nested config is empty but present, so the
    // whole-data fallback (which would leak the label) must not kick in.
    let config = &request.nodes[0].data.config;
    assert!(config.is_empty());
}

#[test]
fn edges_lose_canvas_decoration() {
    let store = GraphStore::demo();
    let request = serialize(store.nodes(), store.edges());

    let value = serde_json::to_value(&request).unwrap();
    for edge in value["edges"].as_array().unwrap() {
        let keys: Vec<&str> = edge.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "source", "target"]);
    }
}

#[test]
fn serialization_is_pure() {
    let store = pipeline_store();
    let before = store.clone();

    let first = serialize(store.nodes(), store.edges());
    let second = serialize(store.nodes(), store.edges());

    assert_eq!(store, before);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
