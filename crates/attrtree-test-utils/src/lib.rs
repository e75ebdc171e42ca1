//! Testing utilities for the attrtree workspace
//!
//! Shared fixtures, proptest strategies, and tracing setup.

#![allow(missing_docs)]

use attrtree::AttrNode;
use proptest::prelude::*;
use serde_json::{json, Map, Value as JsonValue};

/// JSON form of the sample configuration
pub const SAMPLE_JSON: &str = r#"{
    "attr1": 1,
    "attr2": ["hello", " ", "world"],
    "attr3": {
        "subattr1": "subattr1",
        "subattr2": {
            "subsubattr1": "subsubattr1"
        }
    }
}"#;

/// YAML form of the sample configuration
pub const SAMPLE_YAML: &str = "attr1: 1
attr2:
  - hello
  - ' '
  - world
attr3:
  subattr1: subattr1
  subattr2:
    subsubattr1: subsubattr1
";

pub fn sample_plain() -> Map<String, JsonValue> {
    match json!({
        "attr1": 1,
        "attr2": ["hello", " ", "world"],
        "attr3": {
            "subattr1": "subattr1",
            "subattr2": {"subsubattr1": "subsubattr1"}
        }
    }) {
        JsonValue::Object(map) => map,
        _ => unreachable!("fixture root is an object"),
    }
}

pub fn sample_tree() -> AttrNode {
    AttrNode::from_map(&sample_plain())
}

/// Install a test-friendly subscriber once; honors `RUST_LOG`
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Proptest strategies for plain documents
pub mod strategies {
    use super::*;

    pub fn arb_key() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,7}"
    }

    pub fn arb_scalar() -> impl Strategy<Value = JsonValue> {
        prop_oneof![
            Just(JsonValue::Null),
            any::<bool>().prop_map(JsonValue::Bool),
            any::<i64>().prop_map(JsonValue::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(JsonValue::String),
        ]
    }

    /// Scalars, sequences, and mappings nested a few levels deep
    pub fn arb_plain_value() -> impl Strategy<Value = JsonValue> {
        arb_scalar().prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(JsonValue::Array),
                prop::collection::btree_map(arb_key(), inner, 0..5)
                    .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
            ]
        })
    }

    pub fn arb_plain_mapping() -> impl Strategy<Value = Map<String, JsonValue>> {
        prop::collection::btree_map(arb_key(), arb_plain_value(), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }

    pub fn arb_path_segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(arb_key(), 1..5)
    }
}
