use attrtree::{AttrError, AttrNode, AttrPath, AttrValue, NodeMut};
use attrtree_test_utils::strategies::{arb_key, arb_path_segments, arb_plain_mapping, arb_scalar};
use proptest::prelude::*;
use serde_json::Value as JsonValue;

fn rejected(result: Result<impl Sized, AttrError>) -> bool {
    result.is_err_and(|err| err.is_mutation_rejected())
}

/// Tries every write reachable by navigation; true if all were refused
fn writes_refused_everywhere(mut node: NodeMut<'_>, name: &str) -> bool {
    let mut refused = rejected(node.set(name, 1)) && rejected(node.delete(name));

    let targets: Vec<(String, Option<usize>)> = node
        .iter()
        .flat_map(|(key, value)| match value {
            AttrValue::Node(_) => vec![(key.to_string(), None)],
            AttrValue::Sequence(items) => items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.is_node())
                .map(|(index, _)| (key.to_string(), Some(index)))
                .collect(),
            AttrValue::Scalar(_) => Vec::new(),
        })
        .collect();

    for (key, index) in targets {
        refused &= rejected(node.set(key.as_str(), 0));
        let child = match index {
            None => node.reborrow().child(&key),
            Some(index) => node.reborrow().child_at(&key, index),
        };
        refused &= child.is_ok_and(|child| {
            child.is_read_only() && writes_refused_everywhere(child, name)
        });
    }
    refused
}

fn all_nodes_in_state(value: &AttrValue, read_only: bool) -> bool {
    match value {
        AttrValue::Scalar(_) => true,
        AttrValue::Sequence(items) => items.iter().all(|item| all_nodes_in_state(item, read_only)),
        AttrValue::Node(node) => {
            node.is_read_only() == read_only
                && node.values().all(|child| all_nodes_in_state(child, read_only))
        }
    }
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_value(source in arb_plain_mapping()) {
        let tree = AttrNode::from_map(&source);
        prop_assert_eq!(tree.to_plain_mapping(), source);
    }

    #[test]
    fn prop_chained_write_then_read(
        segments in arb_path_segments(),
        value in arb_scalar(),
    ) {
        let mut tree = AttrNode::new();
        let path = AttrPath::new(segments).unwrap();
        tree.set_path(&path, value.clone()).unwrap();

        prop_assert_eq!(tree.get_path(&path).unwrap().to_plain(), value);
    }

    #[test]
    fn prop_state_reaches_every_node(source in arb_plain_mapping(), read_only in any::<bool>()) {
        let mut tree = AttrNode::from_map(&source);
        tree.convert_state(read_only);
        let root = AttrValue::Node(tree.clone());
        prop_assert!(all_nodes_in_state(&root, read_only));

        tree.convert_state(read_only);
        prop_assert!(all_nodes_in_state(&AttrValue::Node(tree), read_only));
    }

    #[test]
    fn prop_read_only_rejects_all_writes(source in arb_plain_mapping(), name in arb_key()) {
        let mut tree = AttrNode::from_map(&source).into_state(true);
        let snapshot = tree.to_plain_mapping();

        prop_assert!(tree.set(name.as_str(), 1).unwrap_err().is_mutation_rejected());
        prop_assert!(tree.delete(&name).unwrap_err().is_mutation_rejected());
        if !tree.contains(&name) {
            prop_assert!(tree.attr(&name).unwrap_err().is_lookup());
        }

        prop_assert_eq!(tree.to_plain_mapping(), snapshot);
    }

    #[test]
    fn prop_navigation_never_opens_a_frozen_tree(source in arb_plain_mapping(), name in arb_key()) {
        let mut tree = AttrNode::from_map(&source).into_state(true);
        let snapshot = tree.to_plain_mapping();

        prop_assert!(writes_refused_everywhere(tree.handle(), &name));
        prop_assert_eq!(tree.to_plain_mapping(), snapshot);
        prop_assert!(tree.is_read_only());
    }

    #[test]
    fn prop_unfreeze_restores_writes(source in arb_plain_mapping(), name in arb_key()) {
        let mut tree = AttrNode::from_map(&source).into_state(true);
        tree.convert_to_modifiable();

        tree.set(name.as_str(), "v").unwrap();
        prop_assert_eq!(tree.get(&name).unwrap(), "v");
        tree.delete(&name).unwrap();
        prop_assert!(tree.delete(&name).unwrap_err().is_lookup());
    }

    #[test]
    fn prop_json_emission_round_trips(source in arb_plain_mapping()) {
        let tree = AttrNode::from_map(&source);
        let text = tree.to_json_string().unwrap();
        let parsed: JsonValue = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, JsonValue::Object(source));
    }
}
