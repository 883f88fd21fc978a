use std::collections::HashSet;

use deepassign_merge::{merge, ContainerKind, DeepAssign, MergeError, Node, NodeId, Value};
use proptest::prelude::*;
use serde_json::{json, Value as Json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn v(json: Json) -> Value {
    Value::from(json)
}

/// Every node reachable from `value`.
fn node_ids(value: &Value, out: &mut HashSet<NodeId>) {
    let Some(node) = value.as_node() else {
        return;
    };
    if !out.insert(node.id()) {
        return;
    }
    for key in node.keys().unwrap() {
        if let Some(child) = node.get(key.clone()) {
            node_ids(&child, out);
        }
        node_ids(&Value::from(key), out);
    }
}

#[test]
fn key_union_with_override() {
    init_tracing();
    let result = merge(v(json!({"a": 1})), &[v(json!({"b": 2})), v(json!({"a": 3}))]).unwrap();
    assert!(Value::from(result).deep_eq(&v(json!({"a": 3, "b": 2}))));
}

#[test]
fn multi_source_left_to_right() {
    let result = merge(v(json!({})), &[v(json!({"a": 1, "b": 1})), v(json!({"a": 2}))]).unwrap();
    assert!(Value::from(result).deep_eq(&v(json!({"a": 2, "b": 1}))));
}

#[test]
fn primitive_passthrough() {
    let result = merge(v(json!({"a": 1})), &[v(json!({"a": "s", "b": null}))]).unwrap();
    assert!(Value::from(result).deep_eq(&v(json!({"a": "s", "b": null}))));
}

#[test]
fn null_source_rejected_undefined_ignored() {
    init_tracing();
    assert_eq!(
        merge(v(json!({"a": 1})), &[Value::Null]).unwrap_err(),
        MergeError::NullSource { index: 0 }
    );

    let result = merge(v(json!({"a": 1})), &[Value::Undefined]).unwrap();
    assert!(Value::from(result).deep_eq(&v(json!({"a": 1}))));
}

#[test]
fn cycle_rejected() {
    init_tracing();
    let x = Node::plain();
    x.set("self", x.clone()).unwrap();

    let err = merge(v(json!({})), &[Value::from(x)]).unwrap_err();
    assert!(matches!(err, MergeError::CircularReference { .. }));
    assert!(err.to_string().contains("circular reference"));
}

#[test]
fn map_entry_is_fresh_object() {
    let inner = Node::plain().with("v", 1);
    let result = merge(
        Value::from(Node::map()),
        &[Value::from(Node::map().with("k", inner.clone()))],
    )
    .unwrap();

    let entry = result.get("k").unwrap();
    assert!(!entry.as_node().unwrap().ptr_eq(&inner));
    assert!(entry.deep_eq(&v(json!({"v": 1}))));
}

#[test]
fn type_preservation_through_nesting() {
    let source = Node::plain().with(
        "outer",
        Node::map().with("set", Node::empty_set().with_element(Node::plain().with("deep", true))),
    );
    let result = Value::from(merge(v(json!({})), &[Value::from(source.clone())]).unwrap());

    let outer = result.get("outer").unwrap();
    assert_eq!(outer.container_kind(), Some(ContainerKind::Map));
    let set = outer.get("set").unwrap();
    assert_eq!(set.container_kind(), Some(ContainerKind::Set));
    assert!(result.deep_eq(&Value::from(source)));
}

#[test]
fn extension_method_matches_free_function() {
    let source = v(json!({"a": {"b": [1, 2]}}));
    let via_method = Node::plain().deep_assign(&[source.clone()]).unwrap();
    let via_function = merge(v(json!({})), &[source]).unwrap();
    assert!(Value::from(via_method).deep_eq(&Value::from(via_function)));
}

#[test]
fn nan_survives_merge_and_compares_equal() {
    let source = Value::from(
        Node::plain()
            .with("n", f64::NAN)
            .with("nested", Node::map().with("inf", f64::INFINITY).with(f64::NAN, "nan-key")),
    );
    let result = Value::from(merge(v(json!({})), &[source.clone()]).unwrap());

    assert!(matches!(result.get("n"), Some(Value::Number(n)) if n.is_nan()));
    assert!(result.deep_eq(&source));
    assert_eq!(
        result.get_path(&["nested"]).unwrap().get(f64::NAN),
        Some(Value::from("nan-key"))
    );
}

fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::from),
        (-1000i64..1000).prop_map(Json::from),
        (-1.0e6f64..1.0e6).prop_map(Json::from),
        "[a-z]{0,6}".prop_map(Json::from),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::btree_map("[a-d]{1,2}", inner, 0..4)
            .prop_map(|entries| Json::Object(entries.into_iter().collect()))
    })
}

fn arb_source() -> impl Strategy<Value = Json> {
    prop::collection::btree_map("[a-e]{1,2}", arb_json(), 0..5)
        .prop_map(|entries| Json::Object(entries.into_iter().collect()))
}

proptest! {
    #[test]
    fn repeated_merge_is_idempotent(source in arb_source()) {
        let once = merge(v(json!({})), &[v(source.clone())]).unwrap();
        let twice = merge(v(json!({})), &[v(source.clone())]).unwrap();
        let twice = merge(Value::from(twice), &[v(source)]).unwrap();
        prop_assert!(Value::from(once).deep_eq(&Value::from(twice)));
    }

    #[test]
    fn merged_target_shares_no_nodes_with_source(source in arb_source()) {
        let source = v(source);
        let result = Value::from(merge(v(json!({})), &[source.clone()]).unwrap());

        let mut source_nodes = HashSet::new();
        node_ids(&source, &mut source_nodes);
        let mut result_nodes = HashSet::new();
        node_ids(&result, &mut result_nodes);

        prop_assert!(source_nodes.is_disjoint(&result_nodes));
        prop_assert!(result.deep_eq(&source));
    }

    #[test]
    fn any_number_leaf_is_copied_faithfully(n in any::<f64>()) {
        let source = Value::from(Node::plain().with("n", n).with("inner", Node::plain().with("n", n)));
        let result = Value::from(merge(v(json!({})), &[source.clone()]).unwrap());
        prop_assert!(result.deep_eq(&source));
    }

    #[test]
    fn later_source_wins_on_every_shared_key(a in arb_source(), b in arb_source()) {
        let result = merge(v(json!({})), &[v(a.clone()), v(b.clone())]).unwrap();
        let a = a.as_object().cloned().unwrap_or_default();
        let b = b.as_object().cloned().unwrap_or_default();

        for (key, expected) in &b {
            prop_assert!(result.get(key.as_str()).unwrap().deep_eq(&v(expected.clone())));
        }
        for (key, expected) in a.iter().filter(|(key, _)| !b.contains_key(*key)) {
            prop_assert!(result.get(key.as_str()).unwrap().deep_eq(&v(expected.clone())));
        }
    }
}
