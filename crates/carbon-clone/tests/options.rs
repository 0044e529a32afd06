//! Clone options: loading and depth limiting

use carbon_clone::{CloneError, CloneOptions, DeepCloner, deep_clone_with};
use carbon_value::{Array, HostObject, Record, Value, deep_equal};
use std::sync::Arc;

fn nested_arrays(levels: usize) -> Value {
    let mut value = Value::number(0.0);
    for _ in 0..levels {
        value = Value::array(Array::from_values([value]));
    }
    value
}

#[test]
fn test_options_from_json() {
    let options: CloneOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, CloneOptions::unlimited());

    let options: CloneOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
    assert_eq!(options, CloneOptions::with_max_depth(8));

    let options: CloneOptions = serde_json::from_str(r#"{"max_depth": null}"#).unwrap();
    assert_eq!(options.max_depth, None);

    assert!(serde_json::from_str::<CloneOptions>(r#"{"max_depth": -1}"#).is_err());
}

#[test]
fn test_options_round_trip_through_json() {
    let options = CloneOptions::new().max_depth(Some(3));
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(json, r#"{"max_depth":3}"#);
}

#[test]
fn test_depth_within_limit() {
    let value = nested_arrays(3);
    assert!(deep_clone_with(&value, CloneOptions::with_max_depth(3)).is_ok());
}

#[test]
fn test_depth_over_limit() {
    let value = nested_arrays(4);
    assert_eq!(
        deep_clone_with(&value, CloneOptions::with_max_depth(3)),
        Err(CloneError::DepthLimitExceeded { limit: 3 })
    );
}

#[test]
fn test_zero_depth_allows_only_primitives() {
    let options = CloneOptions::with_max_depth(0);
    assert!(deep_clone_with(&Value::string("flat"), options).is_ok());
    assert!(deep_clone_with(&nested_arrays(1), options).is_err());
}

#[test]
fn test_cycles_do_not_count_towards_depth() {
    let obj = Arc::new(Record::new());
    obj.set("self", Value::object(obj.clone()));

    let mut cloner = DeepCloner::new(CloneOptions::with_max_depth(1));
    let cloned = cloner.clone(&Value::object(obj.clone())).unwrap();
    assert_eq!(cloner.last_stats().map(|s| s.max_depth), Some(1));
    assert_eq!(cloner.options().max_depth, Some(1));

    obj.clear();
    cloned.as_object().unwrap().clear();
}

#[test]
fn test_unlimited_handles_deep_input() {
    let value = nested_arrays(500);
    let mut cloner = DeepCloner::new(CloneOptions::unlimited());
    cloner.clone(&value).unwrap();
    assert_eq!(cloner.last_stats().map(|s| s.containers), Some(500));
    assert_eq!(cloner.last_stats().map(|s| s.max_depth), Some(500));
}

/// `[a, b]` or `[b, a]` where `a = [x]`, `b = [[x]]`: `x` is reachable at
/// depth 3 through `a` and depth 4 through `b`.
fn shared_at_two_depths(a_first: bool) -> (Value, Value) {
    let x = Value::array(Array::from_values([Value::number(1.0)]));
    let a = Value::array(Array::from_values([x.clone()]));
    let b = Value::array(Array::from_values([Value::array(Array::from_values([
        x.clone(),
    ]))]));
    let root = if a_first {
        Array::from_values([a, b])
    } else {
        Array::from_values([b, a])
    };
    (Value::array(root), x)
}

#[test]
fn test_shared_container_depth_ignores_sibling_order() {
    for a_first in [true, false] {
        let (root, _) = shared_at_two_depths(a_first);
        let cloned = deep_clone_with(&root, CloneOptions::with_max_depth(3)).unwrap();
        assert!(deep_equal(&root, &cloned));
        assert_eq!(
            deep_clone_with(&root, CloneOptions::with_max_depth(2)),
            Err(CloneError::DepthLimitExceeded { limit: 2 })
        );
    }
}

#[test]
fn test_shared_container_stays_shared_under_limit() {
    for a_first in [true, false] {
        let (root, x) = shared_at_two_depths(a_first);
        let cloned = deep_clone_with(&root, CloneOptions::with_max_depth(3)).unwrap();

        let branches = cloned.as_array().unwrap().values();
        let (a, b) = if a_first {
            (&branches[0], &branches[1])
        } else {
            (&branches[1], &branches[0])
        };
        let via_a = a.as_array().unwrap().get(0).unwrap();
        let via_b = b
            .as_array()
            .unwrap()
            .get(0)
            .unwrap()
            .as_array()
            .unwrap()
            .get(0)
            .unwrap();
        assert!(via_a.ptr_eq(&via_b));
        assert!(!via_a.ptr_eq(&x));
    }
}

#[test]
fn test_diamond_counts_shared_node_once() {
    let bottom = Value::object(Record::from_entries([("v", Value::number(1.0))]));
    let left = Value::array(Array::from_values([bottom.clone()]));
    let right = Value::array(Array::from_values([bottom]));
    let top = Value::array(Array::from_values([left, right]));

    let mut cloner = DeepCloner::new(CloneOptions::with_max_depth(3));
    cloner.clone(&top).unwrap();
    let stats = cloner.last_stats().unwrap();
    assert_eq!(stats.containers, 4);
    assert_eq!(stats.aliases, 1);
    assert_eq!(stats.max_depth, 3);
}

#[test]
fn test_shallower_host_wins_over_depth_overflow() {
    let deep = Value::array(Array::from_values([Value::array(Arc::new(Array::new()))]));
    let root = Value::object(Record::from_entries([
        ("deep", deep),
        ("widget", Value::host(HostObject::new("Widget", ()))),
    ]));
    assert_eq!(
        deep_clone_with(&root, CloneOptions::with_max_depth(2)),
        Err(CloneError::unsupported("Widget"))
    );
}

#[test]
fn test_shallower_depth_overflow_wins_over_host() {
    let deep = Value::array(Array::from_values([Value::array(Arc::new(Array::new()))]));
    let inner = Value::object(Record::from_entries([(
        "widget",
        Value::host(HostObject::new("Widget", ())),
    )]));
    let root = Value::object(Record::from_entries([
        ("deep", deep),
        ("holder", Value::object(Record::from_entries([("inner", inner)]))),
    ]));

    assert_eq!(
        deep_clone_with(&root, CloneOptions::with_max_depth(2)),
        Err(CloneError::DepthLimitExceeded { limit: 2 })
    );
    assert_eq!(
        deep_clone_with(&root, CloneOptions::unlimited()),
        Err(CloneError::unsupported("Widget"))
    );
}
