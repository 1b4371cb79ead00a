//! Property tests over generated containers.

use nested_delete::{DeleteOptions, Value, delete, keys};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    /// Deleting an index behaves like `Vec::remove` when in range
    #[test]
    fn prop_list_delete_matches_vec_remove(items in prop::collection::vec(any::<i64>(), 0..16), index in 0usize..20) {
        let list = Value::list(items.iter().copied().map(Value::from));
        let existed = delete(&list, index, &DeleteOptions::new()).unwrap();

        let mut expected = items.clone();
        prop_assert_eq!(existed, index < expected.len());
        if existed {
            expected.remove(index);
        }
        prop_assert_eq!(list.to_json(), json!(expected));
    }

    /// Removing the i-th set element keeps the others in order
    #[test]
    fn prop_set_delete_keeps_survivor_order(items in prop::collection::btree_set(any::<i64>(), 1..12), pick in any::<prop::sample::Index>()) {
        let items: Vec<i64> = items.into_iter().collect();
        let index = pick.index(items.len());
        let set = Value::set(items.iter().copied().map(Value::from));

        prop_assert!(delete(&set, index, &DeleteOptions::new()).unwrap());

        let mut expected = items.clone();
        expected.remove(index);
        let storage = set.as_set().unwrap().borrow();
        let survivors: Vec<Value> = storage.iter().cloned().collect();
        prop_assert_eq!(survivors.len(), expected.len());
        for (got, want) in survivors.iter().zip(&expected) {
            prop_assert!(matches!(got, Value::Int(v) if v == want));
        }
    }

    #[test]
    fn prop_missing_key_never_mutates(name in "[a-z]{1,8}", depth in 1usize..4) {
        let root = Value::from_json(&json!({"a": {"b": {"c": [1, 2]}}}));
        let before = root.to_json();
        let mut chain: Vec<Value> = ["a", "b", "c"].iter().take(depth).map(|k| Value::from(*k)).collect();
        chain.push(Value::from(format!("missing-{name}")));

        prop_assert!(!delete(&root, chain, &DeleteOptions::new()).unwrap());
        prop_assert_eq!(root.to_json(), before);
    }

    /// Draining the only leaf list prunes the whole path
    #[test]
    fn prop_recursive_drain_empties_a_single_path(len in 1usize..8) {
        let items: Vec<u32> = (0..len as u32).collect();
        let root = Value::from_json(&json!({"outer": {"inner": items}}));
        let opts = DeleteOptions::new().with_recursive(true);

        for remaining in (0..len).rev() {
            prop_assert!(delete(&root, keys!["outer", "inner", 0], &opts).unwrap());
            if remaining > 0 {
                prop_assert_eq!(root.to_json()["outer"]["inner"].as_array().map(Vec::len), Some(remaining));
            }
        }
        prop_assert_eq!(root.to_json(), json!({}));
    }
}
