//! Updater library.
//!
//! An updater computes a new value from an old one and an incoming one without
//! touching the old value. [`at_path`] lifts an updater into a [`ChainWord`] that
//! applies it to one addressed slot of an argument snapshot.

use std::sync::Arc;

use chainwords_types::{Path, Value};

use crate::snapshot::Snapshot;

/// A shared `(old, incoming) -> new` function.
pub type Updater = Arc<dyn Fn(&Value, Value) -> Value + Send + Sync>;

/// A configured chain-word: `(snapshot, args) -> successor snapshot`.
pub type ChainWord = Arc<dyn Fn(&Snapshot, &[Value]) -> Snapshot + Send + Sync>;

/// Wrap a closure as a [`ChainWord`].
pub fn chain_word(
    word: impl Fn(&Snapshot, &[Value]) -> Snapshot + Send + Sync + 'static,
) -> ChainWord {
    Arc::new(word)
}

pub fn replace(_old: &Value, incoming: Value) -> Value {
    incoming
}

/// Shallow-merge the keys of `incoming` over a copy of `old`.
///
/// A non-map `old` counts as empty; a non-map `incoming` adds no keys.
pub fn merge(old: &Value, incoming: Value) -> Value {
    let mut entries = old.as_map().cloned().unwrap_or_default();
    if let Value::Map(incoming) = incoming {
        entries.extend(incoming);
    }
    Value::Map(entries)
}

/// Append `incoming` as a single element to a copy of `old`.
pub fn append(old: &Value, incoming: Value) -> Value {
    let mut items = old.as_list().map(<[Value]>::to_vec).unwrap_or_default();
    items.push(incoming);
    Value::List(items)
}

/// Append every element of `incoming` to a copy of `old`.
pub fn append_all(old: &Value, incoming: Value) -> Value {
    let mut items = old.as_list().map(<[Value]>::to_vec).unwrap_or_default();
    items.extend(incoming.into_items());
    Value::List(items)
}

/// An updater that sets `key` to the incoming value over a copy of `old`.
pub fn merge_key(key: impl Into<String>) -> impl Fn(&Value, Value) -> Value + Clone + Send + Sync {
    let key = key.into();
    move |old: &Value, incoming: Value| {
        let mut entries = old.as_map().cloned().unwrap_or_default();
        entries.insert(key.clone(), incoming);
        Value::Map(entries)
    }
}

/// Lift `updater` to a chain-word acting on the snapshot slot at `index`.
///
/// The first invocation argument is the incoming value (`Unset` when none is given);
/// further arguments are ignored.
pub fn at_path(
    index: impl Into<Path>,
    updater: impl Fn(&Value, Value) -> Value + Send + Sync + 'static,
) -> ChainWord {
    let path = index.into();
    Arc::new(move |snapshot: &Snapshot, args: &[Value]| {
        let incoming = args.first().cloned().unwrap_or_default();
        snapshot.update(&path, |old| updater(old, incoming))
    })
}

#[cfg(test)]
mod tests {
    use chainwords_types::Value;
    use serde_json::json;

    use super::{append, append_all, at_path, merge, merge_key, replace};
    use crate::snapshot::Snapshot;

    fn args(value: serde_json::Value) -> Snapshot {
        Snapshot::new(Value::from(value).into_items())
    }

    #[test]
    fn replace_returns_incoming() {
        assert_eq!(replace(&"a".into(), "b".into()), Value::from("b"));
    }

    #[test]
    fn replace_within_path() {
        let word = at_path(0, replace);
        let updated = word(&args(json!([{"foo": "bar"}, 3])), &[12.into()]);
        assert_eq!(updated, args(json!([12, 3])));
    }

    #[test]
    fn merge_assigns_over_old() {
        let merged = merge(
            &Value::from(json!({"foo": "bar", "a": 1})),
            Value::from(json!({"foo": "baz", "b": 2})),
        );
        assert_eq!(merged, Value::from(json!({"foo": "baz", "a": 1, "b": 2})));
    }

    #[test]
    fn merge_treats_unset_as_empty() {
        let merged = merge(&Value::Unset, Value::from(json!({"a": 1})));
        assert_eq!(merged, Value::from(json!({"a": 1})));
    }

    #[test]
    fn merge_ignores_non_map_incoming() {
        let merged = merge(&Value::from(json!({"a": 1})), "oops".into());
        assert_eq!(merged, Value::from(json!({"a": 1})));
    }

    #[test]
    fn append_to_existing_list() {
        let list = append(&Value::list([1, 2]), 3.into());
        assert_eq!(list, Value::list([1, 2, 3]));
    }

    #[test]
    fn append_to_unset() {
        assert_eq!(append(&Value::Unset, 3.into()), Value::list([3]));
    }

    #[test]
    fn append_within_path() {
        let word = at_path(1, append);
        let updated = word(&args(json!([{"foo": "bar"}, [3]])), &[4.into()]);
        assert_eq!(updated, args(json!([{"foo": "bar"}, [3, 4]])));
    }

    #[test]
    fn append_all_extends_list() {
        let list = append_all(&Value::list([1, 2, 3]), Value::list([4, 5, 6]));
        assert_eq!(list, Value::list([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn append_all_within_path() {
        let word = at_path(1, append_all);
        let updated = word(&args(json!([{"foo": "bar"}, [1]])), &[Value::from(json!([2, "3"]))]);
        assert_eq!(updated, args(json!([{"foo": "bar"}, [1, 2, "3"]])));
    }

    #[test]
    fn append_all_scalar_is_single_element() {
        assert_eq!(append_all(&Value::Unset, 7.into()), Value::list([7]));
        assert_eq!(append_all(&Value::list([1]), Value::Unset), Value::list([1]));
    }

    #[test]
    fn merge_key_sets_single_key() {
        let set_foo = merge_key("foo");
        assert_eq!(
            set_foo(&Value::from(json!({"foo": "bar"})), "baz".into()),
            Value::from(json!({"foo": "baz"}))
        );
    }

    #[test]
    fn merge_key_on_unset_builds_pair() {
        let set_foo = merge_key("foo");
        assert_eq!(
            set_foo(&Value::Unset, "baz".into()),
            Value::from(json!({"foo": "baz"}))
        );
    }

    #[test]
    fn merge_key_within_path() {
        let word = at_path(0, merge_key("foo"));
        let updated = word(&args(json!([{"foo": "bar"}, 2])), &["baz".into()]);
        assert_eq!(updated, args(json!([{"foo": "baz"}, 2])));
    }

    #[test]
    fn at_path_leaves_snapshot_untouched() {
        let word = at_path(0, replace);
        let original = args(json!([{"foo": "bar"}, 2]));
        let _ = word(&original, &["baz".into()]);
        assert_eq!(original, args(json!([{"foo": "bar"}, 2])));
    }

    #[test]
    fn at_path_compound_index() {
        let word = at_path("0.foo", replace);
        let updated = word(&args(json!([{"foo": "bar"}, 2])), &["baz".into()]);
        assert_eq!(updated, args(json!([{"foo": "baz"}, 2])));
    }

    #[test]
    fn at_path_creates_missing_keys() {
        let word = at_path("0.foo", replace);
        let updated = word(&args(json!([{}, 2])), &["baz".into()]);
        assert_eq!(updated, args(json!([{"foo": "baz"}, 2])));
    }

    #[test]
    fn at_path_huge_position_leaves_snapshot_unchanged() {
        let word = at_path(i64::MAX, replace);
        let original = args(json!([1, 2]));
        assert_eq!(word(&original, &[3.into()]), original);
    }

    #[test]
    fn at_path_huge_nested_index_builds_map() {
        let word = at_path("0.4000000000", replace);
        let updated = word(&args(json!([[1], 2])), &["x".into()]);
        assert_eq!(updated, args(json!([{"0": 1, "4000000000": "x"}, 2])));
    }

    #[test]
    fn at_path_without_args_writes_unset() {
        let word = at_path(1, replace);
        let updated = word(&args(json!([1, 2])), &[]);
        assert_eq!(updated.args(), &[Value::Int(1), Value::Unset]);
    }
}
