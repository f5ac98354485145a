//! RFC 7396 JSON Merge Patch, used to layer the local config over the global one.

use serde_json::Value;

/// Apply `patch` on top of `target`.
///
/// Objects merge key by key, `null` removes a key, and anything else
/// (arrays, scalars, type changes) replaces the target value.
///
/// ```
/// use serde_json::json;
/// use catalogue_config::merge::merge_patch;
///
/// let global = json!({"api": {"base_url": "https://a", "timeout_secs": 30}});
/// let local = json!({"api": {"base_url": "https://b"}});
/// assert_eq!(
///     merge_patch(global, local),
///     json!({"api": {"base_url": "https://b", "timeout_secs": 30}})
/// );
/// ```
pub fn merge_patch(target: Value, patch: Value) -> Value {
    let Value::Object(patch_map) = patch else {
        return patch;
    };

    let mut target_map = match target {
        Value::Object(m) => m,
        _ => serde_json::Map::new(),
    };

    for (key, patch_value) in patch_map {
        if patch_value.is_null() {
            target_map.remove(&key);
        } else {
            let existing = target_map.remove(&key).unwrap_or(Value::Null);
            target_map.insert(key, merge_patch(existing, patch_value));
        }
    }

    Value::Object(target_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn nested_sections_merge() {
        let target = json!({"auth": {"callback_port": 1, "store": "keyring"}});
        let patch = json!({"auth": {"store": "file"}, "logging": {"json": true}});
        assert_eq!(
            merge_patch(target, patch),
            json!({"auth": {"callback_port": 1, "store": "file"}, "logging": {"json": true}})
        );
    }

    #[test]
    fn null_removes_key() {
        let target = json!({"search": {"limit": 5, "doc_only_cap": 3}});
        let patch = json!({"search": {"doc_only_cap": null}});
        assert_eq!(merge_patch(target, patch), json!({"search": {"limit": 5}}));
    }

    #[test]
    fn arrays_replace_wholesale() {
        let target = json!({"admin": {"emails": ["a@x", "b@x"]}});
        let patch = json!({"admin": {"emails": ["c@x"]}});
        assert_eq!(merge_patch(target, patch), json!({"admin": {"emails": ["c@x"]}}));
    }

    #[test]
    fn type_changes_replace() {
        assert_eq!(merge_patch(json!({"a": {"b": 1}}), json!({"a": 2})), json!({"a": 2}));
        assert_eq!(merge_patch(json!({"a": 2}), json!({"a": {"b": 1}})), json!({"a": {"b": 1}}));
    }

    #[test]
    fn object_patch_over_scalar_drops_nulls() {
        assert_eq!(merge_patch(json!(7), json!({"x": null, "y": 1})), json!({"y": 1}));
    }

    proptest! {
        #[test]
        fn empty_patch_is_identity(target in arb_object(true)) {
            prop_assert_eq!(merge_patch(target.clone(), json!({})), target);
        }

        #[test]
        fn null_free_patch_is_idempotent(target in arb_object(true), patch in arb_object(false)) {
            let once = merge_patch(target, patch.clone());
            let twice = merge_patch(once.clone(), patch);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn patch_keys_always_win(target in arb_object(true), patch in arb_object(false)) {
            let merged = merge_patch(target, patch.clone());
            for (k, v) in patch.as_object().unwrap() {
                if !v.is_object() {
                    prop_assert_eq!(merged.get(k), Some(v));
                }
            }
        }
    }

    fn arb_leaf(allow_null: bool) -> BoxedStrategy<Value> {
        let base = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        if allow_null {
            prop_oneof![Just(Value::Null), base].boxed()
        } else {
            base.boxed()
        }
    }

    fn arb_object(allow_null: bool) -> impl Strategy<Value = Value> {
        let value = prop_oneof![
            arb_leaf(allow_null),
            prop::collection::hash_map("[a-z]{1,2}", arb_leaf(allow_null), 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ];
        prop::collection::hash_map("[a-z]{1,3}", value, 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }
}
