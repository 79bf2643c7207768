//! Thin factory: build a store tree from a plain JSON object.

use serde_json::{Map, Value as Json};
use tracing::debug;

use canopy_types::Permission;

use crate::store::Store;
use crate::value::StoreValue;

/// Build a store from a JSON object.
///
/// Every plain-object value becomes a nested [`Store`] sharing the same
/// default policy, recursively; arrays and primitives become leaves
/// unchanged. Per-key overrides are installed afterwards with
/// [`Store::restrict`].
pub fn create_store(default_policy: Permission, entries: Map<String, Json>) -> Store {
    debug!(policy = %default_policy, fields = entries.len(), "building store");
    let mut store = Store::new(default_policy);
    for (key, value) in entries {
        match value {
            Json::Object(sub_entries) => {
                store.insert(key, create_store(default_policy, sub_entries));
            }
            leaf => {
                store.insert(key, StoreValue::Leaf(leaf));
            }
        }
    }
    store
}

impl Store {
    /// Convenience alias for [`create_store`].
    pub fn from_entries(default_policy: Permission, entries: Map<String, Json>) -> Store {
        create_store(default_policy, entries)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fixture() -> Store {
        let Json::Object(entries) = json!({
            "name": "svc",
            "limits": {"rps": 100, "burst": {"window": 5}},
            "tags": ["a", "b"],
        }) else {
            unreachable!()
        };
        create_store(Permission::Read, entries)
    }

    #[test]
    fn objects_become_nested_stores() {
        let store = fixture();
        assert!(matches!(store.get("limits"), Some(StoreValue::Node(_))));
        assert_eq!(store.read("limits:rps").unwrap(), StoreValue::Leaf(json!(100)));
    }

    #[test]
    fn nesting_is_recursive() {
        let store = fixture();
        assert_eq!(
            store.read("limits:burst:window").unwrap(),
            StoreValue::Leaf(json!(5))
        );
    }

    #[test]
    fn every_level_shares_the_default_policy() {
        let store = fixture();
        assert_eq!(store.default_policy(), Permission::Read);
        let Some(StoreValue::Node(limits)) = store.get("limits") else {
            panic!("expected nested store");
        };
        assert_eq!(limits.default_policy(), Permission::Read);
        let Some(StoreValue::Node(burst)) = limits.get("burst") else {
            panic!("expected nested store");
        };
        assert_eq!(burst.default_policy(), Permission::Read);
    }

    #[test]
    fn arrays_and_primitives_stay_leaves() {
        let store = fixture();
        assert_eq!(store.read("name").unwrap(), StoreValue::Leaf(json!("svc")));
        assert_eq!(store.read("tags").unwrap(), StoreValue::Leaf(json!(["a", "b"])));
    }

    #[test]
    fn empty_object_builds_an_empty_store() {
        let store = create_store(Permission::ReadWrite, Map::new());
        assert!(store.is_empty());
    }

    #[test]
    fn entries_inverts_construction_for_readable_trees() {
        let Json::Object(input) = json!({
            "a": {"b": 1},
            "c": "two",
        }) else {
            unreachable!()
        };
        let store = create_store(Permission::ReadWrite, input.clone());
        assert_eq!(store.entries(), input);
    }
}
