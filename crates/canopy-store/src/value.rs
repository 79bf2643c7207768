use std::fmt;
use std::rc::Rc;

use serde_json::Value as Json;

use crate::store::Store;

// ---------------------------------------------------------------------------
// Producer
// ---------------------------------------------------------------------------

/// A zero-argument callable that lazily materializes a store value.
///
/// Producers let a sub-store be expensive to build without paying for it at
/// construction time: the closure runs only when a read descends through its
/// key, and its result must be a [`StoreValue::Node`] or the read fails with
/// [`InvalidProducer`](crate::StoreError::InvalidProducer). Writes never
/// invoke producers.
///
/// Cloning is shallow: clones share the same underlying closure.
#[derive(Clone)]
pub struct Producer(Rc<dyn Fn() -> StoreValue>);

impl Producer {
    /// Wrap a closure as a producer.
    pub fn new(f: impl Fn() -> StoreValue + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the underlying closure.
    pub fn call(&self) -> StoreValue {
        (self.0)()
    }

    /// Whether two producers share the same underlying closure.
    pub fn same_closure(a: &Producer, b: &Producer) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

// ---------------------------------------------------------------------------
// StoreValue
// ---------------------------------------------------------------------------

/// Everything a store key can hold.
///
/// A key maps to exactly one variant. Leaves are plain JSON data, including
/// arrays and objects not promoted to nested stores; nodes are nested stores
/// carrying their own policy; producers materialize a node on demand.
#[derive(Clone, Debug)]
pub enum StoreValue {
    /// A terminal JSON value.
    Leaf(Json),
    /// A nested store.
    Node(Store),
    /// A lazily materialized nested store.
    Producer(Producer),
}

impl StoreValue {
    /// Build a producer value from a closure.
    pub fn producer(f: impl Fn() -> StoreValue + 'static) -> Self {
        StoreValue::Producer(Producer::new(f))
    }

    /// The leaf payload, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&Json> {
        match self {
            StoreValue::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// The nested store, if this is a node.
    pub fn as_node(&self) -> Option<&Store> {
        match self {
            StoreValue::Node(store) => Some(store),
            _ => None,
        }
    }

    /// Returns `true` if this is a producer.
    pub fn is_producer(&self) -> bool {
        matches!(self, StoreValue::Producer(_))
    }
}

/// Producers compare by closure identity; leaves and nodes structurally.
impl PartialEq for StoreValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StoreValue::Leaf(a), StoreValue::Leaf(b)) => a == b,
            (StoreValue::Node(a), StoreValue::Node(b)) => a == b,
            (StoreValue::Producer(a), StoreValue::Producer(b)) => Producer::same_closure(a, b),
            _ => false,
        }
    }
}

impl From<Json> for StoreValue {
    fn from(value: Json) -> Self {
        StoreValue::Leaf(value)
    }
}

impl From<Store> for StoreValue {
    fn from(store: Store) -> Self {
        StoreValue::Node(store)
    }
}

impl From<Producer> for StoreValue {
    fn from(producer: Producer) -> Self {
        StoreValue::Producer(producer)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Leaf(Json::String(value.to_string()))
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::Leaf(Json::String(value))
    }
}

#[cfg(test)]
mod tests {
    use canopy_types::Permission;
    use serde_json::json;

    use super::*;

    #[test]
    fn leaf_accessor() {
        let value = StoreValue::Leaf(json!(42));
        assert_eq!(value.as_leaf(), Some(&json!(42)));
        assert!(value.as_node().is_none());
        assert!(!value.is_producer());
    }

    #[test]
    fn node_accessor() {
        let value = StoreValue::from(Store::new(Permission::Read));
        assert!(value.as_node().is_some());
        assert!(value.as_leaf().is_none());
    }

    #[test]
    fn producer_invocation_yields_closure_result() {
        let value = StoreValue::producer(|| StoreValue::Leaf(json!("lazy")));
        let StoreValue::Producer(producer) = &value else {
            panic!("expected producer");
        };
        assert_eq!(producer.call(), StoreValue::Leaf(json!("lazy")));
    }

    #[test]
    fn producer_clones_share_the_closure() {
        let producer = Producer::new(|| StoreValue::Leaf(json!(1)));
        let clone = producer.clone();
        assert!(Producer::same_closure(&producer, &clone));
        assert_eq!(StoreValue::Producer(producer), StoreValue::Producer(clone));
    }

    #[test]
    fn distinct_producers_are_not_equal() {
        let a = StoreValue::producer(|| StoreValue::Leaf(json!(1)));
        let b = StoreValue::producer(|| StoreValue::Leaf(json!(1)));
        assert_ne!(a, b);
    }

    #[test]
    fn string_conversions_make_leaves() {
        assert_eq!(StoreValue::from("x"), StoreValue::Leaf(json!("x")));
        assert_eq!(
            StoreValue::from("y".to_string()),
            StoreValue::Leaf(json!("y"))
        );
    }

    #[test]
    fn cross_variant_comparison_is_false() {
        let leaf = StoreValue::Leaf(json!({}));
        let node = StoreValue::from(Store::new(Permission::ReadWrite));
        assert_ne!(leaf, node);
    }
}
