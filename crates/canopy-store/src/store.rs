//! The store node: policy resolution and permission-checked traversal.

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};
use tracing::debug;

use canopy_types::{path, Permission};

use crate::error::{AccessKind, Result, StoreError};
use crate::factory::create_store;
use crate::value::StoreValue;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A hierarchical, permissioned store node.
///
/// Each node holds a default policy, an optional table of per-key overrides,
/// and a map of local keys to [`StoreValue`]s. Paths address values through
/// nested nodes: `store.read("db:host")` checks the policy governing `db` on
/// this node, then delegates `host` to the `db` child.
///
/// # Policy precedence
///
/// A key holding a nested store is governed by that store's own default
/// policy; the local override table is ignored for it. Every other key is
/// governed by its override if one exists, else by this node's default.
///
/// # Fallback traversal
///
/// Writing (or reading) through an intermediate segment that is not a nested
/// store does not auto-vivify a path: the operation falls through to the
/// remaining suffix on the same node. This is a compatibility guarantee
/// carried over from the original system, not an accident. The one
/// exception is reading past an existing leaf, which fails with
/// [`StoreError::NotFound`].
#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    default_policy: Permission,
    access_policies: BTreeMap<String, Permission>,
    fields: BTreeMap<String, StoreValue>,
}

impl Store {
    /// Create an empty node with the given default policy.
    pub fn new(default_policy: Permission) -> Self {
        Self {
            default_policy,
            access_policies: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    /// The policy applied to keys without an explicit override. This is also
    /// the policy consulted by a parent node when this node is nested under
    /// it.
    pub fn default_policy(&self) -> Permission {
        self.default_policy
    }

    /// Install a per-key policy override.
    ///
    /// Overrides apply only to keys that do not hold a nested store; a
    /// nested store is always governed by its own default policy.
    pub fn restrict(&mut self, key: impl Into<String>, policy: Permission) -> &mut Self {
        self.access_policies.insert(key.into(), policy);
        self
    }

    /// Place a field directly, bypassing path traversal and permission
    /// checks.
    ///
    /// This is the construction-time surface, used by the factory and for
    /// installing producers or pre-built children. Runtime mutation goes
    /// through [`Store::write`].
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StoreValue>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The value held directly under a local key, if any.
    pub fn get(&self, key: &str) -> Option<&StoreValue> {
        self.fields.get(key)
    }

    /// Number of local fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the node has no local fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // -----------------------------------------------------------------------
    // Policy resolution
    // -----------------------------------------------------------------------

    /// The policy governing a local key, per the precedence rules above.
    fn effective_policy(&self, key: &str) -> Permission {
        if let Some(StoreValue::Node(child)) = self.fields.get(key) {
            return child.default_policy;
        }
        self.access_policies
            .get(key)
            .copied()
            .unwrap_or(self.default_policy)
    }

    /// Whether reading through the first segment of `path` is allowed.
    pub fn allowed_to_read(&self, path: &str) -> bool {
        let (first, _) = path::split_first(path);
        self.effective_policy(first).can_read()
    }

    /// Whether writing through the first segment of `path` is allowed.
    pub fn allowed_to_write(&self, path: &str) -> bool {
        let (first, _) = path::split_first(path);
        self.effective_policy(first).can_write()
    }

    // -----------------------------------------------------------------------
    // Read
    // -----------------------------------------------------------------------

    /// Read the value at `path`.
    ///
    /// The empty path reads the node itself. Permission is checked for the
    /// leading segment before descending; nested stores are traversed
    /// recursively and producers are invoked as encountered. The returned
    /// value is an independent clone of the stored one.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AccessDenied`] if the leading segment's effective
    ///   policy disallows reading.
    /// - [`StoreError::NotFound`] if the path names a missing terminal key
    ///   or descends past a leaf.
    /// - [`StoreError::InvalidProducer`] if a producer on the path yields
    ///   anything but a store.
    pub fn read(&self, path: &str) -> Result<StoreValue> {
        if path.is_empty() {
            return Ok(StoreValue::Node(self.clone()));
        }

        let (first, rest) = path::split_first(path);
        if !self.allowed_to_read(first) {
            return Err(StoreError::AccessDenied {
                op: AccessKind::Read,
                path: path.to_string(),
            });
        }

        match self.fields.get(first) {
            Some(StoreValue::Node(child)) => child.read(rest),
            Some(StoreValue::Producer(producer)) => match producer.call() {
                StoreValue::Node(node) => node.read(rest),
                _ => Err(StoreError::InvalidProducer {
                    segment: first.to_string(),
                }),
            },
            Some(StoreValue::Leaf(value)) => {
                if rest.is_empty() {
                    Ok(StoreValue::Leaf(value.clone()))
                } else {
                    // Cannot descend past a leaf.
                    Err(StoreError::NotFound {
                        path: path.to_string(),
                    })
                }
            }
            None => {
                if rest.is_empty() {
                    Err(StoreError::NotFound {
                        path: path.to_string(),
                    })
                } else {
                    // Missing intermediate segment: fall through to the
                    // suffix on this node, mirroring the write fallback.
                    self.read(rest)
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Write
    // -----------------------------------------------------------------------

    /// Write `value` at `path`, returning this node for fluent chaining.
    ///
    /// A plain JSON object written to a terminal segment is promoted to a
    /// nested store inheriting this node's default policy; an existing
    /// [`Store`] is adopted as-is; arrays, primitives, `null`, and producers
    /// are stored unchanged. Writes never invoke producers.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AccessDenied`] if the leading segment's effective
    ///   policy disallows writing.
    /// - [`StoreError::EmptyPath`] if `path` is empty.
    pub fn write(&mut self, path: &str, value: impl Into<StoreValue>) -> Result<&mut Store> {
        self.write_value(path, value.into())?;
        Ok(self)
    }

    fn write_value(&mut self, path: &str, value: StoreValue) -> Result<()> {
        if path.is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let (first, rest) = path::split_first(path);
        if !self.allowed_to_write(first) {
            return Err(StoreError::AccessDenied {
                op: AccessKind::Write,
                path: path.to_string(),
            });
        }

        if rest.is_empty() {
            let stored = match value {
                StoreValue::Leaf(Json::Object(entries)) => {
                    debug!(key = first, "promoting object value to nested store");
                    StoreValue::Node(create_store(self.default_policy, entries))
                }
                other => other,
            };
            self.fields.insert(first.to_string(), stored);
            return Ok(());
        }

        // Descend only through nested stores. Anything else falls through
        // to the remaining suffix on this node (no auto-vivify).
        if let Some(StoreValue::Node(child)) = self.fields.get_mut(first) {
            return child.write_value(rest, value);
        }
        self.write_value(rest, value)
    }

    // -----------------------------------------------------------------------
    // Bulk operations
    // -----------------------------------------------------------------------

    /// Bulk write from a JSON object.
    ///
    /// A top-level key holding a plain object is flattened one level: each
    /// sub-key is written individually as `"key:sub_key"`, so permission
    /// checks apply per leaf rather than per whole sub-object. Every other
    /// value is written under its key directly.
    ///
    /// There is no rollback: a failing write aborts the call and leaves
    /// earlier writes in place.
    pub fn write_entries(&mut self, entries: &Map<String, Json>) -> Result<()> {
        for (key, value) in entries {
            match value {
                Json::Object(sub_entries) => {
                    for (sub_key, sub_value) in sub_entries {
                        let sub_path = path::join(key, sub_key);
                        self.write_value(&sub_path, StoreValue::Leaf(sub_value.clone()))?;
                    }
                }
                other => {
                    self.write_value(key, StoreValue::Leaf(other.clone()))?;
                }
            }
        }
        Ok(())
    }

    /// Snapshot the readable content as a plain JSON object.
    ///
    /// Keys failing the read check and producer-valued keys are omitted
    /// entirely, never returned as redacted placeholders. Nested stores
    /// serialize recursively through their own `entries()`. The result is a
    /// fresh copy with no ownership shared with the live tree; key order is
    /// deterministic.
    pub fn entries(&self) -> Map<String, Json> {
        let mut result = Map::new();
        for (key, value) in &self.fields {
            if !self.allowed_to_read(key) {
                continue;
            }
            match value {
                StoreValue::Leaf(leaf) => {
                    result.insert(key.clone(), leaf.clone());
                }
                StoreValue::Node(child) => {
                    result.insert(key.clone(), Json::Object(child.entries()));
                }
                StoreValue::Producer(_) => {}
            }
        }
        result
    }
}
