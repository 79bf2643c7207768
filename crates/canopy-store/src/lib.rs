//! Hierarchical, permissioned store for semi-structured data.
//!
//! A [`Store`] is a tree of named values where every node carries its own
//! read/write policy, addressed through colon-delimited paths such as
//! `"db:credentials:user"`. One object graph can hold data of mixed
//! sensitivity behind a single read/write/entries surface that enforces
//! per-node policy transparently.
//!
//! # Key Types
//!
//! - [`Store`] — a tree node: default policy, per-key overrides, fields
//! - [`StoreValue`] — what a key can hold: leaf, nested store, or producer
//! - [`Producer`] — a zero-argument callable yielding a store on demand
//! - [`StoreError`] — access, lookup, and producer failures
//!
//! # Access control
//!
//! Every operation checks the leading path segment before descending. A key
//! without an explicit override answers with the node's default policy; a
//! key holding a nested store always answers with that store's own default
//! policy, so a component's boundary cannot be widened or narrowed from
//! outside. See [`Store::allowed_to_read`].
//!
//! # Design Rules
//!
//! 1. Permission violations fail at the offending segment, never later.
//! 2. Traversal goes through the field map only — a key holds exactly one
//!    of {leaf, nested store, producer}.
//! 3. [`Store::entries`] returns an independent snapshot, never a live view.
//! 4. The structure is single-threaded and fully synchronous; recursion
//!    depth equals path depth.

pub mod error;
pub mod factory;
pub mod store;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use canopy_types::Permission;
pub use error::{AccessKind, Result, StoreError};
pub use factory::create_store;
pub use store::Store;
pub use value::{Producer, StoreValue};
