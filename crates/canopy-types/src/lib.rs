//! Foundation types for canopy.
//!
//! This crate provides the permission and path primitives used by the store
//! crate. It sits at the bottom of the workspace and depends on nothing
//! beyond serde and thiserror.
//!
//! # Key Types
//!
//! - [`Permission`] — Read/write capability attached to a store key or node
//! - [`path`] — Colon-delimited path splitting and joining
//! - [`TypeError`] — Parse failures for the wire forms

pub mod error;
pub mod path;
pub mod permission;

pub use error::TypeError;
pub use permission::Permission;
