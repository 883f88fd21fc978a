//! Dynamic value model for deepassign.
//!
//! This crate provides the reference-typed value graph that the merge engine
//! walks. Primitives are copied by value; object-like values are shared
//! [`Node`] references whose identity is observable through [`NodeId`].
//!
//! # Key Types
//!
//! - [`Value`] -- Primitive or object reference (`Undefined`, `Null`, `Bool`, `Number`, `String`, `Object`)
//! - [`Node`] / [`NodeId`] -- Shared, interior-mutable container reference and its identity
//! - [`Object`] -- Closed sum over the container kinds
//! - [`Container`] / [`ContainerKind`] -- Per-kind `empty_like` / enumerate / get / set operations
//! - [`Key`] -- SameValueZero-hashed key for map entries and set elements
//! - [`PlainObject`], [`MapLike`], [`SetLike`], [`BoxedPrimitive`] -- Concrete containers

pub mod container;
pub mod error;
pub mod key;
pub mod node;
pub mod object;
pub mod value;

pub use container::{Container, ContainerKind};
pub use error::{TypeError, TypeResult};
pub use key::Key;
pub use node::{Node, NodeId};
pub use object::{BoxedPrimitive, MapLike, Object, PlainObject, SetLike};
pub use value::Value;
