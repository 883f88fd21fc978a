//! The container abstraction the merge engine dispatches over.

use std::fmt;

use crate::key::Key;
use crate::object::Object;
use crate::value::Value;

/// The three recognized container kinds.
///
/// When a structure could qualify as more than one kind, map-like wins over
/// set-like, and both win over plain. With the closed [`Object`] enum a
/// value has exactly one kind, so the precedence lives in
/// [`ContainerKind::of`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Explicit key/value pairs.
    Map,
    /// Elements that serve as both key and value.
    Set,
    /// Own string-keyed properties (including boxed primitives).
    Plain,
}

impl ContainerKind {
    /// Resolve the kind of a container.
    pub fn of(object: &Object) -> Self {
        match object {
            Object::Map(_) => Self::Map,
            Object::Set(_) => Self::Set,
            Object::Plain(_) | Object::Boxed(_) => Self::Plain,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map => write!(f, "map"),
            Self::Set => write!(f, "set"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Operations every container kind supports.
pub trait Container {
    /// The kind used for dispatch.
    fn kind(&self) -> ContainerKind;

    /// A new container of the same concrete kind with no entries.
    ///
    /// Kinds that carry a payload beyond their entries (boxed primitives)
    /// produce the default payload for that kind, never a copy.
    fn empty_like(&self) -> Object;

    /// Keys (or elements) in enumeration order.
    fn enumerate_keys(&self) -> Vec<Key>;

    /// The value stored under `key`, or `None` if absent.
    fn get_value(&self, key: &Key) -> Option<Value>;

    /// Store `value` under `key`, replacing any existing value in place.
    fn set_value(&mut self, key: Key, value: Value);

    /// Number of keys or elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no keys or elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
