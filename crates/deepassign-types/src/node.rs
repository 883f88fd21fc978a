use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::container::{Container, ContainerKind};
use crate::error::{TypeError, TypeResult};
use crate::key::Key;
use crate::object::{MapLike, Object, PlainObject, SetLike};
use crate::value::Value;

/// Identity of a [`Node`].
///
/// Two `NodeId`s are equal exactly when they were taken from clones of the
/// same node. An id is only meaningful while the node it came from is alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:#x})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node@{:#x}", self.0)
    }
}

/// A shared reference to one container.
///
/// Cloning a `Node` clones the reference, never the contents; mutations made
/// through one clone are visible through all others. This is what lets a
/// value graph contain shared sub-objects and cycles.
#[derive(Clone)]
pub struct Node(Rc<RefCell<Object>>);

impl Node {
    /// Wrap a container in a fresh node.
    pub fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    /// A new empty plain keyed object.
    pub fn plain() -> Self {
        Self::new(Object::Plain(PlainObject::new()))
    }

    /// A new empty map-like container.
    pub fn map() -> Self {
        Self::new(Object::Map(MapLike::new()))
    }

    /// A new empty set-like container.
    pub fn empty_set() -> Self {
        Self::new(Object::Set(SetLike::new()))
    }

    /// Identity of this node.
    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    /// Returns `true` if both references point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the container for reading.
    pub fn try_borrow(&self) -> TypeResult<Ref<'_, Object>> {
        self.0
            .try_borrow()
            .map_err(|_| TypeError::AlreadyBorrowed(self.id()))
    }

    /// Borrow the container for writing.
    pub fn try_borrow_mut(&self) -> TypeResult<RefMut<'_, Object>> {
        self.0
            .try_borrow_mut()
            .map_err(|_| TypeError::AlreadyBorrowedMut(self.id()))
    }

    /// The container kind of this node.
    pub fn kind(&self) -> TypeResult<ContainerKind> {
        Ok(self.try_borrow()?.kind())
    }

    /// Number of keys or elements.
    pub fn len(&self) -> TypeResult<usize> {
        Ok(self.try_borrow()?.len())
    }

    /// Returns `true` if the container has no keys or elements.
    pub fn is_empty(&self) -> TypeResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of the keys in enumeration order.
    pub fn keys(&self) -> TypeResult<Vec<Key>> {
        Ok(self.try_borrow()?.enumerate_keys())
    }

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent and an error if the node is
    /// mutably borrowed.
    pub fn try_get(&self, key: impl Into<Key>) -> TypeResult<Option<Value>> {
        Ok(self.try_borrow()?.get_value(&key.into()))
    }

    /// Shorthand for [`try_get`](Node::try_get) that folds a borrow
    /// conflict into `None`.
    ///
    /// A `None` here does not prove the key is absent: the node may be
    /// mutably borrowed. Use `try_get` when the two must be told apart.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.try_get(key).ok().flatten()
    }

    /// Store `value` under `key`.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) -> TypeResult<()> {
        self.try_borrow_mut()?.set_value(key.into(), value.into());
        Ok(())
    }

    /// Builder form of [`set`](Node::set) for freshly created nodes.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently borrowed.
    pub fn with(self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.0.borrow_mut().set_value(key.into(), value.into());
        self
    }

    /// Builder that adds one element (set) or stores the value under itself.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently borrowed.
    pub fn with_element(self, element: impl Into<Value>) -> Self {
        let element = element.into();
        self.0
            .borrow_mut()
            .set_value(Key::from_value(element.clone()), element);
        self
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Contents are omitted: the graph may be cyclic.
        match self.0.try_borrow() {
            Ok(object) => write!(f, "{:?}{{{}}}", object.kind(), self.id()),
            Err(_) => write!(f, "Borrowed{{{}}}", self.id()),
        }
    }
}
