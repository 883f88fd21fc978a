use indexmap::{IndexMap, IndexSet};

use crate::container::{Container, ContainerKind};
use crate::key::Key;
use crate::value::Value;

/// Plain keyed object: own string properties in insertion order.
#[derive(Clone, Debug, Default)]
pub struct PlainObject {
    entries: IndexMap<String, Value>,
}

impl PlainObject {
    /// Create an empty plain object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Write a property by name. Existing properties keep their position.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }
}

impl Container for PlainObject {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Plain
    }

    fn empty_like(&self) -> Object {
        Object::Plain(Self::new())
    }

    fn enumerate_keys(&self) -> Vec<Key> {
        self.entries.keys().cloned().map(Key::String).collect()
    }

    fn get_value(&self, key: &Key) -> Option<Value> {
        match key {
            Key::String(name) => self.entries.get(name).cloned(),
            other => self.entries.get(&other.to_property_key()).cloned(),
        }
    }

    fn set_value(&mut self, key: Key, value: Value) {
        let name = match key {
            Key::String(name) => name,
            other => other.to_property_key(),
        };
        self.entries.insert(name, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Map-like container: explicit key/value pairs in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MapLike {
    entries: IndexMap<Key, Value>,
}

impl MapLike {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Container for MapLike {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Map
    }

    fn empty_like(&self) -> Object {
        Object::Map(Self::new())
    }

    fn enumerate_keys(&self) -> Vec<Key> {
        self.entries.keys().cloned().collect()
    }

    fn get_value(&self, key: &Key) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set_value(&mut self, key: Key, value: Value) {
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Set-like container: each element is both its own key and its value.
#[derive(Clone, Debug, Default)]
pub struct SetLike {
    elements: IndexSet<Key>,
}

impl SetLike {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `element` is present.
    pub fn contains(&self, element: &Key) -> bool {
        self.elements.contains(element)
    }

    /// Iterate elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.elements.iter()
    }
}

impl Container for SetLike {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Set
    }

    fn empty_like(&self) -> Object {
        Object::Set(Self::new())
    }

    fn enumerate_keys(&self) -> Vec<Key> {
        self.elements.iter().cloned().collect()
    }

    fn get_value(&self, key: &Key) -> Option<Value> {
        self.elements
            .get(key)
            .map(|element| element.clone().into_value())
    }

    /// Inserts `value` as an element. The key only names which source
    /// element produced it; a rebuilt nested element is a new identity.
    fn set_value(&mut self, _key: Key, value: Value) {
        self.elements.insert(Key::from_value(value));
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Object wrapper around a primitive, produced when a primitive is used
/// where an object is required. Behaves as a plain keyed object.
#[derive(Clone, Debug)]
pub struct BoxedPrimitive {
    primitive: Value,
    properties: PlainObject,
}

impl BoxedPrimitive {
    /// Box a primitive. Object values are not boxed; callers coerce those
    /// by reference instead.
    pub fn new(primitive: Value) -> Self {
        Self {
            primitive,
            properties: PlainObject::new(),
        }
    }

    /// The wrapped primitive.
    pub fn primitive(&self) -> &Value {
        &self.primitive
    }
}

impl Container for BoxedPrimitive {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Plain
    }

    fn empty_like(&self) -> Object {
        let default = match &self.primitive {
            Value::Bool(_) => Value::Bool(false),
            Value::Number(_) => Value::Number(0.0),
            Value::String(_) => Value::String(String::new()),
            _ => return Object::Plain(PlainObject::new()),
        };
        Object::Boxed(Self::new(default))
    }

    fn enumerate_keys(&self) -> Vec<Key> {
        self.properties.enumerate_keys()
    }

    fn get_value(&self, key: &Key) -> Option<Value> {
        self.properties.get_value(key)
    }

    fn set_value(&mut self, key: Key, value: Value) {
        self.properties.set_value(key, value);
    }

    fn len(&self) -> usize {
        self.properties.len()
    }
}

/// Closed sum over every container a [`Node`](crate::Node) can hold.
#[derive(Clone, Debug)]
pub enum Object {
    Plain(PlainObject),
    Map(MapLike),
    Set(SetLike),
    Boxed(BoxedPrimitive),
}

impl Object {
    fn as_container(&self) -> &dyn Container {
        match self {
            Self::Plain(o) => o,
            Self::Map(o) => o,
            Self::Set(o) => o,
            Self::Boxed(o) => o,
        }
    }

    fn as_container_mut(&mut self) -> &mut dyn Container {
        match self {
            Self::Plain(o) => o,
            Self::Map(o) => o,
            Self::Set(o) => o,
            Self::Boxed(o) => o,
        }
    }
}

impl Container for Object {
    fn kind(&self) -> ContainerKind {
        ContainerKind::of(self)
    }

    fn empty_like(&self) -> Object {
        self.as_container().empty_like()
    }

    fn enumerate_keys(&self) -> Vec<Key> {
        self.as_container().enumerate_keys()
    }

    fn get_value(&self, key: &Key) -> Option<Value> {
        self.as_container().get_value(key)
    }

    fn set_value(&mut self, key: Key, value: Value) {
        self.as_container_mut().set_value(key, value);
    }

    fn len(&self) -> usize {
        self.as_container().len()
    }
}
