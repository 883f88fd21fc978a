use std::collections::HashSet;
use std::fmt;

use crate::container::{Container, ContainerKind};
use crate::error::TypeError;
use crate::key::{format_number, number_bits, Key};
use crate::node::{Node, NodeId};
use crate::object::{BoxedPrimitive, Object, PlainObject};

/// A primitive or a reference to an object-like container.
///
/// `PartialEq` compares primitives by value (IEEE semantics for numbers) and
/// objects by identity. Use [`Value::deep_eq`] for structural comparison.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Node),
}

impl Value {
    /// Returns `true` for reference values. `Null` is not object-like.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The referenced node, if this is an object.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Object(node) => Some(node),
            _ => None,
        }
    }

    /// Kind of the referenced container, if this is an object.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        self.as_node()?.kind().ok()
    }

    /// Short name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
        }
    }

    /// Coerce to an object.
    ///
    /// Objects are returned by reference, unchanged. `Undefined` and `Null`
    /// become a fresh empty plain object; other primitives are boxed into a
    /// fresh wrapper, so the original primitive is never affected.
    pub fn to_object(self) -> Node {
        match self {
            Self::Object(node) => node,
            Self::Undefined | Self::Null => Node::plain(),
            primitive => Node::new(Object::Boxed(BoxedPrimitive::new(primitive))),
        }
    }

    /// Read a key from an object value. Primitives have no keys.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.as_node()?.get(key)
    }

    /// Follow a path of property names through nested objects.
    pub fn get_path(&self, path: &[&str]) -> Option<Value> {
        path.iter()
            .try_fold(self.clone(), |current, segment| current.get(*segment))
    }

    /// Structural equality: same primitives, same container kinds, same
    /// entries, regardless of node identity. Cycles are tolerated.
    pub fn deep_eq(&self, other: &Value) -> bool {
        let mut assumed = HashSet::new();
        deep_eq_inner(self, other, &mut assumed)
    }
}

fn deep_eq_inner(a: &Value, b: &Value, assumed: &mut HashSet<(NodeId, NodeId)>) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => nodes_deep_eq(x, y, assumed),
        // SameValueZero, as for keys: NaN matches NaN.
        (Value::Number(x), Value::Number(y)) => number_bits(*x) == number_bits(*y),
        _ => a == b,
    }
}

fn nodes_deep_eq(x: &Node, y: &Node, assumed: &mut HashSet<(NodeId, NodeId)>) -> bool {
    if x.ptr_eq(y) || !assumed.insert((x.id(), y.id())) {
        return true;
    }
    let (Ok(left), Ok(right)) = (x.try_borrow(), y.try_borrow()) else {
        return false;
    };
    if left.kind() != right.kind() || left.len() != right.len() {
        return false;
    }
    match (&*left, &*right) {
        (Object::Boxed(l), Object::Boxed(r)) if !l.primitive().deep_eq(r.primitive()) => false,
        (Object::Boxed(_), Object::Plain(_)) | (Object::Plain(_), Object::Boxed(_)) => false,
        (Object::Set(l), Object::Set(r)) => {
            // Primitive elements match by key; object elements need a
            // structurally equal partner that has not been claimed yet.
            let mut claimed = HashSet::new();
            for element in l.iter() {
                let Key::Object(node) = element else {
                    if !r.contains(element) {
                        return false;
                    }
                    continue;
                };
                let partner = r.iter().find_map(|candidate| match candidate {
                    Key::Object(other) if !claimed.contains(&other.id()) => {
                        let mut trial = assumed.clone();
                        nodes_deep_eq(node, other, &mut trial).then_some((other.id(), trial))
                    }
                    _ => None,
                });
                match partner {
                    Some((id, trial)) => {
                        claimed.insert(id);
                        *assumed = trial;
                    }
                    None => return false,
                }
            }
            true
        }
        _ => left.enumerate_keys().into_iter().all(|key| {
            match (left.get_value(&key), right.get_value(&key)) {
                (Some(l), Some(r)) => deep_eq_inner(&l, &r, assumed),
                _ => false,
            }
        }),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Object(node) => write!(f, "{node:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Self::Object(node)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        key.into_value()
    }
}

impl TryFrom<Value> for Node {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(node) => Ok(node),
            other => Err(TypeError::NotAnObject(other.type_name())),
        }
    }
}

/// Build a fresh, acyclic graph from JSON.
///
/// Objects become plain objects in document order. Arrays become plain
/// objects keyed by index (`"0"`, `"1"`, ...).
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                let mut obj = PlainObject::new();
                for (index, item) in items.into_iter().enumerate() {
                    obj.insert(index.to_string(), Self::from(item));
                }
                Self::Object(Node::new(Object::Plain(obj)))
            }
            serde_json::Value::Object(map) => {
                let mut obj = PlainObject::new();
                for (name, item) in map {
                    obj.insert(name, Self::from(item));
                }
                Self::Object(Node::new(Object::Plain(obj)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_not_object_like() {
        assert!(!Value::Null.is_object_like());
        assert!(!Value::Undefined.is_object_like());
        assert!(Value::from(Node::plain()).is_object_like());
    }

    #[test]
    fn to_object_keeps_reference() {
        let node = Node::map();
        let coerced = Value::from(node.clone()).to_object();
        assert!(coerced.ptr_eq(&node));
    }

    #[test]
    fn to_object_boxes_primitives() {
        let boxed = Value::from("text").to_object();
        assert_eq!(boxed.kind().unwrap(), ContainerKind::Plain);
        let object = boxed.try_borrow().unwrap();
        match &*object {
            Object::Boxed(b) => assert_eq!(b.primitive(), &Value::from("text")),
            other => panic!("expected boxed, got {other:?}"),
        }
    }

    #[test]
    fn to_object_on_null_gives_empty_plain() {
        let node = Value::Null.to_object();
        assert_eq!(node.kind().unwrap(), ContainerKind::Plain);
        assert!(node.is_empty().unwrap());
    }

    #[test]
    fn json_import_preserves_document_order() {
        let value = Value::from(json!({"z": 1, "a": {"m": null}}));
        let keys = value.as_node().unwrap().keys().unwrap();
        assert_eq!(keys, vec![Key::from("z"), Key::from("a")]);
        assert_eq!(value.get_path(&["a", "m"]), Some(Value::Null));
    }

    #[test]
    fn json_arrays_become_index_keyed() {
        let value = Value::from(json!(["x", "y"]));
        assert_eq!(value.get("1"), Some(Value::from("y")));
    }

    #[test]
    fn deep_eq_ignores_identity() {
        let a = Value::from(json!({"a": {"b": [1, 2]}, "c": "d"}));
        let b = Value::from(json!({"c": "d", "a": {"b": [1, 2]}}));
        assert_ne!(a, b);
        assert!(a.deep_eq(&b));
    }

    #[test]
    fn deep_eq_detects_differences() {
        let a = Value::from(json!({"a": {"b": 1}}));
        let b = Value::from(json!({"a": {"b": 2}}));
        assert!(!a.deep_eq(&b));
    }

    #[test]
    fn deep_eq_treats_nan_as_equal() {
        assert!(Value::Number(f64::NAN).deep_eq(&Value::Number(f64::NAN)));
        assert!(Value::Number(0.0).deep_eq(&Value::Number(-0.0)));
        assert!(!Value::Number(1.0).deep_eq(&Value::Number(f64::NAN)));

        let a = Value::from(Node::plain().with("n", f64::NAN));
        let b = Value::from(Node::plain().with("n", f64::NAN));
        assert!(a.deep_eq(&b));
    }

    #[test]
    fn deep_eq_distinguishes_kinds() {
        let plain = Value::from(Node::plain());
        let map = Value::from(Node::map());
        assert!(!plain.deep_eq(&map));
    }

    #[test]
    fn deep_eq_matches_sets_with_object_elements() {
        let a = Value::from(
            Node::empty_set()
                .with_element(Node::plain().with("v", 1))
                .with_element("p"),
        );
        let b = Value::from(
            Node::empty_set()
                .with_element("p")
                .with_element(Node::plain().with("v", 1)),
        );
        assert!(a.deep_eq(&b));
    }

    #[test]
    fn deep_eq_tolerates_cycles() {
        let a = Node::plain();
        a.set("self", a.clone()).unwrap();
        let b = Node::plain();
        b.set("self", b.clone()).unwrap();
        assert!(Value::from(a).deep_eq(&Value::from(b)));
    }

    #[test]
    fn try_from_rejects_primitives() {
        let err = Node::try_from(Value::from(3)).unwrap_err();
        assert_eq!(err, TypeError::NotAnObject("number"));
    }
}
