//! Scalar and tree conversion into serde_json values

use crate::{Node, Value};

/// Convert a scalar to its JSON form
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Integer(n) => serde_json::Value::Number((*n).into()),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
    }
}

/// Convert a tree node to its JSON form, rendering lists as arrays
pub fn node_to_json(node: &Node) -> serde_json::Value {
    match node {
        Node::Value(v) => value_to_json(v),
        Node::List(items) => serde_json::Value::Array(items.iter().map(node_to_json).collect()),
    }
}
