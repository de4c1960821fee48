use std::fmt;

use crate::output;
use crate::value::Value;

/// A node of the parsed tree.
///
/// An expression is a nested list: every parenthesized group becomes a
/// `List` and everything else becomes a scalar leaf. Nodes are built once by
/// the parser and never mutated afterward.
///
/// # Examples
/// ```text
/// (== (. a b) 5)
/// ```
/// parses to
/// ```text
/// List [ Value "==", List [ Value ".", Value "a", Value "b" ], Value 5 ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Scalar leaf (string, integer, or a programmatically built boolean)
    Value(Value),

    /// Ordered children of a parenthesized group
    List(Vec<Node>),
}

impl Node {
    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Get the scalar leaf, if this is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(v) => Some(v),
            Node::List(_) => None,
        }
    }

    /// Get the children, if this is a list node.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::Value(_) => None,
            Node::List(items) => Some(items),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", output::to_sexpr(self))
    }
}
