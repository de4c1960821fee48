//! S-expression rendering for parsed trees.
//!
//! This module turns nodes back into source text, in either a compact
//! single-line form or a pretty form with one argument per line. Printing
//! inverts parsing: a string leaf is backtick-quoted exactly when emitting
//! it bare would read back as something else (an integer, two tokens, or a
//! delimiter), so `parse → print → parse` reproduces the same tree.
//!
//! # Examples
//!
//! ```
//! use pnq_lang::{Node, Value};
//! use pnq_lang::output::to_sexpr;
//!
//! let node = Node::List(vec![
//!     Node::Value(Value::String("says".into())),
//!     Node::Value(Value::String("hello world".into())),
//! ]);
//!
//! assert_eq!(to_sexpr(&node), "(says `hello world`)");
//! ```

use crate::ast::Node;
use crate::value::Value;

pub struct SexprPrinter {
    pretty: bool,
}

impl SexprPrinter {
    pub fn new(pretty: bool) -> Self {
        SexprPrinter { pretty }
    }

    pub fn print(&self, node: &Node) -> String {
        self.print_node(node, 0)
    }

    /// Prints a list body with its explicit parens; the form a root list
    /// takes in source text.
    pub fn print_items(&self, items: &[Node]) -> String {
        self.print_list(items, 0)
    }

    fn print_node(&self, node: &Node, indent: usize) -> String {
        match node {
            Node::Value(v) => Self::scalar(v),
            Node::List(items) => self.print_list(items, indent),
        }
    }

    fn print_list(&self, items: &[Node], indent: usize) -> String {
        // Lists of scalars stay on one line even in pretty mode.
        if !self.pretty || items.iter().all(|node| !node.is_list()) {
            let parts: Vec<String> = items
                .iter()
                .map(|node| self.print_node(node, indent))
                .collect();
            return format!("({})", parts.join(" "));
        }

        let mut result = String::from("(");
        for (position, node) in items.iter().enumerate() {
            if position > 0 {
                result.push('\n');
                result.push_str(&self.indent(indent + 1));
            }
            result.push_str(&self.print_node(node, indent + 1));
        }
        result.push(')');
        result
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::String(s) if needs_quotes(s) => format!("`{}`", s),
            Value::String(s) => s.clone(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

// A bare rendering must lex as one symbol token and must not coerce back
// to an integer leaf.
fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.parse::<i64>().is_ok()
        || s.chars()
            .any(|c| matches!(c, '`' | '(' | ')' | ' ' | '\t' | '\n' | '\r'))
}

// Convenience functions

/// Renders a node as a compact single-line s-expression.
///
/// # Examples
///
/// ```
/// use pnq_lang::{Node, Value};
/// use pnq_lang::output::to_sexpr;
///
/// let node = Node::List(vec![
///     Node::Value(Value::String("+".into())),
///     Node::Value(Value::Integer(1)),
///     Node::Value(Value::Integer(2)),
/// ]);
/// assert_eq!(to_sexpr(&node), "(+ 1 2)");
/// ```
pub fn to_sexpr(node: &Node) -> String {
    SexprPrinter::new(false).print(node)
}

/// Renders a node with nested arguments indented one per line.
///
/// Lists containing only scalars stay inline; 2-space indentation per
/// nesting level otherwise.
///
/// # Examples
///
/// ```
/// use pnq_lang::{Node, Value};
/// use pnq_lang::output::to_sexpr_pretty;
///
/// let node = Node::List(vec![
///     Node::Value(Value::String("==".into())),
///     Node::List(vec![
///         Node::Value(Value::String(".".into())),
///         Node::Value(Value::String("a".into())),
///         Node::Value(Value::String("b".into())),
///     ]),
///     Node::Value(Value::Integer(5)),
/// ]);
/// assert_eq!(to_sexpr_pretty(&node), "(==\n  (. a b)\n  5)");
/// ```
pub fn to_sexpr_pretty(node: &Node) -> String {
    SexprPrinter::new(true).print(node)
}
