use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::{
    ast::Node,
    lexer::{LexError, tokenize},
    output::SexprPrinter,
    parser::{ParseError, Parser},
    value::Value,
};

/// Anything that can go wrong turning source text into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Lexical error
    Lex(LexError),
    /// Syntax error
    Parse(ParseError),
}

impl CompileError {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            CompileError::Lex(e) => e.offset,
            CompileError::Parse(e) => e.offset(),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(e) => Some(e),
            CompileError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(e: LexError) -> Self {
        CompileError::Lex(e)
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

/// A parsed expression: the root list plus the symbol set gathered while
/// parsing it.
///
/// The tree is immutable once built. Traversal (`lists`) and aggregation
/// (`collect`) only ever borrow it, so an `Ast` can be walked any number of
/// times, from any number of threads.
///
/// # Examples
///
/// ```
/// use pnq_lang::{Ast, Node, Value};
///
/// let ast = Ast::parse("(likes `red wine` 2)").unwrap();
/// assert_eq!(
///     ast.root(),
///     &[
///         Node::Value(Value::String("likes".into())),
///         Node::Value(Value::String("red wine".into())),
///         Node::Value(Value::Integer(2)),
///     ]
/// );
/// assert!(ast.symbols().contains(&Value::Integer(2)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    root: Vec<Node>,
    symbols: HashSet<Value>,
}

impl Ast {
    /// Tokenizes and parses `source`.
    ///
    /// The top level of an expression is already a list, so outer parens
    /// are optional: when the whole source is one parenthesized group, that
    /// group itself becomes the root rather than a one-element wrapper
    /// around it. `(a (b c))` and `a (b c)` denote the same tree.
    pub fn parse(source: &str) -> Result<Self, CompileError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser::new(tokens);
        let mut items = parser.parse()?;

        let root = match items.pop() {
            Some(Node::List(inner)) if items.is_empty() => inner,
            Some(other) => {
                items.push(other);
                items
            }
            None => items,
        };

        Ok(Ast {
            root,
            symbols: parser.into_symbols(),
        })
    }

    /// Children of the root list.
    pub fn root(&self) -> &[Node] {
        &self.root
    }

    /// Every symbol and string leaf value encountered while parsing,
    /// deduplicated (integers appear in their coerced form).
    pub fn symbols(&self) -> &HashSet<Value> {
        &self.symbols
    }

    /// Walks every list node in pre-order, depth first, root first.
    ///
    /// Scalar leaves are not yielded on their own; they are reachable
    /// through the yielded slices. Each call starts an independent
    /// traversal.
    pub fn lists(&self) -> Lists<'_> {
        Lists {
            stack: vec![self.root.as_slice()],
        }
    }

    /// Aggregates two-element list nodes into a key → values table.
    ///
    /// For every visited list node of length exactly two whose first element
    /// is a scalar, the second element is appended under that key in the
    /// order the traversal meets it. Nodes of any other length, and pairs
    /// keyed by a nested list, contribute nothing.
    pub fn collect(&self) -> HashMap<Value, Vec<Node>> {
        let mut table: HashMap<Value, Vec<Node>> = HashMap::new();
        for list in self.lists() {
            if let [Node::Value(key), value] = list {
                table.entry(key.clone()).or_default().push(value.clone());
            }
        }
        table
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SexprPrinter::new(false).print_items(&self.root))
    }
}

/// Lazy pre-order traversal over the list nodes of an [`Ast`].
pub struct Lists<'a> {
    stack: Vec<&'a [Node]>,
}

impl<'a> Iterator for Lists<'a> {
    type Item = &'a [Node];

    fn next(&mut self) -> Option<&'a [Node]> {
        let list = self.stack.pop()?;
        // Push children right to left so the leftmost comes off first.
        for node in list.iter().rev() {
            if let Node::List(inner) = node {
                self.stack.push(inner);
            }
        }
        Some(list)
    }
}
