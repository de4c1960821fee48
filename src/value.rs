use std::fmt;

/// A scalar value used throughout the query language.
///
/// Leaves of a parsed expression are strings or integers (bare symbols that
/// read completely as base-10 integers become `Integer` at parse time);
/// booleans only arise during evaluation, from the logical and relational
/// operators. There is no float, null, or container variant: an expression
/// always reduces to one of these three shapes.
///
/// # Examples
///
/// ```
/// use pnq_lang::Value;
///
/// let name = Value::String("sword".to_string());
/// let count = Value::Integer(3);
/// let flag = Value::Boolean(true);
///
/// assert!(count.is_truthy());
/// assert!(!Value::Integer(0).is_truthy());
/// assert_eq!(name.as_str(), Some("sword"));
/// assert_eq!(flag.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// UTF-8 text, from a bare symbol or a backtick string literal
    String(String),

    /// Signed 64-bit integer, from a coerced bare symbol
    Integer(i64),

    /// Boolean, produced by evaluation only (never by the parser)
    Boolean(bool),
}

impl Value {
    /// Check if the value is truthy (for logical folds)
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            String(s) => !s.is_empty(),
            Integer(n) => *n != 0,
            Boolean(b) => *b,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
