use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{
    ast::{Ast, CompileError, Node},
    output::SexprPrinter,
    value::Value,
};

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The first element of a list names no operator in the table
    UndefinedOperator { name: String, node: String },

    /// Too few operands for the operator
    Arity { op: String, needs: usize, got: usize },

    /// Type mismatch or invalid operation for the given types
    TypeError(String),

    /// Invalid field access or array index on the target
    AccessError(String),

    /// Division by zero
    DivisionByZero,

    /// Integer arithmetic out of range
    Overflow,

    /// A list node with no elements at all
    EmptyExpression,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::UndefinedOperator { name, node } => {
                write!(f, "Undefined operator: \"{}\" in {}", name, node)
            }
            EvalError::Arity { op, needs, got } => write!(
                f,
                "Operator \"{}\" needs at least {} operand(s), got {}",
                op, needs, got
            ),
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
            EvalError::AccessError(msg) => write!(f, "Access error: {}", msg),
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Overflow => write!(f, "Integer overflow"),
            EvalError::EmptyExpression => write!(f, "Cannot evaluate an empty expression"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Returns a human-readable type name for a Value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Boolean(_) => "boolean",
    }
}

/// Returns a human-readable type name for a JSON value
fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// One entry of the operator table: what a resolved name does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Navigation
    /// Key/index walk over the bound target (`.`)
    Lookup,

    // Comparison (chained over adjacent operand pairs)
    /// Equal (`==`)
    Equal,
    /// Not equal (`<>`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Arithmetic (left folds)
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,

    // Logical
    /// Left fold of logical AND over operand truthiness
    All,
    /// Left fold of logical OR over operand truthiness
    Any,
    /// True iff no operand is truthy
    Not,
    /// Constant true, operands ignored
    True,
    /// Constant false, operands ignored
    False,
    /// True iff at least one operand is textual
    IsString,
}

/// The operator table an expression is resolved against.
///
/// Operator names are ordinary symbols; nothing is reserved at the lexical
/// level, so a table swap changes the whole vocabulary. [`Context::standard`]
/// is the default vocabulary; [`Context::empty`] plus [`Context::define`]
/// builds custom ones for embedding the language in another domain.
#[derive(Debug, Clone)]
pub struct Context {
    ops: HashMap<String, Op>,
}

impl Context {
    /// A table with no operators at all.
    pub fn empty() -> Self {
        Context {
            ops: HashMap::new(),
        }
    }

    /// The standard operator vocabulary.
    pub fn standard() -> Self {
        let mut context = Context::empty();
        context.define(".", Op::Lookup);
        context.define("==", Op::Equal);
        context.define("<>", Op::NotEqual);
        context.define("<", Op::LessThan);
        context.define(">", Op::GreaterThan);
        context.define("<=", Op::LessEqual);
        context.define(">=", Op::GreaterEqual);
        context.define("+", Op::Add);
        context.define("-", Op::Subtract);
        context.define("*", Op::Multiply);
        context.define("/", Op::Divide);
        context.define("All", Op::All);
        context.define("Any", Op::Any);
        context.define("Not", Op::Not);
        context.define("True", Op::True);
        context.define("False", Op::False);
        context.define("IsString", Op::IsString);
        context
    }

    /// Binds `name` to an operator kind, replacing any previous binding.
    pub fn define(&mut self, name: impl Into<String>, op: Op) {
        self.ops.insert(name.into(), op);
    }

    pub fn get(&self, name: &str) -> Option<Op> {
        self.ops.get(name).copied()
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::standard()
    }
}

/// A compiled expression bound to an operator table and a target record.
///
/// The query owns its tree, its table, and its target; all three are fixed
/// at construction, and `exec` never mutates any of them, so one query can
/// be evaluated any number of times.
///
/// # Examples
///
/// ```
/// use pnq_lang::{Query, Value};
/// use serde_json::json;
///
/// let target = json!({"a": {"b": 5}});
/// let query = Query::new("(== (. a b) 5)", target).unwrap();
///
/// assert_eq!(query.exec().unwrap(), Value::Boolean(true));
/// assert_eq!(query.exec().unwrap(), Value::Boolean(true));
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    ast: Ast,
    context: Context,
    target: serde_json::Value,
}

impl Query {
    /// Compiles `source` against the standard operator table.
    pub fn new(source: &str, target: serde_json::Value) -> Result<Self, CompileError> {
        Query::with_context(source, target, Context::standard())
    }

    /// Compiles `source` against a caller-supplied operator table.
    pub fn with_context(
        source: &str,
        target: serde_json::Value,
        context: Context,
    ) -> Result<Self, CompileError> {
        Ok(Query {
            ast: Ast::parse(source)?,
            context,
            target,
        })
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn target(&self) -> &serde_json::Value {
        &self.target
    }

    /// Evaluates the whole tree to a single scalar.
    ///
    /// The walk is bottom-up: every list child is reduced to a scalar
    /// before its parent's operator is resolved, so an undefined operator
    /// in a child fails the evaluation even if the parent never uses the
    /// result.
    pub fn exec(&self) -> Result<Value, EvalError> {
        self.eval_list(self.ast.root())
    }

    // Builds the argument sequence for one list node and applies the
    // operator its first element names. The operator name stays at
    // position 0 of the sequence; operands start at position 1.
    fn eval_list(&self, items: &[Node]) -> Result<Value, EvalError> {
        let mut args = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Node::Value(v) => args.push(v.clone()),
                Node::List(inner) => args.push(self.eval_list(inner)?),
            }
        }

        let op = match args.first() {
            None => return Err(EvalError::EmptyExpression),
            Some(Value::String(name)) => match self.context.get(name) {
                Some(op) => op,
                None => {
                    return Err(EvalError::UndefinedOperator {
                        name: name.clone(),
                        node: SexprPrinter::new(false).print_items(items),
                    });
                }
            },
            Some(other) => {
                return Err(EvalError::UndefinedOperator {
                    name: other.to_string(),
                    node: SexprPrinter::new(false).print_items(items),
                });
            }
        };

        self.apply(op, &args)
    }

    fn apply(&self, op: Op, args: &[Value]) -> Result<Value, EvalError> {
        match op {
            Op::Lookup => self.lookup(args),
            Op::Equal => chain(args, |a, b| Ok(a == b)),
            Op::NotEqual => chain(args, |a, b| Ok(a != b)),
            Op::LessThan => chain(args, |a, b| Ok(compare(a, b)? == Ordering::Less)),
            Op::GreaterThan => chain(args, |a, b| Ok(compare(a, b)? == Ordering::Greater)),
            Op::LessEqual => chain(args, |a, b| Ok(compare(a, b)? != Ordering::Greater)),
            Op::GreaterEqual => chain(args, |a, b| Ok(compare(a, b)? != Ordering::Less)),
            Op::Add => fold(args, add),
            Op::Subtract => fold(args, subtract),
            Op::Multiply => fold(args, multiply),
            Op::Divide => fold(args, divide),
            Op::All => fold(args, |acc, v| {
                Ok(Value::Boolean(acc.is_truthy() && v.is_truthy()))
            }),
            Op::Any => fold(args, |acc, v| {
                Ok(Value::Boolean(acc.is_truthy() || v.is_truthy()))
            }),
            Op::Not => negate(args),
            Op::True => Ok(Value::Boolean(true)),
            Op::False => Ok(Value::Boolean(false)),
            Op::IsString => is_string(args),
        }
    }

    // Successive key/index lookups over the bound target, ending on a
    // scalar leaf.
    fn lookup(&self, args: &[Value]) -> Result<Value, EvalError> {
        let keys = &args[1..];
        if keys.is_empty() {
            return Err(arity(args, 1));
        }

        let mut current = &self.target;
        for key in keys {
            current = match (current, key) {
                (serde_json::Value::Object(map), Value::String(field)) => {
                    map.get(field).ok_or_else(|| {
                        EvalError::AccessError(format!("No field \"{}\" in object", field))
                    })?
                }
                // Integer keys on objects go through their decimal form.
                (serde_json::Value::Object(map), Value::Integer(n)) => {
                    let field = n.to_string();
                    map.get(&field).ok_or_else(|| {
                        EvalError::AccessError(format!("No field \"{}\" in object", field))
                    })?
                }
                (serde_json::Value::Array(items), Value::Integer(n)) => usize::try_from(*n)
                    .ok()
                    .and_then(|idx| items.get(idx))
                    .ok_or_else(|| {
                        EvalError::AccessError(format!(
                            "Index {} out of bounds for array of length {}",
                            n,
                            items.len()
                        ))
                    })?,
                (serde_json::Value::Array(_), Value::String(field)) => {
                    return Err(EvalError::TypeError(format!(
                        "Cannot use string key \"{}\" on array; use an integer index",
                        field
                    )));
                }
                (_, Value::Boolean(_)) => {
                    return Err(EvalError::TypeError(
                        "Cannot index with a boolean key".to_string(),
                    ));
                }
                (other, key) => {
                    return Err(EvalError::AccessError(format!(
                        "Cannot access {} with key \"{}\"",
                        json_type_name(other),
                        key
                    )));
                }
            };
        }

        scalar_from_json(current)
    }
}

// The lookup endpoint has to fit the scalar model.
fn scalar_from_json(value: &serde_json::Value) -> Result<Value, EvalError> {
    match value {
        serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Number(n) => n.as_i64().map(Value::Integer).ok_or_else(|| {
            EvalError::TypeError(format!(
                "Number {} does not fit a signed 64-bit integer",
                n
            ))
        }),
        other => Err(EvalError::TypeError(format!(
            "Lookup ended at {}; expected a scalar",
            json_type_name(other)
        ))),
    }
}

fn arity(args: &[Value], needs: usize) -> EvalError {
    let op = args
        .first()
        .map(Value::to_string)
        .unwrap_or_default();
    EvalError::Arity {
        op,
        needs,
        got: args.len().saturating_sub(1),
    }
}

// True iff every adjacent operand pair satisfies `cmp`, left to right.
fn chain(
    args: &[Value],
    cmp: fn(&Value, &Value) -> Result<bool, EvalError>,
) -> Result<Value, EvalError> {
    let operands = &args[1..];
    if operands.len() < 2 {
        return Err(arity(args, 2));
    }
    for pair in operands.windows(2) {
        if !cmp(&pair[0], &pair[1])? {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

// Left fold of `combine` over the operands.
fn fold(
    args: &[Value],
    combine: fn(Value, &Value) -> Result<Value, EvalError>,
) -> Result<Value, EvalError> {
    let operands = &args[1..];
    if operands.len() < 2 {
        return Err(arity(args, 2));
    }
    let mut acc = operands[0].clone();
    for value in &operands[1..] {
        acc = combine(acc, value)?;
    }
    Ok(acc)
}

fn negate(args: &[Value]) -> Result<Value, EvalError> {
    let operands = &args[1..];
    if operands.is_empty() {
        return Err(arity(args, 1));
    }
    Ok(Value::Boolean(!operands.iter().any(Value::is_truthy)))
}

fn is_string(args: &[Value]) -> Result<Value, EvalError> {
    let operands = &args[1..];
    if operands.is_empty() {
        return Err(arity(args, 1));
    }
    Ok(Value::Boolean(
        operands.iter().any(|v| matches!(v, Value::String(_))),
    ))
}

// Ordering is defined within a variant only; equality (== and <>) never
// takes this path, so mixed-variant equality stays a plain false.
fn compare(a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Ok(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Boolean(x), Value::Boolean(y)) => Ok(x.cmp(y)),
        _ => Err(EvalError::TypeError(format!(
            "Cannot order {} and {}",
            type_name(a),
            type_name(b)
        ))),
    }
}

fn add(acc: Value, value: &Value) -> Result<Value, EvalError> {
    match (acc, value) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_add(*b)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow),
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
        (a, b) => Err(EvalError::TypeError(format!(
            "Cannot add {} and {}",
            type_name(&a),
            type_name(b)
        ))),
    }
}

fn subtract(acc: Value, value: &Value) -> Result<Value, EvalError> {
    match (acc, value) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_sub(*b)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow),
        (a, b) => Err(EvalError::TypeError(format!(
            "Cannot subtract {} from {}",
            type_name(b),
            type_name(&a)
        ))),
    }
}

fn multiply(acc: Value, value: &Value) -> Result<Value, EvalError> {
    match (acc, value) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_mul(*b)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow),
        (a, b) => Err(EvalError::TypeError(format!(
            "Cannot multiply {} and {}",
            type_name(&a),
            type_name(b)
        ))),
    }
}

fn divide(acc: Value, value: &Value) -> Result<Value, EvalError> {
    match (acc, value) {
        (Value::Integer(_), Value::Integer(0)) => Err(EvalError::DivisionByZero),
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_div(*b)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow),
        (a, b) => Err(EvalError::TypeError(format!(
            "Cannot divide {} by {}",
            type_name(&a),
            type_name(b)
        ))),
    }
}
