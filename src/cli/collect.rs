//! Gather key/value pairs out of an expression

use super::{node_to_json, CliError};
use crate::{Ast, Node, Value};

/// Parse `query` and render its pair-shaped list nodes as a JSON object.
///
/// Every key maps to an array of the values seen for it, in document
/// order. Keys of different scalar types that render to the same text,
/// such as the integer 1 and the string "1", share one JSON entry.
pub fn execute_collect(query: &str) -> Result<serde_json::Value, CliError> {
    let ast = Ast::parse(query)?;

    let mut entries: Vec<(Value, Vec<Node>)> = ast.collect().into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        a.to_string()
            .cmp(&b.to_string())
            .then_with(|| rank(a).cmp(&rank(b)))
    });

    let mut table = serde_json::Map::new();
    for (key, values) in entries {
        let rendered: Vec<serde_json::Value> = values.iter().map(node_to_json).collect();
        let slot = table
            .entry(key.to_string())
            .or_insert_with(|| serde_json::Value::Array(Vec::new()));
        if let serde_json::Value::Array(existing) = slot {
            existing.extend(rendered);
        }
    }

    Ok(serde_json::Value::Object(table))
}

// Stable tie-break for keys whose rendered text collides.
fn rank(v: &Value) -> u8 {
    match v {
        Value::Integer(_) => 0,
        Value::String(_) => 1,
        Value::Boolean(_) => 2,
    }
}
