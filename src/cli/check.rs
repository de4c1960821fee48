//! Execute pnq queries against JSON input

use super::{value_to_json, CliError};
use crate::{Ast, Query};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to execute
    pub query: String,
    /// JSON input string
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed successfully with JSON output
    Success(serde_json::Value),
}

/// Execute a pnq check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        Ast::parse(&options.query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let target: serde_json::Value = serde_json::from_str(json_str)?;

    let query = Query::new(&options.query, target)?;
    let result = query.exec()?;

    Ok(CheckResult::Success(value_to_json(&result)))
}
