//! CLI support for pnq-lang
//!
//! Provides programmatic access to pnq CLI functionality for embedding
//! in other tools.

mod check;
mod collect;
mod convert;
mod fmt;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use collect::execute_collect;
pub use convert::{node_to_json, value_to_json};
pub use fmt::execute_fmt;

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Tokenizer or parser error
    Compile(crate::CompileError),
    /// Evaluation error
    Eval(crate::EvalError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Compile(e) => write!(f, "Compile error: {}", e),
            CliError::Eval(e) => write!(f, "Evaluation error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Compile(e) => Some(e),
            CliError::Eval(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<crate::CompileError> for CliError {
    fn from(e: crate::CompileError) -> Self {
        CliError::Compile(e)
    }
}

impl From<crate::EvalError> for CliError {
    fn from(e: crate::EvalError) -> Self {
        CliError::Eval(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
