pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod query;
pub mod value;

pub use ast::{Ast, CompileError, Lists, Node, Token, TokenKind};
pub use lexer::{LexError, tokenize};
pub use output::{to_sexpr, to_sexpr_pretty};
pub use parser::{ParseError, Parser};
pub use query::{Context, EvalError, Op, Query};
pub use value::Value;
