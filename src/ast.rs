//! # PNQ - Abstract Syntax Tree
//!
//! This module defines the parsed form of PNQ, a small prefix-notation
//! (Polish-notation) expression language for querying structured records.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[node]** - The nested-list tree node
//! - **[tree]** - The parsed tree with traversal and aggregation views
//!
//! ## Quick Start
//!
//! ```text
//! (All (>= (. stats level) 10) (== (. role) `mercenary`))
//! ```
//!
//! This expression is true for records whose `stats.level` is at least 10
//! and whose `role` is "mercenary".
//!
//! ## Core Concepts
//!
//! ### Everything is a list
//!
//! Source text is a whitespace-separated sequence of items; parentheses
//! group items into nested lists and backticks delimit string literals:
//!
//! ```text
//! expr    := list
//! list    := (nested | string | symbol)*
//! nested  := "(" list ")"
//! ```
//!
//! There are no reserved words. `==`, `.`, and `All` are ordinary symbols
//! until evaluation resolves them against an operator table.
//!
//! ### Leaf coercion
//!
//! A bare symbol that reads completely as a base-10 integer becomes an
//! integer leaf; everything else stays text. Backtick literals are always
//! text, so `` `42` `` keeps the digits as a string while `42` does not.
//!
//! ### Views
//!
//! The tree supports two read-only views used by downstream tooling:
//! a pre-order walk over its list nodes ([`Ast::lists`]) and a key/value
//! aggregation over its two-element nodes ([`Ast::collect`]).
//!
//! ## Examples
//!
//! ### Pair aggregation
//!
//! ```text
//! ((speed 2) (luck 1) (speed 3))   =>   {speed: [2, 3], luck: [1]}
//! ```
//!
//! ### Navigation plus arithmetic
//!
//! ```text
//! (< (+ (. base hp) (. bonus hp)) 40)
//! ```
pub mod node;
pub mod tokens;
pub mod tree;

pub use node::Node;
pub use tokens::{Token, TokenKind};
pub use tree::{Ast, CompileError, Lists};
