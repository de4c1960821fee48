use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Token, TokenKind};

// Alternation order matters: a backtick only opens a string, parens never
// join a symbol run, and whitespace separates everything else.
const STRING: &str = r"`[^`]*`";
const OPERATOR: &str = r"\(|\)";
const SYMBOL: &str = r"[^`() \t\n\r]+";
const WHITESPACE: &str = r"[ \t\n\r]+";

static TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{STRING}|{OPERATOR}|{SYMBOL}|{WHITESPACE}"))
        .expect("token pattern is valid")
});

/// A span of source that no lexical class covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexError {
    /// Byte offset of the first uncovered character
    pub offset: usize,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid token at offset {}", self.offset)
    }
}

impl std::error::Error for LexError {}

/// Scans `source` into tokens.
///
/// The matches must tile the input contiguously from the first byte to the
/// last; any gap (an unterminated string literal, for instance, since no
/// class covers a lone backtick) fails at the first uncovered offset.
/// Whitespace runs are consumed but not emitted.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut output = Vec::new();
    let mut index = 0;

    for found in TOKENS.find_iter(source) {
        if found.start() != index {
            return Err(LexError { offset: index });
        }
        index = found.end();

        let text = found.as_str();
        let kind = match text.as_bytes()[0] {
            b'`' => TokenKind::String,
            b'(' | b')' => TokenKind::Operator,
            b' ' | b'\t' | b'\n' | b'\r' => continue,
            _ => TokenKind::Symbol,
        };
        output.push(Token {
            kind,
            text: text.to_string(),
            start: found.start(),
        });
    }

    if index != source.len() {
        return Err(LexError { offset: index });
    }
    Ok(output)
}

#[test]
fn test_kinds() {
    let tokens = tokenize("(add 1 `two`)").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Operator,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::String,
            TokenKind::Operator,
        ]
    );
}

#[test]
fn test_gap_is_an_error() {
    let err = tokenize("a `b").unwrap_err();
    assert_eq!(err.offset, 2);

    let err = tokenize("`never closed").unwrap_err();
    assert_eq!(err.offset, 0);
}
