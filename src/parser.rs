use std::collections::HashSet;

use crate::{
    ast::{Node, Token, TokenKind},
    value::Value,
};

/// Errors raised while consuming the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A `(` whose inner list was never closed by `)`
    UnclosedNested { offset: usize },
    /// Tokens left over after the top-level list stopped matching
    TrailingTokens { offset: usize },
}

impl ParseError {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnclosedNested { offset } => *offset,
            ParseError::TrailingTokens { offset } => *offset,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnclosedNested { offset } => {
                write!(f, "Unclosed nested expression at offset {}", offset)
            }
            ParseError::TrailingTokens { offset } => {
                write!(f, "Unexpected trailing tokens at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive-descent parser over a token vector.
///
/// Alternatives are tried in a fixed priority order at every position:
/// nested list, then string, then symbol. Each alternative inspects the
/// current token before consuming anything, so a failed try leaves the
/// cursor where it was. Symbol and string leaf values are recorded in the
/// symbol set as a side effect of parsing.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    symbols: HashSet<Value>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            index: 0,
            symbols: HashSet::new(),
        }
    }

    /// Parses the whole stream as one top-level list.
    ///
    /// The stream must be fully consumed; the top-level list stops at the
    /// first token no alternative accepts (only a stray `)` can do that),
    /// and anything left at that point is an error.
    pub fn parse(&mut self) -> Result<Vec<Node>, ParseError> {
        let items = self.parse_list()?;
        if let Some(token) = self.current() {
            return Err(ParseError::TrailingTokens {
                offset: token.start,
            });
        }
        Ok(items)
    }

    /// The symbol and string leaf values seen so far.
    pub fn symbols(&self) -> &HashSet<Value> {
        &self.symbols
    }

    /// Consumes the parser, handing over the symbol set.
    pub fn into_symbols(self) -> HashSet<Value> {
        self.symbols
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    // Where a missing token would have gone: the current token's start, or
    // one past the final token once the stream is exhausted.
    fn offset(&self) -> usize {
        match self.current() {
            Some(token) => token.start,
            None => self.tokens.last().map(Token::end).unwrap_or(0),
        }
    }

    fn parse_list(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut items = Vec::new();
        loop {
            if let Some(node) = self.parse_nested()? {
                items.push(node);
                continue;
            }
            if let Some(node) = self.parse_string() {
                items.push(node);
                continue;
            }
            if let Some(node) = self.parse_symbol() {
                items.push(node);
                continue;
            }
            break;
        }
        Ok(items)
    }

    fn parse_nested(&mut self) -> Result<Option<Node>, ParseError> {
        match self.current() {
            Some(token) if token.is_open() => {}
            _ => return Ok(None),
        }
        self.advance();

        let inner = self.parse_list()?;

        match self.current() {
            Some(token) if token.is_close() => self.advance(),
            _ => {
                return Err(ParseError::UnclosedNested {
                    offset: self.offset(),
                });
            }
        }
        Ok(Some(Node::List(inner)))
    }

    fn parse_string(&mut self) -> Option<Node> {
        let token = self.current()?;
        if token.kind != TokenKind::String {
            return None;
        }
        // The delimiters are part of the token text; nothing between them
        // is ever escaped.
        let inner = token.text[1..token.text.len() - 1].to_string();
        self.advance();

        let value = Value::String(inner);
        self.symbols.insert(value.clone());
        Some(Node::Value(value))
    }

    fn parse_symbol(&mut self) -> Option<Node> {
        let token = self.current()?;
        if token.kind != TokenKind::Symbol {
            return None;
        }
        // A symbol that reads completely as a base-10 integer becomes an
        // integer leaf. String literals never take this path.
        let value = match token.text.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::String(token.text.clone()),
        };
        self.advance();

        self.symbols.insert(value.clone());
        Some(Node::Value(value))
    }
}
