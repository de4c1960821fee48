/// The lexical class of a token.
///
/// Whitespace is recognized by the scanner but only advances it; no
/// whitespace token is ever emitted, so these are the three kinds that can
/// reach the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Backtick-delimited string literal
    ///
    /// The token text keeps its delimiters; there is no escape processing,
    /// so a literal can contain anything except a backtick.
    ///
    /// # Examples
    /// ```text
    /// `hello world`
    /// `42`
    /// ``
    /// ```
    String,

    /// A single `(` or `)`
    Operator,

    /// Maximal run of characters other than backtick, parens, and whitespace
    ///
    /// Symbols carry no lexical meaning of their own: operator names,
    /// field names, and numbers are all symbols until the parser or the
    /// operator table says otherwise.
    ///
    /// # Examples
    /// ```text
    /// foo
    /// ==
    /// -42
    /// .
    /// ```
    Symbol,
}

/// A lexical unit: its kind, the exact source slice it covers, and the byte
/// offset where that slice starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
}

impl Token {
    /// Byte offset one past the end of this token's source slice.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_open(&self) -> bool {
        self.kind == TokenKind::Operator && self.text == "("
    }

    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::Operator && self.text == ")"
    }
}
