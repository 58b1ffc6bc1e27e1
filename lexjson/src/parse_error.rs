// SPDX-License-Identifier: Apache-2.0

use crate::tokenizer::Token;

/// Classes of failure reported by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrKind {
    /// A character outside every recognized class, outside of a string.
    UnexpectedCharacter,
    /// A bare word that is not `true`, `false` or `null`.
    UnknownKeyword,
    /// Input ended while a string was still open.
    UnterminatedString,
    /// Unknown character after a backslash (full escape mode only).
    InvalidEscape,
    /// Non-hex digits in a `\u` escape (full escape mode only).
    InvalidUnicodeHex,
    /// Hex digits that do not form a valid codepoint (full escape mode only).
    InvalidUnicodeCodepoint,
}

/// Error raised while scanning the input into tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct LexError {
    kind: LexErrKind,
    lexeme: String,
    position: usize,
}

impl LexError {
    pub(crate) fn new<T>(kind: LexErrKind, lexeme: impl Into<String>, position: usize) -> Result<T, Self> {
        Err(Self {
            kind,
            lexeme: lexeme.into(),
            position,
        })
    }

    pub fn kind(&self) -> LexErrKind {
        self.kind
    }

    /// The offending character, keyword or escape sequence.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Character offset into the input where the offending lexeme starts.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl core::fmt::Debug for LexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}({:?}) at {}", self.kind, self.lexeme, self.position)
    }
}

impl core::fmt::Display for LexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            LexErrKind::UnexpectedCharacter => {
                write!(f, "Unexpected token: {} at {}", self.lexeme, self.position)
            }
            LexErrKind::UnknownKeyword => {
                write!(f, "Unknown keyword: {} at {}", self.lexeme, self.position)
            }
            LexErrKind::UnterminatedString => {
                write!(f, "Unterminated string starting at {}", self.position)
            }
            _ => write!(f, "{:?}: {} at {}", self.kind, self.lexeme, self.position),
        }
    }
}

impl std::error::Error for LexError {}

/// Classes of failure reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrKind {
    /// A token with no matching case in expression position.
    UnexpectedToken,
    /// The token stream ended where an expression was expected.
    UnexpectedEnd,
    /// An object member that is not a `"key": value` property.
    ExpectedProperty,
    /// Missing `}` under [`CloserPolicy::Strict`](crate::CloserPolicy::Strict).
    UnclosedObject,
    /// Missing `]` under [`CloserPolicy::Strict`](crate::CloserPolicy::Strict).
    UnclosedArray,
    /// Nesting went past [`DecodeConfig::max_depth`](crate::DecodeConfig).
    MaxDepthReached,
}

/// Error raised while building the syntax tree from tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: SyntaxErrKind,
    token: Option<Token>,
    index: usize,
}

impl SyntaxError {
    pub(crate) fn new<T>(kind: SyntaxErrKind, token: Option<&Token>, index: usize) -> Result<T, Self> {
        Err(Self {
            kind,
            token: token.cloned(),
            index,
        })
    }

    pub fn kind(&self) -> SyntaxErrKind {
        self.kind
    }

    /// The offending token, absent when the stream ran out.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Index of the offending token in the token sequence.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl core::fmt::Debug for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{:?}({:?}) at token {}", self.kind, token, self.index),
            None => write!(f, "{:?} at token {}", self.kind, self.index),
        }
    }
}

impl core::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.token {
            Some(token) => write!(
                f,
                "Syntax error: {:?} on {:?} {:?} at token {}",
                self.kind,
                token.kind(),
                token.text(),
                self.index
            ),
            None => write!(f, "Syntax error: {:?} at token {}", self.kind, self.index),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Errors that can occur while decoding a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An error bubbled up from the tokenizer.
    Lex(LexError),
    /// An error bubbled up from the parser.
    Syntax(SyntaxError),
    /// A number lexeme could not be materialized under [`NumberMode::Parsed`](crate::NumberMode::Parsed).
    InvalidNumber(String),
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{e}"),
            ParseError::Syntax(e) => write!(f, "{e}"),
            ParseError::InvalidNumber(text) => write!(f, "Invalid number: {text}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Syntax(e) => Some(e),
            ParseError::InvalidNumber(_) => None,
        }
    }
}
