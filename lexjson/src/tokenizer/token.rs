// SPDX-License-Identifier: Apache-2.0

/// Lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `"`, emitted both before and after quoted content
    DoubleQuote,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// Quoted content in value position
    StringLiteral,
    /// Quoted content in key position
    Identifier,
    /// Raw numeric lexeme, not validated
    NumberLiteral,
    /// `true` or `false`
    BooleanLiteral,
    /// `null`
    NullLiteral,
}

impl TokenKind {
    /// Kinds after which a quoted buffer is classified as a value rather than a key.
    pub(crate) fn precedes_value(self) -> bool {
        matches!(
            self,
            TokenKind::Colon | TokenKind::Comma | TokenKind::LeftBracket
        )
    }
}

/// A typed lexeme. Punctuation carries its single delimiter character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub(crate) fn punct(kind: TokenKind, ch: char) -> Self {
        Self {
            kind,
            text: ch.to_string(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
