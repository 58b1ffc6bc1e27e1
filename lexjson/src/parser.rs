// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser from the token sequence to the syntax tree.
//!
//! A single cursor moves forward through the tokens. Quoted content is
//! recognized as an object member by looking two tokens past the content for
//! a colon; the key/value role of the content itself was already fixed by the
//! tokenizer.

use log::{debug, trace};

use crate::ast::{Node, Property, PropertyKey};
use crate::config::{CloserPolicy, DecodeConfig};
use crate::parse_error::{SyntaxErrKind, SyntaxError};
use crate::tokenizer::{Token, TokenKind};

/// Build the syntax tree for the first expression in `tokens`.
/// Tokens after that expression are ignored.
pub(crate) fn parse(tokens: &[Token], config: &DecodeConfig) -> Result<Node, SyntaxError> {
    let mut parser = Parser::new(tokens, config);
    let root = parser.walk()?;
    if parser.current < tokens.len() {
        debug!(
            "Ignoring {} tokens after the root expression",
            tokens.len() - parser.current
        );
    }
    debug!("Parsed {} from {} tokens", root.kind_name(), tokens.len());
    Ok(root)
}

struct Parser<'t> {
    tokens: &'t [Token],
    current: usize,
    depth: usize,
    max_depth: usize,
    closers: CloserPolicy,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token], config: &DecodeConfig) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            max_depth: config.max_depth,
            closers: config.closers,
        }
    }

    fn token_at(&self, index: usize) -> Option<&'t Token> {
        self.tokens.get(index)
    }

    fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.token_at(index).map(Token::kind)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.kind_at(self.current)
    }

    fn walk(&mut self) -> Result<Node, SyntaxError> {
        let token = match self.token_at(self.current) {
            Some(token) => token,
            None => return SyntaxError::new(SyntaxErrKind::UnexpectedEnd, None, self.current),
        };
        trace!("Walk {}: {:?}", self.current, token);

        match token.kind() {
            TokenKind::LeftBrace => self.walk_object(),
            TokenKind::LeftBracket => self.walk_array(),
            TokenKind::DoubleQuote => self.walk_quoted(false),
            TokenKind::Identifier => Ok(Node::Identifier {
                text: self.take_quoted_leaf(token),
            }),
            TokenKind::StringLiteral => Ok(Node::StringLiteral {
                text: self.take_quoted_leaf(token),
            }),
            TokenKind::NumberLiteral => {
                self.current += 1;
                Ok(Node::NumberLiteral {
                    text: token.text().to_string(),
                })
            }
            TokenKind::BooleanLiteral => {
                self.current += 1;
                Ok(Node::BooleanLiteral {
                    value: token.text() == "true",
                })
            }
            TokenKind::NullLiteral => {
                self.current += 1;
                Ok(Node::NullLiteral)
            }
            _ => SyntaxError::new(SyntaxErrKind::UnexpectedToken, Some(token), self.current),
        }
    }

    /// Consume quoted content and, when present, its closing quote.
    fn take_quoted_leaf(&mut self, token: &Token) -> String {
        self.current += 1;
        if self.peek_kind() == Some(TokenKind::DoubleQuote) {
            self.current += 1;
        }
        token.text().to_string()
    }

    /// Quoted content, or a `"key":value` property when a colon follows it.
    ///
    /// A property that is not the direct member of an object nests its value
    /// one level deeper, so `"a":"b":...` chains count toward `max_depth`.
    fn walk_quoted(&mut self, member: bool) -> Result<Node, SyntaxError> {
        // skip the opening quote
        self.current += 1;

        if self.kind_at(self.current + 2) != Some(TokenKind::Colon) {
            return self.walk();
        }

        let key = self.walk_key()?;
        // skip the colon
        self.current += 1;
        if !member {
            self.enter()?;
        }
        let value = self.walk()?;
        if !member {
            self.depth -= 1;
        }
        Ok(Node::Property(Property {
            key,
            value: Box::new(value),
        }))
    }

    fn walk_key(&mut self) -> Result<PropertyKey, SyntaxError> {
        let token = match self.token_at(self.current) {
            Some(token) => token,
            None => return SyntaxError::new(SyntaxErrKind::UnexpectedEnd, None, self.current),
        };
        match token.kind() {
            TokenKind::Identifier => Ok(PropertyKey::Identifier(self.take_quoted_leaf(token))),
            TokenKind::StringLiteral => {
                Ok(PropertyKey::StringLiteral(self.take_quoted_leaf(token)))
            }
            _ => SyntaxError::new(SyntaxErrKind::UnexpectedToken, Some(token), self.current),
        }
    }

    fn walk_object(&mut self) -> Result<Node, SyntaxError> {
        self.enter()?;
        let mut properties = Vec::new();

        if self.kind_at(self.current + 1) == Some(TokenKind::RightBrace) {
            self.current += 2;
        } else {
            loop {
                // skip `{` or `,`
                self.current += 1;
                let start = self.current;
                match self.walk_member()? {
                    Node::Property(property) => properties.push(property),
                    _ => {
                        return SyntaxError::new(
                            SyntaxErrKind::ExpectedProperty,
                            self.token_at(start),
                            start,
                        )
                    }
                }
                if self.peek_kind() != Some(TokenKind::Comma) {
                    break;
                }
            }
            self.close(TokenKind::RightBrace, SyntaxErrKind::UnclosedObject)?;
        }

        self.depth -= 1;
        Ok(Node::ObjectExpression { properties })
    }

    fn walk_member(&mut self) -> Result<Node, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::DoubleQuote) => self.walk_quoted(true),
            _ => self.walk(),
        }
    }

    fn walk_array(&mut self) -> Result<Node, SyntaxError> {
        self.enter()?;
        let mut elements = Vec::new();

        if self.kind_at(self.current + 1) == Some(TokenKind::RightBracket) {
            self.current += 2;
        } else {
            loop {
                // skip `[` or `,`
                self.current += 1;
                elements.push(self.walk()?);
                if self.peek_kind() != Some(TokenKind::Comma) {
                    break;
                }
            }
            self.close(TokenKind::RightBracket, SyntaxErrKind::UnclosedArray)?;
        }

        self.depth -= 1;
        Ok(Node::ArrayExpression { elements })
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= self.max_depth {
            return SyntaxError::new(
                SyntaxErrKind::MaxDepthReached,
                self.token_at(self.current),
                self.current,
            );
        }
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, closer: TokenKind, missing: SyntaxErrKind) -> Result<(), SyntaxError> {
        if self.peek_kind() == Some(closer) {
            self.current += 1;
            return Ok(());
        }
        match self.closers {
            CloserPolicy::Lenient => {
                trace!("Missing {:?} at {} tolerated", closer, self.current);
                Ok(())
            }
            CloserPolicy::Strict => {
                SyntaxError::new(missing, self.token_at(self.current), self.current)
            }
        }
    }
}
