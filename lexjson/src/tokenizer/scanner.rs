// SPDX-License-Identifier: Apache-2.0

use log::{debug, trace};

use super::token::{Token, TokenKind};
use crate::config::EscapeMode;
use crate::escape_processor::EscapeProcessor;
use crate::parse_error::{LexErrKind, LexError};

/// Characters that may start a number lexeme.
fn is_number_start(ch: char) -> bool {
    ch == '-' || ch.is_ascii_digit()
}

/// Characters consumed greedily once a number lexeme has started.
/// Uppercase `E` and `+` are deliberately absent.
fn is_number_char(ch: char) -> bool {
    matches!(ch, '-' | '0'..='9' | '.' | 'e')
}

/// Character-level scanner producing the flat token sequence.
///
/// Quoted content is emitted as three tokens: the opening `DoubleQuote`, an
/// `Identifier` or `StringLiteral` holding the content, and the closing
/// `DoubleQuote`. The content kind is decided positionally, by the token two
/// places back in the already emitted sequence.
pub(crate) struct Tokenizer {
    escapes: EscapeMode,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(EscapeMode::default())
    }
}

impl Tokenizer {
    pub fn new(escapes: EscapeMode) -> Self {
        Tokenizer { escapes }
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut buffer = String::new();
        let mut in_string = false;
        let mut string_start = 0;
        let mut pos = 0;

        while pos < chars.len() {
            let ch = chars[pos];

            if in_string {
                if ch != '"' {
                    buffer.push(ch);
                } else if is_escaped(&chars, pos) {
                    if self.escapes == EscapeMode::QuoteOnly {
                        // the escaping backslash is consumed, the quote is kept
                        buffer.pop();
                    }
                    buffer.push('"');
                } else {
                    let content = match self.escapes {
                        EscapeMode::QuoteOnly => core::mem::take(&mut buffer),
                        EscapeMode::Full => {
                            let decoded = EscapeProcessor::unescape(&buffer, string_start)?;
                            buffer.clear();
                            decoded
                        }
                    };
                    let kind = classify_quoted(&tokens);
                    trace!("Pos: {pos}, {kind:?}: {content:?}");
                    tokens.push(Token::new(kind, content));
                    tokens.push(Token::punct(TokenKind::DoubleQuote, '"'));
                    in_string = false;
                }
                pos += 1;
                continue;
            }

            let punct = match ch {
                '{' => Some(TokenKind::LeftBrace),
                '}' => Some(TokenKind::RightBrace),
                '[' => Some(TokenKind::LeftBracket),
                ']' => Some(TokenKind::RightBracket),
                ':' => Some(TokenKind::Colon),
                ',' => Some(TokenKind::Comma),
                '"' => Some(TokenKind::DoubleQuote),
                _ => None,
            };
            if let Some(kind) = punct {
                trace!("Pos: {pos}, {kind:?}");
                tokens.push(Token::punct(kind, ch));
                if kind == TokenKind::DoubleQuote {
                    in_string = true;
                    string_start = pos;
                    buffer.clear();
                }
                pos += 1;
                continue;
            }

            if is_number_start(ch) {
                let end = scan_while(&chars, pos + 1, is_number_char);
                let number: String = chars[pos..end].iter().collect();
                trace!("Pos: {pos}, NumberLiteral: {number}");
                tokens.push(Token::new(TokenKind::NumberLiteral, number));
                pos = end;
            } else if ch.is_ascii_alphabetic() {
                let end = scan_while(&chars, pos + 1, |c| c.is_ascii_alphabetic());
                let keyword: String = chars[pos..end].iter().collect();
                let kind = match keyword.as_str() {
                    "true" | "false" => TokenKind::BooleanLiteral,
                    "null" => TokenKind::NullLiteral,
                    _ => return LexError::new(LexErrKind::UnknownKeyword, keyword, pos),
                };
                trace!("Pos: {pos}, {kind:?}: {keyword}");
                tokens.push(Token::new(kind, keyword));
                pos = end;
            } else if ch.is_whitespace() {
                pos += 1;
            } else {
                return LexError::new(LexErrKind::UnexpectedCharacter, ch, pos);
            }
        }

        if in_string {
            return LexError::new(LexErrKind::UnterminatedString, buffer, string_start);
        }

        debug!("Tokenized {} chars into {} tokens", chars.len(), tokens.len());
        Ok(tokens)
    }
}

/// A quote is escaped when an odd run of backslashes immediately precedes it.
///
/// Looking back a single character would treat the closing quote of `"a\\"`
/// as escaped and run the string on into the rest of the document.
fn is_escaped(chars: &[char], pos: usize) -> bool {
    let run = chars[..pos].iter().rev().take_while(|&&c| c == '\\').count();
    run % 2 == 1
}

/// Two tokens back from the end sits whatever preceded the opening quote.
fn classify_quoted(tokens: &[Token]) -> TokenKind {
    let value_position = tokens
        .len()
        .checked_sub(2)
        .map(|i| tokens[i].kind().precedes_value())
        .unwrap_or(false);
    if value_position {
        TokenKind::StringLiteral
    } else {
        TokenKind::Identifier
    }
}

fn scan_while(chars: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = from;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::default()
            .tokenize(input)
            .unwrap()
            .iter()
            .map(Token::kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Tokenizer::default()
            .tokenize(input)
            .unwrap()
            .iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_zero_input() {
        assert_eq!(Tokenizer::default().tokenize(""), Ok(vec![]));
        assert_eq!(Tokenizer::default().tokenize(" \t\r\n"), Ok(vec![]));
    }

    #[test]
    fn test_all_punctuation() {
        assert_eq!(
            kinds("{}[]:,"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Colon,
                TokenKind::Comma,
            ]
        );
        assert_eq!(texts("{ } [ ] : ,"), vec!["{", "}", "[", "]", ":", ","]);
    }

    #[test]
    fn test_keywords() {
        let tokens = Tokenizer::default().tokenize("true false null").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::BooleanLiteral, "true"),
                Token::new(TokenKind::BooleanLiteral, "false"),
                Token::new(TokenKind::NullLiteral, "null"),
            ]
        );
    }

    #[test]
    fn test_unknown_keyword() {
        let err = Tokenizer::default().tokenize(r#"{"a":truee}"#).unwrap_err();
        assert_eq!(err.kind(), LexErrKind::UnknownKeyword);
        assert_eq!(err.lexeme(), "truee");
        assert_eq!(err.position(), 5);

        // keywords are case sensitive
        let err = Tokenizer::default().tokenize("True").unwrap_err();
        assert_eq!(err.kind(), LexErrKind::UnknownKeyword);
    }

    #[test]
    fn test_unexpected_character() {
        let err = Tokenizer::default().tokenize("@").unwrap_err();
        assert_eq!(err, LexError::new::<()>(LexErrKind::UnexpectedCharacter, "@", 0).unwrap_err());

        let err = Tokenizer::default().tokenize("[1, +2]").unwrap_err();
        assert_eq!(err.kind(), LexErrKind::UnexpectedCharacter);
        assert_eq!(err.lexeme(), "+");
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn test_numbers_are_raw_lexemes() {
        assert_eq!(texts("123"), vec!["123"]);
        assert_eq!(texts("-12.5e-3"), vec!["-12.5e-3"]);
        // The greedy scan does not validate
        assert_eq!(texts("1-2"), vec!["1-2"]);
        assert_eq!(kinds("[1,2]")[1], TokenKind::NumberLiteral);
    }

    #[test]
    fn test_number_stops_at_uppercase_exponent() {
        let err = Tokenizer::default().tokenize("1E5").unwrap_err();
        assert_eq!(err.kind(), LexErrKind::UnknownKeyword);
        assert_eq!(err.lexeme(), "E");
    }

    #[test]
    fn test_quoted_content_is_three_tokens() {
        let tokens = Tokenizer::default().tokenize(r#""hello""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::DoubleQuote, "\""),
                Token::new(TokenKind::Identifier, "hello"),
                Token::new(TokenKind::DoubleQuote, "\""),
            ]
        );
    }

    #[test]
    fn test_key_value_classification() {
        let tokens = Tokenizer::default().tokenize(r#"{"a":"a"}"#).unwrap();
        assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "a"));
        assert_eq!(tokens[6], Token::new(TokenKind::StringLiteral, "a"));
    }

    #[test]
    fn test_classification_is_positional() {
        // A key following a comma is classified as a literal
        let tokens = Tokenizer::default().tokenize(r#"{"a":1,"b":2}"#).unwrap();
        assert_eq!(tokens[2].kind(), TokenKind::Identifier);
        assert_eq!(tokens[8], Token::new(TokenKind::StringLiteral, "b"));

        // Array elements are literals
        let tokens = Tokenizer::default().tokenize(r#"["x"]"#).unwrap();
        assert_eq!(tokens[2], Token::new(TokenKind::StringLiteral, "x"));
    }

    #[test]
    fn test_structural_characters_inside_string() {
        let tokens = Tokenizer::default().tokenize(r#"{"a:b":"[1,2]"}"#).unwrap();
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[2].text(), "a:b");
        assert_eq!(tokens[6].text(), "[1,2]");
    }

    #[test]
    fn test_escaped_quote() {
        let tokens = Tokenizer::default().tokenize(r#"{"a":"x\"y"}"#).unwrap();
        assert_eq!(tokens[6], Token::new(TokenKind::StringLiteral, "x\"y"));
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_other_escapes_pass_through() {
        let tokens = Tokenizer::default().tokenize(r#"["a\n\u0041"]"#).unwrap();
        assert_eq!(tokens[2].text(), r"a\n\u0041");
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        let tokens = Tokenizer::default().tokenize(r#"["a\\", 1]"#).unwrap();
        assert_eq!(tokens[2].text(), r"a\\");
        assert_eq!(tokens[4].kind(), TokenKind::Comma);

        // a single-character lookbehind would leave this string unterminated
        let tokens = Tokenizer::default().tokenize(r#"{"k":"a\\"}"#).unwrap();
        assert_eq!(tokens[6], Token::new(TokenKind::StringLiteral, r"a\\"));
        assert_eq!(tokens[8].kind(), TokenKind::RightBrace);

        let tokens = Tokenizer::default().tokenize(r#"["a\\\"b"]"#).unwrap();
        assert_eq!(tokens[2].text(), r#"a\\"b"#);
    }

    #[test]
    fn test_full_escape_mode() {
        let tokenizer = Tokenizer::new(EscapeMode::Full);
        let tokens = tokenizer.tokenize(r#"["a\n\u0041\\\"c"]"#).unwrap();
        assert_eq!(tokens[2].text(), "a\nA\\\"c");

        let err = tokenizer.tokenize(r#"["bad\x"]"#).unwrap_err();
        assert_eq!(err.kind(), LexErrKind::InvalidEscape);
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Tokenizer::default().tokenize(r#"{"abc"#).unwrap_err();
        assert_eq!(err.kind(), LexErrKind::UnterminatedString);
        assert_eq!(err.lexeme(), "abc");
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_non_ascii_content_and_whitespace() {
        let tokens = Tokenizer::default()
            .tokenize("\u{00A0}[\"olá_こんにちは 💩\"]\u{2003}")
            .unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[2].text(), "olá_こんにちは 💩");
    }

    #[test]
    fn test_nested_document() {
        assert_eq!(
            kinds(r#"{"a":[1,{"b":null}]}"#),
            vec![
                TokenKind::LeftBrace,
                TokenKind::DoubleQuote,
                TokenKind::Identifier,
                TokenKind::DoubleQuote,
                TokenKind::Colon,
                TokenKind::LeftBracket,
                TokenKind::NumberLiteral,
                TokenKind::Comma,
                TokenKind::LeftBrace,
                TokenKind::DoubleQuote,
                TokenKind::Identifier,
                TokenKind::DoubleQuote,
                TokenKind::Colon,
                TokenKind::NullLiteral,
                TokenKind::RightBrace,
                TokenKind::RightBracket,
                TokenKind::RightBrace,
            ]
        );
    }
}
