// SPDX-License-Identifier: Apache-2.0

use core::str::Chars;

use crate::parse_error::{LexErrKind, LexError};

/// Decoding of JSON backslash escapes, used when the tokenizer runs with
/// [`EscapeMode::Full`](crate::EscapeMode::Full).
pub(crate) struct EscapeProcessor;

impl EscapeProcessor {
    /// Decode every escape sequence in the raw content of a closed string.
    ///
    /// `position` is the offset of the opening quote and is reported on error.
    pub fn unescape(raw: &str, position: usize) -> Result<String, LexError> {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            let escape_char = match chars.next() {
                Some(c) => c,
                None => return LexError::new(LexErrKind::InvalidEscape, "\\", position),
            };
            if escape_char != 'u' {
                match Self::process_simple_escape(escape_char) {
                    Some(c) => out.push(c),
                    None => {
                        return LexError::new(
                            LexErrKind::InvalidEscape,
                            format!("\\{escape_char}"),
                            position,
                        )
                    }
                }
                continue;
            }

            let first = Self::read_hex4(&mut chars, position)?;
            let codepoint = if Self::is_high_surrogate(first) {
                match (chars.next(), chars.next()) {
                    (Some('\\'), Some('u')) => {
                        let second = Self::read_hex4(&mut chars, position)?;
                        match Self::combine_surrogate_pair(first, second) {
                            Some(cp) => cp,
                            None => {
                                return LexError::new(
                                    LexErrKind::InvalidUnicodeCodepoint,
                                    format!("\\u{first:04X}\\u{second:04X}"),
                                    position,
                                )
                            }
                        }
                    }
                    _ => {
                        return LexError::new(
                            LexErrKind::InvalidUnicodeCodepoint,
                            format!("\\u{first:04X}"),
                            position,
                        )
                    }
                }
            } else {
                first
            };

            match char::from_u32(codepoint) {
                Some(c) => out.push(c),
                // Lone low surrogates land here
                None => {
                    return LexError::new(
                        LexErrKind::InvalidUnicodeCodepoint,
                        format!("\\u{codepoint:04X}"),
                        position,
                    )
                }
            }
        }

        Ok(out)
    }

    /// Map the character following a backslash to the character it stands for.
    pub fn process_simple_escape(escape_char: char) -> Option<char> {
        match escape_char {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            '/' => Some('/'),
            'b' => Some('\u{08}'), // Backspace
            'f' => Some('\u{0C}'), // Form feed
            _ => None,
        }
    }

    fn read_hex4(chars: &mut Chars<'_>, position: usize) -> Result<u32, LexError> {
        let mut value = 0u32;
        let mut seen = String::from("\\u");
        for _ in 0..4 {
            let digit = chars.next();
            if let Some(c) = digit {
                seen.push(c);
            }
            match digit.and_then(|c| c.to_digit(16)) {
                Some(d) => value = (value << 4) | d,
                None => return LexError::new(LexErrKind::InvalidUnicodeHex, seen, position),
            }
        }
        Ok(value)
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Option<u32> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return None;
        }
        Some(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }
}
