// SPDX-License-Identifier: Apache-2.0

use core::ops::Deref;
use core::str::FromStr;

use crate::int_parser::{from_ascii_i64, IntegerError};
use crate::ParseError;

/// Represents the materialized result of a JSON number.
///
/// Which variant is produced depends on the [`NumberMode`](crate::NumberMode)
/// the document was decoded with and on the `float` feature.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberResult {
    /// Decoded with [`NumberMode::Text`](crate::NumberMode::Text): only the raw lexeme is kept
    Unparsed,
    /// Integer that fits in an `i64`
    Integer(i64),
    /// Integer too large for `i64` (use the raw string for the exact value)
    IntegerOverflow,
    /// Float value (only produced with the `float` feature)
    Float(f64),
    /// Float whose magnitude does not fit in an `f64`
    FloatOverflow,
    /// Float parsing is compiled out
    FloatDisabled,
}

/// A JSON number carrying its exact source text and its materialized value.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNumber {
    raw: String,
    parsed: NumberResult,
}

impl JsonNumber {
    /// Keep the lexeme as-is, without interpreting it.
    pub fn unparsed(raw: impl Into<String>) -> Self {
        JsonNumber {
            raw: raw.into(),
            parsed: NumberResult::Unparsed,
        }
    }

    /// Parse a number lexeme as produced by the tokenizer.
    ///
    /// The tokenizer accepts any run of `[-0-9.e]`, so lexemes such as `1-2`,
    /// `01` or `1.` reach this point. Anything outside the JSON number grammar
    /// is rejected with [`ParseError::InvalidNumber`].
    pub fn from_lexeme(raw: &str) -> Result<Self, ParseError> {
        if !is_json_number(raw.as_bytes()) {
            return Err(ParseError::InvalidNumber(raw.to_string()));
        }
        let parsed = if is_integer(raw) {
            match from_ascii_i64(raw.as_bytes()) {
                Ok(val) => NumberResult::Integer(val),
                Err(IntegerError::Overflow) => NumberResult::IntegerOverflow,
                Err(_) => return Err(ParseError::InvalidNumber(raw.to_string())),
            }
        } else {
            parse_float(raw)?
        };
        Ok(JsonNumber {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// Get the materialized NumberResult.
    pub fn parsed(&self) -> &NumberResult {
        &self.parsed
    }

    /// Get the number as an `i64` if it was materialized as an integer that fits.
    pub fn as_int(&self) -> Option<i64> {
        match self.parsed {
            NumberResult::Integer(val) => Some(val),
            _ => None,
        }
    }

    /// Get the number as an f64 if it was materialized.
    /// Integers are converted; overflowing and unparsed numbers return None.
    pub fn as_f64(&self) -> Option<f64> {
        match self.parsed {
            NumberResult::Float(val) => Some(val),
            NumberResult::Integer(val) => Some(val as f64),
            _ => None,
        }
    }

    /// Always available: the exact source text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parse the number as a custom type from the exact source text.
    pub fn parse<T: FromStr>(&self) -> Result<T, T::Err> {
        T::from_str(&self.raw)
    }

    /// Whether the lexeme has neither a decimal point nor an exponent.
    pub fn is_integer(&self) -> bool {
        is_integer(&self.raw)
    }

    pub fn is_float(&self) -> bool {
        !self.is_integer()
    }
}

impl AsRef<str> for JsonNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for JsonNumber {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl core::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.parsed {
            NumberResult::Integer(val) => write!(f, "{val}"),
            NumberResult::Float(val) => write!(f, "{val}"),
            // Unparsed, overflowing and disabled numbers show the exact source text
            _ => f.write_str(&self.raw),
        }
    }
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? (e -? [0-9]+)?`
fn is_json_number(src: &[u8]) -> bool {
    fn digits(src: &[u8]) -> usize {
        src.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let mut pos = usize::from(src.first() == Some(&b'-'));

    match src.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => pos += digits(&src[pos..]),
        _ => return false,
    }

    if src.get(pos) == Some(&b'.') {
        let fraction = digits(&src[pos + 1..]);
        if fraction == 0 {
            return false;
        }
        pos += 1 + fraction;
    }

    if src.get(pos) == Some(&b'e') {
        pos += 1;
        if src.get(pos) == Some(&b'-') {
            pos += 1;
        }
        let exponent = digits(&src[pos..]);
        if exponent == 0 {
            return false;
        }
        pos += exponent;
    }

    pos == src.len()
}

fn is_integer(raw: &str) -> bool {
    !raw.bytes().any(|b| b == b'.' || b == b'e' || b == b'E')
}

#[cfg(feature = "float")]
fn parse_float(raw: &str) -> Result<NumberResult, ParseError> {
    match f64::from_str(raw) {
        Ok(val) if val.is_finite() => Ok(NumberResult::Float(val)),
        Ok(_) => Ok(NumberResult::FloatOverflow),
        Err(_) => Err(ParseError::InvalidNumber(raw.to_string())),
    }
}

#[cfg(not(feature = "float"))]
fn parse_float(_raw: &str) -> Result<NumberResult, ParseError> {
    Ok(NumberResult::FloatDisabled)
}
