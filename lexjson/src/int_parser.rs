// SPDX-License-Identifier: Apache-2.0

/// Failure modes of [`from_ascii_i64`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum IntegerError {
    /// The lexeme was empty.
    Empty,
    /// The lexeme was a lone `-`.
    SignOnly,
    /// A character other than an ASCII digit followed the optional sign.
    InvalidDigit,
    /// The value does not fit in an `i64`.
    Overflow,
}

/// Panic-free base-10 parse of a number lexeme into an `i64`.
///
/// Only a leading `-` is accepted as a sign; the tokenizer never emits `+`.
pub(crate) const fn from_ascii_i64(src: &[u8]) -> Result<i64, IntegerError> {
    let (is_negative, mut digits) = match src {
        [] => return Err(IntegerError::Empty),
        [b'-', rest @ ..] => (true, rest),
        _ => (false, src),
    };

    if digits.is_empty() {
        return Err(IntegerError::SignOnly);
    }

    let mut result: i64 = 0;

    while let Some((&byte, rest)) = digits.split_first() {
        let digit = match byte {
            b'0'..=b'9' => (byte - b'0') as i64,
            _ => return Err(IntegerError::InvalidDigit),
        };

        result = match result.checked_mul(10) {
            Some(val) => val,
            None => return Err(IntegerError::Overflow),
        };

        // Accumulating negatively reaches i64::MIN without overflowing
        result = if is_negative {
            match result.checked_sub(digit) {
                Some(val) => val,
                None => return Err(IntegerError::Overflow),
            }
        } else {
            match result.checked_add(digit) {
                Some(val) => val,
                None => return Err(IntegerError::Overflow),
            }
        };

        digits = rest;
    }

    Ok(result)
}
