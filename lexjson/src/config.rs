// SPDX-License-Identifier: Apache-2.0

//! Runtime decoding options.
//!
//! The defaults reproduce the classic behaviour of this decoder: numbers keep
//! their source text, only `\"` is treated as an escape, and missing closing
//! delimiters are tolerated.

/// Default nesting limit for objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How number lexemes are materialized in the output [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberMode {
    /// Keep the raw lexeme only; [`JsonNumber::parsed`](crate::JsonNumber::parsed)
    /// reports [`NumberResult::Unparsed`](crate::NumberResult::Unparsed).
    #[default]
    Text,
    /// Parse each lexeme into an integer or float, rejecting malformed ones.
    Parsed,
}

/// Which backslash sequences inside strings are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapeMode {
    /// Only `\"` is decoded; every other sequence is kept verbatim.
    #[default]
    QuoteOnly,
    /// All JSON escapes are decoded, including `\uXXXX` surrogate pairs.
    Full,
}

/// Treatment of a missing `}` or `]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CloserPolicy {
    /// A container ends at the first member not followed by a comma.
    #[default]
    Lenient,
    /// A missing closer is a syntax error.
    Strict,
}

/// Options for a single decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    pub numbers: NumberMode,
    pub escapes: EscapeMode,
    pub closers: CloserPolicy,
    /// Maximum nesting of objects and arrays.
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            numbers: NumberMode::default(),
            escapes: EscapeMode::default(),
            closers: CloserPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numbers(mut self, numbers: NumberMode) -> Self {
        self.numbers = numbers;
        self
    }

    pub fn with_escapes(mut self, escapes: EscapeMode) -> Self {
        self.escapes = escapes;
        self
    }

    pub fn with_closers(mut self, closers: CloserPolicy) -> Self {
        self.closers = closers;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Everything a conventional JSON decoder would do: parsed numbers,
    /// full escapes and required closers.
    pub fn strict() -> Self {
        Self::default()
            .with_numbers(NumberMode::Parsed)
            .with_escapes(EscapeMode::Full)
            .with_closers(CloserPolicy::Strict)
    }
}
