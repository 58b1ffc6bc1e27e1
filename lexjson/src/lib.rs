// SPDX-License-Identifier: Apache-2.0

//! A JSON decoder built as a three-stage pipeline:
//! text → tokens → syntax tree → [`Value`].
//!
//! ```
//! let value = lexjson::decode(r#"{"a":[1,"x",true,null]}"#).unwrap();
//! assert_eq!(value["a"][1].as_str(), Some("x"));
//! // By default numbers keep their source text
//! assert_eq!(value["a"][0].as_number().unwrap().as_str(), "1");
//! ```
//!
//! The default configuration reproduces the classic behaviour of this
//! decoder, which differs from strict JSON in a few places:
//! numbers are not converted, only `\"` is unescaped, missing closing
//! delimiters are tolerated and anything after the root value is ignored.
//! See [`DecodeConfig`] for the alternatives.

use log::debug;

mod ast;
mod config;
mod escape_processor;
mod generator;
mod int_parser;
mod json_number;
mod parse_error;
mod parser;
mod tokenizer;
mod value;

pub use config::{CloserPolicy, DecodeConfig, EscapeMode, NumberMode, DEFAULT_MAX_DEPTH};
pub use json_number::{JsonNumber, NumberResult};
pub use parse_error::{LexErrKind, LexError, ParseError, SyntaxErrKind, SyntaxError};
pub use tokenizer::{Token, TokenKind};
pub use value::{Map, Value};

use generator::Generator;
use tokenizer::Tokenizer;

/// Decode `text` with the default [`DecodeConfig`].
pub fn decode(text: &str) -> Result<Value, ParseError> {
    decode_with(text, &DecodeConfig::default())
}

/// Decode `text` with an explicit configuration.
pub fn decode_with(text: &str, config: &DecodeConfig) -> Result<Value, ParseError> {
    let tokens = Tokenizer::new(config.escapes).tokenize(text)?;
    let ast = parser::parse(&tokens, config)?;
    let value = Generator::new(config.numbers).generate(&ast)?;
    debug!("Decoded {} bytes", text.len());
    Ok(value)
}

/// A reusable decoder holding a configuration.
///
/// Holds no state between calls, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecodeConfig) -> Self {
        Decoder { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn decode(&self, text: &str) -> Result<Value, ParseError> {
        decode_with(text, &self.config)
    }
}
