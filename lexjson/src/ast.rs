// SPDX-License-Identifier: Apache-2.0

//! Syntax tree produced by the parser and consumed by the generator.

/// Key of an object member. The variant records how the tokenizer classified
/// the quoted content; both carry the key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PropertyKey {
    Identifier(String),
    StringLiteral(String),
}

impl PropertyKey {
    pub fn text(&self) -> &str {
        match self {
            PropertyKey::Identifier(text) | PropertyKey::StringLiteral(text) => text,
        }
    }
}

/// A `"key": value` member.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Property {
    pub key: PropertyKey,
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    ObjectExpression { properties: Vec<Property> },
    ArrayExpression { elements: Vec<Node> },
    Property(Property),
    /// Quoted content in key position
    Identifier { text: String },
    /// Quoted content in value position
    StringLiteral { text: String },
    /// Raw lexeme, materialized by the generator according to its number mode
    NumberLiteral { text: String },
    BooleanLiteral { value: bool },
    NullLiteral,
}

impl Node {
    /// Short name of the node kind, used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::ObjectExpression { .. } => "ObjectExpression",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::Property(_) => "Property",
            Node::Identifier { .. } => "Identifier",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::NumberLiteral { .. } => "NumberLiteral",
            Node::BooleanLiteral { .. } => "BooleanLiteral",
            Node::NullLiteral => "NullLiteral",
        }
    }
}
