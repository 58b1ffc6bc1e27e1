// SPDX-License-Identifier: Apache-2.0

//! Materializes a syntax tree into a [`Value`].

use log::trace;

use crate::ast::{Node, Property};
use crate::config::NumberMode;
use crate::value::{Map, Value};
use crate::{JsonNumber, ParseError};

/// Walks a syntax tree and builds the native value tree.
///
/// The tree is trusted as produced by the parser. The only failure is a
/// malformed number lexeme under [`NumberMode::Parsed`].
pub(crate) struct Generator {
    numbers: NumberMode,
}

impl Generator {
    pub fn new(numbers: NumberMode) -> Self {
        Generator { numbers }
    }

    pub fn generate(&self, node: &Node) -> Result<Value, ParseError> {
        match node {
            Node::ObjectExpression { properties } => {
                let mut map = Map::with_capacity(properties.len());
                for property in properties {
                    // Later duplicates overwrite the value in place
                    let value = self.generate_property(property)?;
                    if let Some(old) = map.insert(property.key.text().to_string(), value) {
                        trace!("Duplicate key {:?} replaced {:?}", property.key.text(), old);
                    }
                }
                Ok(Value::Object(map))
            }
            Node::ArrayExpression { elements } => elements
                .iter()
                .map(|element| self.generate(element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Node::Property(property) => self.generate_property(property),
            Node::Identifier { text } | Node::StringLiteral { text } => {
                Ok(Value::String(text.clone()))
            }
            Node::NumberLiteral { text } => self.generate_number(text),
            Node::BooleanLiteral { value } => Ok(Value::Bool(*value)),
            Node::NullLiteral => Ok(Value::Null),
        }
    }

    /// A property on its own stands for its value.
    fn generate_property(&self, property: &Property) -> Result<Value, ParseError> {
        self.generate(&property.value)
    }

    fn generate_number(&self, text: &str) -> Result<Value, ParseError> {
        let number = match self.numbers {
            NumberMode::Text => JsonNumber::unparsed(text),
            NumberMode::Parsed => JsonNumber::from_lexeme(text)?,
        };
        Ok(Value::Number(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PropertyKey;
    use crate::NumberResult;
    use test_log::test;

    fn number(text: &str) -> Node {
        Node::NumberLiteral {
            text: text.to_string(),
        }
    }

    fn property(key: &str, value: Node) -> Property {
        Property {
            key: PropertyKey::Identifier(key.to_string()),
            value: Box::new(value),
        }
    }

    fn text_generator() -> Generator {
        Generator::new(NumberMode::Text)
    }

    #[test]
    fn test_generate_leaves() {
        let generator = text_generator();
        assert_eq!(generator.generate(&Node::NullLiteral), Ok(Value::Null));
        assert_eq!(
            generator.generate(&Node::BooleanLiteral { value: false }),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            generator.generate(&Node::Identifier { text: "k".into() }),
            Ok(Value::from("k"))
        );
        assert_eq!(
            generator.generate(&Node::StringLiteral { text: "v".into() }),
            Ok(Value::from("v"))
        );
    }

    #[test]
    fn test_number_text_mode() {
        let value = text_generator().generate(&number("1.0e2")).unwrap();
        let num = value.as_number().unwrap();
        assert_eq!(num.as_str(), "1.0e2");
        assert_eq!(num.parsed(), &NumberResult::Unparsed);

        // Malformed lexemes pass through untouched
        let value = text_generator().generate(&number("1-2")).unwrap();
        assert_eq!(value.as_number().unwrap().as_str(), "1-2");
    }

    #[test]
    fn test_number_parsed_mode() {
        let generator = Generator::new(NumberMode::Parsed);
        let value = generator.generate(&number("17")).unwrap();
        assert_eq!(value.as_number().unwrap().as_int(), Some(17));

        assert_eq!(
            generator.generate(&number("1-2")),
            Err(ParseError::InvalidNumber("1-2".to_string()))
        );
    }

    #[test]
    fn test_generate_object_in_order() {
        let ast = Node::ObjectExpression {
            properties: vec![
                property("b", number("2")),
                property("a", Node::NullLiteral),
            ],
        };
        let value = text_generator().generate(&ast).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert!(value["a"].is_null());
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let ast = Node::ObjectExpression {
            properties: vec![
                property("a", number("1")),
                property("b", number("2")),
                property("a", Node::BooleanLiteral { value: true }),
            ],
        };
        let value = text_generator().generate(&ast).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(value["a"], Value::Bool(true));
    }

    #[test]
    fn test_property_falls_through_to_value() {
        let ast = Node::ArrayExpression {
            elements: vec![Node::Property(property("k", Node::BooleanLiteral { value: true }))],
        };
        let value = text_generator().generate(&ast).unwrap();
        assert_eq!(value, Value::Array(vec![Value::Bool(true)]));
    }

    #[test]
    fn test_generate_nested() {
        let ast = Node::ObjectExpression {
            properties: vec![property(
                "a",
                Node::ArrayExpression {
                    elements: vec![
                        number("1"),
                        Node::ObjectExpression {
                            properties: vec![property("b", number("3"))],
                        },
                    ],
                },
            )],
        };
        let value = Generator::new(NumberMode::Parsed).generate(&ast).unwrap();
        assert_eq!(value["a"][0].as_number().unwrap().as_int(), Some(1));
        assert_eq!(value["a"][1]["b"].as_number().unwrap().as_int(), Some(3));
    }
}
