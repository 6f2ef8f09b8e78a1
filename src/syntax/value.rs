//! Dynamic values for live store entries and event payloads

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ast::Expr;

/// Dynamically typed value exchanged with the node layer.
///
/// Live node values written to the runtime store and event payloads handed to
/// the dispatch capability both use this type. It serializes as plain JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent / null.
    #[default]
    Nil,
    /// Boolean.
    Boolean(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Convert a literal expression into a value.
    ///
    /// Atoms and dotted chains become strings (`Color.Red` -> `"Color.Red"`).
    /// Calls and tuples have no literal value.
    pub fn from_expr(expr: &Expr) -> Option<Value> {
        match expr {
            Expr::Nil => Some(Value::Nil),
            Expr::Boolean(flag) => Some(Value::Boolean(*flag)),
            Expr::Integer(num) => Some(Value::Integer(*num)),
            Expr::Float(num) => Some(Value::Float(*num)),
            Expr::String(text) | Expr::Atom(text) => Some(Value::String(text.clone())),
            Expr::Dot(chain) => {
                let segments = chain
                    .iter()
                    .map(|segment| match Value::from_expr(segment)? {
                        Value::String(text) => Some(text),
                        Value::Integer(num) => Some(num.to_string()),
                        Value::Float(num) => Some(num.to_string()),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some(Value::String(segments.join(".")))
            }
            Expr::List(items) => items
                .iter()
                .map(Value::from_expr)
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            Expr::Map(entries) => entries
                .iter()
                .map(|(key, value)| Some((key.clone(), Value::from_expr(value)?)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(Value::Map),
            Expr::Call(_) | Expr::Tuple(_) => None,
        }
    }

    /// Convert back into a literal expression.
    pub fn to_expr(&self) -> Expr {
        match self {
            Value::Nil => Expr::Nil,
            Value::Boolean(flag) => Expr::Boolean(*flag),
            Value::Integer(num) => Expr::Integer(*num),
            Value::Float(num) => Expr::Float(*num),
            Value::String(text) => Expr::String(text.clone()),
            Value::List(items) => Expr::List(items.iter().map(Value::to_expr).collect()),
            Value::Map(entries) => Expr::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_expr()))
                    .collect(),
            ),
        }
    }

    /// Numeric view; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(num) => Some(*num as f64),
            Value::Float(num) => Some(*num),
            _ => None,
        }
    }

    /// Convenience accessor for string references.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// True for [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Boolean(flag)
    }
}

impl From<i64> for Value {
    fn from(num: i64) -> Self {
        Value::Integer(num)
    }
}

impl From<i32> for Value {
    fn from(num: i32) -> Self {
        Value::Integer(num.into())
    }
}

impl From<f64> for Value {
    fn from(num: f64) -> Self {
        Value::Float(num)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_expression;

    #[test]
    fn literal_maps_convert_to_values() {
        let expr = parse_expression(r#"%{"id" => 7, "tags" => ["a", :b], "on" => true}"#).unwrap();
        let value = Value::from_expr(&expr).expect("literal");
        let Value::Map(entries) = &value else {
            panic!("expected map");
        };
        assert_eq!(entries["id"], Value::Integer(7));
        assert_eq!(
            entries["tags"],
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(value.to_expr().kind_name(), "map");
    }

    #[test]
    fn calls_have_no_literal_value() {
        let expr = parse_expression("padding(1)").unwrap();
        assert_eq!(Value::from_expr(&expr), None);
    }

    #[test]
    fn values_serialize_as_plain_json() {
        let value: Value = serde_json::from_str(r#"{"n": 9, "f": 1.5, "s": "x", "z": null}"#).unwrap();
        let Value::Map(entries) = &value else {
            panic!("expected map");
        };
        assert_eq!(entries["n"], Value::Integer(9));
        assert_eq!(entries["f"], Value::Float(1.5));
        assert!(entries["z"].is_nil());
        assert_eq!(Value::Integer(9).to_string(), "9");
    }
}
