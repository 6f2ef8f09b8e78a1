//! Syntax tree for directive sheets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Generic expression nodes of the directive language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Expr {
    /// Atom (`:name`) or a bare alias word such as `RectangleShape`.
    Atom(String),
    /// String literal.
    String(String),
    /// Signed integer literal.
    Integer(i64),
    /// Floating-point literal.
    Float(f64),
    /// Boolean literal.
    Boolean(bool),
    /// The `nil` literal.
    Nil,
    /// Ordered list.
    List(Vec<Expr>),
    /// Ordered key/value map. Keys are always strings.
    Map(Vec<(String, Expr)>),
    /// A call tuple `{name, meta, args}`.
    Call(Call),
    /// Dotted chain such as `Color.Red`, `.red` or `10.dp`.
    Dot(Vec<Expr>),
    /// Any tuple that is not a call.
    Tuple(Vec<Expr>),
}

impl Expr {
    /// Short human-readable tag, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Atom(_) => "atom",
            Expr::String(_) => "string",
            Expr::Integer(_) => "integer",
            Expr::Float(_) => "float",
            Expr::Boolean(_) => "boolean",
            Expr::Nil => "nil",
            Expr::List(_) => "list",
            Expr::Map(_) => "map",
            Expr::Call(_) => "call",
            Expr::Dot(_) => "dot access",
            Expr::Tuple(_) => "tuple",
        }
    }

    /// Borrow the call payload, if this is a call.
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }
}

/// A parsed call: `{name, meta, args}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Directive or constructor name. Dotted receivers are kept (`Brush.sweepGradient`).
    pub name: String,
    /// Keyword metadata attached by the server (line numbers and the like).
    pub meta: Vec<(String, Expr)>,
    /// Raw argument expressions.
    pub args: Vec<Expr>,
}

impl Call {
    /// Construct a call without metadata.
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            meta: Vec::new(),
            args,
        }
    }

    /// The member part of the name: `sweepGradient` for `Brush.sweepGradient`.
    pub fn member(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Immutable mapping from style name to the ordered calls of that style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    styles: BTreeMap<String, Vec<Call>>,
}

impl StyleSheet {
    /// Build a sheet from already-validated style entries.
    pub fn new(styles: BTreeMap<String, Vec<Call>>) -> Self {
        Self { styles }
    }

    /// Calls for the given style, in document order.
    pub fn get(&self, name: &str) -> Option<&[Call]> {
        self.styles.get(name).map(Vec::as_slice)
    }

    /// Number of styles in the sheet.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True when the sheet declares no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Iterate over `(name, calls)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Call])> {
        self.styles
            .iter()
            .map(|(name, calls)| (name.as_str(), calls.as_slice()))
    }
}
