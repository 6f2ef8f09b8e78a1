//! Normalised view over call arguments.
//!
//! Calls arrive either with a flat positional argument list or with a single
//! map of named arguments. [`adapt`] turns both into one `Vec<ArgumentNode>`
//! and tags live-value references so they can be resolved at apply time.

use std::collections::HashMap;

use serde::Serialize;

use crate::syntax::{Call, Expr, Value};

/// Call name marking a live view identifier inside a lambda-value argument.
pub const VIEW_VALUE_TAG: &str = "__view_value__";

/// Source of live node values consulted when resolving lambda-value arguments.
pub trait LiveValues {
    /// Latest value recorded for `node_id`, if any.
    fn live_value(&self, node_id: &str) -> Option<Value>;
}

impl LiveValues for HashMap<String, Value> {
    fn live_value(&self, node_id: &str) -> Option<Value> {
        self.get(node_id).cloned()
    }
}

/// Classification of one argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgKind {
    /// `nil`, or a live value that had nothing to report.
    Nil,
    /// Boolean literal.
    Boolean,
    /// Integer literal.
    Integer,
    /// Decimal literal.
    Float,
    /// String literal.
    String,
    /// Atom or bare alias word.
    Atom,
    /// Plain list.
    List,
    /// Key/value map.
    Map,
    /// Nested constructor call.
    Call,
    /// Dotted reference such as `Color.Red`.
    DotAccess,
    /// Value read from the runtime store when the decoration is built.
    LambdaValue {
        /// Conversion hint (`float`, `int`, `bool`, ...).
        type_hint: String,
        /// Node whose value is read.
        node_id: String,
    },
    /// Shape the adapter does not understand; builders skip it.
    Unknown,
}

/// One adapted argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentNode {
    name: Option<String>,
    index: usize,
    kind: ArgKind,
    expr: Expr,
}

impl ArgumentNode {
    /// Wrap an expression found at `index`, optionally under `name`.
    pub fn new(expr: Expr, index: usize, name: Option<String>) -> Self {
        let kind = classify(&expr);
        Self {
            name,
            index,
            kind,
            expr,
        }
    }

    /// Unnamed argument at `index`.
    pub fn positional(expr: Expr, index: usize) -> Self {
        Self::new(expr, index, None)
    }

    /// Named argument.
    pub fn named(name: impl Into<String>, expr: Expr, index: usize) -> Self {
        Self::new(expr, index, Some(name.into()))
    }

    /// Argument name when given as `name: value`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Position in the original argument list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Kind tag.
    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }

    /// Underlying expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// True for `nil` (including unresolved live values).
    pub fn is_nil(&self) -> bool {
        matches!(self.expr, Expr::Nil)
    }

    /// Boolean literal.
    pub fn as_bool(&self) -> Option<bool> {
        match self.expr {
            Expr::Boolean(flag) => Some(flag),
            _ => None,
        }
    }

    /// Integer view. Decimals without a fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self.expr {
            Expr::Integer(num) => Some(num),
            Expr::Float(num) if num.is_finite() && num.fract() == 0.0 => Some(num as i64),
            _ => None,
        }
    }

    /// Scalar view. Integers and decimals are interchangeable.
    pub fn as_f64(&self) -> Option<f64> {
        match self.expr {
            Expr::Integer(num) => Some(num as f64),
            Expr::Float(num) => Some(num),
            _ => None,
        }
    }

    /// Scalar view narrowed to `f32`.
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|num| num as f32)
    }

    /// String literal.
    pub fn as_str(&self) -> Option<&str> {
        match &self.expr {
            Expr::String(text) => Some(text),
            _ => None,
        }
    }

    /// Atom name.
    pub fn as_atom(&self) -> Option<&str> {
        match &self.expr {
            Expr::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// Last segment of an enum-like reference: `Red` for `Color.Red`, `.red` or `:Red`.
    pub fn member(&self) -> Option<&str> {
        match &self.expr {
            Expr::Atom(name) => Some(name),
            Expr::Dot(chain) => match chain.last()? {
                Expr::Atom(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// All segments of a dotted reference when every segment is a name.
    pub fn path(&self) -> Option<Vec<&str>> {
        match &self.expr {
            Expr::Dot(chain) => chain
                .iter()
                .map(|segment| match segment {
                    Expr::Atom(name) => Some(name.as_str()),
                    _ => None,
                })
                .collect(),
            Expr::Atom(name) => Some(vec![name.as_str()]),
            _ => None,
        }
    }

    /// List elements as positional nodes.
    pub fn as_list(&self) -> Option<Vec<ArgumentNode>> {
        match &self.expr {
            Expr::List(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| ArgumentNode::positional(item.clone(), idx))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Map entries as named nodes.
    pub fn as_map(&self) -> Option<Vec<ArgumentNode>> {
        match &self.expr {
            Expr::Map(entries) => Some(
                entries
                    .iter()
                    .enumerate()
                    .map(|(idx, (key, value))| ArgumentNode::named(key.clone(), value.clone(), idx))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Nested constructor call with its arguments adapted.
    pub fn as_call(&self) -> Option<CallView> {
        match &self.expr {
            Expr::Call(call) => Some(CallView {
                name: call.name.clone(),
                args: adapt(call),
            }),
            _ => None,
        }
    }

    /// Literal value of this argument (see [`Value::from_expr`]).
    pub fn to_value(&self) -> Option<Value> {
        Value::from_expr(&self.expr)
    }

    /// True when this argument (or anything nested in it) reads a live value.
    pub fn requires_deferred(&self) -> bool {
        contains_lambda(&self.expr)
    }

    /// Replace every live-value reference with the value currently in `values`.
    ///
    /// Missing or unconvertible values become `nil`, which coercions treat as
    /// an absent argument. Name and index are preserved.
    pub fn resolve_deferred(&self, values: &dyn LiveValues) -> ArgumentNode {
        if !self.requires_deferred() {
            return self.clone();
        }
        let expr = substitute(&self.expr, values);
        ArgumentNode::new(expr, self.index, self.name.clone())
    }
}

/// A nested call with adapted arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallView {
    /// Full call name, receiver included.
    pub name: String,
    /// Adapted arguments.
    pub args: Vec<ArgumentNode>,
}

impl CallView {
    /// Member part of the name (`sweepGradient` for `Brush.sweepGradient`).
    pub fn member(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// [`arg_or_named`] over this call's arguments.
    pub fn arg(&self, name: &str, index: usize) -> Option<&ArgumentNode> {
        arg_or_named(&self.args, name, index)
    }
}

/// Adapt the arguments of a call.
pub fn adapt(call: &Call) -> Vec<ArgumentNode> {
    adapt_args(&call.args)
}

/// Adapt a raw argument list.
///
/// A sole map argument (or a sole keyword list of `{:key, value}` tuples)
/// expands into named nodes; anything else is positional.
pub fn adapt_args(args: &[Expr]) -> Vec<ArgumentNode> {
    match args {
        [Expr::Map(entries)] => entries
            .iter()
            .enumerate()
            .map(|(idx, (key, value))| ArgumentNode::named(key.clone(), value.clone(), idx))
            .collect(),
        [Expr::List(items)] if is_keyword_list(items) => items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match item {
                Expr::Tuple(pair) => match pair.as_slice() {
                    [Expr::Atom(key), value] => {
                        Some(ArgumentNode::named(key.clone(), value.clone(), idx))
                    }
                    _ => None,
                },
                _ => None,
            })
            .collect(),
        _ => args
            .iter()
            .enumerate()
            .map(|(idx, expr)| ArgumentNode::positional(expr.clone(), idx))
            .collect(),
    }
}

/// Named-or-positional lookup.
///
/// When every argument is named, returns the one called `name`. When none is
/// named, returns the argument at `index`. Mixed naming resolves to `None`.
pub fn arg_or_named<'a>(
    args: &'a [ArgumentNode],
    name: &str,
    index: usize,
) -> Option<&'a ArgumentNode> {
    let named = args.iter().filter(|arg| arg.name.is_some()).count();
    if named == 0 {
        args.get(index)
    } else if named == args.len() {
        args.iter().find(|arg| arg.name() == Some(name))
    } else {
        None
    }
}

/// True when the call uses named arguments only.
pub fn all_named(args: &[ArgumentNode]) -> bool {
    !args.is_empty() && args.iter().all(|arg| arg.name.is_some())
}

fn is_keyword_list(items: &[Expr]) -> bool {
    !items.is_empty()
        && items.iter().all(|item| {
            matches!(item, Expr::Tuple(pair) if matches!(pair.as_slice(), [Expr::Atom(_), _]))
        })
}

fn classify(expr: &Expr) -> ArgKind {
    if let Some((type_hint, node_id)) = lambda_value(expr) {
        return ArgKind::LambdaValue { type_hint, node_id };
    }
    match expr {
        Expr::Nil => ArgKind::Nil,
        Expr::Boolean(_) => ArgKind::Boolean,
        Expr::Integer(_) => ArgKind::Integer,
        Expr::Float(_) => ArgKind::Float,
        Expr::String(_) => ArgKind::String,
        Expr::Atom(_) => ArgKind::Atom,
        Expr::List(_) => ArgKind::List,
        Expr::Map(_) => ArgKind::Map,
        Expr::Call(_) => ArgKind::Call,
        Expr::Dot(_) => ArgKind::DotAccess,
        Expr::Tuple(_) => ArgKind::Unknown,
    }
}

/// `[hint, {:__view_value__, _, ["node-id"]}]`
fn lambda_value(expr: &Expr) -> Option<(String, String)> {
    let Expr::List(items) = expr else {
        return None;
    };
    let [hint, Expr::Call(call)] = items.as_slice() else {
        return None;
    };
    let hint = match hint {
        Expr::Atom(text) | Expr::String(text) => text.clone(),
        _ => return None,
    };
    if call.name != VIEW_VALUE_TAG {
        return None;
    }
    match call.args.as_slice() {
        [Expr::String(node_id)] => Some((hint, node_id.clone())),
        _ => None,
    }
}

fn contains_lambda(expr: &Expr) -> bool {
    if lambda_value(expr).is_some() {
        return true;
    }
    match expr {
        Expr::List(items) | Expr::Dot(items) | Expr::Tuple(items) => {
            items.iter().any(contains_lambda)
        }
        Expr::Map(entries) => entries.iter().any(|(_, value)| contains_lambda(value)),
        Expr::Call(call) => call.args.iter().any(contains_lambda),
        _ => false,
    }
}

fn substitute(expr: &Expr, values: &dyn LiveValues) -> Expr {
    if let Some((hint, node_id)) = lambda_value(expr) {
        return values
            .live_value(&node_id)
            .map(|value| convert_live_value(&hint, value))
            .unwrap_or(Value::Nil)
            .to_expr();
    }
    match expr {
        Expr::List(items) => Expr::List(items.iter().map(|item| substitute(item, values)).collect()),
        Expr::Dot(items) => Expr::Dot(items.iter().map(|item| substitute(item, values)).collect()),
        Expr::Tuple(items) => {
            Expr::Tuple(items.iter().map(|item| substitute(item, values)).collect())
        }
        Expr::Map(entries) => Expr::Map(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), substitute(value, values)))
                .collect(),
        ),
        Expr::Call(call) => Expr::Call(Call {
            name: call.name.clone(),
            meta: call.meta.clone(),
            args: call.args.iter().map(|arg| substitute(arg, values)).collect(),
        }),
        other => other.clone(),
    }
}

/// Convert a stored value according to the argument's type hint.
pub fn convert_live_value(hint: &str, value: Value) -> Value {
    match hint {
        "float" | "double" | "dp" | "sp" => match value {
            Value::Integer(num) => Value::Float(num as f64),
            Value::Float(num) => Value::Float(num),
            Value::String(text) => text.trim().parse().map(Value::Float).unwrap_or(Value::Nil),
            _ => Value::Nil,
        },
        "int" | "long" => match value {
            Value::Integer(num) => Value::Integer(num),
            Value::Float(num) if num.is_finite() => Value::Integer(num.trunc() as i64),
            Value::String(text) => text.trim().parse().map(Value::Integer).unwrap_or(Value::Nil),
            _ => Value::Nil,
        },
        "bool" | "boolean" => match value {
            Value::Boolean(flag) => Value::Boolean(flag),
            Value::String(text) => match text.as_str() {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                _ => Value::Nil,
            },
            _ => Value::Nil,
        },
        "string" => match value {
            Value::String(text) => Value::String(text),
            Value::Integer(num) => Value::String(num.to_string()),
            Value::Float(num) => Value::String(num.to_string()),
            Value::Boolean(flag) => Value::String(flag.to_string()),
            _ => Value::Nil,
        },
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_expression;

    fn call_args(src: &str) -> Vec<ArgumentNode> {
        match parse_expression(src).expect("parse") {
            Expr::Call(call) => adapt(&call),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn positional_and_named_shapes_share_one_protocol() {
        let positional = call_args("padding(4, 8)");
        assert_eq!(positional.len(), 2);
        assert_eq!(positional[1].index(), 1);
        assert_eq!(positional[1].name(), None);

        let named = call_args("padding(horizontal: 4, vertical: 8)");
        assert_eq!(named[1].name(), Some("vertical"));
        assert_eq!(named[1].as_i64(), Some(8));

        let keyword_tuples = call_args("{:padding, [], [[{:horizontal, 4}, {:vertical, 8}]]}");
        assert_eq!(keyword_tuples, named);
    }

    #[test]
    fn arg_or_named_is_all_or_nothing() {
        let positional = call_args("size(10, 20)");
        assert_eq!(arg_or_named(&positional, "height", 1).and_then(|a| a.as_i64()), Some(20));

        let named = call_args("size(height: 20, width: 10)");
        assert_eq!(arg_or_named(&named, "height", 1).and_then(|a| a.as_i64()), Some(20));
        assert!(arg_or_named(&named, "depth", 2).is_none());

        let mixed = vec![
            ArgumentNode::positional(Expr::Integer(10), 0),
            ArgumentNode::named("height", Expr::Integer(20), 1),
        ];
        assert!(arg_or_named(&mixed, "height", 1).is_none());
        assert!(arg_or_named(&mixed, "width", 0).is_none());
    }

    #[test]
    fn trailing_keywords_after_positionals_stay_positional() {
        let args = call_args("padding(10, top: 5)");
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].kind(), &ArgKind::Map);
        assert!(!all_named(&args));
    }

    #[test]
    fn numbers_are_interchangeable() {
        let args = call_args("alpha(1, 0.5, 2.0)");
        assert_eq!(args[0].as_f64(), Some(1.0));
        assert_eq!(args[1].as_f32(), Some(0.5));
        assert_eq!(args[2].as_i64(), Some(2));
        assert_eq!(args[1].as_i64(), None);
    }

    #[test]
    fn unknown_shapes_are_tagged_not_rejected() {
        let args = call_args("padding({1, 2})");
        assert_eq!(args[0].kind(), &ArgKind::Unknown);
        assert_eq!(args[0].as_f64(), None);
    }

    #[test]
    fn lambda_values_are_classified_and_resolved_late() {
        let args = call_args(r#"offset(x: [:float, __view_value__("node-42")], y: 3)"#);
        assert_eq!(
            args[0].kind(),
            &ArgKind::LambdaValue {
                type_hint: "float".into(),
                node_id: "node-42".into()
            }
        );
        assert!(args[0].requires_deferred());
        assert!(!args[1].requires_deferred());

        let mut values = HashMap::new();
        values.insert("node-42".to_string(), Value::Integer(7));
        let resolved = args[0].resolve_deferred(&values);
        assert_eq!(resolved.name(), Some("x"));
        assert_eq!(resolved.as_f64(), Some(7.0));
        assert_eq!(resolved.kind(), &ArgKind::Float);

        let missing = args[0].resolve_deferred(&HashMap::new());
        assert!(missing.is_nil());
        assert_eq!(missing.index(), 0);
    }

    #[test]
    fn nested_lambda_values_mark_the_outer_argument() {
        let args = call_args(r#"background(Color(red: [:int, __view_value__("r")], green: 0, blue: 0))"#);
        assert!(args[0].requires_deferred());
        let mut values = HashMap::new();
        values.insert("r".to_string(), Value::Float(200.9));
        let resolved = args[0].resolve_deferred(&values);
        let call = resolved.as_call().expect("call");
        assert_eq!(call.arg("red", 0).and_then(|a| a.as_i64()), Some(200));
    }

    #[test]
    fn live_values_convert_by_hint() {
        assert_eq!(convert_live_value("int", Value::from("12")), Value::Integer(12));
        assert_eq!(convert_live_value("bool", Value::Integer(1)), Value::Nil);
        assert_eq!(convert_live_value("string", Value::Boolean(true)), Value::from("true"));
        assert_eq!(convert_live_value("any", Value::Integer(3)), Value::Integer(3));
    }

    #[test]
    fn references_expose_member_and_path() {
        let args = call_args("background(MaterialTheme.colorScheme.primary, .red, :Blue)");
        assert_eq!(args[0].member(), Some("primary"));
        assert_eq!(
            args[0].path(),
            Some(vec!["MaterialTheme", "colorScheme", "primary"])
        );
        assert_eq!(args[1].member(), Some("red"));
        assert_eq!(args[2].member(), Some("Blue"));
    }
}
