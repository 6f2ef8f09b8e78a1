//! Numeric ranges: `a..b` and `rangeTo(a, b)`

use serde::Serialize;

use crate::directive::argument::ArgumentNode;

/// Closed numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    /// Lower bound.
    pub start: f32,
    /// Upper bound.
    pub end: f32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }
}

/// `a..b` (parsed as the `..` call) or `rangeTo(a, b)`. Reversed bounds are rejected.
pub fn value_range(node: &ArgumentNode) -> Option<ValueRange> {
    let call = node.as_call()?;
    if call.name != ".." && call.member() != "rangeTo" {
        return None;
    }
    let start = call.arg("start", 0)?.as_f32()?;
    let end = call.arg("end", 1)?.as_f32()?;
    (start <= end).then_some(ValueRange { start, end })
}
