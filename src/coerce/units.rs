//! Lengths, insets, offsets and sizes

use serde::Serialize;

use super::{call_named, is_member, param};
use crate::directive::argument::ArgumentNode;
use crate::directive::overload::{Arm, Shape, select};
use crate::syntax::Expr;

/// Unit tag of a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Density-independent pixels.
    Dp,
    /// Scale-independent pixels.
    Sp,
    /// Physical pixels.
    Px,
    /// Relative to the current font size.
    Em,
}

impl Unit {
    fn from_name(name: &str) -> Option<Unit> {
        match name {
            "dp" | "Dp" => Some(Unit::Dp),
            "sp" | "Sp" => Some(Unit::Sp),
            "px" | "Px" => Some(Unit::Px),
            "em" | "Em" => Some(Unit::Em),
            _ => None,
        }
    }
}

/// A length quantity with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Length {
    /// Magnitude.
    pub value: f32,
    /// Unit tag.
    pub unit: Unit,
}

impl Length {
    /// Zero dp.
    pub const ZERO: Length = Length::dp(0.0);

    /// Length in dp.
    pub const fn dp(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Dp,
        }
    }

    /// Length in sp.
    pub const fn sp(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Sp,
        }
    }

    /// Length in physical pixels.
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }
}

/// Coerce a length: a bare number (dp), `10.sp`, `dp(10)`, `Dp.Hairline`, `Dp.Infinity`.
///
/// `Dp.Unspecified` is treated as absent.
pub fn length(node: &ArgumentNode) -> Option<Length> {
    if let Some(value) = node.as_f32() {
        return Some(Length::dp(value));
    }

    if let Expr::Dot(chain) = node.expr() {
        if let [number, Expr::Atom(unit)] = chain.as_slice() {
            let value = match number {
                Expr::Integer(num) => Some(*num as f32),
                Expr::Float(num) => Some(*num as f32),
                _ => None,
            };
            if let Some(value) = value {
                return Unit::from_name(unit).map(|unit| Length { value, unit });
            }
        }
    }

    if let Some(path) = node.path() {
        if let [receiver, member] = path.as_slice() {
            if *receiver == "Dp" {
                return match *member {
                    "Hairline" => Some(Length::ZERO),
                    "Infinity" => Some(Length::dp(f32::INFINITY)),
                    _ => None,
                };
            }
        }
    }

    let call = node.as_call()?;
    let unit = Unit::from_name(call.member())?;
    let value = call.arg("value", 0)?.as_f32()?;
    Some(Length { value, unit })
}

/// Four-sided insets in layout direction order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeInsets {
    /// Leading edge.
    pub start: Length,
    /// Top edge.
    pub top: Length,
    /// Trailing edge.
    pub end: Length,
    /// Bottom edge.
    pub bottom: Length,
}

impl EdgeInsets {
    /// Same inset on every side.
    pub fn all(value: Length) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal and vertical insets.
    pub fn symmetric(horizontal: Length, vertical: Length) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Explicit insets.
    pub fn new(start: Length, top: Length, end: Length, bottom: Length) -> Self {
        Self {
            start,
            top,
            end,
            bottom,
        }
    }
}

fn length_or_zero(args: &[ArgumentNode], name: &str) -> Length {
    args.iter()
        .find(|arg| arg.name() == Some(name))
        .and_then(length)
        .unwrap_or(Length::ZERO)
}

const EDGE_INSET_ARMS: &[Arm<EdgeInsets>] = &[
    Arm {
        shape: Shape::Named(&["start", "top", "end", "bottom"]),
        build: |args| {
            Some(EdgeInsets::new(
                length_or_zero(args, "start"),
                length_or_zero(args, "top"),
                length_or_zero(args, "end"),
                length_or_zero(args, "bottom"),
            ))
        },
    },
    Arm {
        shape: Shape::Named(&["horizontal", "vertical"]),
        build: |args| {
            Some(EdgeInsets::symmetric(
                length_or_zero(args, "horizontal"),
                length_or_zero(args, "vertical"),
            ))
        },
    },
    Arm {
        shape: Shape::Named(&["all"]),
        build: |args| param(args, "all", 0, length).map(EdgeInsets::all),
    },
    Arm {
        shape: Shape::Named(&["paddingValues", "values"]),
        build: |args| {
            param(args, "paddingValues", 0, padding_values)
                .or_else(|| param(args, "values", 0, padding_values))
        },
    },
    Arm {
        shape: Shape::Where(|args| args.len() == 1 && args[0].as_call().is_some()),
        build: |args| padding_values(&args[0]),
    },
    Arm {
        shape: Shape::Arity(1),
        build: |args| length(&args[0]).map(EdgeInsets::all),
    },
    Arm {
        shape: Shape::Arity(2),
        build: |args| Some(EdgeInsets::symmetric(length(&args[0])?, length(&args[1])?)),
    },
    Arm {
        shape: Shape::Arity(4),
        build: |args| {
            Some(EdgeInsets::new(
                length(&args[0])?,
                length(&args[1])?,
                length(&args[2])?,
                length(&args[3])?,
            ))
        },
    },
];

/// Insets from the argument list of `padding` or `PaddingValues`:
/// `(all)`, `(horizontal, vertical)`, `(start, top, end, bottom)`, their named
/// forms, or a single `PaddingValues(...)` call.
pub fn edge_insets(args: &[ArgumentNode]) -> Option<EdgeInsets> {
    select(args, EDGE_INSET_ARMS)
}

/// `PaddingValues(...)` constructor.
pub fn padding_values(node: &ArgumentNode) -> Option<EdgeInsets> {
    let call = call_named(node, &["PaddingValues"])?;
    // A nested PaddingValues(PaddingValues(..)) is not a thing; keep to plain lengths.
    if call.args.len() == 1 && call.args[0].as_call().is_some() {
        return None;
    }
    edge_insets(&call.args)
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DpSize {
    /// Width.
    pub width: Length,
    /// Height.
    pub height: Length,
}

/// `DpSize(width, height)`.
pub fn dp_size(node: &ArgumentNode) -> Option<DpSize> {
    let call = call_named(node, &["DpSize"])?;
    Some(DpSize {
        width: length(call.arg("width", 0)?)?,
        height: length(call.arg("height", 1)?)?,
    })
}

/// Offset expressed in lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DpOffset {
    /// Horizontal component.
    pub x: Length,
    /// Vertical component.
    pub y: Length,
}

/// `DpOffset(x, y)`.
pub fn dp_offset(node: &ArgumentNode) -> Option<DpOffset> {
    let call = call_named(node, &["DpOffset"])?;
    Some(DpOffset {
        x: length(call.arg("x", 0)?)?,
        y: length(call.arg("y", 1)?)?,
    })
}

/// Position in drawing space, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Offset {
    /// Origin.
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };
    /// Far corner of the drawing area.
    pub const INFINITE: Offset = Offset {
        x: f32::INFINITY,
        y: f32::INFINITY,
    };

    /// Construct an offset.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// `Offset(x, y)`, `Offset.Zero`, `Offset.Infinite`. `Offset.Unspecified` is absent.
pub fn offset(node: &ArgumentNode) -> Option<Offset> {
    if let Some(path) = node.path() {
        if path.first() == Some(&"Offset") || path.len() == 1 {
            if is_member(node, "Zero") {
                return Some(Offset::ZERO);
            }
            if is_member(node, "Infinite") {
                return Some(Offset::INFINITE);
            }
        }
        return None;
    }
    let call = call_named(node, &["Offset"])?;
    Some(Offset::new(
        call.arg("x", 0)?.as_f32()?,
        call.arg("y", 1)?.as_f32()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::argument::adapt;
    use crate::syntax::parse_expression;

    fn node(src: &str) -> ArgumentNode {
        ArgumentNode::positional(parse_expression(src).unwrap(), 0)
    }

    fn args(src: &str) -> Vec<ArgumentNode> {
        adapt(parse_expression(src).unwrap().as_call().unwrap())
    }

    #[test]
    fn lengths_accept_numbers_units_and_constructors() {
        assert_eq!(length(&node("12")), Some(Length::dp(12.0)));
        assert_eq!(length(&node("12.5")), Some(Length::dp(12.5)));
        assert_eq!(length(&node("14.sp")), Some(Length::sp(14.0)));
        assert_eq!(length(&node("dp(4)")), Some(Length::dp(4.0)));
        assert_eq!(length(&node("Dp.Hairline")), Some(Length::ZERO));
        assert_eq!(length(&node("Dp.Unspecified")), None);
        assert_eq!(length(&node("\"12\"")), None);
        assert_eq!(length(&node("3.furlong")), None);
    }

    #[test]
    fn edge_insets_overloads() {
        assert_eq!(edge_insets(&args("p(8)")), Some(EdgeInsets::all(Length::dp(8.0))));
        assert_eq!(
            edge_insets(&args("p(8, 4)")),
            edge_insets(&args("p(horizontal: 8, vertical: 4)"))
        );
        assert_eq!(
            edge_insets(&args("p(1, 2, 3, 4)")),
            edge_insets(&args("p(start: 1, top: 2, end: 3, bottom: 4)"))
        );
        assert_eq!(
            edge_insets(&args("p(top: 2)")),
            Some(EdgeInsets::new(Length::ZERO, Length::dp(2.0), Length::ZERO, Length::ZERO))
        );
        assert_eq!(
            edge_insets(&args("p(PaddingValues(1, 2))")),
            edge_insets(&args("p(1, 2)"))
        );
        assert_eq!(edge_insets(&args("p(1, 2, 3)")), None);
        assert_eq!(edge_insets(&args("p(\"wide\")")), None);
    }

    #[test]
    fn named_inset_forms_read_by_name() {
        assert_eq!(
            edge_insets(&args("p(extra: 1, all: 8)")),
            Some(EdgeInsets::all(Length::dp(8.0)))
        );
        assert_eq!(
            edge_insets(&args("p(extra: 1, values: PaddingValues(2, 3))")),
            edge_insets(&args("p(2, 3)"))
        );
        assert_eq!(
            edge_insets(&args("p(extra: 1, paddingValues: PaddingValues(5))")),
            Some(EdgeInsets::all(Length::dp(5.0)))
        );
    }

    #[test]
    fn offsets_and_sizes() {
        assert_eq!(offset(&node("Offset(10, 20.5)")), Some(Offset::new(10.0, 20.5)));
        assert_eq!(offset(&node("Offset(y: 2, x: 1)")), Some(Offset::new(1.0, 2.0)));
        assert_eq!(offset(&node("Offset.Zero")), Some(Offset::ZERO));
        assert_eq!(offset(&node("Offset.Unspecified")), None);
        assert_eq!(
            dp_size(&node("DpSize(10, 20)")),
            Some(DpSize {
                width: Length::dp(10.0),
                height: Length::dp(20.0)
            })
        );
        assert_eq!(
            dp_offset(&node("DpOffset(x: 1.dp, y: 2.px)")),
            Some(DpOffset {
                x: Length::dp(1.0),
                y: Length::px(2.0)
            })
        );
    }
}
