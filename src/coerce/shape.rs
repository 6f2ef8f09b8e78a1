//! Outline shapes and corner radii

use serde::Serialize;

use super::{call_named, param};
use super::units::{Length, length};
use crate::directive::argument::ArgumentNode;
use crate::directive::overload::{Arm, Shape as ArgShape, select};

/// Size of one corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CornerSize {
    /// Absolute radius.
    Fixed(Length),
    /// Percentage of the shorter side, 0..=100.
    Percent(u8),
}

impl CornerSize {
    const ZERO: CornerSize = CornerSize::Fixed(Length::ZERO);
}

/// Corner sizes in layout direction order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerRadii {
    /// Top leading corner.
    pub top_start: CornerSize,
    /// Top trailing corner.
    pub top_end: CornerSize,
    /// Bottom trailing corner.
    pub bottom_end: CornerSize,
    /// Bottom leading corner.
    pub bottom_start: CornerSize,
}

impl CornerRadii {
    /// Same size on every corner.
    pub fn all(size: CornerSize) -> Self {
        Self {
            top_start: size,
            top_end: size,
            bottom_end: size,
            bottom_start: size,
        }
    }
}

/// Outline used for clipping, backgrounds, borders and shadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "corners", rename_all = "snake_case")]
pub enum Shape {
    /// Plain rectangle.
    Rectangle,
    /// Circle (fully rounded).
    Circle,
    /// Rounded corners.
    Rounded(CornerRadii),
    /// Chamfered corners.
    CutCorner(CornerRadii),
}

fn percent(node: &ArgumentNode) -> Option<CornerSize> {
    let value = node.as_i64()?;
    u8::try_from(value.clamp(0, 100)).ok().map(CornerSize::Percent)
}

fn corner(args: &[ArgumentNode], name: &str) -> Option<CornerSize> {
    match args.iter().find(|arg| arg.name() == Some(name)) {
        Some(node) => length(node).map(CornerSize::Fixed),
        None => Some(CornerSize::ZERO),
    }
}

const RADII_ARMS: &[Arm<CornerRadii>] = &[
    Arm {
        shape: ArgShape::Named(&["percent"]),
        build: |args| param(args, "percent", 0, percent).map(CornerRadii::all),
    },
    Arm {
        shape: ArgShape::Named(&["size", "corner"]),
        build: |args| {
            param(args, "size", 0, length)
                .or_else(|| param(args, "corner", 0, length))
                .map(|len| CornerRadii::all(CornerSize::Fixed(len)))
        },
    },
    Arm {
        shape: ArgShape::Named(&["topStart", "topEnd", "bottomEnd", "bottomStart"]),
        build: |args| {
            Some(CornerRadii {
                top_start: corner(args, "topStart")?,
                top_end: corner(args, "topEnd")?,
                bottom_end: corner(args, "bottomEnd")?,
                bottom_start: corner(args, "bottomStart")?,
            })
        },
    },
    Arm {
        shape: ArgShape::Arity(0),
        build: |_| Some(CornerRadii::all(CornerSize::ZERO)),
    },
    Arm {
        shape: ArgShape::Arity(1),
        build: |args| length(&args[0]).map(|len| CornerRadii::all(CornerSize::Fixed(len))),
    },
    Arm {
        shape: ArgShape::Arity(4),
        build: |args| {
            let fixed = |idx: usize| length(&args[idx]).map(CornerSize::Fixed);
            Some(CornerRadii {
                top_start: fixed(0)?,
                top_end: fixed(1)?,
                bottom_end: fixed(2)?,
                bottom_start: fixed(3)?,
            })
        },
    },
];

/// Coerce a shape: `RectangleShape`, `CircleShape`, `RoundedCornerShape(...)`,
/// `CutCornerShape(...)`.
///
/// Corner constructors take one size, four sizes, named corners (missing
/// ones are zero) or a named `percent`.
pub fn shape(node: &ArgumentNode) -> Option<Shape> {
    if let Some(member) = node.member() {
        return match member {
            "RectangleShape" | "Rectangle" => Some(Shape::Rectangle),
            "CircleShape" | "Circle" => Some(Shape::Circle),
            _ => None,
        };
    }
    if let Some(call) = call_named(node, &["RoundedCornerShape"]) {
        return select(&call.args, RADII_ARMS).map(Shape::Rounded);
    }
    let call = call_named(node, &["CutCornerShape"])?;
    select(&call.args, RADII_ARMS).map(Shape::CutCorner)
}
