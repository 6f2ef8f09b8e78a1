//! Solid and gradient brushes

use serde::Serialize;

use super::color::{Color, color, color_list};
use super::units::{Offset, offset};
use super::{call_named, param, scalar};
use crate::directive::argument::ArgumentNode;

/// Behaviour of a gradient outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileMode {
    /// Extend the edge colors.
    #[default]
    Clamp,
    /// Repeat the gradient.
    Repeated,
    /// Repeat, mirroring every other tile.
    Mirror,
    /// Transparent outside the bounds.
    Decal,
}

/// Solid or gradient fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Brush {
    /// `SolidColor(color)`.
    Solid { color: Color },
    /// Left-to-right gradient.
    HorizontalGradient {
        colors: Vec<Color>,
        start_x: f32,
        end_x: f32,
        tile_mode: TileMode,
    },
    /// Top-to-bottom gradient.
    VerticalGradient {
        colors: Vec<Color>,
        start_y: f32,
        end_y: f32,
        tile_mode: TileMode,
    },
    /// Gradient between two points.
    LinearGradient {
        colors: Vec<Color>,
        start: Offset,
        end: Offset,
        tile_mode: TileMode,
    },
    /// Circular gradient; an absent center means the middle of the drawing area.
    RadialGradient {
        colors: Vec<Color>,
        center: Option<Offset>,
        radius: f32,
        tile_mode: TileMode,
    },
    /// Angular gradient; an absent center means the middle of the drawing area.
    SweepGradient {
        colors: Vec<Color>,
        center: Option<Offset>,
    },
}

/// What a background or border is painted with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Paint {
    /// Flat color.
    Color(Color),
    /// Brush.
    Brush(Brush),
}

/// `TileMode.Clamp|Repeated|Mirror|Decal`.
pub fn tile_mode(node: &ArgumentNode) -> Option<TileMode> {
    match node.member()? {
        "Clamp" => Some(TileMode::Clamp),
        "Repeated" => Some(TileMode::Repeated),
        "Mirror" => Some(TileMode::Mirror),
        "Decal" => Some(TileMode::Decal),
        _ => None,
    }
}

fn colors(args: &[ArgumentNode]) -> Option<Vec<Color>> {
    param(args, "colors", 0, color_list)
}

/// Coerce a brush: `SolidColor(c)` or one of the five `Brush.*Gradient` builders.
///
/// Every gradient takes its color list first; remaining parameters are
/// optional and fall back to the toolkit defaults.
pub fn brush(node: &ArgumentNode) -> Option<Brush> {
    if let Some(call) = call_named(node, &["SolidColor"]) {
        return Some(Brush::Solid {
            color: call.arg("value", 0).and_then(color)?,
        });
    }

    let call = node.as_call()?;
    let args = call.args.as_slice();
    let brush = match call.member() {
        "horizontalGradient" => Brush::HorizontalGradient {
            colors: colors(args)?,
            start_x: param(args, "startX", 1, scalar).unwrap_or(0.0),
            end_x: param(args, "endX", 2, scalar).unwrap_or(f32::INFINITY),
            tile_mode: param(args, "tileMode", 3, tile_mode).unwrap_or_default(),
        },
        "verticalGradient" => Brush::VerticalGradient {
            colors: colors(args)?,
            start_y: param(args, "startY", 1, scalar).unwrap_or(0.0),
            end_y: param(args, "endY", 2, scalar).unwrap_or(f32::INFINITY),
            tile_mode: param(args, "tileMode", 3, tile_mode).unwrap_or_default(),
        },
        "linearGradient" => Brush::LinearGradient {
            colors: colors(args)?,
            start: param(args, "start", 1, offset).unwrap_or(Offset::ZERO),
            end: param(args, "end", 2, offset).unwrap_or(Offset::INFINITE),
            tile_mode: param(args, "tileMode", 3, tile_mode).unwrap_or_default(),
        },
        "radialGradient" => Brush::RadialGradient {
            colors: colors(args)?,
            center: param(args, "center", 1, offset),
            radius: param(args, "radius", 2, scalar).unwrap_or(f32::INFINITY),
            tile_mode: param(args, "tileMode", 3, tile_mode).unwrap_or_default(),
        },
        "sweepGradient" => Brush::SweepGradient {
            colors: colors(args)?,
            center: param(args, "center", 1, offset),
        },
        _ => return None,
    };
    Some(brush)
}

/// A color or a brush.
pub fn paint(node: &ArgumentNode) -> Option<Paint> {
    color(node)
        .map(Paint::Color)
        .or_else(|| brush(node).map(Paint::Brush))
}
