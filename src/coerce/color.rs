//! Colors: palette members, packed ARGB, hex strings and channel constructors

use serde::Serialize;

use super::call_named;
use crate::directive::argument::{ArgumentNode, arg_or_named};
use crate::directive::overload::{Arm, Shape, select};
use crate::syntax::Expr;

/// A color reference.
///
/// Concrete colors are packed `0xAARRGGBB`. Theme tokens stay symbolic; the
/// host resolves them against its color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Color {
    /// Packed ARGB.
    Argb(u32),
    /// Color scheme role such as `primary` or `onSurface`.
    Theme(String),
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::Argb(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Color = Color::Argb(0xFFFF_FFFF);
    /// Fully transparent.
    pub const TRANSPARENT: Color = Color::Argb(0x0000_0000);

    /// Pack channels.
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Color::Argb(
            (alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32,
        )
    }
}

const PALETTE: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("transparent", 0x0000_0000),
];

fn palette(name: &str) -> Option<Color> {
    PALETTE
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, argb)| Color::Argb(*argb))
}

/// Parse `#RRGGBB` or `#AARRGGBB` (the `#` is optional).
pub fn parse_hex(text: &str) -> Option<Color> {
    let digits = text.trim().trim_start_matches('#');
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    let packed = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Color::Argb(0xFF00_0000 | packed)),
        8 => Some(Color::Argb(packed)),
        _ => None,
    }
}

/// One channel: integers are 0..=255, decimals are fractions of 1.
fn channel(node: &ArgumentNode) -> Option<u8> {
    match node.expr() {
        Expr::Integer(num) => u8::try_from((*num).clamp(0, 255)).ok(),
        Expr::Float(num) if num.is_finite() => Some((num.clamp(0.0, 1.0) * 255.0).round() as u8),
        _ => None,
    }
}

fn components(args: &[ArgumentNode]) -> Option<Color> {
    let alpha = match arg_or_named(args, "alpha", 3) {
        Some(node) if !node.is_nil() => channel(node)?,
        _ => 255,
    };
    Some(Color::from_argb(
        alpha,
        channel(arg_or_named(args, "red", 0)?)?,
        channel(arg_or_named(args, "green", 1)?)?,
        channel(arg_or_named(args, "blue", 2)?)?,
    ))
}

const CONSTRUCTOR_ARMS: &[Arm<Color>] = &[
    Arm {
        shape: Shape::Named(&["red", "green", "blue", "alpha"]),
        build: components,
    },
    Arm {
        shape: Shape::Arity(1),
        build: |args| match args[0].expr() {
            Expr::Integer(num) => Some(Color::Argb((*num & 0xFFFF_FFFF) as u32)),
            Expr::String(text) => parse_hex(text),
            _ => None,
        },
    },
    Arm {
        shape: Shape::Arity(3),
        build: components,
    },
    Arm {
        shape: Shape::Arity(4),
        build: components,
    },
];

/// Coerce a color.
///
/// Accepts palette references (`Color.Red`, `.red`, `:red`), theme roles
/// (`MaterialTheme.colorScheme.primary`), hex strings, and the `Color(...)`
/// constructor in packed, hex or component form. `Color.Unspecified` is absent.
pub fn color(node: &ArgumentNode) -> Option<Color> {
    if let Some(path) = node.path() {
        return match path.as_slice() {
            ["MaterialTheme", "colorScheme", role] => Some(Color::Theme((*role).to_string())),
            [name] | ["Color", name] => palette(name),
            _ => None,
        };
    }
    if let Some(text) = node.as_str() {
        return parse_hex(text);
    }
    let call = call_named(node, &["Color"])?;
    select(&call.args, CONSTRUCTOR_ARMS)
}

/// List of colors, as used by gradients. Every element must coerce.
pub fn color_list(node: &ArgumentNode) -> Option<Vec<Color>> {
    let items = node.as_list()?;
    if items.is_empty() {
        return None;
    }
    items.iter().map(color).collect()
}
