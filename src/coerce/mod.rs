//! Argument coercions.
//!
//! Every function here maps an [`ArgumentNode`] (or a slice of them) to the
//! value type a directive needs, returning `None` when the shape does not
//! fit. Nothing panics and nothing reports errors; directives chain these
//! with `or`/`unwrap_or` down to their own defaults.

/// Box, horizontal and vertical alignments.
pub mod alignment;
/// Animation specs and easing curves.
pub mod animation;
/// Solid and gradient brushes.
pub mod brush;
/// Palette, packed and component colors.
pub mod color;
/// Server event descriptors.
pub mod event;
/// Numeric ranges.
pub mod range;
/// Corner shapes.
pub mod shape;
/// Toggle states.
pub mod toggle;
/// Enter/exit transitions.
pub mod transition;
/// Lengths and length bundles.
pub mod units;

pub use alignment::{Alignment, AlignmentValue, HorizontalAlignment, VerticalAlignment};
pub use animation::{AnimationSpec, Easing, Keyframe, RepeatMode};
pub use brush::{Brush, Paint, TileMode};
pub use color::Color;
pub use event::EventDescriptor;
pub use range::ValueRange;
pub use shape::{CornerRadii, CornerSize, Shape};
pub use toggle::ToggleableState;
pub use transition::{EnterTransition, ExitTransition};
pub use units::{DpOffset, DpSize, EdgeInsets, Length, Offset, Unit};

use crate::directive::argument::{ArgumentNode, CallView, arg_or_named};

/// Enum-like reference whose member equals `expected`, ignoring ASCII case.
pub(crate) fn is_member(node: &ArgumentNode, expected: &str) -> bool {
    node.member()
        .is_some_and(|member| member.eq_ignore_ascii_case(expected))
}

/// Nested call whose member name is one of `names`.
pub(crate) fn call_named(node: &ArgumentNode, names: &[&str]) -> Option<CallView> {
    let call = node.as_call()?;
    names
        .iter()
        .any(|name| call.member() == *name)
        .then_some(call)
}

/// Non-negative whole number, as used for durations and counts.
pub(crate) fn non_negative(node: &ArgumentNode) -> Option<u32> {
    node.as_i64()
        .filter(|value| *value >= 0)
        .and_then(|value| u32::try_from(value).ok())
}

/// Parameter by name or position, coerced. Chain with `?` for required
/// parameters and `unwrap_or` for defaulted ones.
pub(crate) fn param<T>(
    args: &[ArgumentNode],
    name: &str,
    index: usize,
    coerce: impl FnOnce(&ArgumentNode) -> Option<T>,
) -> Option<T> {
    arg_or_named(args, name, index).and_then(coerce)
}

/// Plain number, or the magnitude of a length (`4.dp` reads as `4`).
pub(crate) fn scalar(node: &ArgumentNode) -> Option<f32> {
    node.as_f32().or_else(|| units::length(node).map(|len| len.value))
}
