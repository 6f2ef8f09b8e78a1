//! Layout directives: padding, sizing, offsets

use crate::coerce::alignment::{Alignment, AlignmentValue, HorizontalAlignment, VerticalAlignment};
use crate::coerce::units::{Length, dp_offset, dp_size, edge_insets, length};
use crate::coerce::{alignment, param};
use crate::directive::argument::ArgumentNode;
use crate::directive::decoration::{Axis, Decoration, Modifier};
use crate::directive::overload::{Arm, Shape, select};
use crate::directive::registry::DirectiveSpec;

pub(crate) const SPECS: &[DirectiveSpec] = &[
    DirectiveSpec::pure("padding", padding),
    DirectiveSpec::pure("size", size),
    DirectiveSpec::pure("requiredSize", required_size),
    DirectiveSpec::pure("width", width),
    DirectiveSpec::pure("height", height),
    DirectiveSpec::pure("sizeIn", size_in),
    DirectiveSpec::pure("fillMaxWidth", |args| fill_max(args, Axis::Width)),
    DirectiveSpec::pure("fillMaxHeight", |args| fill_max(args, Axis::Height)),
    DirectiveSpec::pure("fillMaxSize", |args| fill_max(args, Axis::Both)),
    DirectiveSpec::pure("wrapContentWidth", |args| wrap_content(args, Axis::Width)),
    DirectiveSpec::pure("wrapContentHeight", |args| wrap_content(args, Axis::Height)),
    DirectiveSpec::pure("wrapContentSize", |args| wrap_content(args, Axis::Both)),
    DirectiveSpec::pure("offset", offset),
    DirectiveSpec::pure("aspectRatio", aspect_ratio),
];

fn padding(args: &[ArgumentNode]) -> Option<Decoration> {
    edge_insets(args).map(|insets| Modifier::Padding(insets).into())
}

const SIZE_ARMS: &[Arm<(Length, Length)>] = &[
    Arm {
        shape: Shape::Named(&["size"]),
        build: |args| {
            let square = param(args, "size", 0, length).map(|side| (side, side));
            square.or_else(|| {
                param(args, "size", 0, dp_size).map(|size| (size.width, size.height))
            })
        },
    },
    Arm {
        shape: Shape::Named(&["width", "height"]),
        build: |args| {
            Some((
                param(args, "width", 0, length)?,
                param(args, "height", 1, length)?,
            ))
        },
    },
    Arm {
        shape: Shape::Where(|args| args.len() == 1 && args[0].as_call().is_some()),
        build: |args| dp_size(&args[0]).map(|size| (size.width, size.height)),
    },
    Arm {
        shape: Shape::Arity(1),
        build: |args| length(&args[0]).map(|side| (side, side)),
    },
    Arm {
        shape: Shape::Arity(2),
        build: |args| Some((length(&args[0])?, length(&args[1])?)),
    },
];

fn size(args: &[ArgumentNode]) -> Option<Decoration> {
    let (width, height) = select(args, SIZE_ARMS)?;
    Some(Modifier::Size { width, height }.into())
}

fn required_size(args: &[ArgumentNode]) -> Option<Decoration> {
    let (width, height) = select(args, SIZE_ARMS)?;
    Some(Modifier::RequiredSize { width, height }.into())
}

fn width(args: &[ArgumentNode]) -> Option<Decoration> {
    param(args, "width", 0, length).map(|len| Modifier::Width(len).into())
}

fn height(args: &[ArgumentNode]) -> Option<Decoration> {
    param(args, "height", 0, length).map(|len| Modifier::Height(len).into())
}

fn size_in(args: &[ArgumentNode]) -> Option<Decoration> {
    Some(
        Modifier::SizeIn {
            min_width: param(args, "minWidth", 0, length),
            min_height: param(args, "minHeight", 1, length),
            max_width: param(args, "maxWidth", 2, length),
            max_height: param(args, "maxHeight", 3, length),
        }
        .into(),
    )
}

/// Fraction in `0..=1`, defaulting to 1.
pub(super) fn fraction(args: &[ArgumentNode]) -> Option<f32> {
    let fraction = match arg_present(args, "fraction", 0) {
        Some(node) => node.as_f32()?,
        None => 1.0,
    };
    (0.0..=1.0).contains(&fraction).then_some(fraction)
}

/// The argument if it was given at all (nil counts as absent).
pub(super) fn arg_present<'a>(
    args: &'a [ArgumentNode],
    name: &str,
    index: usize,
) -> Option<&'a ArgumentNode> {
    crate::directive::argument::arg_or_named(args, name, index).filter(|node| !node.is_nil())
}

fn fill_max(args: &[ArgumentNode], axis: Axis) -> Option<Decoration> {
    Some(
        Modifier::FillMax {
            axis,
            fraction: fraction(args)?,
        }
        .into(),
    )
}

fn wrap_content(args: &[ArgumentNode], axis: Axis) -> Option<Decoration> {
    let alignment = match axis {
        Axis::Width => AlignmentValue::Horizontal(
            param(args, "align", 0, alignment::horizontal)
                .unwrap_or(HorizontalAlignment::CenterHorizontally),
        ),
        Axis::Height => AlignmentValue::Vertical(
            param(args, "align", 0, alignment::vertical)
                .unwrap_or(VerticalAlignment::CenterVertically),
        ),
        Axis::Both => AlignmentValue::Both(
            param(args, "align", 0, alignment::alignment).unwrap_or(Alignment::Center),
        ),
    };
    Some(
        Modifier::WrapContent {
            axis,
            alignment,
            unbounded: param(args, "unbounded", 1, ArgumentNode::as_bool).unwrap_or(false),
        }
        .into(),
    )
}

const OFFSET_ARMS: &[Arm<(Length, Length)>] = &[
    Arm {
        shape: Shape::Named(&["x", "y"]),
        build: |args| {
            Some((
                param(args, "x", 0, length).unwrap_or(Length::ZERO),
                param(args, "y", 1, length).unwrap_or(Length::ZERO),
            ))
        },
    },
    Arm {
        shape: Shape::Named(&["offset"]),
        build: |args| param(args, "offset", 0, dp_offset).map(|offset| (offset.x, offset.y)),
    },
    Arm {
        shape: Shape::Where(|args| args.len() == 1 && args[0].as_call().is_some()),
        build: |args| dp_offset(&args[0]).map(|offset| (offset.x, offset.y)),
    },
    Arm {
        shape: Shape::Where(|args| args.len() <= 2),
        build: |args| {
            Some((
                args.first().and_then(length).unwrap_or(Length::ZERO),
                args.get(1).and_then(length).unwrap_or(Length::ZERO),
            ))
        },
    },
];

fn offset(args: &[ArgumentNode]) -> Option<Decoration> {
    let (x, y) = select(args, OFFSET_ARMS)?;
    Some(Modifier::Offset { x, y }.into())
}

fn aspect_ratio(args: &[ArgumentNode]) -> Option<Decoration> {
    let ratio = param(args, "ratio", 0, |node| node.as_f32()).filter(|ratio| *ratio > 0.0)?;
    Some(
        Modifier::AspectRatio {
            ratio,
            match_height_constraints_first: param(
                args,
                "matchHeightConstraintsFirst",
                1,
                ArgumentNode::as_bool,
            )
            .unwrap_or(false),
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::argument::adapt;
    use crate::syntax::parse_expression;

    fn args(src: &str) -> Vec<ArgumentNode> {
        adapt(parse_expression(src).unwrap().as_call().unwrap())
    }

    fn only(decoration: Option<Decoration>) -> Modifier {
        let decoration = decoration.expect("decoration");
        assert_eq!(decoration.modifiers().len(), 1);
        decoration.modifiers()[0].clone()
    }

    #[test]
    fn size_overloads_agree() {
        let expected = Modifier::Size {
            width: Length::dp(10.0),
            height: Length::dp(20.0),
        };
        assert_eq!(only(size(&args("size(10, 20)"))), expected);
        assert_eq!(only(size(&args("size(height: 20, width: 10)"))), expected);
        assert_eq!(only(size(&args("size(DpSize(10, 20))"))), expected);
        assert_eq!(only(size(&args("size(size: DpSize(10, 20))"))), expected);
        assert_eq!(
            only(size(&args("size(4)"))),
            Modifier::Size {
                width: Length::dp(4.0),
                height: Length::dp(4.0)
            }
        );
        assert_eq!(size(&args("size(width: 10)")), None);
        assert_eq!(size(&args("size()")), None);
    }

    #[test]
    fn named_size_and_offset_read_by_name() {
        assert_eq!(
            only(size(&args("size(width: 3, size: 10)"))),
            only(size(&args("size(10)")))
        );
        assert_eq!(
            only(size(&args("size(extra: 3, size: DpSize(10, 20))"))),
            only(size(&args("size(10, 20)")))
        );
        assert_eq!(
            only(offset(&args("offset(extra: 7, offset: DpOffset(1, 2))"))),
            only(offset(&args("offset(1, 2)")))
        );
        assert_eq!(offset(&args("offset(extra: 7)")), None);
    }

    #[test]
    fn fill_fraction_defaults_and_bounds() {
        assert_eq!(
            only(fill_max(&args("fillMaxWidth()"), Axis::Width)),
            Modifier::FillMax {
                axis: Axis::Width,
                fraction: 1.0
            }
        );
        assert_eq!(
            only(fill_max(&args("fillMaxSize(fraction: 0.5)"), Axis::Both)),
            Modifier::FillMax {
                axis: Axis::Both,
                fraction: 0.5
            }
        );
        assert_eq!(fill_max(&args("fillMaxWidth(2)"), Axis::Width), None);
    }

    #[test]
    fn wrap_content_picks_the_axis_family() {
        assert_eq!(
            only(wrap_content(&args("wrapContentHeight(Alignment.Top, true)"), Axis::Height)),
            Modifier::WrapContent {
                axis: Axis::Height,
                alignment: AlignmentValue::Vertical(VerticalAlignment::Top),
                unbounded: true
            }
        );
        assert_eq!(
            only(wrap_content(&args("wrapContentSize()"), Axis::Both)),
            Modifier::WrapContent {
                axis: Axis::Both,
                alignment: AlignmentValue::Both(Alignment::Center),
                unbounded: false
            }
        );
    }

    #[test]
    fn offsets_default_to_zero() {
        assert_eq!(
            only(offset(&args("offset(y: 4)"))),
            Modifier::Offset {
                x: Length::ZERO,
                y: Length::dp(4.0)
            }
        );
        assert_eq!(
            only(offset(&args("offset(DpOffset(1, 2))"))),
            only(offset(&args("offset(1, 2)")))
        );
    }

    #[test]
    fn aspect_ratio_requires_positive_ratio() {
        assert!(aspect_ratio(&args("aspectRatio(1.5)")).is_some());
        assert_eq!(aspect_ratio(&args("aspectRatio(0)")), None);
        assert_eq!(aspect_ratio(&args("aspectRatio()")), None);
    }
}
