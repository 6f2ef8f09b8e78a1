//! Drawing directives: backgrounds, borders, clips, shadows and transforms

use crate::coerce::brush::{brush, paint};
use crate::coerce::color::color;
use crate::coerce::shape::shape;
use crate::coerce::units::length;
use crate::coerce::{Color, Paint, Shape, call_named, param};
use crate::directive::argument::{ArgumentNode, all_named};
use crate::directive::decoration::{Capability, Decoration, Modifier};
use crate::directive::overload::{Arm, Shape as ArgShape, select};
use crate::directive::registry::DirectiveSpec;

pub(crate) const SPECS: &[DirectiveSpec] = &[
    DirectiveSpec::parameterless("clipToBounds", || {
        Modifier::Capability(Capability::ClipToBounds).into()
    }),
    DirectiveSpec::pure("background", background),
    DirectiveSpec::pure("border", border),
    DirectiveSpec::pure("clip", |args| {
        param(args, "shape", 0, shape).map(|shape| Modifier::Clip(shape).into())
    }),
    DirectiveSpec::pure("alpha", |args| {
        param(args, "alpha", 0, |node| node.as_f32())
            .map(|alpha| Modifier::Alpha(alpha.clamp(0.0, 1.0)).into())
    }),
    DirectiveSpec::pure("rotate", |args| {
        param(args, "degrees", 0, |node| node.as_f32()).map(|degrees| Modifier::Rotate(degrees).into())
    }),
    DirectiveSpec::pure("scale", scale),
    DirectiveSpec::pure("zIndex", |args| {
        param(args, "zIndex", 0, |node| node.as_f32()).map(|z| Modifier::ZIndex(z).into())
    }),
    DirectiveSpec::pure("shadow", shadow),
];

/// `color:` takes a color, `brush:` a brush; positionally either is accepted.
fn named_paint(args: &[ArgumentNode]) -> Option<Paint> {
    let find = |name: &str| args.iter().find(|arg| arg.name() == Some(name));
    if let Some(node) = find("color") {
        return color(node).map(Paint::Color);
    }
    let node = find("brush")?;
    brush(node)
        .map(Paint::Brush)
        .or_else(|| color(node).map(Paint::Color))
}

fn paint_arg(args: &[ArgumentNode], index: usize) -> Option<Paint> {
    if all_named(args) {
        named_paint(args)
    } else {
        args.get(index).and_then(paint)
    }
}

fn shape_or_rectangle(args: &[ArgumentNode], index: usize) -> Shape {
    param(args, "shape", index, shape).unwrap_or(Shape::Rectangle)
}

fn background(args: &[ArgumentNode]) -> Option<Decoration> {
    let paint = paint_arg(args, 0)?;
    let alpha = param(args, "alpha", 2, |node| node.as_f32()).unwrap_or(1.0);
    Some(
        Modifier::Background {
            paint,
            shape: shape_or_rectangle(args, 1),
            alpha: alpha.clamp(0.0, 1.0),
        }
        .into(),
    )
}

/// `BorderStroke(width, color | brush)`.
fn border_stroke(node: &ArgumentNode) -> Option<(crate::coerce::Length, Paint)> {
    let call = call_named(node, &["BorderStroke"])?;
    Some((
        length(call.arg("width", 0)?)?,
        paint_arg(&call.args, 1)?,
    ))
}

const BORDER_ARMS: &[Arm<Modifier>] = &[
    Arm {
        shape: ArgShape::Named(&["border"]),
        build: |args| {
            let (width, paint) = param(args, "border", 0, border_stroke)?;
            Some(Modifier::Border {
                width,
                paint,
                shape: shape_or_rectangle(args, 1),
            })
        },
    },
    Arm {
        shape: ArgShape::Named(&["width", "color", "brush", "shape"]),
        build: |args| {
            Some(Modifier::Border {
                width: param(args, "width", 0, length)?,
                paint: named_paint(args)?,
                shape: shape_or_rectangle(args, 2),
            })
        },
    },
    Arm {
        shape: ArgShape::Where(|args| {
            args.first().and_then(|node| node.as_call()).is_some_and(|call| call.member() == "BorderStroke")
        }),
        build: |args| {
            let (width, paint) = border_stroke(&args[0])?;
            Some(Modifier::Border {
                width,
                paint,
                shape: args.get(1).and_then(shape).unwrap_or(Shape::Rectangle),
            })
        },
    },
    Arm {
        shape: ArgShape::AtLeast(2),
        build: |args| {
            Some(Modifier::Border {
                width: length(&args[0])?,
                paint: paint(&args[1])?,
                shape: args.get(2).and_then(shape).unwrap_or(Shape::Rectangle),
            })
        },
    },
];

fn border(args: &[ArgumentNode]) -> Option<Decoration> {
    select(args, BORDER_ARMS).map(Decoration::of)
}

const SCALE_ARMS: &[Arm<(f32, f32)>] = &[
    Arm {
        shape: ArgShape::Named(&["scale"]),
        build: |args| param(args, "scale", 0, |node| node.as_f32()).map(|s| (s, s)),
    },
    Arm {
        shape: ArgShape::Named(&["scaleX", "scaleY"]),
        build: |args| {
            Some((
                param(args, "scaleX", 0, |node| node.as_f32()).unwrap_or(1.0),
                param(args, "scaleY", 1, |node| node.as_f32()).unwrap_or(1.0),
            ))
        },
    },
    Arm {
        shape: ArgShape::Arity(1),
        build: |args| args[0].as_f32().map(|s| (s, s)),
    },
    Arm {
        shape: ArgShape::Arity(2),
        build: |args| Some((args[0].as_f32()?, args[1].as_f32()?)),
    },
];

fn scale(args: &[ArgumentNode]) -> Option<Decoration> {
    let (x, y) = select(args, SCALE_ARMS)?;
    Some(Modifier::Scale { x, y }.into())
}

fn shadow(args: &[ArgumentNode]) -> Option<Decoration> {
    let elevation = param(args, "elevation", 0, length)?;
    Some(
        Modifier::Shadow {
            elevation,
            shape: shape_or_rectangle(args, 1),
            clip: param(args, "clip", 2, ArgumentNode::as_bool).unwrap_or(elevation.value > 0.0),
            ambient_color: param(args, "ambientColor", 3, color).unwrap_or(Color::BLACK),
            spot_color: param(args, "spotColor", 4, color).unwrap_or(Color::BLACK),
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::{Brush, CornerRadii, CornerSize, Length};
    use crate::directive::argument::adapt;
    use crate::syntax::parse_expression;

    fn args(src: &str) -> Vec<ArgumentNode> {
        adapt(parse_expression(src).unwrap().as_call().unwrap())
    }

    #[test]
    fn background_named_and_positional_agree() {
        let named = background(&args(
            "background(brush: Brush.sweepGradient(colors: [Color.Red, Color.Green, Color.Blue], center: Offset(5, 5)), shape: CircleShape)",
        ));
        let positional = background(&args(
            "background(Brush.sweepGradient([Color.Red, Color.Green, Color.Blue], Offset(5, 5)), CircleShape)",
        ));
        assert_eq!(named, positional);
        let Some(decoration) = named else {
            panic!("expected decoration");
        };
        let Modifier::Background { paint, shape, alpha } = &decoration.modifiers()[0] else {
            panic!("expected background");
        };
        assert_eq!(*shape, Shape::Circle);
        assert_eq!(*alpha, 1.0);
        assert!(matches!(
            paint,
            Paint::Brush(Brush::SweepGradient {
                center: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn background_color_forms() {
        assert_eq!(
            background(&args("background(color: Color.Red)")),
            background(&args("background(Color.Red)"))
        );
        assert_eq!(background(&args("background(shape: CircleShape)")), None);
        assert_eq!(background(&args("background(42)")), None);
    }

    #[test]
    fn border_forms_agree() {
        let expected = Some(Decoration::of(Modifier::Border {
            width: Length::dp(2.0),
            paint: Paint::Color(Color::Argb(0xFFFF_0000)),
            shape: Shape::Rounded(CornerRadii::all(CornerSize::Fixed(Length::dp(4.0)))),
        }));
        assert_eq!(border(&args("border(2, Color.Red, RoundedCornerShape(4))")), expected);
        assert_eq!(
            border(&args("border(width: 2, color: Color.Red, shape: RoundedCornerShape(4))")),
            expected
        );
        assert_eq!(
            border(&args("border(BorderStroke(2, Color.Red), RoundedCornerShape(4))")),
            expected
        );
        assert_eq!(
            border(&args("border(border: BorderStroke(2, Color.Red), shape: RoundedCornerShape(4))")),
            expected
        );
        assert_eq!(border(&args("border(2)")), None);
    }

    #[test]
    fn shadow_clip_follows_elevation() {
        let Some(decoration) = shadow(&args("shadow(0)")) else {
            panic!("expected decoration");
        };
        assert!(matches!(
            decoration.modifiers()[0],
            Modifier::Shadow { clip: false, .. }
        ));
        let Some(decoration) = shadow(&args("shadow(8, CircleShape)")) else {
            panic!("expected decoration");
        };
        assert!(matches!(
            decoration.modifiers()[0],
            Modifier::Shadow {
                clip: true,
                shape: Shape::Circle,
                ..
            }
        ));
    }

    #[test]
    fn scale_overloads() {
        assert_eq!(scale(&args("scale(2)")), scale(&args("scale(scale: 2)")));
        assert_eq!(
            scale(&args("scale(scaleY: 3)")),
            Some(Decoration::of(Modifier::Scale { x: 1.0, y: 3.0 }))
        );
    }
}
