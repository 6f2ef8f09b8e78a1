//! Enter and exit transitions

use serde::Serialize;

use super::alignment::{
    Alignment, AlignmentValue, HorizontalAlignment, VerticalAlignment, alignment, horizontal,
    vertical,
};
use super::animation::{AnimationSpec, animation_spec, stiffness};
use super::param;
use crate::directive::argument::ArgumentNode;

/// Axis a slide or size change runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAxis {
    /// Both axes.
    Both,
    /// Horizontal only.
    Horizontal,
    /// Vertical only.
    Vertical,
}

/// Opacity component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fade {
    /// Alpha at the invisible end of the transition.
    pub alpha: f32,
    /// Timing.
    pub animation: AnimationSpec,
}

/// Slide component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    /// Direction of travel.
    pub axis: TransitionAxis,
    /// Timing.
    pub animation: AnimationSpec,
}

/// Expand/shrink component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSize {
    /// Axis being resized.
    pub axis: TransitionAxis,
    /// Edge or corner the content grows from or shrinks towards.
    pub anchor: AlignmentValue,
    /// Clip content to the animated bounds.
    pub clip: bool,
    /// Timing.
    pub animation: AnimationSpec,
}

/// Scale component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleChange {
    /// Scale at the invisible end of the transition.
    pub scale: f32,
    /// Timing.
    pub animation: AnimationSpec,
}

/// Components of one transition. Each is optional; `None` everywhere is the
/// empty transition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TransitionParts {
    /// Opacity.
    pub fade: Option<Fade>,
    /// Position.
    pub slide: Option<Slide>,
    /// Size.
    pub change_size: Option<ChangeSize>,
    /// Scale.
    pub scale: Option<ScaleChange>,
}

impl TransitionParts {
    /// Combine, keeping the left operand's component wherever both define one.
    pub fn plus(self, other: TransitionParts) -> TransitionParts {
        TransitionParts {
            fade: self.fade.or(other.fade),
            slide: self.slide.or(other.slide),
            change_size: self.change_size.or(other.change_size),
            scale: self.scale.or(other.scale),
        }
    }
}

/// How content appears.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct EnterTransition(pub TransitionParts);

/// How content disappears.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ExitTransition(pub TransitionParts);

impl EnterTransition {
    /// `EnterTransition.None`.
    pub fn none() -> Self {
        Self::default()
    }

    /// `fadeIn() + expandIn()`.
    pub fn default_enter() -> Self {
        let fade = Fade {
            alpha: 0.0,
            animation: default_spec(),
        };
        let change_size = ChangeSize {
            axis: TransitionAxis::Both,
            anchor: AlignmentValue::Both(Alignment::BottomEnd),
            clip: true,
            animation: default_spec(),
        };
        EnterTransition(TransitionParts {
            fade: Some(fade),
            change_size: Some(change_size),
            ..TransitionParts::default()
        })
    }

    /// `self + other`.
    pub fn plus(self, other: EnterTransition) -> Self {
        EnterTransition(self.0.plus(other.0))
    }
}

impl ExitTransition {
    /// `ExitTransition.None`.
    pub fn none() -> Self {
        Self::default()
    }

    /// `fadeOut() + shrinkOut()`.
    pub fn default_exit() -> Self {
        let fade = Fade {
            alpha: 0.0,
            animation: default_spec(),
        };
        let change_size = ChangeSize {
            axis: TransitionAxis::Both,
            anchor: AlignmentValue::Both(Alignment::BottomEnd),
            clip: true,
            animation: default_spec(),
        };
        ExitTransition(TransitionParts {
            fade: Some(fade),
            change_size: Some(change_size),
            ..TransitionParts::default()
        })
    }

    /// `self + other`.
    pub fn plus(self, other: ExitTransition) -> Self {
        ExitTransition(self.0.plus(other.0))
    }
}

fn default_spec() -> AnimationSpec {
    AnimationSpec::spring(1.0, stiffness::MEDIUM_LOW)
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Enter,
    Exit,
}

impl Direction {
    fn none_receiver(self) -> &'static str {
        match self {
            Direction::Enter => "EnterTransition",
            Direction::Exit => "ExitTransition",
        }
    }
}

fn animation(args: &[ArgumentNode]) -> AnimationSpec {
    param(args, "animationSpec", 0, animation_spec).unwrap_or_else(default_spec)
}

fn fade(args: &[ArgumentNode], alpha_name: &str) -> TransitionParts {
    TransitionParts {
        fade: Some(Fade {
            alpha: param(args, alpha_name, 1, |node| node.as_f32()).unwrap_or(0.0),
            animation: animation(args),
        }),
        ..TransitionParts::default()
    }
}

fn slide(args: &[ArgumentNode], axis: TransitionAxis) -> TransitionParts {
    TransitionParts {
        slide: Some(Slide {
            axis,
            animation: animation(args),
        }),
        ..TransitionParts::default()
    }
}

fn change_size(args: &[ArgumentNode], axis: TransitionAxis, anchor_name: &str) -> TransitionParts {
    let anchor = match axis {
        TransitionAxis::Both => AlignmentValue::Both(
            param(args, anchor_name, 1, alignment).unwrap_or(Alignment::BottomEnd),
        ),
        TransitionAxis::Horizontal => AlignmentValue::Horizontal(
            param(args, anchor_name, 1, horizontal).unwrap_or(HorizontalAlignment::End),
        ),
        TransitionAxis::Vertical => AlignmentValue::Vertical(
            param(args, anchor_name, 1, vertical).unwrap_or(VerticalAlignment::Bottom),
        ),
    };
    TransitionParts {
        change_size: Some(ChangeSize {
            axis,
            anchor,
            clip: param(args, "clip", 2, ArgumentNode::as_bool).unwrap_or(true),
            animation: animation(args),
        }),
        ..TransitionParts::default()
    }
}

fn scale(args: &[ArgumentNode], scale_name: &str) -> TransitionParts {
    TransitionParts {
        scale: Some(ScaleChange {
            scale: param(args, scale_name, 1, |node| node.as_f32()).unwrap_or(0.0),
            animation: animation(args),
        }),
        ..TransitionParts::default()
    }
}

fn parts(node: &ArgumentNode, direction: Direction) -> Option<TransitionParts> {
    if let Some(items) = node.as_list() {
        let (first, rest) = items.split_first()?;
        return rest.iter().try_fold(parts(first, direction)?, |acc, item| {
            Some(acc.plus(parts(item, direction)?))
        });
    }
    if let Some(path) = node.path() {
        return match path.as_slice() {
            [receiver, "None"] if *receiver == direction.none_receiver() => {
                Some(TransitionParts::default())
            }
            _ => None,
        };
    }

    let call = node.as_call()?;
    let args = call.args.as_slice();
    if call.name == "+" {
        return match args {
            [lhs, rhs] => Some(parts(lhs, direction)?.plus(parts(rhs, direction)?)),
            _ => None,
        };
    }

    use TransitionAxis::*;
    let built = match (direction, call.member()) {
        (Direction::Enter, "fadeIn") => fade(args, "initialAlpha"),
        (Direction::Exit, "fadeOut") => fade(args, "targetAlpha"),
        (Direction::Enter, "slideIn") | (Direction::Exit, "slideOut") => slide(args, Both),
        (Direction::Enter, "slideInHorizontally") | (Direction::Exit, "slideOutHorizontally") => {
            slide(args, Horizontal)
        }
        (Direction::Enter, "slideInVertically") | (Direction::Exit, "slideOutVertically") => {
            slide(args, Vertical)
        }
        (Direction::Enter, "expandIn") => change_size(args, Both, "expandFrom"),
        (Direction::Enter, "expandHorizontally") => change_size(args, Horizontal, "expandFrom"),
        (Direction::Enter, "expandVertically") => change_size(args, Vertical, "expandFrom"),
        (Direction::Exit, "shrinkOut") => change_size(args, Both, "shrinkTowards"),
        (Direction::Exit, "shrinkHorizontally") => change_size(args, Horizontal, "shrinkTowards"),
        (Direction::Exit, "shrinkVertically") => change_size(args, Vertical, "shrinkTowards"),
        (Direction::Enter, "scaleIn") => scale(args, "initialScale"),
        (Direction::Exit, "scaleOut") => scale(args, "targetScale"),
        _ => return None,
    };
    Some(built)
}

/// Coerce an enter transition: a builder call, `a + b`, a list of parts, or
/// `EnterTransition.None`.
pub fn enter_transition(node: &ArgumentNode) -> Option<EnterTransition> {
    parts(node, Direction::Enter).map(EnterTransition)
}

/// Coerce an exit transition; see [`enter_transition`].
pub fn exit_transition(node: &ArgumentNode) -> Option<ExitTransition> {
    parts(node, Direction::Exit).map(ExitTransition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_expression;

    fn node(src: &str) -> ArgumentNode {
        ArgumentNode::positional(parse_expression(src).unwrap(), 0)
    }

    #[test]
    fn defaults_match_builder_calls() {
        assert_eq!(
            enter_transition(&node("{:+, [], [fadeIn(), expandIn()]}")),
            Some(EnterTransition::default_enter())
        );
        assert_eq!(
            exit_transition(&node("[fadeOut(), shrinkOut()]")),
            Some(ExitTransition::default_exit())
        );
    }

    #[test]
    fn composition_is_associative_and_left_biased() {
        let left = enter_transition(&node(
            "{:+, [], [{:+, [], [fadeIn(initialAlpha: 0.3), fadeIn()]}, slideInVertically()]}",
        ));
        let right = enter_transition(&node(
            "{:+, [], [fadeIn(initialAlpha: 0.3), {:+, [], [fadeIn(), slideInVertically()]}]}",
        ));
        assert_eq!(left, right);
        let parts = left.unwrap().0;
        assert_eq!(parts.fade.map(|f| f.alpha), Some(0.3));
        assert_eq!(parts.slide.map(|s| s.axis), Some(TransitionAxis::Vertical));
    }

    #[test]
    fn directions_are_not_interchangeable() {
        assert_eq!(enter_transition(&node("fadeOut()")), None);
        assert_eq!(exit_transition(&node("ExitTransition.None")), Some(ExitTransition::none()));
        assert_eq!(enter_transition(&node("ExitTransition.None")), None);
        assert_eq!(enter_transition(&node("[fadeIn(), 3]")), None);
    }

    #[test]
    fn builder_parameters() {
        let parts = exit_transition(&node(
            "shrinkVertically(tween(200), Alignment.Top, false)",
        ))
        .unwrap()
        .0;
        let change = parts.change_size.unwrap();
        assert_eq!(change.anchor, AlignmentValue::Vertical(VerticalAlignment::Top));
        assert!(!change.clip);
        assert!(matches!(
            change.animation,
            AnimationSpec::Tween {
                duration_millis: 200,
                ..
            }
        ));
    }
}
