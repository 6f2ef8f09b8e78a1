//! Animation specs and easing curves
//!
//! Covers `tween`, `spring`, `keyframes`, `snap` and the repeatable wrappers.

use serde::Serialize;

use super::{call_named, non_negative, param, scalar};
use crate::directive::argument::{ArgumentNode, all_named};
use crate::directive::overload::{Arm, Shape, select};

/// Duration used by `tween` and `keyframes` when none is given.
pub const DEFAULT_DURATION_MILLIS: u32 = 300;

/// Spring damping ratio constants (`Spring.DampingRatio*`).
pub mod damping {
    /// Very bouncy.
    pub const HIGH_BOUNCY: f32 = 0.2;
    /// Medium bounce.
    pub const MEDIUM_BOUNCY: f32 = 0.5;
    /// Slight bounce.
    pub const LOW_BOUNCY: f32 = 0.75;
    /// Critically damped.
    pub const NO_BOUNCY: f32 = 1.0;
}

/// Spring stiffness constants (`Spring.Stiffness*`).
#[allow(missing_docs)]
pub mod stiffness {
    pub const HIGH: f32 = 10_000.0;
    pub const MEDIUM: f32 = 1_500.0;
    pub const MEDIUM_LOW: f32 = 400.0;
    pub const LOW: f32 = 200.0;
    pub const VERY_LOW: f32 = 50.0;
}

/// Timing curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Easing {
    Linear,
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic bezier through `(a, b)` and `(c, d)`.
    CubicBezier {
        a: f32,
        b: f32,
        c: f32,
        d: f32,
    },
}

/// How a repeated animation restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Jump back to the start.
    #[default]
    Restart,
    /// Play backwards.
    Reverse,
}

/// One `at(value, timeMillis)` frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    /// Target value at this frame.
    pub value: f32,
    /// Offset from the start of the animation.
    pub time_millis: u32,
    /// Curve used from this frame to the next.
    pub easing: Option<Easing>,
}

/// Animation timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AnimationSpec {
    /// Fixed-duration interpolation.
    Tween {
        duration_millis: u32,
        delay_millis: u32,
        easing: Easing,
    },
    /// Physics spring.
    Spring {
        damping_ratio: f32,
        stiffness: f32,
        visibility_threshold: Option<f32>,
    },
    /// Explicit frames.
    Keyframes {
        duration_millis: u32,
        delay_millis: u32,
        frames: Vec<Keyframe>,
    },
    /// Explicit frames, each with its own curve.
    KeyframesWithCurve {
        duration_millis: u32,
        delay_millis: u32,
        frames: Vec<Keyframe>,
    },
    /// Duration-based animation repeated a fixed number of times.
    Repeatable {
        iterations: u32,
        animation: Box<AnimationSpec>,
        repeat_mode: RepeatMode,
    },
    /// Duration-based animation repeated forever.
    InfiniteRepeatable {
        animation: Box<AnimationSpec>,
        repeat_mode: RepeatMode,
    },
    /// Immediate jump after a delay.
    Snap {
        delay_millis: u32,
    },
}

impl AnimationSpec {
    /// Spring with the given damping ratio and stiffness.
    pub fn spring(damping_ratio: f32, stiffness: f32) -> Self {
        AnimationSpec::Spring {
            damping_ratio,
            stiffness,
            visibility_threshold: None,
        }
    }

    /// `spring()` with no arguments.
    pub fn default_spring() -> Self {
        Self::spring(damping::NO_BOUNCY, stiffness::MEDIUM)
    }

    fn is_duration_based(&self) -> bool {
        matches!(
            self,
            AnimationSpec::Tween { .. }
                | AnimationSpec::Keyframes { .. }
                | AnimationSpec::KeyframesWithCurve { .. }
                | AnimationSpec::Snap { .. }
        )
    }
}

/// Easing reference (`FastOutSlowInEasing`, `Easing.EaseIn`, `LinearEasing`) or
/// `CubicBezierEasing(a, b, c, d)`.
pub fn easing(node: &ArgumentNode) -> Option<Easing> {
    if let Some(member) = node.member() {
        let name = member.strip_suffix("Easing").unwrap_or(member);
        return match name {
            "Linear" => Some(Easing::Linear),
            "FastOutSlowIn" => Some(Easing::FastOutSlowIn),
            "LinearOutSlowIn" => Some(Easing::LinearOutSlowIn),
            "FastOutLinearIn" => Some(Easing::FastOutLinearIn),
            "Ease" => Some(Easing::Ease),
            "EaseIn" => Some(Easing::EaseIn),
            "EaseOut" => Some(Easing::EaseOut),
            "EaseInOut" => Some(Easing::EaseInOut),
            _ => None,
        };
    }
    let call = call_named(node, &["CubicBezierEasing"])?;
    Some(Easing::CubicBezier {
        a: call.arg("a", 0)?.as_f32()?,
        b: call.arg("b", 1)?.as_f32()?,
        c: call.arg("c", 2)?.as_f32()?,
        d: call.arg("d", 3)?.as_f32()?,
    })
}

/// Damping ratio: a number or a `Spring.DampingRatio*` constant.
pub fn damping_ratio(node: &ArgumentNode) -> Option<f32> {
    if let Some(value) = node.as_f32() {
        return Some(value);
    }
    match node.member()? {
        "DampingRatioHighBouncy" => Some(damping::HIGH_BOUNCY),
        "DampingRatioMediumBouncy" => Some(damping::MEDIUM_BOUNCY),
        "DampingRatioLowBouncy" => Some(damping::LOW_BOUNCY),
        "DampingRatioNoBouncy" => Some(damping::NO_BOUNCY),
        _ => None,
    }
}

/// Stiffness: a number or a `Spring.Stiffness*` constant.
pub fn spring_stiffness(node: &ArgumentNode) -> Option<f32> {
    if let Some(value) = node.as_f32() {
        return Some(value);
    }
    match node.member()? {
        "StiffnessHigh" => Some(stiffness::HIGH),
        "StiffnessMedium" => Some(stiffness::MEDIUM),
        "StiffnessMediumLow" => Some(stiffness::MEDIUM_LOW),
        "StiffnessLow" => Some(stiffness::LOW),
        "StiffnessVeryLow" => Some(stiffness::VERY_LOW),
        _ => None,
    }
}

/// `RepeatMode.Restart` or `RepeatMode.Reverse`.
pub fn repeat_mode(node: &ArgumentNode) -> Option<RepeatMode> {
    match node.member()? {
        "Restart" => Some(RepeatMode::Restart),
        "Reverse" => Some(RepeatMode::Reverse),
        _ => None,
    }
}

fn tween(args: &[ArgumentNode]) -> Option<AnimationSpec> {
    Some(AnimationSpec::Tween {
        duration_millis: param(args, "durationMillis", 0, non_negative)
            .unwrap_or(DEFAULT_DURATION_MILLIS),
        delay_millis: param(args, "delayMillis", 1, non_negative).unwrap_or(0),
        easing: param(args, "easing", 2, easing).unwrap_or(Easing::FastOutSlowIn),
    })
}

fn spring(args: &[ArgumentNode]) -> Option<AnimationSpec> {
    Some(AnimationSpec::Spring {
        damping_ratio: param(args, "dampingRatio", 0, damping_ratio)
            .unwrap_or(damping::NO_BOUNCY),
        stiffness: param(args, "stiffness", 1, spring_stiffness).unwrap_or(stiffness::MEDIUM),
        visibility_threshold: param(args, "visibilityThreshold", 2, scalar),
    })
}

fn keyframe(node: &ArgumentNode) -> Option<Keyframe> {
    let call = call_named(node, &["at"])?;
    Some(Keyframe {
        value: scalar(call.arg("value", 0)?)?,
        time_millis: non_negative(call.arg("timeMillis", 1)?)?,
        easing: match call.arg("easing", 2) {
            Some(node) => Some(easing(node)?),
            None => None,
        },
    })
}

fn frames(node: &ArgumentNode) -> Option<Vec<Keyframe>> {
    node.as_list()?.iter().map(keyframe).collect()
}

/// `(duration, delay, frames)` from any of the keyframes call shapes.
fn keyframe_parts(args: &[ArgumentNode]) -> Option<(u32, u32, Vec<Keyframe>)> {
    if all_named(args) {
        return Some((
            param(args, "durationMillis", 0, non_negative).unwrap_or(DEFAULT_DURATION_MILLIS),
            param(args, "delayMillis", 1, non_negative).unwrap_or(0),
            param(args, "frames", 2, frames)?,
        ));
    }
    match args {
        [list] => Some((DEFAULT_DURATION_MILLIS, 0, frames(list)?)),
        [duration, list] => Some((non_negative(duration)?, 0, frames(list)?)),
        [duration, delay, list] => Some((non_negative(duration)?, non_negative(delay)?, frames(list)?)),
        _ => None,
    }
}

fn keyframes(args: &[ArgumentNode]) -> Option<AnimationSpec> {
    let (duration_millis, delay_millis, frames) = keyframe_parts(args)?;
    Some(AnimationSpec::Keyframes {
        duration_millis,
        delay_millis,
        frames,
    })
}

fn keyframes_with_curve(args: &[ArgumentNode]) -> Option<AnimationSpec> {
    let (duration_millis, delay_millis, frames) = keyframe_parts(args)?;
    if frames.iter().any(|frame| frame.easing.is_none()) {
        return None;
    }
    Some(AnimationSpec::KeyframesWithCurve {
        duration_millis,
        delay_millis,
        frames,
    })
}

fn repeated(node: &ArgumentNode) -> Option<Box<AnimationSpec>> {
    animation_spec(node)
        .filter(AnimationSpec::is_duration_based)
        .map(Box::new)
}

const REPEATABLE_ARMS: &[Arm<AnimationSpec>] = &[
    Arm {
        shape: Shape::Named(&["iterations", "animation", "repeatMode"]),
        build: |args| {
            Some(AnimationSpec::Repeatable {
                iterations: param(args, "iterations", 0, non_negative)?,
                animation: param(args, "animation", 1, repeated)?,
                repeat_mode: param(args, "repeatMode", 2, repeat_mode).unwrap_or_default(),
            })
        },
    },
    Arm {
        shape: Shape::AtLeast(2),
        build: |args| {
            Some(AnimationSpec::Repeatable {
                iterations: non_negative(&args[0])?,
                animation: repeated(&args[1])?,
                repeat_mode: args.get(2).and_then(repeat_mode).unwrap_or_default(),
            })
        },
    },
];

fn infinite_repeatable(args: &[ArgumentNode]) -> Option<AnimationSpec> {
    Some(AnimationSpec::InfiniteRepeatable {
        animation: param(args, "animation", 0, repeated)?,
        repeat_mode: param(args, "repeatMode", 1, repeat_mode).unwrap_or_default(),
    })
}

/// Coerce an animation spec from one of the builder calls: `tween`, `spring`,
/// `keyframes`, `keyframesWithCurve`, `repeatable`, `infiniteRepeatable`, `snap`.
///
/// Repeated animations must be duration based.
pub fn animation_spec(node: &ArgumentNode) -> Option<AnimationSpec> {
    let call = node.as_call()?;
    let args = call.args.as_slice();
    match call.member() {
        "tween" => tween(args),
        "spring" => spring(args),
        "keyframes" => keyframes(args),
        "keyframesWithCurve" => keyframes_with_curve(args),
        "repeatable" => select(args, REPEATABLE_ARMS),
        "infiniteRepeatable" => infinite_repeatable(args),
        "snap" => Some(AnimationSpec::Snap {
            delay_millis: param(args, "delayMillis", 0, non_negative).unwrap_or(0),
        }),
        _ => None,
    }
}
