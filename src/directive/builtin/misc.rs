//! Semantics, focus and miscellaneous directives

use crate::coerce::animation::{AnimationSpec, animation_spec};
use crate::coerce::param;
use crate::coerce::range::{ValueRange, value_range};
use crate::directive::argument::ArgumentNode;
use crate::directive::decoration::{Capability, Decoration, Modifier};
use crate::directive::registry::DirectiveSpec;

pub(crate) const SPECS: &[DirectiveSpec] = &[
    DirectiveSpec::parameterless("systemBarsPadding", || {
        Modifier::Capability(Capability::SystemBarsPadding).into()
    }),
    DirectiveSpec::parameterless("selectableGroup", || {
        Modifier::Capability(Capability::SelectableGroup).into()
    }),
    DirectiveSpec::parameterless("focusTarget", || {
        Modifier::Capability(Capability::FocusTarget).into()
    }),
    DirectiveSpec::pure("testTag", |args| {
        param(args, "tag", 0, |node| node.as_str().map(str::to_string))
            .map(|tag| Modifier::TestTag(tag).into())
    }),
    DirectiveSpec::pure("progressSemantics", progress_semantics),
    DirectiveSpec::pure("animateContentSize", |args| {
        let spec = param(args, "animationSpec", 0, animation_spec)
            .unwrap_or_else(AnimationSpec::default_spring);
        Some(Modifier::AnimateContentSize(spec).into())
    }),
];

/// Indeterminate with no arguments; otherwise `value` is required and must lie in the range.
fn progress_semantics(args: &[ArgumentNode]) -> Option<Decoration> {
    if args.is_empty() {
        return Some(
            Modifier::ProgressSemantics {
                value: None,
                range: ValueRange::default(),
                steps: 0,
            }
            .into(),
        );
    }
    let value = param(args, "value", 0, |node| node.as_f32())?;
    let range = param(args, "valueRange", 1, value_range).unwrap_or_default();
    let steps = param(args, "steps", 2, crate::coerce::non_negative).unwrap_or(0);
    (range.start..=range.end).contains(&value).then(|| {
        Modifier::ProgressSemantics {
            value: Some(value),
            range,
            steps,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::argument::adapt;
    use crate::syntax::parse_expression;

    fn args(src: &str) -> Vec<ArgumentNode> {
        adapt(parse_expression(src).unwrap().as_call().unwrap())
    }

    #[test]
    fn progress_semantics_shapes() {
        assert_eq!(
            progress_semantics(&[]),
            Some(Decoration::of(Modifier::ProgressSemantics {
                value: None,
                range: ValueRange::default(),
                steps: 0
            }))
        );
        assert_eq!(
            progress_semantics(&args("progressSemantics(50, 0..100, 10)")),
            progress_semantics(&args("progressSemantics(value: 50, valueRange: 0..100, steps: 10)"))
        );
        assert_eq!(progress_semantics(&args("progressSemantics(5)")), None);
    }
}
