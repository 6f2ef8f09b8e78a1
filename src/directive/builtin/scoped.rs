//! Directives that only apply inside a particular layout scope

use super::layout::{arg_present, fraction};
use crate::coerce::alignment::{self, AlignmentValue};
use crate::coerce::animation::{AnimationSpec, animation_spec, stiffness};
use crate::coerce::transition::{EnterTransition, ExitTransition, enter_transition, exit_transition};
use crate::coerce::param;
use crate::directive::argument::ArgumentNode;
use crate::directive::context::ScopeKind;
use crate::directive::decoration::{Axis, Decoration, Modifier};
use crate::directive::registry::DirectiveSpec;

const BOX: &[ScopeKind] = &[ScopeKind::Box];
const LINEAR: &[ScopeKind] = &[ScopeKind::Column, ScopeKind::Row];
const ALIGNABLE: &[ScopeKind] = &[ScopeKind::Box, ScopeKind::Column, ScopeKind::Row];
const LAZY_ITEM: &[ScopeKind] = &[ScopeKind::LazyItem];

pub(crate) const SPECS: &[DirectiveSpec] = &[
    DirectiveSpec::scoped("align", ALIGNABLE, align),
    DirectiveSpec::scoped("weight", LINEAR, weight),
    DirectiveSpec::scoped("matchParentSize", BOX, |_, _| {
        Some(Modifier::MatchParentSize.into())
    }),
    DirectiveSpec::scoped("alignByBaseline", &[ScopeKind::Row], |_, _| {
        Some(Modifier::AlignByBaseline.into())
    }),
    DirectiveSpec::scoped("fillParentMaxWidth", LAZY_ITEM, |args, _| {
        fill_parent(args, Axis::Width)
    }),
    DirectiveSpec::scoped("fillParentMaxHeight", LAZY_ITEM, |args, _| {
        fill_parent(args, Axis::Height)
    }),
    DirectiveSpec::scoped("fillParentMaxSize", LAZY_ITEM, |args, _| {
        fill_parent(args, Axis::Both)
    }),
    DirectiveSpec::scoped("animateItem", LAZY_ITEM, animate_item),
    DirectiveSpec::scoped(
        "animateEnterExit",
        &[ScopeKind::AnimatedVisibility],
        animate_enter_exit,
    ),
];

/// Box takes a 9-way alignment, Column a horizontal one, Row a vertical one.
fn align(args: &[ArgumentNode], scope: ScopeKind) -> Option<Decoration> {
    let value = match scope {
        ScopeKind::Box => AlignmentValue::Both(param(args, "alignment", 0, alignment::alignment)?),
        ScopeKind::Column => {
            AlignmentValue::Horizontal(param(args, "alignment", 0, alignment::horizontal)?)
        }
        ScopeKind::Row => {
            AlignmentValue::Vertical(param(args, "alignment", 0, alignment::vertical)?)
        }
        ScopeKind::LazyItem | ScopeKind::AnimatedVisibility => return None,
    };
    Some(Modifier::Align(value).into())
}

fn weight(args: &[ArgumentNode], _scope: ScopeKind) -> Option<Decoration> {
    let weight = param(args, "weight", 0, |node| node.as_f32()).filter(|w| *w > 0.0)?;
    Some(
        Modifier::Weight {
            weight,
            fill: param(args, "fill", 1, ArgumentNode::as_bool).unwrap_or(true),
        }
        .into(),
    )
}

fn fill_parent(args: &[ArgumentNode], axis: Axis) -> Option<Decoration> {
    Some(
        Modifier::FillParentMax {
            axis,
            fraction: fraction(args)?,
        }
        .into(),
    )
}

/// Absent means the default spring; an explicit `nil` disables that animation.
fn item_spec(args: &[ArgumentNode], name: &str, index: usize) -> Option<AnimationSpec> {
    let default = || AnimationSpec::spring(1.0, stiffness::MEDIUM_LOW);
    match crate::directive::argument::arg_or_named(args, name, index) {
        None => Some(default()),
        Some(node) if node.is_nil() => None,
        Some(node) => Some(animation_spec(node).unwrap_or_else(default)),
    }
}

fn animate_item(args: &[ArgumentNode], _scope: ScopeKind) -> Option<Decoration> {
    Some(
        Modifier::AnimateItem {
            fade_in: item_spec(args, "fadeInSpec", 0),
            placement: item_spec(args, "placementSpec", 1),
            fade_out: item_spec(args, "fadeOutSpec", 2),
        }
        .into(),
    )
}

fn animate_enter_exit(args: &[ArgumentNode], _scope: ScopeKind) -> Option<Decoration> {
    let enter = match arg_present(args, "enter", 0) {
        Some(node) => enter_transition(node)?,
        None => EnterTransition::default_enter(),
    };
    let exit = match arg_present(args, "exit", 1) {
        Some(node) => exit_transition(node)?,
        None => ExitTransition::default_exit(),
    };
    Some(Modifier::AnimateEnterExit { enter, exit }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::alignment::{Alignment, HorizontalAlignment};
    use crate::directive::argument::adapt;
    use crate::syntax::parse_expression;

    fn args(src: &str) -> Vec<ArgumentNode> {
        adapt(parse_expression(src).unwrap().as_call().unwrap())
    }

    #[test]
    fn align_depends_on_scope() {
        assert_eq!(
            align(&args("align(Alignment.Center)"), ScopeKind::Box),
            Some(Decoration::of(Modifier::Align(AlignmentValue::Both(Alignment::Center))))
        );
        assert_eq!(
            align(&args("align(Alignment.End)"), ScopeKind::Column),
            Some(Decoration::of(Modifier::Align(AlignmentValue::Horizontal(
                HorizontalAlignment::End
            ))))
        );
        assert_eq!(align(&args("align(Alignment.End)"), ScopeKind::Row), None);
    }

    #[test]
    fn weight_must_be_positive() {
        assert_eq!(weight(&args("weight(0)"), ScopeKind::Row), None);
        assert_eq!(
            weight(&args("weight(weight: 1, fill: false)"), ScopeKind::Column),
            Some(Decoration::of(Modifier::Weight {
                weight: 1.0,
                fill: false
            }))
        );
    }

    #[test]
    fn animate_item_nil_disables_one_spec() {
        let decoration = animate_item(&args("animateItem(nil, tween(100))"), ScopeKind::LazyItem)
            .expect("decoration");
        let Modifier::AnimateItem {
            fade_in,
            placement,
            fade_out,
        } = &decoration.modifiers()[0]
        else {
            panic!("expected animateItem");
        };
        assert_eq!(*fade_in, None);
        assert!(matches!(placement, Some(AnimationSpec::Tween { .. })));
        assert_eq!(*fade_out, Some(AnimationSpec::spring(1.0, 400.0)));
    }

    #[test]
    fn enter_exit_defaults() {
        assert_eq!(
            animate_enter_exit(&args("animateEnterExit()"), ScopeKind::AnimatedVisibility),
            Some(Decoration::of(Modifier::AnimateEnterExit {
                enter: EnterTransition::default_enter(),
                exit: ExitTransition::default_exit()
            }))
        );
        assert_eq!(
            animate_enter_exit(&args("animateEnterExit(enter: fadeOut())"), ScopeKind::AnimatedVisibility),
            None
        );
    }
}
