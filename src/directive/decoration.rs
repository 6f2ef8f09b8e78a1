//! Decorations produced by directive resolution.
//!
//! A [`Decoration`] is an ordered chain of [`Modifier`]s, the host-neutral
//! description of what the toolkit should apply to a node. Composition is
//! concatenation, so order is preserved exactly as written in the style.

use serde::Serialize;

use super::argument::ArgumentNode;
use super::context::{DispatchHandle, ScopeKind};
use crate::coerce::transition::{EnterTransition, ExitTransition};
use crate::coerce::{
    AlignmentValue, AnimationSpec, Color, EdgeInsets, EventDescriptor, Length, Paint, Shape,
    ToggleableState, ValueRange,
};
use crate::syntax::Value;

/// Boolean capability switched on by a parameterless directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Clip drawing to the node bounds.
    ClipToBounds,
    /// Inset by the system bars.
    SystemBarsPadding,
    /// Group selectable children for accessibility.
    SelectableGroup,
    /// Make the node a focus target.
    FocusTarget,
}

/// Axis selector for fill and wrap modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Horizontal.
    Width,
    /// Vertical.
    Height,
    /// Both.
    Both,
}

/// User interaction wired to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionBinding {
    /// Kind of interaction (`click`, `toggle`, ...).
    pub event_type: String,
    /// Event reported to the server.
    pub event: EventDescriptor,
    #[serde(skip)]
    dispatch: DispatchHandle,
}

impl ActionBinding {
    /// Bind `event` to `dispatch`.
    pub fn new(event_type: &str, event: EventDescriptor, dispatch: &DispatchHandle) -> Self {
        Self {
            event_type: event_type.to_string(),
            event,
            dispatch: dispatch.clone(),
        }
    }

    /// Report the interaction with its current `value`.
    pub fn fire(&self, value: &Value) {
        self.dispatch.dispatch(
            &self.event_type,
            &self.event.name,
            value,
            &self.event.params_value(),
        );
    }

    fn rebind(&mut self, dispatch: &DispatchHandle) {
        self.dispatch = dispatch.clone();
    }
}

/// Context a placeholder is waiting for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "needs", rename_all = "snake_case")]
pub enum MissingContext {
    /// A scope of one of the supported kinds.
    Scope {
        /// Kinds the directive works in.
        supported: Vec<ScopeKind>,
        /// Kind that was supplied, if any.
        provided: Option<ScopeKind>,
    },
    /// A dispatch capability.
    Dispatch,
}

/// Directive that could not be evaluated yet, kept with its adapted arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    /// Directive name.
    pub directive: String,
    /// Arguments as adapted, live values still unresolved.
    pub args: Vec<ArgumentNode>,
    /// What was missing.
    pub missing: MissingContext,
}

/// One primitive decoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "modifier", content = "args", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Modifier {
    Capability(Capability),

    Padding(EdgeInsets),
    Size {
        width: Length,
        height: Length,
    },
    Width(Length),
    Height(Length),
    RequiredSize {
        width: Length,
        height: Length,
    },
    SizeIn {
        min_width: Option<Length>,
        min_height: Option<Length>,
        max_width: Option<Length>,
        max_height: Option<Length>,
    },
    FillMax {
        axis: Axis,
        fraction: f32,
    },
    WrapContent {
        axis: Axis,
        alignment: AlignmentValue,
        unbounded: bool,
    },
    Offset {
        x: Length,
        y: Length,
    },
    AspectRatio {
        ratio: f32,
        match_height_constraints_first: bool,
    },

    Background {
        paint: Paint,
        shape: Shape,
        alpha: f32,
    },
    Border {
        width: Length,
        paint: Paint,
        shape: Shape,
    },
    Clip(Shape),
    Alpha(f32),
    Rotate(f32),
    Scale {
        x: f32,
        y: f32,
    },
    ZIndex(f32),
    Shadow {
        elevation: Length,
        shape: Shape,
        clip: bool,
        ambient_color: Color,
        spot_color: Color,
    },

    TestTag(String),
    ProgressSemantics {
        value: Option<f32>,
        range: ValueRange,
        steps: u32,
    },
    AnimateContentSize(AnimationSpec),

    Align(AlignmentValue),
    Weight {
        weight: f32,
        fill: bool,
    },
    MatchParentSize,
    AlignByBaseline,
    FillParentMax {
        axis: Axis,
        fraction: f32,
    },
    AnimateItem {
        fade_in: Option<AnimationSpec>,
        placement: Option<AnimationSpec>,
        fade_out: Option<AnimationSpec>,
    },
    AnimateEnterExit {
        enter: EnterTransition,
        exit: ExitTransition,
    },

    Clickable {
        action: ActionBinding,
        enabled: bool,
    },
    CombinedClickable {
        on_click: Option<ActionBinding>,
        on_double_click: Option<ActionBinding>,
        on_long_click: Option<ActionBinding>,
        enabled: bool,
    },
    Selectable {
        selected: bool,
        action: ActionBinding,
        enabled: bool,
    },
    Toggleable {
        value: bool,
        action: ActionBinding,
        enabled: bool,
    },
    TriStateToggleable {
        state: ToggleableState,
        action: ActionBinding,
        enabled: bool,
    },
    OnFocusChanged(ActionBinding),

    /// Unevaluated directive awaiting context.
    Pending(Placeholder),
}

impl Modifier {
    fn bind_dispatch(&mut self, dispatch: &DispatchHandle) {
        match self {
            Modifier::Clickable { action, .. }
            | Modifier::Selectable { action, .. }
            | Modifier::Toggleable { action, .. }
            | Modifier::TriStateToggleable { action, .. }
            | Modifier::OnFocusChanged(action) => action.rebind(dispatch),
            Modifier::CombinedClickable {
                on_click,
                on_double_click,
                on_long_click,
                ..
            } => {
                for action in [on_click, on_double_click, on_long_click]
                    .into_iter()
                    .flatten()
                {
                    action.rebind(dispatch);
                }
            }
            _ => {}
        }
    }
}

/// Ordered chain of modifiers. The empty chain is the identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Decoration {
    modifiers: Vec<Modifier>,
}

impl Decoration {
    /// The decoration that changes nothing.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Single-modifier decoration.
    pub fn of(modifier: Modifier) -> Self {
        Self {
            modifiers: vec![modifier],
        }
    }

    /// `self` followed by `next`.
    pub fn then(mut self, next: Decoration) -> Self {
        self.modifiers.extend(next.modifiers);
        self
    }

    /// Modifiers in application order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// True for the identity decoration.
    pub fn is_identity(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Placeholders still waiting for context.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.modifiers.iter().filter_map(|modifier| match modifier {
            Modifier::Pending(placeholder) => Some(placeholder),
            _ => None,
        })
    }

    /// True when any part of the chain is a placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Point every action binding at `dispatch`.
    pub fn bind_dispatch(&mut self, dispatch: &DispatchHandle) {
        for modifier in &mut self.modifiers {
            modifier.bind_dispatch(dispatch);
        }
    }
}

impl From<Modifier> for Decoration {
    fn from(modifier: Modifier) -> Self {
        Decoration::of(modifier)
    }
}

impl From<Placeholder> for Decoration {
    fn from(placeholder: Placeholder) -> Self {
        Decoration::of(Modifier::Pending(placeholder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn then_concatenates_in_order() {
        let a = Decoration::of(Modifier::Alpha(0.5));
        let b = Decoration::of(Modifier::Rotate(90.0));
        let ab = a.clone().then(b.clone());
        assert_eq!(ab.modifiers(), &[Modifier::Alpha(0.5), Modifier::Rotate(90.0)]);
        assert_ne!(ab, b.then(a));
        assert!(Decoration::identity().is_identity());
        assert_eq!(Decoration::identity().then(ab.clone()), ab);
    }

    #[test]
    fn rebinding_redirects_actions() {
        let first_hits = Arc::new(AtomicUsize::new(0));
        let second_hits = Arc::new(AtomicUsize::new(0));
        let first = {
            let hits = first_hits.clone();
            DispatchHandle::new(move |_, _, _, _| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        let second = {
            let hits = second_hits.clone();
            DispatchHandle::new(move |_, _, _, _| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        let mut decoration = Decoration::of(Modifier::Clickable {
            action: ActionBinding::new("click", EventDescriptor::named("go"), &first),
            enabled: true,
        });
        decoration.bind_dispatch(&second);
        let Modifier::Clickable { action, .. } = &decoration.modifiers()[0] else {
            panic!("expected clickable");
        };
        action.fire(&Value::Nil);
        assert_eq!(first_hits.load(Ordering::SeqCst), 0);
        assert_eq!(second_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn serializes_with_modifier_tags() {
        let decoration = Decoration::of(Modifier::Alpha(0.5)).then(Modifier::MatchParentSize.into());
        let json = serde_json::to_value(&decoration).unwrap();
        assert_eq!(json[0]["modifier"], "alpha");
        assert_eq!(json[1]["modifier"], "match_parent_size");
    }
}
