//! Action-bound directives that fire events through the dispatch handle

use crate::coerce::event::{EventDescriptor, event, has_event};
use crate::coerce::param;
use crate::coerce::toggle::toggleable_state;
use crate::directive::argument::{ArgumentNode, arg_or_named};
use crate::directive::context::DispatchHandle;
use crate::directive::decoration::{ActionBinding, Decoration, Modifier};
use crate::directive::registry::DirectiveSpec;

pub(crate) const SPECS: &[DirectiveSpec] = &[
    DirectiveSpec::action("clickable", clickable, |args| {
        has_event(arg_or_named(args, "event", 0))
    }),
    DirectiveSpec::action("combinedClickable", combined_clickable, |args| {
        [("onClick", 0), ("onDoubleClick", 1), ("onLongClick", 2)]
            .into_iter()
            .any(|(name, index)| has_event(arg_or_named(args, name, index)))
    }),
    DirectiveSpec::action("selectable", selectable, |args| {
        has_event(arg_or_named(args, "event", 1))
    }),
    DirectiveSpec::action("toggleable", toggleable, |args| {
        has_event(arg_or_named(args, "event", 1))
    }),
    DirectiveSpec::action("triStateToggleable", tri_state_toggleable, |args| {
        has_event(arg_or_named(args, "event", 1))
    }),
    DirectiveSpec::action("onFocusChanged", on_focus_changed, |args| {
        has_event(arg_or_named(args, "event", 0))
    }),
];

fn enabled(args: &[ArgumentNode], index: usize) -> bool {
    param(args, "enabled", index, ArgumentNode::as_bool).unwrap_or(true)
}

fn binding(
    args: &[ArgumentNode],
    name: &str,
    index: usize,
    event_type: &str,
    dispatch: &DispatchHandle,
) -> Option<ActionBinding> {
    param(args, name, index, event)
        .filter(|event| !event.is_empty())
        .map(|event: EventDescriptor| ActionBinding::new(event_type, event, dispatch))
}

fn clickable(args: &[ArgumentNode], dispatch: &DispatchHandle) -> Option<Decoration> {
    Some(
        Modifier::Clickable {
            action: binding(args, "event", 0, "click", dispatch)?,
            enabled: enabled(args, 1),
        }
        .into(),
    )
}

fn combined_clickable(args: &[ArgumentNode], dispatch: &DispatchHandle) -> Option<Decoration> {
    Some(
        Modifier::CombinedClickable {
            on_click: binding(args, "onClick", 0, "click", dispatch),
            on_double_click: binding(args, "onDoubleClick", 1, "double_click", dispatch),
            on_long_click: binding(args, "onLongClick", 2, "long_click", dispatch),
            enabled: enabled(args, 3),
        }
        .into(),
    )
}

fn selectable(args: &[ArgumentNode], dispatch: &DispatchHandle) -> Option<Decoration> {
    Some(
        Modifier::Selectable {
            selected: param(args, "selected", 0, ArgumentNode::as_bool)?,
            action: binding(args, "event", 1, "select", dispatch)?,
            enabled: enabled(args, 2),
        }
        .into(),
    )
}

fn toggleable(args: &[ArgumentNode], dispatch: &DispatchHandle) -> Option<Decoration> {
    Some(
        Modifier::Toggleable {
            value: param(args, "value", 0, ArgumentNode::as_bool)?,
            action: binding(args, "event", 1, "toggle", dispatch)?,
            enabled: enabled(args, 2),
        }
        .into(),
    )
}

fn tri_state_toggleable(args: &[ArgumentNode], dispatch: &DispatchHandle) -> Option<Decoration> {
    Some(
        Modifier::TriStateToggleable {
            state: param(args, "state", 0, toggleable_state)?,
            action: binding(args, "event", 1, "toggle", dispatch)?,
            enabled: enabled(args, 2),
        }
        .into(),
    )
}

fn on_focus_changed(args: &[ArgumentNode], dispatch: &DispatchHandle) -> Option<Decoration> {
    binding(args, "event", 0, "focus_changed", dispatch)
        .map(|action| Modifier::OnFocusChanged(action).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::ToggleableState;
    use crate::directive::argument::adapt;
    use crate::syntax::{Value, parse_expression};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn args(src: &str) -> Vec<ArgumentNode> {
        adapt(parse_expression(src).unwrap().as_call().unwrap())
    }

    type Fired = Arc<Mutex<Vec<(String, String, Value, Value)>>>;

    fn recorder() -> (DispatchHandle, Fired) {
        let fired: Fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let handle = DispatchHandle::new(move |kind, name, value, params| {
            sink.lock()
                .push((kind.into(), name.into(), value.clone(), params.clone()));
        });
        (handle, fired)
    }

    #[test]
    fn clickable_fires_with_params() {
        let (dispatch, fired) = recorder();
        let decoration = clickable(
            &args(r#"clickable(event("open", %{"id" => 3}), false)"#),
            &dispatch,
        )
        .expect("decoration");
        let Modifier::Clickable { action, enabled } = &decoration.modifiers()[0] else {
            panic!("expected clickable");
        };
        assert!(!enabled);
        action.fire(&Value::Nil);
        let fired = fired.lock();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, "click");
        assert_eq!(fired[0].1, "open");
        let Value::Map(params) = &fired[0].3 else {
            panic!("expected params map");
        };
        assert_eq!(params["id"], Value::Integer(3));
    }

    #[test]
    fn combined_clickable_skips_empty_events() {
        let (dispatch, _) = recorder();
        let decoration = combined_clickable(
            &args(r#"combinedClickable(onClick: "tap", onLongClick: "")"#),
            &dispatch,
        )
        .expect("decoration");
        let Modifier::CombinedClickable {
            on_click,
            on_double_click,
            on_long_click,
            enabled,
        } = &decoration.modifiers()[0]
        else {
            panic!("expected combined clickable");
        };
        assert!(on_click.is_some());
        assert!(on_double_click.is_none());
        assert!(on_long_click.is_none());
        assert!(*enabled);
    }

    #[test]
    fn toggles_require_their_state() {
        let (dispatch, _) = recorder();
        assert!(toggleable(&args(r#"toggleable(true, "flip")"#), &dispatch).is_some());
        assert!(toggleable(&args(r#"toggleable("yes", "flip")"#), &dispatch).is_none());
        let decoration = tri_state_toggleable(
            &args(r#"triStateToggleable(state: ToggleableState.Indeterminate, event: "flip")"#),
            &dispatch,
        )
        .expect("decoration");
        assert!(matches!(
            decoration.modifiers()[0],
            Modifier::TriStateToggleable {
                state: ToggleableState::Indeterminate,
                ..
            }
        ));
    }
}
