//! Toggle states for tri-state controls

use serde::Serialize;

use crate::directive::argument::ArgumentNode;

/// Tri-state checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleableState {
    /// Checked.
    On,
    /// Unchecked.
    Off,
    /// Partially checked.
    Indeterminate,
}

impl From<bool> for ToggleableState {
    fn from(flag: bool) -> Self {
        if flag {
            ToggleableState::On
        } else {
            ToggleableState::Off
        }
    }
}

/// A boolean, or `ToggleableState.On|Off|Indeterminate`.
pub fn toggleable_state(node: &ArgumentNode) -> Option<ToggleableState> {
    if let Some(flag) = node.as_bool() {
        return Some(flag.into());
    }
    match node.member()? {
        "On" => Some(ToggleableState::On),
        "Off" => Some(ToggleableState::Off),
        "Indeterminate" => Some(ToggleableState::Indeterminate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_expression;

    #[test]
    fn booleans_and_named_states() {
        let node = |src: &str| ArgumentNode::positional(parse_expression(src).unwrap(), 0);
        assert_eq!(toggleable_state(&node("true")), Some(ToggleableState::On));
        assert_eq!(
            toggleable_state(&node("ToggleableState.Indeterminate")),
            Some(ToggleableState::Indeterminate)
        );
        assert_eq!(toggleable_state(&node("1")), None);
    }
}
