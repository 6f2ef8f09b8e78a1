//! Built-in directive catalog.

use super::registry::DirectiveSpec;

mod action;
mod drawing;
mod layout;
mod misc;
mod scoped;

/// Every built-in directive.
pub(crate) fn specs() -> impl Iterator<Item = &'static DirectiveSpec> {
    [
        layout::SPECS,
        drawing::SPECS,
        misc::SPECS,
        scoped::SPECS,
        action::SPECS,
    ]
    .into_iter()
    .flatten()
}
