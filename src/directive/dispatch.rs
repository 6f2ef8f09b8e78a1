//! Directive dispatch.
//!
//! Resolution never fails. Unknown directives and argument mismatches give
//! the identity decoration; missing scope or dispatch gives a [`Placeholder`]
//! that can be retried once the context is known.

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use super::argument::{ArgumentNode, LiveValues, adapt};
use super::context::ResolveContext;
use super::decoration::{Decoration, MissingContext, Placeholder};
use super::registry::{DirectiveRegistry, Handler};
use crate::syntax::Call;

/// Outcome of resolving one directive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// Fully evaluated (possibly the identity).
    Applied(Decoration),
    /// Waiting for context.
    Placeholder(Placeholder),
}

impl Resolution {
    /// True for [`Resolution::Placeholder`].
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Resolution::Placeholder(_))
    }

    /// Flatten into a decoration; a placeholder becomes a single pending modifier.
    pub fn into_decoration(self) -> Decoration {
        match self {
            Resolution::Applied(decoration) => decoration,
            Resolution::Placeholder(placeholder) => placeholder.into(),
        }
    }
}

/// Substitute live values; borrows when nothing is deferred.
pub(crate) fn resolve_args<'a>(
    args: &'a [ArgumentNode],
    values: &dyn LiveValues,
) -> Cow<'a, [ArgumentNode]> {
    if args.iter().any(ArgumentNode::requires_deferred) {
        Cow::Owned(args.iter().map(|arg| arg.resolve_deferred(values)).collect())
    } else {
        Cow::Borrowed(args)
    }
}

fn built(directive: &str, decoration: Option<Decoration>) -> Resolution {
    Resolution::Applied(decoration.unwrap_or_else(|| {
        debug!(directive, "argument mismatch; directive has no effect");
        Decoration::identity()
    }))
}

impl DirectiveRegistry {
    /// Resolve a parsed call.
    pub fn dispatch(&self, call: &Call, cx: &ResolveContext<'_>) -> Resolution {
        self.evaluate(&call.name, &adapt(call), cx)
    }

    /// Resolve `name` applied to already-adapted arguments.
    pub fn evaluate(
        &self,
        name: &str,
        args: &[ArgumentNode],
        cx: &ResolveContext<'_>,
    ) -> Resolution {
        let Some(spec) = self.get(name) else {
            debug!(directive = name, "unknown directive; ignoring");
            return Resolution::Applied(Decoration::identity());
        };

        match spec.handler {
            Handler::Parameterless(build) => Resolution::Applied(build()),
            Handler::Static(build) => built(name, build(&resolve_args(args, cx.values))),
            Handler::Scoped { supports, build } => {
                match cx.scope.filter(|scope| supports.contains(scope)) {
                    Some(scope) => built(name, build(&resolve_args(args, cx.values), scope)),
                    None => {
                        debug!(directive = name, scope = ?cx.scope, "scope unavailable; deferring");
                        Resolution::Placeholder(Placeholder {
                            directive: name.to_string(),
                            args: args.to_vec(),
                            missing: MissingContext::Scope {
                                supported: supports.to_vec(),
                                provided: cx.scope,
                            },
                        })
                    }
                }
            }
            Handler::ActionBound { build, has_event } => {
                let resolved = resolve_args(args, cx.values);
                if !has_event(&resolved) {
                    return Resolution::Applied(Decoration::identity());
                }
                match cx.dispatch {
                    Some(dispatch) => built(name, build(&resolved, dispatch)),
                    None => {
                        debug!(directive = name, "dispatch unavailable; deferring");
                        Resolution::Placeholder(Placeholder {
                            directive: name.to_string(),
                            args: args.to_vec(),
                            missing: MissingContext::Dispatch,
                        })
                    }
                }
            }
        }
    }

    /// Re-evaluate a placeholder against new context.
    pub fn retry(&self, placeholder: &Placeholder, cx: &ResolveContext<'_>) -> Resolution {
        self.evaluate(&placeholder.directive, &placeholder.args, cx)
    }
}
