//! Directive evaluation.
//!
//! A parsed [`Call`](crate::syntax::Call) is adapted into [`ArgumentNode`]s,
//! looked up in a [`DirectiveRegistry`] and evaluated into a [`Decoration`],
//! or into a [`Placeholder`] when scope or dispatch is still missing.

/// Argument normalisation and typed accessors.
pub mod argument;
mod builtin;
/// Scope kinds, dispatch capability and the per-call resolve context.
pub mod context;
/// Decoration values produced by directives.
pub mod decoration;
/// Name-based dispatch and placeholder retry.
pub mod dispatch;
/// Ordered overload arms.
pub mod overload;
/// Directive catalog and registry snapshots.
pub mod registry;

pub use argument::{ArgKind, ArgumentNode, LiveValues, adapt, arg_or_named};
pub use context::{DispatchHandle, ResolveContext, ScopeKind};
pub use decoration::{ActionBinding, Axis, Capability, Decoration, MissingContext, Modifier, Placeholder};
pub use dispatch::Resolution;
pub use registry::{DirectiveCatalog, DirectiveRegistry, DirectiveSpec, Handler, Strategy};
