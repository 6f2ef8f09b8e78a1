//! Per-resolve context supplied by the visual tree.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::argument::LiveValues;
use crate::syntax::Value;

/// Kind of layout container hosting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScopeKind {
    /// Stacking box.
    Box,
    /// Vertical list.
    Column,
    /// Horizontal list.
    Row,
    /// Item of a lazy list.
    LazyItem,
    /// Content of an animated-visibility container.
    AnimatedVisibility,
}

impl ScopeKind {
    /// Every scope kind.
    pub const ALL: [ScopeKind; 5] = [
        ScopeKind::Box,
        ScopeKind::Column,
        ScopeKind::Row,
        ScopeKind::LazyItem,
        ScopeKind::AnimatedVisibility,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Box => "Box",
            ScopeKind::Column => "Column",
            ScopeKind::Row => "Row",
            ScopeKind::LazyItem => "LazyItem",
            ScopeKind::AnimatedVisibility => "AnimatedVisibility",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScopeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown scope kind: {}", s))
    }
}

type DispatchFn = dyn Fn(&str, &str, &Value, &Value) + Send + Sync;

/// Callback used to notify the server of user interaction:
/// `(event_type, event_name, value, params)`.
///
/// Handles compare by identity.
#[derive(Clone)]
pub struct DispatchHandle(Arc<DispatchFn>);

impl DispatchHandle {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str, &str, &Value, &Value) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invoke the callback.
    pub fn dispatch(&self, event_type: &str, event_name: &str, value: &Value, params: &Value) {
        (self.0)(event_type, event_name, value, params)
    }
}

impl PartialEq for DispatchHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DispatchHandle")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Everything a directive may need beyond its arguments.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Container kind, when known.
    pub scope: Option<ScopeKind>,
    /// Event capability, when available.
    pub dispatch: Option<&'a DispatchHandle>,
    /// Source of live values for lambda-value arguments.
    pub values: &'a dyn LiveValues,
}

impl<'a> ResolveContext<'a> {
    /// Context with neither scope nor dispatch.
    pub fn new(values: &'a dyn LiveValues) -> Self {
        Self {
            scope: None,
            dispatch: None,
            values,
        }
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: Option<ScopeKind>) -> Self {
        self.scope = scope;
        self
    }

    /// Set the dispatch capability.
    pub fn with_dispatch(mut self, dispatch: Option<&'a DispatchHandle>) -> Self {
        self.dispatch = dispatch;
        self
    }
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("scope", &self.scope)
            .field("dispatch", &self.dispatch.is_some())
            .finish()
    }
}
