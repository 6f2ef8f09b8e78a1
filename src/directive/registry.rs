//! Directive registry
//!
//! Provides a global catalog of directive handlers. Built-in directives are
//! loaded on first access; hosts may register more before creating an
//! engine. Each engine clones an immutable snapshot of the catalog, so later
//! registrations never change the behaviour of a running engine.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::argument::ArgumentNode;
use super::builtin;
use super::context::{DispatchHandle, ScopeKind};
use super::decoration::Decoration;

/// Builds a decoration from (resolved) arguments; `None` on argument mismatch.
pub type StaticBuild = fn(&[ArgumentNode]) -> Option<Decoration>;

/// Builds a decoration for a concrete scope.
pub type ScopedBuild = fn(&[ArgumentNode], ScopeKind) -> Option<Decoration>;

/// Builds a decoration bound to a dispatch capability.
pub type ActionBuild = fn(&[ArgumentNode], &DispatchHandle) -> Option<Decoration>;

/// How a directive is evaluated.
#[derive(Clone, Copy)]
pub enum Handler {
    /// Ignores its arguments.
    Parameterless(fn() -> Decoration),
    /// Pure function of its arguments.
    Static(StaticBuild),
    /// Needs the hosting container kind.
    Scoped {
        /// Kinds this directive can be applied in.
        supports: &'static [ScopeKind],
        /// Builder.
        build: ScopedBuild,
    },
    /// Needs a dispatch capability.
    ActionBound {
        /// Builder.
        build: ActionBuild,
        /// False when the arguments describe no event at all.
        has_event: fn(&[ArgumentNode]) -> bool,
    },
}

/// Strategy tag of a [`Handler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// See [`Handler::Parameterless`].
    Parameterless,
    /// See [`Handler::Static`].
    Static,
    /// See [`Handler::Scoped`].
    Scoped,
    /// See [`Handler::ActionBound`].
    ActionBound,
}

impl Handler {
    /// Strategy tag.
    pub fn strategy(&self) -> Strategy {
        match self {
            Handler::Parameterless(_) => Strategy::Parameterless,
            Handler::Static(_) => Strategy::Static,
            Handler::Scoped { .. } => Strategy::Scoped,
            Handler::ActionBound { .. } => Strategy::ActionBound,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Scoped { supports, .. } => f
                .debug_struct("Scoped")
                .field("supports", supports)
                .finish_non_exhaustive(),
            other => write!(f, "{:?}", other.strategy()),
        }
    }
}

/// Registry entry.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveSpec {
    /// Wire name.
    pub name: &'static str,
    /// Evaluation strategy.
    pub handler: Handler,
}

impl DirectiveSpec {
    /// Parameterless directive.
    pub const fn parameterless(name: &'static str, build: fn() -> Decoration) -> Self {
        Self {
            name,
            handler: Handler::Parameterless(build),
        }
    }

    /// Static directive.
    pub const fn pure(name: &'static str, build: StaticBuild) -> Self {
        Self {
            name,
            handler: Handler::Static(build),
        }
    }

    /// Scoped directive.
    pub const fn scoped(
        name: &'static str,
        supports: &'static [ScopeKind],
        build: ScopedBuild,
    ) -> Self {
        Self {
            name,
            handler: Handler::Scoped { supports, build },
        }
    }

    /// Action-bound directive.
    pub const fn action(
        name: &'static str,
        build: ActionBuild,
        has_event: fn(&[ArgumentNode]) -> bool,
    ) -> Self {
        Self {
            name,
            handler: Handler::ActionBound { build, has_event },
        }
    }
}

/// Global catalog of directive definitions.
pub struct DirectiveCatalog {
    specs: RwLock<HashMap<String, DirectiveSpec>>,
}

static CATALOG: Lazy<DirectiveCatalog> = Lazy::new(DirectiveCatalog::with_builtins);

impl DirectiveCatalog {
    /// Catalog with no directives.
    pub fn empty() -> Self {
        Self {
            specs: RwLock::new(HashMap::new()),
        }
    }

    /// Catalog preloaded with the built-in directives.
    pub fn with_builtins() -> Self {
        let catalog = Self::empty();
        for spec in builtin::specs() {
            catalog.register(*spec);
        }
        catalog
    }

    /// Access the global catalog singleton.
    pub fn global() -> &'static Self {
        &CATALOG
    }

    /// Register (or replace) a directive. Returns the previous definition.
    pub fn register(&self, spec: DirectiveSpec) -> Option<DirectiveSpec> {
        let mut specs = self.specs.write();
        specs.insert(spec.name.to_string(), spec)
    }

    /// Produce an immutable snapshot for an engine.
    pub fn snapshot(&self) -> DirectiveRegistry {
        let specs = self.specs.read();
        DirectiveRegistry {
            specs: Arc::new(specs.clone()),
        }
    }
}

/// Immutable view of the directive catalog.
#[derive(Clone)]
pub struct DirectiveRegistry {
    specs: Arc<HashMap<String, DirectiveSpec>>,
}

impl DirectiveRegistry {
    /// Snapshot of the built-in directives only.
    pub fn builtin() -> Self {
        DirectiveCatalog::with_builtins().snapshot()
    }

    /// Look up a directive.
    pub fn get(&self, name: &str) -> Option<&DirectiveSpec> {
        self.specs.get(name)
    }

    /// Check whether the snapshot contains `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Strategy of `name`, if registered.
    pub fn strategy(&self, name: &str) -> Option<Strategy> {
        self.get(name).map(|spec| spec.handler.strategy())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.specs.values().map(|spec| spec.name).collect();
        names.sort_unstable();
        names
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when no directive is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("directives", &self.len())
            .finish()
    }
}
