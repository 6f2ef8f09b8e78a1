//! Compiled style cache.
//!
//! Each style is compiled once per loaded sheet. Context-free calls are
//! evaluated at compile time; calls that depend on scope, dispatch or live
//! values are kept as adapted arguments and evaluated per resolve. Whole
//! results are memoized by [`CacheKey`] unless they carry placeholders or
//! live values.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use crate::directive::argument::{ArgumentNode, LiveValues, adapt};
use crate::directive::context::{ResolveContext, ScopeKind};
use crate::directive::decoration::Decoration;
use crate::directive::registry::{DirectiveRegistry, Strategy};
use crate::syntax::{Call, Value};

/// Memo key: the style, the kind of scope and whether dispatch is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Style name.
    pub style: String,
    /// Scope kind supplied by the host.
    pub scope: Option<ScopeKind>,
    /// Whether a dispatch capability was supplied.
    pub has_dispatch: bool,
}

impl CacheKey {
    /// Build a key.
    pub fn new(style: &str, scope: Option<ScopeKind>, has_dispatch: bool) -> Self {
        Self {
            style: style.to_string(),
            scope,
            has_dispatch,
        }
    }
}

/// One compiled directive call.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledCall {
    /// Evaluated once; independent of context.
    Ready(Decoration),
    /// Evaluated on every resolve.
    Contextual {
        /// Directive name.
        directive: String,
        /// Adapted arguments.
        args: Vec<ArgumentNode>,
        /// True when an argument reads a live value.
        live: bool,
    },
}

/// The compiled calls of one style, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledStyle {
    calls: Vec<CompiledCall>,
}

struct NoValues;

impl LiveValues for NoValues {
    fn live_value(&self, _node_id: &str) -> Option<Value> {
        None
    }
}

impl CompiledStyle {
    /// Compile `calls` against `registry`.
    pub fn compile(calls: &[Call], registry: &DirectiveRegistry) -> Self {
        let calls = calls
            .iter()
            .map(|call| {
                let args = adapt(call);
                let live = args.iter().any(ArgumentNode::requires_deferred);
                let context_free = matches!(
                    registry.strategy(&call.name),
                    None | Some(Strategy::Parameterless) | Some(Strategy::Static)
                );
                if context_free && !live {
                    let cx = ResolveContext::new(&NoValues);
                    CompiledCall::Ready(registry.evaluate(&call.name, &args, &cx).into_decoration())
                } else {
                    CompiledCall::Contextual {
                        directive: call.name.clone(),
                        args,
                        live,
                    }
                }
            })
            .collect();
        Self { calls }
    }

    /// Compiled calls in document order.
    pub fn calls(&self) -> &[CompiledCall] {
        &self.calls
    }

    /// True when any call reads a live value.
    pub fn is_live(&self) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, CompiledCall::Contextual { live: true, .. }))
    }

    /// Fold every call, left to right, into one decoration.
    pub fn evaluate(&self, registry: &DirectiveRegistry, cx: &ResolveContext<'_>) -> Decoration {
        self.calls
            .iter()
            .fold(Decoration::identity(), |acc, call| match call {
                CompiledCall::Ready(decoration) => acc.then(decoration.clone()),
                CompiledCall::Contextual {
                    directive, args, ..
                } => acc.then(registry.evaluate(directive, args, cx).into_decoration()),
            })
    }
}

/// Compiled styles plus memoized results for the current sheet.
#[derive(Debug)]
pub struct CompiledStyleCache {
    compiled: HashMap<String, Arc<CompiledStyle>>,
    memo: HashMap<CacheKey, Decoration>,
    max_entries: usize,
}

impl CompiledStyleCache {
    /// Empty cache memoizing at most `max_entries` results.
    pub fn new(max_entries: usize) -> Self {
        Self {
            compiled: HashMap::new(),
            memo: HashMap::new(),
            max_entries,
        }
    }

    /// Compiled form of `style`, compiling on first use.
    pub fn compiled(
        &mut self,
        style: &str,
        calls: &[Call],
        registry: &DirectiveRegistry,
    ) -> Arc<CompiledStyle> {
        self.compiled
            .entry(style.to_string())
            .or_insert_with(|| Arc::new(CompiledStyle::compile(calls, registry)))
            .clone()
    }

    /// Memoized result for `key`.
    pub fn lookup(&self, key: &CacheKey) -> Option<&Decoration> {
        let hit = self.memo.get(key);
        if hit.is_some() {
            trace!(style = %key.style, scope = ?key.scope, "style cache hit");
        }
        hit
    }

    /// Memoize `decoration`; refused when it still carries placeholders.
    /// Returns whether it was stored.
    pub fn store(&mut self, key: CacheKey, decoration: &Decoration) -> bool {
        if decoration.has_placeholders() || self.max_entries == 0 {
            return false;
        }
        if self.memo.len() >= self.max_entries && !self.memo.contains_key(&key) {
            trace!(entries = self.memo.len(), "style cache full; clearing");
            self.memo.clear();
        }
        self.memo.insert(key, decoration.clone());
        true
    }

    /// Number of memoized results.
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    /// Forget everything; used when a new sheet is loaded.
    pub fn clear(&mut self) {
        self.compiled.clear();
        self.memo.clear();
    }
}
