//! Style engine and public API
//!
//! [`StyleEngine`] owns the loaded sheet, the compiled style cache and a
//! handle to the [`RuntimeValueStore`]. Hosts load sheet text once and
//! resolve style names per render.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod cache;
pub mod error;
pub mod store;

pub use cache::{CacheKey, CompiledCall, CompiledStyle, CompiledStyleCache};
pub use error::{Result, StyleError};
pub use store::RuntimeValueStore;

use crate::directive::context::{DispatchHandle, ResolveContext, ScopeKind};
use crate::directive::decoration::{Decoration, Placeholder};
use crate::directive::dispatch::Resolution;
use crate::directive::registry::{DirectiveCatalog, DirectiveRegistry};
use crate::syntax::{self, ParseError, StyleSheet};

/// How malformed styles are handled when a sheet is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Any error rejects the whole sheet.
    #[default]
    Strict,
    /// Malformed styles are dropped and reported; the rest load.
    DropInvalidStyles,
}

/// Configuration for the style engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Error policy for sheet loading
    pub parse_policy: ParsePolicy,

    /// Memoize resolved styles per (style, scope kind, dispatch presence)
    pub memoize: bool,

    /// Memo size; the table is cleared when it fills up
    pub max_cached_entries: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parse_policy: ParsePolicy::Strict,
            memoize: true,
            max_cached_entries: 1024,
        }
    }
}

impl EngineConfig {
    /// Decode a configuration from JSON text; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Reject settings that cannot work together.
    pub fn validate(&self) -> Result<()> {
        if self.memoize && self.max_cached_entries == 0 {
            return Err(StyleError::Config(
                "max_cached_entries must be positive when memoize is enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of loading a sheet
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadReport {
    /// Number of styles now loaded
    pub styles: usize,
    /// Styles dropped under [`ParsePolicy::DropInvalidStyles`]
    pub dropped: Vec<ParseError>,
}

struct EngineState {
    sheet: Arc<StyleSheet>,
    cache: CompiledStyleCache,
}

/// Loads stylesheets and resolves style names into decorations.
///
/// Loading is atomic: on error the previous sheet stays active. Resolution
/// never fails; unknown styles and directives resolve to the identity.
pub struct StyleEngine {
    config: EngineConfig,
    registry: DirectiveRegistry,
    store: RuntimeValueStore,
    state: Mutex<EngineState>,
}

impl StyleEngine {
    /// Engine over the global directive catalog, reading live values from `store`.
    pub fn new(config: EngineConfig, store: RuntimeValueStore) -> Self {
        Self::with_registry(config, store, DirectiveCatalog::global().snapshot())
    }

    /// Engine over an explicit registry snapshot.
    pub fn with_registry(
        config: EngineConfig,
        store: RuntimeValueStore,
        registry: DirectiveRegistry,
    ) -> Self {
        let cache = CompiledStyleCache::new(config.max_cached_entries);
        Self {
            config,
            registry,
            store,
            state: Mutex::new(EngineState {
                sheet: Arc::new(StyleSheet::default()),
                cache,
            }),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Directive registry in use.
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Live value store consulted by lambda-value arguments.
    pub fn store(&self) -> &RuntimeValueStore {
        &self.store
    }

    /// Replace the loaded sheet with `text`, invalidating every cached result.
    pub fn load_style_sheet(&self, text: &str) -> Result<LoadReport> {
        let (sheet, dropped) = match self.config.parse_policy {
            ParsePolicy::Strict => (syntax::parse(text)?, Vec::new()),
            ParsePolicy::DropInvalidStyles => syntax::parse_lenient(text)?,
        };
        for err in &dropped {
            warn!(error = %err, "dropped malformed style");
        }

        let report = LoadReport {
            styles: sheet.len(),
            dropped,
        };
        let mut state = self.state.lock();
        state.sheet = Arc::new(sheet);
        state.cache.clear();
        info!(
            styles = report.styles,
            dropped = report.dropped.len(),
            "stylesheet loaded"
        );
        Ok(report)
    }

    /// True iff the loaded sheet has no styles.
    pub fn is_empty(&self) -> bool {
        self.state.lock().sheet.is_empty()
    }

    /// Names of the loaded styles, sorted.
    pub fn style_names(&self) -> Vec<String> {
        self.state.lock().sheet.names().map(str::to_string).collect()
    }

    /// The loaded sheet.
    pub fn sheet(&self) -> Arc<StyleSheet> {
        self.state.lock().sheet.clone()
    }

    /// Resolve `style` for a node hosted in `scope`, with `dispatch` for actions.
    ///
    /// Directives are applied in document order. Scoped or action-bound
    /// directives whose context is missing appear as pending modifiers.
    pub fn resolve(
        &self,
        style: &str,
        scope: Option<ScopeKind>,
        dispatch: Option<&DispatchHandle>,
    ) -> Decoration {
        let mut state = self.state.lock();
        let sheet = state.sheet.clone();
        let Some(calls) = sheet.get(style) else {
            debug!(style, "unknown style");
            return Decoration::identity();
        };

        let key = CacheKey::new(style, scope, dispatch.is_some());
        if self.config.memoize {
            if let Some(hit) = state.cache.lookup(&key) {
                let mut decoration = hit.clone();
                if let Some(dispatch) = dispatch {
                    decoration.bind_dispatch(dispatch);
                }
                return decoration;
            }
        }

        let compiled = state.cache.compiled(style, calls, &self.registry);
        let cx = ResolveContext::new(&self.store)
            .with_scope(scope)
            .with_dispatch(dispatch);
        let decoration = compiled.evaluate(&self.registry, &cx);

        if decoration.has_placeholders() {
            debug!(style, scope = ?scope, "style has pending directives");
        } else if self.config.memoize && !compiled.is_live() {
            state.cache.store(key, &decoration);
        }
        decoration
    }

    /// Re-evaluate a placeholder with context that is now known.
    pub fn retry(
        &self,
        placeholder: &Placeholder,
        scope: Option<ScopeKind>,
        dispatch: Option<&DispatchHandle>,
    ) -> Resolution {
        let cx = ResolveContext::new(&self.store)
            .with_scope(scope)
            .with_dispatch(dispatch);
        self.registry.retry(placeholder, &cx)
    }
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("styles", &self.state.lock().sheet.len())
            .finish()
    }
}
