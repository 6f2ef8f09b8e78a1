//! Live node values read by lambda-value arguments.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::directive::argument::LiveValues;
use crate::syntax::Value;

static GLOBAL: Lazy<RuntimeValueStore> = Lazy::new(RuntimeValueStore::new);

/// Keyed store of the latest value of each live node.
///
/// Cloning yields another handle to the same map. Writes replace whole
/// values, so readers never observe a partial update.
#[derive(Debug, Clone, Default)]
pub struct RuntimeValueStore {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl RuntimeValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store for hosts that want a single shared instance.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Record the latest value of `node_id`. Returns the previous value.
    pub fn set(&self, node_id: impl Into<String>, value: Value) -> Option<Value> {
        self.values.write().insert(node_id.into(), value)
    }

    /// Latest value of `node_id`.
    pub fn get(&self, node_id: &str) -> Option<Value> {
        self.values.read().get(node_id).cloned()
    }

    /// Forget `node_id`, typically when its node is destroyed.
    pub fn remove(&self, node_id: &str) -> Option<Value> {
        self.values.write().remove(node_id)
    }

    /// True when a value is recorded for `node_id`.
    pub fn contains(&self, node_id: &str) -> bool {
        self.values.read().contains_key(node_id)
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// True when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl LiveValues for RuntimeValueStore {
    fn live_value(&self, node_id: &str) -> Option<Value> {
        self.get(node_id)
    }
}
