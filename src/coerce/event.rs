//! Event descriptors carried by action directives

use std::collections::BTreeMap;

use serde::Serialize;

use super::call_named;
use crate::directive::argument::ArgumentNode;
use crate::syntax::Value;

/// Server event named by an action-bound directive.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EventDescriptor {
    /// Event name sent to the server. Empty means "no event".
    pub name: String,
    /// Extra payload forwarded as the dispatch metadata.
    pub params: BTreeMap<String, Value>,
}

impl EventDescriptor {
    /// Event with no parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// True when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Parameters as a single map value.
    pub fn params_value(&self) -> Value {
        Value::Map(self.params.clone())
    }
}

fn params(node: &ArgumentNode) -> Option<BTreeMap<String, Value>> {
    match node.to_value()? {
        Value::Map(entries) => Some(entries),
        Value::Nil => Some(BTreeMap::new()),
        _ => None,
    }
}

/// Coerce an event: `"name"`, `:name`, `event(name, params)` or
/// `%{"name" => ..., "params" => %{...}}`.
pub fn event(node: &ArgumentNode) -> Option<EventDescriptor> {
    if let Some(name) = node.as_str().or_else(|| node.as_atom()) {
        return Some(EventDescriptor::named(name));
    }
    if let Some(entries) = node.as_map() {
        let name = entries
            .iter()
            .find(|entry| entry.name() == Some("name"))?
            .as_str()?
            .to_string();
        let params = match entries.iter().find(|entry| entry.name() == Some("params")) {
            Some(entry) => params(entry)?,
            None => BTreeMap::new(),
        };
        return Some(EventDescriptor { name, params });
    }
    let call = call_named(node, &["event", "Event"])?;
    Some(EventDescriptor {
        name: call.arg("name", 0)?.as_str()?.to_string(),
        params: match call.arg("params", 1) {
            Some(entry) => params(entry)?,
            None => BTreeMap::new(),
        },
    })
}

/// True when `node` is present and names a non-empty event.
pub fn has_event(node: Option<&ArgumentNode>) -> bool {
    node.and_then(event).is_some_and(|event| !event.is_empty())
}
