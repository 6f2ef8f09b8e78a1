//! Integration tests for lambda-value arguments
//!
//! Live node values are read from the store on every resolve, never at load.

use restyle::coerce::Length;
use restyle::{EngineConfig, Modifier, RuntimeValueStore, StyleEngine, Value};

fn engine(store: &RuntimeValueStore, sheet: &str) -> StyleEngine {
    let engine = StyleEngine::new(EngineConfig::default(), store.clone());
    engine.load_style_sheet(sheet).unwrap();
    engine
}

#[test]
fn test_deferred_read_follows_store_updates() {
    let store = RuntimeValueStore::new();
    let engine = engine(
        &store,
        r#"%{"layer" => [zIndex([:float, __view_value__("node-42")])]}"#,
    );

    store.set("node-42", Value::Integer(7));
    assert_eq!(
        engine.resolve("layer", None, None).modifiers(),
        &[Modifier::ZIndex(7.0)]
    );

    store.set("node-42", Value::Integer(9));
    assert_eq!(
        engine.resolve("layer", None, None).modifiers(),
        &[Modifier::ZIndex(9.0)]
    );
}

#[test]
fn test_named_lambda_argument_next_to_literal() {
    let store = RuntimeValueStore::new();
    let engine = engine(
        &store,
        r#"%{"nudge" => [offset(x: [:dp, __view_value__("slider")], y: 3)]}"#,
    );
    store.set("slider", Value::String("12.5".into()));
    assert_eq!(
        engine.resolve("nudge", None, None).modifiers(),
        &[Modifier::Offset {
            x: Length::dp(12.5),
            y: Length::dp(3.0)
        }]
    );
}

#[test]
fn test_missing_value_reads_as_absent() {
    let store = RuntimeValueStore::new();
    let engine = engine(
        &store,
        r#"%{"s" => [padding([:dp, __view_value__("gone")]), alpha(0.5)]}"#,
    );
    assert_eq!(
        engine.resolve("s", None, None).modifiers(),
        &[Modifier::Alpha(0.5)]
    );

    store.set("gone", Value::Integer(4));
    assert_eq!(engine.resolve("s", None, None).modifiers().len(), 2);

    store.remove("gone");
    assert_eq!(
        engine.resolve("s", None, None).modifiers(),
        &[Modifier::Alpha(0.5)]
    );
}

#[test]
fn test_static_siblings_are_unaffected_by_live_values() {
    let store = RuntimeValueStore::new();
    let engine = engine(
        &store,
        r#"%{"s" => [alpha(0.5), rotate([:int, __view_value__("angle")])]}"#,
    );
    store.set("angle", Value::Float(45.9));
    assert_eq!(
        engine.resolve("s", None, None).modifiers(),
        &[Modifier::Alpha(0.5), Modifier::Rotate(45.0)]
    );
}
