//! Integration tests for style resolution
//!
//! Loads whole sheets through the engine and checks ordering, equivalence of
//! call forms, empty input and forward compatibility.

use proptest::prelude::*;
use restyle::coerce::{Brush, Color, EdgeInsets, Length, Offset, Paint, Shape};
use restyle::{Decoration, EngineConfig, Modifier, RuntimeValueStore, ScopeKind, StyleEngine};

fn engine_with(sheet: &str) -> StyleEngine {
    let engine = StyleEngine::new(EngineConfig::default(), RuntimeValueStore::new());
    engine.load_style_sheet(sheet).unwrap();
    engine
}

#[test]
fn test_empty_input_loads_no_styles() {
    for sheet in ["", "%{}", "  # nothing here\n"] {
        let engine = engine_with(sheet);
        assert!(engine.is_empty(), "sheet {:?} should be empty", sheet);
        assert_eq!(engine.resolve("anything", None, None), Decoration::identity());
    }
}

#[test]
fn test_directives_apply_in_document_order() {
    let engine = engine_with(
        r#"%{
            "padded_then_sized" => [padding(8), size(100)],
            "sized_then_padded" => [size(100), padding(8)]
        }"#,
    );
    let first = engine.resolve("padded_then_sized", None, None);
    let second = engine.resolve("sized_then_padded", None, None);
    assert_ne!(first, second);

    let padding = Modifier::Padding(EdgeInsets::all(Length::dp(8.0)));
    let size = Modifier::Size {
        width: Length::dp(100.0),
        height: Length::dp(100.0),
    };
    assert_eq!(first.modifiers(), &[padding.clone(), size.clone()]);
    assert_eq!(second.modifiers(), &[size, padding]);
}

#[test]
fn test_named_and_positional_forms_agree() {
    let engine = engine_with(
        r#"%{
            "pad_positional" => [padding(1, 2, 3, 4)],
            "pad_named" => [padding(start: 1, top: 2, end: 3, bottom: 4)],
            "border_positional" => [border(2, Color.Red, RoundedCornerShape(4))],
            "border_named" => [border(width: 2, color: Color.Red, shape: RoundedCornerShape(4))],
            "shadow_positional" => [shadow(4, CircleShape, true)],
            "shadow_named" => [shadow(elevation: 4, shape: CircleShape, clip: true)]
        }"#,
    );
    for family in ["pad", "border", "shadow"] {
        let positional = engine.resolve(&format!("{}_positional", family), None, None);
        let named = engine.resolve(&format!("{}_named", family), None, None);
        assert!(!positional.is_identity(), "{} should apply", family);
        assert_eq!(positional, named, "{} forms differ", family);
    }
}

#[test]
fn test_sweep_gradient_background_matches_direct_construction() {
    let engine = engine_with(
        r#"%{
            "named" => [background(
                brush: Brush.sweepGradient(colors: [Color.Red, Color.Green, Color.Blue], center: Offset(10, 20)),
                shape: CircleShape
            )],
            "positional" => [background(
                Brush.sweepGradient([Color.Red, Color.Green, Color.Blue], Offset(10, 20)),
                CircleShape
            )]
        }"#,
    );
    let expected = Decoration::of(Modifier::Background {
        paint: Paint::Brush(Brush::SweepGradient {
            colors: vec![
                Color::Argb(0xFFFF_0000),
                Color::Argb(0xFF00_FF00),
                Color::Argb(0xFF00_00FF),
            ],
            center: Some(Offset::new(10.0, 20.0)),
        }),
        shape: Shape::Circle,
        alpha: 1.0,
    });
    assert_eq!(engine.resolve("named", None, None), expected);
    assert_eq!(engine.resolve("positional", None, None), expected);
}

#[test]
fn test_unknown_directives_are_ignored() {
    let engine = engine_with(r#"%{"future" => [hologram(3, :shiny), alpha(0.5)]}"#);
    assert_eq!(
        engine.resolve("future", None, None).modifiers(),
        &[Modifier::Alpha(0.5)]
    );
}

#[test]
fn test_argument_mismatch_only_drops_that_directive() {
    let engine = engine_with(r#"%{"mixed" => [padding("wide"), alpha(0.5), rotate(:left)]}"#);
    assert_eq!(
        engine.resolve("mixed", None, None).modifiers(),
        &[Modifier::Alpha(0.5)]
    );
}

#[test]
fn test_tuple_and_sugar_calls_are_equivalent() {
    let engine = engine_with(
        r#"%{
            "tuple" => [{:padding, [line: 3], [8]}, {:alpha, [], [0.5]}],
            "sugar" => [padding(8), alpha(0.5)]
        }"#,
    );
    assert_eq!(
        engine.resolve("tuple", None, None),
        engine.resolve("sugar", None, None)
    );
}

#[test]
fn test_scope_changes_only_scoped_directives() {
    let engine = engine_with(r#"%{"item" => [padding(4), weight(1), align(Alignment.CenterVertically)]}"#);
    let row = engine.resolve("item", Some(ScopeKind::Row), None);
    assert_eq!(row.modifiers().len(), 3);
    assert!(!row.has_placeholders());

    let lazy = engine.resolve("item", Some(ScopeKind::LazyItem), None);
    assert_eq!(lazy.modifiers()[0], row.modifiers()[0]);
    assert_eq!(lazy.placeholders().count(), 2);
}

#[test]
fn test_host_registered_directive_is_seen_by_new_engines() {
    use restyle::directive::{DirectiveCatalog, DirectiveSpec};

    let sheet = r#"%{"glowing" => [glow()]}"#;
    let before = engine_with(sheet);
    DirectiveCatalog::global().register(DirectiveSpec::parameterless("glow", || {
        Decoration::of(Modifier::Alpha(0.75))
    }));
    let after = engine_with(sheet);

    assert!(before.resolve("glowing", None, None).is_identity());
    assert_eq!(
        after.resolve("glowing", None, None).modifiers(),
        &[Modifier::Alpha(0.75)]
    );
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(
        pad in 0u32..64,
        alpha in 0.0f32..1.0,
        scope in prop::sample::select(vec![
            None,
            Some(ScopeKind::Box),
            Some(ScopeKind::Column),
            Some(ScopeKind::Row),
            Some(ScopeKind::LazyItem),
        ]),
    ) {
        let engine = engine_with(&format!(
            r#"%{{"s" => [padding({}), alpha({}), weight(2), align(Alignment.Center)]}}"#,
            pad, alpha
        ));
        let first = engine.resolve("s", scope, None);
        let second = engine.resolve("s", scope, None);
        prop_assert_eq!(first, second);
    }
}
