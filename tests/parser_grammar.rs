//! Integration tests for the directive-language parser

use proptest::prelude::*;
use restyle::syntax::{Expr, MAX_NESTING, parse, parse_expression, parse_lenient};
use restyle::{EngineConfig, ParsePolicy, RuntimeValueStore, StyleEngine, StyleError};

fn nested(open: &str, close: &str, depth: usize) -> String {
    format!("{}1{}", open.repeat(depth), close.repeat(depth))
}

#[test]
fn test_sheet_accepts_both_call_forms_and_comments() {
    let sheet = parse(
        r#"
        # header comment
        %{
            "card" => [{:padding, [], [8]}, background(Color.Red)],
            title: [alpha(0.5)],
        }
        "#,
    )
    .unwrap();
    assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["card", "title"]);
    assert_eq!(sheet.get("card").unwrap()[0].name, "padding");
    assert_eq!(sheet.get("card").unwrap()[1].name, "background");
}

#[test]
fn test_duplicate_style_names_last_write_wins() {
    let sheet = parse(r#"%{"a" => [alpha(0.1)], "a" => [alpha(0.9)]}"#).unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.get("a").unwrap()[0].args, vec![Expr::Float(0.9)]);
}

#[test]
fn test_errors_carry_positions() {
    let err = parse("%{\n  \"a\" => [alpha(0.5]\n}").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.column > 1);

    let err = parse(r#"%{"a" => 5}"#).unwrap_err();
    assert!(err.message.contains("list of calls"));
}

#[test]
fn test_lenient_parse_drops_only_broken_styles() {
    let (sheet, dropped) =
        parse_lenient(r#"%{"ok" => [alpha(1)], "broken" => [alpha(], "also_ok" => []}"#).unwrap();
    assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["also_ok", "ok"]);
    assert_eq!(dropped.len(), 1);

    assert!(parse_lenient(r#"["not", "a", "map"]"#).is_err());
}

#[test]
fn test_expression_shapes() {
    assert!(matches!(parse_expression("Color.Red").unwrap(), Expr::Dot(_)));
    assert!(matches!(parse_expression("10.dp").unwrap(), Expr::Dot(_)));
    assert!(matches!(parse_expression(":ok").unwrap(), Expr::Atom(_)));
    assert_eq!(parse_expression("0xFF").unwrap(), Expr::Integer(255));
    assert_eq!(parse_expression("nil").unwrap(), Expr::Nil);
    let Expr::Call(range) = parse_expression("0..10").unwrap() else {
        panic!("expected range call");
    };
    assert_eq!(range.name, "..");
    let Expr::Call(named) = parse_expression("padding(top: 4, bottom: 2)").unwrap() else {
        panic!("expected call");
    };
    assert!(matches!(named.args.as_slice(), [Expr::Map(entries)] if entries.len() == 2));
}

#[test]
fn test_deeply_nested_sheet_is_rejected() {
    let engine = StyleEngine::new(EngineConfig::default(), RuntimeValueStore::new());
    engine
        .load_style_sheet(r#"%{"card" => [alpha(0.5)]}"#)
        .unwrap();

    let sheet = format!(r#"%{{"s" => [padding({})]}}"#, nested("[", "]", 100_000));
    let err = engine.load_style_sheet(&sheet).unwrap_err();
    assert!(matches!(err, StyleError::Parse(_)));
    assert_eq!(engine.style_names(), vec!["card".to_string()]);
}

#[test]
fn test_lenient_load_drops_deeply_nested_style() {
    let config = EngineConfig {
        parse_policy: ParsePolicy::DropInvalidStyles,
        ..EngineConfig::default()
    };
    let engine = StyleEngine::new(config, RuntimeValueStore::new());
    let sheet = format!(
        r#"%{{"deep" => [padding({})], "ok" => [alpha(1)]}}"#,
        nested("{", "}", 50_000)
    );
    let report = engine.load_style_sheet(&sheet).unwrap();
    assert_eq!(report.styles, 1);
    assert_eq!(report.dropped.len(), 1);
    assert!(report.dropped[0].message.contains("nested too deeply"));
}

proptest! {
    #[test]
    fn prop_nesting_depth_is_bounded(
        depth in 0usize..4096,
        brackets in prop::sample::select(vec![
            ("[", "]"),
            ("{", "}"),
            ("f(", ")"),
            ("%{k: ", "}"),
        ]),
    ) {
        let (open, close) = brackets;
        let result = parse_expression(&nested(open, close, depth));
        if depth < MAX_NESTING {
            prop_assert!(result.is_ok());
        } else {
            let err = result.unwrap_err();
            prop_assert!(err.message.contains("nested too deeply"));
        }
    }

    #[test]
    fn prop_parser_never_panics(input in "\\PC{0,64}") {
        let _ = parse(&input);
        let _ = parse_lenient(&input);
        let _ = parse_expression(&input);
    }

    #[test]
    fn prop_parser_survives_directive_like_noise(
        input in r#"[%{}\[\](),:=>"a-z0-9. _#\n]{0,48}"#
    ) {
        let _ = parse(&input);
        let _ = parse_lenient(&input);
    }

    #[test]
    fn prop_integers_round_trip(value in any::<i32>()) {
        let parsed = parse_expression(&value.to_string()).unwrap();
        prop_assert_eq!(parsed, Expr::Integer(i64::from(value)));
    }
}
