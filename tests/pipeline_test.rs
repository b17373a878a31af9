//! End-to-end tests of the processing pipeline through the public API.

use proptest::prelude::*;
use svgrab::{
    ProcessingOptions, ProcessingResult, SvgError, component_name, generate_component,
    optimize_markup, parse_svg, process,
};

fn all_off() -> ProcessingOptions {
    ProcessingOptions {
        optimize: false,
        remove_comments: false,
        remove_defs: false,
        remove_metadata: false,
        remove_empty_attrs: false,
        convert_colors: false,
        target_size: None,
    }
}

/// Everything switched off re-emits the markup unchanged.
#[test]
fn test_unoptimized_roundtrip() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <!-- keep me -->
  <metadata>generator</metadata>
  <g fill="#ABC" class="">
    <path d="M0 0h24v24H0z"/>
  </g>
</svg>"##;

    let result = process(svg, &all_off());
    assert_eq!(result.svg(), Some(svg));
}

/// Default options remove comments and metadata and minify.
#[test]
fn test_default_options() {
    let svg = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1" viewBox="0 0 24 24">
  <!-- Generator: Sketch -->
  <metadata>generator</metadata>
  <defs><linearGradient id="a"/></defs>
  <g style="fill: red; stroke: none">
    <path d="M0 0h24v24H0z"/>
  </g>
</svg>"#;

    let result = process(svg, &ProcessingOptions::default());
    assert_eq!(
        result.svg(),
        Some(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><defs><linearGradient id="a"/></defs><g style="fill:red;stroke:none"><path d="M0 0h24v24H0z"/></g></svg>"#
        )
    );

    let stats = result.stats().unwrap();
    assert_eq!(stats.paths, 1);
    assert_eq!(stats.groups, 1);
    assert_eq!(stats.original_size, result.svg().unwrap().len());
}

/// Every stage enabled at once.
#[test]
fn test_all_stages() {
    let svg = r#"<svg viewBox="0 0 50 100" id="">
  <metadata/>
  <defs><clipPath id="c"/></defs>
  <path fill="white" stroke="" d="M0 0"/>
</svg>"#;
    let options = ProcessingOptions {
        remove_defs: true,
        remove_empty_attrs: true,
        convert_colors: true,
        target_size: Some(20.0),
        ..ProcessingOptions::default()
    };

    let result = process(svg, &options);
    assert_eq!(
        result.svg(),
        Some(r##"<svg viewBox="0 0 50 100" width="10" height="20"><path fill="#ffffff" d="M0 0"/></svg>"##)
    );
}

/// Faults inside a stage become failures carrying the input.
#[test]
fn test_stage_failures() {
    let svg = r#"<svg><path fill="nonsense"/></svg>"#;

    let colors = ProcessingOptions {
        convert_colors: true,
        ..ProcessingOptions::default()
    };
    match process(svg, &colors) {
        ProcessingResult::Failure {
            error: SvgError::ColorResolution { value, .. },
            original_svg,
        } => {
            assert_eq!(value, "nonsense");
            assert_eq!(original_svg, svg);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let resize = ProcessingOptions {
        target_size: Some(16.0),
        ..ProcessingOptions::default()
    };
    assert!(matches!(
        process(svg, &resize).error(),
        Some(SvgError::MissingViewBox)
    ));
}

/// The component generator on a small icon.
#[test]
fn test_component_generation() {
    let out = generate_component(r#"<svg class="icon-a"><path d="M0 0"/></svg>"#, "Icon1").unwrap();
    assert!(out.contains("className="));
    assert!(!out.contains("class="));
    assert!(out.contains("Icon1"));
    assert!(out.contains("<svg className={className}"));
}

#[test]
fn test_component_names() {
    assert_eq!(component_name(0), "Icon1");
    assert_eq!(component_name(4), "Icon5");
}

/// Processed markup feeds the generator.
#[test]
fn test_process_then_generate() {
    let raw = "<svg viewBox=\"0 0 16 16\">\n  <!-- x -->\n  <path stroke-width=\"2\" d=\"M1 1\"/>\n</svg>";
    let result = process(raw, &ProcessingOptions::default());
    let out = generate_component(result.svg().unwrap(), &component_name(2)).unwrap();
    assert!(out.contains("function Icon3("));
    assert!(out.contains(r#"<svg className={className} viewBox="0 0 16 16"><path strokeWidth="2" d="M1 1"/></svg>"#));
}

fn markup() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r#"[<>!?a-z =":;/\t\n-]{0,80}"#).unwrap()
}

fn non_svg_markup() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex(r"[a-z0-9 .,]{0,40}").unwrap(),
        proptest::string::string_regex(r"(<(div|p|g|path|span)/>){1,4}").unwrap(),
        proptest::string::string_regex(r"<div>(<p/>|text){0,3}</div>").unwrap(),
    ]
}

proptest! {
    #[test]
    fn prop_optimize_is_idempotent(m in markup()) {
        let once = optimize_markup(&m);
        prop_assert_eq!(optimize_markup(&once), once);
    }

    #[test]
    fn prop_optimized_svg_reparses(w in 1u32..500, h in 1u32..500) {
        let svg = format!("<svg viewBox=\"0 0 {w} {h}\">\n  <!-- c -->\n  <g>\n    <rect width=\"{w}\" height=\"{h}\"/>\n  </g>\n</svg>");
        let result = process(&svg, &ProcessingOptions::default());
        let out = result.svg().unwrap();
        prop_assert!(parse_svg(out).is_ok());
        prop_assert_eq!(optimize_markup(out), out);
    }

    #[test]
    fn prop_missing_svg_is_invalid(m in non_svg_markup()) {
        match process(&m, &ProcessingOptions::default()) {
            ProcessingResult::Failure { error, original_svg } => {
                prop_assert_eq!(error.to_string(), "Invalid SVG");
                prop_assert_eq!(original_svg, m);
            }
            other => prop_assert!(false, "expected failure, got {:?}", other),
        }
    }

    #[test]
    fn prop_resize_preserves_aspect(w in 1u32..2000, h in 1u32..2000, t in 1u32..1024) {
        let svg = format!(r#"<svg viewBox="0 0 {w} {h}"/>"#);
        let options = ProcessingOptions { target_size: Some(f64::from(t)), ..all_off() };
        let result = process(&svg, &options);
        let doc = parse_svg(result.svg().unwrap()).unwrap();
        let width: f64 = doc.root.get_attr("width").unwrap().parse().unwrap();
        let height: f64 = doc.root.get_attr("height").unwrap().parse().unwrap();
        let (w, h, t) = (f64::from(w), f64::from(h), f64::from(t));

        if w >= h {
            prop_assert_eq!(width, t);
            prop_assert!((height - t * h / w).abs() <= 1e-9 * t);
        } else {
            prop_assert_eq!(height, t);
            prop_assert!((width - t * w / h).abs() <= 1e-9 * t);
        }
    }
}
