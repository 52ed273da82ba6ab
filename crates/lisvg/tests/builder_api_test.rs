//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public pipeline the way a library user would.

use lisvg::{DiagramBuilder, LisvgError, config::AppConfig, direction::Direction};

const PIPELINE: &str = r##"
    (diagram
      (size 640 480)
      (node-style :fill "#eef" :stroke navy)
      (edge-style :stroke-dasharray "4 2")
      (nodes
        (id web :label "Web Server" :shape rect)
        (id db :label "Database" :shape ellipse)
        (id cache :shape diamond))
      (edges
        (web db :label "SQL")
        (web cache)))
"##;

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_simple_diagram() {
    let builder = DiagramBuilder::default();
    let result = builder.parse(PIPELINE);
    assert!(
        result.is_ok(),
        "Should parse valid diagram: {:?}",
        result.err()
    );

    let diagram = result.unwrap();
    assert_eq!((diagram.width, diagram.height), (640, 480));
    assert_eq!(diagram.nodes.len(), 3);
    assert_eq!(diagram.edges.len(), 2);
}

#[test]
fn test_render_simple_diagram() {
    let builder = DiagramBuilder::default();
    let diagram = builder.parse(PIPELINE).expect("Failed to parse diagram");
    let svg = builder.render_svg(&diagram).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Web Server"));
    assert!(svg.contains("SQL"));
    assert!(svg.contains("fill: #eef;"));
    assert!(svg.contains("stroke-dasharray: 4 2;"));
}

#[test]
fn test_compile_runs_whole_pipeline() {
    let builder = DiagramBuilder::default();
    let compiled = builder.compile(PIPELINE).expect("Failed to compile");

    let diagram = builder.parse(PIPELINE).unwrap();
    let rendered = builder.render_svg(&diagram).unwrap();
    assert_eq!(compiled, rendered);
}

#[test]
fn test_parse_invalid_syntax_returns_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse("(diagram (size 10 abc))");

    let Err(LisvgError::Parse { err, src }) = result else {
        panic!("Should return a parse error");
    };
    assert_eq!(src, "(diagram (size 10 abc))");
    assert_eq!(err.diagnostics().len(), 1);
}

#[test]
fn test_validation_reports_every_problem() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .parse("(diagram (nodes (id a :shape star) (id a)) (edges (a ghost)))")
        .unwrap();

    let Err(LisvgError::Validation(errors)) = builder.validate(&diagram) else {
        panic!("Should return validation errors");
    };
    assert_eq!(errors.len(), 3);
    assert!(errors.to_string().starts_with("validation failed with 3 errors: "));
}

#[test]
fn test_empty_diagram_uses_declared_size() {
    let builder = DiagramBuilder::default();
    let diagram = builder.parse("(diagram (size 300 100))").unwrap();

    let layout = builder.layout(&diagram);
    assert!(layout.nodes.is_empty());
    assert_eq!((layout.width, layout.height), (300.0, 100.0));

    let svg = builder.render_svg(&diagram).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 340 140""#));
}

#[test]
fn test_directive_overrides_configured_direction() {
    let source = "(diagram (direction left-to-right) (nodes (id a) (id b)) (edges (a b)))";
    let builder = DiagramBuilder::new(AppConfig::default().with_direction(Direction::BottomToTop));

    let layout = builder.layout(&builder.parse(source).unwrap());
    let (a, b) = (layout.node("a").unwrap(), layout.node("b").unwrap());
    assert!(a.x() < b.x());
    assert_eq!(a.y(), b.y());

    assert_eq!(builder.config().layout().direction(), Direction::BottomToTop);
}

#[test]
fn test_configured_direction_applies_without_directive() {
    let source = "(diagram (nodes (id a) (id b)) (edges (a b)))";
    let builder = DiagramBuilder::new(AppConfig::default().with_direction(Direction::BottomToTop));

    let layout = builder.layout(&builder.parse(source).unwrap());
    assert!(layout.node("a").unwrap().y() < layout.node("b").unwrap().y());
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let svg1 = builder
        .compile("(diagram (nodes (id app1)))")
        .expect("Failed to render diagram1");
    let svg2 = builder
        .compile("(diagram (nodes (id app2 :shape ellipse)))")
        .expect("Failed to render diagram2");

    assert!(svg1.contains("app1") && !svg1.contains("app2"));
    assert!(svg2.contains("app2") && !svg2.contains("app1"));
}
