// SVG and JSON export tests
// Renders real planner patterns and checks the documents that come out.

use graftmark_core::units::format_coord;
use graftmark_core::{AngleConvention, CenteringMode, Vessel, YOrientation};
use graftmark_export::{
    export_to_file, ExportError, JsonExporter, PageSize, PatternRenderer, SvgMode, SvgRenderer,
};
use graftmark_planner::{
    AngleInput, GraftCatalog, GraftTemplate, LayoutConfig, Pattern, PatternOptions, PlanningSession,
    ValidationLimits,
};

fn planned_pattern(template_id: &str) -> Pattern {
    let template = GraftCatalog::builtin().lookup(template_id).unwrap().clone();
    planned_on(template)
}

fn planned_on(template: GraftTemplate) -> Pattern {
    let mut session = PlanningSession::new(
        template,
        PatternOptions::new(
            AngleConvention::new(12, CenteringMode::Center).unwrap(),
            YOrientation::ProximalDown,
        ),
        ValidationLimits::default(),
        LayoutConfig::default(),
    )
    .unwrap();
    session.add(Vessel::CeliacTrunk, 30.0, AngleInput::Hour(12), 8.0).unwrap();
    session.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();
    session.add(Vessel::RightRenal, 70.0, AngleInput::Hour(9), 6.0).unwrap();
    session.pattern().clone()
}

#[test]
fn test_print_document_is_millimetre_scaled() {
    let pattern = planned_pattern("device-a");
    let renderer = SvgRenderer::print(15.0);
    let svg = renderer.render(&pattern).unwrap();

    let (w, h) = renderer.document_size(&pattern);
    assert!(svg.contains(&format!(
        "width=\"{}mm\" height=\"{}mm\" viewBox=\"0 0 {} {}\"",
        format_coord(w),
        format_coord(h),
        format_coord(w),
        format_coord(h)
    )));
    assert!(svg.contains("<title>UNROLLED GRAFT 24mm × 145mm | Scale 1:1</title>"));
    assert!(svg.contains(&format!(
        "width=\"{}\" height=\"{}\"",
        format_coord(pattern.width),
        format_coord(pattern.height)
    )));
    assert!(!svg.contains("id=\"grid\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_fenestrations_use_pattern_coordinates() {
    let pattern = planned_pattern("device-a");
    let svg = SvgRenderer::print(10.0).render(&pattern).unwrap();

    for mark in &pattern.fenestrations {
        assert!(svg.contains(&format!(
            "<circle id=\"fenestration-{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
            mark.index,
            format_coord(mark.center.x),
            format_coord(mark.center.y),
            format_coord(mark.radius),
            mark.color
        )));
    }
    // SMA at 12 o'clock sits on the centre line, 50mm from proximal
    assert!(svg.contains("cx=\"37.699\" cy=\"95.000\" r=\"3.000\""));
    assert!(svg.contains("Ø6mm @50mm"));
}

#[test]
fn test_preview_adds_grid_only() {
    let pattern = planned_pattern("device-b");
    let preview = SvgRenderer::preview(15.0);
    let print = SvgRenderer::print(15.0);
    assert_eq!(preview.mode(), SvgMode::Preview);

    let preview_svg = preview.render(&pattern).unwrap();
    let print_svg = print.render(&pattern).unwrap();
    assert!(preview_svg.contains("<path id=\"grid\""));
    assert_eq!(preview.offset(&pattern), print.offset(&pattern));

    let without_grid: String = preview_svg
        .lines()
        .filter(|line| !line.starts_with("<path id=\"grid\""))
        .map(|line| format!("{line}\n"))
        .collect();
    assert_eq!(without_grid, print_svg);
}

#[test]
fn test_page_overflow_is_reported() {
    let long_graft = GraftTemplate::new("long", "Long trial graft", 40.0, 260.0).unwrap();
    let pattern = planned_on(long_graft);
    let err = SvgRenderer::print(15.0)
        .with_page(PageSize::A4)
        .render(&pattern)
        .unwrap_err();
    assert!(matches!(err, ExportError::PageOverflow { .. }));

    let small = planned_pattern("device-a");
    assert!(SvgRenderer::print(15.0)
        .with_page(PageSize::A4)
        .render(&small)
        .is_ok());
}

#[test]
fn test_negative_margin_rejected() {
    let pattern = planned_pattern("device-a");
    let err = SvgRenderer::print(-1.0).render(&pattern).unwrap_err();
    assert!(matches!(err, ExportError::InvalidOption { .. }));
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = planned_pattern("device-a");

    let svg_path = dir.path().join("pattern.svg");
    export_to_file(&SvgRenderer::print(15.0).with_timestamp(true), &pattern, &svg_path).unwrap();
    let written = std::fs::read_to_string(&svg_path).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(written.contains("generated "));

    let json_path = dir.path().join("pattern.json");
    let renderer: Box<dyn PatternRenderer> = Box::new(JsonExporter::pretty());
    assert_eq!(renderer.extension(), "json");
    export_to_file(renderer.as_ref(), &pattern, &json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["template"]["id"], "device-a");
    assert_eq!(value["fenestrations"].as_array().unwrap().len(), 3);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = planned_pattern("device-a");
    let path = dir.path().join("missing").join("pattern.svg");
    let err = export_to_file(&SvgRenderer::print(15.0), &pattern, &path).unwrap_err();
    assert!(matches!(err, ExportError::IoError(_)));
}
