// Pattern Integration Tests
// End-to-end planning scenarios: catalog lookup, angle resolution,
// validation and pattern computation through the public API.

use graftmark_core::{AngleConvention, CenteringMode, Vessel, YOrientation};
use graftmark_planner::{
    compute_pattern, AngleInput, GraftCatalog, LayoutConfig, PatternOptions, PlanningSession,
    ValidationLimits,
};

fn session(centering: CenteringMode, orientation: YOrientation, anterior: u8) -> PlanningSession {
    let template = GraftCatalog::builtin().lookup("device-a").unwrap().clone();
    PlanningSession::new(
        template,
        PatternOptions::new(AngleConvention::new(anterior, centering).unwrap(), orientation),
        ValidationLimits::default(),
        LayoutConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_sma_at_twelve_centered() {
    for (orientation, expected_y) in [
        (YOrientation::DistalDown, 50.0),
        (YOrientation::ProximalDown, 95.0),
    ] {
        let mut s = session(CenteringMode::Center, orientation, 12);
        let pattern = s.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();

        let mark = &pattern.fenestrations[0];
        assert_eq!(mark.angle_degrees, 0.0);
        assert!((mark.center.x - pattern.width / 2.0).abs() < 1e-9);
        assert!((mark.center.x - 37.70).abs() < 0.01);
        assert_eq!(mark.center.y, expected_y);
        assert_eq!(mark.clock_hour, 12);
        assert_eq!(pattern.options.orientation, orientation);
    }
}

#[test]
fn test_six_o_clock_anterior_convention() {
    let mut s = session(CenteringMode::Edge, YOrientation::DistalDown, 6);
    let pattern = s.add(Vessel::Ima, 120.0, AngleInput::Hour(6), 6.0).unwrap();
    let mark = &pattern.fenestrations[0];
    assert_eq!(mark.angle_degrees, 0.0);
    assert_eq!(mark.center.x, 0.0);
    assert_eq!(mark.clock_hour, 6);
    assert_eq!(mark.caption[1].text, "6 o'clock");
    assert_eq!(pattern.convention_label, "6 o'clock (anterior) at LEFT EDGE");
}

#[test]
fn test_preview_and_print_share_one_pattern() {
    let mut s = session(CenteringMode::Center, YOrientation::ProximalDown, 12);
    s.add(Vessel::CeliacTrunk, 30.0, AngleInput::Hour(12), 8.0).unwrap();
    s.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();
    s.add(Vessel::RightRenal, 70.0, AngleInput::Hour(9), 6.0).unwrap();
    s.add(Vessel::LeftRenal, 75.0, AngleInput::Hour(3), 6.0).unwrap();

    let recomputed = compute_pattern(
        s.template(),
        s.fenestrations(),
        s.options(),
        &LayoutConfig::default(),
    )
    .unwrap();
    assert_eq!(&recomputed, s.pattern());

    // Marker lines and holes use the same vertical mapping
    let marker_60 = recomputed
        .layout
        .markers
        .iter()
        .find(|m| m.axial_distance == 60.0)
        .unwrap();
    assert_eq!(marker_60.line.start.y, 145.0 - 60.0);
    let lra = recomputed.mark_for(Vessel::LeftRenal).unwrap();
    assert_eq!(lra.center.y, 145.0 - 75.0);
}

#[test]
fn test_compute_pattern_is_idempotent() {
    let mut s = session(CenteringMode::Edge, YOrientation::DistalDown, 12);
    s.add(Vessel::Sma, 50.0, AngleInput::Degrees(15.0), 6.0).unwrap();
    let a = compute_pattern(s.template(), s.fenestrations(), s.options(), &LayoutConfig::default())
        .unwrap();
    let b = compute_pattern(s.template(), s.fenestrations(), s.options(), &LayoutConfig::default())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_pattern_serializes_for_external_renderers() {
    let mut s = session(CenteringMode::Center, YOrientation::DistalDown, 12);
    s.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();
    let json = serde_json::to_value(s.pattern()).unwrap();
    assert_eq!(json["options"]["convention"]["centering"], "center");
    assert_eq!(json["options"]["orientation"], "distal-down");
    assert_eq!(json["fenestrations"][0]["vessel"], "sma");
    assert_eq!(json["layout"]["calibration_bars"][0]["length"], 10.0);
}
