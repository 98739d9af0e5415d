//! Plain-text tables for the command line.

use graftmark_core::units::format_mm;
use graftmark_planner::{GraftTemplate, Pattern};
use std::fmt::Write;

/// Catalog listing, one template per row.
pub fn template_table(templates: &[GraftTemplate]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<24} {:>9} {:>9} {:>15}",
        "ID", "NAME", "DIAMETER", "LENGTH", "CIRCUMFERENCE"
    );
    for t in templates {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:>7}mm {:>7}mm {:>13.2}mm",
            t.id,
            t.name,
            format_mm(t.diameter),
            format_mm(t.length),
            t.circumference()
        );
    }
    out
}

/// Fenestration table with both the planned and the mapped positions.
pub fn fenestration_table(pattern: &Pattern) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", pattern.title);
    let _ = writeln!(
        out,
        "{} | {} | {}",
        pattern.template.name, pattern.convention_label, pattern.options.orientation
    );
    if pattern.fenestrations.is_empty() {
        let _ = writeln!(out, "(no fenestrations)");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>2} {:<5} {:>8} {:>6} {:>7} {:>6} {:>9} {:>9}",
        "#", "VESSEL", "AXIAL", "CLOCK", "ANGLE", "HOLE", "X", "Y"
    );
    for mark in &pattern.fenestrations {
        let _ = writeln!(
            out,
            "{:>2} {:<5} {:>6}mm {:>6} {:>6}° {:>4}mm {:>7.2}mm {:>7.2}mm",
            mark.index + 1,
            mark.vessel.short_label(),
            format_mm(mark.axial_distance),
            mark.clock_hour,
            format_mm(mark.angle_degrees),
            format_mm(mark.hole_diameter),
            mark.center.x,
            mark.center.y
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use graftmark_core::{AngleConvention, Vessel};
    use graftmark_planner::{api, GraftCatalog, ValidationLimits};

    #[test]
    fn test_template_table_lists_catalog() {
        let catalog = GraftCatalog::builtin();
        let table = template_table(catalog.list());
        assert_eq!(table.lines().count(), catalog.len() + 1);
        assert!(table.contains("device-a"));
        assert!(table.contains("75.40mm"));
    }

    #[test]
    fn test_fenestration_table_rows() {
        let template = GraftCatalog::builtin().lookup("device-a").unwrap().clone();
        let set = api::validate_and_add(
            &Default::default(),
            &template,
            Vessel::Sma,
            50.0,
            0.0,
            6.0,
            &ValidationLimits::default(),
        )
        .unwrap();
        let pattern = api::compute_pattern(
            &template,
            &set,
            AngleConvention::default(),
            Default::default(),
        )
        .unwrap();

        let table = fenestration_table(&pattern);
        assert!(table.starts_with("UNROLLED GRAFT 24mm × 145mm | Scale 1:1"));
        assert!(table.contains("SMA"));
        assert!(table.contains("37.70mm"));
        assert!(table.contains("95.00mm"));

        let empty = api::compute_pattern(
            &template,
            &Default::default(),
            AngleConvention::default(),
            Default::default(),
        )
        .unwrap();
        assert!(fenestration_table(&empty).contains("(no fenestrations)"));
    }
}
