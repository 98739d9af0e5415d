//! The unrolled pattern.
//!
//! A [`Pattern`] is the only artifact handed to renderers and exporters. It is
//! a pure function of the template, the fenestration set, the conventions and
//! the layout configuration, and is always rebuilt from scratch.

use crate::angle::{angle_to_hour, clock_caption};
use crate::catalog::GraftTemplate;
use crate::fenestration::{Fenestration, FenestrationSet};
use crate::layout::{compute_layout, Label, Layout, LayoutConfig, TextAlign};
use crate::mapper::CoordinateMapper;
use graftmark_core::units::format_mm;
use graftmark_core::{AngleConvention, Bounds, InvariantViolation, Point, Vessel, YOrientation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gap between a hole's rim and its caption (mm)
const CAPTION_GAP: f64 = 3.0;

/// A fenestration placed in pattern space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenestrationMark {
    /// Position in the fenestration set
    pub index: usize,
    pub vessel: Vessel,
    /// Fill color (CSS hex)
    pub color: String,
    pub axial_distance: f64,
    pub angle_degrees: f64,
    /// Clock hour under the pattern's anterior convention
    pub clock_hour: u8,
    pub hole_diameter: f64,
    /// Hole centre (mm)
    pub center: Point,
    /// Hole radius (mm)
    pub radius: f64,
    /// Short vessel label drawn inside the hole
    pub label: Label,
    /// Caption lines drawn below the hole
    pub caption: Vec<Label>,
}

/// Conventions a pattern is computed under
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternOptions {
    pub convention: AngleConvention,
    pub orientation: YOrientation,
}

impl PatternOptions {
    pub fn new(convention: AngleConvention, orientation: YOrientation) -> Self {
        Self {
            convention,
            orientation,
        }
    }
}

/// Flat geometric description of the unrolled graft, in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub template: GraftTemplate,
    /// Circumference (mm)
    pub width: f64,
    /// Graft length (mm)
    pub height: f64,
    pub options: PatternOptions,
    /// x of the anterior aspect (mm)
    pub anterior_x: f64,
    /// e.g. "UNROLLED GRAFT 24mm × 145mm | Scale 1:1"
    pub title: String,
    /// e.g. "12 o'clock (anterior) at CENTER"
    pub convention_label: String,
    pub layout: Layout,
    pub fenestrations: Vec<FenestrationMark>,
    /// Extent of everything in the pattern, labels included
    pub bounds: Bounds,
}

impl Pattern {
    /// Graft outline rectangle.
    pub fn outline(&self) -> Bounds {
        self.layout.outline
    }

    /// Looks up the mark for a vessel, if planned.
    pub fn mark_for(&self, vessel: Vessel) -> Option<&FenestrationMark> {
        self.fenestrations.iter().find(|m| m.vessel == vessel)
    }
}

fn place_fenestration(
    index: usize,
    fenestration: &Fenestration,
    mapper: &CoordinateMapper,
    options: &PatternOptions,
    config: &LayoutConfig,
) -> Result<FenestrationMark, InvariantViolation> {
    debug_assert!(
        fenestration.hole_diameter.is_finite() && fenestration.hole_diameter > 0.0,
        "hole_diameter must be positive and finite, got {}",
        fenestration.hole_diameter
    );
    let center = mapper.map(fenestration.angle_degrees, fenestration.axial_distance)?;
    let clock_hour = angle_to_hour(
        fenestration.angle_degrees,
        options.convention.anterior_hour,
    )
    .map_err(|e| InvariantViolation::new(format!("clock hour for mark {}: {}", index, e)))?;
    let radius = fenestration.radius();
    let font = config.label_font_size;

    let caption_y = center.y + radius + CAPTION_GAP;
    let caption = vec![
        Label::new(
            format!(
                "Ø{}mm @{}mm",
                format_mm(fenestration.hole_diameter),
                format_mm(fenestration.axial_distance)
            ),
            Point::new(center.x, caption_y),
            TextAlign::Middle,
            font,
        ),
        Label::new(
            clock_caption(clock_hour),
            Point::new(center.x, caption_y + font * 1.2),
            TextAlign::Middle,
            font,
        ),
    ];

    Ok(FenestrationMark {
        index,
        vessel: fenestration.vessel,
        color: fenestration.vessel.color().to_string(),
        axial_distance: fenestration.axial_distance,
        angle_degrees: fenestration.angle_degrees,
        clock_hour,
        hole_diameter: fenestration.hole_diameter,
        center,
        radius,
        label: Label::new(
            fenestration.vessel.short_label(),
            center,
            TextAlign::Middle,
            font,
        ),
        caption,
    })
}

/// Computes the full pattern.
///
/// Fails only on an internal inconsistency: a template, convention or layout
/// that never passed validation, or a set validated against a longer
/// template than the one passed here.
pub fn compute_pattern(
    template: &GraftTemplate,
    set: &FenestrationSet,
    options: &PatternOptions,
    config: &LayoutConfig,
) -> Result<Pattern, InvariantViolation> {
    template
        .validate()
        .map_err(|e| InvariantViolation::new(format!("unvalidated template: {}", e)))?;
    config
        .validate()
        .map_err(|e| InvariantViolation::new(format!("unvalidated layout: {}", e)))?;
    AngleConvention::new(options.convention.anterior_hour, options.convention.centering)
        .map_err(|e| InvariantViolation::new(format!("unvalidated convention: {}", e)))?;

    let mapper = CoordinateMapper::new(
        template,
        options.convention.centering,
        options.orientation,
    );
    let layout = compute_layout(template, &mapper, config);

    let fenestrations = set
        .iter()
        .enumerate()
        .map(|(i, f)| place_fenestration(i, f, &mapper, options, config))
        .collect::<Result<Vec<_>, _>>()?;

    let mut bounds = layout.bounds();
    for mark in &fenestrations {
        bounds.include_circle(mark.center, mark.radius);
        for line in &mark.caption {
            bounds.include_bounds(&line.estimated_bounds());
        }
    }

    debug!(
        "Computed pattern for {} with {} fenestration(s) ({}, {})",
        template.id,
        fenestrations.len(),
        options.convention.centering,
        options.orientation
    );

    Ok(Pattern {
        template: template.clone(),
        width: mapper.circumference(),
        height: template.length,
        options: *options,
        anterior_x: mapper.anterior_x(),
        title: format!(
            "UNROLLED GRAFT {} | Scale 1:1",
            template.dimensions_label()
        ),
        convention_label: options.convention.label(),
        layout,
        fenestrations,
        bounds,
    })
}
