//! Boundary operations for UI and export collaborators.
//!
//! Thin, stateless entry points over the catalog, resolver, validator and
//! pattern builder. Callers that want session bookkeeping use
//! [`crate::PlanningSession`] instead.

use crate::angle;
use crate::catalog::{GraftCatalog, GraftTemplate};
use crate::fenestration::{Fenestration, FenestrationSet, ValidationLimits};
use crate::layout::LayoutConfig;
use crate::pattern::{self, Pattern, PatternOptions};
use graftmark_core::{AngleConvention, AngleError, IndexError, Result, Vessel, YOrientation};

/// Built-in graft templates.
pub fn list_templates() -> Vec<GraftTemplate> {
    GraftCatalog::builtin().list().to_vec()
}

/// Canonical angle for a clock hour.
pub fn resolve_angle(hour: u8, anterior_hour: u8) -> std::result::Result<f64, AngleError> {
    angle::resolve_angle(hour, anterior_hour)
}

/// Nearest clock hour for a canonical angle.
pub fn angle_to_hour(angle_degrees: f64, anterior_hour: u8) -> std::result::Result<u8, AngleError> {
    angle::angle_to_hour(angle_degrees, anterior_hour)
}

/// Validates a new entry against the template and set; returns the grown set.
pub fn validate_and_add(
    set: &FenestrationSet,
    template: &GraftTemplate,
    vessel: Vessel,
    axial_distance: f64,
    angle_degrees: f64,
    hole_diameter: f64,
    limits: &ValidationLimits,
) -> Result<FenestrationSet> {
    let candidate = Fenestration::new(vessel, axial_distance, angle_degrees, hole_diameter)?;
    set.try_add(template, candidate, limits)
}

/// Returns the set without the entry at `index`.
pub fn remove_at(set: &FenestrationSet, index: usize) -> std::result::Result<FenestrationSet, IndexError> {
    set.remove(index)
}

/// Computes the pattern with the default layout.
///
/// `convention` carries the centering mode together with the anterior hour
/// the set's angles were resolved under, so captions and labels match them.
pub fn compute_pattern(
    template: &GraftTemplate,
    set: &FenestrationSet,
    convention: AngleConvention,
    orientation: YOrientation,
) -> Result<Pattern> {
    let options = PatternOptions::new(convention, orientation);
    Ok(pattern::compute_pattern(
        template,
        set,
        &options,
        &LayoutConfig::default(),
    )?)
}
