//! Fenestrations and the placement validator.
//!
//! A [`FenestrationSet`] can only grow through [`FenestrationSet::try_add`],
//! which enforces the value ranges of the active template and the minimum
//! axial spacing between openings. Every operation returns a new set and
//! leaves the receiver untouched, so a rejected entry never disturbs the
//! current plan.
//!
//! The spacing rule compares axial distances only. Two openings at the same
//! height on opposite sides of the graft are rejected even though they would
//! not physically overlap. Tightening this to a 2D distance would change
//! which placements are accepted, so the 1D rule is kept as is.

use crate::angle::check_degrees;
use crate::catalog::GraftTemplate;
use graftmark_core::{CollisionError, Error, IndexError, RangeError, Result, Vessel};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One planned opening in the graft wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fenestration {
    /// Target branch vessel
    pub vessel: Vessel,
    /// Distance from the proximal end (mm)
    pub axial_distance: f64,
    /// Canonical angle from the anterior aspect (degrees, [0, 360))
    pub angle_degrees: f64,
    /// Hole diameter (mm)
    pub hole_diameter: f64,
}

impl Fenestration {
    /// Creates a fenestration from an already-resolved canonical angle.
    ///
    /// Only the angle is checked here; distance and diameter bounds depend
    /// on the template and are enforced when the entry joins a set.
    pub fn new(
        vessel: Vessel,
        axial_distance: f64,
        angle_degrees: f64,
        hole_diameter: f64,
    ) -> Result<Self> {
        let angle_degrees = check_degrees(angle_degrees)?;
        Ok(Self {
            vessel,
            axial_distance,
            angle_degrees,
            hole_diameter,
        })
    }

    /// Hole radius (mm)
    pub fn radius(&self) -> f64 {
        self.hole_diameter / 2.0
    }
}

/// Placement bounds applied by the validator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Minimum axial separation between any two openings (mm)
    pub min_spacing: f64,
    /// Smallest allowed hole diameter (mm)
    pub min_hole_diameter: f64,
    /// Largest allowed hole diameter (mm)
    pub max_hole_diameter: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_spacing: 4.0,
            min_hole_diameter: 4.0,
            max_hole_diameter: 12.0,
        }
    }
}

impl ValidationLimits {
    /// Checks that the limits themselves are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_spacing.is_finite() && self.min_spacing >= 0.0) {
            return Err(Error::other(format!(
                "Minimum spacing must be >= 0, got {}",
                self.min_spacing
            )));
        }
        if !(self.min_hole_diameter.is_finite() && self.min_hole_diameter > 0.0) {
            return Err(Error::other(format!(
                "Minimum hole diameter must be > 0, got {}",
                self.min_hole_diameter
            )));
        }
        if !(self.max_hole_diameter.is_finite() && self.max_hole_diameter >= self.min_hole_diameter)
        {
            return Err(Error::other(format!(
                "Maximum hole diameter {} is below minimum {}",
                self.max_hole_diameter, self.min_hole_diameter
            )));
        }
        Ok(())
    }
}

/// Ordered collection of accepted fenestrations
///
/// Order is display order only. Serialize-only: a set can be built solely
/// through [`FenestrationSet::try_add`], which keeps the spacing invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FenestrationSet {
    members: Vec<Fenestration>,
}

impl FenestrationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Fenestration> {
        self.members.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fenestration> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[Fenestration] {
        &self.members
    }

    /// Checks a candidate against the template bounds and current members.
    pub fn check_candidate(
        &self,
        template: &GraftTemplate,
        candidate: &Fenestration,
        limits: &ValidationLimits,
    ) -> Result<()> {
        let d = candidate.axial_distance;
        if !(d.is_finite() && (0.0..=template.length).contains(&d)) {
            return Err(RangeError::AxialDistance {
                value: d,
                min: 0.0,
                max: template.length,
            }
            .into());
        }

        let hole = candidate.hole_diameter;
        if !(hole.is_finite()
            && hole > 0.0
            && (limits.min_hole_diameter..=limits.max_hole_diameter).contains(&hole))
        {
            return Err(RangeError::HoleDiameter {
                value: hole,
                min: limits.min_hole_diameter,
                max: limits.max_hole_diameter,
            }
            .into());
        }

        // Axial distance only; angular separation is deliberately ignored
        for (index, existing) in self.members.iter().enumerate() {
            let separation = (existing.axial_distance - d).abs();
            if separation < limits.min_spacing {
                return Err(CollisionError {
                    candidate: candidate.vessel.to_string(),
                    candidate_distance: d,
                    existing: existing.vessel.to_string(),
                    existing_distance: existing.axial_distance,
                    existing_index: index,
                    separation,
                    min_spacing: limits.min_spacing,
                }
                .into());
            }
        }

        Ok(())
    }

    /// Returns a new set with the candidate appended, or the violated
    /// constraint. `self` is never modified.
    pub fn try_add(
        &self,
        template: &GraftTemplate,
        candidate: Fenestration,
        limits: &ValidationLimits,
    ) -> Result<Self> {
        if let Err(e) = self.check_candidate(template, &candidate, limits) {
            warn!("Rejected {} fenestration: {}", candidate.vessel, e);
            return Err(e);
        }
        info!(
            "Accepted {} fenestration at {}mm, {}°, Ø{}mm",
            candidate.vessel, candidate.axial_distance, candidate.angle_degrees, candidate.hole_diameter
        );
        let mut members = self.members.clone();
        members.push(candidate);
        Ok(Self { members })
    }

    /// Returns a new set without the member at `index`.
    ///
    /// Removal can only widen gaps, so no spacing check is repeated.
    pub fn remove(&self, index: usize) -> std::result::Result<Self, IndexError> {
        if index >= self.members.len() {
            return Err(IndexError {
                index,
                len: self.members.len(),
            });
        }
        let mut members = self.members.clone();
        let removed = members.remove(index);
        info!(
            "Removed {} fenestration at {}mm",
            removed.vessel, removed.axial_distance
        );
        Ok(Self { members })
    }
}

impl<'a> IntoIterator for &'a FenestrationSet {
    type Item = &'a Fenestration;
    type IntoIter = std::slice::Iter<'a, Fenestration>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
