//! Cylindrical to planar mapping.
//!
//! The graft surface is cut along a seam and unrolled into the rectangle
//! `[0, C) × [0, length]`. The seam is the one place where the mapping is not
//! injective: both vertical edges are the same physical line. Points exactly
//! on the seam are always placed on the left edge (x = 0).

use crate::angle::check_degrees;
use crate::catalog::GraftTemplate;
use graftmark_core::units::MM_EPSILON;
use graftmark_core::{CenteringMode, InvariantViolation, Point, YOrientation};
use serde::{Deserialize, Serialize};

/// Maps (canonical angle, axial distance) to pattern coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    circumference: f64,
    length: f64,
    centering: CenteringMode,
    orientation: YOrientation,
}

impl CoordinateMapper {
    /// Creates a mapper for a template under the given conventions.
    pub fn new(template: &GraftTemplate, centering: CenteringMode, orientation: YOrientation) -> Self {
        debug_assert!(
            template.diameter.is_finite() && template.diameter > 0.0,
            "diameter must be positive and finite, got {}",
            template.diameter
        );
        debug_assert!(
            template.length.is_finite() && template.length > 0.0,
            "length must be positive and finite, got {}",
            template.length
        );
        Self {
            circumference: template.circumference(),
            length: template.length,
            centering,
            orientation,
        }
    }

    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn centering(&self) -> CenteringMode {
        self.centering
    }

    pub fn orientation(&self) -> YOrientation {
        self.orientation
    }

    /// Horizontal position of a canonical angle.
    ///
    /// The angle must already be resolved into [0, 360); anything else is a
    /// defect upstream of the mapper.
    pub fn map_x(&self, angle_degrees: f64) -> Result<f64, InvariantViolation> {
        let angle = check_degrees(angle_degrees).map_err(|_| {
            InvariantViolation::new(format!(
                "unresolved angle {}° reached the coordinate mapper",
                angle_degrees
            ))
        })?;
        // Measured from the seam, which sits at x = 0
        let from_seam = (angle - self.centering.seam_angle() + 360.0) % 360.0;
        let x = from_seam / 360.0 * self.circumference;
        // Float noise next to the right edge belongs to the seam
        if self.circumference - x < MM_EPSILON {
            Ok(0.0)
        } else {
            Ok(x)
        }
    }

    /// Vertical position of an axial distance measured from the proximal end.
    pub fn map_y(&self, axial_distance: f64) -> Result<f64, InvariantViolation> {
        if !(axial_distance.is_finite() && (0.0..=self.length).contains(&axial_distance)) {
            return Err(InvariantViolation::new(format!(
                "axial distance {}mm outside graft length {}mm reached the coordinate mapper",
                axial_distance, self.length
            )));
        }
        Ok(self.axial_to_y(axial_distance))
    }

    /// Vertical position without range checks, for annotations that sit
    /// beyond the graft ends.
    pub fn axial_to_y(&self, axial_distance: f64) -> f64 {
        match self.orientation {
            YOrientation::DistalDown => axial_distance,
            YOrientation::ProximalDown => self.length - axial_distance,
        }
    }

    /// y coordinate of the proximal end.
    pub fn proximal_y(&self) -> f64 {
        self.axial_to_y(0.0)
    }

    /// y coordinate of the distal end.
    pub fn distal_y(&self) -> f64 {
        self.axial_to_y(self.length)
    }

    /// Maps a surface position to the unrolled pattern.
    pub fn map(&self, angle_degrees: f64, axial_distance: f64) -> Result<Point, InvariantViolation> {
        Ok(Point::new(
            self.map_x(angle_degrees)?,
            self.map_y(axial_distance)?,
        ))
    }

    /// Horizontal position of the anterior aspect (0°).
    pub fn anterior_x(&self) -> f64 {
        match self.centering {
            CenteringMode::Edge => 0.0,
            CenteringMode::Center => self.circumference / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_a() -> GraftTemplate {
        GraftTemplate::new("device-a", "Device A", 24.0, 145.0).unwrap()
    }

    #[test]
    fn test_edge_mode_puts_anterior_on_left_edge() {
        let m = CoordinateMapper::new(&device_a(), CenteringMode::Edge, YOrientation::DistalDown);
        assert_eq!(m.map_x(0.0).unwrap(), 0.0);
        assert!((m.map_x(180.0).unwrap() - m.circumference() / 2.0).abs() < 1e-9);
        assert!((m.map_x(90.0).unwrap() - m.circumference() / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_mode_puts_anterior_in_middle() {
        let m = CoordinateMapper::new(&device_a(), CenteringMode::Center, YOrientation::DistalDown);
        let x = m.map_x(0.0).unwrap();
        assert!((x - 37.70).abs() < 0.01);
        assert_eq!(x, m.anterior_x());
        // Seam sits at 180° and is assigned to the left edge
        assert_eq!(m.map_x(180.0).unwrap(), 0.0);
    }

    #[test]
    fn test_orientations() {
        let t = device_a();
        let down = CoordinateMapper::new(&t, CenteringMode::Edge, YOrientation::DistalDown);
        let up = CoordinateMapper::new(&t, CenteringMode::Edge, YOrientation::ProximalDown);
        assert_eq!(down.map_y(50.0).unwrap(), 50.0);
        assert_eq!(up.map_y(50.0).unwrap(), 95.0);
        assert_eq!(down.proximal_y(), 0.0);
        assert_eq!(up.proximal_y(), 145.0);
        assert_eq!(up.distal_y(), 0.0);
    }

    #[test]
    fn test_unresolved_values_are_invariant_violations() {
        let m = CoordinateMapper::new(&device_a(), CenteringMode::Edge, YOrientation::DistalDown);
        assert!(m.map_x(360.0).is_err());
        assert!(m.map_x(-0.5).is_err());
        assert!(m.map_y(145.5).is_err());
        assert!(m.map_y(f64::NAN).is_err());
        assert!(m.map(10.0, 145.0).is_ok());
    }

    #[test]
    fn test_seam_angle_maps_to_left_edge_in_both_modes() {
        for centering in [CenteringMode::Edge, CenteringMode::Center] {
            let m = CoordinateMapper::new(&device_a(), centering, YOrientation::DistalDown);
            assert_eq!(m.map_x(centering.seam_angle()).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_x_stays_inside_half_open_width() {
        let m = CoordinateMapper::new(&device_a(), CenteringMode::Center, YOrientation::DistalDown);
        let x = m.map_x(179.999_999_999_999).unwrap();
        assert!(x >= 0.0 && x < m.circumference());
    }
}
