//! Clock-hour resolution.
//!
//! Users place fenestrations by clock position. Downstream geometry works on a
//! canonical angle in degrees, measured from the anterior aspect, in [0, 360).

use graftmark_core::AngleError;
use serde::{Deserialize, Serialize};

/// Degrees covered by one clock hour
pub const DEGREES_PER_HOUR: f64 = 30.0;

/// Angular position as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleInput {
    /// Clock hour 1..=12
    Hour(u8),
    /// Canonical angle in degrees, for continuous inputs
    Degrees(f64),
}

impl AngleInput {
    /// Resolves the input to a canonical angle for the given anterior hour.
    pub fn resolve(self, anterior_hour: u8) -> Result<f64, AngleError> {
        match self {
            AngleInput::Hour(hour) => resolve_angle(hour, anterior_hour),
            AngleInput::Degrees(degrees) => {
                check_anterior_hour(anterior_hour)?;
                check_degrees(degrees)
            }
        }
    }
}

fn check_hour(hour: u8) -> Result<(), AngleError> {
    if (1..=12).contains(&hour) {
        Ok(())
    } else {
        Err(AngleError::HourOutOfRange {
            hour: i64::from(hour),
        })
    }
}

fn check_anterior_hour(hour: u8) -> Result<(), AngleError> {
    if (1..=12).contains(&hour) {
        Ok(())
    } else {
        Err(AngleError::AnteriorHourOutOfRange {
            hour: i64::from(hour),
        })
    }
}

/// Accepts finite angles in [0, 360) and returns them unchanged.
pub fn check_degrees(degrees: f64) -> Result<f64, AngleError> {
    if degrees.is_finite() && (0.0..360.0).contains(&degrees) {
        Ok(degrees)
    } else {
        Err(AngleError::DegreesOutOfRange { degrees })
    }
}

/// Canonical angle for a clock hour: `((hour - anterior) mod 12) × 30`.
///
/// The anterior hour always maps to 0°.
pub fn resolve_angle(hour: u8, anterior_hour: u8) -> Result<f64, AngleError> {
    check_hour(hour)?;
    check_anterior_hour(anterior_hour)?;
    let steps = (i32::from(hour) - i32::from(anterior_hour)).rem_euclid(12);
    Ok(f64::from(steps) * DEGREES_PER_HOUR)
}

/// Nearest clock hour for a canonical angle.
///
/// 0° is reported as the anterior hour itself, never as 0. Angles within
/// 15° below 360° round back to the anterior hour.
pub fn angle_to_hour(angle_degrees: f64, anterior_hour: u8) -> Result<u8, AngleError> {
    check_anterior_hour(anterior_hour)?;
    let degrees = check_degrees(angle_degrees)?;
    let steps = ((degrees / DEGREES_PER_HOUR).round() as i32).rem_euclid(12);
    let hour = (i32::from(anterior_hour) - 1 + steps).rem_euclid(12) + 1;
    Ok(hour as u8)
}

/// Caption for a clock hour, e.g. "3 o'clock".
pub fn clock_caption(hour: u8) -> String {
    format!("{} o'clock", hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anterior_hour_maps_to_zero() {
        for anterior in 1..=12 {
            assert_eq!(resolve_angle(anterior, anterior).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_resolve_with_twelve_anterior() {
        assert_eq!(resolve_angle(3, 12).unwrap(), 90.0);
        assert_eq!(resolve_angle(6, 12).unwrap(), 180.0);
        assert_eq!(resolve_angle(9, 12).unwrap(), 270.0);
        assert_eq!(resolve_angle(11, 12).unwrap(), 330.0);
    }

    #[test]
    fn test_resolve_with_six_anterior() {
        assert_eq!(resolve_angle(12, 6).unwrap(), 180.0);
        assert_eq!(resolve_angle(9, 6).unwrap(), 90.0);
        assert_eq!(resolve_angle(3, 6).unwrap(), 270.0);
    }

    #[test]
    fn test_inverse_labels_zero_with_anterior_hour() {
        assert_eq!(angle_to_hour(0.0, 12).unwrap(), 12);
        assert_eq!(angle_to_hour(0.0, 6).unwrap(), 6);
        assert_eq!(angle_to_hour(90.0, 12).unwrap(), 3);
        assert_eq!(angle_to_hour(350.0, 12).unwrap(), 12);
        assert_eq!(angle_to_hour(44.0, 12).unwrap(), 1);
        assert_eq!(angle_to_hour(46.0, 12).unwrap(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            resolve_angle(0, 12).unwrap_err(),
            AngleError::HourOutOfRange { hour: 0 }
        );
        assert_eq!(
            resolve_angle(13, 12).unwrap_err(),
            AngleError::HourOutOfRange { hour: 13 }
        );
        assert!(matches!(
            resolve_angle(3, 0),
            Err(AngleError::AnteriorHourOutOfRange { hour: 0 })
        ));
        assert!(angle_to_hour(360.0, 12).is_err());
        assert!(angle_to_hour(-1.0, 12).is_err());
        assert!(angle_to_hour(f64::NAN, 12).is_err());
    }

    #[test]
    fn test_angle_input_resolution() {
        assert_eq!(AngleInput::Hour(3).resolve(12).unwrap(), 90.0);
        assert_eq!(AngleInput::Degrees(45.0).resolve(12).unwrap(), 45.0);
        assert!(AngleInput::Degrees(400.0).resolve(12).is_err());
        assert!(AngleInput::Degrees(45.0).resolve(14).is_err());
    }

    #[test]
    fn test_clock_caption() {
        assert_eq!(clock_caption(12), "12 o'clock");
    }
}
