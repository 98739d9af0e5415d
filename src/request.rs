//! Command line fenestration entries.
//!
//! An entry reads `VESSEL@DISTANCE:ANGLE:DIAMETER`, for example `sma@50:12:6`.
//! ANGLE is a clock hour (`1`-`12`) or a canonical angle with a `deg` suffix
//! (`90deg`). Distances and diameters are millimetres.

use graftmark_core::{Error, Vessel};
use graftmark_planner::{AngleInput, PlanningSession};
use std::fmt;
use std::str::FromStr;

/// One requested opening, not yet validated against a graft
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenestrationRequest {
    pub vessel: Vessel,
    pub axial_distance: f64,
    pub angle: AngleInput,
    pub hole_diameter: f64,
}

fn parse_mm(field: &str, text: &str) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .trim_end_matches("mm")
        .parse()
        .map_err(|_| format!("Invalid {}: '{}'", field, text))?;
    if !value.is_finite() {
        return Err(format!("Invalid {}: '{}'", field, text));
    }
    Ok(value)
}

fn parse_angle(text: &str) -> Result<AngleInput, String> {
    let text = text.trim();
    if let Some(degrees) = text.strip_suffix("deg") {
        let value: f64 = degrees
            .parse()
            .map_err(|_| format!("Invalid angle: '{}'", text))?;
        return Ok(AngleInput::Degrees(value));
    }
    text.parse::<u8>()
        .map(AngleInput::Hour)
        .map_err(|_| format!("Invalid clock hour: '{}'", text))
}

impl FromStr for FenestrationRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (vessel, rest) = s
            .split_once('@')
            .ok_or_else(|| format!("Expected VESSEL@DISTANCE:ANGLE:DIAMETER, got '{}'", s))?;
        let fields: Vec<&str> = rest.split(':').collect();
        let [distance, angle, diameter] = fields.as_slice() else {
            return Err(format!(
                "Expected VESSEL@DISTANCE:ANGLE:DIAMETER, got '{}'",
                s
            ));
        };

        Ok(Self {
            vessel: vessel.trim().parse()?,
            axial_distance: parse_mm("axial distance", distance)?,
            angle: parse_angle(angle)?,
            hole_diameter: parse_mm("hole diameter", diameter)?,
        })
    }
}

impl fmt::Display for FenestrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let angle = match self.angle {
            AngleInput::Hour(h) => h.to_string(),
            AngleInput::Degrees(d) => format!("{}deg", d),
        };
        write!(
            f,
            "{}@{}:{}:{}",
            self.vessel.short_label(),
            self.axial_distance,
            angle,
            self.hole_diameter
        )
    }
}

/// Adds each request to the session in order.
///
/// Requests the user can fix (collisions, out-of-range values, bad angles)
/// are skipped and returned with their error; the session keeps its prior
/// state for each. An internal inconsistency aborts the whole run.
pub fn apply_requests(
    session: &mut PlanningSession,
    requests: &[FenestrationRequest],
) -> Result<Vec<(FenestrationRequest, Error)>, Error> {
    let mut rejected = Vec::new();
    for request in requests {
        if let Err(e) = session.add(
            request.vessel,
            request.axial_distance,
            request.angle,
            request.hole_diameter,
        ) {
            if !e.is_user_error() {
                return Err(e);
            }
            rejected.push((*request, e));
        }
    }
    Ok(rejected)
}
