//! Placement conventions for the unrolled pattern
//!
//! A pattern is only meaningful together with the convention it was computed
//! under, so these values travel inside every computed pattern.

use crate::error::AngleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the anterior aspect (0°) lands horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenteringMode {
    /// Anterior at the left edge (x = 0), seam at the anterior line
    Edge,
    /// Anterior at the horizontal centre (x = C/2), seam at 180°
    Center,
}

impl Default for CenteringMode {
    fn default() -> Self {
        Self::Center
    }
}

impl CenteringMode {
    /// Canonical angle that falls on the seam, drawn at x = 0
    pub fn seam_angle(&self) -> f64 {
        match self {
            Self::Edge => 0.0,
            Self::Center => 180.0,
        }
    }

    /// Human-readable placement of the anterior aspect
    pub fn anterior_placement(&self) -> &'static str {
        match self {
            Self::Edge => "LEFT EDGE",
            Self::Center => "CENTER",
        }
    }
}

impl fmt::Display for CenteringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge => write!(f, "edge"),
            Self::Center => write!(f, "center"),
        }
    }
}

impl FromStr for CenteringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edge" | "left" => Ok(Self::Edge),
            "center" | "centre" => Ok(Self::Center),
            _ => Err(format!("Unknown centering mode: {}", s)),
        }
    }
}

/// Vertical orientation of the graft axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YOrientation {
    /// Proximal end at y = 0, distal end at y = length
    DistalDown,
    /// Distal end at y = 0, proximal end at y = length
    ProximalDown,
}

impl Default for YOrientation {
    fn default() -> Self {
        Self::ProximalDown
    }
}

impl fmt::Display for YOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DistalDown => write!(f, "distal-down"),
            Self::ProximalDown => write!(f, "proximal-down"),
        }
    }
}

impl FromStr for YOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "distal-down" | "distal" => Ok(Self::DistalDown),
            "proximal-down" | "proximal" => Ok(Self::ProximalDown),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// Clock-hour convention for one planning session
///
/// `anterior_hour` names the hour that faces the front of the body; it
/// always resolves to 0°. Changing it after fenestrations were placed
/// changes every planar coordinate, so it is fixed per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AngleConvention {
    pub anterior_hour: u8,
    pub centering: CenteringMode,
}

impl Default for AngleConvention {
    fn default() -> Self {
        Self {
            anterior_hour: 12,
            centering: CenteringMode::default(),
        }
    }
}

impl AngleConvention {
    /// Creates a convention after checking the anterior hour.
    pub fn new(anterior_hour: u8, centering: CenteringMode) -> Result<Self, AngleError> {
        if !(1..=12).contains(&anterior_hour) {
            return Err(AngleError::AnteriorHourOutOfRange {
                hour: i64::from(anterior_hour),
            });
        }
        Ok(Self {
            anterior_hour,
            centering,
        })
    }

    /// Label shown on previews, e.g. "12 o'clock (anterior) at CENTER"
    pub fn label(&self) -> String {
        format!(
            "{} o'clock (anterior) at {}",
            self.anterior_hour,
            self.centering.anterior_placement()
        )
    }
}
