//! Error handling for Graftmark
//!
//! Provides error types for every layer of the planning core:
//! - Angle errors (clock hours and degrees supplied by the user)
//! - Range errors (axial distance and hole diameter bounds)
//! - Collision errors (minimum axial spacing between fenestrations)
//! - Index errors (deletion from the fenestration set)
//! - Invariant violations (internal defects, never caused by user input)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Angle error type
///
/// Raised when a clock hour or a direct angle cannot be resolved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleError {
    /// Clock hour outside 1..=12
    #[error("Clock hour {hour} out of range (valid: 1..12)")]
    HourOutOfRange {
        /// The rejected hour.
        hour: i64,
    },

    /// Anterior reference hour outside 1..=12
    #[error("Anterior hour {hour} out of range (valid: 1..12)")]
    AnteriorHourOutOfRange {
        /// The rejected anterior hour.
        hour: i64,
    },

    /// Angle is not finite or lies outside [0, 360)
    #[error("Angle {degrees}° out of range (valid: 0 <= angle < 360)")]
    DegreesOutOfRange {
        /// The rejected angle in degrees.
        degrees: f64,
    },
}

/// Range error type
///
/// Raised when a fenestration value falls outside the bounds configured
/// for the active graft template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Axial distance outside [0, graft length]
    #[error("Axial distance {value}mm out of range (valid: {min}..{max}mm)")]
    AxialDistance {
        /// The rejected distance in mm.
        value: f64,
        /// Lower bound in mm.
        min: f64,
        /// Upper bound in mm.
        max: f64,
    },

    /// Hole diameter outside the configured bounds
    #[error("Hole diameter {value}mm out of range (valid: {min}..{max}mm)")]
    HoleDiameter {
        /// The rejected diameter in mm.
        value: f64,
        /// Lower bound in mm.
        min: f64,
        /// Upper bound in mm.
        max: f64,
    },
}

/// Spacing violation between a candidate and an existing fenestration
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "{candidate} at {candidate_distance}mm is {separation:.1}mm from {existing} at \
     {existing_distance}mm (entry {existing_index}); minimum spacing is {min_spacing}mm"
)]
pub struct CollisionError {
    /// Vessel name of the rejected candidate.
    pub candidate: String,
    /// Axial distance of the candidate in mm.
    pub candidate_distance: f64,
    /// Vessel name of the conflicting member.
    pub existing: String,
    /// Axial distance of the conflicting member in mm.
    pub existing_distance: f64,
    /// Position of the conflicting member in the set.
    pub existing_index: usize,
    /// Absolute axial separation in mm.
    pub separation: f64,
    /// Configured minimum spacing in mm.
    pub min_spacing: f64,
}

/// Deletion index outside the set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Index {index} out of range for {len} fenestration(s)")]
pub struct IndexError {
    /// The requested index.
    pub index: usize,
    /// Number of members in the set.
    pub len: usize,
}

/// Internal consistency failure
///
/// Signals a programming defect, e.g. a pattern request for an angle that
/// was never resolved into [0, 360). Not recoverable by changing user input.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invariant violated: {0}")]
pub struct InvariantViolation(pub String);

impl InvariantViolation {
    /// Create a violation from a message
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Main error type for Graftmark
///
/// A unified error type that can represent any error of the planning core.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown graft template id
    #[error("Graft template not found: {id}")]
    NotFound {
        /// The requested template id.
        id: String,
    },

    /// Invalid angle input
    #[error(transparent)]
    InvalidAngle(#[from] AngleError),

    /// Value outside configured bounds
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Minimum spacing violated
    #[error(transparent)]
    Collision(#[from] CollisionError),

    /// Invalid deletion index
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Internal defect
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// Invalid template definition
    #[error("Invalid graft template '{id}': {reason}")]
    InvalidTemplate {
        /// Template id.
        id: String,
        /// Why the template was rejected.
        reason: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a not-found error for a template id
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Check if this error was caused by user input and can be corrected
    /// by entering different values
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::Invariant(_))
    }

    /// Check if this is a spacing violation
    pub fn is_collision(&self) -> bool {
        matches!(self, Error::Collision(_))
    }

    /// Check if this is a range violation
    pub fn is_range_error(&self) -> bool {
        matches!(self, Error::Range(_))
    }

    /// Check if this is an angle error
    pub fn is_angle_error(&self) -> bool {
        matches!(self, Error::InvalidAngle(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
