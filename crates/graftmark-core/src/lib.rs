//! # Graftmark Core
//!
//! Core types and utilities for Graftmark.
//! Provides the error hierarchy, millimetre unit helpers, the branch vessel
//! vocabulary, planar primitives and the placement conventions shared by
//! the planner, the settings layer and the exporters.

pub mod convention;
pub mod error;
pub mod geometry;
pub mod units;
pub mod vessel;

pub use convention::{AngleConvention, CenteringMode, YOrientation};
pub use error::{
    AngleError, CollisionError, Error, IndexError, InvariantViolation, RangeError, Result,
};
pub use geometry::{Bounds, Point, Segment};
pub use vessel::Vessel;
