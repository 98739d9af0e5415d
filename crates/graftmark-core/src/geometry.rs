//! Planar primitives shared by the layout engine and the renderers.
//!
//! Coordinates are millimetres in the unrolled pattern: x runs around the
//! circumference, y runs along the graft axis, origin at the top-left corner
//! of the graft outline.

use serde::{Deserialize, Serialize};

/// A point in the unrolled pattern (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Segment length in mm.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Axis-aligned rectangle (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from two corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grows the bounds to include a point.
    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows the bounds to include another rectangle.
    pub fn include_bounds(&mut self, other: &Bounds) {
        self.include_point(Point::new(other.min_x, other.min_y));
        self.include_point(Point::new(other.max_x, other.max_y));
    }

    /// Grows the bounds to include a circle.
    pub fn include_circle(&mut self, center: Point, radius: f64) {
        self.include_point(Point::new(center.x - radius, center.y - radius));
        self.include_point(Point::new(center.x + radius, center.y + radius));
    }

    /// True if the point lies inside or on the edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}
