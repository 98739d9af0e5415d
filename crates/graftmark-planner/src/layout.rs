//! Fixed graft landmarks in pattern space.
//!
//! Stent rings, radiopaque markers, end labels and calibration bars depend
//! only on the template and the layout configuration. They are placed with
//! the same [`CoordinateMapper`] as the fenestrations so preview and print
//! agree on every landmark.

use crate::catalog::GraftTemplate;
use crate::mapper::CoordinateMapper;
use graftmark_core::units::{format_mm, MM_EPSILON};
use graftmark_core::{Bounds, Error, Point, Result, Segment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE: f64 = 0.6;

/// Layout configuration for the fixed landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Axial spacing of stent ring lines (mm)
    pub ring_interval: f64,
    /// Axial offsets of radiopaque markers from the proximal end (mm)
    pub marker_offsets: Vec<f64>,
    /// Length of each calibration bar (mm)
    pub calibration_bar_length: f64,
    /// Distance between the graft outline and its labels (mm)
    pub label_gap: f64,
    /// Distance between the graft outline and the calibration bars (mm)
    pub calibration_offset: f64,
    /// Font size for landmark labels (mm)
    pub label_font_size: f64,
    /// Font size for the end labels (mm)
    pub end_label_font_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ring_interval: 15.0,
            marker_offsets: vec![30.0, 60.0, 90.0, 120.0],
            calibration_bar_length: 10.0,
            label_gap: 8.0,
            calibration_offset: 20.0,
            label_font_size: 2.8,
            end_label_font_size: 4.2,
        }
    }
}

impl LayoutConfig {
    /// Checks that every spacing and size is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.ring_interval.is_finite() && self.ring_interval > 0.0) {
            return Err(Error::other(format!(
                "Ring interval must be > 0, got {}",
                self.ring_interval
            )));
        }
        if let Some(bad) = self
            .marker_offsets
            .iter()
            .find(|o| !(o.is_finite() && **o >= 0.0))
        {
            return Err(Error::other(format!("Marker offset must be >= 0, got {}", bad)));
        }
        if !(self.calibration_bar_length.is_finite() && self.calibration_bar_length > 0.0) {
            return Err(Error::other(format!(
                "Calibration bar length must be > 0, got {}",
                self.calibration_bar_length
            )));
        }
        for (name, value) in [
            ("Label gap", self.label_gap),
            ("Calibration offset", self.calibration_offset),
            ("Label font size", self.label_font_size),
            ("End label font size", self.end_label_font_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::other(format!("{} must be > 0, got {}", name, value)));
            }
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

/// Text placed in pattern space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Anchor point (mm); glyphs are centred vertically on it
    pub anchor: Point,
    pub align: TextAlign,
    /// Font size (mm)
    pub font_size: f64,
}

impl Label {
    pub fn new(text: impl Into<String>, anchor: Point, align: TextAlign, font_size: f64) -> Self {
        Self {
            text: text.into(),
            anchor,
            align,
            font_size,
        }
    }

    /// Approximate extent of the rendered text, assuming the anchor sits on
    /// the vertical middle of the glyphs.
    pub fn estimated_bounds(&self) -> Bounds {
        let width = self.text.chars().count() as f64 * self.font_size * GLYPH_ADVANCE;
        let (left, right) = match self.align {
            TextAlign::Start => (self.anchor.x, self.anchor.x + width),
            TextAlign::Middle => (self.anchor.x - width / 2.0, self.anchor.x + width / 2.0),
            TextAlign::End => (self.anchor.x - width, self.anchor.x),
        };
        let half = self.font_size / 2.0;
        Bounds::new(left, self.anchor.y - half, right, self.anchor.y + half)
    }
}

/// Horizontal line across the full circumference at an axial distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxialLine {
    pub axial_distance: f64,
    pub line: Segment,
    pub label: Label,
}

/// Which end of the graft a label refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraftEnd {
    Proximal,
    Distal,
}

/// Label naming one end of the graft with its axial value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndLabel {
    pub end: GraftEnd,
    pub axial_distance: f64,
    pub label: Label,
}

/// Direction of a calibration bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarDirection {
    Horizontal,
    Vertical,
}

/// Fixed-length segment for checking print scale with a ruler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBar {
    pub direction: BarDirection,
    pub line: Segment,
    pub length: f64,
    pub label: Label,
}

/// All fixed landmarks of one template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// The unrolled graft rectangle [0, C] × [0, length]
    pub outline: Bounds,
    pub stent_rings: Vec<AxialLine>,
    pub markers: Vec<AxialLine>,
    pub end_labels: Vec<EndLabel>,
    pub calibration_bars: Vec<CalibrationBar>,
}

impl Layout {
    /// Extent of the outline plus every landmark and label.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = self.outline;
        for line in self.stent_rings.iter().chain(self.markers.iter()) {
            bounds.include_point(line.line.start);
            bounds.include_point(line.line.end);
            bounds.include_bounds(&line.label.estimated_bounds());
        }
        for end in &self.end_labels {
            bounds.include_bounds(&end.label.estimated_bounds());
        }
        for bar in &self.calibration_bars {
            bounds.include_point(bar.line.start);
            bounds.include_point(bar.line.end);
            bounds.include_bounds(&bar.label.estimated_bounds());
        }
        bounds
    }
}

/// Axial positions of stent rings: 0, interval, 2 × interval, ... below length.
pub fn ring_positions(length: f64, interval: f64) -> Vec<f64> {
    if !(interval.is_finite() && interval > 0.0) {
        return Vec::new();
    }
    (0u32..)
        .map(|i| f64::from(i) * interval)
        .take_while(|d| *d < length - MM_EPSILON)
        .collect()
}

fn axial_line(mapper: &CoordinateMapper, axial_distance: f64, label: Label) -> AxialLine {
    let y = mapper.axial_to_y(axial_distance);
    AxialLine {
        axial_distance,
        line: Segment::new(Point::new(0.0, y), Point::new(mapper.circumference(), y)),
        label,
    }
}

/// Computes the fixed landmarks for a template.
pub fn compute_layout(
    template: &GraftTemplate,
    mapper: &CoordinateMapper,
    config: &LayoutConfig,
) -> Layout {
    debug_assert!(
        config.validate().is_ok(),
        "layout config must be validated before use"
    );
    let width = mapper.circumference();
    let length = template.length;
    let gap = config.label_gap;

    let stent_rings = ring_positions(length, config.ring_interval)
        .into_iter()
        .map(|d| {
            let y = mapper.axial_to_y(d);
            let label = Label::new(
                format_mm(d),
                Point::new(-gap, y),
                TextAlign::End,
                config.label_font_size,
            );
            axial_line(mapper, d, label)
        })
        .collect();

    let markers = config
        .marker_offsets
        .iter()
        .copied()
        .filter(|&offset| {
            let inside = offset <= length + MM_EPSILON;
            if !inside {
                debug!(
                    "Skipping radiopaque marker at {}mm beyond graft length {}mm",
                    offset, length
                );
            }
            inside
        })
        .map(|offset| {
            let y = mapper.axial_to_y(offset);
            let label = Label::new(
                "MARKER",
                Point::new(width + gap, y),
                TextAlign::Start,
                config.label_font_size,
            );
            axial_line(mapper, offset, label)
        })
        .collect();

    // End labels sit outside the outline, on the side of the end they name
    let end_label = |end: GraftEnd, axial_distance: f64, caption: &str| {
        let y = mapper.axial_to_y(axial_distance);
        let outward = if y <= length / 2.0 { -gap } else { gap };
        EndLabel {
            end,
            axial_distance,
            label: Label::new(
                format!("{} ({}mm)", caption, format_mm(axial_distance)),
                Point::new(width / 2.0, y + outward),
                TextAlign::Middle,
                config.end_label_font_size,
            ),
        }
    };
    let end_labels = vec![
        end_label(GraftEnd::Proximal, 0.0, "PROXIMAL END"),
        end_label(GraftEnd::Distal, length, "DISTAL END"),
    ];

    let bar = config.calibration_bar_length;
    let offset = config.calibration_offset;
    let bar_caption = format!("{}mm", format_mm(bar));
    let horizontal_y = length + offset;
    let vertical_x = -offset;
    let calibration_bars = vec![
        CalibrationBar {
            direction: BarDirection::Horizontal,
            line: Segment::new(Point::new(0.0, horizontal_y), Point::new(bar, horizontal_y)),
            length: bar,
            label: Label::new(
                bar_caption.clone(),
                Point::new(bar + 2.0, horizontal_y),
                TextAlign::Start,
                config.label_font_size,
            ),
        },
        CalibrationBar {
            direction: BarDirection::Vertical,
            line: Segment::new(Point::new(vertical_x, 0.0), Point::new(vertical_x, bar)),
            length: bar,
            label: Label::new(
                bar_caption,
                Point::new(vertical_x - 2.0, bar / 2.0),
                TextAlign::End,
                config.label_font_size,
            ),
        },
    ];

    Layout {
        outline: Bounds::new(0.0, 0.0, width, length),
        stent_rings,
        markers,
        end_labels,
        calibration_bars,
    }
}
