//! # Graftmark Planner
//!
//! Coordinate-mapping and layout engine for planning fenestrations in a
//! stent-graft and producing its unrolled, 1:1 cutting pattern.
//!
//! ## Core Components
//!
//! - **Catalog**: selectable graft templates (diameter × length)
//! - **Angle**: clock hour ↔ canonical angle under an anterior convention
//! - **Mapper**: (angle, axial distance) → (x, y) in the unrolled pattern
//! - **Fenestration**: entries, the set, and the placement validator
//! - **Layout**: stent rings, radiopaque markers, end labels, calibration bars
//! - **Pattern**: everything above combined into one renderable value
//! - **Session**: owns the current set and keeps the pattern up to date
//!
//! ## Architecture
//!
//! ```text
//! Catalog ──► GraftTemplate ──┐
//! clock hour ──► Angle ───────┼──► Validator ──► FenestrationSet
//!                             │                        │
//!                             └──► Mapper + Layout ◄───┘
//!                                        │
//!                                     Pattern ──► preview / print exporters
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use graftmark_planner::{AngleInput, GraftCatalog, PlanningSession};
//!
//! let template = GraftCatalog::builtin().lookup("device-a")?.clone();
//! let mut session = PlanningSession::new(template, Default::default(), Default::default(), Default::default())?;
//! session.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0)?;
//! let pattern = session.pattern();
//! ```

pub mod angle;
pub mod api;
pub mod catalog;
pub mod fenestration;
pub mod layout;
pub mod mapper;
pub mod pattern;
pub mod session;

pub use angle::{angle_to_hour, clock_caption, resolve_angle, AngleInput, DEGREES_PER_HOUR};
pub use catalog::{GraftCatalog, GraftTemplate};
pub use fenestration::{Fenestration, FenestrationSet, ValidationLimits};
pub use layout::{
    compute_layout, AxialLine, BarDirection, CalibrationBar, EndLabel, GraftEnd, Label, Layout,
    LayoutConfig, TextAlign,
};
pub use mapper::CoordinateMapper;
pub use pattern::{compute_pattern, FenestrationMark, Pattern, PatternOptions};
pub use session::PlanningSession;
