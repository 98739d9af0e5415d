//! # Graftmark Export
//!
//! Render and export adapters for computed patterns. Every adapter consumes
//! the same [`graftmark_planner::Pattern`], so the on-screen preview and the
//! printed template cannot drift apart.
//!
//! - **SVG**: true-scale print sheet and gridded preview
//! - **JSON**: the pattern itself, for renderers living elsewhere
//! - **Page**: paper sizes and 1:1 fit checks

pub mod error;
pub mod json;
pub mod page;
pub mod renderer;
pub mod svg;

pub use error::{ExportError, ExportResult};
pub use json::JsonExporter;
pub use page::{check_fit, fit_orientation, PageOrientation, PageSize};
pub use renderer::{export_to_file, PatternRenderer};
pub use svg::{SvgMode, SvgRenderer};
