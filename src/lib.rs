//! # Graftmark
//!
//! Fenestration planning for stent-grafts with true-scale (1:1) cutting
//! templates:
//! - Graft catalog of diameter × length templates
//! - Clock-hour angle conventions with a configurable anterior hour
//! - Unrolled-cylinder coordinate mapping with edge or center anterior line
//! - Axial spacing validation of planned openings
//! - Stent ring, radiopaque marker and calibration landmarks
//! - SVG preview/print and JSON export of one shared pattern
//!
//! ## Architecture
//!
//! Graftmark is organized as a workspace with multiple crates:
//!
//! 1. **graftmark-core** - Errors, units, vessels, geometry, conventions
//! 2. **graftmark-planner** - Catalog, resolver, mapper, validator, layout, pattern
//! 3. **graftmark-settings** - Configuration file model
//! 4. **graftmark-export** - SVG and JSON exporters, page fitting
//! 5. **graftmark** - Command line tool that integrates all crates

pub mod report;
pub mod request;

pub use graftmark_core::{
    AngleConvention, AngleError, CenteringMode, CollisionError, Error, IndexError,
    InvariantViolation, RangeError, Result, Vessel, YOrientation,
};
pub use graftmark_export::{
    check_fit, export_to_file, ExportError, JsonExporter, PageSize, PatternRenderer, SvgMode,
    SvgRenderer,
};
pub use graftmark_planner::{
    compute_pattern, AngleInput, Fenestration, FenestrationSet, GraftCatalog, GraftTemplate,
    LayoutConfig, Pattern, PatternOptions, PlanningSession, ValidationLimits,
};
pub use graftmark_settings::{Config, SettingsError};
pub use request::FenestrationRequest;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so reports on stdout stay clean
/// - RUST_LOG environment variable support, falling back to `default_level`
/// - Pretty or JSON formatting
pub fn init_logging(format: LogFormat, default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
