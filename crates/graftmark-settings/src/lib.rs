//! Graftmark Settings Crate
//!
//! Configuration file model for the planner: convention defaults, validation
//! limits, landmark layout, export defaults and extra catalog templates.

pub mod config;
pub mod error;

pub use config::{
    Config, ConventionSettings, ExportSettings, LayoutSettings, ValidationSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
