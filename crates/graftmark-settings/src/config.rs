//! Configuration for Graftmark
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default file lives in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Convention (anterior clock hour, centering, y orientation)
//! - Validation limits (spacing, hole diameters)
//! - Layout landmarks (stent rings, radiopaque markers, calibration bars)
//! - Export defaults (page size, margin, output directory)
//! - Extra catalog templates

use crate::error::{ConfigError, SettingsError, SettingsResult};
use graftmark_core::{AngleConvention, CenteringMode, YOrientation};
use graftmark_export::PageSize;
use graftmark_planner::{
    GraftCatalog, GraftTemplate, LayoutConfig, PatternOptions, ValidationLimits,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "graftmark";
const CONFIG_FILE: &str = "config.toml";

/// Angle convention and pattern orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionSettings {
    /// Clock hour that faces the anterior reference (1-12)
    pub anterior_hour: u8,
    /// Where the anterior line sits in the unrolled pattern
    pub centering: CenteringMode,
    /// Which end of the graft is at the bottom of the pattern
    pub orientation: YOrientation,
}

impl Default for ConventionSettings {
    fn default() -> Self {
        Self {
            anterior_hour: 12,
            centering: CenteringMode::Center,
            orientation: YOrientation::ProximalDown,
        }
    }
}

/// Fenestration validation limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub min_spacing_mm: f64,
    pub min_hole_diameter_mm: f64,
    pub max_hole_diameter_mm: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        let limits = ValidationLimits::default();
        Self {
            min_spacing_mm: limits.min_spacing,
            min_hole_diameter_mm: limits.min_hole_diameter,
            max_hole_diameter_mm: limits.max_hole_diameter,
        }
    }
}

/// Landmark layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Stent ring spacing in mm
    pub ring_interval_mm: f64,
    /// Radiopaque marker offsets from the proximal end in mm
    pub marker_offsets_mm: Vec<f64>,
    /// Calibration bar length in mm
    pub calibration_bar_mm: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            ring_interval_mm: layout.ring_interval,
            marker_offsets_mm: layout.marker_offsets,
            calibration_bar_mm: layout.calibration_bar_length,
        }
    }
}

/// Export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Paper the print template must fit at 1:1
    pub page: PageSize,
    /// Document margin in mm
    pub margin_mm: f64,
    /// Directory for relative export paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margin_mm: 15.0,
            output_directory: None,
        }
    }
}

impl ExportSettings {
    /// Resolves an export path against the output directory.
    pub fn resolve_output(&self, path: &Path) -> PathBuf {
        match &self.output_directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub convention: ConventionSettings,
    pub validation: ValidationSettings,
    pub layout: LayoutSettings,
    pub export: ExportSettings,
    /// Templates added to the built-in catalog
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<GraftTemplate>,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

fn check_positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, `<config_dir>/graftmark/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not found".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, or the default location when `path` is `None`.
    /// A missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!("{}; using default config", e);
                    return Ok(Self::default());
                }
            },
        };
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(1..=12).contains(&self.convention.anterior_hour) {
            return Err(ConfigError::ValueOutOfRange {
                key: "convention.anterior_hour".to_string(),
                value: self.convention.anterior_hour.to_string(),
            }
            .into());
        }

        let v = &self.validation;
        if !(v.min_spacing_mm.is_finite() && v.min_spacing_mm >= 0.0) {
            return Err(SettingsError::invalid(
                "validation.min_spacing_mm",
                format!("must be >= 0, got {}", v.min_spacing_mm),
            ));
        }
        check_positive("validation.min_hole_diameter_mm", v.min_hole_diameter_mm)?;
        check_positive("validation.max_hole_diameter_mm", v.max_hole_diameter_mm)?;
        if v.min_hole_diameter_mm > v.max_hole_diameter_mm {
            return Err(SettingsError::invalid(
                "validation",
                format!(
                    "min hole diameter {} exceeds max {}",
                    v.min_hole_diameter_mm, v.max_hole_diameter_mm
                ),
            ));
        }

        check_positive("layout.ring_interval_mm", self.layout.ring_interval_mm)?;
        check_positive("layout.calibration_bar_mm", self.layout.calibration_bar_mm)?;
        if let Some(bad) = self
            .layout
            .marker_offsets_mm
            .iter()
            .find(|o| !(o.is_finite() && **o >= 0.0))
        {
            return Err(SettingsError::invalid(
                "layout.marker_offsets_mm",
                format!("offsets must be >= 0, got {}", bad),
            ));
        }

        if !(self.export.margin_mm.is_finite() && self.export.margin_mm >= 0.0) {
            return Err(SettingsError::invalid(
                "export.margin_mm",
                format!("must be >= 0, got {}", self.export.margin_mm),
            ));
        }

        // Building the catalog catches bad and duplicate templates
        self.catalog()?;
        Ok(())
    }

    /// Angle convention for pattern computation.
    pub fn angle_convention(&self) -> SettingsResult<AngleConvention> {
        AngleConvention::new(self.convention.anterior_hour, self.convention.centering)
            .map_err(|e| SettingsError::Planner(e.into()))
    }

    /// Pattern options from the convention section.
    pub fn pattern_options(&self) -> SettingsResult<PatternOptions> {
        Ok(PatternOptions::new(
            self.angle_convention()?,
            self.convention.orientation,
        ))
    }

    /// Validator limits from the validation section.
    pub fn validation_limits(&self) -> ValidationLimits {
        ValidationLimits {
            min_spacing: self.validation.min_spacing_mm,
            min_hole_diameter: self.validation.min_hole_diameter_mm,
            max_hole_diameter: self.validation.max_hole_diameter_mm,
        }
    }

    /// Layout configuration; label placement keeps its defaults.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            ring_interval: self.layout.ring_interval_mm,
            marker_offsets: self.layout.marker_offsets_mm.clone(),
            calibration_bar_length: self.layout.calibration_bar_mm,
            ..LayoutConfig::default()
        }
    }

    /// Built-in catalog plus the configured templates.
    pub fn catalog(&self) -> SettingsResult<GraftCatalog> {
        let mut catalog = GraftCatalog::builtin();
        for template in &self.catalog {
            catalog.register(template.clone())?;
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.convention.anterior_hour, 12);
        assert_eq!(config.convention.centering, CenteringMode::Center);
        assert_eq!(config.convention.orientation, YOrientation::ProximalDown);
        assert_eq!(config.validation_limits(), ValidationLimits::default());
        assert_eq!(config.layout_config(), LayoutConfig::default());
        assert_eq!(config.export.page, PageSize::A4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.convention.anterior_hour = 13;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
        ));

        let mut config = Config::new();
        config.validation.min_hole_diameter_mm = 14.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.layout.ring_interval_mm = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.export.margin_mm = -2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_template_rejected() {
        let mut config = Config::new();
        config.catalog.push(GraftTemplate::new("device-a", "Clash", 20.0, 100.0).unwrap());
        assert!(matches!(config.validate(), Err(SettingsError::Planner(_))));
    }

    #[test]
    fn test_partial_toml_uses_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [convention]
            anterior_hour = 6
            centering = "edge"

            [export]
            page = "letter"
            "#,
        )
        .unwrap();
        assert_eq!(config.convention.anterior_hour, 6);
        assert_eq!(config.convention.centering, CenteringMode::Edge);
        assert_eq!(config.convention.orientation, YOrientation::ProximalDown);
        assert_eq!(config.export.page, PageSize::Letter);
        assert_eq!(config.export.margin_mm, 15.0);
        assert_eq!(config.validation, ValidationSettings::default());

        let options = config.pattern_options().unwrap();
        assert_eq!(options.convention.anterior_hour, 6);
    }

    #[test]
    fn test_resolve_output() {
        let export = ExportSettings {
            output_directory: Some(PathBuf::from("/tmp/patterns")),
            ..ExportSettings::default()
        };
        assert_eq!(
            export.resolve_output(Path::new("a.svg")),
            PathBuf::from("/tmp/patterns/a.svg")
        );
        assert_eq!(
            export.resolve_output(Path::new("/abs/a.svg")),
            PathBuf::from("/abs/a.svg")
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::load_from_file(Path::new("graftmark.yaml")).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }
}
