//! # Graft Catalog
//!
//! Static table of selectable stent-graft templates. The built-in entries are
//! fixed configuration data; additional templates may be registered from the
//! settings file and are validated before they become selectable.

use graftmark_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// An unfenestrated graft tube that a plan is drawn on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraftTemplate {
    /// Catalog identifier (e.g. "device-a")
    pub id: String,
    /// Display name
    pub name: String,
    /// Tube diameter in mm
    pub diameter: f64,
    /// Tube length in mm
    pub length: f64,
}

impl GraftTemplate {
    /// Creates a template after checking its dimensions.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        diameter: f64,
        length: f64,
    ) -> Result<Self> {
        let template = Self {
            id: id.into(),
            name: name.into(),
            diameter,
            length,
        };
        template.validate()?;
        Ok(template)
    }

    /// Unrolled width of the tube: π × diameter.
    pub fn circumference(&self) -> f64 {
        PI * self.diameter
    }

    /// Checks that the dimensions describe a real tube.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidTemplate {
                id: self.id.clone(),
                reason: "id must not be empty".to_string(),
            });
        }
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(Error::InvalidTemplate {
                id: self.id.clone(),
                reason: format!("diameter must be > 0, got {}", self.diameter),
            });
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(Error::InvalidTemplate {
                id: self.id.clone(),
                reason: format!("length must be > 0, got {}", self.length),
            });
        }
        Ok(())
    }

    /// Short description such as "24mm × 145mm".
    pub fn dimensions_label(&self) -> String {
        format!(
            "{}mm × {}mm",
            graftmark_core::units::format_mm(self.diameter),
            graftmark_core::units::format_mm(self.length)
        )
    }
}

/// Built-in templates as (id, name, diameter, length)
const BUILTIN_TEMPLATES: &[(&str, &str, f64, f64)] = &[
    ("device-a", "Device A", 24.0, 145.0),
    ("device-b", "Device B", 26.0, 150.0),
    ("device-c", "Device C", 28.0, 160.0),
    ("device-d", "Device D", 30.0, 170.0),
    ("device-e", "Device E", 32.0, 180.0),
];

/// Lookup table of graft templates
#[derive(Debug, Clone)]
pub struct GraftCatalog {
    templates: Vec<GraftTemplate>,
}

impl Default for GraftCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GraftCatalog {
    /// Catalog with the built-in templates only.
    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|&(id, name, diameter, length)| GraftTemplate {
                id: id.to_string(),
                name: name.to_string(),
                diameter,
                length,
            })
            .collect();
        Self { templates }
    }

    /// Empty catalog, mainly for tests and fully custom setups.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Registers an additional template.
    ///
    /// Rejects invalid dimensions and ids that are already taken.
    pub fn register(&mut self, template: GraftTemplate) -> Result<()> {
        template.validate()?;
        if self.templates.iter().any(|t| t.id == template.id) {
            return Err(Error::InvalidTemplate {
                id: template.id,
                reason: "id already exists in catalog".to_string(),
            });
        }
        debug!(
            "Registered graft template {} ({})",
            template.id,
            template.dimensions_label()
        );
        self.templates.push(template);
        Ok(())
    }

    /// Returns the template with the given id.
    pub fn lookup(&self, template_id: &str) -> Result<&GraftTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| Error::not_found(template_id))
    }

    /// All templates in catalog order.
    pub fn list(&self) -> &[GraftTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
