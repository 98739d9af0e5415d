//! Paper sizes and 1:1 page fitting.
//!
//! A cutting template is useless if the printer scales it, so a pattern that
//! does not fit the chosen sheet is reported rather than shrunk.

use crate::error::{ExportError, ExportResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    A3,
    Letter,
    Legal,
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

impl PageSize {
    /// Portrait dimensions (width, height) in mm.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "A4"),
            PageSize::A3 => write!(f, "A3"),
            PageSize::Letter => write!(f, "Letter"),
            PageSize::Legal => write!(f, "Legal"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "a3" => Ok(PageSize::A3),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    Portrait,
    Landscape,
}

/// Chooses an orientation in which a document of the given size fits,
/// preferring portrait.
pub fn fit_orientation(page: PageSize, width_mm: f64, height_mm: f64) -> Option<PageOrientation> {
    let (pw, ph) = page.dimensions_mm();
    if width_mm <= pw && height_mm <= ph {
        Some(PageOrientation::Portrait)
    } else if width_mm <= ph && height_mm <= pw {
        Some(PageOrientation::Landscape)
    } else {
        None
    }
}

/// Like [`fit_orientation`] but reports an overflow as an error.
pub fn check_fit(page: PageSize, width_mm: f64, height_mm: f64) -> ExportResult<PageOrientation> {
    fit_orientation(page, width_mm, height_mm).ok_or_else(|| {
        let (pw, ph) = page.dimensions_mm();
        warn!(
            "Document {:.1}mm × {:.1}mm does not fit on {} at 1:1",
            width_mm, height_mm, page
        );
        ExportError::PageOverflow {
            page: page.to_string(),
            needed_width: width_mm,
            needed_height: height_mm,
            page_width: pw,
            page_height: ph,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_prefers_portrait() {
        assert_eq!(
            fit_orientation(PageSize::A4, 150.0, 230.0),
            Some(PageOrientation::Portrait)
        );
        assert_eq!(
            fit_orientation(PageSize::A4, 250.0, 150.0),
            Some(PageOrientation::Landscape)
        );
        assert_eq!(fit_orientation(PageSize::A4, 250.0, 250.0), None);
        assert!(check_fit(PageSize::A3, 250.0, 250.0).is_ok());
        assert!(check_fit(PageSize::Letter, 300.0, 300.0).is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!("Letter".parse::<PageSize>().unwrap(), PageSize::Letter);
        assert!("b5".parse::<PageSize>().is_err());
    }
}
