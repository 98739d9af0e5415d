//! Error types for the export crate.
//!
//! This module provides structured error types for rendering patterns,
//! page fitting and writing output files.

use std::io;
use thiserror::Error;

/// Errors that can occur while exporting a pattern.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The pattern does not fit on the page at 1:1 scale.
    #[error(
        "Pattern needs {needed_width:.1}mm × {needed_height:.1}mm but {page} is \
         {page_width:.1}mm × {page_height:.1}mm; 1:1 printing cannot scale down"
    )]
    PageOverflow {
        page: String,
        needed_width: f64,
        needed_height: f64,
        page_width: f64,
        page_height: f64,
    },

    /// Renderer options are invalid.
    #[error("Invalid export option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
