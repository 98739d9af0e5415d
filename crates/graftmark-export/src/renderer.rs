//! Renderer abstraction shared by every output format.

use crate::error::ExportResult;
use graftmark_planner::Pattern;
use std::path::Path;
use tracing::info;

/// Turns a computed pattern into a document.
///
/// Implementations draw primitives at the pattern's coordinates and may add
/// a fixed document offset; they never recompute geometry.
pub trait PatternRenderer {
    /// Short format name for logs
    fn name(&self) -> &'static str;

    /// Preferred file extension, without the dot
    fn extension(&self) -> &'static str;

    /// Renders the pattern into the output document.
    fn render(&self, pattern: &Pattern) -> ExportResult<String>;
}

/// Renders a pattern and writes it to `path`.
pub fn export_to_file<R: PatternRenderer + ?Sized>(
    renderer: &R,
    pattern: &Pattern,
    path: &Path,
) -> ExportResult<()> {
    let document = renderer.render(pattern)?;
    std::fs::write(path, document)?;
    info!(
        "Exported {} pattern for {} to {}",
        renderer.name(),
        pattern.template.id,
        path.display()
    );
    Ok(())
}
