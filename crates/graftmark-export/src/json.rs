//! JSON dump of a pattern for external renderers.

use crate::error::ExportResult;
use crate::renderer::PatternRenderer;
use graftmark_planner::Pattern;

/// Serializes the pattern as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pub pretty: bool,
}

impl JsonExporter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl PatternRenderer for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, pattern: &Pattern) -> ExportResult<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(pattern)?
        } else {
            serde_json::to_string(pattern)?
        };
        Ok(text)
    }
}
