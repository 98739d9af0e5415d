//! SVG renderer for unrolled graft patterns
//! Writes the pattern as a millimetre-unit SVG document
//! Features:
//! - Physical size in mm (`width="..mm"`) with a matching viewBox, so 1 user
//!   unit is 1 mm on paper
//! - One fixed translation for the document margin and header; every
//!   coordinate inside comes straight from the pattern
//! - Preview mode adds a 10 mm grid over the graft outline

use crate::error::{ExportError, ExportResult};
use crate::page::{check_fit, PageSize};
use crate::renderer::PatternRenderer;
use graftmark_core::units::{format_coord, format_mm};
use graftmark_core::Segment;
use graftmark_planner::{GraftEnd, Label, Pattern, TextAlign};
use tracing::debug;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const GRID_STEP_MM: f64 = 10.0;
const TITLE_FONT_MM: f64 = 5.0;
const SUBTITLE_FONT_MM: f64 = 3.2;

/// What the document is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgMode {
    /// On-screen preview with grid
    Preview,
    /// True-scale cutting template
    Print,
}

/// Renders a [`Pattern`] as SVG
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    mode: SvgMode,
    margin_mm: f64,
    header_mm: f64,
    page: Option<PageSize>,
    timestamp: bool,
}

impl SvgRenderer {
    /// Print renderer with the given margin.
    pub fn print(margin_mm: f64) -> Self {
        Self {
            mode: SvgMode::Print,
            margin_mm,
            header_mm: 20.0,
            page: None,
            timestamp: false,
        }
    }

    /// Preview renderer with the given margin.
    pub fn preview(margin_mm: f64) -> Self {
        Self {
            mode: SvgMode::Preview,
            ..Self::print(margin_mm)
        }
    }

    /// Requires the document to fit the page at 1:1.
    pub fn with_page(mut self, page: PageSize) -> Self {
        self.page = Some(page);
        self
    }

    /// Adds the generation time to the document description.
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    pub fn mode(&self) -> SvgMode {
        self.mode
    }

    /// Translation applied to every pattern coordinate.
    pub fn offset(&self, pattern: &Pattern) -> (f64, f64) {
        (
            self.margin_mm - pattern.bounds.min_x,
            self.margin_mm + self.header_mm - pattern.bounds.min_y,
        )
    }

    /// Document size in mm.
    pub fn document_size(&self, pattern: &Pattern) -> (f64, f64) {
        (
            pattern.bounds.width() + 2.0 * self.margin_mm,
            pattern.bounds.height() + 2.0 * self.margin_mm + self.header_mm,
        )
    }

    fn validate(&self) -> ExportResult<()> {
        if !(self.margin_mm.is_finite() && self.margin_mm >= 0.0) {
            return Err(ExportError::InvalidOption {
                name: "margin_mm".to_string(),
                reason: format!("must be >= 0, got {}", self.margin_mm),
            });
        }
        Ok(())
    }
}

/// Escape text for XML content and attributes
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Start => "start",
        TextAlign::Middle => "middle",
        TextAlign::End => "end",
    }
}

fn render_label(label: &Label, fill: &str, bold: bool) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\" fill=\"{}\"{}>{}</text>\n",
        format_coord(label.anchor.x),
        format_coord(label.anchor.y),
        FONT_FAMILY,
        format_coord(label.font_size),
        text_anchor(label.align),
        fill,
        if bold { " font-weight=\"bold\"" } else { "" },
        escape_xml(&label.text)
    )
}

fn render_segment(segment: &Segment, attrs: &str) -> String {
    format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>\n",
        format_coord(segment.start.x),
        format_coord(segment.start.y),
        format_coord(segment.end.x),
        format_coord(segment.end.y),
        attrs
    )
}

/// Render grid over the graft outline as SVG path commands
fn render_grid(pattern: &Pattern) -> String {
    let outline = pattern.outline();
    let mut path = String::new();

    let mut x = outline.min_x;
    while x <= outline.max_x + 1e-9 {
        path.push_str(&format!(
            "M {} {} L {} {} ",
            format_coord(x),
            format_coord(outline.min_y),
            format_coord(x),
            format_coord(outline.max_y)
        ));
        x += GRID_STEP_MM;
    }

    let mut y = outline.min_y;
    while y <= outline.max_y + 1e-9 {
        path.push_str(&format!(
            "M {} {} L {} {} ",
            format_coord(outline.min_x),
            format_coord(y),
            format_coord(outline.max_x),
            format_coord(y)
        ));
        y += GRID_STEP_MM;
    }

    path.trim_end().to_string()
}

impl PatternRenderer for SvgRenderer {
    fn name(&self) -> &'static str {
        match self.mode {
            SvgMode::Preview => "svg-preview",
            SvgMode::Print => "svg-print",
        }
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, pattern: &Pattern) -> ExportResult<String> {
        self.validate()?;
        let (doc_w, doc_h) = self.document_size(pattern);
        if let Some(page) = self.page {
            check_fit(page, doc_w, doc_h)?;
        }
        let (dx, dy) = self.offset(pattern);
        debug!(
            "Rendering {} document {:.1}mm × {:.1}mm",
            self.name(),
            doc_w,
            doc_h
        );

        let mut svg = String::new();

        // Header
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{}mm\" height=\"{}mm\" viewBox=\"0 0 {} {}\">\n",
            format_coord(doc_w),
            format_coord(doc_h),
            format_coord(doc_w),
            format_coord(doc_h)
        ));
        svg.push_str(&format!("<title>{}</title>\n", escape_xml(&pattern.title)));
        let mut desc = format!(
            "{} ({}); {}; {}; units: millimetres",
            pattern.template.name,
            pattern.template.id,
            pattern.convention_label,
            pattern.options.orientation
        );
        if self.timestamp {
            desc.push_str(&format!(
                "; generated {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        svg.push_str(&format!("<desc>{}</desc>\n", escape_xml(&desc)));

        // Title block
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\">{}</text>\n",
            format_coord(self.margin_mm),
            format_coord(self.margin_mm + TITLE_FONT_MM),
            FONT_FAMILY,
            TITLE_FONT_MM,
            escape_xml(&pattern.title)
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\">{}</text>\n",
            format_coord(self.margin_mm),
            format_coord(self.margin_mm + TITLE_FONT_MM + SUBTITLE_FONT_MM + 2.0),
            FONT_FAMILY,
            SUBTITLE_FONT_MM,
            escape_xml(&format!(
                "{} | {} | {}",
                pattern.template.name, pattern.convention_label, pattern.options.orientation
            ))
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\">Print at 100% (do not scale) and check the {}mm calibration bars</text>\n",
            format_coord(self.margin_mm),
            format_coord(self.margin_mm + TITLE_FONT_MM + 2.0 * (SUBTITLE_FONT_MM + 2.0)),
            FONT_FAMILY,
            SUBTITLE_FONT_MM,
            pattern
                .layout
                .calibration_bars
                .first()
                .map(|b| format_mm(b.length))
                .unwrap_or_else(|| "0".to_string())
        ));

        svg.push_str(&format!(
            "<g id=\"pattern\" transform=\"translate({} {})\">\n",
            format_coord(dx),
            format_coord(dy)
        ));

        if self.mode == SvgMode::Preview {
            svg.push_str(&format!(
                "<path id=\"grid\" d=\"{}\" stroke=\"#cccccc\" stroke-width=\"0.1\" fill=\"none\"/>\n",
                render_grid(pattern)
            ));
        }

        let outline = pattern.outline();
        svg.push_str(&format!(
            "<rect id=\"outline\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"0.6\"/>\n",
            format_coord(outline.min_x),
            format_coord(outline.min_y),
            format_coord(outline.width()),
            format_coord(outline.height())
        ));

        // Stent rings
        svg.push_str("<g id=\"stent-rings\">\n");
        for ring in &pattern.layout.stent_rings {
            svg.push_str(&render_segment(
                &ring.line,
                "stroke=\"gray\" stroke-width=\"0.2\" stroke-dasharray=\"0.6 0.6\" stroke-opacity=\"0.6\"",
            ));
            svg.push_str(&render_label(&ring.label, "black", false));
        }
        svg.push_str("</g>\n");

        // Radiopaque markers
        svg.push_str("<g id=\"markers\">\n");
        for marker in &pattern.layout.markers {
            svg.push_str(&render_segment(
                &marker.line,
                "stroke=\"gold\" stroke-width=\"1.2\" stroke-opacity=\"0.8\"",
            ));
            svg.push_str(&render_label(&marker.label, "goldenrod", true));
        }
        svg.push_str("</g>\n");

        // Anterior reference line
        svg.push_str(&format!(
            "<line id=\"anterior\" x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\" stroke=\"#888888\" stroke-width=\"0.2\" stroke-dasharray=\"2 1\"/>\n",
            format_coord(outline.min_y),
            format_coord(outline.max_y),
            x = format_coord(pattern.anterior_x)
        ));

        // End labels
        svg.push_str("<g id=\"end-labels\">\n");
        for end in &pattern.layout.end_labels {
            let fill = match end.end {
                GraftEnd::Proximal => "red",
                GraftEnd::Distal => "blue",
            };
            svg.push_str(&render_label(&end.label, fill, true));
        }
        svg.push_str("</g>\n");

        // Calibration bars
        svg.push_str("<g id=\"calibration\">\n");
        for bar in &pattern.layout.calibration_bars {
            svg.push_str(&render_segment(
                &bar.line,
                "stroke=\"black\" stroke-width=\"0.5\" stroke-linecap=\"butt\"",
            ));
            svg.push_str(&render_label(&bar.label, "black", false));
        }
        svg.push_str("</g>\n");

        // Fenestrations
        svg.push_str("<g id=\"fenestrations\">\n");
        for mark in &pattern.fenestrations {
            svg.push_str(&format!(
                "<circle id=\"fenestration-{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" fill-opacity=\"0.6\" stroke=\"black\" stroke-width=\"0.3\"/>\n",
                mark.index,
                format_coord(mark.center.x),
                format_coord(mark.center.y),
                format_coord(mark.radius),
                mark.color
            ));
            svg.push_str(&render_label(&mark.label, "black", true));
            for line in &mark.caption {
                svg.push_str(&render_label(line, "black", false));
            }
        }
        svg.push_str("</g>\n");

        svg.push_str("</g>\n");
        svg.push_str("</svg>\n");

        Ok(svg)
    }
}
