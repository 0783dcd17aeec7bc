//! Measurement sandbox: renders blocks on an off-view surface and reads back
//! their heights before anything is shown.
//!
//! # Contract
//! - The surface uses the same content width, font family, font size and line
//!   heights as the visible page containers.
//! - Heights include the block's own margins.
//! - The scratch area is cleared at the start of every pass, so nothing from an
//!   earlier pass can bleed into a new measurement.
//! - A block that fails to render is replaced by a placeholder of nominal height
//!   and reported as a [`MeasureWarning`]; the pass carries on.

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::context::LayoutContext;
use crate::layout::error::RenderError;
use crate::layout::font_metrics::{get_metrics, FontMetricTable, GlyphStyle};
use crate::layout::fragment::{
    ContentBlock, Element, Fragment, MeasuredBlock, TextRun, PLACEHOLDER_HEIGHT_PX,
};

/// Horizontal gap between the two sides of a [`Element::Row`].
const ROW_GAP_PX: f32 = 8.0;
/// Share of the width the right side of a row may take, gap included, and
/// still sit beside the left side. Wider right sides wrap below it.
const ROW_SIDE_FRACTION: f32 = 0.5;
/// Horizontal gap between grid columns.
const COLUMN_GAP_PX: f32 = 32.0;
/// Width reserved for a list bullet, in em of the item's font size.
const MARKER_WIDTH_EM: f32 = 1.25;

// ────────────────────────────────────────────────────────────────────────────
// Surface seam
// ────────────────────────────────────────────────────────────────────────────

/// An off-view rendering surface that can lay out a fragment and report its
/// height in CSS px, margins included.
pub trait Measure: Send {
    fn measure(&self, fragment: &Fragment, ctx: &LayoutContext) -> Result<f32, RenderError>;
}

/// Text layout surface backed by the static font metric tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricSurface;

impl Measure for MetricSurface {
    fn measure(&self, fragment: &Fragment, ctx: &LayoutContext) -> Result<f32, RenderError> {
        let layout = SurfaceLayout {
            metrics: get_metrics(ctx.font_family),
            font_px: ctx.font_size_px(),
        };
        layout.fragment_height(fragment, ctx.content_width())
    }
}

/// Per-pass view of the surface: metrics and base font size resolved once.
struct SurfaceLayout {
    metrics: &'static FontMetricTable,
    font_px: f32,
}

impl SurfaceLayout {
    fn fragment_height(&self, fragment: &Fragment, width: f32) -> Result<f32, RenderError> {
        let box_edges = [
            ("margin_top_px", fragment.margin_top_px),
            ("margin_bottom_px", fragment.margin_bottom_px),
            ("padding_bottom_px", fragment.padding_bottom_px),
            ("border_bottom_px", fragment.border_bottom_px),
            ("gap_px", fragment.gap_px),
        ];
        for (field, value) in box_edges {
            check_dimension(field, value)?;
        }

        let mut content = 0.0_f32;
        for (i, element) in fragment.elements.iter().enumerate() {
            if i > 0 {
                content += fragment.gap_px;
            }
            content += self.element_height(element, width)?;
        }

        Ok(fragment.margin_top_px
            + content
            + fragment.padding_bottom_px
            + fragment.border_bottom_px
            + fragment.margin_bottom_px)
    }

    fn element_height(&self, element: &Element, width: f32) -> Result<f32, RenderError> {
        match element {
            Element::Text(run) => self.run_height(run, width),
            Element::Row { left, right } => {
                let right_width = self.run_width(right);
                if right_width + ROW_GAP_PX <= width * ROW_SIDE_FRACTION {
                    let right_height = self.run_height(right, f32::INFINITY)?;
                    let left_width = width - right_width - ROW_GAP_PX;
                    let mut left_height = 0.0_f32;
                    for run in left {
                        left_height += self.run_height(run, left_width)?;
                    }
                    Ok(left_height.max(right_height))
                } else {
                    // Wrapped row: left spans the width, right wraps on its own line below.
                    let mut height = self.run_height(right, width)?;
                    for run in left {
                        height += self.run_height(run, width)?;
                    }
                    Ok(height)
                }
            }
            Element::List {
                items,
                columns,
                row_gap_px,
                marker,
            } => {
                if *columns == 0 {
                    return Err(RenderError::ZeroColumns);
                }
                check_dimension("row_gap_px", *row_gap_px)?;
                let cols = f32::from(*columns);
                let column_width = (width - COLUMN_GAP_PX * (cols - 1.0)) / cols;

                let mut height = 0.0_f32;
                for (row_index, row) in items.chunks(usize::from(*columns)).enumerate() {
                    if row_index > 0 {
                        height += row_gap_px;
                    }
                    let mut row_height = 0.0_f32;
                    for item in row {
                        let item_width = if *marker {
                            column_width - MARKER_WIDTH_EM * self.font_px * item.scale
                        } else {
                            column_width
                        };
                        row_height = row_height.max(self.run_height(item, item_width)?);
                    }
                    height += row_height;
                }
                Ok(height)
            }
            Element::Rule { thickness_px } => {
                check_dimension("thickness_px", *thickness_px)?;
                Ok(*thickness_px)
            }
            Element::Spacer { height_px } => {
                check_dimension("height_px", *height_px)?;
                Ok(*height_px)
            }
        }
    }

    /// Height of a wrapped run laid out in `width` px.
    fn run_height(&self, run: &TextRun, width: f32) -> Result<f32, RenderError> {
        if !run.scale.is_finite() || run.scale <= 0.0 {
            return Err(RenderError::InvalidScale(run.scale));
        }
        check_dimension("line_height", run.line_height)?;
        check_dimension("indent_px", run.indent_px)?;
        // Tracking may be negative (tightened display headings).
        if !run.letter_spacing_em.is_finite() {
            return Err(RenderError::InvalidDimension {
                field: "letter_spacing_em",
                value: run.letter_spacing_em,
            });
        }

        let text = run.display_text();
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        let run_px = self.font_px * run.scale;
        let available = width - run.indent_px;
        if available <= 0.0 {
            return Err(RenderError::NoHorizontalSpace { available });
        }
        let max_width_em = available / run_px;
        let style = glyph_style(run);

        // Hard line breaks each open at least one line box.
        let lines: usize = text
            .split('\n')
            .map(|line| self.metrics.wrap_line_count(line, max_width_em, style).max(1))
            .sum();

        Ok(lines as f32 * run_px * run.line_height)
    }

    /// Unwrapped width of the run's widest hard line, in px.
    fn run_width(&self, run: &TextRun) -> f32 {
        let style = glyph_style(run);
        let run_px = self.font_px * run.scale;
        run.display_text()
            .split('\n')
            .map(|line| self.metrics.measure_styled(line.trim(), style) * run_px)
            .fold(0.0_f32, f32::max)
            + run.indent_px
    }
}

fn glyph_style(run: &TextRun) -> GlyphStyle {
    GlyphStyle {
        bold: run.bold,
        letter_spacing_em: run.letter_spacing_em,
    }
}

fn check_dimension(field: &'static str, value: f32) -> Result<(), RenderError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidDimension { field, value })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sandbox
// ────────────────────────────────────────────────────────────────────────────

/// A block that could not be measured and was replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureWarning {
    pub order: usize,
    pub label: String,
    pub reason: String,
}

/// Result of measuring one pass worth of blocks.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub blocks: Vec<MeasuredBlock>,
    pub warnings: Vec<MeasureWarning>,
}

/// The single off-view measurement area owned by a paginator.
pub struct MeasurementSandbox<M: Measure = MetricSurface> {
    surface: M,
    scratch: Vec<MeasuredBlock>,
}

impl<M: Measure> MeasurementSandbox<M> {
    pub fn new(surface: M) -> Self {
        MeasurementSandbox {
            surface,
            scratch: Vec::new(),
        }
    }

    /// Measures every block in order under `ctx`.
    pub fn measure(&mut self, blocks: Vec<ContentBlock>, ctx: &LayoutContext) -> Measurement {
        self.scratch.clear();
        self.scratch.reserve(blocks.len());
        let mut warnings = Vec::new();

        for block in blocks {
            let measured = match self.surface.measure(&block.payload, ctx) {
                Ok(height) if height.is_finite() && height >= 0.0 => {
                    MeasuredBlock::new(block, height)
                }
                Ok(height) => placeholder(
                    block,
                    format!("surface reported height {height}"),
                    &mut warnings,
                ),
                Err(e) => placeholder(block, e.to_string(), &mut warnings),
            };
            self.scratch.push(measured);
        }

        debug!(
            blocks = self.scratch.len(),
            failed = warnings.len(),
            "measured blocks off-view"
        );

        Measurement {
            blocks: std::mem::take(&mut self.scratch),
            warnings,
        }
    }
}

impl Default for MeasurementSandbox<MetricSurface> {
    fn default() -> Self {
        MeasurementSandbox::new(MetricSurface)
    }
}

fn placeholder(
    block: ContentBlock,
    reason: String,
    warnings: &mut Vec<MeasureWarning>,
) -> MeasuredBlock {
    warn!(
        order = block.order,
        label = %block.label,
        "block failed to render, substituting placeholder: {reason}"
    );
    warnings.push(MeasureWarning {
        order: block.order,
        label: block.label.clone(),
        reason,
    });
    let payload = Fragment::error_placeholder(&block.label);
    MeasuredBlock::new(ContentBlock { payload, ..block }, PLACEHOLDER_HEIGHT_PX)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
