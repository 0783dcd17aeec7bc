//! Page renderer: turns packed pages into page containers sized to the
//! physical page.
//!
//! The whole [`PageSet`] is built before anyone can see it; callers publish it
//! by swapping an `Arc<PageSet>`, never by patching an existing one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::layout::context::{LayoutContext, PageGeometry};
use crate::layout::font_metrics::FontFamily;
use crate::layout::fragment::Fragment;
use crate::layout::packer::Page;
use crate::layout::page_fill::{analyze_page, PageFill, PageFillVerdict};
use crate::layout::sandbox::MeasureWarning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insets {
    pub top_px: f32,
    pub right_px: f32,
    pub bottom_px: f32,
    pub left_px: f32,
}

impl Insets {
    pub fn of(geometry: &PageGeometry) -> Self {
        Insets {
            top_px: geometry.inset_top_px,
            right_px: geometry.inset_right_px,
            bottom_px: geometry.inset_bottom_px,
            left_px: geometry.inset_left_px,
        }
    }
}

/// A block as placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBlock {
    pub order: usize,
    pub label: String,
    pub height_px: f32,
    pub payload: Fragment,
}

/// One physical page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContainer {
    pub index: usize,
    pub width_px: f32,
    /// Outer height: content box plus top and bottom insets.
    pub height_px: f32,
    /// Larger of the page capacity and the page's own content height, so an
    /// overflowing page shows all of its block instead of clipping it.
    pub content_height_px: f32,
    pub insets: Insets,
    pub font_family: FontFamily,
    pub font_css: &'static str,
    pub font_size_pt: f32,
    pub fill: PageFill,
    pub blocks: Vec<RenderedBlock>,
}

/// The complete output of one layout pass.
#[derive(Debug, Clone, Serialize)]
pub struct PageSet {
    /// Ticket of the pass that produced this set.
    pub pass: u64,
    pub context: LayoutContext,
    pub pages: Vec<PageContainer>,
    pub warnings: Vec<MeasureWarning>,
    pub rendered_at: DateTime<Utc>,
}

impl PageSet {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Block orders per page, in display order.
    pub fn block_orders(&self) -> Vec<Vec<usize>> {
        self.pages
            .iter()
            .map(|p| p.blocks.iter().map(|b| b.order).collect())
            .collect()
    }
}

/// Materializes packed pages into containers carrying `ctx`'s typography.
pub fn render_pages(
    pages: Vec<Page>,
    ctx: &LayoutContext,
    pass: u64,
    warnings: Vec<MeasureWarning>,
) -> PageSet {
    let capacity = ctx.page_content_height();
    let geometry = ctx.geometry;
    let insets = Insets::of(&geometry);

    let containers = pages
        .into_iter()
        .map(|page| {
            let fill = analyze_page(&page, capacity);
            if fill.verdict == PageFillVerdict::Overflow {
                warn!(
                    page = page.index(),
                    block = page.blocks().first().map(|b| b.label()).unwrap_or_default(),
                    overflow_px = fill.overflow_px,
                    "single block exceeds page capacity; page renders taller"
                );
            }

            let content_height_px = capacity.max(page.height());
            let index = page.index();
            let blocks = page
                .into_blocks()
                .into_iter()
                .map(|measured| {
                    let height_px = measured.height();
                    let block = measured.into_block();
                    RenderedBlock {
                        order: block.order,
                        label: block.label,
                        height_px,
                        payload: block.payload,
                    }
                })
                .collect();

            PageContainer {
                index,
                width_px: geometry.width_px(),
                height_px: content_height_px + insets.top_px + insets.bottom_px,
                content_height_px,
                insets,
                font_family: ctx.font_family,
                font_css: ctx.font_family.css_stack(),
                font_size_pt: ctx.font_size_pt,
                fill,
                blocks,
            }
        })
        .collect();

    PageSet {
        pass,
        context: *ctx,
        pages: containers,
        warnings,
        rendered_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fragment::{ContentBlock, MeasuredBlock};
    use crate::layout::packer::pack_pages;

    fn make_ctx() -> LayoutContext {
        LayoutContext::new(PageGeometry::A4, FontFamily::Georgia, 11.0).unwrap()
    }

    fn render(heights: &[f32]) -> PageSet {
        let ctx = make_ctx();
        let blocks = heights
            .iter()
            .enumerate()
            .map(|(i, h)| MeasuredBlock::new(ContentBlock::new(i, "b", Fragment::new()), *h))
            .collect();
        let pages = pack_pages(blocks, ctx.page_content_height());
        render_pages(pages, &ctx, 7, Vec::new())
    }

    #[test]
    fn test_containers_use_page_capacity_when_content_fits() {
        let set = render(&[100.0, 200.0]);
        let page = &set.pages[0];
        let ctx = make_ctx();
        assert_eq!(page.content_height_px, ctx.page_content_height());
        assert!((page.height_px - ctx.geometry.height_px()).abs() < 1e-3);
        assert!((page.width_px - 793.7).abs() < 0.1);
    }

    #[test]
    fn test_overflowing_page_grows_to_fit_its_block() {
        let set = render(&[1500.0]);
        let page = &set.pages[0];
        assert_eq!(page.content_height_px, 1500.0);
        assert_eq!(page.height_px, 1500.0 + 96.0);
        assert_eq!(page.fill.verdict, PageFillVerdict::Overflow);
    }

    #[test]
    fn test_containers_carry_pass_typography() {
        let set = render(&[10.0]);
        assert_eq!(set.pass, 7);
        assert_eq!(set.pages[0].font_family, FontFamily::Georgia);
        assert_eq!(set.pages[0].font_css, FontFamily::Georgia.css_stack());
        assert_eq!(set.pages[0].font_size_pt, 11.0);
    }

    #[test]
    fn test_block_order_is_kept_across_containers() {
        let set = render(&[600.0, 600.0, 300.0, 900.0]);
        assert_eq!(set.block_orders(), vec![vec![0], vec![1, 2], vec![3]]);
        assert_eq!(set.page_count(), 3);
        assert_eq!(set.pages[1].blocks[1].height_px, 300.0);
    }

    #[test]
    fn test_empty_document_renders_one_blank_page() {
        let set = render(&[]);
        assert_eq!(set.page_count(), 1);
        assert!(set.pages[0].blocks.is_empty());
        assert_eq!(set.pages[0].fill.verdict, PageFillVerdict::Empty);
    }
}
