//! Page fill analysis: how much of each page's content box is used.
//!
//! Computed for every packed page so the client can show overflow (a single
//! block taller than the page) and how full each page is.

use serde::{Deserialize, Serialize};

use crate::layout::packer::Page;

/// Overall page fill verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    /// No blocks (only for a document with no content).
    Empty,
    /// Content fits inside the page's content box.
    Fits,
    /// One block taller than the page; the page renders taller than standard.
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFill {
    pub block_count: usize,
    pub used_px: f32,
    pub capacity_px: f32,
    /// `used_px / capacity_px`, may exceed 1.0 on an overflowing page.
    pub fill_fraction: f32,
    pub overflow_px: f32,
    pub verdict: PageFillVerdict,
}

/// Analyzes one packed page against the page capacity.
pub fn analyze_page(page: &Page, capacity: f32) -> PageFill {
    let used = page.height();
    let fill_fraction = if capacity > 0.0 { used / capacity } else { 0.0 };
    let overflow_px = (used - capacity).max(0.0);

    let verdict = if page.is_empty() {
        PageFillVerdict::Empty
    } else if overflow_px > 0.0 {
        PageFillVerdict::Overflow
    } else {
        PageFillVerdict::Fits
    };

    PageFill {
        block_count: page.len(),
        used_px: used,
        capacity_px: capacity,
        fill_fraction,
        overflow_px,
        verdict,
    }
}
