//! Page geometry and the per-pass layout context.

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;
use crate::layout::font_metrics::FontFamily;

/// CSS reference pixels per millimetre (96 px per inch).
pub const PX_PER_MM: f32 = 96.0 / 25.4;
/// CSS reference pixels per typographic point.
pub const PX_PER_PT: f32 = 96.0 / 72.0;

pub const MIN_FONT_SIZE_PT: f32 = 8.0;
pub const MAX_FONT_SIZE_PT: f32 = 16.0;
/// Step used by the size picker. Other fractional values are accepted too.
pub const FONT_SIZE_STEP_PT: f32 = 0.5;
pub const DEFAULT_FONT_SIZE_PT: f32 = 12.5;

/// Uniform inset applied to every side of an A4 page by default.
pub const DEFAULT_INSET_PX: f32 = 48.0;

/// Physical page size plus the fixed content insets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub inset_top_px: f32,
    pub inset_right_px: f32,
    pub inset_bottom_px: f32,
    pub inset_left_px: f32,
}

impl PageGeometry {
    /// ISO A4 (210 × 297 mm) with the default 48px insets.
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        inset_top_px: DEFAULT_INSET_PX,
        inset_right_px: DEFAULT_INSET_PX,
        inset_bottom_px: DEFAULT_INSET_PX,
        inset_left_px: DEFAULT_INSET_PX,
    };

    /// A4 with the same inset on all four sides.
    pub fn a4_with_inset(inset_px: f32) -> Self {
        PageGeometry {
            inset_top_px: inset_px,
            inset_right_px: inset_px,
            inset_bottom_px: inset_px,
            inset_left_px: inset_px,
            ..PageGeometry::A4
        }
    }

    pub fn width_px(&self) -> f32 {
        self.width_mm * PX_PER_MM
    }

    pub fn height_px(&self) -> f32 {
        self.height_mm * PX_PER_MM
    }

    pub fn content_width_px(&self) -> f32 {
        self.width_px() - self.inset_left_px - self.inset_right_px
    }

    /// Usable vertical space per page: page height minus top and bottom insets.
    pub fn content_height_px(&self) -> f32 {
        self.height_px() - self.inset_top_px - self.inset_bottom_px
    }

    /// Rejects geometry that would leave no positive content box.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let dims = [
            self.width_mm,
            self.height_mm,
            self.inset_top_px,
            self.inset_right_px,
            self.inset_bottom_px,
            self.inset_left_px,
        ];
        if dims.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(LayoutError::InvalidGeometry(
                "dimensions must be finite and non-negative".to_string(),
            ));
        }
        if self.content_width_px() <= 0.0 || self.content_height_px() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "insets leave no content box ({:.1} × {:.1} px)",
                self.content_width_px(),
                self.content_height_px()
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

/// Style and geometry in force for one layout pass.
///
/// Built once per pass through [`LayoutContext::new`] and passed by reference to
/// every stage. Measurement and display both read it, so what is shown matches
/// what was measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutContext {
    pub geometry: PageGeometry,
    pub font_family: FontFamily,
    pub font_size_pt: f32,
}

impl LayoutContext {
    pub fn new(
        geometry: PageGeometry,
        font_family: FontFamily,
        font_size_pt: f32,
    ) -> Result<Self, LayoutError> {
        geometry.validate()?;
        validate_font_size(font_size_pt)?;
        Ok(LayoutContext {
            geometry,
            font_family,
            font_size_pt,
        })
    }

    /// Maximum usable vertical space per page (page capacity).
    pub fn page_content_height(&self) -> f32 {
        self.geometry.content_height_px()
    }

    pub fn content_width(&self) -> f32 {
        self.geometry.content_width_px()
    }

    pub fn font_size_px(&self) -> f32 {
        self.font_size_pt * PX_PER_PT
    }
}

pub fn validate_font_size(font_size_pt: f32) -> Result<(), LayoutError> {
    if font_size_pt.is_finite() && (MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT).contains(&font_size_pt) {
        Ok(())
    } else {
        Err(LayoutError::InvalidFontSize {
            value: font_size_pt,
            min: MIN_FONT_SIZE_PT,
            max: MAX_FONT_SIZE_PT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions_in_css_pixels() {
        let a4 = PageGeometry::A4;
        assert!((a4.width_px() - 793.7).abs() < 0.1);
        assert!((a4.height_px() - 1122.5).abs() < 0.1);
        assert!((a4.content_height_px() - 1026.5).abs() < 0.1);
        assert!((a4.content_width_px() - 697.7).abs() < 0.1);
    }

    #[test]
    fn test_context_accepts_fractional_font_size() {
        let ctx = LayoutContext::new(PageGeometry::A4, FontFamily::Helvetica, 12.5).unwrap();
        assert!((ctx.font_size_px() - 16.6667).abs() < 1e-3);
    }

    #[test]
    fn test_context_rejects_out_of_range_font_size() {
        for size in [7.5, 16.5, f32::NAN, f32::INFINITY] {
            let err = LayoutContext::new(PageGeometry::A4, FontFamily::Inter, size).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidFontSize { .. }));
        }
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(validate_font_size(MIN_FONT_SIZE_PT).is_ok());
        assert!(validate_font_size(MAX_FONT_SIZE_PT).is_ok());
    }

    #[test]
    fn test_oversized_insets_are_rejected() {
        let geometry = PageGeometry::a4_with_inset(600.0);
        assert!(matches!(
            geometry.validate(),
            Err(LayoutError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_custom_inset_changes_capacity() {
        let tight = PageGeometry::a4_with_inset(24.0);
        assert!(tight.content_height_px() > PageGeometry::A4.content_height_px());
    }
}
