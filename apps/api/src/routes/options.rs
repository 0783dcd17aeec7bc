use axum::{extract::State, Json};
use serde::Serialize;

use crate::layout::context::{FONT_SIZE_STEP_PT, MAX_FONT_SIZE_PT, MIN_FONT_SIZE_PT};
use crate::layout::renderer::Insets;
use crate::layout::FontFamily;
use crate::state::AppState;
use crate::templates::TemplateKind;

#[derive(Serialize)]
pub struct FontOption {
    pub id: &'static str,
    pub label: &'static str,
    pub css: &'static str,
}

#[derive(Serialize)]
pub struct TemplateOption {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct FontSizeRange {
    pub min_pt: f32,
    pub max_pt: f32,
    pub step_pt: f32,
    pub default_pt: f32,
}

#[derive(Serialize)]
pub struct PageOption {
    pub width_px: f32,
    pub height_px: f32,
    pub content_width_px: f32,
    pub content_height_px: f32,
    pub insets: Insets,
}

#[derive(Serialize)]
pub struct StyleOptions {
    pub fonts: Vec<FontOption>,
    pub default_font: FontFamily,
    pub font_size: FontSizeRange,
    pub templates: Vec<TemplateOption>,
    pub default_template: TemplateKind,
    pub page: PageOption,
}

/// GET /api/v1/style-options
/// Everything the editor's style panel offers, plus the page the engine lays out.
pub async fn handle_style_options(State(state): State<AppState>) -> Json<StyleOptions> {
    let geometry = state.config.geometry();
    Json(StyleOptions {
        fonts: FontFamily::ALL
            .into_iter()
            .map(|f| FontOption {
                id: f.id(),
                label: f.label(),
                css: f.css_stack(),
            })
            .collect(),
        default_font: state.config.default_font,
        font_size: FontSizeRange {
            min_pt: MIN_FONT_SIZE_PT,
            max_pt: MAX_FONT_SIZE_PT,
            step_pt: FONT_SIZE_STEP_PT,
            default_pt: state.config.default_font_size_pt,
        },
        templates: TemplateKind::ALL
            .into_iter()
            .map(|t| TemplateOption {
                id: t.id(),
                label: t.label(),
            })
            .collect(),
        default_template: state.config.default_template,
        page: PageOption {
            width_px: geometry.width_px(),
            height_px: geometry.height_px(),
            content_width_px: geometry.content_width_px(),
            content_height_px: geometry.content_height_px(),
            insets: Insets::of(&geometry),
        },
    })
}
