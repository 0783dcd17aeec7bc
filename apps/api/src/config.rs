use anyhow::{Context, Result};

use crate::layout::context::{DEFAULT_FONT_SIZE_PT, DEFAULT_INSET_PX};
use crate::layout::{FontFamily, LayoutContext, LayoutInputs, PageGeometry};
use crate::models::ResumeData;
use crate::templates::TemplateKind;

/// Open document sessions kept before the least recently used one is evicted.
pub const DEFAULT_MAX_OPEN_DOCUMENTS: usize = 256;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a malformed one fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_inset_px: f32,
    pub default_font: FontFamily,
    pub default_font_size_pt: f32,
    pub default_template: TemplateKind,
    pub max_open_documents: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            page_inset_px: env_or("PAGE_INSET_PX", &DEFAULT_INSET_PX.to_string())
                .parse::<f32>()
                .context("PAGE_INSET_PX must be a number of CSS px")?,
            default_font: env_or("DEFAULT_FONT", FontFamily::Helvetica.id())
                .parse::<FontFamily>()
                .context("DEFAULT_FONT must name a supported font family")?,
            default_font_size_pt: env_or("DEFAULT_FONT_SIZE_PT", &DEFAULT_FONT_SIZE_PT.to_string())
                .parse::<f32>()
                .context("DEFAULT_FONT_SIZE_PT must be a number")?,
            default_template: env_or("DEFAULT_TEMPLATE", TemplateKind::Vanguard.id())
                .parse::<TemplateKind>()
                .context("DEFAULT_TEMPLATE must name a supported template")?,
            max_open_documents: env_or(
                "MAX_OPEN_DOCUMENTS",
                &DEFAULT_MAX_OPEN_DOCUMENTS.to_string(),
            )
            .parse::<usize>()
            .context("MAX_OPEN_DOCUMENTS must be a whole number")?,
        };

        if config.max_open_documents == 0 {
            anyhow::bail!("MAX_OPEN_DOCUMENTS must be at least 1");
        }

        // Reject a geometry or font size no pass could use.
        LayoutContext::new(config.geometry(), config.default_font, config.default_font_size_pt)
            .context("invalid default layout settings")?;
        Ok(config)
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::a4_with_inset(self.page_inset_px)
    }

    /// Inputs for a document opened without any.
    pub fn default_inputs(&self) -> LayoutInputs {
        LayoutInputs {
            data: ResumeData::sample(),
            template: self.default_template,
            font_family: self.default_font,
            font_size_pt: self.default_font_size_pt,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            page_inset_px: DEFAULT_INSET_PX,
            default_font: FontFamily::Helvetica,
            default_font_size_pt: DEFAULT_FONT_SIZE_PT,
            default_template: TemplateKind::Vanguard,
            max_open_documents: DEFAULT_MAX_OPEN_DOCUMENTS,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_a_valid_layout() {
        let config = Config::default();
        assert!(LayoutContext::new(
            config.geometry(),
            config.default_font,
            config.default_font_size_pt
        )
        .is_ok());
        assert_eq!(config.default_inputs(), LayoutInputs::default());
    }
}
