//! Document templates: each one turns [`ResumeData`] into an ordered sequence of
//! content blocks for the pagination engine.
//!
//! Sizes mirror the editor's theme stylesheet: text scales are relative to the
//! document font size, spacing is in CSS px and does not follow the font size.

pub mod classic;
pub mod modern;
pub mod vanguard;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;
use crate::layout::fragment::{ContentBlock, Fragment};
use crate::models::ResumeData;

/// Text scales (relative to the document font size) and their default leading.
pub(crate) mod scale {
    pub const XS: f32 = 0.75;
    pub const SM: f32 = 0.875;
    pub const BASE: f32 = 1.0;
    pub const LG: f32 = 1.125;
    pub const XL: f32 = 1.25;
    pub const X4L: f32 = 2.25;
    pub const X5L: f32 = 3.0;

    pub const LEADING_TIGHT: f32 = 1.1;
    pub const LEADING_NORMAL: f32 = 1.5;
    pub const LEADING_RELAXED: f32 = 1.625;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Vanguard,
    Modern,
    Classic,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Vanguard,
        TemplateKind::Modern,
        TemplateKind::Classic,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TemplateKind::Vanguard => "vanguard",
            TemplateKind::Modern => "modern",
            TemplateKind::Classic => "classic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateKind::Vanguard => "Vanguard",
            TemplateKind::Modern => "Modern",
            TemplateKind::Classic => "Classic",
        }
    }

    /// Renders `data` into blocks numbered 0..n in display order.
    pub fn render(&self, data: &ResumeData) -> Vec<ContentBlock> {
        match self {
            TemplateKind::Vanguard => vanguard::render(data),
            TemplateKind::Modern => modern::render(data),
            TemplateKind::Classic => classic::render(data),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TemplateKind::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| LayoutError::UnknownTemplate(needle.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Collects blocks and assigns their `order` in push order.
#[derive(Debug, Default)]
pub(crate) struct BlockSequence {
    blocks: Vec<ContentBlock>,
}

impl BlockSequence {
    pub fn push(&mut self, label: impl Into<String>, payload: Fragment) {
        let order = self.blocks.len();
        self.blocks.push(ContentBlock::new(order, label, payload));
    }

    pub fn finish(self) -> Vec<ContentBlock> {
        self.blocks
    }
}

/// `"2024-05"` → `"May 2024"`. Empty or "present" → `"Present"`; anything
/// unparseable is returned unchanged.
pub fn format_month_year(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("present") {
        return "Present".to_string();
    }
    match NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Splits newline-separated bullet text, dropping blank lines and any leading
/// `•` or `-` marker.
pub fn bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c == '•' || c == '-')
                .trim_start()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits a comma separated field into trimmed, non-empty items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Joins the non-empty parts with `separator`.
pub(crate) fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_month_year() {
        assert_eq!(format_month_year("2024-05"), "May 2024");
        assert_eq!(format_month_year("present"), "Present");
        assert_eq!(format_month_year(""), "Present");
        assert_eq!(format_month_year("Summer 2021"), "Summer 2021");
    }

    #[test]
    fn test_bullet_lines_strip_markers_and_blanks() {
        let lines = bullet_lines("• First\n\n- Second\n   \nThird");
        assert_eq!(lines, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_split_list_trims_items() {
        assert_eq!(split_list(" HTML, CSS ,, Rust"), vec!["HTML", "CSS", "Rust"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_join_present_skips_empty_parts() {
        assert_eq!(join_present(&["a", " ", "b"], " | "), "a | b");
    }

    #[test]
    fn test_template_kind_parses() {
        assert_eq!("Modern".parse::<TemplateKind>().unwrap(), TemplateKind::Modern);
        assert!(matches!(
            "academic".parse::<TemplateKind>(),
            Err(LayoutError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_every_template_numbers_blocks_contiguously() {
        let data = ResumeData::sample();
        for template in TemplateKind::ALL {
            let blocks = template.render(&data);
            assert!(blocks.len() > 5, "{template} produced too few blocks");
            for (i, block) in blocks.iter().enumerate() {
                assert_eq!(block.order, i, "{template} block {}", block.label);
            }
        }
    }

    #[test]
    fn test_one_block_per_experience_entry() {
        let mut data = ResumeData::sample();
        let base = data.experience[0].clone();
        for template in TemplateKind::ALL {
            let before = template.render(&data).len();
            let mut more = data.clone();
            more.experience.push(base.clone());
            assert_eq!(template.render(&more).len(), before + 1, "{template}");
        }
        data.experience.clear();
        for template in TemplateKind::ALL {
            assert!(!template.render(&data).is_empty());
        }
    }
}
