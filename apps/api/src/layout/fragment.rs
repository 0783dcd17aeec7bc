//! Content blocks and their renderable payload.
//!
//! A [`ContentBlock`] is the atomic unit handed from a template to the engine.
//! Its [`Fragment`] payload describes a vertical box of text runs, rows, grids,
//! rules and spacers. The packer and page renderer never look inside it; only
//! the measurement surface and the print export interpret it.

use serde::{Deserialize, Serialize};

/// Height given to the placeholder that replaces a block which failed to render.
pub const PLACEHOLDER_HEIGHT_PX: f32 = 24.0;

// ────────────────────────────────────────────────────────────────────────────
// Text runs
// ────────────────────────────────────────────────────────────────────────────

/// A run of text sharing one style. `scale` is relative to the document font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub scale: f32,
    /// Line box height as a multiple of the run's font size.
    pub line_height: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default)]
    pub letter_spacing_em: f32,
    #[serde(default)]
    pub indent_px: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            scale: 1.0,
            line_height: 1.5,
            bold: false,
            italic: false,
            uppercase: false,
            letter_spacing_em: 0.0,
            indent_px: 0.0,
        }
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn tracking(mut self, letter_spacing_em: f32) -> Self {
        self.letter_spacing_em = letter_spacing_em;
        self
    }

    pub fn indent(mut self, indent_px: f32) -> Self {
        self.indent_px = indent_px;
        self
    }

    /// Text as it is painted (uppercase transform applied).
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Elements and fragments
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Wrapped paragraph. `\n` starts a new line.
    Text(TextRun),
    /// Space-between row: `right` is a single line, `left` stacks in the rest.
    Row { left: Vec<TextRun>, right: TextRun },
    /// Row-major grid of items.
    List {
        items: Vec<TextRun>,
        columns: u8,
        row_gap_px: f32,
        marker: bool,
    },
    Rule { thickness_px: f32 },
    Spacer { height_px: f32 },
}

/// A vertical box: margins, bottom padding and border, then elements stacked
/// with `gap_px` between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub margin_top_px: f32,
    pub margin_bottom_px: f32,
    pub padding_bottom_px: f32,
    pub border_bottom_px: f32,
    pub gap_px: f32,
    pub elements: Vec<Element>,
}

impl Fragment {
    pub fn new() -> Self {
        Fragment::default()
    }

    pub fn margins(mut self, top_px: f32, bottom_px: f32) -> Self {
        self.margin_top_px = top_px;
        self.margin_bottom_px = bottom_px;
        self
    }

    pub fn border_bottom(mut self, padding_px: f32, border_px: f32) -> Self {
        self.padding_bottom_px = padding_px;
        self.border_bottom_px = border_px;
        self
    }

    pub fn gap(mut self, gap_px: f32) -> Self {
        self.gap_px = gap_px;
        self
    }

    pub fn push(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn text(self, run: TextRun) -> Self {
        self.push(Element::Text(run))
    }

    /// Visible stand-in for a block that could not be rendered.
    pub fn error_placeholder(label: &str) -> Self {
        Fragment::new().text(
            TextRun::new(format!("⚠ This section ({label}) could not be rendered"))
                .scale(0.75)
                .italic(),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

/// An unmeasured block, fresh from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// 0-based position in the template's output.
    pub order: usize,
    pub label: String,
    pub payload: Fragment,
}

impl ContentBlock {
    pub fn new(order: usize, label: impl Into<String>, payload: Fragment) -> Self {
        ContentBlock {
            order,
            label: label.into(),
            payload,
        }
    }
}

/// A block with its rendered height (own margins included).
///
/// Only the measurement sandbox creates these for live passes, so an
/// unmeasured block cannot reach the packer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredBlock {
    block: ContentBlock,
    height: f32,
}

impl MeasuredBlock {
    pub(crate) fn new(block: ContentBlock, height: f32) -> Self {
        MeasuredBlock { block, height }
    }

    pub fn order(&self) -> usize {
        self.block.order
    }

    pub fn label(&self) -> &str {
        &self.block.label
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn into_block(self) -> ContentBlock {
        self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_run_builder_sets_style() {
        let run = TextRun::new("Summary")
            .scale(0.75)
            .bold()
            .uppercase()
            .tracking(0.1);
        assert_eq!(run.display_text(), "SUMMARY");
        assert!(run.bold);
        assert!((run.scale - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_placeholder_mentions_label() {
        let fragment = Fragment::error_placeholder("experience:2");
        match &fragment.elements[0] {
            Element::Text(run) => assert!(run.text.contains("experience:2")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_element_json_is_tagged() {
        let json = serde_json::to_value(Element::Rule { thickness_px: 2.0 }).unwrap();
        assert_eq!(json["kind"], "rule");
        assert_eq!(json["thickness_px"], 2.0);
    }
}
