//! Static font-metric tables for the fonts offered in the style picker.
//!
//! Widths are in em units (relative to font size). Every family shares one
//! base table of Helvetica-like advance widths and applies its own horizontal
//! scale; this is close enough to drive word wrapping, and the same tables are
//! used for every pass so page breaks stay stable between identical inputs.
//! The base table covers ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Font families the user can pick for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Editor default.
    Helvetica,
    Inter,
    Lato,
    Georgia,
    /// Old-style serif, noticeably narrower than the sans faces.
    EbGaramond,
    /// Condensed display sans-serif.
    Oswald,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        FontFamily::Helvetica,
        FontFamily::Inter,
        FontFamily::Lato,
        FontFamily::Georgia,
        FontFamily::EbGaramond,
        FontFamily::Oswald,
    ];

    /// Identifier used in JSON and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "helvetica",
            FontFamily::Inter => "inter",
            FontFamily::Lato => "lato",
            FontFamily::Georgia => "georgia",
            FontFamily::EbGaramond => "eb_garamond",
            FontFamily::Oswald => "oswald",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Inter => "Inter",
            FontFamily::Lato => "Lato",
            FontFamily::Georgia => "Georgia",
            FontFamily::EbGaramond => "EB Garamond",
            FontFamily::Oswald => "Oswald",
        }
    }

    /// CSS `font-family` stack applied to visible page containers.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
            FontFamily::Inter => "Inter, Helvetica, Arial, sans-serif",
            FontFamily::Lato => "Lato, Helvetica, Arial, sans-serif",
            FontFamily::Georgia => "Georgia, 'Times New Roman', serif",
            FontFamily::EbGaramond => "'EB Garamond', Garamond, serif",
            FontFamily::Oswald => "Oswald, 'Arial Narrow', sans-serif",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FontFamily {
    type Err = LayoutError;

    /// Accepts the identifier, the display label, or the full CSS stack.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FontFamily::ALL
            .into_iter()
            .find(|f| {
                f.id().eq_ignore_ascii_case(needle)
                    || f.label().eq_ignore_ascii_case(needle)
                    || f.css_stack().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| LayoutError::UnknownFont(needle.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Extra advance applied to bold runs.
const BOLD_WIDTH_FACTOR: f32 = 1.06;

/// Per-run glyph adjustments that change advance widths.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphStyle {
    pub bold: bool,
    pub letter_spacing_em: f32,
}

/// Character-width table for one font family.
///
/// `measure_str` returns em units at 1em. Non-ASCII characters fall back to
/// `average_char_width`.
pub struct FontMetricTable {
    pub font: FontFamily,
    /// Horizontal scale applied to `BASE_WIDTHS`.
    scale: f32,
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Advance width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            BASE_WIDTHS[code - 32] * self.scale
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of a string with bold and letter-spacing applied.
    pub fn measure_styled(&self, s: &str, style: GlyphStyle) -> f32 {
        let base = self.measure_str(s);
        let weighted = if style.bold {
            base * BOLD_WIDTH_FACTOR
        } else {
            base
        };
        weighted + style.letter_spacing_em * s.chars().count() as f32
    }

    /// Advance of the inter-word space under `style`, from the family's own
    /// space width.
    pub fn space_advance(&self, style: GlyphStyle) -> f32 {
        let base = if style.bold {
            self.space_width * BOLD_WIDTH_FACTOR
        } else {
            self.space_width
        };
        base + style.letter_spacing_em
    }

    /// Number of lines a single hard line occupies when greedily word-wrapped
    /// at `max_width_em`.
    ///
    /// Whitespace-only input returns 0. A word wider than the line is kept on
    /// its own line and overflows horizontally, as a browser does without
    /// `word-break`.
    pub fn wrap_line_count(&self, s: &str, max_width_em: f32, style: GlyphStyle) -> usize {
        let mut words = s.split_whitespace();
        let Some(first) = words.next() else {
            return 0;
        };

        let space_w = self.space_advance(style);
        let mut line_count = 1usize;
        let mut current_width = self.measure_styled(first, style);

        for word in words {
            let word_w = self.measure_styled(word, style);
            if current_width + space_w + word_w > max_width_em {
                line_count += 1;
                current_width = word_w;
            } else {
                current_width += space_w + word_w;
            }
        }
        line_count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica-like advance widths for the 95 printable ASCII characters.
#[rustfmt::skip]
static BASE_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.28, 0.28, 0.36, 0.56, 0.56, 0.89, 0.67, 0.19, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.58, 0.58, 0.58, 0.56, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.67, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.50, 0.67, 0.56, 0.83,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
    // [     \     ]     ^     _     `
    0.28, 0.28, 0.28, 0.47, 0.56, 0.33,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.28, 0.56, 0.56, 0.22, 0.22, 0.50, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.50, 0.28, 0.56, 0.50, 0.72, 0.50, 0.50, 0.50,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.58,
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    scale: 1.0,
    average_char_width: 0.54,
    space_width: 0.28,
};

/// Slightly wider than Helvetica at the same size.
static INTER_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Inter,
    scale: 1.03,
    average_char_width: 0.56,
    space_width: 0.29,
};

static LATO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Lato,
    scale: 1.05,
    average_char_width: 0.57,
    space_width: 0.29,
};

static GEORGIA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Georgia,
    scale: 1.10,
    average_char_width: 0.59,
    space_width: 0.31,
};

/// Approx. 85% of Helvetica.
static EB_GARAMOND_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::EbGaramond,
    scale: 0.85,
    average_char_width: 0.46,
    space_width: 0.24,
};

/// Approx. 68% of Helvetica.
static OSWALD_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Oswald,
    scale: 0.68,
    average_char_width: 0.37,
    space_width: 0.19,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::Lato => &LATO_TABLE,
        FontFamily::Georgia => &GEORGIA_TABLE,
        FontFamily::EbGaramond => &EB_GARAMOND_TABLE,
        FontFamily::Oswald => &OSWALD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: GlyphStyle = GlyphStyle {
        bold: false,
        letter_spacing_em: 0.0,
    };

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Helvetica);
        // "Rust" = R(0.72) + u(0.56) + s(0.50) + t(0.28) = 2.06
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.06).abs() < 1e-3,
            "Rust width should be ~2.06, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_and_tracking_widen_text() {
        let metrics = get_metrics(FontFamily::Inter);
        let plain = metrics.measure_styled("Experience", PLAIN);
        let bold = metrics.measure_styled(
            "Experience",
            GlyphStyle {
                bold: true,
                letter_spacing_em: 0.0,
            },
        );
        let tracked = metrics.measure_styled(
            "Experience",
            GlyphStyle {
                bold: false,
                letter_spacing_em: 0.1,
            },
        );
        assert!(bold > plain);
        assert!((tracked - plain - 1.0).abs() < 1e-3, "10 chars × 0.1em");
    }

    #[test]
    fn test_wrap_whitespace_only_is_zero_lines() {
        let metrics = get_metrics(FontFamily::Helvetica);
        assert_eq!(metrics.wrap_line_count("   \t ", 40.0, PLAIN), 0);
    }

    #[test]
    fn test_wrap_single_word_is_one_line() {
        let metrics = get_metrics(FontFamily::Helvetica);
        assert_eq!(metrics.wrap_line_count("Rust", 40.0, PLAIN), 1);
    }

    #[test]
    fn test_wrap_overlong_word_stays_on_one_line() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let word = "a".repeat(200);
        assert_eq!(metrics.wrap_line_count(&word, 10.0, PLAIN), 1);
    }

    #[test]
    fn test_wrap_long_text_wraps() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let text = "word ".repeat(40);
        // 40 words × ~2.5em each ≈ 100em across a 42em line
        let lines = metrics.wrap_line_count(&text, 42.0, PLAIN);
        assert!((2..=4).contains(&lines), "expected 2–4 lines, got {lines}");
    }

    #[test]
    fn test_space_advance_uses_family_space_width() {
        let garamond = get_metrics(FontFamily::EbGaramond);
        assert_eq!(garamond.space_advance(PLAIN), garamond.space_width);

        let tracked = GlyphStyle {
            bold: true,
            letter_spacing_em: 0.1,
        };
        let expected = garamond.space_width * BOLD_WIDTH_FACTOR + 0.1;
        assert!((garamond.space_advance(tracked) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_wider_space_wraps_sooner() {
        // Same glyph widths, only the space differs.
        let narrow = FontMetricTable {
            font: FontFamily::Helvetica,
            scale: 1.0,
            average_char_width: 0.54,
            space_width: 0.1,
        };
        let wide = FontMetricTable {
            space_width: 2.0,
            ..narrow
        };
        let text = "ab ".repeat(20);
        assert!(
            wide.wrap_line_count(&text, 10.0, PLAIN) > narrow.wrap_line_count(&text, 10.0, PLAIN)
        );
    }

    #[test]
    fn test_wrap_is_monotonic_in_width() {
        let metrics = get_metrics(FontFamily::Georgia);
        let text = "Designed and delivered intuitive web and mobile interfaces by translating \
                    user research, business goals, and product requirements into wireframes.";
        let mut previous = usize::MAX;
        for width in [10.0, 15.0, 20.0, 30.0, 45.0, 80.0] {
            let lines = metrics.wrap_line_count(text, width, PLAIN);
            assert!(lines <= previous, "wider lines must not add lines");
            previous = lines;
        }
    }

    #[test]
    fn test_condensed_font_narrower_than_wide_font() {
        let text = "Collaborated with product managers";
        assert!(
            get_metrics(FontFamily::Oswald).measure_str(text)
                < get_metrics(FontFamily::Georgia).measure_str(text)
        );
    }

    #[test]
    fn test_font_family_parses_id_label_and_css_stack() {
        assert_eq!(
            "helvetica".parse::<FontFamily>().unwrap(),
            FontFamily::Helvetica
        );
        assert_eq!(
            "EB Garamond".parse::<FontFamily>().unwrap(),
            FontFamily::EbGaramond
        );
        assert_eq!(
            "Helvetica, Arial, sans-serif".parse::<FontFamily>().unwrap(),
            FontFamily::Helvetica
        );
        assert!(matches!(
            "Comic Sans".parse::<FontFamily>(),
            Err(LayoutError::UnknownFont(_))
        ));
    }

    #[test]
    fn test_every_family_has_a_table() {
        for font in FontFamily::ALL {
            assert_eq!(get_metrics(font).font, font);
        }
    }
}
