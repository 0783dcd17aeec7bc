//! Print export: a committed [`PageSet`] as one standalone HTML document.
//!
//! Each page container becomes a `<section class="page">` at its rendered size,
//! with the pass's font applied, so the browser's print dialog produces the same
//! page breaks the editor shows.

use crate::layout::fragment::{Element, Fragment, TextRun};
use crate::layout::renderer::{PageContainer, PageSet};

const PRINT_CSS: &str = "@page{size:A4;margin:0}\
*{box-sizing:border-box}\
body{margin:0;background:#fff;color:#111}\
.page{position:relative;overflow:hidden;margin:0 auto;break-after:page;page-break-after:always}\
.page:last-child{break-after:auto;page-break-after:auto}\
.block{display:flex;flex-direction:column}\
.row{display:flex;flex-wrap:wrap;justify-content:space-between;column-gap:8px}\
.row .left{flex:1 1 50%;min-width:0}\
.row .right{flex:0 1 auto;max-width:100%}\
.grid{display:grid;column-gap:32px;margin:0;padding:0;list-style:none}\
.grid.marker li::before{content:'\\2022';display:inline-block;width:1.25em}\
p{margin:0;white-space:pre-wrap}\
hr{margin:0;border:0;border-top-style:solid;border-color:currentColor}";

pub fn render_print_html(set: &PageSet) -> String {
    let mut out = String::with_capacity(4096 * set.page_count().max(1));
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>Document ({} page{})</title>\n<style>{PRINT_CSS}</style>\n</head>\n<body>\n",
        set.page_count(),
        if set.page_count() == 1 { "" } else { "s" }
    ));
    for page in &set.pages {
        write_page(&mut out, page);
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn write_page(out: &mut String, page: &PageContainer) {
    let insets = page.insets;
    out.push_str(&format!(
        "<section class=\"page\" data-page=\"{}\" style=\"width:{:.2}px;height:{:.2}px;\
         padding:{}px {}px {}px {}px;font-family:{};font-size:{}pt\">\n",
        page.index + 1,
        page.width_px,
        page.height_px,
        insets.top_px,
        insets.right_px,
        insets.bottom_px,
        insets.left_px,
        escape(page.font_css),
        page.font_size_pt,
    ));
    for block in &page.blocks {
        write_fragment(out, block.order, &block.payload);
    }
    out.push_str("</section>\n");
}

fn write_fragment(out: &mut String, order: usize, fragment: &Fragment) {
    out.push_str(&format!(
        "<div class=\"block\" data-order=\"{order}\" style=\"margin:{}px 0 {}px;\
         padding-bottom:{}px;border-bottom:{}px solid currentColor;gap:{}px\">\n",
        fragment.margin_top_px,
        fragment.margin_bottom_px,
        fragment.padding_bottom_px,
        fragment.border_bottom_px,
        fragment.gap_px,
    ));
    for element in &fragment.elements {
        write_element(out, element);
    }
    out.push_str("</div>\n");
}

fn write_element(out: &mut String, element: &Element) {
    match element {
        Element::Text(run) => {
            out.push_str(&format!("<p style=\"{}\">{}</p>\n", run_style(run), escape(&run.text)));
        }
        Element::Row { left, right } => {
            out.push_str("<div class=\"row\"><div class=\"left\">");
            for run in left {
                out.push_str(&format!(
                    "<p style=\"{}\">{}</p>",
                    run_style(run),
                    escape(&run.text)
                ));
            }
            out.push_str(&format!(
                "</div><p class=\"right\" style=\"{}\">{}</p></div>\n",
                run_style(right),
                escape(&right.text)
            ));
        }
        Element::List {
            items,
            columns,
            row_gap_px,
            marker,
        } => {
            out.push_str(&format!(
                "<ul class=\"grid{}\" style=\"grid-template-columns:repeat({}, minmax(0, 1fr));row-gap:{}px\">",
                if *marker { " marker" } else { "" },
                (*columns).max(1),
                row_gap_px
            ));
            for item in items {
                out.push_str(&format!(
                    "<li style=\"{}\">{}</li>",
                    run_style(item),
                    escape(&item.text)
                ));
            }
            out.push_str("</ul>\n");
        }
        Element::Rule { thickness_px } => {
            out.push_str(&format!("<hr style=\"border-top-width:{thickness_px}px\">\n"));
        }
        Element::Spacer { height_px } => {
            out.push_str(&format!("<div style=\"height:{height_px}px\"></div>\n"));
        }
    }
}

fn run_style(run: &TextRun) -> String {
    let mut style = format!("font-size:{}em;line-height:{}", run.scale, run.line_height);
    if run.bold {
        style.push_str(";font-weight:700");
    }
    if run.italic {
        style.push_str(";font-style:italic");
    }
    if run.uppercase {
        style.push_str(";text-transform:uppercase");
    }
    if run.letter_spacing_em != 0.0 {
        style.push_str(&format!(";letter-spacing:{}em", run.letter_spacing_em));
    }
    if run.indent_px > 0.0 {
        style.push_str(&format!(";padding-left:{}px", run.indent_px));
    }
    style
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::context::PageGeometry;
    use crate::layout::relayout::{LayoutInputs, Paginator};
    use crate::layout::LayoutContext;
    use crate::layout::FontFamily;
    use crate::layout::fragment::ContentBlock;

    fn make_set(blocks: Vec<ContentBlock>) -> PageSet {
        let ctx = LayoutContext::new(PageGeometry::A4, FontFamily::Lato, 11.0).unwrap();
        Paginator::with_metrics(PageGeometry::A4).paginate_blocks(blocks, &ctx, 1)
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"R&D" 'x'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;x&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_one_section_per_page() {
        let mut paginator = Paginator::with_metrics(PageGeometry::A4);
        let set = paginator.run_pass(&LayoutInputs::default(), 1).unwrap();
        let html = render_print_html(&set);
        assert_eq!(html.matches("<section class=\"page\"").count(), set.page_count());
        assert!(html.contains("@page{size:A4;margin:0}"));
        assert!(html.contains("break-after:page"));
        assert!(html.contains(FontFamily::Helvetica.css_stack()));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let payload = Fragment::new().text(TextRun::new("<script>alert(1)</script>"));
        let html = render_print_html(&make_set(vec![ContentBlock::new(0, "x", payload)]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_blocks_keep_their_order() {
        let blocks = (0..3)
            .map(|i| ContentBlock::new(i, "b", Fragment::new().text(TextRun::new(format!("block {i}")))))
            .collect();
        let html = render_print_html(&make_set(blocks));
        let first = html.find("block 0").unwrap();
        let second = html.find("block 1").unwrap();
        let third = html.find("block 2").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_rows_wrap_like_the_measurement() {
        let payload = Fragment::new().push(Element::Row {
            left: vec![TextRun::new("Degree")],
            right: TextRun::new("2019 ".repeat(30)),
        });
        let html = render_print_html(&make_set(vec![ContentBlock::new(0, "education", payload)]));
        // Left side keeps half the row; a wider right side drops below it.
        assert!(html.contains(".row{display:flex;flex-wrap:wrap;"));
        assert!(html.contains(".row .left{flex:1 1 50%"));
        assert!(!html.contains("nowrap"));
        assert!(html.contains("<p class=\"right\""));
    }

    #[test]
    fn test_empty_document_still_has_a_page() {
        let html = render_print_html(&make_set(Vec::new()));
        assert_eq!(html.matches("<section").count(), 1);
        assert!(html.contains("1 page)"));
    }
}
