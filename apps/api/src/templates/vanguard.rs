//! Vanguard: centered header, contact grid, bordered section headings,
//! bulleted experience and a two-column skills list.

use crate::layout::fragment::{ContentBlock, Element, Fragment, TextRun};
use crate::models::ResumeData;
use crate::templates::scale::{
    BASE, LEADING_NORMAL, LEADING_RELAXED, LEADING_TIGHT, LG, SM, X4L, XS,
};
use crate::templates::{bullet_lines, format_month_year, split_list, BlockSequence};

const SECTION_GAP_PX: f32 = 24.0;

/// Small uppercase title over a 2px rule.
fn section(title: &str) -> Fragment {
    Fragment::new()
        .margins(0.0, SECTION_GAP_PX)
        .text(
            TextRun::new(title)
                .scale(XS)
                .line_height(1.333)
                .bold()
                .uppercase()
                .tracking(0.1),
        )
        .push(Element::Spacer { height_px: 4.0 })
        .push(Element::Rule { thickness_px: 2.0 })
        .push(Element::Spacer { height_px: 12.0 })
}

fn bullets(items: Vec<String>, indent_px: f32) -> Element {
    Element::List {
        items: items
            .into_iter()
            .map(|item| TextRun::new(item).scale(SM).indent(indent_px))
            .collect(),
        columns: 1,
        row_gap_px: 4.0,
        marker: true,
    }
}

pub fn render(data: &ResumeData) -> Vec<ContentBlock> {
    let mut seq = BlockSequence::default();

    seq.push(
        "header",
        Fragment::new()
            .text(
                TextRun::new(&data.full_name)
                    .scale(X4L)
                    .line_height(LEADING_TIGHT)
                    .bold(),
            )
            .push(Element::Spacer { height_px: 4.0 })
            .text(TextRun::new(&data.job_title).scale(LG).line_height(1.556))
            .push(Element::Spacer { height_px: SECTION_GAP_PX })
            .push(Element::Rule { thickness_px: 1.0 }),
    );

    let handle = data.at_handle.clone().unwrap_or_default();
    seq.push(
        "contact",
        Fragment::new()
            .margins(16.0, SECTION_GAP_PX)
            .push(Element::List {
                items: [&data.linkedin, &data.email, &handle]
                    .into_iter()
                    .map(|s| TextRun::new(s.as_str()).scale(XS).line_height(1.333))
                    .collect(),
                columns: 3,
                row_gap_px: 0.0,
                marker: false,
            })
            .push(Element::Spacer { height_px: 16.0 })
            .push(Element::Rule { thickness_px: 1.0 }),
    );

    seq.push(
        "summary",
        section("Professional Summary").text(
            TextRun::new(&data.summary)
                .scale(SM)
                .line_height(LEADING_RELAXED),
        ),
    );

    seq.push(
        "expertise",
        section("Areas of Expertise").push(Element::List {
            items: split_list(&data.skills)
                .into_iter()
                .map(|skill| TextRun::new(skill).scale(SM))
                .collect(),
            columns: 2,
            row_gap_px: 4.0,
            marker: true,
        }),
    );

    let achievements = bullet_lines(data.key_achievements.as_deref().unwrap_or_default());
    if !achievements.is_empty() {
        seq.push(
            "achievements",
            section("Key Achievement").push(bullets(achievements, 0.0)),
        );
    }

    // The experience title is its own block so entries can break between pages.
    seq.push(
        "experience:heading",
        section("Professional Experience").margins(0.0, 4.0),
    );
    for (i, exp) in data.experience.iter().enumerate() {
        let dates = format!(
            "{} - {}",
            format_month_year(&exp.start_date),
            format_month_year(&exp.end_date)
        );
        seq.push(
            format!("experience:{i}"),
            Fragment::new()
                .margins(0.0, SECTION_GAP_PX)
                .push(Element::Row {
                    left: vec![TextRun::new(&exp.role)
                        .scale(BASE)
                        .line_height(LEADING_NORMAL)
                        .bold()],
                    right: TextRun::new(dates).scale(XS).line_height(1.333),
                })
                .push(Element::Spacer { height_px: 4.0 })
                .text(TextRun::new(&exp.company).scale(SM).italic())
                .push(Element::Spacer { height_px: 8.0 })
                .push(bullets(bullet_lines(&exp.description), 8.0)),
        );
    }

    let mut education = section("Education").gap(8.0);
    for edu in &data.education {
        education = education.push(Element::Row {
            left: vec![
                TextRun::new(&edu.degree).scale(BASE).bold(),
                TextRun::new(&edu.school).scale(SM).italic(),
            ],
            right: TextRun::new(&edu.year).scale(XS).line_height(1.333),
        });
    }
    seq.push("education", education);

    if !data.certifications.trim().is_empty() {
        seq.push(
            "certification",
            section("Certification")
                .margins(0.0, 0.0)
                .push(bullets(vec![data.certifications.trim().to_string()], 0.0)),
        );
    }

    seq.finish()
}
