//! Modern: uppercase header with a one-line contact bar, left-ruled
//! descriptions and skill chips.

use crate::layout::fragment::{ContentBlock, Element, Fragment, TextRun};
use crate::models::ResumeData;
use crate::templates::scale::{BASE, LEADING_RELAXED, LEADING_TIGHT, LG, SM, X4L, XL, XS};
use crate::templates::{bullet_lines, join_present, split_list, BlockSequence};

fn small_heading(title: &str) -> TextRun {
    TextRun::new(title)
        .scale(XS)
        .line_height(1.333)
        .bold()
        .uppercase()
        .tracking(0.1)
}

/// Large ruled heading used for the main sections.
fn ruled_heading(title: &str, margin_top_px: f32, margin_bottom_px: f32) -> Fragment {
    Fragment::new()
        .margins(margin_top_px, margin_bottom_px)
        .border_bottom(8.0, 1.0)
        .text(
            TextRun::new(title)
                .scale(XL)
                .line_height(1.4)
                .bold()
                .uppercase()
                .tracking(0.05),
        )
}

pub fn render(data: &ResumeData) -> Vec<ContentBlock> {
    let mut seq = BlockSequence::default();

    let contact = join_present(
        &[
            data.location.as_str(),
            data.email.as_str(),
            data.phone.as_str(),
            data.linkedin.as_str(),
        ],
        "  |  ",
    );
    seq.push(
        "header",
        Fragment::new()
            .margins(0.0, 32.0)
            .border_bottom(24.0, 2.0)
            .text(
                TextRun::new(&data.full_name)
                    .scale(X4L)
                    .line_height(LEADING_TIGHT)
                    .bold()
                    .uppercase()
                    .tracking(-0.025),
            )
            .push(Element::Spacer { height_px: 8.0 })
            .text(
                TextRun::new(&data.job_title)
                    .scale(LG)
                    .line_height(1.556)
                    .uppercase()
                    .tracking(0.05),
            )
            .push(Element::Spacer { height_px: 16.0 })
            .text(TextRun::new(contact).scale(SM)),
    );

    seq.push(
        "summary",
        Fragment::new()
            .margins(0.0, 32.0)
            .text(small_heading("Summary"))
            .push(Element::Spacer { height_px: 12.0 })
            .text(TextRun::new(&data.summary).line_height(LEADING_RELAXED)),
    );

    let achievements = bullet_lines(data.key_achievements.as_deref().unwrap_or_default());
    if !achievements.is_empty() {
        seq.push(
            "achievements",
            Fragment::new()
                .margins(0.0, 32.0)
                .text(small_heading("Key Achievements"))
                .push(Element::Spacer { height_px: 12.0 })
                .push(Element::List {
                    items: achievements
                        .into_iter()
                        .map(|line| TextRun::new(line).line_height(LEADING_RELAXED).indent(16.0))
                        .collect(),
                    columns: 1,
                    row_gap_px: 8.0,
                    marker: false,
                }),
        );
    }

    seq.push("experience:heading", ruled_heading("Experience", 0.0, 24.0));
    for (i, exp) in data.experience.iter().enumerate() {
        let dates = if exp.end_date.trim().is_empty() {
            exp.start_date.clone()
        } else {
            format!("{} – {}", exp.start_date, exp.end_date)
        };
        seq.push(
            format!("experience:{i}"),
            Fragment::new()
                .margins(0.0, 32.0)
                .push(Element::Row {
                    left: vec![TextRun::new(&exp.company).scale(LG).line_height(1.556).bold()],
                    right: TextRun::new(dates).scale(SM).italic(),
                })
                .push(Element::Spacer { height_px: 4.0 })
                .text(TextRun::new(&exp.role).scale(BASE))
                .push(Element::Spacer { height_px: 12.0 })
                .text(
                    TextRun::new(&exp.description)
                        .line_height(LEADING_RELAXED)
                        .indent(16.0),
                ),
        );
    }

    seq.push(
        "education:heading",
        ruled_heading("Education & Certifications", 8.0, 24.0),
    );
    for (i, edu) in data.education.iter().enumerate() {
        seq.push(
            format!("education:{i}"),
            Fragment::new()
                .margins(0.0, 16.0)
                .push(Element::Row {
                    left: vec![TextRun::new(&edu.school).bold()],
                    right: TextRun::new(&edu.year).scale(SM).italic(),
                })
                .text(TextRun::new(&edu.degree)),
        );
    }

    seq.push(
        "certifications",
        Fragment::new()
            .margins(24.0, 32.0)
            .text(
                TextRun::new("Certifications")
                    .scale(SM)
                    .bold()
                    .uppercase()
                    .tracking(0.05),
            )
            .push(Element::Spacer { height_px: 8.0 })
            .text(TextRun::new(&data.certifications)),
    );

    seq.push(
        "skills",
        ruled_heading("Technical Skills", 0.0, 0.0)
            .push(Element::Spacer { height_px: 16.0 })
            .push(Element::List {
                items: split_list(&data.skills)
                    .into_iter()
                    .map(|skill| TextRun::new(skill).scale(SM).line_height(2.0))
                    .collect(),
                columns: 3,
                row_gap_px: 8.0,
                marker: false,
            }),
    );

    seq.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_bar_skips_missing_fields() {
        let mut data = ResumeData::sample();
        data.phone.clear();
        let blocks = render(&data);
        let header = &blocks[0].payload;
        let contact = header
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Text(run) => Some(run.text.clone()),
                _ => None,
            })
            .last()
            .unwrap();
        assert_eq!(
            contact,
            "San Francisco, CA  |  joelpillar51@gmail.com  |  linkedin.com/in/johnsmith"
        );
    }

    #[test]
    fn test_one_block_per_education_entry() {
        let mut data = ResumeData::sample();
        data.education.push(data.education[0].clone());
        let labels: Vec<String> = render(&data).into_iter().map(|b| b.label).collect();
        assert!(labels.contains(&"education:0".to_string()));
        assert!(labels.contains(&"education:1".to_string()));
    }
}
