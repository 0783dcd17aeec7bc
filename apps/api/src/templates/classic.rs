//! Classic: oversized name over a heavy rule, serif-friendly spacing and a
//! two-column competencies list.

use crate::layout::fragment::{ContentBlock, Element, Fragment, TextRun};
use crate::models::ResumeData;
use crate::templates::scale::{BASE, LEADING_NORMAL, LEADING_RELAXED, LG, SM, X5L, XL};
use crate::templates::{bullet_lines, join_present, split_list, BlockSequence};

fn heading(title: &str) -> TextRun {
    TextRun::new(title)
        .scale(XL)
        .line_height(1.4)
        .bold()
        .uppercase()
        .tracking(0.1)
}

pub fn render(data: &ResumeData) -> Vec<ContentBlock> {
    let mut seq = BlockSequence::default();

    let mut header = Fragment::new()
        .margins(0.0, 40.0)
        .border_bottom(24.0, 4.0)
        .text(
            TextRun::new(&data.full_name)
                .scale(X5L)
                .line_height(1.0)
                .bold()
                .tracking(-0.05),
        )
        .push(Element::Spacer { height_px: 16.0 })
        .text(
            TextRun::new(join_present(
                &[
                    data.job_title.as_str(),
                    data.email.as_str(),
                    data.phone.as_str(),
                ],
                " • ",
            ))
            .scale(LG)
            .line_height(1.556),
        );
    if !data.linkedin.trim().is_empty() {
        header = header
            .push(Element::Spacer { height_px: 8.0 })
            .text(TextRun::new(data.linkedin.trim()).scale(SM).italic());
    }
    seq.push("header", header);

    seq.push(
        "summary",
        Fragment::new()
            .margins(0.0, 40.0)
            .text(heading("Professional Profile"))
            .push(Element::Spacer { height_px: 16.0 })
            .text(TextRun::new(&data.summary).scale(LG).line_height(LEADING_RELAXED)),
    );

    let achievements = bullet_lines(data.key_achievements.as_deref().unwrap_or_default());
    if !achievements.is_empty() {
        seq.push(
            "achievements",
            Fragment::new()
                .margins(0.0, 40.0)
                .text(heading("Key Achievements"))
                .push(Element::Spacer { height_px: 16.0 })
                .push(Element::List {
                    items: achievements
                        .into_iter()
                        .map(|line| TextRun::new(line).line_height(LEADING_RELAXED))
                        .collect(),
                    columns: 1,
                    row_gap_px: 8.0,
                    marker: true,
                }),
        );
    }

    seq.push(
        "experience:heading",
        Fragment::new()
            .margins(0.0, 24.0)
            .text(heading("Work Experience")),
    );
    for (i, exp) in data.experience.iter().enumerate() {
        let dates = join_present(&[exp.start_date.as_str(), exp.end_date.as_str()], " - ");
        seq.push(
            format!("experience:{i}"),
            Fragment::new()
                .margins(0.0, 32.0)
                .push(Element::Row {
                    left: vec![TextRun::new(&exp.role).scale(XL).line_height(1.4).bold()],
                    right: TextRun::new(dates).scale(SM).bold().uppercase(),
                })
                .push(Element::Spacer { height_px: 4.0 })
                .text(TextRun::new(&exp.company).scale(LG).italic())
                .push(Element::Spacer { height_px: 16.0 })
                .text(TextRun::new(&exp.description).line_height(LEADING_RELAXED)),
        );
    }

    let mut education = Fragment::new()
        .margins(0.0, 40.0)
        .gap(16.0)
        .text(heading("Education"));
    for edu in &data.education {
        education = education.push(Element::Row {
            left: vec![
                TextRun::new(&edu.school).scale(BASE).bold(),
                TextRun::new(&edu.degree).line_height(LEADING_NORMAL),
            ],
            right: TextRun::new(&edu.year).scale(SM),
        });
    }
    seq.push("education", education);

    let skills = split_list(&data.skills);
    if !skills.is_empty() {
        seq.push(
            "competencies",
            Fragment::new()
                .text(heading("Core Competencies"))
                .push(Element::Spacer { height_px: 24.0 })
                .push(Element::List {
                    items: skills.into_iter().map(TextRun::new).collect(),
                    columns: 2,
                    row_gap_px: 12.0,
                    marker: true,
                }),
        );
    }

    seq.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_block_labels() {
        let labels: Vec<String> = render(&ResumeData::sample())
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "header",
                "summary",
                "achievements",
                "experience:heading",
                "experience:0",
                "experience:1",
                "education",
                "competencies",
            ]
        );
    }

    #[test]
    fn test_header_omits_linkedin_line_when_blank() {
        let mut data = ResumeData::sample();
        let with_link = render(&data)[0].payload.elements.len();
        data.linkedin = "  ".to_string();
        let without_link = render(&data)[0].payload.elements.len();
        assert_eq!(with_link, without_link + 2);
    }

    #[test]
    fn test_competencies_use_two_columns() {
        let blocks = render(&ResumeData::sample());
        let competencies = blocks.last().unwrap();
        match competencies.payload.elements.last() {
            Some(Element::List { items, columns, .. }) => {
                assert_eq!(*columns, 2);
                assert_eq!(items.len(), 8);
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }
}
