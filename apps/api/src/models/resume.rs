use serde::{Deserialize, Serialize};

/// One job entry. `start_date`/`end_date` are `YYYY-MM` or free text ("Present").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    /// Newline-separated bullet lines.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub year: String,
}

/// Structured document data as edited in the form view.
///
/// Field names follow the editor's JSON (camelCase). Everything except the name
/// defaults to empty so partial documents can be laid out while being typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub at_handle: Option<String>,
    pub location: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    /// Comma separated.
    pub skills: String,
    /// Comma separated.
    pub certifications: String,
    /// Newline-separated bullet lines.
    pub key_achievements: Option<String>,
}

const SAMPLE_DESCRIPTION: &str = "• Designed and delivered intuitive web and mobile interfaces by translating user research, business goals, and product requirements into wireframes, prototypes, and high-fidelity designs.\n\
• Collaborated with product managers, developers, and stakeholders to refine user flows, create scalable design systems, and ensure consistent, high-quality user experiences across all platforms.";

impl ResumeData {
    /// The starter document a new session opens with.
    pub fn sample() -> Self {
        ResumeData {
            full_name: "Joel Olamilekan Opowoye".to_string(),
            job_title: "UIUX Designer".to_string(),
            email: "joelpillar51@gmail.com".to_string(),
            phone: "+123-456-7890".to_string(),
            linkedin: "linkedin.com/in/johnsmith".to_string(),
            at_handle: Some("@johnsmith".to_string()),
            location: "San Francisco, CA".to_string(),
            summary: "Creative UI/UX Designer specializing in crafting modern, intuitive interfaces for mobile and web applications. Adept at using user research, design thinking, and rapid prototyping to solve real user problems. Experienced in building design systems, delivering polished visuals, and collaborating with engineers to bring products to life. Dedicated to shipping beautiful, functional products that users love.".to_string(),
            experience: vec![
                Experience {
                    id: "1".to_string(),
                    company: "TechCorp Inc.".to_string(),
                    role: "Software Engineer".to_string(),
                    start_date: "2024-05".to_string(),
                    end_date: "2025-01".to_string(),
                    description: format!(
                        "{SAMPLE_DESCRIPTION}\n• Conducted usability testing and iterative improvements to optimize conversion, reduce friction in user journeys, and enhance overall product performance."
                    ),
                },
                Experience {
                    id: "2".to_string(),
                    company: "Amigo".to_string(),
                    role: "Software Engineer".to_string(),
                    start_date: "2025-02".to_string(),
                    end_date: "Present".to_string(),
                    description: SAMPLE_DESCRIPTION.to_string(),
                },
            ],
            education: vec![Education {
                id: "1".to_string(),
                school: "University of California • Berkeley, CA".to_string(),
                degree: "Bachelor of Science in Computer Science".to_string(),
                year: "Feb 2025".to_string(),
            }],
            skills: "Graphic design, Prototyping, Wireframing, Product management, HTML, CSS, User Experience, Communication".to_string(),
            certifications: "Google UX Design Certificate - Google, 2022".to_string(),
            key_achievements: Some("• Redesigned a mobile onboarding flow that increased user engagement by 45% and reduced drop-off rate by 30%.\n• Led the migration to a shared component library used by four product teams.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let data: ResumeData = serde_json::from_str(r#"{"fullName":"Ada"}"#).unwrap();
        assert_eq!(data.full_name, "Ada");
        assert!(data.experience.is_empty());
        assert_eq!(data.key_achievements, None);
    }

    #[test]
    fn test_sample_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(ResumeData::sample()).unwrap();
        assert!(json.get("fullName").is_some());
        assert_eq!(json["experience"][0]["startDate"], "2024-05");
    }
}
