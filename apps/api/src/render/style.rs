//! Export layout: maps each classified line to a style and builds the document plan
//! shared by the PDF and Word encoders.

use crate::models::StructuredResume;
use crate::text::{classify_document, LineRole};

/// Vertical advance for a blank source line, in millimetres.
pub const BLANK_LINE_ADVANCE: f32 = 4.0;

/// Typography for one rendered line. Spacing is in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub font_size: f32,
    pub bold: bool,
    pub space_before: f32,
    pub space_after: f32,
}

impl LineStyle {
    const fn new(font_size: f32, bold: bool) -> Self {
        LineStyle {
            font_size,
            bold,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    /// Body text of the section-based fallback layout.
    pub const BODY: LineStyle = LineStyle::new(11.0, false);
    /// Headings of the section-based fallback layout.
    pub const HEADING: LineStyle = LineStyle::new(14.0, true);

    pub fn for_role(role: LineRole) -> Self {
        match role {
            LineRole::Name => LineStyle::new(18.0, true),
            LineRole::ContactInfo => LineStyle::new(10.0, false),
            LineRole::JobTitleHeading => LineStyle {
                space_after: 2.0,
                ..LineStyle::new(14.0, true)
            },
            LineRole::SectionHeader => LineStyle {
                space_before: 5.0,
                space_after: 3.0,
                ..LineStyle::new(13.0, true)
            },
            LineRole::CompanyLine => LineStyle::new(11.0, true),
            LineRole::PositionLine => LineStyle::new(10.0, true),
            LineRole::StandaloneDate => LineStyle::new(9.0, false),
            LineRole::BulletPoint | LineRole::SkillsInventoryLine | LineRole::PlainText => {
                LineStyle::new(10.0, false)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanItem {
    Text { text: String, style: LineStyle },
    Blank,
}

/// Lays out the raw content line by line. A resume with blank content falls back
/// to its structured sections.
pub fn plan_document(resume: &StructuredResume) -> Vec<PlanItem> {
    if resume.content.trim().is_empty() {
        return plan_from_sections(resume);
    }

    classify_document(&resume.content)
        .into_iter()
        .map(|line| match line.role {
            Some(role) => PlanItem::Text {
                text: line.text,
                style: LineStyle::for_role(role),
            },
            None => PlanItem::Blank,
        })
        .collect()
}

fn plan_from_sections(resume: &StructuredResume) -> Vec<PlanItem> {
    let sections = &resume.sections;
    let info = &sections.personal_info;
    let mut plan = Vec::new();
    let mut push = |text: String, style: LineStyle| plan.push(PlanItem::Text { text, style });

    if !info.name.is_empty() {
        push(info.name.clone(), LineStyle::for_role(LineRole::Name));
    }

    let contact = [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ");
    if !contact.is_empty() {
        push(contact, LineStyle::for_role(LineRole::ContactInfo));
    }
    if let Some(linkedin) = info.linkedin.as_ref().filter(|l| !l.is_empty()) {
        push(linkedin.clone(), LineStyle::for_role(LineRole::ContactInfo));
    }

    if let Some(summary) = sections.summary.as_ref().filter(|s| !s.is_empty()) {
        push("PROFESSIONAL SUMMARY".to_string(), LineStyle::HEADING);
        push(summary.clone(), LineStyle::BODY);
    }

    if !sections.skills.is_empty() {
        push("SKILLS".to_string(), LineStyle::HEADING);
        push(sections.skills.join(", "), LineStyle::BODY);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::create_resume_data;
    use pretty_assertions::assert_eq;

    fn texts(plan: &[PlanItem]) -> Vec<(&str, f32, bool)> {
        plan.iter()
            .filter_map(|item| match item {
                PlanItem::Text { text, style } => Some((text.as_str(), style.font_size, style.bold)),
                PlanItem::Blank => None,
            })
            .collect()
    }

    #[test]
    fn test_role_styles() {
        assert_eq!(LineStyle::for_role(LineRole::Name).font_size, 18.0);
        let header = LineStyle::for_role(LineRole::SectionHeader);
        assert_eq!((header.font_size, header.bold), (13.0, true));
        assert_eq!((header.space_before, header.space_after), (5.0, 3.0));
        assert_eq!(LineStyle::for_role(LineRole::JobTitleHeading).space_after, 2.0);
        assert_eq!(LineStyle::for_role(LineRole::StandaloneDate).font_size, 9.0);
        assert!(!LineStyle::for_role(LineRole::BulletPoint).bold);
    }

    #[test]
    fn test_plan_follows_raw_lines() {
        let resume = create_resume_data(
            "cv.txt",
            "Jane Doe\njane@example.com\n416-555-0199\nToronto, ON, CANADA\n\nPROFESSIONAL EXPERIENCE\n• Designed brand systems",
        );
        let plan = plan_document(&resume);

        assert_eq!(plan.len(), 7);
        assert_eq!(plan[4], PlanItem::Blank);
        assert_eq!(
            texts(&plan),
            vec![
                ("Jane Doe", 18.0, true),
                ("jane@example.com", 10.0, false),
                ("416-555-0199", 10.0, false),
                ("Toronto, ON, CANADA", 10.0, false),
                ("PROFESSIONAL EXPERIENCE", 13.0, true),
                ("• Designed brand systems", 10.0, false),
            ]
        );
    }

    #[test]
    fn test_blank_content_falls_back_to_sections() {
        let mut resume = create_resume_data("cv.txt", "   \n");
        resume.sections.personal_info.name = "Jane Doe".into();
        resume.sections.personal_info.email = "jane@example.com".into();
        resume.sections.personal_info.location = "Toronto, ON".into();
        resume.sections.personal_info.linkedin = Some("https://linkedin.com/in/jane".into());
        resume.sections.summary = Some("Designer.".into());
        resume.sections.skills = vec!["Figma".into(), "Sketch".into()];

        assert_eq!(
            texts(&plan_document(&resume)),
            vec![
                ("Jane Doe", 18.0, true),
                ("jane@example.com | Toronto, ON", 10.0, false),
                ("https://linkedin.com/in/jane", 10.0, false),
                ("PROFESSIONAL SUMMARY", 14.0, true),
                ("Designer.", 11.0, false),
                ("SKILLS", 14.0, true),
                ("Figma, Sketch", 11.0, false),
            ]
        );
    }

    #[test]
    fn test_empty_resume_plans_nothing() {
        let resume = create_resume_data("cv.txt", "");
        assert!(plan_document(&resume).is_empty());
    }
}
