// Resume parsing: document text extraction and heuristic structuring.

pub mod extract;
pub mod handlers;
pub mod personal_info;
pub mod resume_id;
pub mod sections;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::{ResumeSections, StructuredResume};

pub use extract::{extract_text, ParseError};
pub use personal_info::extract_personal_info;
pub use resume_id::generate_resume_id;
pub use sections::extract_sections;

/// Ingestion timestamp stamped on every parsed resume (2025-01-01T00:00:00Z).
/// Fixed so that parsing the same upload twice yields identical records.
const INGESTED_AT_SECS: i64 = 1_735_689_600;

pub fn ingestion_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(INGESTED_AT_SECS, 0).unwrap_or_default()
}

/// Structures raw resume text. Never fails; missing sections stay empty and
/// `content` is kept byte-for-byte.
pub fn create_resume_data(file_name: &str, content: &str) -> StructuredResume {
    let personal_info = extract_personal_info(content);
    let extracted = extract_sections(content);

    let resume = StructuredResume {
        id: generate_resume_id(file_name, content),
        file_name: file_name.to_string(),
        content: content.to_string(),
        sections: ResumeSections {
            personal_info,
            summary: extracted.summary,
            experience: extracted.experience,
            education: extracted.education,
            skills: extracted.skills,
            certifications: None,
            projects: None,
        },
        uploaded_at: ingestion_timestamp(),
        changes_log: Vec::new(),
    };

    info!(
        resume_id = %resume.id,
        skills = resume.sections.skills.len(),
        experience = resume.sections.experience.len(),
        "Resume structured"
    );

    resume
}

/// Extracts text from an uploaded file and structures it.
pub fn parse_upload(
    file_name: &str,
    bytes: &[u8],
    pdf_extraction: bool,
) -> Result<StructuredResume, ParseError> {
    let content = extract_text(file_name, bytes, pdf_extraction)?;
    Ok(create_resume_data(file_name, &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_create_resume_data_composes_all_extractors() {
        let content = "Jane Doe\njane@example.com\nSUMMARY\nDesigner with a decade of brand work.\nSKILLS\nFigma, Sketch";
        let resume = create_resume_data("jane.txt", content);

        assert_eq!(resume.id, generate_resume_id("jane.txt", content));
        assert_eq!(resume.file_name, "jane.txt");
        assert_eq!(resume.sections.personal_info.name, "Jane Doe");
        assert_eq!(resume.sections.personal_info.email, "jane@example.com");
        assert_eq!(
            resume.sections.summary.as_deref(),
            Some("Designer with a decade of brand work.")
        );
        assert_eq!(resume.sections.skills, vec!["Figma", "Sketch"]);
        assert!(resume.changes_log.is_empty());
        assert_eq!(resume.uploaded_at.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_empty_document_keeps_raw_content() {
        let resume = create_resume_data("empty.txt", "");
        assert_eq!(resume.content, "");
        assert_eq!(resume.sections, ResumeSections::default());
    }

    #[test]
    fn test_parse_upload_rejects_unknown_extension() {
        let result = parse_upload("cv.odt", b"hello", false);
        assert!(matches!(result, Err(ParseError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_upload_is_deterministic() {
        let a = parse_upload("cv.txt", b"Jane Doe\nDesigner", false).unwrap();
        let b = parse_upload("cv.txt", b"Jane Doe\nDesigner", false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_prefix_uploads_share_an_id() {
        let head = "Jane Doe\n".repeat(20);
        let a = create_resume_data("cv.txt", &format!("{head}EDUCATION\nOCAD University"));
        let b = create_resume_data("cv.txt", &format!("{head}SKILLS\nFigma"));
        assert_eq!(a.id, b.id);
        assert_ne!(a.sections, b.sections);
    }

    proptest! {
        #[test]
        fn prop_structuring_never_alters_content(content in "(?s).{0,400}") {
            let resume = create_resume_data("cv.txt", &content);
            prop_assert_eq!(resume.content, content);
        }
    }
}
