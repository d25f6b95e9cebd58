use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details found near the top of a resume. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// The raw line that opened the entry.
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Only `institution` is populated by the structurer; the remaining fields are
/// carried for clients that fill them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSections {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,
    /// Insertion-ordered, no exact duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

/// A parsed resume. `content` is the authoritative raw text; `sections` is derived
/// from it on a best-effort basis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredResume {
    pub id: String,
    pub file_name: String,
    pub content: String,
    #[serde(default)]
    pub sections: ResumeSections,
    pub uploaded_at: DateTime<Utc>,
    /// Appended to by the optimizer, in the order its steps ran.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes_log: Vec<String>,
}

impl StructuredResume {
    /// Name used for exported files, falling back to `resume`.
    pub fn display_name(&self) -> &str {
        let name = self.sections.personal_info.name.trim();
        if name.is_empty() {
            "resume"
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_serializes_camel_case() {
        let resume = StructuredResume {
            id: "resume_abc".to_string(),
            file_name: "cv.txt".to_string(),
            content: "Jane Doe".to_string(),
            sections: ResumeSections::default(),
            uploaded_at: DateTime::from_timestamp(1_735_689_600, 0).unwrap(),
            changes_log: vec![],
        };
        let value = serde_json::to_value(&resume).unwrap();
        assert_eq!(value["fileName"], "cv.txt");
        assert_eq!(value["sections"]["personalInfo"]["name"], "");
        assert!(value["sections"].get("summary").is_none());
        assert!(value.get("changesLog").is_none());
        assert_eq!(value["uploadedAt"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_resume_deserializes_browser_payload() {
        let payload = json!({
            "id": "resume_1",
            "fileName": "cv.docx",
            "content": "text",
            "sections": {
                "personalInfo": {"name": "Jane Doe", "email": "", "phone": "", "location": ""},
                "experience": [{"company": "ACME – 2020", "position": "", "startDate": "", "endDate": "", "description": []}],
                "skills": ["Figma"]
            },
            "uploadedAt": "2025-01-01T00:00:00.000Z"
        });
        let resume: StructuredResume = serde_json::from_value(payload).unwrap();
        assert_eq!(resume.sections.experience.len(), 1);
        assert_eq!(resume.sections.skills, vec!["Figma".to_string()]);
        assert!(resume.changes_log.is_empty());
        assert_eq!(resume.display_name(), "Jane Doe");
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut resume: StructuredResume = serde_json::from_value(json!({
            "id": "r", "fileName": "f", "content": "", "uploadedAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(resume.display_name(), "resume");
        resume.sections.personal_info.name = "  ".to_string();
        assert_eq!(resume.display_name(), "resume");
    }
}
