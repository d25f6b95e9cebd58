use serde::{Deserialize, Serialize};

/// A job posting reduced to the skill and keyword sets the scorer works with.
///
/// `required_skills` and `preferred_skills` are extracted independently and may
/// overlap. `keywords` also carries frequency-ranked generic terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredJobDescription {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub content: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub keywords: Vec<String>,
}

impl StructuredJobDescription {
    /// Required then preferred skills, duplicates kept.
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.required_skills.iter().chain(self.preferred_skills.iter())
    }
}
