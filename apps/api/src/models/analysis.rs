use serde::{Deserialize, Serialize};

/// How strongly a posting asks for a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

impl Importance {
    /// Scoring weight: high=3, medium=2, low=1.
    pub fn weight(self) -> u32 {
        match self {
            Importance::High => 3,
            Importance::Medium => 2,
            Importance::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub skill: String,
    pub found: bool,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub section: String,
    pub suggestion: String,
    pub impact: Importance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    /// 0 – 100
    pub score: u32,
    pub matches: Vec<KeywordMatch>,
    pub suggestions: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub improvements: Vec<Improvement>,
}
