//! Fixed vocabularies used by the job description analyzer and the scorer.
//!
//! Built once at start-up and shared read-only through `AppState`.

use std::collections::HashSet;

use crate::models::Importance;

/// Recognized skill terms, lower-case. Matched as case-insensitive substrings.
pub const COMMON_SKILLS: &[&str] = &[
    // Technical
    "javascript", "typescript", "python", "java", "c++", "c#", "php", "ruby", "go", "rust",
    "react", "angular", "vue", "node.js", "express", "django", "flask", "spring", "laravel",
    "mysql", "postgresql", "mongodb", "redis", "sqlite", "oracle",
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "ci/cd",
    "html", "css", "sass", "bootstrap", "tailwind", "material-ui",
    "agile", "scrum", "kanban", "jira", "confluence",
    // Design and creative
    "photoshop", "illustrator", "indesign", "powerpoint", "keynote", "word", "adobe creative suite",
    "graphic design", "visual design", "ui design", "ux design", "web design", "print design",
    "branding", "brand guidelines", "typography", "layout", "visual hierarchy", "infographics",
    "creative", "storytelling", "visual communication", "design thinking", "prototyping",
    "figma", "sketch", "adobe xd", "canva", "coreldraw", "after effects", "premiere pro",
    "social media", "content creation", "marketing materials", "presentations", "proposals",
    // Soft
    "leadership", "communication", "teamwork", "problem-solving", "analytical",
    "project management", "time management", "collaboration", "innovation",
    "adaptability", "creativity", "critical thinking", "decision making",
    "attention to detail", "deadline management", "client communication",
    // Business
    "data analysis", "business intelligence", "market research", "strategic planning",
    "budget management", "stakeholder management", "vendor management",
    "quality assurance", "testing", "documentation", "training",
];

/// Qualifying phrases per tier, checked in tier order.
pub const IMPORTANCE_TIERS: &[(Importance, &[&str])] = &[
    (
        Importance::High,
        &["required", "must have", "essential", "mandatory", "critical", "key requirement"],
    ),
    (
        Importance::Medium,
        &["preferred", "desired", "nice to have", "advantage", "plus", "beneficial"],
    ),
    (
        Importance::Low,
        &["familiar", "exposure", "basic", "some experience", "awareness"],
    ),
];

pub const REQUIRED_INDICATORS: &[&str] = &["required", "must", "essential", "mandatory"];
pub const PREFERRED_INDICATORS: &[&str] = &["preferred", "desired", "nice to have", "plus"];

pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "will", "with",
    "work", "team", "experience", "ability", "knowledge", "skills", "working", "years",
];

#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub skills: Vec<&'static str>,
    pub importance_tiers: Vec<(Importance, Vec<&'static str>)>,
    pub required_indicators: Vec<&'static str>,
    pub preferred_indicators: Vec<&'static str>,
    stop_words: HashSet<&'static str>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            skills: COMMON_SKILLS.to_vec(),
            importance_tiers: IMPORTANCE_TIERS
                .iter()
                .map(|(tier, phrases)| (*tier, phrases.to_vec()))
                .collect(),
            required_indicators: REQUIRED_INDICATORS.to_vec(),
            preferred_indicators: PREFERRED_INDICATORS.to_vec(),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }
}

impl Vocabulary {
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Skill terms contained in `lowercase_text`, in vocabulary order.
    pub fn skills_in<'a>(&'a self, lowercase_text: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.skills
            .iter()
            .copied()
            .filter(move |skill| lowercase_text.contains(skill))
    }
}
