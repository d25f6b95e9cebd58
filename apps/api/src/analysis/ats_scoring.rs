//! ATS scoring: a pluggable, trait-based scorer that measures a resume against a
//! structured job description.
//!
//! Default: `KeywordAtsScorer` (keyword coverage weighted by importance, plus
//! structural bonuses). `AppState` holds an `Arc<dyn AtsScorer>`.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::analysis::jd_analyzer::get_skill_importance;
use crate::analysis::vocabulary::Vocabulary;
use crate::models::{
    AtsAnalysis, Importance, Improvement, KeywordMatch, ResumeSections, StructuredJobDescription,
    StructuredResume,
};

/// Share of the score earned by keyword coverage.
const KEYWORD_SHARE: f64 = 70.0;
const SUMMARY_BONUS: f64 = 10.0;
const EXPERIENCE_BONUS: f64 = 10.0;
const SKILLS_BONUS: f64 = 5.0;
const EDUCATION_BONUS: f64 = 5.0;

const MAX_MISSING_KEYWORDS: usize = 10;
const LISTED_SKILLS: usize = 3;
const SUMMARY_TARGET_LEN: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the handler.
pub trait AtsScorer: Send + Sync {
    fn analyze(&self, resume: &StructuredResume, job: &StructuredJobDescription) -> AtsAnalysis;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordAtsScorer
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic keyword scorer.
///
/// 1. Every required and preferred skill (duplicates kept) is matched as a
///    case-insensitive substring of the raw resume text and weighted by importance
///    (high=3, medium=2, low=1).
/// 2. score = 70 × achieved / total, plus 10 for a summary, 10 for experience,
///    5 for skills and 5 for education, rounded and capped at 100.
pub struct KeywordAtsScorer {
    vocab: Arc<Vocabulary>,
}

impl KeywordAtsScorer {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        KeywordAtsScorer { vocab }
    }
}

impl AtsScorer for KeywordAtsScorer {
    fn analyze(&self, resume: &StructuredResume, job: &StructuredJobDescription) -> AtsAnalysis {
        analyze_resume(&self.vocab, resume, job)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn analyze_resume(
    vocab: &Vocabulary,
    resume: &StructuredResume,
    job: &StructuredJobDescription,
) -> AtsAnalysis {
    let resume_lower = resume.content.to_lowercase();

    let matches: Vec<KeywordMatch> = job
        .all_skills()
        .map(|skill| KeywordMatch {
            skill: skill.clone(),
            found: resume_lower.contains(&skill.to_lowercase()),
            importance: get_skill_importance(vocab, skill, &job.content),
        })
        .collect();

    let score = calculate_score(&matches, &resume.sections);
    let suggestions = generate_suggestions(&matches, &resume.sections);
    let missing_keywords = find_missing_keywords(&resume_lower, job);
    let improvements = generate_improvements(&matches, &resume.sections);

    debug!(
        resume_id = %resume.id,
        score,
        matched = matches.iter().filter(|m| m.found).count(),
        total = matches.len(),
        "Resume scored"
    );

    AtsAnalysis {
        score,
        matches,
        suggestions,
        missing_keywords,
        improvements,
    }
}

fn has_summary(sections: &ResumeSections) -> bool {
    sections.summary.as_deref().is_some_and(|s| !s.is_empty())
}

fn calculate_score(matches: &[KeywordMatch], sections: &ResumeSections) -> u32 {
    let (total, achieved) = matches.iter().fold((0u32, 0u32), |(total, achieved), m| {
        let weight = m.importance.weight();
        (total + weight, if m.found { achieved + weight } else { achieved })
    });

    let mut score = if total > 0 {
        f64::from(achieved) / f64::from(total) * KEYWORD_SHARE
    } else {
        0.0
    };

    if has_summary(sections) {
        score += SUMMARY_BONUS;
    }
    if !sections.experience.is_empty() {
        score += EXPERIENCE_BONUS;
    }
    if !sections.skills.is_empty() {
        score += SKILLS_BONUS;
    }
    if !sections.education.is_empty() {
        score += EDUCATION_BONUS;
    }

    score.round().clamp(0.0, 100.0) as u32
}

fn missing_with(matches: &[KeywordMatch], importance: Importance) -> Vec<&str> {
    matches
        .iter()
        .filter(|m| !m.found && m.importance == importance)
        .map(|m| m.skill.as_str())
        .collect()
}

fn first_listed(skills: &[&str]) -> String {
    skills
        .iter()
        .take(LISTED_SKILLS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn generate_suggestions(matches: &[KeywordMatch], sections: &ResumeSections) -> Vec<String> {
    let mut suggestions = Vec::new();

    let missing_high = missing_with(matches, Importance::High);
    if !missing_high.is_empty() {
        suggestions.push(format!(
            "Add these high-priority skills: {}",
            first_listed(&missing_high)
        ));
    }

    let missing_medium = missing_with(matches, Importance::Medium);
    if !missing_medium.is_empty() {
        suggestions.push(format!(
            "Consider including these relevant skills: {}",
            first_listed(&missing_medium)
        ));
    }

    if !has_summary(sections) {
        suggestions.push(
            "Add a professional summary section highlighting your key qualifications".to_string(),
        );
    }

    suggestions
}

/// Required, preferred and general keywords absent from the resume, first ten,
/// without repeats.
fn find_missing_keywords(resume_lower: &str, job: &StructuredJobDescription) -> Vec<String> {
    let mut seen = HashSet::new();
    job.all_skills()
        .chain(job.keywords.iter())
        .filter(|keyword| !resume_lower.contains(&keyword.to_lowercase()))
        .filter(|keyword| seen.insert(keyword.as_str()))
        .take(MAX_MISSING_KEYWORDS)
        .cloned()
        .collect()
}

fn generate_improvements(matches: &[KeywordMatch], sections: &ResumeSections) -> Vec<Improvement> {
    let mut improvements = Vec::new();

    let missing_high = missing_with(matches, Importance::High);
    if !missing_high.is_empty() {
        improvements.push(Improvement {
            section: "Skills".to_string(),
            suggestion: format!("Add critical skills: {}", first_listed(&missing_high)),
            impact: Importance::High,
        });
    }

    let missing_medium = missing_with(matches, Importance::Medium);
    if !missing_medium.is_empty() {
        improvements.push(Improvement {
            section: "Skills".to_string(),
            suggestion: format!("Include preferred skills: {}", first_listed(&missing_medium)),
            impact: Importance::Medium,
        });
    }

    let summary_len = sections
        .summary
        .as_deref()
        .map(crate::text::normalize::utf16_len)
        .unwrap_or(0);
    if summary_len < SUMMARY_TARGET_LEN {
        improvements.push(Improvement {
            section: "Professional Summary".to_string(),
            suggestion: "Expand your professional summary to 2-3 sentences highlighting your most relevant experience and skills".to_string(),
            impact: Importance::Medium,
        });
    }

    improvements
}
