//! Section structuring: summary, skills, experience and education.
//!
//! Each section is a single forward scan over trimmed, non-blank lines. A header
//! regex (matched against the line prefix, case-insensitive) switches the scan into
//! the section, and the first line matching that section's stop set ends it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{EducationEntry, ExperienceEntry};
use crate::text::normalize::{content_lines, utf16_len};

/// Section fields derived from the text. Absent sections are `None` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSections {
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

const SUMMARY_MIN_LINE: usize = 20;
const UNHEADED_SUMMARY_MIN_LINE: usize = 100;
const SKILL_MAX_LEN: usize = 50;
const ENTRY_MIN_LINE: usize = 10;

lazy_static! {
    static ref SUMMARY_HEADER: Regex =
        Regex::new(r"(?i)^(professional\s+summary|summary|objective|profile)").unwrap();
    static ref SUMMARY_STOP: Regex = Regex::new(
        r"(?i)^(core\s+competencies|professional\s+experience|experience|education|skills|technical|awards|certifications)",
    )
    .unwrap();
    static ref SUMMARY_BUZZWORDS: Regex = Regex::new(
        r"(?i)\b(innovative|creative|experienced|skilled|passionate|design|technical|professional)\b",
    )
    .unwrap();
    static ref UNHEADED_SUMMARY_EXCLUDED: Regex =
        Regex::new(r"(?i)^(experience|education|skills|awards)").unwrap();

    static ref SKILLS_HEADER: Regex = Regex::new(
        r"(?i)^(technical\s+skills|functional\s+skills|core\s+competencies|skills)",
    )
    .unwrap();
    static ref SKILLS_STOP: Regex = Regex::new(
        r"(?i)^(professional\s+experience|experience|education|awards|certifications|internships)",
    )
    .unwrap();
    static ref CATEGORY_SEPARATOR: Regex = Regex::new(r":-|:").unwrap();
    static ref CATEGORY_SKILL_SEPARATOR: Regex = Regex::new(r"[|,•·\-]").unwrap();
    static ref SKILL_SEPARATOR: Regex = Regex::new(r"[|,•·]").unwrap();
    static ref SKILL_EDGE_PUNCTUATION: Regex =
        Regex::new(r"^[\s\-•·|:]+|[\s\-•·|:]+$").unwrap();

    static ref EXPERIENCE_HEADER: Regex =
        Regex::new(r"(?i)^(professional\s+experience|experience)").unwrap();
    static ref EXPERIENCE_STOP: Regex = Regex::new(
        r"(?i)^(education|internships|awards|certifications|technical|skills)",
    )
    .unwrap();
    static ref FOUR_DIGITS: Regex = Regex::new(r"[0-9]{4}").unwrap();

    static ref EDUCATION_HEADER: Regex = Regex::new(r"(?i)^education").unwrap();
    static ref EDUCATION_STOP: Regex =
        Regex::new(r"(?i)^(awards|certifications|technical|skills)").unwrap();
}

pub fn extract_sections(text: &str) -> ExtractedSections {
    let lines = content_lines(text);
    ExtractedSections {
        summary: extract_summary(&lines),
        skills: extract_skills(&lines),
        experience: extract_experience(&lines),
        education: extract_education(&lines),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

/// Collects lines after a summary header; without a header, long descriptive lines
/// containing resume buzzwords are taken instead.
fn extract_summary(lines: &[String]) -> Option<String> {
    let mut summary = String::new();
    let mut in_summary = false;

    for line in lines {
        if SUMMARY_HEADER.is_match(line) {
            in_summary = true;
            continue;
        }

        if in_summary {
            if SUMMARY_STOP.is_match(line) {
                break;
            }
            if utf16_len(line) >= SUMMARY_MIN_LINE {
                summary.push_str(line);
                summary.push(' ');
            }
        } else if utf16_len(line) > UNHEADED_SUMMARY_MIN_LINE
            && SUMMARY_BUZZWORDS.is_match(line)
            && !UNHEADED_SUMMARY_EXCLUDED.is_match(line)
        {
            summary.push_str(line);
            summary.push(' ');
        }
    }

    let summary = summary.trim();
    (!summary.is_empty()).then(|| summary.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

fn extract_skills(lines: &[String]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let mut in_skills = false;

    for line in lines {
        if SKILLS_HEADER.is_match(line) {
            in_skills = true;
            continue;
        }
        if !in_skills {
            continue;
        }
        if SKILLS_STOP.is_match(line) {
            break;
        }

        for candidate in split_skill_line(line) {
            let cleaned = SKILL_EDGE_PUNCTUATION.replace_all(candidate, "");
            let cleaned = cleaned.trim();
            let len = utf16_len(cleaned);
            if len > 1 && len < SKILL_MAX_LEN && !skills.iter().any(|s| s == cleaned) {
                skills.push(cleaned.to_string());
            }
        }
    }

    skills
}

/// A `Category: a, b` line yields the items after the label, also split on hyphens.
/// Lines without a label split on pipes, commas and bullet glyphs only.
fn split_skill_line(line: &str) -> Vec<&str> {
    if line.contains(':') {
        let mut parts = CATEGORY_SEPARATOR.split(line);
        parts.next();
        match parts.next() {
            Some(items) => CATEGORY_SKILL_SEPARATOR.split(items).collect(),
            None => Vec::new(),
        }
    } else {
        SKILL_SEPARATOR.split(line).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// A line with a dash or a four-digit year opens a new entry, recorded verbatim as
/// the company. Longer lines that follow become its description.
fn extract_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceEntry> = None;
    let mut in_experience = false;

    for line in lines {
        if EXPERIENCE_HEADER.is_match(line) {
            in_experience = true;
            continue;
        }
        if !in_experience {
            continue;
        }
        if EXPERIENCE_STOP.is_match(line) {
            break;
        }

        if line.contains('–') || line.contains('-') || FOUR_DIGITS.is_match(line) {
            entries.extend(current.take());
            current = Some(ExperienceEntry {
                company: line.clone(),
                ..ExperienceEntry::default()
            });
        } else if let Some(entry) = current.as_mut() {
            if utf16_len(line) > ENTRY_MIN_LINE {
                entry.description.push(line.clone());
            }
        }
    }

    entries.extend(current);
    entries
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// Only the institution is populated; degree, field and dates stay empty.
fn extract_education(lines: &[String]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut in_education = false;

    for line in lines {
        if EDUCATION_HEADER.is_match(line) {
            in_education = true;
            continue;
        }
        if !in_education {
            continue;
        }
        if EDUCATION_STOP.is_match(line) {
            break;
        }
        if utf16_len(line) > ENTRY_MIN_LINE {
            entries.push(EducationEntry {
                institution: line.clone(),
                ..EducationEntry::default()
            });
        }
    }

    entries
}
