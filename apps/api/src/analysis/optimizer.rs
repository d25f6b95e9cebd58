//! Content optimizer: ordered rewrite passes over the raw resume text plus an
//! enhancement of the structured skills list.
//!
//! Passes only insert text. If any pass fails, every content edit is discarded and
//! the original text is kept; the skills list is still enhanced.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{StructuredJobDescription, StructuredResume};
use crate::text::line_role::is_heading_shaped;
use crate::text::normalize::utf16_len;

pub const FALLBACK_LOG_ENTRY: &str = "Error occurred during optimization - used original content";

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("{pass}: edit at byte {offset} falls outside the content or inside a character")]
    InvalidEdit { pass: &'static str, offset: usize },
}

/// Read-only inputs shared by every pass.
pub struct PassContext<'a> {
    pub job: &'a StructuredJobDescription,
    /// Required then preferred skills, first occurrence kept.
    pub job_skills: Vec<String>,
}

impl<'a> PassContext<'a> {
    pub fn new(job: &'a StructuredJobDescription) -> Self {
        let mut seen = HashSet::new();
        let job_skills = job
            .all_skills()
            .filter(|skill| seen.insert(skill.as_str()))
            .cloned()
            .collect();
        PassContext { job, job_skills }
    }
}

/// One text mutation. Implementations leave the content unchanged when their
/// target section is absent, and append a description to `log` for each change.
pub trait RewritePass: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        content: &str,
        ctx: &PassContext<'_>,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError>;
}

// ────────────────────────────────────────────────────────────────────────────
// ContentOptimizer
// ────────────────────────────────────────────────────────────────────────────

pub struct ContentOptimizer {
    passes: Vec<Box<dyn RewritePass>>,
}

impl Default for ContentOptimizer {
    fn default() -> Self {
        ContentOptimizer::with_passes(vec![
            Box::new(SummaryPass),
            Box::new(ExperiencePass),
            Box::new(SkillsSectionPass),
            Box::new(HeaderPass),
            Box::new(KeywordSectionPass),
        ])
    }
}

impl ContentOptimizer {
    pub fn with_passes(passes: Vec<Box<dyn RewritePass>>) -> Self {
        ContentOptimizer { passes }
    }

    /// Returns an optimized copy of `resume`. The input is never modified.
    pub fn optimize(
        &self,
        resume: &StructuredResume,
        job: &StructuredJobDescription,
    ) -> StructuredResume {
        let ctx = PassContext::new(job);
        let mut optimized = resume.clone();
        let mut changes_log = Vec::new();

        match self.run_passes(&resume.content, &ctx) {
            Ok((content, pass_log)) => {
                optimized.content = content;
                changes_log.extend(pass_log);
            }
            Err(e) => {
                warn!(resume_id = %resume.id, "Rewrite pass failed, keeping original content: {e}");
                optimized.content = resume.content.clone();
                changes_log.push(FALLBACK_LOG_ENTRY.to_string());
            }
        }

        let original_skills = &resume.sections.skills;
        if !original_skills.is_empty() {
            let enhanced = enhance_skills(original_skills, &ctx.job_skills);
            let added = enhanced.len() - original_skills.len();
            if added > 0 {
                changes_log.push(format!("Added {added} new relevant skills"));
            }
            optimized.sections.skills = enhanced;
        }

        info!(
            resume_id = %resume.id,
            changes = changes_log.len(),
            original_len = resume.content.len(),
            optimized_len = optimized.content.len(),
            "Resume optimized"
        );

        optimized.changes_log = changes_log;
        optimized
    }

    /// Runs every pass on a scratch copy. The log is only returned on success.
    fn run_passes(
        &self,
        original: &str,
        ctx: &PassContext<'_>,
    ) -> Result<(String, Vec<String>), RewriteError> {
        let mut content = original.to_string();
        let mut log = Vec::new();
        for pass in &self.passes {
            let before = log.len();
            content = pass.apply(&content, ctx, &mut log)?;
            debug!(pass = pass.name(), changes = log.len() - before, "Rewrite pass applied");
        }
        Ok((content, log))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

lazy_static! {
    /// A blank line followed by a letter starts the next block.
    static ref BLOCK_BREAK: Regex = Regex::new(r"\n\n[A-Za-z]").unwrap();
}

/// Byte range of a section: from its header to `terminator` (or the end of text).
struct Block {
    start: usize,
    body_start: usize,
    end: usize,
}

impl Block {
    fn locate(content: &str, header: &Regex, terminator: &Regex) -> Option<Block> {
        let header = header.find(content)?;
        let end = terminator
            .find_at(content, header.end())
            .map(|m| m.start())
            .unwrap_or(content.len());
        Some(Block {
            start: header.start(),
            body_start: header.end(),
            end,
        })
    }

    fn text<'c>(&self, content: &'c str) -> &'c str {
        &content[self.start..self.end]
    }

    fn body<'c>(&self, content: &'c str) -> &'c str {
        &content[self.body_start..self.end]
    }

    /// Offset just past the last non-whitespace character of the block.
    fn content_end(&self, content: &str) -> usize {
        self.start + self.text(content).trim_end().len()
    }
}

/// Applies insertions given in document order. Insertions at the same offset keep
/// their relative order.
fn insert_all(
    pass: &'static str,
    content: &str,
    mut insertions: Vec<(usize, String)>,
) -> Result<String, RewriteError> {
    if let Some(&(offset, _)) = insertions
        .iter()
        .find(|(offset, _)| !content.is_char_boundary(*offset))
    {
        return Err(RewriteError::InvalidEdit { pass, offset });
    }

    insertions.sort_by_key(|(offset, _)| *offset);
    let mut result = content.to_string();
    for (offset, text) in insertions.into_iter().rev() {
        result.insert_str(offset, &text);
    }
    Ok(result)
}

fn len_between(text: &str, min: usize, max: usize) -> bool {
    let len = utf16_len(text);
    len >= min && len <= max
}

// ────────────────────────────────────────────────────────────────────────────
// 1. Summary
// ────────────────────────────────────────────────────────────────────────────

lazy_static! {
    static ref SUMMARY_HEADER: Regex = Regex::new(r"(?im)^PROFESSIONAL SUMMARY\b").unwrap();
    static ref SUMMARY_DOMAIN: Regex = Regex::new(
        r"(?i)(design|creative|visual|brand|marketing|digital|project|management|team|leadership|innovative|strategic|analytical)",
    )
    .unwrap();
}

/// Appends a sentence naming up to three relevant job keywords to the summary.
pub struct SummaryPass;

impl RewritePass for SummaryPass {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn apply(
        &self,
        content: &str,
        ctx: &PassContext<'_>,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError> {
        let Some(block) = Block::locate(content, &SUMMARY_HEADER, &BLOCK_BREAK) else {
            return Ok(content.to_string());
        };
        let body = block.body(content).trim();
        if body.is_empty() {
            return Ok(content.to_string());
        }
        let body_lower = body.to_lowercase();

        let keywords: Vec<&str> = ctx
            .job
            .keywords
            .iter()
            .map(String::as_str)
            .filter(|k| len_between(k, 4, 19))
            .filter(|k| !body_lower.contains(&k.to_lowercase()))
            .filter(|k| SUMMARY_DOMAIN.is_match(k))
            .take(3)
            .collect();
        if keywords.is_empty() {
            return Ok(content.to_string());
        }

        let sentence = format!(
            " Experienced in {} with a focus on delivering exceptional results.",
            keywords.join(", ")
        );
        log.push(format!(
            "Enhanced professional summary with {} relevant keywords: {}",
            keywords.len(),
            keywords.join(", ")
        ));
        insert_all(self.name(), content, vec![(block.content_end(content), sentence)])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 2. Experience
// ────────────────────────────────────────────────────────────────────────────

const OUTCOME_CLAUSES: [&str; 5] = [
    "resulting in improved efficiency",
    "leading to increased client satisfaction",
    "contributing to brand recognition",
    "enhancing user experience",
    "driving project success",
];
const OUTCOME_MARKERS: [&str; 3] = ["resulting in", "leading to", "contributing to"];

lazy_static! {
    static ref EXPERIENCE_HEADER: Regex =
        Regex::new(r"(?im)^(?:PROFESSIONAL EXPERIENCE|WORK EXPERIENCE|EXPERIENCE)\b").unwrap();
    static ref EXPERIENCE_BULLET: Regex = Regex::new(r"(?m)^[•\-\*]\s[^\r\n]+").unwrap();
    static ref PRACTICAL_SKILL: Regex =
        Regex::new(r"(?i)(adobe|design|project|management|marketing|digital|creative)").unwrap();
}

/// Adds outcome clauses to the first two bullets and a bullet citing job skills.
pub struct ExperiencePass;

impl RewritePass for ExperiencePass {
    fn name(&self) -> &'static str {
        "experience"
    }

    fn apply(
        &self,
        content: &str,
        ctx: &PassContext<'_>,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError> {
        let Some(block) = Block::locate(content, &EXPERIENCE_HEADER, &BLOCK_BREAK) else {
            return Ok(content.to_string());
        };
        let mut insertions = Vec::new();

        let section = block.text(content);
        let mut enhanced = 0;
        let unmarked = EXPERIENCE_BULLET
            .find_iter(section)
            .filter(|bullet| {
                !OUTCOME_MARKERS
                    .iter()
                    .any(|marker| bullet.as_str().contains(marker))
            })
            .take(2);
        for (index, bullet) in unmarked.enumerate() {
            let clause = OUTCOME_CLAUSES[index % OUTCOME_CLAUSES.len()];
            insertions.push((block.start + bullet.end(), format!(", {clause}")));
            enhanced += 1;
        }
        if enhanced > 0 {
            log.push(format!(
                "Enhanced {enhanced} experience bullet points with impact statements"
            ));
        }

        let skills: Vec<&str> = ctx
            .job_skills
            .iter()
            .map(String::as_str)
            .filter(|s| utf16_len(s) < 20 && PRACTICAL_SKILL.is_match(s))
            .take(2)
            .collect();
        if !skills.is_empty() {
            let joined = skills.join(" and ");
            insertions.push((
                block.content_end(content),
                format!(
                    "\n• Utilized {joined} to deliver comprehensive solutions aligned with business objectives"
                ),
            ));
            log.push(format!("Added experience bullet highlighting {joined} skills"));
        }

        insert_all(self.name(), content, insertions)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3. Technical and functional skills sections
// ────────────────────────────────────────────────────────────────────────────

lazy_static! {
    static ref TECHNICAL_HEADER: Regex = Regex::new(r"(?im)^TECHNICAL SKILLS\b").unwrap();
    static ref TECHNICAL_END: Regex = Regex::new(r"\n\n|(?i:FUNCTIONAL SKILLS)").unwrap();
    static ref TECHNICAL_SKILL: Regex = Regex::new(
        r"(?i)(adobe|photoshop|illustrator|indesign|html|css|javascript|wordpress|design|digital|web|responsive)",
    )
    .unwrap();
    static ref FUNCTIONAL_HEADER: Regex = Regex::new(r"(?im)^FUNCTIONAL SKILLS\b").unwrap();
    static ref FUNCTIONAL_END: Regex = Regex::new(r"\n\n").unwrap();
    static ref FUNCTIONAL_SKILL: Regex = Regex::new(
        r"(?i)(project|management|communication|leadership|teamwork|collaboration|problem|analytical|strategic|planning)",
    )
    .unwrap();
}

/// Appends up to three fitting job skills, pipe-delimited, to each skills block.
pub struct SkillsSectionPass;

impl SkillsSectionPass {
    fn extend_block(
        &self,
        content: String,
        ctx: &PassContext<'_>,
        (header, terminator, filter): (&Regex, &Regex, &Regex),
        kind: &str,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError> {
        let Some(block) = Block::locate(&content, header, terminator) else {
            return Ok(content);
        };
        let block_lower = block.text(&content).to_lowercase();

        let skills: Vec<&str> = ctx
            .job_skills
            .iter()
            .map(String::as_str)
            .filter(|s| !block_lower.contains(&s.to_lowercase()) && filter.is_match(s))
            .take(3)
            .collect();
        if skills.is_empty() {
            return Ok(content);
        }

        log.push(format!(
            "Added {} {kind} skills: {}",
            skills.len(),
            skills.join(", ")
        ));
        let addition = format!(" | {}", skills.join(" | "));
        insert_all(self.name(), &content, vec![(block.content_end(&content), addition)])
    }
}

impl RewritePass for SkillsSectionPass {
    fn name(&self) -> &'static str {
        "skills_sections"
    }

    fn apply(
        &self,
        content: &str,
        ctx: &PassContext<'_>,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError> {
        let content = self.extend_block(
            content.to_string(),
            ctx,
            (&*TECHNICAL_HEADER, &*TECHNICAL_END, &*TECHNICAL_SKILL),
            "technical",
            log,
        )?;
        self.extend_block(
            content,
            ctx,
            (&*FUNCTIONAL_HEADER, &*FUNCTIONAL_END, &*FUNCTIONAL_SKILL),
            "functional",
            log,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 4. Header normalization
// ────────────────────────────────────────────────────────────────────────────

/// Non-preferred header text and its ATS-preferred replacement.
pub const HEADER_REWRITES: [(&str, &str); 6] = [
    ("WORK EXPERIENCE", "PROFESSIONAL EXPERIENCE"),
    ("EMPLOYMENT HISTORY", "PROFESSIONAL EXPERIENCE"),
    ("CAREER HISTORY", "PROFESSIONAL EXPERIENCE"),
    ("SKILLS & COMPETENCIES", "CORE COMPETENCIES"),
    ("ABILITIES", "SKILLS"),
    ("QUALIFICATIONS", "SKILLS"),
];

lazy_static! {
    static ref HEADER_PATTERNS: Vec<(Regex, &'static str)> = HEADER_REWRITES
        .iter()
        .map(|(from, to)| (Regex::new(&format!(r"\b{}\b", regex::escape(from))).unwrap(), *to))
        .collect();
}

/// Rewrites non-preferred header names on heading-shaped lines.
pub struct HeaderPass;

impl RewritePass for HeaderPass {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn apply(
        &self,
        content: &str,
        _ctx: &PassContext<'_>,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError> {
        let mut applied = [false; HEADER_REWRITES.len()];

        let lines: Vec<String> = content
            .split('\n')
            .map(|line| {
                if !is_heading_shaped(line.trim()) {
                    return line.to_string();
                }
                let mut line = line.to_string();
                for (index, (pattern, replacement)) in HEADER_PATTERNS.iter().enumerate() {
                    if pattern.is_match(&line) {
                        line = pattern.replace_all(&line, *replacement).into_owned();
                        applied[index] = true;
                    }
                }
                line
            })
            .collect();

        let changed = applied.iter().filter(|a| **a).count();
        if changed == 0 {
            return Ok(content.to_string());
        }
        log.push(format!(
            "Optimized {changed} section headers for ATS compatibility"
        ));
        Ok(lines.join("\n"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 5. Trailing keyword section
// ────────────────────────────────────────────────────────────────────────────

lazy_static! {
    static ref KEYWORD_DOMAIN: Regex = Regex::new(
        r"(?i)(design|creative|brand|marketing|project|digital|visual|strategic|innovative|analytical|leadership|management)",
    )
    .unwrap();
}

/// Appends a CORE COMPETENCIES section with top job keywords missing from the text.
pub struct KeywordSectionPass;

impl RewritePass for KeywordSectionPass {
    fn name(&self) -> &'static str {
        "keyword_section"
    }

    fn apply(
        &self,
        content: &str,
        ctx: &PassContext<'_>,
        log: &mut Vec<String>,
    ) -> Result<String, RewriteError> {
        let content_lower = content.to_lowercase();
        let keywords: Vec<&str> = ctx
            .job
            .keywords
            .iter()
            .take(10)
            .map(String::as_str)
            .filter(|k| len_between(k, 4, 24))
            .filter(|k| !content_lower.contains(&k.to_lowercase()))
            .filter(|k| KEYWORD_DOMAIN.is_match(k))
            .take(5)
            .collect();
        if keywords.is_empty() {
            return Ok(content.to_string());
        }

        log.push(format!(
            "Added Core Competencies section with {} relevant keywords: {}",
            keywords.len(),
            keywords.join(", ")
        ));
        Ok(format!(
            "{content}\n\nCORE COMPETENCIES\n{}",
            keywords.join(" | ")
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills list enhancement
// ────────────────────────────────────────────────────────────────────────────

/// Added when no job skill qualifies.
pub const FALLBACK_SKILLS: [&str; 5] = [
    "Adobe Creative Suite",
    "Microsoft PowerPoint",
    "Brand Guidelines",
    "Visual Communication",
    "Project Coordination",
];

lazy_static! {
    static ref SKILL_CHARSET: Regex = Regex::new(r"^[a-zA-Z\s\-&.0-9+#()/]+$").unwrap();
    static ref PRACTICAL_CATEGORY: Regex = Regex::new(
        r"(?i)(adobe|photoshop|illustrator|indesign|powerpoint|keynote|presentation|brand|visual|creative|design|layout|typography|infographic|marketing|digital|social|media|content|web|responsive|html|css|javascript|bootstrap|wordpress|github|git|project|management|collaboration|communication|teamwork|leadership|problem|solving|analytical|organizational|time|attention|detail|microsoft|office|word|excel|outlook|canva|figma|sketch|ui|ux|graphic|print|publishing|advertising|campaign|strategy|planning|research|analysis|reporting|documentation|training|client|customer|stakeholder)",
    )
    .unwrap();
}

/// Appends up to five qualifying job skills; with none, up to two generic ones.
pub fn enhance_skills(original: &[String], job_skills: &[String]) -> Vec<String> {
    let existing: HashSet<String> = original.iter().map(|s| s.to_lowercase()).collect();

    let candidates: Vec<String> = job_skills
        .iter()
        .filter(|skill| {
            !existing.contains(&skill.to_lowercase())
                && utf16_len(skill) < 30
                && skill.split(' ').count() <= 4
                && SKILL_CHARSET.is_match(skill)
                && PRACTICAL_CATEGORY.is_match(skill)
        })
        .take(5)
        .cloned()
        .collect();

    let additions = if candidates.is_empty() {
        FALLBACK_SKILLS
            .iter()
            .filter(|skill| !existing.contains(&skill.to_lowercase()))
            .take(2)
            .map(|skill| skill.to_string())
            .collect()
    } else {
        candidates
    };

    original.iter().cloned().chain(additions).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::create_resume_data;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const RESUME: &str = "Jane Doe\n\
        jane@example.com\n\
        \n\
        PROFESSIONAL SUMMARY\n\
        Graphic designer with six years of agency experience.\n\
        \n\
        PROFESSIONAL EXPERIENCE\n\
        Studio North – Senior Designer\n\
        • Designed brand systems for retail clients\n\
        • Led a team of three designers, resulting in faster delivery\n\
        - Produced print collateral\n\
        \n\
        TECHNICAL SKILLS\n\
        Photoshop | Illustrator\n\
        \n\
        FUNCTIONAL SKILLS\n\
        Teamwork | Communication";

    fn job() -> StructuredJobDescription {
        StructuredJobDescription {
            title: "Designer".into(),
            company: None,
            content: "Graphic design required.".into(),
            required_skills: vec![
                "graphic design".into(),
                "web design".into(),
                "project management".into(),
                "html".into(),
            ],
            preferred_skills: vec!["brand guidelines".into(), "leadership".into(), "html".into()],
            keywords: vec![
                "design".into(),
                "brand".into(),
                "marketing".into(),
                "digital".into(),
                "strategic".into(),
            ],
        }
    }

    fn run(pass: &dyn RewritePass, content: &str, job: &StructuredJobDescription) -> (String, Vec<String>) {
        let ctx = PassContext::new(job);
        let mut log = Vec::new();
        let out = pass.apply(content, &ctx, &mut log).unwrap();
        (out, log)
    }

    struct FailingPass;

    impl RewritePass for FailingPass {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn apply(
            &self,
            content: &str,
            _ctx: &PassContext<'_>,
            log: &mut Vec<String>,
        ) -> Result<String, RewriteError> {
            log.push("should be discarded".to_string());
            Err(RewriteError::InvalidEdit {
                pass: self.name(),
                offset: content.len() + 1,
            })
        }
    }

    #[test]
    fn test_context_deduplicates_job_skills() {
        let job = job();
        let ctx = PassContext::new(&job);
        assert_eq!(ctx.job_skills.iter().filter(|s| *s == "html").count(), 1);
        assert_eq!(ctx.job_skills.len(), 6);
    }

    #[test]
    fn test_summary_pass_appends_sentence_after_body() {
        let (out, log) = run(&SummaryPass, RESUME, &job());
        assert!(out.contains(
            "Graphic designer with six years of agency experience. Experienced in brand, marketing, digital with a focus on delivering exceptional results.\n\nPROFESSIONAL EXPERIENCE"
        ));
        assert_eq!(
            log,
            vec!["Enhanced professional summary with 3 relevant keywords: brand, marketing, digital"]
        );
    }

    #[test]
    fn test_summary_pass_skips_missing_or_empty_summary() {
        let job = job();
        let (out, log) = run(&SummaryPass, "Jane Doe\nEXPERIENCE\n- Did things", &job);
        assert_eq!(out, "Jane Doe\nEXPERIENCE\n- Did things");
        assert!(log.is_empty());

        let (out, log) = run(&SummaryPass, "PROFESSIONAL SUMMARY\n\nEXPERIENCE", &job);
        assert_eq!(out, "PROFESSIONAL SUMMARY\n\nEXPERIENCE");
        assert!(log.is_empty());
    }

    #[test]
    fn test_experience_pass_enhances_bullets_and_adds_skill_bullet() {
        let (out, log) = run(&ExperiencePass, RESUME, &job());
        assert!(out.contains(
            "• Designed brand systems for retail clients, resulting in improved efficiency\n"
        ));
        assert!(out.contains("• Led a team of three designers, resulting in faster delivery\n"));
        assert!(out.contains(
            "- Produced print collateral, leading to increased client satisfaction\n• Utilized graphic design and web design to deliver comprehensive solutions aligned with business objectives\n\nTECHNICAL SKILLS"
        ));
        assert_eq!(
            log,
            vec![
                "Enhanced 2 experience bullet points with impact statements",
                "Added experience bullet highlighting graphic design and web design skills",
            ]
        );
    }

    #[test]
    fn test_experience_pass_ignores_prose_mentioning_experience() {
        let content = "Experienced designer\n- Built things";
        let (out, _) = run(&ExperiencePass, content, &job());
        assert_eq!(out, content);
    }

    #[test]
    fn test_bullets_with_outcomes_do_not_use_up_slots() {
        let content = "EXPERIENCE\n- Led team, resulting in growth\n- Built kiosks\n- Ran workshops";
        let (out, log) = run(&ExperiencePass, content, &StructuredJobDescription::default());
        assert_eq!(
            out,
            "EXPERIENCE\n- Led team, resulting in growth\n- Built kiosks, resulting in improved efficiency\n- Ran workshops, leading to increased client satisfaction"
        );
        assert_eq!(
            log,
            vec!["Enhanced 2 experience bullet points with impact statements"]
        );
    }

    #[test]
    fn test_second_bullet_gets_second_clause() {
        let content = "EXPERIENCE\n- Built kiosks\n- Ran workshops";
        let job = StructuredJobDescription::default();
        let (out, _) = run(&ExperiencePass, content, &job);
        assert_eq!(
            out,
            "EXPERIENCE\n- Built kiosks, resulting in improved efficiency\n- Ran workshops, leading to increased client satisfaction"
        );
    }

    #[test]
    fn test_skills_section_pass_extends_both_blocks() {
        let (out, log) = run(&SkillsSectionPass, RESUME, &job());
        assert!(out.contains("Photoshop | Illustrator | graphic design | web design | html\n\nFUNCTIONAL SKILLS"));
        assert!(out.ends_with("Teamwork | Communication | project management | leadership"));
        assert_eq!(
            log,
            vec![
                "Added 3 technical skills: graphic design, web design, html",
                "Added 2 functional skills: project management, leadership",
            ]
        );
    }

    #[test]
    fn test_technical_block_stops_at_adjacent_functional_header() {
        let content = "TECHNICAL SKILLS\nPhotoshop\nFUNCTIONAL SKILLS\nTeamwork";
        let job = StructuredJobDescription {
            required_skills: vec!["html".into()],
            ..StructuredJobDescription::default()
        };
        let (out, _) = run(&SkillsSectionPass, content, &job);
        assert_eq!(out, "TECHNICAL SKILLS\nPhotoshop | html\nFUNCTIONAL SKILLS\nTeamwork");
    }

    #[test]
    fn test_header_pass_rewrites_heading_lines_only() {
        let content = "WORK EXPERIENCE\nMy work experience spans WORK EXPERIENCE docs\nQUALIFICATIONS\nEMPLOYMENT HISTORY";
        let (out, log) = run(&HeaderPass, content, &job());
        assert_eq!(
            out,
            "PROFESSIONAL EXPERIENCE\nMy work experience spans WORK EXPERIENCE docs\nSKILLS\nPROFESSIONAL EXPERIENCE"
        );
        assert_eq!(log, vec!["Optimized 3 section headers for ATS compatibility"]);
    }

    #[test]
    fn test_optimize_replaces_renamed_headers_and_keeps_other_lines() {
        let content = "Jane Doe\nWORK EXPERIENCE\n- Built kiosks\n\nQUALIFICATIONS\nFigma, Sketch";
        let resume = create_resume_data("jane.txt", content);
        let optimized = ContentOptimizer::default().optimize(&resume, &job());

        let lines: Vec<&str> = optimized.content.lines().map(str::trim).collect();
        assert!(!lines.contains(&"WORK EXPERIENCE"));
        assert!(!lines.contains(&"QUALIFICATIONS"));
        assert!(lines.contains(&"PROFESSIONAL EXPERIENCE"));
        assert!(lines.contains(&"SKILLS"));
        for kept in ["Jane Doe", "- Built kiosks", "Figma, Sketch"] {
            assert!(optimized.content.contains(kept), "lost line {kept:?}");
        }
    }

    #[test]
    fn test_header_pass_matches_whole_words() {
        let content = "CAPABILITIES";
        let (out, log) = run(&HeaderPass, content, &job());
        assert_eq!(out, "CAPABILITIES");
        assert!(log.is_empty());
    }

    #[test]
    fn test_keyword_section_pass_appends_missing_terms() {
        let (out, log) = run(&KeywordSectionPass, "Jane Doe\nBrand work", &job());
        assert_eq!(
            out,
            "Jane Doe\nBrand work\n\nCORE COMPETENCIES\ndesign | marketing | digital | strategic"
        );
        assert_eq!(
            log,
            vec!["Added Core Competencies section with 4 relevant keywords: design, marketing, digital, strategic"]
        );
    }

    #[test]
    fn test_enhance_skills_adds_qualifying_job_skills() {
        let original = vec!["Photoshop".to_string(), "Graphic Design".to_string()];
        let job_skills: Vec<String> = ["graphic design", "web design", "c++", "kubernetes", "brand guidelines"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let enhanced = enhance_skills(&original, &job_skills);
        // c++ and kubernetes name no practical category.
        assert_eq!(
            enhanced,
            vec!["Photoshop", "Graphic Design", "web design", "brand guidelines"]
        );
    }

    #[test]
    fn test_enhance_skills_falls_back_to_generic_list() {
        let original = vec!["Adobe Creative Suite".to_string()];
        let enhanced = enhance_skills(&original, &["kubernetes".to_string()]);
        assert_eq!(
            enhanced,
            vec!["Adobe Creative Suite", "Microsoft PowerPoint", "Brand Guidelines"]
        );
    }

    #[test]
    fn test_optimize_runs_all_passes_in_order() {
        let resume = create_resume_data("jane.txt", RESUME);
        let job = job();
        let optimized = ContentOptimizer::default().optimize(&resume, &job);

        assert_eq!(
            optimized.changes_log,
            vec![
                "Enhanced professional summary with 3 relevant keywords: brand, marketing, digital",
                "Enhanced 2 experience bullet points with impact statements",
                "Added experience bullet highlighting graphic design and web design skills",
                "Added 3 technical skills: graphic design, web design, html",
                "Added 2 functional skills: project management, leadership",
                "Added Core Competencies section with 1 relevant keywords: strategic",
                "Added 5 new relevant skills",
            ]
        );
        assert!(optimized.content.ends_with("\n\nCORE COMPETENCIES\nstrategic"));
        assert_eq!(resume.content, RESUME);
        assert!(resume.changes_log.is_empty());
    }

    #[test]
    fn test_all_passes_failing_keeps_original_content() {
        let resume = create_resume_data("jane.txt", RESUME);
        let original_skills = resume.sections.skills.clone();
        let optimizer = ContentOptimizer::with_passes(vec![
            Box::new(FailingPass),
            Box::new(FailingPass),
            Box::new(FailingPass),
            Box::new(FailingPass),
            Box::new(FailingPass),
        ]);

        let optimized = optimizer.optimize(&resume, &job());

        assert_eq!(optimized.content, RESUME);
        assert_eq!(optimized.changes_log[0], FALLBACK_LOG_ENTRY);
        assert!(!optimized.changes_log.iter().any(|l| l == "should be discarded"));
        assert!(optimized.sections.skills.len() > original_skills.len());
    }

    #[test]
    fn test_failure_after_successful_pass_discards_its_edits() {
        let resume = create_resume_data("jane.txt", RESUME);
        let optimizer =
            ContentOptimizer::with_passes(vec![Box::new(SummaryPass), Box::new(FailingPass)]);
        let optimized = optimizer.optimize(&resume, &job());
        assert_eq!(optimized.content, RESUME);
        assert_eq!(optimized.changes_log[0], FALLBACK_LOG_ENTRY);
        assert!(!optimized.changes_log.iter().any(|l| l.starts_with("Enhanced professional summary")));
    }

    #[test]
    fn test_insert_rejects_offsets_inside_characters() {
        let err = insert_all("test", "•x", vec![(1, "y".to_string())]).unwrap_err();
        assert!(matches!(err, RewriteError::InvalidEdit { offset: 1, .. }));
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("PROFESSIONAL SUMMARY".to_string()),
            Just("PROFESSIONAL EXPERIENCE".to_string()),
            Just("TECHNICAL SKILLS".to_string()),
            Just("FUNCTIONAL SKILLS".to_string()),
            Just("WORK EXPERIENCE".to_string()),
            Just("QUALIFICATIONS".to_string()),
            Just(String::new()),
            "[•\\-] [A-Za-z ,]{1,30}",
            "[A-Za-z][A-Za-z ,.|]{0,40}",
        ]
    }

    fn job_strategy() -> impl Strategy<Value = StructuredJobDescription> {
        let terms = vec![
            "graphic design", "web design", "html", "project management", "leadership",
            "branding", "digital", "strategic", "marketing", "kubernetes", "figma",
        ];
        (
            proptest::sample::subsequence(terms.clone(), 0..=6),
            proptest::sample::subsequence(terms.clone(), 0..=4),
            proptest::sample::subsequence(terms, 0..=8),
        )
            .prop_map(|(required, preferred, keywords)| StructuredJobDescription {
                required_skills: required.into_iter().map(String::from).collect(),
                preferred_skills: preferred.into_iter().map(String::from).collect(),
                keywords: keywords.into_iter().map(String::from).collect(),
                ..StructuredJobDescription::default()
            })
    }

    proptest! {
        #[test]
        fn prop_optimizer_never_deletes_original_lines(
            lines in proptest::collection::vec(line_strategy(), 0..25),
            job in job_strategy(),
        ) {
            let content = lines.join("\n");
            let resume = create_resume_data("cv.txt", &content);
            let optimized = ContentOptimizer::default().optimize(&resume, &job);

            let kept = content
                .split('\n')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .filter(|l| !HEADER_REWRITES.iter().any(|(from, _)| l == from));
            for line in kept {
                prop_assert!(optimized.content.contains(line), "lost line {:?}", line);
            }
            prop_assert!(optimized.sections.skills.len() >= resume.sections.skills.len());
        }
    }
}
