//! Job description analysis: required and preferred skills, ranked keywords and
//! per-skill importance.
//!
//! All matching runs on the lower-cased posting, so results are case-insensitive.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::analysis::vocabulary::Vocabulary;
use crate::models::{Importance, StructuredJobDescription};

const KEYWORD_MIN_LEN: usize = 3;
const TOP_KEYWORDS: usize = 20;

lazy_static! {
    /// Where an indicator's window ends: a new line opening a preferred or duties block.
    static ref WINDOW_END: Regex = Regex::new(
        r"\n\s*(?:preferred|desired|nice|plus|responsibilities|duties|we offer)",
    )
    .unwrap();
    static ref BULLET: Regex = Regex::new(r"[•·\-]\s*[^\n]+").unwrap();
}

pub fn analyze_job_description(
    vocab: &Vocabulary,
    title: &str,
    company: &str,
    content: &str,
) -> StructuredJobDescription {
    let required_skills = extract_skills(vocab, content, &vocab.required_indicators);
    let preferred_skills = extract_skills(vocab, content, &vocab.preferred_indicators);
    let keywords = extract_keywords(vocab, content);

    debug!(
        required = required_skills.len(),
        preferred = preferred_skills.len(),
        keywords = keywords.len(),
        "Job description analyzed"
    );

    StructuredJobDescription {
        title: title.to_string(),
        company: (!company.is_empty()).then(|| company.to_string()),
        content: content.to_string(),
        required_skills,
        preferred_skills,
        keywords,
    }
}

/// Vocabulary skills found in the text following any of `indicators`, plus those on
/// any bullet line. Deduplicated in discovery order.
pub fn extract_skills(vocab: &Vocabulary, content: &str, indicators: &[&str]) -> Vec<String> {
    let lower = content.to_lowercase();
    let mut skills: Vec<&'static str> = Vec::new();

    for indicator in indicators {
        for window in indicator_windows(&lower, indicator) {
            skills.extend(vocab.skills_in(window));
        }
    }

    for bullet in BULLET.find_iter(&lower) {
        skills.extend(vocab.skills_in(bullet.as_str()));
    }

    dedup_preserving_order(skills.into_iter().map(String::from))
}

/// Non-overlapping spans starting at each occurrence of `indicator` and running to
/// the nearest window end, or the end of the text.
fn indicator_windows<'a>(lower: &'a str, indicator: &str) -> Vec<&'a str> {
    let mut windows = Vec::new();
    let mut from = 0;

    while let Some(offset) = lower[from..].find(indicator) {
        let start = from + offset;
        let body_start = start + indicator.len();
        let end = WINDOW_END
            .find_at(lower, body_start)
            .map(|m| m.start())
            .unwrap_or(lower.len());
        windows.push(&lower[start..end]);
        from = end.max(body_start);
    }

    windows
}

/// Frequent terms (more than one occurrence, stop words removed) ranked by count,
/// followed by every vocabulary skill present in the text.
pub fn extract_keywords(vocab: &Vocabulary, content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    let normalized: String = lower
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in normalized
        .split_whitespace()
        .filter(|w| w.len() > KEYWORD_MIN_LEN)
    {
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order
        .into_iter()
        .map(|word| (word, counts[word]))
        .filter(|(word, count)| *count > 1 && !vocab.is_stop_word(word))
        .collect();
    // Both sorts are stable: equal counts keep the tie order.
    ranked.sort_by_key(|(word, _)| tie_rank(word));
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let frequent = ranked
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(word, _)| word.to_string());
    let skills = vocab.skills_in(&lower).map(String::from);

    dedup_preserving_order(frequent.chain(skills))
}

/// Tie order among equally frequent tokens: integer-like tokens ("2024") come first
/// in ascending numeric order, everything else stays in first-seen order.
fn tie_rank(word: &str) -> (u8, u64) {
    match integer_key(word) {
        Some(n) => (0, n),
        None => (1, 0),
    }
}

/// Canonical decimal below 2^32 - 1, without leading zeros.
fn integer_key(word: &str) -> Option<u64> {
    if !word.bytes().all(|b| b.is_ascii_digit()) || (word.len() > 1 && word.starts_with('0')) {
        return None;
    }
    word.parse::<u64>()
        .ok()
        .filter(|n| *n < u64::from(u32::MAX))
}

/// First tier whose qualifying phrase appears anywhere before or after the skill.
/// Defaults to medium.
pub fn get_skill_importance(vocab: &Vocabulary, skill: &str, job_content: &str) -> Importance {
    let content = job_content.to_lowercase();
    let skill = skill.to_lowercase();

    vocab
        .importance_tiers
        .iter()
        .find(|(_, phrases)| {
            phrases.iter().any(|phrase| {
                occurs_in_order(&content, phrase, &skill) || occurs_in_order(&content, &skill, phrase)
            })
        })
        .map(|(tier, _)| *tier)
        .unwrap_or_default()
}

/// True if `first` occurs and `second` occurs after it without overlapping.
fn occurs_in_order(text: &str, first: &str, second: &str) -> bool {
    text.find(first)
        .map(|start| text[start + first.len()..].contains(second))
        .unwrap_or(false)
}

fn dedup_preserving_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
