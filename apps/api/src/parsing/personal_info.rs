//! Contact block extraction: name, email, phone, location and LinkedIn profile.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::PersonalInfo;
use crate::text::normalize::non_blank_lines;

/// Only the first few non-blank lines are considered for the candidate's name.
const NAME_WINDOW: usize = 5;

lazy_static! {
    static ref NAME: Regex =
        Regex::new(r"^[A-Z][a-zA-Z]+ [A-Z][a-zA-Z]+(\s[A-Z][a-zA-Z]+)?$").unwrap();
    static ref EMAIL: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
    static ref PHONE: Regex =
        Regex::new(r"(\+[0-9]{1,3}\s?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").unwrap();
    static ref LINKEDIN: Regex =
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+").unwrap();

    /// Tried in order; the first pattern with any match wins.
    static ref LOCATIONS: [Regex; 3] = [
        // Street address with postal code, city, region and country.
        Regex::new(
            r"[0-9]+\s+[A-Za-z\s]+(?:Road|Street|Avenue|Drive|Lane|Way|Court|Place)\s+[A-Z0-9]{3,}\s+[A-Za-z\s]+,\s*[A-Z]{2,3},?\s*[A-Z]{2,}",
        )
        .unwrap(),
        // City, region with optional postal code and country.
        Regex::new(
            r"[A-Za-z\s]+,\s*[A-Z]{2,3}(?:\s*[A-Z0-9]{3}\s*[A-Z0-9]{3})?\s*[A-Za-z\s]*,?\s*[A-Z]{2,}",
        )
        .unwrap(),
        // Postal code, city, region.
        Regex::new(r"[A-Z0-9]{3}\s*[A-Z0-9]{3}\s+[A-Za-z\s]+,\s*[A-Z]{2,}").unwrap(),
    ];
}

/// Scans the raw text for contact details. Fields with no match stay empty.
pub fn extract_personal_info(text: &str) -> PersonalInfo {
    PersonalInfo {
        name: find_name(text).unwrap_or_default(),
        email: first_match(&EMAIL, text).unwrap_or_default(),
        phone: first_match(&PHONE, text).unwrap_or_default(),
        location: find_location(text).unwrap_or_default(),
        linkedin: find_linkedin(text),
        portfolio: None,
    }
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

fn find_name(text: &str) -> Option<String> {
    non_blank_lines(text)
        .into_iter()
        .take(NAME_WINDOW)
        .map(str::trim)
        .find(|line| {
            NAME.is_match(line)
                && !line.contains('@')
                && !line.contains('+')
                && !line.contains("Road")
                && !line.contains("Street")
        })
        .map(String::from)
}

fn find_location(text: &str) -> Option<String> {
    LOCATIONS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim().to_string())
}

fn find_linkedin(text: &str) -> Option<String> {
    LINKEDIN.find(text).map(|m| {
        let url = m.as_str();
        if url.starts_with("http") {
            url.to_string()
        } else {
            format!("https://{url}")
        }
    })
}
