//! Completeness Heuristic: advisory presence checks over flattened resume text.
//!
//! Each check is an independent predicate; none reads another's result. False
//! positives and negatives are expected, so the report is guidance, never a gate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// Labels of items judged absent, in check order.
    pub missing: Vec<String>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// How many leading lines may hold the candidate's name.
const NAME_SCAN_LINES: usize = 5;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z\s]{2,29}$").expect("valid name regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("valid phone regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

const LOCATION_KEYWORDS: &[&str] = &[
    "address", "city", "state", "location", "street", "avenue", "road",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "professional experience",
];

const EDUCATION_KEYWORDS: &[&str] = &["education", "degree", "university", "college", "school"];

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "competencies",
    "proficiencies",
];

/// Evaluation order and labels. Order is part of the report contract.
const CHECKS: &[(&str, fn(&str) -> bool)] = &[
    ("Full Name", has_full_name),
    ("Phone Number", has_phone_number),
    ("Email Address", has_email_address),
    ("Address/Location", has_location),
    ("Work Experience section", has_experience_section),
    ("Education section", has_education_section),
    ("Skills section", has_skills_section),
];

pub fn check_completeness(text: &str) -> CompletenessReport {
    let missing = CHECKS
        .iter()
        .filter(|(_, passes)| !passes(text))
        .map(|(label, _)| label.to_string())
        .collect();

    CompletenessReport { missing }
}

pub fn has_full_name(text: &str) -> bool {
    text.lines()
        .take(NAME_SCAN_LINES)
        .any(|line| NAME_RE.is_match(line.trim()))
}

pub fn has_phone_number(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

pub fn has_email_address(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

pub fn has_location(text: &str) -> bool {
    contains_any(text, LOCATION_KEYWORDS)
}

pub fn has_experience_section(text: &str) -> bool {
    contains_any(text, EXPERIENCE_KEYWORDS)
}

pub fn has_education_section(text: &str) -> bool {
    contains_any(text, EDUCATION_KEYWORDS)
}

pub fn has_skills_section(text: &str) -> bool {
    contains_any(text, SKILLS_KEYWORDS)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
