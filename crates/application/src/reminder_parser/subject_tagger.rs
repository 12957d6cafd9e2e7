//! Course subject tagging

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Ordered subject alternations, longer phrasings first
const SUBJECTS: &[&str] = &[
    "data structures?|ds",
    "machine learning|ml",
    "artificial intelligence|ai",
    "database management|dbms",
    "operating systems?|os",
    "computer networks?|cn",
    "software engineering",
    "web development|web dev",
    "mobile computing|mobile",
    "cyber security|security",
    "mathematics|maths|math",
    "physics|phy",
    "chemistry|chem",
    "english|eng",
    "management|mgmt",
    "electronics?",
    "data science",
    "circuit",
];

static SUBJECT_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SUBJECTS
        .iter()
        .map(|alternatives| {
            #[allow(clippy::expect_used)] // Patterns are static and tested
            Regex::new(&format!(r"\b(?:{alternatives})\b")).expect("Invalid subject pattern")
        })
        .collect()
});

/// Upper-case every letter that follows a non-letter, lower-case the rest
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

/// Find the course the text is about, e.g. `"Data Structures"`
#[must_use]
pub fn extract_subject(text: &str) -> Option<String> {
    let text = text.to_lowercase();
    let subject = SUBJECT_RULES
        .iter()
        .find_map(|rule| rule.find(&text))
        .map(|m| title_case(m.as_str()))?;
    debug!(subject = %subject, "Tagged subject");
    Some(subject)
}
