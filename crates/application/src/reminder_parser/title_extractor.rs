//! Short title extraction
//!
//! Tries ordered capture patterns ("your X assignment", "for X on ...",
//! "X lab") and falls back to the first meaningful sentence of the message.

use std::sync::LazyLock;

use domain::ReminderCategory;
use regex::Regex;
use tracing::debug;

/// Longest fallback title before truncation
const MAX_FALLBACK_CHARS: usize = 50;

/// Lab subjects written in capitals, e.g. "having DBMS lab" or "CN practical"
const LAB_PATTERNS: &[&str] = &[
    r"\b(?i:having)\s+([A-Z][A-Z0-9&]*(?:[ \t]+[A-Z][A-Z0-9&]*)*)\s+(?i:lab)\b",
    r"\b([A-Z][A-Z0-9&]*(?:[ \t]+[A-Z][A-Z0-9&]*)*)\s+(?i:lab)\b",
    r"\b([A-Z][A-Z0-9&]*(?:[ \t]+[A-Z][A-Z0-9&]*)*)\s+(?i:laboratory)\b",
    r"\b([A-Z][A-Z0-9&]*(?:[ \t]+[A-Z][A-Z0-9&]*)*)\s+(?i:practical)\b",
];

const SUBJECT_PATTERNS: &[&str] = &[
    r"(?im)\bfor\s+([\w\s]+?)(?:\s+on\b|\s+at\b|\s*$)",
    r"(?im)\bin\s+([\w\s]+?)(?:\s+on\b|\s+at\b|\s*$)",
    r"(?i)\byour\s+([\w\s]+?)\s+(?:assignment|homework|task|exam|test|quiz|project|presentation)\b",
    r"(?i)\bsubmit\s+your\s+([\w\s]+?)\s+(?:assignment|homework|task|exam|test|quiz|project)\b",
    r"(?i)([\w\s]+?)\s+(?:assignment|homework|task|exam|test|quiz|project|presentation)\b",
    r"(?i)([\w\s]+?)\s+is\s+due\b",
    r"(?i)([\w\s]+?)\s+submission\b",
    r"(?im)\bsubmit\s+([\w\s]+?)(?:\s+on\b|\s+at\b|\s*$)",
];

#[allow(clippy::expect_used)] // Patterns are static and tested
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid title pattern"))
        .collect()
}

static LAB_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(LAB_PATTERNS));
static SUBJECT_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(SUBJECT_PATTERNS));

#[allow(clippy::expect_used)] // Static pattern
static ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:the|a|an)\b").expect("Invalid article pattern"));

#[allow(clippy::expect_used)] // Static pattern
static LAB_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bLAB\b").expect("Invalid lab word pattern"));

#[allow(clippy::expect_used)] // Static pattern
static HEADER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:re|fwd|subject|from|to):").expect("Invalid header pattern")
});

#[allow(clippy::expect_used)] // Static pattern
static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:hi|hello|dear|students|reminder|notice|important)\b[\s,:;!\-]*")
        .expect("Invalid greeting pattern")
});

/// Drop articles and squeeze whitespace
fn clean_capture(capture: &str) -> String {
    ARTICLES
        .replace_all(capture, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn acceptable(title: &str) -> bool {
    let len = title.chars().count();
    len > 2 && len < 50
}

/// First accepted capture of the first rule that produces one
fn first_capture(rules: &[Regex], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let caps = rule.captures(text)?;
        let title = clean_capture(caps.get(1)?.as_str());
        acceptable(&title).then_some(title)
    })
}

/// Append the lab marker unless the word is already there
fn with_lab_suffix(title: String, category: ReminderCategory) -> String {
    if category == ReminderCategory::Lab && !LAB_WORD.is_match(&title) {
        format!("{title} LAB")
    } else {
        title
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_FALLBACK_CHARS {
        let head: String = text.chars().take(MAX_FALLBACK_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// First line without mail headers, first sentence without greeting
fn fallback_title(text: &str, category: ReminderCategory) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let first_line = HEADER_PREFIX.replace(first_line, "");
    let first_line = first_line.trim();

    for sentence in first_line.split(['.', '!', '?']) {
        let sentence = sentence.trim();
        let len = sentence.chars().count();
        if len > 10 && len < 100 {
            let sentence = GREETING.replace(sentence, "");
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                return truncate(sentence);
            }
        }
    }

    if first_line.chars().count() > 10 {
        return truncate(first_line);
    }

    format!("{} Reminder", category.label())
}

/// Extract a short title for a reminder of `category`
#[must_use]
pub fn extract_title(text: &str, category: ReminderCategory) -> String {
    let text = text.trim();

    let matched = first_capture(&LAB_RULES, text).or_else(|| first_capture(&SUBJECT_RULES, text));
    if let Some(title) = matched {
        let title = with_lab_suffix(title.to_uppercase(), category);
        debug!(title = %title, "Extracted title from pattern");
        return title;
    }

    let title = fallback_title(text, category);
    debug!(title = %title, "Using fallback title");
    title
}
