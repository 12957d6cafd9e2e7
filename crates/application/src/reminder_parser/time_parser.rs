//! Clock time extraction and per-category default times

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::{Captures, Regex};

type TimeConverter = fn(&Captures<'_>) -> Option<NaiveTime>;

struct TimeRule {
    pattern: Regex,
    convert: TimeConverter,
}

impl TimeRule {
    fn new(pattern: &str, convert: TimeConverter) -> Self {
        #[allow(clippy::expect_used)] // Patterns are static and tested
        let pattern = Regex::new(pattern).expect("Invalid time pattern");
        Self { pattern, convert }
    }

    /// First candidate that forms a valid clock time
    fn apply(&self, text: &str) -> Option<NaiveTime> {
        self.pattern
            .captures_iter(text)
            .find_map(|caps| (self.convert)(&caps))
    }
}

static TIME_RULES: LazyLock<Vec<TimeRule>> = LazyLock::new(|| {
    vec![
        // 5pm, 5:30 pm
        TimeRule::new(r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b", |caps| {
            let minute = match caps.get(2) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            twelve_hour(number(caps, 1)?, minute, caps.get(3)?.as_str())
        }),
        // 5 o'clock
        TimeRule::new(
            r"\b(\d{1,2})\s*(?:o['’]\s*clock|['’]o\s*clock|o\s*clock)\b",
            |caps| NaiveTime::from_hms_opt(number::<u32>(caps, 1)? % 24, 0, 0),
        ),
        // 17:30
        TimeRule::new(r"\b(\d{1,2}):(\d{2})\b", |caps| {
            NaiveTime::from_hms_opt(number(caps, 1)?, number(caps, 2)?, 0)
        }),
        // 1730
        TimeRule::new(r"\b(\d{2})(\d{2})\b", |caps| {
            NaiveTime::from_hms_opt(number(caps, 1)?, number(caps, 2)?, 0)
        }),
        // 5 pm
        TimeRule::new(r"\b(\d{1,2})\s*(am|pm)\b", |caps| {
            twelve_hour(number(caps, 1)?, 0, caps.get(2)?.as_str())
        }),
    ]
});

/// Default due time when nothing explicit is written
struct DefaultTime {
    pattern: Regex,
    hour: u32,
    minute: u32,
}

/// End-of-day for deadlines
const DEADLINE_TIME: (u32, u32) = (23, 59);
/// Morning slot for exams
const EXAM_TIME: (u32, u32) = (9, 0);
/// Afternoon slot for labs
const LAB_TIME: (u32, u32) = (14, 0);

static DEFAULT_TIMES: LazyLock<Vec<DefaultTime>> = LazyLock::new(|| {
    [
        (r"\b(?:assignment|homework|submit|due|project)s?\b", DEADLINE_TIME),
        (r"\b(?:exam|test|quiz|examination)s?\b", EXAM_TIME),
        (r"\b(?:lab|laboratory|labsheet|practical)s?\b", LAB_TIME),
    ]
    .into_iter()
    .map(|(pattern, (hour, minute))| {
        #[allow(clippy::expect_used)] // Patterns are static and tested
        let pattern = Regex::new(pattern).expect("Invalid default time pattern");
        DefaultTime {
            pattern,
            hour,
            minute,
        }
    })
    .collect()
});

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

/// 12-hour clock to 24-hour; the written hour must be 1..=12
fn twelve_hour(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = hour % 12 + if meridiem == "pm" { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Find an explicit clock time in `text`
///
/// A written absolute date should already be blanked out; see
/// [`super::date_parser::blank_span`].
#[must_use]
pub fn parse_time_from_text(text: &str) -> Option<NaiveTime> {
    let text = text.to_lowercase();
    TIME_RULES.iter().find_map(|rule| rule.apply(&text))
}

/// Default time implied by the kind of work mentioned in `text`
#[must_use]
pub fn default_time_for(text: &str) -> NaiveTime {
    let text = text.to_lowercase();
    let (hour, minute) = DEFAULT_TIMES
        .iter()
        .find(|default| default.pattern.is_match(&text))
        .map_or(DEADLINE_TIME, |default| (default.hour, default.minute));
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
