//! Calendar date extraction from free-form reminder text
//!
//! Resolution order: relative expressions ("tomorrow", "in 3 days",
//! "next friday"), then a bare weekday name, then absolute formats
//! ("15/06/2024", "June 15th", "2024-06-15"). The first rule that yields a
//! real calendar date wins.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, TimeDelta};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// Which kind of rule produced a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// "today", "in 2 weeks", "next monday", ...
    Relative,
    /// A bare weekday name
    Weekday,
    /// A written calendar date
    Absolute,
    /// Nothing matched; the reference day was used
    Defaulted,
}

/// A date found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub source: DateSource,
    /// Byte range of the written date in the lowercased text; only
    /// absolute dates carry one
    pub span: Option<Range<usize>>,
}

type DateConverter = fn(&Captures<'_>, NaiveDate) -> Option<NaiveDate>;
type CandidateFilter = fn(&str, Range<usize>) -> bool;

/// One ordered date rule
struct DateRule {
    pattern: Regex,
    convert: DateConverter,
    accept: CandidateFilter,
}

impl DateRule {
    fn new(pattern: &str, convert: DateConverter) -> Self {
        Self::filtered(pattern, convert, any_candidate)
    }

    fn filtered(pattern: &str, convert: DateConverter, accept: CandidateFilter) -> Self {
        #[allow(clippy::expect_used)] // Patterns are static and tested
        let pattern = Regex::new(pattern).expect("Invalid date pattern");
        Self {
            pattern,
            convert,
            accept,
        }
    }

    /// First candidate the filter accepts
    fn first_candidate<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.pattern.captures_iter(text).find(|caps| {
            caps.get(0)
                .is_some_and(|m| (self.accept)(text, m.range()))
        })
    }

    /// Apply the rule: only the first candidate is tried
    fn apply(&self, text: &str, today: NaiveDate) -> Option<(NaiveDate, Range<usize>)> {
        let caps = self.first_candidate(text)?;
        let date = (self.convert)(&caps, today)?;
        Some((date, caps.get(0)?.range()))
    }
}

static RELATIVE_RULES: LazyLock<Vec<DateRule>> = LazyLock::new(|| {
    let weekdays = WEEKDAYS.join("|");
    vec![
        // Checked before "tomorrow" so it is reachable
        DateRule::new(r"\bday\s+after\s+tomorrow\b", |_, today| {
            shift_days(today, 2)
        }),
        DateRule::new(r"\btoday\b", |_, today| Some(today)),
        DateRule::new(r"\btomorrow\b", |_, today| shift_days(today, 1)),
        DateRule::new(r"\byesterday\b", |_, today| shift_days(today, -1)),
        DateRule::new(r"\bnext\s+week\b", |_, today| shift_days(today, 7)),
        DateRule::new(r"\bnext\s+month\b", |_, today| shift_days(today, 30)),
        DateRule::new(r"\bin\s+(\d+)\s+days?\b", |caps, today| {
            shift_days(today, capture_number(caps, 1)?)
        }),
        DateRule::new(r"\bin\s+(\d+)\s+weeks?\b", |caps, today| {
            shift_days(today, capture_number::<i64>(caps, 1)?.checked_mul(7)?)
        }),
        DateRule::new(r"\bin\s+a\s+week\b", |_, today| shift_days(today, 7)),
        DateRule::new(r"\bin\s+a\s+month\b", |_, today| shift_days(today, 30)),
        DateRule::new(&format!(r"\bthis\s+({weekdays})\b"), |caps, today| {
            let target = weekday_index(caps.get(1)?.as_str())?;
            shift_days(today, (target - today_index(today)).rem_euclid(7))
        }),
        DateRule::new(&format!(r"\bnext\s+({weekdays})\b"), |caps, today| {
            let target = weekday_index(caps.get(1)?.as_str())?;
            let days = (target - today_index(today)).rem_euclid(7);
            shift_days(today, if days == 0 { 7 } else { days })
        }),
    ]
});

#[allow(clippy::expect_used)] // Static pattern
static BARE_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", WEEKDAYS.join("|"))).expect("Invalid weekday pattern")
});

static ABSOLUTE_RULES: LazyLock<Vec<DateRule>> = LazyLock::new(|| {
    vec![
        // DD/MM/YYYY, day-first
        DateRule::new(
            r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})\b",
            |caps, _| ymd(capture_number(caps, 3)?, capture_number(caps, 2)?, capture_number(caps, 1)?),
        ),
        // DD/MM in the current year, but never a piece of a longer date
        DateRule::filtered(
            r"\b(\d{1,2})[/.\-](\d{1,2})\b",
            |caps, today| ymd(today.year(), capture_number(caps, 2)?, capture_number(caps, 1)?),
            standalone_day_month,
        ),
        // YYYY-MM-DD
        DateRule::new(
            r"\b(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})\b",
            |caps, _| ymd(capture_number(caps, 1)?, capture_number(caps, 2)?, capture_number(caps, 3)?),
        ),
        // June 15, 2024
        DateRule::new(
            &format!(r"\b({MONTHS})\s+(\d{{1,2}})\b(?:,?\s*(\d{{4}})\b)?"),
            |caps, today| month_day(caps, today, 1, 2, 3),
        ),
        // 15 June 2024
        DateRule::new(
            &format!(r"\b(\d{{1,2}})\s+({MONTHS})\b(?:\s*(\d{{4}})\b)?"),
            |caps, today| month_day(caps, today, 2, 1, 3),
        ),
        // 15th June 2024
        DateRule::new(
            &format!(r"\b(\d{{1,2}})(?:st|nd|rd|th)\s+({MONTHS})\b(?:\s*(\d{{4}})\b)?"),
            |caps, today| month_day(caps, today, 2, 1, 3),
        ),
        // June 15th 2024
        DateRule::new(
            &format!(r"\b({MONTHS})\s+(\d{{1,2}})(?:st|nd|rd|th)\b(?:,?\s*(\d{{4}})\b)?"),
            |caps, today| month_day(caps, today, 1, 2, 3),
        ),
    ]
});

fn any_candidate(_: &str, _: Range<usize>) -> bool {
    true
}

/// Reject `DD/MM` candidates that sit inside `DD/MM/YYYY` or `YYYY-MM-DD`
fn standalone_day_month(text: &str, range: Range<usize>) -> bool {
    let bytes = text.as_bytes();
    let is_sep = |b: u8| matches!(b, b'/' | b'-' | b'.');

    let followed = bytes.get(range.end).copied().is_some_and(is_sep)
        && bytes
            .get(range.end + 1)
            .is_some_and(u8::is_ascii_digit);
    let preceded = range.start >= 2
        && is_sep(bytes[range.start - 1])
        && bytes[range.start - 2].is_ascii_digit();

    !followed && !preceded
}

fn capture_number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month-name formats; a missing year means the reference year
fn month_day(
    caps: &Captures<'_>,
    today: NaiveDate,
    month_group: usize,
    day_group: usize,
    year_group: usize,
) -> Option<NaiveDate> {
    let month = month_number(caps.get(month_group)?.as_str())?;
    let day = capture_number(caps, day_group)?;
    let year = match caps.get(year_group) {
        Some(year) => year.as_str().parse().ok()?,
        None => today.year(),
    };
    ymd(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_index(name: &str) -> Option<i64> {
    WEEKDAYS
        .iter()
        .position(|day| *day == name)
        .and_then(|idx| i64::try_from(idx).ok())
}

fn today_index(today: NaiveDate) -> i64 {
    i64::from(today.weekday().num_days_from_monday())
}

fn shift_days(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Next occurrence of the earliest weekday (Monday first) named in `text`
///
/// A weekday equal to today resolves to one week ahead.
fn parse_bare_weekday(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let target = BARE_WEEKDAY
        .captures_iter(text)
        .filter_map(|caps| weekday_index(caps.get(1)?.as_str()))
        .min()?;

    let mut days = target - today_index(today);
    if days <= 0 {
        days += 7;
    }
    shift_days(today, days)
}

/// Find the due date mentioned in `text`
///
/// `today` is the reference day for relative expressions and year-less
/// dates. Returns `None` when no rule produced a valid date.
#[must_use]
pub fn parse_date_from_text(text: &str, today: NaiveDate) -> Option<DateMatch> {
    let text = text.to_lowercase();

    if let Some((date, _)) = RELATIVE_RULES
        .iter()
        .find_map(|rule| rule.apply(&text, today))
    {
        debug!(date = %date, "Parsed relative date");
        return Some(DateMatch {
            date,
            source: DateSource::Relative,
            span: None,
        });
    }

    if let Some(date) = parse_bare_weekday(&text, today) {
        debug!(date = %date, "Parsed weekday");
        return Some(DateMatch {
            date,
            source: DateSource::Weekday,
            span: None,
        });
    }

    if let Some((date, span)) = ABSOLUTE_RULES
        .iter()
        .find_map(|rule| rule.apply(&text, today))
    {
        debug!(date = %date, span = ?span, "Parsed absolute date");
        return Some(DateMatch {
            date,
            source: DateSource::Absolute,
            span: Some(span),
        });
    }

    None
}

/// Lowercase `text` and replace the bytes in `span` with spaces
///
/// Keeps byte offsets intact so time patterns cannot pick up digits that
/// belong to the date, e.g. the `2024` in `15/06/2024`. `span` must come
/// from a [`DateMatch`] for the same text.
#[must_use]
pub fn blank_span(text: &str, span: Range<usize>) -> String {
    let text = text.to_lowercase();
    let mut bytes = text.into_bytes();
    if let Some(date_bytes) = bytes.get_mut(span) {
        date_bytes.fill(b' ');
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-01 is a Saturday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parsed(text: &str) -> Option<NaiveDate> {
        parse_date_from_text(text, today()).map(|m| m.date)
    }

    #[test]
    fn parse_today_and_tomorrow() {
        assert_eq!(parsed("due today"), Some(today()));
        assert_eq!(parsed("Quiz TOMORROW"), Some(date(2024, 6, 2)));
        assert_eq!(parsed("it was yesterday"), Some(date(2024, 5, 31)));
    }

    #[test]
    fn day_after_tomorrow_wins_over_tomorrow() {
        assert_eq!(parsed("exam day after tomorrow"), Some(date(2024, 6, 3)));
    }

    #[test]
    fn parse_in_n_days_and_weeks() {
        assert_eq!(parsed("submit in 3 days"), Some(date(2024, 6, 4)));
        assert_eq!(parsed("in 1 day"), Some(date(2024, 6, 2)));
        assert_eq!(parsed("in 2 weeks"), Some(date(2024, 6, 15)));
        assert_eq!(parsed("in a week"), Some(date(2024, 6, 8)));
        assert_eq!(parsed("in a month"), Some(date(2024, 7, 1)));
        assert_eq!(parsed("next month"), Some(date(2024, 7, 1)));
    }

    #[test]
    fn huge_offset_is_discarded() {
        let found = parse_date_from_text("in 99999999999999 days", today());
        assert!(found.is_none());
    }

    #[test]
    fn this_weekday_can_be_today() {
        assert_eq!(parsed("this saturday"), Some(today()));
        assert_eq!(parsed("this monday"), Some(date(2024, 6, 3)));
    }

    #[test]
    fn next_weekday_is_never_today() {
        assert_eq!(parsed("next saturday"), Some(date(2024, 6, 8)));
        assert_eq!(parsed("next monday"), Some(date(2024, 6, 3)));
    }

    #[test]
    fn bare_weekday_is_strictly_future() {
        let found = parse_date_from_text("lab on Saturday", today()).unwrap();
        assert_eq!(found.date, date(2024, 6, 8));
        assert_eq!(found.source, DateSource::Weekday);
        assert_eq!(parsed("friday"), Some(date(2024, 6, 7)));
    }

    #[test]
    fn bare_weekday_scans_monday_first() {
        // Friday appears first in the text, Monday comes first in the scan
        assert_eq!(parsed("friday or monday"), Some(date(2024, 6, 3)));
    }

    #[test]
    fn bare_weekday_needs_whole_word() {
        assert_eq!(parsed("mondays are rough"), None);
    }

    #[test]
    fn parse_day_first_numeric() {
        let found = parse_date_from_text("due 15/06/2024", today()).unwrap();
        assert_eq!(found.date, date(2024, 6, 15));
        assert_eq!(found.source, DateSource::Absolute);
        assert_eq!(parsed("05-07-2025"), Some(date(2025, 7, 5)));
        assert_eq!(parsed("05.07.2025"), Some(date(2025, 7, 5)));
    }

    #[test]
    fn parse_day_month_without_year() {
        assert_eq!(parsed("submit by 20/07"), Some(date(2024, 7, 20)));
    }

    #[test]
    fn impossible_date_falls_through() {
        // 31/02 is not a date; the ISO date further on is
        assert_eq!(parsed("31/02/2024 or 2024-03-01"), Some(date(2024, 3, 1)));
    }

    #[test]
    fn parse_iso() {
        assert_eq!(parsed("2024-12-24"), Some(date(2024, 12, 24)));
    }

    #[test]
    fn parse_month_names() {
        assert_eq!(parsed("June 15, 2025"), Some(date(2025, 6, 15)));
        assert_eq!(parsed("june 15"), Some(date(2024, 6, 15)));
        assert_eq!(parsed("15 Aug"), Some(date(2024, 8, 15)));
        assert_eq!(parsed("3 sept 2025"), Some(date(2025, 9, 3)));
        assert_eq!(parsed("21st March"), Some(date(2024, 3, 21)));
        assert_eq!(parsed("March 21st 2026"), Some(date(2026, 3, 21)));
    }

    #[test]
    fn relative_beats_absolute() {
        assert_eq!(parsed("tomorrow, not 15/06/2024"), Some(date(2024, 6, 2)));
    }

    #[test]
    fn no_date() {
        assert_eq!(parsed("bring your calculator"), None);
        assert_eq!(parsed(""), None);
    }

    fn blanked(text: &str) -> String {
        let found = parse_date_from_text(text, today()).unwrap();
        blank_span(text, found.span.unwrap())
    }

    #[test]
    fn absolute_match_carries_span() {
        let found = parse_date_from_text("Due 15/06/2024 at 10AM", today()).unwrap();
        assert_eq!(found.span, Some(4..14));
        assert_eq!(
            blanked("On 15/06/2024 at 10AM"),
            format!("on {} at 10am", " ".repeat(10))
        );
        assert_eq!(blanked("June 15 at 9"), format!("{} at 9", " ".repeat(7)));
    }

    #[test]
    fn relative_and_weekday_matches_have_no_span() {
        let relative = parse_date_from_text("tomorrow 10-11 pm", today()).unwrap();
        assert_eq!(relative.span, None);
        let weekday = parse_date_from_text("friday", today()).unwrap();
        assert_eq!(weekday.span, None);
    }

    #[test]
    fn span_is_the_winning_candidate() {
        // The invalid 31/02/2024 is skipped; only the ISO date is blanked
        let text = "31/02/2024 or 2024-03-01";
        assert_eq!(blanked(text), format!("31/02/2024 or {}", " ".repeat(10)));
    }

    #[test]
    fn blanking_ignores_out_of_range_span() {
        assert_eq!(blank_span("Room 1204", 20..30), "room 1204");
    }

    #[test]
    fn standalone_filter() {
        let text = "15/06/2024";
        assert!(!standalone_day_month(text, 0..5));
        assert!(standalone_day_month("15/06 ok", 0..5));
        assert!(!standalone_day_month("2024-06-15", 5..10));
    }
}
