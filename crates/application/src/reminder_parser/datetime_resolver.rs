//! Merges the date and time parsers into one due date-time

use chrono::NaiveDateTime;
use tracing::debug;

use super::date_parser::{DateSource, blank_span, parse_date_from_text};
use super::time_parser::{default_time_for, parse_time_from_text};

/// A resolved due date-time and how each half was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDateTime {
    pub due_at: NaiveDateTime,
    pub date_source: DateSource,
    /// Whether the time of day was written in the text
    pub explicit_time: bool,
}

impl ResolvedDateTime {
    /// Whether any date rule matched
    #[must_use]
    pub const fn date_matched(&self) -> bool {
        !matches!(self.date_source, DateSource::Defaulted)
    }
}

/// Resolve the due date-time of `text` relative to `now`
///
/// Missing dates fall back to `now`'s day, missing times to the default
/// for the kind of work mentioned.
#[must_use]
pub fn resolve(text: &str, now: NaiveDateTime) -> ResolvedDateTime {
    let today = now.date();
    let (date, date_source, span) = parse_date_from_text(text, today)
        .map_or((today, DateSource::Defaulted, None), |m| (m.date, m.source, m.span));

    // Only the written date that won is hidden from the time rules
    let explicit = match span {
        Some(span) => parse_time_from_text(&blank_span(text, span)),
        None => parse_time_from_text(text),
    };
    let time = explicit.unwrap_or_else(|| default_time_for(text));

    let due_at = date.and_time(time);
    debug!(
        due_at = %due_at,
        date_source = ?date_source,
        explicit_time = explicit.is_some(),
        "Resolved due date-time"
    );

    ResolvedDateTime {
        due_at,
        date_source,
        explicit_time: explicit.is_some(),
    }
}

/// Due date-time of `text` relative to `now`
#[must_use]
pub fn resolve_datetime(text: &str, now: NaiveDateTime) -> NaiveDateTime {
    resolve(text, now).due_at
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn relative_date_with_explicit_time() {
        let resolved = resolve("Submit by tomorrow 11pm", now());
        assert_eq!(resolved.due_at, at(2024, 6, 2, 23, 0));
        assert_eq!(resolved.date_source, DateSource::Relative);
        assert!(resolved.explicit_time);
    }

    #[test]
    fn exam_defaults_to_morning() {
        assert_eq!(
            resolve_datetime("DBMS exam tomorrow", now()),
            at(2024, 6, 2, 9, 0)
        );
    }

    #[test]
    fn lab_defaults_to_afternoon() {
        assert_eq!(
            resolve_datetime("physics lab on monday", now()),
            at(2024, 6, 3, 14, 0)
        );
    }

    #[test]
    fn nothing_found_uses_today_end_of_day() {
        let resolved = resolve("hello", now());
        assert_eq!(resolved.due_at, at(2024, 6, 1, 23, 59));
        assert!(!resolved.date_matched());
        assert!(!resolved.explicit_time);
    }

    #[test]
    fn year_is_not_read_as_time() {
        let resolved = resolve("exam on 15/06/2024", now());
        assert_eq!(resolved.due_at, at(2024, 6, 15, 9, 0));
        assert!(!resolved.explicit_time);
    }

    #[test]
    fn absolute_date_with_time() {
        assert_eq!(
            resolve_datetime("viva on 2024-07-10 at 10:30", now()),
            at(2024, 7, 10, 10, 30)
        );
    }

    #[test]
    fn time_range_after_relative_date() {
        assert_eq!(
            resolve_datetime("quiz tomorrow 10-11 pm", now()),
            at(2024, 6, 2, 23, 0)
        );
        let resolved = resolve("viva tomorrow, slot 3-4 pm", now());
        assert_eq!(resolved.due_at, at(2024, 6, 2, 16, 0));
        assert!(resolved.explicit_time);
    }

    #[test]
    fn date_after_relative_date_keeps_time() {
        assert_eq!(
            resolve_datetime("exam tomorrow, not 15/06 at 10am", now()),
            at(2024, 6, 2, 10, 0)
        );
    }

    #[test]
    fn explicit_time_overrides_default() {
        assert_eq!(
            resolve_datetime("exam at 2pm tomorrow", now()),
            at(2024, 6, 2, 14, 0)
        );
    }

    #[test]
    fn submit_tomorrow_across_month_days() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(
            resolve_datetime("submit tomorrow", now),
            at(2024, 1, 11, 23, 59)
        );
    }

    #[test]
    fn this_weekday_from_monday() {
        // 2024-06-03 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(
            resolve_datetime("assignment due this friday", monday),
            at(2024, 6, 7, 23, 59)
        );
    }

    #[test]
    fn time_only_keeps_today() {
        let resolved = resolve("quiz at 4pm", now());
        assert_eq!(resolved.due_at, at(2024, 6, 1, 16, 0));
        assert_eq!(resolved.date_source, DateSource::Defaulted);
        assert!(resolved.explicit_time);
    }

    #[test]
    fn seconds_are_zero() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 15, 42)
            .unwrap();
        let due = resolve_datetime("assignment today", now);
        assert_eq!(due, at(2024, 6, 1, 23, 59));
    }
}
