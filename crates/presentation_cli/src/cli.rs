//! Command-line definitions

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use domain::SemesterGrade;

/// StudyPal CLI
#[derive(Debug, Parser)]
#[command(name = "studypal-cli")]
#[command(author, version, about = "StudyPal reminder parser and study tools", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "STUDYPAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a pasted message into a reminder
    ///
    /// Example: studypal-cli parse "DBMS exam tomorrow at 10am"
    Parse {
        /// Message text
        text: String,

        /// Reference time (default: local now)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Calculate CGPA from semester results
    ///
    /// Example: studypal-cli cgpa --semester 8.2:20 --semester 8.9:22
    Cgpa {
        /// Semester as SGPA:CREDITS, repeatable
        #[arg(short, long = "semester", value_parser = parse_semester, required = true)]
        semesters: Vec<SemesterGrade>,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Project attendance against a minimum percentage
    Attendance {
        /// Classes attended
        #[arg(long)]
        attended: u32,

        /// Classes held
        #[arg(long)]
        total: u32,

        /// Minimum percentage (default from config, 75)
        #[arg(long)]
        min_required: Option<f64>,

        /// Subject name shown in the report
        #[arg(long, default_value = "Subject")]
        subject: String,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Parse a message and store it as a reminder
    Add {
        /// Message text
        text: String,

        #[command(flatten)]
        store: StoreArgs,

        /// Reference time (default: local now)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// List stored reminders with countdowns
    List {
        #[command(flatten)]
        store: StoreArgs,

        /// Reference time (default: local now)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Mark a reminder as done
    Done {
        /// Reminder ID or its first characters
        id: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Delete a reminder
    Remove {
        /// Reminder ID or its first characters
        id: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Delete duplicate reminders
    Dedup {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Send due notifications once
    Check {
        /// Reminder file (default from config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Reference time (default: local now)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Send due notifications on an interval until interrupted
    Watch {
        /// Reminder file (default from config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Seconds between polls (default from config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Print the effective configuration
    Config,
}

/// Where reminders live and whose they are
#[derive(Debug, Clone, clap::Args)]
pub struct StoreArgs {
    /// Reminder file (default from config)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Reminder owner
    #[arg(short, long, default_value = "me", env = "STUDYPAL_OWNER")]
    pub owner: String,
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Parse `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DD`
pub fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("invalid date-time '{value}', expected YYYY-MM-DDTHH:MM"))
}

/// Parse `SGPA:CREDITS`
pub fn parse_semester(value: &str) -> Result<SemesterGrade, String> {
    let (sgpa, credits) = value
        .split_once(':')
        .ok_or_else(|| format!("invalid semester '{value}', expected SGPA:CREDITS"))?;
    let sgpa: f64 = sgpa
        .trim()
        .parse()
        .map_err(|_| format!("invalid SGPA '{sgpa}'"))?;
    let credits: f64 = credits
        .trim()
        .parse()
        .map_err(|_| format!("invalid credits '{credits}'"))?;
    Ok(SemesterGrade::new(sgpa, credits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero_uses_config() {
        assert_eq!(log_filter_from_verbosity(0), None);
    }

    #[test]
    fn log_filter_verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(10), Some("trace"));
    }

    #[test]
    fn parse_now_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(parse_now("2024-06-01T08:30:00"), Ok(expected));
        assert_eq!(parse_now("2024-06-01T08:30"), Ok(expected));
        assert_eq!(parse_now("2024-06-01 08:30"), Ok(expected));
        assert_eq!(
            parse_now("2024-06-01").unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_now("tomorrow").is_err());
    }

    #[test]
    fn parse_semester_pairs() {
        let grade = parse_semester("8.5:20").unwrap();
        assert!((grade.sgpa - 8.5).abs() < f64::EPSILON);
        assert!((grade.credits - 20.0).abs() < f64::EPSILON);
        assert!(parse_semester("8.5").is_err());
        assert!(parse_semester("x:20").is_err());
    }
}
