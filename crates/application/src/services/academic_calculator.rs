//! Academic calculators - CGPA and attendance projections

use domain::{
    AttendanceReport, AttendanceStatus, CgpaReport, DomainError, SemesterGrade, SemesterResult,
};
use tracing::debug;

/// Default minimum attendance percentage
pub const DEFAULT_MIN_ATTENDANCE: f64 = 75.0;

/// Upper bound on projected classes in attendance calculations
const MAX_PROJECTED_CLASSES: u32 = 10_000;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a percentage the way users type it: `75.0`, `72.5`
fn format_percent(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Compute the cumulative GPA over all countable semesters
///
/// Semesters with a non-positive SGPA or credit count are skipped but keep
/// their position in the "Semester N" numbering.
///
/// # Errors
///
/// Returns `DomainError::ValidationError` if no semester is countable.
pub fn calculate_cgpa(semesters: &[SemesterGrade]) -> Result<CgpaReport, DomainError> {
    let results: Vec<SemesterResult> = semesters
        .iter()
        .enumerate()
        .filter(|(_, grade)| grade.is_countable())
        .map(|(idx, grade)| SemesterResult {
            semester: format!("Semester {}", idx + 1),
            sgpa: grade.sgpa,
            credits: grade.credits,
            grade_points: grade.sgpa * grade.credits,
        })
        .collect();

    let total_credits: f64 = results.iter().map(|r| r.credits).sum();
    if results.is_empty() || total_credits <= 0.0 {
        return Err(DomainError::ValidationError(
            "No valid semester data found".to_string(),
        ));
    }

    let total_grade_points: f64 = results.iter().map(|r| r.grade_points).sum();
    let cgpa = total_grade_points / total_credits;
    let gpa_4_scale = ((cgpa - 5.0) * 4.0 / 5.0).max(0.0);
    let gpa_5_scale = cgpa / 2.0;

    debug!(cgpa, total_credits, semesters = results.len(), "Calculated CGPA");

    Ok(CgpaReport {
        cgpa: round2(cgpa),
        gpa_4_scale: round2(gpa_4_scale),
        gpa_5_scale: round2(gpa_5_scale),
        total_credits,
        total_grade_points: round2(total_grade_points),
        semesters: results,
    })
}

fn percent(attended: u32, total: u32) -> f64 {
    f64::from(attended) / f64::from(total) * 100.0
}

/// Consecutive classes to attend before reaching `min_required`
fn classes_needed(attended: u32, total: u32, min_required: f64) -> Option<u32> {
    (0..=MAX_PROJECTED_CLASSES).find(|&extra| {
        percent(attended.saturating_add(extra), total.saturating_add(extra)) >= min_required
    })
}

/// Classes that can be missed while staying at or above `min_required`
fn classes_skippable(attended: u32, total: u32, min_required: f64) -> u32 {
    (1..=MAX_PROJECTED_CLASSES)
        .take_while(|&skipped| percent(attended, total.saturating_add(skipped)) >= min_required)
        .count()
        .try_into()
        .unwrap_or(MAX_PROJECTED_CLASSES)
}

/// Project attendance against a minimum percentage
///
/// # Errors
///
/// Returns `DomainError::ValidationError` if `total` is zero, `attended`
/// exceeds `total`, `min_required` is outside `(0, 100]`, or the minimum
/// cannot be reached by attending more classes.
pub fn calculate_attendance(
    subject_name: &str,
    attended: u32,
    total: u32,
    min_required: f64,
) -> Result<AttendanceReport, DomainError> {
    if total == 0 {
        return Err(DomainError::ValidationError(
            "Total classes must be greater than 0".to_string(),
        ));
    }
    if attended > total {
        return Err(DomainError::ValidationError(
            "Attended classes cannot exceed total classes".to_string(),
        ));
    }
    if !(min_required > 0.0 && min_required <= 100.0) {
        return Err(DomainError::ValidationError(format!(
            "Minimum attendance must be within (0, 100], got {min_required}"
        )));
    }

    let current = percent(attended, total);
    let required = format_percent(min_required);

    let (status, future_classes, can_skip) = if current < min_required {
        let needed = classes_needed(attended, total, min_required).ok_or_else(|| {
            DomainError::ValidationError(format!("{required}% attendance cannot be reached"))
        })?;
        (AttendanceStatus::AtRisk, needed, 0)
    } else {
        (
            AttendanceStatus::Safe,
            0,
            classes_skippable(attended, total, min_required),
        )
    };

    let (message, recommendation) = match status {
        AttendanceStatus::Safe => (
            format!("Your attendance is above the required {required}%"),
            if can_skip > 0 {
                format!(
                    "You can skip up to {can_skip} classes and still maintain {required}% attendance."
                )
            } else {
                "Keep maintaining your good attendance!".to_string()
            },
        ),
        AttendanceStatus::AtRisk => (
            format!("Your attendance is below the required {required}%"),
            format!(
                "You need to attend the next {future_classes} classes consecutively to reach {required}% attendance."
            ),
        ),
    };

    debug!(
        subject = subject_name,
        current,
        status = %status,
        future_classes,
        can_skip,
        "Calculated attendance"
    );

    Ok(AttendanceReport {
        subject_name: subject_name.to_string(),
        attended,
        total,
        min_required,
        current_percent: round2(current),
        status,
        future_classes,
        can_skip,
        message,
        recommendation,
    })
}
