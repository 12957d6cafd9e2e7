//! Domain entities - Reminders and academic records

mod academic;
mod parsed_reminder;
mod stored_reminder;

pub use academic::{
    AttendanceReport, AttendanceStatus, CgpaReport, SemesterGrade, SemesterResult,
};
pub use parsed_reminder::ParsedReminder;
pub use stored_reminder::StoredReminder;
