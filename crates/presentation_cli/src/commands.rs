//! Command handlers
//!
//! Every handler returns the text to print so the output can be tested
//! without a terminal.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use application::{
    Countdown, NotificationService, ReminderOverview, ReminderService, calculate_attendance,
    calculate_cgpa, reminder_formatter,
};
use chrono::NaiveDateTime;
use domain::{ParsedReminder, ReminderId, SemesterGrade};
use infrastructure::{AppConfig, InMemoryReminderStore, LogNotifier};
use tracing::{info, warn};

/// Render a parsed reminder
pub fn parse(text: &str, now: NaiveDateTime, json: bool) -> anyhow::Result<String> {
    let parsed = application::parse(text, now);
    if json {
        return Ok(serde_json::to_string_pretty(&parsed)?);
    }
    Ok(render_parsed(&parsed, now))
}

fn render_parsed(parsed: &ParsedReminder, now: NaiveDateTime) -> String {
    let countdown = Countdown::evaluate(Some(parsed.due_at), now);
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", parsed.category.emoji(), parsed.title));
    out.push_str(&format!(
        "  Type:    {} ({} confidence)\n",
        parsed.category.label(),
        parsed.type_confidence
    ));
    if let Some(subject) = &parsed.subject {
        out.push_str(&format!("  Subject: {subject}\n"));
    }
    out.push_str(&format!(
        "  Due:     {} ({} confidence)\n",
        parsed.due_at.format("%a, %b %-d, %Y %H:%M"),
        parsed.date_confidence
    ));
    out.push_str(&format!("  Status:  {}", countdown.text));
    out
}

/// Render a CGPA report
pub fn cgpa(semesters: &[SemesterGrade], json: bool) -> anyhow::Result<String> {
    let report = calculate_cgpa(semesters)?;
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut out = format!(
        "🎓 CGPA: {:.2}  (4.0 scale: {:.2}, 5.0 scale: {:.2})\n",
        report.cgpa, report.gpa_4_scale, report.gpa_5_scale
    );
    for semester in &report.semesters {
        out.push_str(&format!(
            "  {}: SGPA {:.2} x {} credits\n",
            semester.semester, semester.sgpa, semester.credits
        ));
    }
    out.push_str(&format!(
        "  Total: {} credits, {:.2} grade points",
        report.total_credits, report.total_grade_points
    ));
    Ok(out)
}

/// Render an attendance projection
pub fn attendance(
    subject: &str,
    attended: u32,
    total: u32,
    min_required: f64,
    json: bool,
) -> anyhow::Result<String> {
    let report = calculate_attendance(subject, attended, total, min_required)?;
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    Ok(format!(
        "{} {}: {:.2}% ({}/{})\n  {}\n  {}",
        report.status.emoji(),
        report.subject_name,
        report.current_percent,
        report.attended,
        report.total,
        report.message,
        report.recommendation
    ))
}

/// Reminder file from the flag or the configuration
pub fn reminders_file<'a>(flag: Option<&'a Path>, config: &'a AppConfig) -> &'a Path {
    flag.unwrap_or_else(|| Path::new(&config.storage.reminders_file))
}

/// Find a reminder by full ID or unique ID prefix
fn resolve_id(overview: &[ReminderOverview], query: &str) -> anyhow::Result<ReminderId> {
    if let Ok(id) = ReminderId::parse(query) {
        return Ok(id);
    }

    let query = query.to_lowercase();
    let mut matches = overview
        .iter()
        .map(|o| o.reminder.id)
        .filter(|id| id.to_string().starts_with(&query));

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => bail!("No reminder matches '{query}'"),
        (Some(_), Some(_)) => bail!("'{query}' matches more than one reminder"),
    }
}

fn render_overview(overview: &[ReminderOverview]) -> String {
    if overview.is_empty() {
        return "No reminders".to_string();
    }
    overview
        .iter()
        .map(|o| {
            format!(
                "{}  {}",
                o.reminder.id.short(),
                reminder_formatter::format_summary(&o.reminder, &o.countdown)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse and store a reminder
pub async fn add(
    path: &Path,
    owner: &str,
    text: &str,
    now: NaiveDateTime,
) -> anyhow::Result<String> {
    let store = Arc::new(InMemoryReminderStore::load_json(path).await?);
    let service = ReminderService::new(Arc::clone(&store));

    let reminder = service.add_from_text(owner, text, now).await?;
    store.save_json(path).await?;

    let countdown = Countdown::evaluate(reminder.due_at, now);
    Ok(format!(
        "Added {}  {}",
        reminder.id.short(),
        reminder_formatter::format_summary(&reminder, &countdown)
    ))
}

/// List reminders with countdowns
pub async fn list(path: &Path, owner: &str, now: NaiveDateTime) -> anyhow::Result<String> {
    let store = Arc::new(InMemoryReminderStore::load_json(path).await?);
    let overview = ReminderService::new(store).overview(owner, now).await?;
    Ok(render_overview(&overview))
}

/// Mark a reminder as done
pub async fn done(
    path: &Path,
    owner: &str,
    query: &str,
    now: NaiveDateTime,
) -> anyhow::Result<String> {
    let store = Arc::new(InMemoryReminderStore::load_json(path).await?);
    let service = ReminderService::new(Arc::clone(&store));

    let id = resolve_id(&service.overview(owner, now).await?, query)?;
    let reminder = service.complete(owner, &id).await?;
    store.save_json(path).await?;
    Ok(format!("✅ Completed: {}", reminder.title))
}

/// Delete a reminder
pub async fn remove(
    path: &Path,
    owner: &str,
    query: &str,
    now: NaiveDateTime,
) -> anyhow::Result<String> {
    let store = Arc::new(InMemoryReminderStore::load_json(path).await?);
    let service = ReminderService::new(Arc::clone(&store));

    let id = resolve_id(&service.overview(owner, now).await?, query)?;
    service.delete(owner, &id).await?;
    store.save_json(path).await?;
    Ok(format!("🗑️  Removed {}", id.short()))
}

/// Delete duplicate reminders
pub async fn dedup(path: &Path, owner: &str) -> anyhow::Result<String> {
    let store = Arc::new(InMemoryReminderStore::load_json(path).await?);
    let removed = ReminderService::new(Arc::clone(&store))
        .remove_duplicates(owner)
        .await?;
    if removed > 0 {
        store.save_json(path).await?;
    }
    Ok(format!("Removed {removed} duplicate reminder(s)"))
}

/// Poll every owner once, record sent windows, and describe what was sent
pub async fn check(
    path: &Path,
    config: &AppConfig,
    now: NaiveDateTime,
) -> anyhow::Result<String> {
    let store = Arc::new(InMemoryReminderStore::load_json(path).await?);
    let service = NotificationService::new(
        Arc::clone(&store),
        Arc::new(LogNotifier::new()),
        config.notifications.to_service_config(),
    );

    let sent = service.poll_all(now).await?;
    if sent.is_empty() {
        return Ok("No notifications due".to_string());
    }

    store.save_json(path).await?;
    Ok(sent
        .iter()
        .map(|n| format!("🔔 [{}] {}", n.owner, n.subject))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Run [`check`] every `interval` until Ctrl-C
pub async fn watch(path: &Path, config: &AppConfig, interval: Duration) -> anyhow::Result<()> {
    if interval.is_zero() {
        bail!("Poll interval must be positive");
    }

    info!(file = %path.display(), interval_secs = interval.as_secs(), "Watching reminders");
    run_until(interval, tokio::signal::ctrl_c(), move || async move {
        let now = chrono::Local::now().naive_local();
        match check(path, config, now).await {
            Ok(report) => info!(report = %report, "Poll finished"),
            Err(e) => warn!(error = %e, "Poll failed"),
        }
    })
    .await
}

/// Call `poll` on every tick until `shutdown` resolves
///
/// `shutdown` is polled across iterations, so a signal raised while `poll`
/// runs stops the loop after that poll.
async fn run_until<S, P, Fut>(interval: Duration, shutdown: S, mut poll: P) -> anyhow::Result<()>
where
    S: Future<Output = std::io::Result<()>>,
    P: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => poll().await,
            signal = &mut shutdown => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Stopping watch");
                return Ok(());
            },
        }
    }
}
