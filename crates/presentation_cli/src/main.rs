//! StudyPal CLI
//!
//! Command-line interface for parsing reminders, tracking them, and running
//! the academic calculators.

#![allow(clippy::print_stdout)]

use std::time::Duration;

use clap::Parser;
use infrastructure::{AppConfig, LoggingConfig, init_logging};
use presentation_cli::cli::{Cli, Commands, log_filter_from_verbosity};
use presentation_cli::commands;

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Verbosity flags override the configured filter
    let logging = LoggingConfig {
        filter: log_filter_from_verbosity(cli.verbose)
            .map_or_else(|| config.logging.filter.clone(), str::to_string),
        json: config.logging.json,
    };
    init_logging(&logging)?;

    let local_now = || chrono::Local::now().naive_local();

    let output = match cli.command {
        Commands::Parse { text, now, json } => {
            commands::parse(&text, now.unwrap_or_else(local_now), json)?
        },

        Commands::Cgpa { semesters, json } => commands::cgpa(&semesters, json)?,

        Commands::Attendance {
            attended,
            total,
            min_required,
            subject,
            json,
        } => commands::attendance(
            &subject,
            attended,
            total,
            min_required.unwrap_or(config.academics.min_attendance_percent),
            json,
        )?,

        Commands::Add { text, store, now } => {
            let path = commands::reminders_file(store.file.as_deref(), &config);
            commands::add(path, &store.owner, &text, now.unwrap_or_else(local_now)).await?
        },

        Commands::List { store, now } => {
            let path = commands::reminders_file(store.file.as_deref(), &config);
            commands::list(path, &store.owner, now.unwrap_or_else(local_now)).await?
        },

        Commands::Done { id, store } => {
            let path = commands::reminders_file(store.file.as_deref(), &config);
            commands::done(path, &store.owner, &id, local_now()).await?
        },

        Commands::Remove { id, store } => {
            let path = commands::reminders_file(store.file.as_deref(), &config);
            commands::remove(path, &store.owner, &id, local_now()).await?
        },

        Commands::Dedup { store } => {
            let path = commands::reminders_file(store.file.as_deref(), &config);
            commands::dedup(path, &store.owner).await?
        },

        Commands::Check { file, now } => {
            let path = commands::reminders_file(file.as_deref(), &config);
            commands::check(path, &config, now.unwrap_or_else(local_now)).await?
        },

        Commands::Watch { file, interval } => {
            let path = commands::reminders_file(file.as_deref(), &config);
            let secs = interval.unwrap_or(config.notifications.poll_interval_secs);
            commands::watch(path, &config, Duration::from_secs(secs)).await?;
            return Ok(());
        },

        Commands::Config => config.to_toml()?,
    };

    println!("{output}");
    Ok(())
}
