mod classify;
mod cli;
mod config;
mod dispatch;
mod error;
mod holiday;
mod model;
mod pipeline;
mod providers;
mod report;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Settings;
use dispatch::{Notifier, SlackWebhook, StdoutNotifier};
use holiday::HolidayCalendar;
use pipeline::RunPlan;
use providers::backlog::BacklogProvider;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Validate everything before touching the network
    let file = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(file, cli.overrides()).context("Invalid configuration")?;

    let anchor = cli.date.unwrap_or_else(|| util::date::today(settings.timezone));
    tracing::info!(%anchor, timezone = %settings.timezone, "starting due-date reminder");

    if settings.skip_holidays && !cli.force {
        let calendar =
            HolidayCalendar::new(settings.holiday_calendar_url.clone(), settings.http_timeout)?;
        if let Some(reason) = calendar
            .skip_reason(anchor)
            .await
            .context("Holiday check failed")?
        {
            tracing::info!(%anchor, %reason, "skipping run");
            return Ok(());
        }
    }

    let tracker = BacklogProvider::new(
        &settings.space,
        &settings.domain,
        settings.api_key.clone(),
        settings.http_timeout,
    )?;
    let notifier: Box<dyn Notifier> = if cli.dry_run {
        Box::new(StdoutNotifier)
    } else {
        Box::new(SlackWebhook::new(
            settings.webhook_url.clone(),
            settings.http_timeout,
        )?)
    };

    let plan = RunPlan {
        assignee_id: settings.assignee_id,
        anchor,
        lookback_days: settings.lookback_days,
        mention: settings.mention.clone(),
    };

    let report = pipeline::run(&tracker, notifier.as_ref(), &plan)
        .await
        .context("Reminder run failed")?;

    if !cli.dry_run {
        println!(
            "Sent reminder for {anchor}: {} issue(s) via {}",
            report.buckets.total(),
            notifier.name()
        );
    }

    Ok(())
}
