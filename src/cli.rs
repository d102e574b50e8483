use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::Overrides;
use crate::util::date::parse_date;

#[derive(Debug, Parser)]
#[command(
    name = "due-reminder",
    about = "Post a Slack summary of Backlog issues that are overdue or due soon",
    version
)]
pub struct Cli {
    /// Config file (default: ~/.due-reminder/config.toml)
    #[arg(long, env = "DUE_REMINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the message to stdout instead of posting it
    #[arg(long)]
    pub dry_run: bool,

    /// Run as if today were this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Run even on weekends and public holidays
    #[arg(long)]
    pub force: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Backlog space id (the `acme` in acme.backlog.com)
    #[arg(long, env = "BACKLOG_SPACE")]
    pub space: Option<String>,

    /// Backlog domain suffix
    #[arg(long, env = "BACKLOG_DOMAIN")]
    pub domain: Option<String>,

    #[arg(long, env = "BACKLOG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Numeric Backlog user id whose issues are reported
    #[arg(long, env = "BACKLOG_ASSIGNEE_ID")]
    pub assignee_id: Option<u64>,

    /// Only include issues due at most this many days ago
    #[arg(long, env = "BACKLOG_LOOKBACK_DAYS")]
    pub lookback_days: Option<u32>,

    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Mention placed on the first line, e.g. `<@U012AB3CD>`
    #[arg(long, env = "SLACK_MENTION")]
    pub mention: Option<String>,

    /// IANA timezone that defines "today"
    #[arg(long, env = "REMINDER_TIMEZONE")]
    pub timezone: Option<String>,

    /// Skip weekends and public holidays (true/false)
    #[arg(long, env = "SKIP_HOLIDAYS")]
    pub skip_holidays: Option<bool>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            space: self.space.clone(),
            domain: self.domain.clone(),
            api_key: self.api_key.clone(),
            assignee_id: self.assignee_id,
            webhook_url: self.webhook_url.clone(),
            mention: self.mention.clone(),
            timezone: self.timezone.clone(),
            skip_holidays: self.skip_holidays,
            lookback_days: self.lookback_days,
        }
    }
}
