use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ReminderError;
use crate::holiday::DEFAULT_HOLIDAY_URL;

pub const DEFAULT_DOMAIN: &str = "backlog.com";
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
pub const DEFAULT_MENTION: &str = "<!here>";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// On-disk configuration. Every field is optional here; `Settings::resolve`
/// decides what is required.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub backlog: Option<BacklogConfig>,
    pub slack: Option<SlackConfig>,
    pub schedule: Option<ScheduleConfig>,
    pub http_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BacklogConfig {
    pub space: Option<String>,
    pub domain: Option<String>,
    pub api_key: Option<String>,
    pub assignee_id: Option<u64>,
    pub lookback_days: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SlackConfig {
    pub webhook_url: Option<String>,
    pub mention: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ScheduleConfig {
    pub timezone: Option<String>,
    pub skip_holidays: Option<bool>,
    pub holiday_calendar_url: Option<String>,
}

/// Values supplied on the command line or through the environment. They win
/// over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub space: Option<String>,
    pub domain: Option<String>,
    pub api_key: Option<String>,
    pub assignee_id: Option<u64>,
    pub webhook_url: Option<String>,
    pub mention: Option<String>,
    pub timezone: Option<String>,
    pub skip_holidays: Option<bool>,
    pub lookback_days: Option<u32>,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub space: String,
    pub domain: String,
    pub api_key: String,
    pub assignee_id: u64,
    pub webhook_url: String,
    pub mention: String,
    pub timezone: Tz,
    pub skip_holidays: bool,
    pub holiday_calendar_url: String,
    pub lookback_days: Option<u32>,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn resolve(file: AppConfig, overrides: Overrides) -> Result<Settings, ReminderError> {
        let backlog = file.backlog.unwrap_or_default();
        let slack = file.slack.unwrap_or_default();
        let schedule = file.schedule.unwrap_or_default();

        let space = non_empty(overrides.space.or(backlog.space));
        let api_key = non_empty(overrides.api_key.or(backlog.api_key));
        let assignee_id = overrides.assignee_id.or(backlog.assignee_id);
        let webhook_url = non_empty(overrides.webhook_url.or(slack.webhook_url));

        let missing: Vec<&str> = [
            ("space", space.is_none()),
            ("api_key", api_key.is_none()),
            ("assignee_id", assignee_id.is_none()),
            ("webhook_url", webhook_url.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(space), Some(api_key), Some(assignee_id), Some(webhook_url)) =
            (space, api_key, assignee_id, webhook_url)
        else {
            return Err(ReminderError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        };

        let tz_name = non_empty(overrides.timezone.or(schedule.timezone))
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| ReminderError::Config(format!("unknown timezone '{tz_name}'")))?;

        Ok(Settings {
            space,
            domain: non_empty(overrides.domain.or(backlog.domain))
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            api_key,
            assignee_id,
            webhook_url,
            mention: non_empty(overrides.mention.or(slack.mention))
                .unwrap_or_else(|| DEFAULT_MENTION.to_string()),
            timezone,
            skip_holidays: overrides.skip_holidays.or(schedule.skip_holidays).unwrap_or(true),
            holiday_calendar_url: non_empty(schedule.holiday_calendar_url)
                .unwrap_or_else(|| DEFAULT_HOLIDAY_URL.to_string()),
            lookback_days: overrides.lookback_days.or(backlog.lookback_days),
            http_timeout: Duration::from_secs(
                file.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".due-reminder")
        .join("config.toml")
}

/// Load the config file. A missing default file is fine; a missing explicit one is not.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_config_path();
            if !p.exists() {
                return Ok(AppConfig::default());
            }
            p
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_overrides() -> Overrides {
        Overrides {
            space: Some("acme".into()),
            api_key: Some("key".into()),
            assignee_id: Some(42),
            webhook_url: Some("https://hooks.slack.com/services/X".into()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let settings = Settings::resolve(AppConfig::default(), full_overrides()).unwrap();
        assert_eq!(settings.domain, "backlog.com");
        assert_eq!(settings.timezone, chrono_tz::Asia::Tokyo);
        assert!(settings.skip_holidays);
        assert_eq!(settings.mention, DEFAULT_MENTION);
        assert_eq!(settings.holiday_calendar_url, DEFAULT_HOLIDAY_URL);
        assert_eq!(settings.lookback_days, None);
        assert_eq!(settings.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_required_settings_are_listed_together() {
        let overrides = Overrides {
            space: Some("acme".into()),
            api_key: Some("   ".into()),
            ..Default::default()
        };
        let err = Settings::resolve(AppConfig::default(), overrides).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("api_key"));
        assert!(msg.contains("assignee_id"));
        assert!(msg.contains("webhook_url"));
        assert!(!msg.contains("space"));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let overrides = Overrides {
            timezone: Some("Mars/Olympus".into()),
            ..full_overrides()
        };
        let err = Settings::resolve(AppConfig::default(), overrides).unwrap_err();
        assert!(matches!(err, ReminderError::Config(ref m) if m.contains("Mars/Olympus")));
    }

    #[test]
    fn file_values_are_used_and_overrides_win() {
        let file: AppConfig = toml::from_str(
            r#"
            http_timeout_secs = 5

            [backlog]
            space = "from-file"
            domain = "backlog.jp"
            api_key = "file-key"
            assignee_id = 7
            lookback_days = 30

            [slack]
            webhook_url = "https://hooks.slack.com/services/FILE"
            mention = "<@U999>"

            [schedule]
            timezone = "UTC"
            skip_holidays = false
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            space: Some("from-env".into()),
            ..Default::default()
        };

        let settings = Settings::resolve(file, overrides).unwrap();

        assert_eq!(settings.space, "from-env");
        assert_eq!(settings.domain, "backlog.jp");
        assert_eq!(settings.api_key, "file-key");
        assert_eq!(settings.assignee_id, 7);
        assert_eq!(settings.mention, "<@U999>");
        assert_eq!(settings.timezone, chrono_tz::UTC);
        assert!(!settings.skip_holidays);
        assert_eq!(settings.lookback_days, Some(30));
        assert_eq!(settings.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn load_config_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backlog]\nspace = \"acme\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.backlog.unwrap().space.as_deref(), Some("acme"));
    }

    #[test]
    fn load_config_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backlog\nspace = ").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
