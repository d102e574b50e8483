use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{ReminderError, Result};

pub const DEFAULT_HOLIDAY_URL: &str = "https://holidays-jp.github.io/api/v1/date.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Weekend(Weekday),
    Holiday(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Weekend(day) => write!(f, "weekend ({day})"),
            SkipReason::Holiday(name) => write!(f, "public holiday ({name})"),
        }
    }
}

/// Public holiday calendar served as a `{"YYYY-MM-DD": "name"}` JSON map.
pub struct HolidayCalendar {
    url: String,
    client: reqwest::Client,
}

impl HolidayCalendar {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    pub async fn holiday_name(&self, date: NaiveDate) -> Result<Option<String>> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(ReminderError::from_response(&self.url, resp).await);
        }
        let mut holidays: HashMap<String, String> = resp.json().await?;
        Ok(holidays.remove(&date.format("%Y-%m-%d").to_string()))
    }

    /// Why a run on `date` should be skipped, if at all. Weekends never hit the network.
    pub async fn skip_reason(&self, date: NaiveDate) -> Result<Option<SkipReason>> {
        if let Some(day) = weekend(date) {
            return Ok(Some(SkipReason::Weekend(day)));
        }
        Ok(self.holiday_name(date).await?.map(SkipReason::Holiday))
    }
}

fn weekend(date: NaiveDate) -> Option<Weekday> {
    match date.weekday() {
        day @ (Weekday::Sat | Weekday::Sun) => Some(day),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = r#"{"2024-05-03": "憲法記念日", "2024-05-06": "振替休日"}"#;

    async fn calendar(server: &mut mockito::Server, status: usize, body: &str) -> HolidayCalendar {
        server
            .mock("GET", "/date.json")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;
        HolidayCalendar::new(format!("{}/date.json", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn weekday_holiday_is_skipped() {
        let mut server = mockito::Server::new_async().await;
        let cal = calendar(&mut server, 200, CALENDAR).await;
        let reason = cal
            .skip_reason(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap())
            .await
            .unwrap();
        assert_eq!(reason, Some(SkipReason::Holiday("振替休日".into())));
    }

    #[tokio::test]
    async fn ordinary_weekday_runs() {
        let mut server = mockito::Server::new_async().await;
        let cal = calendar(&mut server, 200, CALENDAR).await;
        let reason = cal
            .skip_reason(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(reason, None);
    }

    #[tokio::test]
    async fn weekend_skips_without_fetching() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/date.json")
            .expect(0)
            .create_async()
            .await;
        let cal = HolidayCalendar::new(format!("{}/date.json", server.url()), Duration::from_secs(5)).unwrap();

        let reason = cal
            .skip_reason(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap())
            .await
            .unwrap();

        assert_eq!(reason, Some(SkipReason::Weekend(Weekday::Sat)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn calendar_failure_is_retrieval_error() {
        let mut server = mockito::Server::new_async().await;
        let cal = calendar(&mut server, 503, "unavailable").await;
        let err = cal
            .skip_reason(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ReminderError::Retrieval { status: 503, .. }));
    }
}
