use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::{IssueQuery, Tracker};
use crate::error::{ReminderError, Result};
use crate::model::issue::{Assignee, Issue, ProjectId, Status, StatusRef};

pub struct BacklogProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl BacklogProvider {
    pub fn new(space: &str, domain: &str, api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(format!("https://{space}.{domain}"), api_key, timeout)
    }

    pub fn with_base_url(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn browse_url(&self, issue_key: &str) -> String {
        format!("{}/view/{}", self.base_url, issue_key)
    }

    fn issue_params(&self, query: &IssueQuery, offset: usize, count: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("assigneeId[]", query.assignee_id.to_string()),
            ("dueDateUntil", query.due_until.format("%Y-%m-%d").to_string()),
            ("sort", "dueDate".to_string()),
            ("order", "asc".to_string()),
            ("count", count.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(since) = query.due_since {
            params.push(("dueDateSince", since.format("%Y-%m-%d").to_string()));
        }
        params
    }

    fn into_issue(&self, raw: BacklogIssue) -> Issue {
        let due_date = raw.due_date.as_deref().and_then(|d| {
            let parsed = parse_due_date(d);
            if parsed.is_none() {
                tracing::warn!(issue = %raw.issue_key, due_date = d, "unparseable due date, ignoring");
            }
            parsed
        });

        Issue {
            id: raw.id,
            url: self.browse_url(&raw.issue_key),
            key: raw.issue_key,
            project_id: raw.project_id,
            summary: raw.summary,
            due_date,
            status: StatusRef {
                id: raw.status.id,
                name: raw.status.name,
            },
            assignee: raw.assignee.map(|a| Assignee {
                id: a.id,
                name: a.name,
            }),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BacklogIssue {
    id: u64,
    project_id: u64,
    issue_key: String,
    #[serde(default)]
    summary: String,
    due_date: Option<String>,
    status: BacklogStatus,
    assignee: Option<BacklogUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BacklogStatus {
    id: u64,
    project_id: Option<u64>,
    name: String,
    color: Option<String>,
    display_order: Option<i64>,
}

#[derive(Deserialize)]
struct BacklogUser {
    id: u64,
    #[serde(default)]
    name: String,
}

/// Backlog sends due dates as `2024-06-10T00:00:00Z`; only the calendar date matters.
fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[async_trait]
impl Tracker for BacklogProvider {
    fn name(&self) -> &str {
        "Backlog"
    }

    async fn fetch_issue_page(
        &self,
        query: &IssueQuery,
        offset: usize,
        count: usize,
    ) -> Result<Vec<Issue>> {
        let resp = self
            .client
            .get(format!("{}/api/v2/issues", self.base_url))
            .query(&self.issue_params(query, offset, count))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ReminderError::from_response("/api/v2/issues", resp).await);
        }

        let raw: Vec<BacklogIssue> = resp.json().await?;
        Ok(raw.into_iter().map(|i| self.into_issue(i)).collect())
    }

    async fn fetch_statuses(&self, project_id: ProjectId) -> Result<Vec<Status>> {
        let endpoint = format!("/api/v2/projects/{project_id}/statuses");
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, endpoint))
            .query(&[("apiKey", &self.api_key)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ReminderError::from_response(&endpoint, resp).await);
        }

        let raw: Vec<BacklogStatus> = resp.json().await?;
        Ok(raw
            .into_iter()
            .map(|s| Status {
                id: s.id,
                project_id: s.project_id.unwrap_or(project_id),
                name: s.name,
                color: s.color.unwrap_or_default(),
                display_order: s.display_order.unwrap_or_default(),
            })
            .collect())
    }
}
