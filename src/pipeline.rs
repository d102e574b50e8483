use chrono::{Days, NaiveDate};

use crate::classify::classify;
use crate::dispatch::Notifier;
use crate::error::Result;
use crate::model::bucket::{Urgency, UrgencyBuckets};
use crate::providers::{
    distinct_project_ids, fetch_assigned_issues, resolve_completed_status_ids, IssueQuery, Tracker,
};
use crate::report::render;

/// Farthest bucket, in days after the anchor.
const HORIZON_DAYS: u64 = 3;

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub assignee_id: u64,
    pub anchor: NaiveDate,
    pub lookback_days: Option<u32>,
    pub mention: String,
}

impl RunPlan {
    pub fn query(&self) -> IssueQuery {
        IssueQuery {
            assignee_id: self.assignee_id,
            due_since: self
                .lookback_days
                .and_then(|d| self.anchor.checked_sub_days(Days::new(d.into()))),
            due_until: self
                .anchor
                .checked_add_days(Days::new(HORIZON_DAYS))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub buckets: UrgencyBuckets,
    pub text: String,
}

/// Retrieve, classify, and render. Nothing is rendered unless every
/// retrieval step succeeded.
pub async fn compose(tracker: &dyn Tracker, plan: &RunPlan) -> Result<Report> {
    let issues = fetch_assigned_issues(tracker, &plan.query()).await?;
    let project_ids = distinct_project_ids(&issues);
    tracing::info!(
        issues = issues.len(),
        projects = project_ids.len(),
        "retrieved assigned issues"
    );

    let completed = resolve_completed_status_ids(tracker, &project_ids).await?;
    let buckets = classify(&issues, &completed, plan.anchor);
    for urgency in Urgency::ALL {
        tracing::info!(bucket = %urgency, count = buckets.get(urgency).len(), "classified");
    }

    let anchor_label = plan.anchor.format("%Y-%m-%d").to_string();
    let text = render(&buckets, &anchor_label, &plan.mention);
    Ok(Report { buckets, text })
}

pub async fn run(tracker: &dyn Tracker, notifier: &dyn Notifier, plan: &RunPlan) -> Result<Report> {
    let report = compose(tracker, plan).await?;
    notifier.send(&report.text).await?;
    tracing::info!(notifier = notifier.name(), total = report.buckets.total(), "reminder delivered");
    Ok(report)
}
