pub mod backlog;
pub mod status;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{ReminderError, Result};
use crate::model::issue::{Issue, ProjectId, Status};

pub use status::{distinct_project_ids, resolve_completed_status_ids};

/// Issues requested per page.
pub const PAGE_SIZE: usize = 100;
/// Upper bound on pages fetched in a single search.
pub const MAX_PAGES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    pub assignee_id: u64,
    /// Inclusive lower bound on the due date; `None` leaves it open.
    pub due_since: Option<NaiveDate>,
    /// Inclusive upper bound on the due date.
    pub due_until: NaiveDate,
}

#[async_trait]
pub trait Tracker: Send + Sync {
    fn name(&self) -> &str;
    /// One page of the issue search, sorted by due date ascending.
    async fn fetch_issue_page(
        &self,
        query: &IssueQuery,
        offset: usize,
        count: usize,
    ) -> Result<Vec<Issue>>;
    async fn fetch_statuses(&self, project_id: ProjectId) -> Result<Vec<Status>>;
}

/// Fetch every issue matching `query`, following pages until a short one.
///
/// Pages are concatenated in the order the tracker returned them.
pub async fn fetch_assigned_issues(tracker: &dyn Tracker, query: &IssueQuery) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    for page in 0..MAX_PAGES {
        let offset = page * PAGE_SIZE;
        let batch = tracker.fetch_issue_page(query, offset, PAGE_SIZE).await?;
        let len = batch.len();
        tracing::debug!(tracker = tracker.name(), offset, len, "fetched issue page");
        issues.extend(batch);

        if len < PAGE_SIZE {
            return Ok(issues);
        }
    }

    Err(ReminderError::PageLimit { pages: MAX_PAGES })
}
