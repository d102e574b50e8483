use std::collections::HashSet;

use futures::future::try_join_all;

use super::Tracker;
use crate::error::Result;
use crate::model::issue::{Issue, ProjectId, StatusId};

/// Marker words that identify a "done" workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMarker {
    Japanese,
    English,
}

impl CompletionMarker {
    pub const ALL: [CompletionMarker; 2] = [CompletionMarker::Japanese, CompletionMarker::English];

    /// Lowercase form of the marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionMarker::Japanese => "完了",
            CompletionMarker::English => "completed",
        }
    }

    pub fn matches(&self, status_name: &str) -> bool {
        status_name.to_lowercase().contains(self.as_str())
    }
}

pub fn is_completed_status_name(name: &str) -> bool {
    CompletionMarker::ALL.iter().any(|m| m.matches(name))
}

/// Distinct project ids in order of first appearance.
pub fn distinct_project_ids(issues: &[Issue]) -> Vec<ProjectId> {
    let mut seen = HashSet::new();
    issues
        .iter()
        .map(|i| i.project_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Look up every project's statuses and collect the ids of completed ones.
///
/// Lookups run concurrently; any single failure fails the whole resolution.
pub async fn resolve_completed_status_ids(
    tracker: &dyn Tracker,
    project_ids: &[ProjectId],
) -> Result<HashSet<StatusId>> {
    let lookups = project_ids.iter().map(|id| tracker.fetch_statuses(*id));
    let per_project = try_join_all(lookups).await?;

    let completed: HashSet<StatusId> = per_project
        .into_iter()
        .flatten()
        .filter(|s| is_completed_status_name(&s.name))
        .map(|s| s.id)
        .collect();

    tracing::debug!(
        projects = project_ids.len(),
        completed = completed.len(),
        "resolved completed statuses"
    );
    Ok(completed)
}
