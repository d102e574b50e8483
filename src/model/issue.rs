use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type IssueId = u64;
pub type ProjectId = u64;
pub type StatusId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRef {
    pub id: StatusId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    /// Human-readable key, e.g. `PROJ-42`.
    pub key: String,
    pub project_id: ProjectId,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub status: StatusRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    /// Browse URL in the tracker's web UI.
    pub url: String,
}

/// A workflow status as defined by one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub display_order: i64,
}
