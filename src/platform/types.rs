use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open/closed state of an issue, as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addresses one issue in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Query for recorded runs of a single workflow.
#[derive(Debug, Clone)]
pub struct RunFilter {
    /// Workflow file name or numeric id, e.g. `verify.yml`.
    pub workflow: String,
    /// Triggering event, e.g. `release`.
    pub event: String,
    pub status: Option<String>,
    pub per_page: u8,
}

/// A recorded execution of a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    pub id: u64,
    pub run_number: u64,
    pub workflow_id: u64,
    pub head_branch: String,
    /// `queued`, `in_progress`, `completed`, ...
    pub status: String,
    /// `success`, `failure`, ...; absent until the run completes.
    pub conclusion: Option<String>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkflowRun {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    pub fn is_successful(&self) -> bool {
        self.conclusion.as_deref() == Some("success")
    }
}
