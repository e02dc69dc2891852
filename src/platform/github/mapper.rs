use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::types;

/// Query string for `GET /repos/{owner}/{repo}/actions/workflows/{id}/runs`.
#[derive(Debug, Serialize)]
pub struct ListRunsParams<'a> {
    pub event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'a str>,
    pub per_page: u8,
}

impl<'a> From<&'a types::RunFilter> for ListRunsParams<'a> {
    fn from(filter: &'a types::RunFilter) -> Self {
        Self {
            event: &filter.event,
            status: filter.status.as_deref(),
            per_page: filter.per_page,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRunsPage {
    #[serde(default)]
    pub total_count: u64,
    pub workflow_runs: Vec<WorkflowRunPayload>,
}

/// The subset of a workflow run object the triage reads.
#[derive(Debug, Deserialize)]
pub struct WorkflowRunPayload {
    pub id: u64,
    #[serde(default)]
    pub run_number: u64,
    #[serde(default)]
    pub workflow_id: u64,
    pub head_branch: Option<String>,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Map an API workflow run to our platform WorkflowRun type.
pub fn map_workflow_run(run: WorkflowRunPayload) -> types::WorkflowRun {
    types::WorkflowRun {
        id: run.id,
        run_number: run.run_number,
        workflow_id: run.workflow_id,
        head_branch: run.head_branch.unwrap_or_default(),
        status: run.status.unwrap_or_default(),
        conclusion: run.conclusion,
        html_url: run.html_url,
        created_at: run.created_at,
    }
}
