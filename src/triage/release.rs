use crate::config::VerifyConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::platform::types::{RunFilter, WorkflowRun};

/// Result of looking up the verification run for a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStatus {
    NotFound,
    Incomplete(WorkflowRun),
    Unsuccessful(WorkflowRun),
    Verified(WorkflowRun),
}

impl ReleaseStatus {
    /// Classify the first run recorded for `release`; earlier rows win.
    pub fn classify(runs: &[WorkflowRun], release: &str) -> Self {
        match runs.iter().find(|run| run.head_branch == release) {
            None => ReleaseStatus::NotFound,
            Some(run) if !run.is_completed() => ReleaseStatus::Incomplete(run.clone()),
            Some(run) if !run.is_successful() => ReleaseStatus::Unsuccessful(run.clone()),
            Some(run) => ReleaseStatus::Verified(run.clone()),
        }
    }
}

/// Fetch the verification workflow's release runs and classify the one for `release`.
pub async fn verify_release(
    platform: &dyn Platform,
    settings: &VerifyConfig,
    owner: &str,
    repo: &str,
    release: &str,
) -> Result<ReleaseStatus> {
    let filter = RunFilter {
        workflow: settings.workflow.clone(),
        event: settings.trigger_event.clone(),
        status: None,
        per_page: settings.runs_per_page,
    };

    let runs = platform.list_workflow_runs(owner, repo, &filter).await?;

    let branches: Vec<&str> = runs.iter().map(|r| r.head_branch.as_str()).collect();
    tracing::info!(
        count = runs.len(),
        branches = %branches.join(", "),
        "Fetched workflow runs"
    );

    let status = ReleaseStatus::classify(&runs, release);

    match &status {
        ReleaseStatus::NotFound => {
            tracing::info!(release, "No workflow run found for release");
        }
        ReleaseStatus::Incomplete(run)
        | ReleaseStatus::Unsuccessful(run)
        | ReleaseStatus::Verified(run) => {
            tracing::info!(
                release,
                workflow_id = run.workflow_id,
                run_id = run.id,
                run_number = run.run_number,
                status = %run.status,
                conclusion = run.conclusion.as_deref().unwrap_or("none"),
                url = %run.html_url,
                created_at = ?run.created_at,
                "Found workflow run for release"
            );
        }
    }

    Ok(status)
}
