use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::platform::Platform;
use crate::platform::types::*;

use super::mapper::{self, ListRunsParams, WorkflowRunsPage};

/// GitHub REST API backed by octocrab, authenticated with a single token.
pub struct GitHubPlatform {
    client: Octocrab,
}

impl GitHubPlatform {
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self> {
        // Failures surface to the caller as-is; nothing is retried.
        let mut builder = Octocrab::builder()
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None);

        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| AppError::Config(format!("Invalid GitHub API URL {url}: {e}")))?;
        }

        let client = builder
            .build()
            .map_err(|e| AppError::GitHubApi(format!("Failed to build octocrab client: {e}")))?;

        Ok(Self { client })
    }

    fn issue_route(issue: &IssueRef) -> String {
        format!("/repos/{}/{}/issues/{}", issue.owner, issue.repo, issue.number)
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn post_comment(&self, issue: &IssueRef, body: &str) -> Result<()> {
        let url = format!("{}/comments", Self::issue_route(issue));
        let _: serde_json::Value = self
            .client
            .post(&url, Some(&json!({ "body": body })))
            .await
            .map_err(|e| AppError::GitHubApi(format!("Failed to comment on {issue}: {e}")))?;

        Ok(())
    }

    async fn set_issue_state(&self, issue: &IssueRef, state: IssueState) -> Result<()> {
        let url = Self::issue_route(issue);
        let _: serde_json::Value = self
            .client
            .patch(&url, Some(&json!({ "state": state.as_str() })))
            .await
            .map_err(|e| {
                AppError::GitHubApi(format!("Failed to set {issue} to {state}: {e}"))
            })?;

        Ok(())
    }

    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        filter: &RunFilter,
    ) -> Result<Vec<WorkflowRun>> {
        let url = format!(
            "/repos/{owner}/{repo}/actions/workflows/{}/runs",
            filter.workflow
        );
        let page: WorkflowRunsPage = self
            .client
            .get(&url, Some(&ListRunsParams::from(filter)))
            .await
            .map_err(|e| {
                AppError::GitHubApi(format!(
                    "Failed to list runs of {} in {owner}/{repo}: {e}",
                    filter.workflow
                ))
            })?;

        tracing::debug!(
            total_count = page.total_count,
            returned = page.workflow_runs.len(),
            workflow = %filter.workflow,
            "Fetched workflow runs"
        );

        Ok(page
            .workflow_runs
            .into_iter()
            .map(mapper::map_workflow_run)
            .collect())
    }
}
