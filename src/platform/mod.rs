pub mod github;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

/// Remote issue tracker and workflow-run store.
///
/// Every call is a single request; implementations must not retry.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Post a markdown comment on an issue.
    async fn post_comment(&self, issue: &IssueRef, body: &str) -> Result<()>;

    /// Set an issue's state to open or closed.
    async fn set_issue_state(&self, issue: &IssueRef, state: IssueState) -> Result<()>;

    /// List recorded runs of a workflow, in the store's default order (newest first).
    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        filter: &RunFilter,
    ) -> Result<Vec<WorkflowRun>>;
}
