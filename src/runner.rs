//! One-shot mode: triage the single issue event a CI job was started for.

use std::path::Path;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::event::IssuesEvent;
use crate::platform::github::GitHubPlatform;
use crate::triage::{run_triage, TriageOutcome};

/// Identifies the CI job this process runs in, when there is one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerContext {
    pub workflow: Option<String>,
    pub job: Option<String>,
    pub run_id: Option<String>,
    pub run_number: Option<String>,
}

impl RunnerContext {
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            workflow: lookup("GITHUB_WORKFLOW"),
            job: lookup("GITHUB_JOB"),
            run_id: lookup("GITHUB_RUN_ID"),
            run_number: lookup("GITHUB_RUN_NUMBER"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Read an `issues` event payload from disk.
pub fn load_event(path: &Path) -> Result<IssuesEvent> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::Event(format!("Failed to read event file {}: {e}", path.display()))
    })?;

    IssuesEvent::from_slice(&bytes)
        .map_err(|e| AppError::Event(format!("{} is not an issues event: {e}", path.display())))
}

pub async fn run_once(config: &AppConfig, event_path: &Path) -> Result<TriageOutcome> {
    let event = load_event(event_path)?;
    let platform = GitHubPlatform::new(config.github_token()?, config.github.api_url.as_deref())?;

    let outcome = run_triage(&platform, &config.verify, &event).await?;

    let context = RunnerContext::from_env();
    if !context.is_empty() {
        tracing::info!(
            workflow = context.workflow.as_deref().unwrap_or("-"),
            job = context.job.as_deref().unwrap_or("-"),
            run_id = context.run_id.as_deref().unwrap_or("-"),
            run_number = context.run_number.as_deref().unwrap_or("-"),
            "Done"
        );
    }

    Ok(outcome)
}
