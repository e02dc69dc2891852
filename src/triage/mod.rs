pub mod filter;
pub mod metadata;
pub mod outcome;
pub mod release;
pub mod title;

use crate::config::VerifyConfig;
use crate::error::Result;
use crate::event::IssuesEvent;
use crate::platform::Platform;
use crate::platform::types::IssueRef;

use filter::SkipReason;
use metadata::ExpectedMetadata;
use outcome::{Decision, Outcome};

/// What a triage run did with its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    /// Out of scope; nothing was touched.
    Skipped(SkipReason),
    /// A comment was posted and the issue state set.
    Applied(Decision),
}

/// Triage one issue event: filter, check, then comment and set the state.
///
/// Expected failures (bad title, wrong metadata, unverified release) are
/// reported on the issue and return `Ok`. Only API faults return `Err`,
/// in which case any side effect already issued stays in place.
pub async fn run_triage(
    platform: &dyn Platform,
    settings: &VerifyConfig,
    event: &IssuesEvent,
) -> Result<TriageOutcome> {
    tracing::info!(action = %event.action, issue = event.issue.number, "Received issue event");

    if let Err(reason) = filter::check(event) {
        tracing::info!(reason = reason.describe(), "Skipping issue");
        return Ok(TriageOutcome::Skipped(reason));
    }

    let issue = event.issue_ref();
    let outcome = evaluate(platform, settings, event).await?;
    let decision = outcome.decision();

    apply_decision(platform, &issue, &decision).await?;

    tracing::info!(issue = %issue, state = %decision.state, comment = %decision.comment, "Triage applied");

    Ok(TriageOutcome::Applied(decision))
}

/// Run the checks in order. The release lookup only happens for clean metadata.
async fn evaluate(
    platform: &dyn Platform,
    settings: &VerifyConfig,
    event: &IssuesEvent,
) -> Result<Outcome> {
    let parsed = match title::parse(&event.issue.title) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::info!(error = %e, "Unexpected title format");
            return Ok(Outcome::TitleFormat { title: e.title });
        }
    };

    tracing::info!(release = %parsed.release, project = parsed.project, "Parsed verification title");

    let expected = ExpectedMetadata::for_title(&parsed, &settings.assignee);
    let validation = metadata::validate(&event.issue, &expected);
    if !validation.is_clean() {
        tracing::info!(problems = validation.problems.len(), "Issue metadata is incorrect");
        return Ok(Outcome::MetadataProblems(validation));
    }

    let status = release::verify_release(
        platform,
        settings,
        event.owner(),
        &event.repository.name,
        &parsed.release,
    )
    .await?;

    Ok(Outcome::Release {
        release: parsed.release,
        status,
    })
}

/// Post the comment, then change the state. Never reordered or overlapped.
async fn apply_decision(platform: &dyn Platform, issue: &IssueRef, decision: &Decision) -> Result<()> {
    platform.post_comment(issue, &decision.comment).await?;
    platform.set_issue_state(issue, decision.state).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::event::tests::sample_payload;
    use crate::platform::types::{IssueState, RunFilter, WorkflowRun};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Comment(IssueRef, String),
        State(IssueRef, IssueState),
        ListRuns(String, String, String, String),
    }

    #[derive(Default)]
    struct RecordingPlatform {
        runs: Vec<WorkflowRun>,
        fail_comment: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingPlatform {
        fn with_runs(runs: Vec<WorkflowRun>) -> Self {
            Self {
                runs,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Platform for RecordingPlatform {
        async fn post_comment(&self, issue: &IssueRef, body: &str) -> Result<()> {
            if self.fail_comment {
                return Err(AppError::GitHubApi("comment rejected".to_string()));
            }
            self.calls
                .lock()
                .unwrap()
                .push(Call::Comment(issue.clone(), body.to_string()));
            Ok(())
        }

        async fn set_issue_state(&self, issue: &IssueRef, state: IssueState) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::State(issue.clone(), state));
            Ok(())
        }

        async fn list_workflow_runs(
            &self,
            owner: &str,
            repo: &str,
            filter: &RunFilter,
        ) -> Result<Vec<WorkflowRun>> {
            self.calls.lock().unwrap().push(Call::ListRuns(
                owner.to_string(),
                repo.to_string(),
                filter.workflow.clone(),
                filter.event.clone(),
            ));
            Ok(self.runs.clone())
        }
    }

    fn event_from(payload: serde_json::Value) -> IssuesEvent {
        serde_json::from_value(payload).unwrap()
    }

    fn clean_event() -> IssuesEvent {
        event_from(sample_payload())
    }

    fn issue_ref() -> IssueRef {
        IssueRef {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            number: 42,
        }
    }

    fn run(branch: &str, status: &str, conclusion: Option<&str>) -> WorkflowRun {
        WorkflowRun {
            id: 77,
            run_number: 3,
            workflow_id: 1,
            head_branch: branch.to_string(),
            status: status.to_string(),
            conclusion: conclusion.map(str::to_string),
            html_url: "https://github.com/acme/widgets/actions/runs/77".to_string(),
            created_at: None,
        }
    }

    fn applied(outcome: TriageOutcome) -> Decision {
        match outcome {
            TriageOutcome::Applied(decision) => decision,
            other => panic!("expected an applied decision, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_issue_has_no_side_effects() {
        let mut payload = sample_payload();
        payload["issue"]["state"] = "closed".into();
        let platform = RecordingPlatform::default();

        let outcome = run_triage(&platform, &VerifyConfig::default(), &event_from(payload))
            .await
            .unwrap();

        assert_eq!(outcome, TriageOutcome::Skipped(SkipReason::NotOpen));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unrelated_title_has_no_side_effects() {
        let mut payload = sample_payload();
        payload["issue"]["title"] = "Crash when saving".into();
        let platform = RecordingPlatform::default();

        let outcome = run_triage(&platform, &VerifyConfig::default(), &event_from(payload))
            .await
            .unwrap();

        assert_eq!(outcome, TriageOutcome::Skipped(SkipReason::NotVerification));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_title_closes_regardless_of_other_fields() {
        let platform = RecordingPlatform::with_runs(vec![run("v1.2.3", "completed", Some("success"))]);
        for metadata_ok in [true, false] {
            let mut payload = sample_payload();
            payload["issue"]["title"] = "Verify: Project 1.2.3".into();
            if !metadata_ok {
                payload["issue"]["milestone"] = serde_json::Value::Null;
                payload["issue"]["labels"] = serde_json::json!([]);
            }

            let decision = applied(
                run_triage(&platform, &VerifyConfig::default(), &event_from(payload))
                    .await
                    .unwrap(),
            );
            assert_eq!(decision.state, IssueState::Closed);
            assert!(decision.comment.contains("is in an unexpected format"));
        }

        assert!(!platform
            .calls()
            .iter()
            .any(|c| matches!(c, Call::ListRuns(..))));
    }

    #[tokio::test]
    async fn test_release_embedded_later_in_title_is_verified() {
        let mut payload = sample_payload();
        payload["issue"]["title"] = "Verify: Project X (Verify: Project v1.2.3)".into();
        let platform = RecordingPlatform::with_runs(vec![run("v1.2.3", "completed", Some("success"))]);

        let decision = applied(
            run_triage(&platform, &VerifyConfig::default(), &event_from(payload))
                .await
                .unwrap(),
        );

        assert_eq!(decision.state, IssueState::Open);
        assert!(decision.comment.starts_with("## :tada: Release Verified!"));
    }

    #[tokio::test]
    async fn test_missing_milestone_skips_release_lookup() {
        let mut payload = sample_payload();
        payload["issue"]["milestone"] = serde_json::Value::Null;
        let platform = RecordingPlatform::with_runs(vec![run("v1.2.3", "completed", Some("success"))]);

        let decision = applied(
            run_triage(&platform, &VerifyConfig::default(), &event_from(payload))
                .await
                .unwrap(),
        );

        assert_eq!(decision.state, IssueState::Closed);
        assert_eq!(
            decision.comment,
            "## :warning: Warning\n\n **One or more issues detected!**\n\n  - The issue is missing the `Project 1` milestone.\n\nPlease re-open this issue once all of the above is fixed."
        );
        assert_eq!(
            platform.calls(),
            vec![
                Call::Comment(issue_ref(), decision.comment.clone()),
                Call::State(issue_ref(), IssueState::Closed),
            ]
        );
    }

    #[tokio::test]
    async fn test_clean_issue_without_run_is_not_verified() {
        let platform = RecordingPlatform::with_runs(vec![run("v1.2.2", "completed", Some("success"))]);

        let decision = applied(
            run_triage(&platform, &VerifyConfig::default(), &clean_event())
                .await
                .unwrap(),
        );

        assert_eq!(decision.state, IssueState::Closed);
        assert!(decision.comment.starts_with("## :stop_sign: Release Not Verified"));
        assert!(decision.comment.contains("Unable to find"));

        let calls = platform.calls();
        assert_eq!(
            calls[0],
            Call::ListRuns(
                "acme".to_string(),
                "widgets".to_string(),
                "verify.yml".to_string(),
                "release".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_passing_run_verifies_and_reopens() {
        let platform = RecordingPlatform::with_runs(vec![
            run("v1.2.4", "completed", Some("failure")),
            run("v1.2.3", "completed", Some("success")),
        ]);

        let decision = applied(
            run_triage(&platform, &VerifyConfig::default(), &clean_event())
                .await
                .unwrap(),
        );

        assert_eq!(decision.state, IssueState::Open);
        assert!(decision.comment.starts_with("## :tada: Release Verified!"));
        assert_eq!(
            &platform.calls()[1..],
            &[
                Call::Comment(issue_ref(), decision.comment.clone()),
                Call::State(issue_ref(), IssueState::Open),
            ]
        );
    }

    #[tokio::test]
    async fn test_pending_run_is_not_verified() {
        let platform = RecordingPlatform::with_runs(vec![run("v1.2.3", "in_progress", None)]);

        let decision = applied(
            run_triage(&platform, &VerifyConfig::default(), &clean_event())
                .await
                .unwrap(),
        );

        assert_eq!(decision.state, IssueState::Closed);
        assert!(decision.comment.contains("did not complete"));
    }

    #[tokio::test]
    async fn test_configured_assignee_and_workflow_are_used() {
        let mut payload = sample_payload();
        payload["issue"]["assignees"] = serde_json::json!([{ "login": "octocat" }]);
        let settings = VerifyConfig {
            assignee: "octocat".to_string(),
            workflow: "release-check.yml".to_string(),
            ..VerifyConfig::default()
        };
        let platform = RecordingPlatform::default();

        run_triage(&platform, &settings, &event_from(payload))
            .await
            .unwrap();

        assert!(matches!(
            &platform.calls()[0],
            Call::ListRuns(_, _, workflow, _) if workflow == "release-check.yml"
        ));
    }

    #[tokio::test]
    async fn test_failed_comment_leaves_state_untouched() {
        let platform = RecordingPlatform {
            fail_comment: true,
            ..RecordingPlatform::default()
        };
        let mut payload = sample_payload();
        payload["issue"]["labels"] = serde_json::json!([]);

        let result = run_triage(&platform, &VerifyConfig::default(), &event_from(payload)).await;

        assert!(matches!(result, Err(AppError::GitHubApi(_))));
        assert!(platform.calls().is_empty());
    }
}
